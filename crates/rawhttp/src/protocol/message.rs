use bytes::{Buf, Bytes};

/// Represents an item in the HTTP message payload stream.
///
/// This enum is used by the payload decoders to produce either data chunks
/// or signal the end of the payload stream (EOF).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem<Data: Buf = Bytes> {
    /// A chunk of payload data
    Chunk(Data),
    /// Marks the end of the payload stream
    Eof,
}

/// How the end of a message body is found on the wire.
///
/// - Known length: read exactly that many bytes
/// - Chunked: read chunks until the zero-sized terminator
/// - Until close: read until the peer closes the stream
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BodyFraming {
    /// Body with a `Content-Length` in bytes
    ContentLength(u64),
    /// Body using chunked transfer encoding
    Chunked,
    /// Body delimited by the end of the stream
    UntilClose,
}

impl BodyFraming {
    /// Returns true if the body uses chunked transfer encoding
    #[inline]
    pub fn is_chunked(&self) -> bool {
        matches!(self, BodyFraming::Chunked)
    }

    /// Returns true if the body can only end when the stream closes
    #[inline]
    pub fn is_until_close(&self) -> bool {
        matches!(self, BodyFraming::UntilClose)
    }

    /// The exact body size, when the framing declares one
    #[inline]
    pub fn content_length(&self) -> Option<u64> {
        match self {
            BodyFraming::ContentLength(length) => Some(*length),
            _ => None,
        }
    }
}

impl<D: Buf> PayloadItem<D> {
    /// Returns true if this item represents the end of the payload stream
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, PayloadItem::Eof)
    }

    /// Returns true if this item contains chunk data
    #[inline]
    pub fn is_chunk(&self) -> bool {
        matches!(self, PayloadItem::Chunk(_))
    }
}

impl PayloadItem {
    /// Returns a reference to the contained bytes if this is a Chunk
    ///
    /// Returns None if this is an EOF marker
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }

    /// Consumes the PayloadItem and returns the contained bytes if this is a Chunk
    ///
    /// Returns None if this is an EOF marker
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }
}

impl From<Bytes> for PayloadItem {
    fn from(bytes: Bytes) -> Self {
        Self::Chunk(bytes)
    }
}
