//! Decoder for message payloads.
//!
//! Dispatches to the framing the message declared:
//! - Content-Length based payloads
//! - Chunked transfer encoding
//! - Payloads that run until the peer closes the stream

use crate::codec::body::chunked_decoder::ChunkedDecoder;
use crate::codec::body::length_decoder::LengthDecoder;
use crate::protocol::{BodyFraming, ParseError, PayloadItem};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A unified decoder for message payloads.
///
/// Never takes a byte past the end of the payload out of `src`, so what is
/// left in the buffer after [`PayloadItem::Eof`] belongs to the next message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadDecoder {
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    /// Decode payload with a fixed content length
    Length(LengthDecoder),

    /// Decode payload using chunked transfer encoding
    Chunked(ChunkedDecoder),

    /// Everything up to end of stream
    UntilClose,
}

impl PayloadDecoder {
    /// Creates a PayloadDecoder for chunked transfer encoding.
    pub fn chunked() -> Self {
        Self { kind: Kind::Chunked(ChunkedDecoder::new()) }
    }

    /// Creates a PayloadDecoder for a fixed-length payload.
    pub fn fix_length(size: u64) -> Self {
        Self { kind: Kind::Length(LengthDecoder::new(size)) }
    }

    pub fn until_close() -> Self {
        Self { kind: Kind::UntilClose }
    }

    pub fn is_chunked(&self) -> bool {
        matches!(self.kind, Kind::Chunked(_))
    }

    pub fn is_until_close(&self) -> bool {
        matches!(self.kind, Kind::UntilClose)
    }

    /// True when the whole payload was decoded and no more bytes may be
    /// taken from the stream. A body running until close never knows.
    pub fn is_finished(&self) -> bool {
        match &self.kind {
            Kind::Length(length_decoder) => length_decoder.remaining() == 0,
            Kind::Chunked(chunked_decoder) => chunked_decoder.is_finished(),
            Kind::UntilClose => false,
        }
    }
}

impl From<BodyFraming> for PayloadDecoder {
    fn from(framing: BodyFraming) -> Self {
        match framing {
            BodyFraming::ContentLength(length) => Self::fix_length(length),
            BodyFraming::Chunked => Self::chunked(),
            BodyFraming::UntilClose => Self::until_close(),
        }
    }
}

impl Decoder for PayloadDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match &mut self.kind {
            Kind::Length(length_decoder) => length_decoder.decode(src),
            Kind::Chunked(chunked_decoder) => chunked_decoder.decode(src),
            Kind::UntilClose if src.is_empty() => Ok(None),
            Kind::UntilClose => Ok(Some(PayloadItem::Chunk(src.split().freeze()))),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match &mut self.kind {
            Kind::Length(length_decoder) => length_decoder.decode_eof(src),
            Kind::Chunked(chunked_decoder) => chunked_decoder.decode_eof(src),
            Kind::UntilClose => match self.decode(src)? {
                Some(item) => Ok(Some(item)),
                None => Ok(Some(PayloadItem::Eof)),
            },
        }
    }
}
