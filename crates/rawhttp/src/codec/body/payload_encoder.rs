use crate::codec::body::chunked_encoder::ChunkedEncoder;
use crate::codec::body::length_encoder::LengthEncoder;
use crate::protocol::{BodyFraming, PayloadItem, SendError};
use bytes::{Buf, BytesMut};

use tokio_util::codec::Encoder;

/// encode payload for a message body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadEncoder {
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    /// content-length payload
    Length(LengthEncoder),

    /// transfer-encoding chunked payload
    Chunked(ChunkedEncoder),

    /// raw bytes, the end is signalled by closing the connection
    UntilClose { eof: bool },
}

impl PayloadEncoder {
    /// create a chunked `PayloadEncoder`
    pub fn chunked() -> Self {
        Self { kind: Kind::Chunked(ChunkedEncoder::new()) }
    }

    /// create a fixed length `PayloadEncoder`
    pub fn fix_length(size: u64) -> Self {
        Self { kind: Kind::Length(LengthEncoder::new(size)) }
    }

    pub fn until_close() -> Self {
        Self { kind: Kind::UntilClose { eof: false } }
    }

    pub fn is_chunked(&self) -> bool {
        matches!(self.kind, Kind::Chunked(_))
    }

    pub fn is_finish(&self) -> bool {
        match &self.kind {
            Kind::Length(encoder) => encoder.is_finish(),
            Kind::Chunked(encoder) => encoder.is_finish(),
            Kind::UntilClose { eof } => *eof,
        }
    }
}

impl From<BodyFraming> for PayloadEncoder {
    fn from(framing: BodyFraming) -> Self {
        match framing {
            BodyFraming::ContentLength(length) => Self::fix_length(length),
            BodyFraming::Chunked => Self::chunked(),
            BodyFraming::UntilClose => Self::until_close(),
        }
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for PayloadEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match &mut self.kind {
            Kind::Length(encoder) => encoder.encode(item, dst),
            Kind::Chunked(encoder) => encoder.encode(item, dst),
            Kind::UntilClose { eof } => {
                match item {
                    PayloadItem::Chunk(mut bytes) => {
                        while bytes.has_remaining() {
                            let chunk = bytes.chunk();
                            let len = chunk.len();
                            dst.extend_from_slice(chunk);
                            bytes.advance(len);
                        }
                    }
                    PayloadItem::Eof => *eof = true,
                }
                Ok(())
            }
        }
    }
}
