use crate::protocol::{PayloadItem, SendError};
use bytes::{Buf, BytesMut};
use tokio_util::codec::Encoder;
use tracing::warn;

/// Writes exactly `length` payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthEncoder {
    length: u64,
}

impl LengthEncoder {
    pub fn new(length: u64) -> Self {
        Self { length }
    }

    pub fn is_finish(&self) -> bool {
        self.length == 0
    }
}

impl<D: Buf> Encoder<PayloadItem<D>> for LengthEncoder {
    type Error = SendError;

    fn encode(&mut self, item: PayloadItem<D>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            PayloadItem::Chunk(mut bytes) => {
                if !bytes.has_remaining() {
                    return Ok(());
                }
                let size = bytes.remaining() as u64;
                if size > self.length {
                    warn!(size, remaining = self.length, "payload larger than the declared content-length");
                    return Err(SendError::invalid_body(format!(
                        "{size} more bytes but only {} left of the declared content-length",
                        self.length
                    )));
                }
                while bytes.has_remaining() {
                    let chunk = bytes.chunk();
                    let len = chunk.len();
                    dst.extend_from_slice(chunk);
                    bytes.advance(len);
                }
                self.length -= size;
                Ok(())
            }
            PayloadItem::Eof if self.length > 0 => {
                Err(SendError::invalid_body(format!("payload ended {} bytes short of its content-length", self.length)))
            }
            PayloadItem::Eof => Ok(()),
        }
    }
}
