//! Serialization of in-memory messages.

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Encoder;

use crate::codec::{HeaderEncoder, PayloadEncoder};
use crate::protocol::{Body, EagerBody, HeaderContainer, PayloadItem, SendError, StartLine};

/// Writes an in-memory body with the framing it was received with. A
/// chunked body goes out as one chunk followed by the terminator.
pub(crate) fn encode_eager_body(body: &EagerBody, dst: &mut BytesMut) -> Result<(), SendError> {
    let mut encoder = PayloadEncoder::from(body.framing());
    encoder.encode(PayloadItem::Chunk(body.as_bytes().clone()), dst)?;
    encoder.encode(PayloadItem::<Bytes>::Eof, dst)
}

/// Writes head and body of a detached message into `dst`.
pub(crate) fn encode_message<L: StartLine>(
    start_line: &L,
    headers: &HeaderContainer,
    body: &Body,
    dst: &mut BytesMut,
) -> Result<(), SendError> {
    HeaderEncoder.encode((start_line, headers), dst)?;

    match body.as_eager() {
        Some(body) => encode_eager_body(body, dst),
        None => Ok(()),
    }
}

pub(crate) fn message_to_bytes<L: StartLine>(
    start_line: &L,
    headers: &HeaderContainer,
    body: &Body,
) -> Result<Bytes, SendError> {
    let mut dst = BytesMut::new();
    encode_message(start_line, headers, body, &mut dst)?;
    Ok(dst.freeze())
}
