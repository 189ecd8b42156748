//! Serialization of message heads.
//!
//! Fields are written in stored order with their original casing, so a
//! parsed head is reproduced byte for byte (line terminators normalized to
//! CRLF). Text goes out as ISO-8859-1 when it fits, the charset heads are
//! read with.

use crate::protocol::{HeaderContainer, SendError, StartLine};
use crate::utils::put_head_text;

use bytes::{BufMut, BytesMut};

use tokio_util::codec::Encoder;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Encoder for a start line followed by its header fields and the blank line
/// ending the head.
#[derive(Debug)]
pub struct HeaderEncoder;

impl<'a, L: StartLine> Encoder<(&'a L, &'a HeaderContainer)> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, item: (&'a L, &'a HeaderContainer), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (start_line, headers) = item;

        dst.reserve(INIT_HEADER_SIZE);
        start_line.encode(dst)?;

        for (name, value) in headers.iter() {
            put_head_text(dst, name);
            dst.put_slice(b": ");
            put_head_text(dst, value);
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
