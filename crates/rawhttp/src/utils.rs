//! Small helpers shared by the parser and the writers.

use bytes::{BufMut, BytesMut};
use encoding_rs::mem::{encode_latin1_lossy, is_str_latin1};
use std::io;

/// Returns `Err($error)` from the enclosing function unless `$predicate`
/// holds.
///
/// ```ignore
/// ensure!(headers.len() < max_headers, ParseError::too_many_headers(max_headers));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

/// `io::Write` adapter over a `BytesMut`, so `write!` can format straight
/// into an encoder's destination buffer.
pub(crate) struct FastWrite<'a>(pub(crate) &'a mut BytesMut);

impl io::Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Puts head text back into bytes. Heads are read as ISO-8859-1, so text in
/// that range goes out one byte per char; wider text is written as UTF-8.
pub(crate) fn put_head_text(dst: &mut BytesMut, text: &str) {
    if is_str_latin1(text) {
        dst.put_slice(&encode_latin1_lossy(text));
    } else {
        dst.put_slice(text.as_bytes());
    }
}
