//! Line-oriented reading of message heads.

use encoding_rs::mem::decode_latin1;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::protocol::ParseError;

/// One line of a message head, terminator removed.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Line {
    /// Ended by `\n` or `\r\n`.
    Terminated(Vec<u8>),
    /// Cut off by the end of the stream.
    Unterminated(Vec<u8>),
    /// Nothing left on the stream.
    Eof,
}

/// Reads head lines from a buffered stream while enforcing a byte budget for
/// the whole head.
///
/// Never reads past the `\n` ending a line, so the first body byte stays on
/// the stream.
#[derive(Debug)]
pub(crate) struct LineReader {
    limit: usize,
    consumed: usize,
}

impl LineReader {
    pub(crate) fn new(limit: usize) -> Self {
        Self { limit, consumed: 0 }
    }

    pub(crate) async fn read_line<R>(&mut self, reader: &mut R) -> Result<Line, ParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        let remaining = self.limit.saturating_sub(self.consumed);
        let mut line = Vec::new();

        // one extra byte tells a line of exactly the budget from a longer one
        let read = (&mut *reader).take(remaining as u64 + 1).read_until(b'\n', &mut line).await?;
        self.consumed += read;

        if self.consumed > self.limit {
            return Err(ParseError::too_large_header(self.consumed, self.limit));
        }
        if read == 0 {
            return Ok(Line::Eof);
        }

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            Ok(Line::Terminated(line))
        } else {
            Ok(Line::Unterminated(line))
        }
    }
}

/// Head text is read as ISO-8859-1, which maps every byte to one char, so
/// writing the head back reproduces the bytes that were read.
pub(crate) fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) if text.is_ascii() => text,
        Ok(text) => decode_latin1(text.as_bytes()).into_owned(),
        Err(e) => decode_latin1(e.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn crlf_and_lf_terminators() {
        let mut stream: &[u8] = b"GET / HTTP/1.1\r\nHost: a\n\r\nbody";
        let mut reader = LineReader::new(1024);

        assert_eq!(reader.read_line(&mut stream).await.unwrap(), Line::Terminated(b"GET / HTTP/1.1".to_vec()));
        assert_eq!(reader.read_line(&mut stream).await.unwrap(), Line::Terminated(b"Host: a".to_vec()));
        assert_eq!(reader.read_line(&mut stream).await.unwrap(), Line::Terminated(Vec::new()));
        assert_eq!(stream, b"body");
    }

    #[tokio::test]
    async fn end_of_stream() {
        let mut stream: &[u8] = b"GET localhost:8080";
        let mut reader = LineReader::new(1024);

        assert_eq!(reader.read_line(&mut stream).await.unwrap(), Line::Unterminated(b"GET localhost:8080".to_vec()));
        assert_eq!(reader.read_line(&mut stream).await.unwrap(), Line::Eof);
    }

    #[tokio::test]
    async fn budget_covers_all_lines() {
        let mut stream: &[u8] = b"0123456\r\n0123456\r\n";
        let mut reader = LineReader::new(12);

        assert!(reader.read_line(&mut stream).await.is_ok());
        let result = reader.read_line(&mut stream).await;
        assert!(matches!(result, Err(ParseError::TooLargeHeader { max_size: 12, .. })));
    }

    #[tokio::test]
    async fn line_of_exactly_the_budget() {
        let mut stream: &[u8] = b"abc\r\n";
        let mut reader = LineReader::new(5);

        assert_eq!(reader.read_line(&mut stream).await.unwrap(), Line::Terminated(b"abc".to_vec()));
    }

    #[test]
    fn every_byte_is_one_char() {
        assert_eq!(decode_text(b"text/plain".to_vec()), "text/plain");
        assert_eq!(decode_text(b"caf\xe9".to_vec()), "caf\u{e9}");
        assert_eq!(decode_text(b"caf\xc3\xa9".to_vec()), "caf\u{c3}\u{a9}");
    }
}
