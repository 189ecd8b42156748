//! Header field parsing.
//!
//! Each line of the head is turned into one `Name: value` field:
//!
//! - the name must be non-empty and contain no whitespace
//! - surrounding optional whitespace is trimmed from the value
//! - a line starting with SP or HTAB would be an obsolete folded
//!   continuation, which is rejected
//!
//! # Limits
//!
//! - Maximum number of headers: [`MAX_HEADER_NUM`] unless configured
//! - Maximum head size: [`MAX_HEADER_BYTES`] unless configured, enforced by
//!   the line reader

use tracing::trace;

use crate::ensure;
use crate::protocol::{HeaderContainer, ParseError};

/// Default maximum number of header fields in one message
pub const MAX_HEADER_NUM: usize = 64;

/// Default maximum size in bytes of a head (start line included)
pub const MAX_HEADER_BYTES: usize = 8 * 1024;

/// Accumulates the header lines of one message.
#[derive(Debug)]
pub struct HeaderDecoder {
    headers: HeaderContainer,
    max_headers: usize,
}

impl HeaderDecoder {
    pub fn new(max_headers: usize) -> Self {
        Self { headers: HeaderContainer::new(), max_headers }
    }

    /// Parses one header line, terminator already removed.
    pub fn decode_line(&mut self, line: &str) -> Result<(), ParseError> {
        ensure!(
            !line.starts_with([' ', '\t']),
            ParseError::malformed_header_line(format!("obsolete line folding is not supported: {line:?}"))
        );

        let (name, value) =
            line.split_once(':').ok_or_else(|| ParseError::malformed_header_line(format!("missing ':' in {line:?}")))?;

        ensure!(!name.is_empty(), ParseError::malformed_header_line(format!("empty header name in {line:?}")));
        ensure!(
            !name.contains(|c: char| c.is_ascii_whitespace() || c.is_ascii_control()),
            ParseError::malformed_header_line(format!("invalid header name {name:?}"))
        );
        ensure!(self.headers.len() < self.max_headers, ParseError::too_many_headers(self.max_headers));

        let value = value.trim_matches([' ', '\t']);
        trace!(name, value, "decoded header");
        self.headers.add(name, value);
        Ok(())
    }

    pub fn finish(self) -> HeaderContainer {
        self.headers
    }
}

impl Default for HeaderDecoder {
    fn default() -> Self {
        Self::new(MAX_HEADER_NUM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(lines: &[&str]) -> Result<HeaderContainer, ParseError> {
        let mut decoder = HeaderDecoder::default();
        for line in lines {
            decoder.decode_line(line)?;
        }
        Ok(decoder.finish())
    }

    #[test]
    fn from_curl() {
        let headers = decode(&["Host: 127.0.0.1:8080", "User-Agent: curl/7.79.1", "Accept: */*"]).unwrap();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("accept"), vec!["*/*"]);
        assert_eq!(headers.get("HOST"), vec!["127.0.0.1:8080"]);
        assert_eq!(headers.get("user-agent"), vec!["curl/7.79.1"]);
    }

    #[test]
    fn value_whitespace_is_trimmed() {
        let headers = decode(&["X-A:no-space", "X-B: \t padded \t ", "X-C:", "sec-ch-ua: \"Chromium\";v=\"109\", \"Edge\""]).unwrap();

        assert_eq!(headers.first("x-a"), Some("no-space"));
        assert_eq!(headers.first("x-b"), Some("padded"));
        assert_eq!(headers.first("x-c"), Some(""));
        assert_eq!(headers.first("SEC-CH-UA"), Some("\"Chromium\";v=\"109\", \"Edge\""));
    }

    #[test]
    fn only_the_first_colon_splits() {
        let headers = decode(&["Host: localhost:8080"]).unwrap();

        assert_eq!(headers.first("Host"), Some("localhost:8080"));
    }

    #[test]
    fn malformed_lines() {
        for line in ["BadHeader", ": no-name", "Bad Name: x", "Name : x", " folded continuation", "\tfolded"] {
            let result = decode(&["Accept: */*", line]);
            assert!(matches!(result, Err(ParseError::MalformedHeaderLine { .. })), "{line:?} should be rejected");
        }
    }

    #[test]
    fn header_count_limit() {
        let mut decoder = HeaderDecoder::new(2);
        decoder.decode_line("A: 1").unwrap();
        decoder.decode_line("B: 2").unwrap();

        assert!(matches!(decoder.decode_line("C: 3"), Err(ParseError::TooManyHeaders { max_num: 2 })));
    }
}
