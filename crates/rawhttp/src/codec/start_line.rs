//! Request-line and status-line parsing.

use http::{Method, StatusCode};

use crate::ensure;
use crate::protocol::{HttpVersion, ParseError, StatusLine};

/// A request line before its target is resolved against the headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawRequestLine {
    pub(crate) method: Method,
    pub(crate) target: String,
    pub(crate) version: HttpVersion,
}

/// `METHOD SP TARGET [SP HTTP-VERSION]`, the version defaulting to HTTP/1.1.
pub(crate) fn parse_request_line(line: &str) -> Result<RawRequestLine, ParseError> {
    let mut tokens = line.split_ascii_whitespace();

    let method = tokens.next().ok_or_else(|| ParseError::malformed_start_line("empty request line"))?;
    let method = Method::from_bytes(method.as_bytes())
        .map_err(|_| ParseError::malformed_start_line(format!("invalid method {method:?}")))?;

    let target = tokens.next().ok_or_else(|| ParseError::malformed_start_line(format!("missing request target in {line:?}")))?;

    let version = match tokens.next() {
        Some(version) => version.parse()?,
        None => HttpVersion::default(),
    };

    ensure!(tokens.next().is_none(), ParseError::malformed_start_line(format!("unexpected trailing tokens in {line:?}")));

    Ok(RawRequestLine { method, target: target.to_owned(), version })
}

/// `HTTP-VERSION SP STATUS-CODE [SP REASON-PHRASE]`. The reason phrase is the
/// rest of the line and may be empty or contain spaces.
pub(crate) fn parse_status_line(line: &str) -> Result<StatusLine, ParseError> {
    let (version, rest) =
        line.split_once(' ').ok_or_else(|| ParseError::malformed_start_line(format!("missing status code in {line:?}")))?;
    let version: HttpVersion = version.parse()?;

    let (code, reason) = match rest.split_once(' ') {
        Some((code, reason)) => (code, reason),
        None => (rest, ""),
    };

    ensure!(
        code.len() == 3 && code.bytes().all(|b| b.is_ascii_digit()),
        ParseError::malformed_start_line(format!("invalid status code {code:?}"))
    );
    let status = StatusCode::from_bytes(code.as_bytes())
        .ok()
        .filter(|status| (100..600).contains(&status.as_u16()))
        .ok_or_else(|| ParseError::malformed_start_line(format!("status code {code} out of range")))?;

    Ok(StatusLine::new(version, status, reason))
}
