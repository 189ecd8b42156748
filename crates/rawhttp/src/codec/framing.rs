//! Body framing decisions, following
//! [RFC 9112 Section 6.3](https://www.rfc-editor.org/rfc/rfc9112#section-6.3).
//!
//! First match wins:
//!
//! 1. responses that can't have a body: `1xx`, `204`, `304`, or a
//!    [`ResponseContext`] saying so (answers to `HEAD` and `CONNECT`)
//! 2. `Transfer-Encoding` ending in `chunked`
//! 3. `Content-Length`
//! 4. nothing: no body for a request; for a response, everything until the
//!    stream closes, unless the stream is persistent
//!
//! A `Transfer-Encoding` that doesn't end in `chunked` makes a response run
//! until close and is ignored on a request.

use http::StatusCode;
use tracing::trace;

use crate::codec::ResponseContext;
use crate::ensure;
use crate::protocol::{BodyFraming, HeaderContainer, ParseError};

/// Framing of a request body, `None` when the request has none.
pub(crate) fn request_framing(headers: &HeaderContainer) -> Result<Option<BodyFraming>, ParseError> {
    if is_chunked(headers) {
        return Ok(Some(BodyFraming::Chunked));
    }
    let framing = content_length(headers)?.map(BodyFraming::ContentLength);
    trace!(?framing, "request framing");
    Ok(framing)
}

/// Framing of a response body, `None` when the response has none.
pub(crate) fn response_framing(
    status: StatusCode,
    headers: &HeaderContainer,
    ctx: ResponseContext,
) -> Result<Option<BodyFraming>, ParseError> {
    if ctx.is_no_body()
        || status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED
    {
        trace!(%status, "response can't have a body");
        return Ok(None);
    }

    let framing = if is_chunked(headers) {
        Some(BodyFraming::Chunked)
    } else if headers.contains("Transfer-Encoding") {
        Some(BodyFraming::UntilClose)
    } else if let Some(length) = content_length(headers)? {
        Some(BodyFraming::ContentLength(length))
    } else if ctx.is_persistent() {
        None
    } else {
        Some(BodyFraming::UntilClose)
    };

    trace!(%status, ?framing, "response framing");
    Ok(framing)
}

/// True when the last coding of all `Transfer-Encoding` values is `chunked`.
pub(crate) fn is_chunked(headers: &HeaderContainer) -> bool {
    headers
        .get("Transfer-Encoding")
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|coding| !coding.is_empty())
        .next_back()
        .is_some_and(|coding| coding.eq_ignore_ascii_case("chunked"))
}

/// Parses `Content-Length`, which may be repeated (or be a list) as long as
/// every value agrees.
pub(crate) fn content_length(headers: &HeaderContainer) -> Result<Option<u64>, ParseError> {
    let mut length = None;

    for value in headers.get("Content-Length").iter().flat_map(|value| value.split(',')) {
        let value = value.trim();
        ensure!(
            !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
            ParseError::malformed_content_length(format!("value {value:?} is not a non-negative integer"))
        );
        let parsed = value
            .parse::<u64>()
            .map_err(|_| ParseError::malformed_content_length(format!("value {value} is too large")))?;

        match length {
            Some(previous) if previous != parsed => {
                return Err(ParseError::malformed_content_length(format!("conflicting values {previous} and {parsed}")))
            }
            _ => length = Some(parsed),
        }
    }

    Ok(length)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(fields: &[(&str, &str)]) -> HeaderContainer {
        fields.iter().copied().collect()
    }

    #[test]
    fn check_is_chunked() {
        assert!(!is_chunked(&headers(&[])));
        assert!(is_chunked(&headers(&[("Accept", "foo"), ("Transfer-Encoding", "gzip, chunked"), ("Host", "bar")])));
        assert!(is_chunked(&headers(&[("transfer-encoding", "gzip"), ("Transfer-Encoding", "Chunked")])));
        assert!(!is_chunked(&headers(&[("Transfer-Encoding", "chunked, gzip")])));
        assert!(!is_chunked(&headers(&[("Transfer-Encoding", "gzip")])));
    }

    #[test]
    fn content_length_values() {
        assert_eq!(content_length(&headers(&[])).unwrap(), None);
        assert_eq!(content_length(&headers(&[("content-length", " 51 ")])).unwrap(), Some(51));
        assert_eq!(content_length(&headers(&[("Content-Length", "5"), ("Content-Length", "5")])).unwrap(), Some(5));
        assert_eq!(content_length(&headers(&[("Content-Length", "5, 5")])).unwrap(), Some(5));

        for bad in ["-1", "+5", "5a", "", "1.0", "99999999999999999999999"] {
            let result = content_length(&headers(&[("Content-Length", bad)]));
            assert!(matches!(result, Err(ParseError::MalformedContentLength { .. })), "{bad:?} should be rejected");
        }

        let result = content_length(&headers(&[("Content-Length", "5"), ("Content-Length", "6")]));
        assert!(matches!(result, Err(ParseError::MalformedContentLength { .. })));
    }

    #[test]
    fn requests() {
        assert_eq!(request_framing(&headers(&[])).unwrap(), None);
        assert_eq!(request_framing(&headers(&[("Content-Length", "10")])).unwrap(), Some(BodyFraming::ContentLength(10)));
        assert_eq!(request_framing(&headers(&[("Transfer-Encoding", "gzip")])).unwrap(), None);
        assert_eq!(
            request_framing(&headers(&[("Content-Length", "10"), ("Transfer-Encoding", "chunked")])).unwrap(),
            Some(BodyFraming::Chunked)
        );
    }

    #[test]
    fn responses_without_body() {
        let framed = headers(&[("Content-Length", "10"), ("Transfer-Encoding", "chunked")]);
        let ctx = ResponseContext::default();

        for status in [StatusCode::CONTINUE, StatusCode::SWITCHING_PROTOCOLS, StatusCode::NO_CONTENT, StatusCode::NOT_MODIFIED] {
            assert_eq!(response_framing(status, &framed, ctx).unwrap(), None, "{status}");
        }

        let for_head = ResponseContext::for_request(&http::Method::HEAD);
        assert_eq!(response_framing(StatusCode::OK, &framed, for_head).unwrap(), None);
    }

    #[test]
    fn responses_with_body() {
        let ctx = ResponseContext::default();

        assert_eq!(
            response_framing(StatusCode::OK, &headers(&[("Content-Length", "3")]), ctx).unwrap(),
            Some(BodyFraming::ContentLength(3))
        );
        assert_eq!(
            response_framing(StatusCode::OK, &headers(&[("Transfer-Encoding", "chunked")]), ctx).unwrap(),
            Some(BodyFraming::Chunked)
        );
        assert_eq!(
            response_framing(StatusCode::OK, &headers(&[("Transfer-Encoding", "gzip"), ("Content-Length", "3")]), ctx).unwrap(),
            Some(BodyFraming::UntilClose)
        );
        assert_eq!(response_framing(StatusCode::OK, &headers(&[]), ctx).unwrap(), Some(BodyFraming::UntilClose));
        assert_eq!(response_framing(StatusCode::OK, &headers(&[]), ctx.persistent()).unwrap(), None);
    }
}
