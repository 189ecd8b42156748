//! Raw requests.

use bytes::Bytes;
use http::{HeaderName, HeaderValue, Method, Request, Uri};
use tokio::io::AsyncBufRead;

use crate::codec::message_to_bytes;
use crate::protocol::body::{Body, Detached, EagerBody};
use crate::protocol::{HeaderContainer, HttpVersion, ParseError, RequestLine, SendError, StartLine};

/// A request as it was read: request line, header fields in arrival order
/// and a body that may still be on the stream `S`.
#[derive(Debug)]
pub struct RawRequest<S = Detached> {
    line: RequestLine,
    headers: HeaderContainer,
    body: Body<S>,
}

impl<S> RawRequest<S> {
    pub fn new(line: RequestLine, headers: HeaderContainer, body: Body<S>) -> Self {
        Self { line, headers, body }
    }

    pub fn start_line(&self) -> &RequestLine {
        &self.line
    }

    pub fn method(&self) -> &Method {
        self.line.method()
    }

    /// The absolute URI, resolved against the `Host` header if needed.
    pub fn uri(&self) -> &Uri {
        self.line.uri()
    }

    pub fn version(&self) -> HttpVersion {
        self.line.version()
    }

    pub fn headers(&self) -> &HeaderContainer {
        &self.headers
    }

    pub fn body(&self) -> &Body<S> {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body<S> {
        &mut self.body
    }

    pub fn into_body(self) -> Body<S> {
        self.body
    }

    pub(crate) fn parts_mut(&mut self) -> (&RequestLine, &HeaderContainer, &mut Body<S>) {
        (&self.line, &self.headers, &mut self.body)
    }

    pub fn into_parts(self) -> (RequestLine, HeaderContainer, Body<S>) {
        (self.line, self.headers, self.body)
    }

    /// Replaces every header field. Framing fields are taken as given.
    pub fn with_headers(self, headers: HeaderContainer) -> Self {
        Self { headers, ..self }
    }

    /// Points the request at another `host[:port]`.
    ///
    /// The URI loses its old port even if `host` has none, and an existing
    /// `Host` header is updated to match.
    pub fn with_host(self, host: &str) -> Result<Self, ParseError> {
        let line = self.line.with_host(host)?;
        let headers = if self.headers.contains("Host") { self.headers.with("Host", host) } else { self.headers };
        Ok(Self { line, headers, body: self.body })
    }

    /// Replaces the body, updating `Content-Length` and `Transfer-Encoding`
    /// to its framing. A lazy body being replaced is left unread.
    pub fn with_body<T>(self, body: Body<T>) -> RawRequest<T> {
        let headers = self.headers.with_framing(body.framing());
        RawRequest { line: self.line, headers, body }
    }
}

impl<S> RawRequest<S>
where
    S: AsyncBufRead + Unpin,
{
    /// Reads the body into memory so the request no longer needs the stream.
    pub async fn eagerly(self) -> Result<RawRequest, ParseError> {
        Ok(RawRequest { line: self.line, headers: self.headers, body: self.body.eagerly().await? })
    }
}

impl RawRequest {
    /// The request in wire format.
    pub fn to_bytes(&self) -> Result<Bytes, SendError> {
        message_to_bytes(&self.line, &self.headers, &self.body)
    }

    /// Converts into an [`http::Request`]. An absent body becomes an empty one.
    ///
    /// # Errors
    ///
    /// [`ParseError::MalformedHeaderLine`] when a field is not valid for
    /// [`http::HeaderMap`].
    pub fn into_http(self) -> Result<Request<EagerBody>, ParseError> {
        let mut builder = Request::builder()
            .method(self.line.method().clone())
            .uri(self.line.uri().clone())
            .version(self.line.version().into());

        if let Some(headers) = builder.headers_mut() {
            headers.reserve(self.headers.len());
            for (name, value) in self.headers.iter() {
                headers.append(header_name(name)?, header_value(value)?);
            }
        }

        let body = self.body.into_eager().unwrap_or_else(|| EagerBody::new(Bytes::new()));
        builder.body(body).map_err(|e| ParseError::malformed_start_line(e.to_string()))
    }
}

impl Clone for RawRequest {
    fn clone(&self) -> Self {
        Self { line: self.line.clone(), headers: self.headers.clone(), body: self.body.clone() }
    }
}

impl PartialEq for RawRequest {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line && self.headers == other.headers && self.body == other.body
    }
}

pub(crate) fn header_name(name: &str) -> Result<HeaderName, ParseError> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ParseError::malformed_header_line(format!("invalid header name {name:?}: {e}")))
}

pub(crate) fn header_value(value: &str) -> Result<HeaderValue, ParseError> {
    HeaderValue::from_str(value)
        .map_err(|e| ParseError::malformed_header_line(format!("invalid header value {value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::BodyFraming;

    fn request() -> RawRequest {
        let line = RequestLine::new(Method::POST, Uri::from_static("http://localhost:8080/echo?x=1"), HttpVersion::Http11);
        let headers = HeaderContainer::from_iter([("Host", "localhost:8080"), ("Content-Length", "5")]);
        RawRequest::new(line, headers, EagerBody::new("hello").into())
    }

    #[test]
    fn to_wire_format() {
        let bytes = request().to_bytes().unwrap();

        assert_eq!(&bytes[..], &b"POST /echo?x=1 HTTP/1.1\r\nHost: localhost:8080\r\nContent-Length: 5\r\n\r\nhello"[..]);
    }

    #[test]
    fn moved_to_other_host() {
        let moved = request().with_host("example.com").unwrap();

        assert_eq!(moved.uri().host(), Some("example.com"));
        assert_eq!(moved.uri().port_u16(), None);
        assert_eq!(moved.headers().get("host"), vec!["example.com"]);
        assert_eq!(moved.headers().names(), vec!["Host", "Content-Length"]);
    }

    #[test]
    fn new_body_updates_framing() {
        let chunked = request().with_body(EagerBody::with_framing("Wikipedia", BodyFraming::Chunked).into());

        assert_eq!(chunked.headers().get("Transfer-Encoding"), vec!["chunked"]);
        assert!(!chunked.headers().contains("content-length"));
        assert!(chunked.to_bytes().unwrap().ends_with(b"\r\n\r\n9\r\nWikipedia\r\n0\r\n\r\n"));

        let empty: RawRequest = request().with_body(Body::Absent);
        assert_eq!(empty.headers().names(), vec!["Host"]);
    }

    #[test]
    fn into_http_request() {
        let http = request().into_http().unwrap();

        assert_eq!(http.method(), Method::POST);
        assert_eq!(http.uri(), "http://localhost:8080/echo?x=1");
        assert_eq!(http.headers()["content-length"], "5");
        assert_eq!(http.body().as_bytes().as_ref(), b"hello");
    }
}
