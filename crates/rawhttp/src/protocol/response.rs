//! Raw responses.

use bytes::Bytes;
use http::{Response, StatusCode};
use tokio::io::AsyncBufRead;

use crate::codec::message_to_bytes;
use crate::protocol::body::{Body, Detached, EagerBody};
use crate::protocol::request::{header_name, header_value};
use crate::protocol::{HeaderContainer, HttpVersion, ParseError, SendError, StartLine, StatusLine};

/// A response as it was read: status line, header fields in arrival order
/// and a body that may still be on the stream `S`.
#[derive(Debug)]
pub struct RawResponse<S = Detached> {
    line: StatusLine,
    headers: HeaderContainer,
    body: Body<S>,
}

impl<S> RawResponse<S> {
    pub fn new(line: StatusLine, headers: HeaderContainer, body: Body<S>) -> Self {
        Self { line, headers, body }
    }

    pub fn start_line(&self) -> &StatusLine {
        &self.line
    }

    pub fn status(&self) -> StatusCode {
        self.line.status()
    }

    pub fn reason(&self) -> &str {
        self.line.reason()
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

    pub(crate) fn parts_mut(&mut self) -> (&StatusLine, &HeaderContainer, &mut Body<S>) {
        (&self.line, &self.headers, &mut self.body)
    }

    pub fn into_parts(self) -> (StatusLine, HeaderContainer, Body<S>) {
        (self.line, self.headers, self.body)
    }

    pub fn with_headers(self, headers: HeaderContainer) -> Self {
        Self { headers, ..self }
    }

    /// Replaces the body, updating `Content-Length` and `Transfer-Encoding`
    /// to its framing.
    pub fn with_body<T>(self, body: Body<T>) -> RawResponse<T> {
        let headers = self.headers.with_framing(body.framing());
        RawResponse { line: self.line, headers, body }
    }
}

impl<S> RawResponse<S>
where
    S: AsyncBufRead + Unpin,
{
    /// Reads the body into memory so the response no longer needs the stream.
    pub async fn eagerly(self) -> Result<RawResponse, ParseError> {
        Ok(RawResponse { line: self.line, headers: self.headers, body: self.body.eagerly().await? })
    }
}

impl RawResponse {
    /// The response in wire format.
    pub fn to_bytes(&self) -> Result<Bytes, SendError> {
        message_to_bytes(&self.line, &self.headers, &self.body)
    }

    /// Converts into an [`http::Response`]. An absent body becomes an empty
    /// one and the reason phrase is dropped.
    pub fn into_http(self) -> Result<Response<EagerBody>, ParseError> {
        let mut builder = Response::builder().status(self.line.status()).version(self.line.version().into());

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

impl Clone for RawResponse {
    fn clone(&self) -> Self {
        Self { line: self.line.clone(), headers: self.headers.clone(), body: self.body.clone() }
    }
}

impl PartialEq for RawResponse {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line && self.headers == other.headers && self.body == other.body
    }
}
