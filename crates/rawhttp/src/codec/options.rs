//! Parser configuration.

use http::uri::Scheme;
use http::Method;

use crate::codec::header::{MAX_HEADER_BYTES, MAX_HEADER_NUM};

/// Settings for [`RawHttp`](crate::RawHttp).
#[derive(Debug, Clone)]
pub struct ParserOptions {
    default_scheme: Scheme,
    insert_host_header: bool,
    max_header_bytes: usize,
    max_headers: usize,
    skip_leading_empty_lines: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            default_scheme: Scheme::HTTP,
            insert_host_header: true,
            max_header_bytes: MAX_HEADER_BYTES,
            max_headers: MAX_HEADER_NUM,
            skip_leading_empty_lines: true,
        }
    }
}

impl ParserOptions {
    /// Scheme of the resolved URI when the request target has none.
    pub fn with_default_scheme(self, default_scheme: Scheme) -> Self {
        Self { default_scheme, ..self }
    }

    /// Whether an HTTP/1.1 request whose target names a host gets a `Host`
    /// header when it has none.
    pub fn with_insert_host_header(self, insert_host_header: bool) -> Self {
        Self { insert_host_header, ..self }
    }

    /// Size limit of a whole head, start line included.
    pub fn with_max_header_bytes(self, max_header_bytes: usize) -> Self {
        Self { max_header_bytes, ..self }
    }

    pub fn with_max_headers(self, max_headers: usize) -> Self {
        Self { max_headers, ..self }
    }

    /// Whether empty lines in front of a start line are skipped rather than
    /// rejected.
    pub fn with_skip_leading_empty_lines(self, skip_leading_empty_lines: bool) -> Self {
        Self { skip_leading_empty_lines, ..self }
    }

    pub fn default_scheme(&self) -> &Scheme {
        &self.default_scheme
    }

    pub fn insert_host_header(&self) -> bool {
        self.insert_host_header
    }

    pub fn max_header_bytes(&self) -> usize {
        self.max_header_bytes
    }

    pub fn max_headers(&self) -> usize {
        self.max_headers
    }

    pub fn skip_leading_empty_lines(&self) -> bool {
        self.skip_leading_empty_lines
    }
}

/// What the reader of a response knows beyond the response itself.
///
/// Whether a response has a body can depend on the request it answers, and
/// a body without length framing can only be read if the stream is going to
/// be closed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResponseContext {
    no_body: bool,
    persistent: bool,
    skip_informational: bool,
}

impl ResponseContext {
    /// Context for the response to a request with `method`: responses to
    /// `HEAD` and `CONNECT` carry no body.
    pub fn for_request(method: &Method) -> Self {
        Self { no_body: method == Method::HEAD || method == Method::CONNECT, ..Self::default() }
    }

    /// The response has no body whatever its headers say.
    pub fn no_body(self) -> Self {
        Self { no_body: true, ..self }
    }

    /// The stream stays open after the response, so a body without framing
    /// is taken as absent.
    pub fn persistent(self) -> Self {
        Self { persistent: true, ..self }
    }

    /// Interim `1xx` responses (except `101`) are read and dropped, and the
    /// final response is returned.
    pub fn skip_informational(self) -> Self {
        Self { skip_informational: true, ..self }
    }

    pub fn is_no_body(&self) -> bool {
        self.no_body
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn is_skip_informational(&self) -> bool {
        self.skip_informational
    }
}
