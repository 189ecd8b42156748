use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("parse error: {source}")]
    ParseError {
        #[from]
        source: ParseError,
    },

    #[error("send error: {source}")]
    SendError {
        #[from]
        source: SendError,
    },
}

/// Everything that can go wrong while reading a message from a stream.
///
/// A parse either yields a complete message or exactly one of these; the
/// stream position after an error is unspecified and the stream should be
/// closed.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed start line: {reason}")]
    MalformedStartLine { reason: String },

    #[error("malformed header line: {reason}")]
    MalformedHeaderLine { reason: String },

    #[error("malformed content-length header: {reason}")]
    MalformedContentLength { reason: String },

    #[error("malformed chunked body: {reason}")]
    MalformedChunkedBody { reason: String },

    #[error("unexpected end of stream while reading {element}")]
    UnexpectedEndOfStream { element: &'static str },

    #[error("request target has no host and no Host header was sent")]
    MissingTargetHost,

    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("body stream was already consumed")]
    BodyAlreadyConsumed,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_start_line<S: ToString>(str: S) -> Self {
        Self::MalformedStartLine { reason: str.to_string() }
    }

    pub fn malformed_header_line<S: ToString>(str: S) -> Self {
        Self::MalformedHeaderLine { reason: str.to_string() }
    }

    pub fn malformed_content_length<S: ToString>(str: S) -> Self {
        Self::MalformedContentLength { reason: str.to_string() }
    }

    pub fn malformed_chunked_body<S: ToString>(str: S) -> Self {
        Self::MalformedChunkedBody { reason: str.to_string() }
    }

    pub fn unexpected_eof(element: &'static str) -> Self {
        Self::UnexpectedEndOfStream { element }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("invalid body: {reason}")]
    InvalidBody { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn invalid_body<S: ToString>(str: S) -> Self {
        Self::InvalidBody { reason: str.to_string() }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

/// Reading a lazy body while streaming it out is a read failure surfacing on
/// the write path.
impl From<ParseError> for SendError {
    fn from(e: ParseError) -> Self {
        match e {
            ParseError::Io { source } => Self::Io { source },
            e => Self::invalid_body(e),
        }
    }
}
