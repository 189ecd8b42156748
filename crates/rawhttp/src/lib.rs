//! Parse and write raw HTTP/1.x messages straight from a byte stream.
//!
//! Unlike a regular HTTP library, this crate does not try to "fix" the
//! messages it reads. Header names keep their casing and order, repeated
//! fields stay separate, and a message written back comes out as close to
//! what was received as the protocol allows. This makes it suitable for
//! proxies, test tools and anything else that needs to see HTTP as it was
//! actually sent.
//!
//! # Example
//!
//! ```
//! use micro_rawhttp::RawHttp;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), micro_rawhttp::protocol::ParseError> {
//! let http = RawHttp::new();
//!
//! let request = http.parse_request_bytes("GET /hello HTTP/1.1\r\nHost: www.example.com\r\n\r\n").await?;
//! assert_eq!(request.uri(), "http://www.example.com/hello");
//!
//! let response = http
//!     .parse_response_bytes("HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 5\r\n\r\nhello")
//!     .await?;
//! assert_eq!(response.body().as_eager().unwrap().as_bytes().as_ref(), b"hello");
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: message types, the header container, bodies and errors
//! - [`codec`]: the message parser, body framing, payload decoders and
//!   encoders
//! - [`connection`]: writing messages to a stream and a small client
//!
//! # Bodies
//!
//! A parsed message holds its body lazily: nothing past the head is read
//! until the body is asked for, and the body never reads past its own end.
//! Several messages can therefore be parsed off the same stream one after
//! the other, as long as each body is read or
//! [discarded](protocol::LazyBody::discard) before the next parse.
//!
//! # Limitations
//!
//! - HTTP/1.0 and HTTP/1.1 only
//! - No TLS; wrap the stream yourself
//! - Default head limits: 8KB and 64 header fields

pub mod codec;
pub mod connection;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;

pub use codec::{ParserOptions, RawHttp, ResponseContext};
pub use connection::{MessageWriter, RawHttpClient};
pub use protocol::{
    Body, EagerBody, HeaderContainer, HttpVersion, LazyBody, RawRequest, RawResponse, RequestLine, StatusLine,
};
