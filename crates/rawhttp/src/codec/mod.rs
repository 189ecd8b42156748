//! Codecs for raw HTTP/1.x messages.
//!
//! # Architecture
//!
//! - Reading:
//!   - [`RawHttp`]: reads heads line by line and picks the body framing
//!   - [`HeaderDecoder`]: header fields, one line at a time
//!   - [`PayloadDecoder`]: body bytes with framing removed, driven by
//!     [`LazyBody`](crate::protocol::LazyBody)
//!
//! - Writing:
//!   - [`HeaderEncoder`]: start line and header fields
//!   - [`PayloadEncoder`]: body bytes with their framing
//!
//! [`ParserOptions`] and [`ResponseContext`] tune how messages are read.

mod body;
mod framing;
mod header;
mod line_reader;
mod message_encoder;
mod message_parser;
mod options;
mod start_line;

pub use body::{PayloadDecoder, PayloadEncoder};
pub use header::{HeaderDecoder, HeaderEncoder, MAX_HEADER_BYTES, MAX_HEADER_NUM};
pub use message_parser::RawHttp;
pub use options::{ParserOptions, ResponseContext};

pub(crate) use message_encoder::{encode_eager_body, message_to_bytes};
