//! Header section codecs.
//!
//! - [`HeaderDecoder`]: turns head lines into a [`HeaderContainer`]
//! - [`HeaderEncoder`]: writes a start line and its fields back out
//!
//! [`HeaderContainer`]: crate::protocol::HeaderContainer

mod header_decoder;
mod header_encoder;

pub use header_decoder::{HeaderDecoder, MAX_HEADER_BYTES, MAX_HEADER_NUM};
pub use header_encoder::HeaderEncoder;
