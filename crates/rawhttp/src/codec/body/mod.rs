//! Body framing codecs.
//!
//! Streaming `tokio_util` decoders and encoders, one per [`BodyFraming`]:
//!
//! - [`PayloadDecoder`] strips chunked framing or counts down a
//!   content-length, leaving bytes after the body in the buffer
//! - [`PayloadEncoder`] adds the framing back when a message is written
//!
//! [`BodyFraming`]: crate::protocol::BodyFraming

mod chunked_decoder;
mod chunked_encoder;
mod length_decoder;
mod length_encoder;
mod payload_decoder;
mod payload_encoder;

pub use payload_decoder::PayloadDecoder;
pub use payload_encoder::PayloadEncoder;
