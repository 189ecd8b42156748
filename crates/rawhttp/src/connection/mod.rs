//! Connection-level plumbing.
//!
//! - [`MessageWriter`]: buffered writing of raw messages, streaming lazy
//!   bodies straight from their source
//! - [`RawHttpClient`]: writes a request and parses the reply on one
//!   connection

mod client;
mod message_writer;

pub use client::RawHttpClient;
pub use message_writer::MessageWriter;
