//! The raw message model.
//!
//! - [`RawRequest`] and [`RawResponse`]: start line, [`HeaderContainer`]
//!   and [`Body`]
//! - [`RequestLine`] and [`StatusLine`], sharing [`StartLine`]
//! - [`Body`]: absent, in memory ([`EagerBody`]) or still on the stream
//!   ([`LazyBody`])
//! - [`UriResolver`]: absolute URIs for request targets
//! - errors: [`ParseError`] for reading, [`SendError`] for writing,
//!   [`HttpError`] for both

mod message;
pub use message::BodyFraming;
pub use message::PayloadItem;

mod header;
pub use header::HeaderContainer;

mod start_line;
pub use start_line::{HttpVersion, RequestLine, StartLine, StatusLine};

mod request;
pub use request::RawRequest;

mod response;
pub use response::RawResponse;

pub mod uri;
pub use uri::UriResolver;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;

pub mod body;
pub use body::{Body, Detached, EagerBody, LazyBody};
