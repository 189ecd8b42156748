//! Message bodies.
//!
//! A parsed message starts out with a [`LazyBody`] that still sits on the
//! stream. [`Body::eagerly`] reads it into an [`EagerBody`], after which the
//! message no longer needs the stream and is typed with [`Detached`].

mod eager;
mod lazy;

pub use eager::EagerBody;
pub use lazy::LazyBody;

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncBufRead, AsyncRead, ReadBuf};

use crate::protocol::{BodyFraming, ParseError};

/// Stream type of a message that holds no stream.
///
/// Has no values, so a `Body<Detached>` can never be lazy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detached {}

impl AsyncRead for Detached {
    fn poll_read(self: Pin<&mut Self>, _cx: &mut Context<'_>, _buf: &mut ReadBuf<'_>) -> Poll<io::Result<()>> {
        match *self.get_mut() {}
    }
}

impl AsyncBufRead for Detached {
    fn poll_fill_buf(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        match *self.get_mut() {}
    }

    fn consume(self: Pin<&mut Self>, _amt: usize) {
        match *self.get_mut() {}
    }
}

/// The body of a message, if it has one.
#[derive(Debug)]
pub enum Body<S = Detached> {
    /// The message has no body at all (which is different from an empty one).
    Absent,
    Eager(EagerBody),
    Lazy(LazyBody<S>),
}

impl<S> Body<S> {
    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Body::Absent)
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, Body::Lazy(_))
    }

    /// How the body is delimited on the wire, `None` when there is no body.
    pub fn framing(&self) -> Option<BodyFraming> {
        match self {
            Body::Absent => None,
            Body::Eager(body) => Some(body.framing()),
            Body::Lazy(body) => Some(body.framing()),
        }
    }

    pub fn as_eager(&self) -> Option<&EagerBody> {
        match self {
            Body::Eager(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_lazy_mut(&mut self) -> Option<&mut LazyBody<S>> {
        match self {
            Body::Lazy(body) => Some(body),
            _ => None,
        }
    }
}

impl<S> Body<S>
where
    S: AsyncBufRead + Unpin,
{
    /// Reads a lazy body into memory, releasing the stream.
    pub async fn eagerly(self) -> Result<Body<Detached>, ParseError> {
        Ok(match self {
            Body::Absent => Body::Absent,
            Body::Eager(body) => Body::Eager(body),
            Body::Lazy(body) => Body::Eager(body.into_eager().await?),
        })
    }

    /// Skips a lazy body so the stream is positioned after it. Returns the
    /// number of payload bytes skipped.
    pub async fn discard(self) -> Result<u64, ParseError> {
        match self {
            Body::Lazy(mut body) => body.discard().await,
            Body::Absent | Body::Eager(_) => Ok(0),
        }
    }
}

impl Body<Detached> {
    pub fn into_eager(self) -> Option<EagerBody> {
        match self {
            Body::Absent => None,
            Body::Eager(body) => Some(body),
            Body::Lazy(body) => body.unreachable(),
        }
    }
}

impl Clone for Body<Detached> {
    fn clone(&self) -> Self {
        match self {
            Body::Absent => Body::Absent,
            Body::Eager(body) => Body::Eager(body.clone()),
            Body::Lazy(body) => body.unreachable(),
        }
    }
}

impl PartialEq for Body<Detached> {
    fn eq(&self, other: &Self) -> bool {
        self.as_eager() == other.as_eager() && self.is_absent() == other.is_absent()
    }
}

impl From<EagerBody> for Body<Detached> {
    fn from(body: EagerBody) -> Self {
        Body::Eager(body)
    }
}
