use std::borrow::Cow;
use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use encoding_rs::Encoding;
use http_body::{Body, Frame, SizeHint};

use crate::protocol::BodyFraming;

/// A body held entirely in memory, framing already removed.
///
/// Remembers how it was framed on the wire so the message can be written
/// back the same way. Text is only decoded on request, with an encoding the
/// caller picks; `Content-Type` is never consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EagerBody {
    bytes: Bytes,
    framing: BodyFraming,
}

impl EagerBody {
    /// A body framed by its exact length.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let framing = BodyFraming::ContentLength(bytes.len() as u64);
        Self { bytes, framing }
    }

    pub fn with_framing(bytes: impl Into<Bytes>, framing: BodyFraming) -> Self {
        Self { bytes: bytes.into(), framing }
    }

    pub fn as_bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn framing(&self) -> BodyFraming {
        self.framing
    }

    /// Decodes the bytes as text. Malformed sequences become U+FFFD and a
    /// byte order mark is kept as content.
    pub fn decode(&self, encoding: &'static Encoding) -> Cow<'_, str> {
        encoding.decode_without_bom_handling(&self.bytes).0
    }

    /// Like [`decode`](Self::decode) with a WHATWG encoding label such as
    /// `"utf-8"` or `"latin1"`. `None` for an unknown label.
    pub fn decode_with_label(&self, label: &str) -> Option<Cow<'_, str>> {
        Encoding::for_label(label.as_bytes()).map(|encoding| self.decode(encoding))
    }
}

/// Yields the whole payload as a single data frame.
impl Body for EagerBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        if this.bytes.is_empty() {
            return Poll::Ready(None);
        }
        Poll::Ready(Some(Ok(Frame::data(std::mem::take(&mut this.bytes)))))
    }

    fn is_end_stream(&self) -> bool {
        self.bytes.is_empty()
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.bytes.len() as u64)
    }
}
