use bytes::{Bytes, BytesMut};
use futures::{stream, Stream};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::codec::Decoder;
use tracing::{info, trace};

use crate::codec::PayloadDecoder;
use crate::ensure;
use crate::protocol::body::{Detached, EagerBody};
use crate::protocol::{BodyFraming, ParseError, PayloadItem};

/// Most bytes handed to the decoder per read, however much the stream has
/// buffered.
const READ_WINDOW: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    Unread,
    Reading,
    Done,
}

/// A body still on the stream it arrived on.
///
/// Reads stop exactly at the end of the body: whatever follows on the stream
/// stays there for the next reader. The body is single use; once it has
/// been read, it can't be read again.
#[derive(Debug)]
pub struct LazyBody<S> {
    stream: S,
    decoder: PayloadDecoder,
    framing: BodyFraming,
    state: ReadState,
}

impl<S> LazyBody<S> {
    pub(crate) fn new(stream: S, framing: BodyFraming) -> Self {
        Self { stream, decoder: PayloadDecoder::from(framing), framing, state: ReadState::Unread }
    }

    pub fn framing(&self) -> BodyFraming {
        self.framing
    }

    /// True once every byte of the body was taken off the stream.
    pub fn is_consumed(&self) -> bool {
        self.state == ReadState::Done
    }
}

impl LazyBody<Detached> {
    /// A detached lazy body can't exist.
    pub(crate) fn unreachable(&self) -> ! {
        match self.stream {}
    }
}

impl<S> LazyBody<S>
where
    S: AsyncBufRead + Unpin,
{
    /// Next piece of the payload with framing removed, `None` after the last.
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>, ParseError> {
        if self.state == ReadState::Done {
            return Ok(None);
        }
        self.state = ReadState::Reading;

        loop {
            // a finished body must not wait on the stream for bytes that belong to the next message
            if self.decoder.is_finished() {
                self.state = ReadState::Done;
                return Ok(None);
            }

            let buffered = self.stream.fill_buf().await?;
            let available = buffered.len().min(READ_WINDOW);
            let mut buf = BytesMut::from(&buffered[..available]);

            let item = if available == 0 { self.decoder.decode_eof(&mut buf)? } else { self.decoder.decode(&mut buf)? };
            self.stream.consume(available - buf.len());

            match item {
                Some(PayloadItem::Chunk(bytes)) => {
                    trace!(len = bytes.len(), "read body chunk");
                    return Ok(Some(bytes));
                }
                Some(PayloadItem::Eof) => {
                    self.state = ReadState::Done;
                    return Ok(None);
                }
                // the decoder kept what it read as state, ask for more
                None => {}
            }
        }
    }

    /// Reads the whole payload.
    ///
    /// # Errors
    ///
    /// [`ParseError::BodyAlreadyConsumed`] when any of the body was read
    /// before.
    pub async fn read_all(&mut self) -> Result<Bytes, ParseError> {
        ensure!(self.state == ReadState::Unread, ParseError::BodyAlreadyConsumed);

        let mut payload = BytesMut::new();
        if let Some(length) = self.framing.content_length() {
            payload.reserve(usize::try_from(length).unwrap_or(usize::MAX).min(64 * 1024));
        }
        while let Some(chunk) = self.next_chunk().await? {
            payload.extend_from_slice(&chunk);
        }
        Ok(payload.freeze())
    }

    /// Reads the whole payload into memory, keeping its framing.
    pub async fn into_eager(mut self) -> Result<EagerBody, ParseError> {
        let bytes = self.read_all().await?;
        Ok(EagerBody::with_framing(bytes, self.framing))
    }

    /// Reads and drops whatever is left of the body, so the stream is
    /// positioned at the next message. Returns the number of payload bytes
    /// skipped.
    pub async fn discard(&mut self) -> Result<u64, ParseError> {
        let mut size: u64 = 0;
        while let Some(chunk) = self.next_chunk().await? {
            size += chunk.len() as u64;
        }
        if size > 0 {
            info!(size, "skip unread body");
        }
        Ok(size)
    }

    /// The remaining payload as a stream of chunks.
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes, ParseError>> {
        stream::try_unfold(self, |mut body| async move {
            let chunk = body.next_chunk().await?;
            Ok::<_, ParseError>(chunk.map(|chunk| (chunk, body)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    #[tokio::test]
    async fn stops_at_the_content_length() {
        let mut stream: &[u8] = b"0123456789NEXT";

        let mut body = LazyBody::new(&mut stream, BodyFraming::ContentLength(10));
        assert_eq!(&body.read_all().await.unwrap()[..], b"0123456789");
        assert!(body.is_consumed());

        assert_eq!(stream, b"NEXT");
    }

    #[tokio::test]
    async fn does_not_wait_past_the_end() {
        let (client, mut server) = tokio::io::duplex(64);
        tokio::io::AsyncWriteExt::write_all(&mut server, b"abc").await.unwrap();

        // the peer keeps the stream open, so another read would never return
        let mut reader = tokio::io::BufReader::new(client);
        let mut body = LazyBody::new(&mut reader, BodyFraming::ContentLength(3));
        assert_eq!(&body.read_all().await.unwrap()[..], b"abc");
        assert_eq!(body.next_chunk().await.unwrap(), None);
        drop(server);
    }

    #[tokio::test]
    async fn large_buffer_is_read_in_windows() {
        let mut data = vec![b'x'; 3 * READ_WINDOW + 10];
        data.extend_from_slice(b"NEXT");
        let mut stream = &data[..];

        let mut body = LazyBody::new(&mut stream, BodyFraming::ContentLength(3 * READ_WINDOW as u64 + 10));
        let mut total = 0;
        while let Some(chunk) = body.next_chunk().await.unwrap() {
            assert!(chunk.len() <= READ_WINDOW);
            total += chunk.len();
        }

        assert_eq!(total, 3 * READ_WINDOW + 10);
        assert_eq!(stream, b"NEXT");
    }

    #[tokio::test]
    async fn many_small_chunks_in_one_buffer() {
        let mut data = Vec::new();
        for _ in 0..2000 {
            data.extend_from_slice(b"5\r\nhello\r\n");
        }
        data.extend_from_slice(b"0\r\n\r\nNEXT");
        let mut stream = &data[..];

        let mut body = LazyBody::new(&mut stream, BodyFraming::Chunked);
        let payload = body.read_all().await.unwrap();

        assert_eq!(payload.len(), 2000 * 5);
        assert!(payload.chunks(5).all(|chunk| chunk == b"hello"));
        assert_eq!(stream, b"NEXT");
    }

    #[tokio::test]
    async fn second_read_fails() {
        let mut stream: &[u8] = b"4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n";

        let mut body = LazyBody::new(&mut stream, BodyFraming::Chunked);
        assert_eq!(&body.read_all().await.unwrap()[..], b"Wikipedia");
        assert!(matches!(body.read_all().await, Err(ParseError::BodyAlreadyConsumed)));
        assert_eq!(body.next_chunk().await.unwrap(), None);
    }

    #[tokio::test]
    async fn eager_copy_reads_the_same_twice() {
        let mut stream: &[u8] = b"hello world";

        let eager = LazyBody::new(&mut stream, BodyFraming::UntilClose).into_eager().await.unwrap();
        assert_eq!(eager.framing(), BodyFraming::UntilClose);
        assert_eq!(eager.as_bytes(), &Bytes::from_static(b"hello world"));
        assert_eq!(eager.as_bytes(), &Bytes::from_static(b"hello world"));
    }

    #[tokio::test]
    async fn truncated_body() {
        let mut stream: &[u8] = b"short";

        let result = LazyBody::new(&mut stream, BodyFraming::ContentLength(10)).read_all().await;
        assert!(matches!(result, Err(ParseError::UnexpectedEndOfStream { element: "body" })));
    }

    #[tokio::test]
    async fn discard_skips_the_rest() {
        let mut stream: &[u8] = b"3\r\nabc\r\n3\r\ndef\r\n0\r\n\r\nNEXT";

        let mut body = LazyBody::new(&mut stream, BodyFraming::Chunked);
        assert_eq!(&body.next_chunk().await.unwrap().unwrap()[..], b"abc");
        assert_eq!(body.discard().await.unwrap(), 3);
        assert_eq!(stream, b"NEXT");
    }

    #[tokio::test]
    async fn as_stream() {
        let stream: &[u8] = b"2\r\nab\r\n1\r\nc\r\n0\r\n\r\n";

        let chunks: Vec<Bytes> = LazyBody::new(stream, BodyFraming::Chunked).into_stream().try_collect().await.unwrap();
        assert_eq!(chunks, vec![Bytes::from_static(b"ab"), Bytes::from_static(b"c")]);
    }
}
