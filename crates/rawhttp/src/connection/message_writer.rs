use crate::codec::{encode_eager_body, HeaderEncoder, PayloadEncoder};
use crate::protocol::{Body, HeaderContainer, PayloadItem, RawRequest, RawResponse, SendError, StartLine};
use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Encoder;
use tracing::{debug, trace};

const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// Writes messages to a byte stream.
///
/// Heads and in-memory bodies are buffered and written in one go; a lazy
/// body is streamed chunk by chunk as it is read from its source.
#[derive(Debug)]
pub struct MessageWriter<W> {
    writer: W,
    buffer: BytesMut,
}

impl<W> MessageWriter<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(writer: W) -> Self {
        Self::with_capacity(writer, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_capacity(writer: W, buffer_size: usize) -> Self {
        Self { writer, buffer: BytesMut::with_capacity(buffer_size) }
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Writes a request and flushes. A lazy body is consumed in the process.
    pub async fn write_request<S>(&mut self, request: &mut RawRequest<S>) -> Result<(), SendError>
    where
        S: AsyncBufRead + Unpin,
    {
        let (line, headers, body) = request.parts_mut();
        self.write_message(line, headers, body).await
    }

    /// Writes a response and flushes. A lazy body is consumed in the process.
    pub async fn write_response<S>(&mut self, response: &mut RawResponse<S>) -> Result<(), SendError>
    where
        S: AsyncBufRead + Unpin,
    {
        let (line, headers, body) = response.parts_mut();
        self.write_message(line, headers, body).await
    }

    async fn write_message<L, S>(&mut self, line: &L, headers: &HeaderContainer, body: &mut Body<S>) -> Result<(), SendError>
    where
        L: StartLine,
        S: AsyncBufRead + Unpin,
    {
        HeaderEncoder.encode((line, headers), &mut self.buffer)?;
        debug!(%line, headers = headers.len(), framing = ?body.framing(), "write message head");

        match body {
            Body::Absent => {}
            Body::Eager(body) => encode_eager_body(body, &mut self.buffer)?,
            Body::Lazy(body) => {
                let mut encoder = PayloadEncoder::from(body.framing());
                while let Some(chunk) = body.next_chunk().await? {
                    encoder.encode(PayloadItem::Chunk(chunk), &mut self.buffer)?;
                    if self.buffer.len() >= DEFAULT_BUFFER_SIZE {
                        self.write_buffer().await?;
                    }
                }
                encoder.encode(PayloadItem::<Bytes>::Eof, &mut self.buffer)?;
            }
        }

        self.flush().await
    }

    async fn write_buffer(&mut self) -> Result<(), SendError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        trace!(len = self.buffer.len(), "write buffered bytes");
        self.writer.write_all(self.buffer.as_ref()).await?;
        self.buffer.clear();
        Ok(())
    }

    #[inline]
    pub async fn flush(&mut self) -> Result<(), SendError> {
        self.write_buffer().await?;
        Ok(self.writer.flush().await?)
    }

    /// Flushes and shuts down the write side of the stream.
    pub async fn shutdown(&mut self) -> Result<(), SendError> {
        self.flush().await?;
        Ok(self.writer.shutdown().await?)
    }
}
