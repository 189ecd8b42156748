//! Sending raw requests over a connection.

use std::io;

use tokio::io::{AsyncBufRead, AsyncRead, AsyncWrite, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::debug;

use crate::codec::{RawHttp, ResponseContext};
use crate::connection::MessageWriter;
use crate::protocol::{HttpError, RawRequest, RawResponse, SendError};

/// A client speaking raw HTTP/1.x over one connection.
///
/// The response returned by [`send`](Self::send) borrows the client while
/// its body is still on the connection. Read or discard the body (or make
/// the response [eager](RawResponse::eagerly)) before sending the next
/// request.
#[derive(Debug)]
pub struct RawHttpClient<R, W> {
    reader: BufReader<R>,
    writer: MessageWriter<W>,
    http: RawHttp,
}

impl RawHttpClient<OwnedReadHalf, OwnedWriteHalf> {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::from_tcp(stream))
    }

    pub fn from_tcp(stream: TcpStream) -> Self {
        let (reader, writer) = stream.into_split();
        Self::new(reader, writer)
    }
}

impl<R, W> RawHttpClient<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader: BufReader::new(reader), writer: MessageWriter::new(writer), http: RawHttp::new() }
    }

    /// Uses `http` to parse responses.
    pub fn with_parser(self, http: RawHttp) -> Self {
        Self { http, ..self }
    }

    /// Writes `request` and reads the response to it.
    ///
    /// Interim `1xx` responses are skipped. A response to `HEAD` or
    /// `CONNECT` has no body whatever its headers say.
    pub async fn send<S>(&mut self, mut request: RawRequest<S>) -> Result<RawResponse<&mut BufReader<R>>, HttpError>
    where
        S: AsyncBufRead + Unpin,
    {
        let ctx = ResponseContext::for_request(request.method()).skip_informational();

        debug!(method = %request.method(), uri = %request.uri(), "send request");
        self.writer.write_request(&mut request).await?;

        let response = self.http.parse_response_with(&mut self.reader, ctx).await?;
        debug!(status = %response.status(), "received response");
        Ok(response)
    }

    /// Shuts down the write side; the peer sees the end of the stream.
    pub async fn close(&mut self) -> Result<(), SendError> {
        self.writer.shutdown().await
    }

    pub fn into_inner(self) -> (BufReader<R>, W) {
        (self.reader, self.writer.into_inner())
    }
}
