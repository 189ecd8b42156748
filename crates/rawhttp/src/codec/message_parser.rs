//! Reading whole messages off a stream.
//!
//! The parser reads the head line by line and never looks past the blank
//! line ending it. The body is left on the stream inside a [`LazyBody`],
//! which in turn stops exactly where the body ends.

use http::Method;
use tokio::io::AsyncBufRead;
use tracing::debug;

use crate::codec::framing::{request_framing, response_framing};
use crate::codec::header::HeaderDecoder;
use crate::codec::line_reader::{decode_text, Line, LineReader};
use crate::codec::start_line::{parse_request_line, parse_status_line};
use crate::codec::{ParserOptions, ResponseContext};
use crate::protocol::{
    Body, BodyFraming, HeaderContainer, HttpVersion, LazyBody, ParseError, RawRequest, RawResponse, RequestLine,
    UriResolver,
};

/// Parser of raw HTTP/1.x messages.
///
/// ```
/// use micro_rawhttp::RawHttp;
///
/// # #[tokio::main]
/// # async fn main() {
///
/// let mut stream: &[u8] = b"GET /hello HTTP/1.1\r\nHost: www.example.com\r\n\r\n";
/// let request = RawHttp::new().parse_request(&mut stream).await.unwrap();
///
/// assert_eq!(request.uri(), "http://www.example.com/hello");
/// assert!(request.body().is_absent());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawHttp {
    options: ParserOptions,
    resolver: UriResolver,
}

impl RawHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        let resolver = UriResolver::new(options.default_scheme().clone());
        Self { options, resolver }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Reads one request from `reader`.
    ///
    /// A body is returned lazily and holds `reader` until it is read or
    /// dropped; pass `&mut reader` to keep using the stream afterwards.
    pub async fn parse_request<R>(&self, mut reader: R) -> Result<RawRequest<R>, ParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        let (line, headers) = self.read_head(&mut reader).await?;
        let raw_line = parse_request_line(&line)?;

        let uri = self.resolver.resolve(&raw_line.target, &headers)?;
        let headers = match uri.host() {
            Some(host)
                if self.options.insert_host_header()
                    && raw_line.version == HttpVersion::Http11
                    && !headers.contains("Host") =>
            {
                headers.with_first("Host", host)
            }
            _ => headers,
        };

        let request_line = RequestLine::new(raw_line.method, uri, raw_line.version).with_received_target(&raw_line.target);

        let framing = request_framing(&headers)?;
        debug!(%request_line, headers = headers.len(), ?framing, "parsed request head");
        Ok(RawRequest::new(request_line, headers, lazy_body(reader, framing)))
    }

    /// Reads one response from `reader`, taking the stream to be closed
    /// after it.
    pub async fn parse_response<R>(&self, reader: R) -> Result<RawResponse<R>, ParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        self.parse_response_with(reader, ResponseContext::default()).await
    }

    /// Reads one response from `reader`, with what is known about the
    /// request it answers and the stream it came on.
    pub async fn parse_response_with<R>(&self, mut reader: R, ctx: ResponseContext) -> Result<RawResponse<R>, ParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        loop {
            let (line, headers) = self.read_head(&mut reader).await?;
            let status_line = parse_status_line(&line)?;
            let status = status_line.status();

            if ctx.is_skip_informational() && status.is_informational() && status != http::StatusCode::SWITCHING_PROTOCOLS {
                debug!(%status_line, "skip interim response");
                continue;
            }

            let framing = response_framing(status, &headers, ctx)?;
            debug!(%status_line, headers = headers.len(), ?framing, "parsed response head");
            return Ok(RawResponse::new(status_line, headers, lazy_body(reader, framing)));
        }
    }

    /// Parses a complete request held in memory.
    pub async fn parse_request_bytes(&self, bytes: impl AsRef<[u8]>) -> Result<RawRequest, ParseError> {
        let mut stream = bytes.as_ref();
        self.parse_request(&mut stream).await?.eagerly().await
    }

    /// Parses a complete response held in memory. The end of `bytes` counts
    /// as the stream closing.
    pub async fn parse_response_bytes(&self, bytes: impl AsRef<[u8]>) -> Result<RawResponse, ParseError> {
        let mut stream = bytes.as_ref();
        self.parse_response(&mut stream).await?.eagerly().await
    }

    /// Parses a complete response held in memory as the answer to a request
    /// with `method`.
    pub async fn parse_response_bytes_for(&self, bytes: impl AsRef<[u8]>, method: &Method) -> Result<RawResponse, ParseError> {
        let mut stream = bytes.as_ref();
        self.parse_response_with(&mut stream, ResponseContext::for_request(method)).await?.eagerly().await
    }

    /// Reads the start line and header fields, consuming the blank line
    /// after them.
    ///
    /// The end of the stream right after the start line or a header line
    /// also ends the head.
    async fn read_head<R>(&self, reader: &mut R) -> Result<(String, HeaderContainer), ParseError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = LineReader::new(self.options.max_header_bytes());

        let (start_line, mut ended) = loop {
            match lines.read_line(reader).await? {
                Line::Eof => return Err(ParseError::unexpected_eof("start line")),
                Line::Terminated(line) if line.is_empty() && self.options.skip_leading_empty_lines() => {}
                Line::Terminated(line) => break (decode_text(line), false),
                Line::Unterminated(line) => break (decode_text(line), true),
            }
        };

        let mut decoder = HeaderDecoder::new(self.options.max_headers());
        while !ended {
            match lines.read_line(reader).await? {
                Line::Terminated(line) if line.is_empty() => break,
                Line::Terminated(line) => decoder.decode_line(&decode_text(line))?,
                Line::Unterminated(line) => {
                    decoder.decode_line(&decode_text(line))?;
                    ended = true;
                }
                Line::Eof => ended = true,
            }
        }

        Ok((start_line, decoder.finish()))
    }
}

fn lazy_body<R>(reader: R, framing: Option<BodyFraming>) -> Body<R> {
    match framing {
        Some(framing) => Body::Lazy(LazyBody::new(reader, framing)),
        None => Body::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, StatusCode};
    use indoc::indoc;

    #[tokio::test]
    async fn from_curl() {
        let str = indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        123"##};

        let mut stream = str.as_bytes();
        let request = RawHttp::new().parse_request(&mut stream).await.unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.version(), HttpVersion::Http11);
        assert_eq!(request.uri(), "http://127.0.0.1:8080/index.html");
        assert_eq!(request.headers().len(), 3);
        assert_eq!(request.headers().get("user-agent"), vec!["curl/7.79.1"]);
        assert!(request.body().is_absent());

        drop(request);
        assert_eq!(stream, b"123");
    }

    #[tokio::test]
    async fn from_edge() {
        let str = indoc! {r##"
        GET /index/?a=1&b=2&a=3 HTTP/1.1
        Host: 127.0.0.1:8080
        Connection: keep-alive
        Cache-Control: max-age=0
        sec-ch-ua: "#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109"
        sec-ch-ua-mobile: ?0
        sec-ch-ua-platform: "macOS"
        Upgrade-Insecure-Requests: 1
        User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36 Edg/109.0.1518.52
        Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9
        Sec-Fetch-Site: none
        Sec-Fetch-Mode: navigate
        Sec-Fetch-User: ?1
        Sec-Fetch-Dest: document
        Accept-Encoding: gzip, deflate, br
        Accept-Language: zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7

        "##};

        let request = RawHttp::new().parse_request_bytes(str).await.unwrap();

        assert_eq!(request.uri().path(), "/index/");
        assert_eq!(request.uri().query(), Some("a=1&b=2&a=3"));
        assert_eq!(request.headers().len(), 15);
        assert_eq!(
            request.headers().first("SEC-CH-UA"),
            Some(r##""#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109""##)
        );
        assert_eq!(request.headers().first("accept-language"), Some("zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7"));
    }

    #[tokio::test]
    async fn host_is_inserted_for_http_11_only() {
        let request = RawHttp::new().parse_request_bytes("GET http://a.com:81/x HTTP/1.1\r\nAccept: */*\r\n\r\n").await.unwrap();
        assert_eq!(request.headers().names(), vec!["Host", "Accept"]);
        assert_eq!(request.headers().first("Host"), Some("a.com"));

        let request = RawHttp::new().parse_request_bytes("GET http://a.com/x HTTP/1.0\r\n\r\n").await.unwrap();
        assert!(request.headers().is_empty());

        let options = ParserOptions::default().with_insert_host_header(false);
        let request = RawHttp::with_options(options).parse_request_bytes("GET http://a.com/x\r\n\r\n").await.unwrap();
        assert!(request.headers().is_empty());
    }

    #[tokio::test]
    async fn default_scheme_is_configurable() {
        let options = ParserOptions::default().with_default_scheme(http::uri::Scheme::HTTPS);
        let request = RawHttp::with_options(options).parse_request_bytes("GET /\r\nHost: a.com\r\n\r\n").await.unwrap();

        assert_eq!(request.uri(), "https://a.com/");
    }

    #[tokio::test]
    async fn leading_empty_lines() {
        let raw = "\r\n\r\nGET / HTTP/1.1\r\nHost: a\r\n\r\n";

        assert!(RawHttp::new().parse_request_bytes(raw).await.is_ok());

        let options = ParserOptions::default().with_skip_leading_empty_lines(false);
        let result = RawHttp::with_options(options).parse_request_bytes(raw).await;
        assert!(matches!(result, Err(ParseError::MalformedStartLine { .. })));
    }

    #[tokio::test]
    async fn head_limits() {
        let options = ParserOptions::default().with_max_header_bytes(32);
        let result = RawHttp::with_options(options).parse_request_bytes("GET / HTTP/1.1\r\nHost: a.very.long.host.name\r\n\r\n").await;
        assert!(matches!(result, Err(ParseError::TooLargeHeader { max_size: 32, .. })));

        let options = ParserOptions::default().with_max_headers(1);
        let result = RawHttp::with_options(options).parse_request_bytes("GET / HTTP/1.1\r\nHost: a\r\nAccept: */*\r\n\r\n").await;
        assert!(matches!(result, Err(ParseError::TooManyHeaders { max_num: 1 })));
    }

    #[tokio::test]
    async fn empty_stream() {
        let result = RawHttp::new().parse_request_bytes("").await;
        assert!(matches!(result, Err(ParseError::UnexpectedEndOfStream { element: "start line" })));

        let result = RawHttp::new().parse_response_bytes("\r\n").await;
        assert!(matches!(result, Err(ParseError::UnexpectedEndOfStream { .. })));
    }

    #[tokio::test]
    async fn interim_responses_can_be_skipped() {
        let raw = "HTTP/1.1 100 Continue\r\n\r\nHTTP/1.1 103 Early Hints\r\nLink: </a.css>\r\n\r\nHTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok";

        let mut stream = raw.as_bytes();
        let ctx = ResponseContext::default().skip_informational();
        let response = RawHttp::new().parse_response_with(&mut stream, ctx).await.unwrap().eagerly().await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().as_eager().unwrap().as_bytes().as_ref(), b"ok");

        let response = RawHttp::new().parse_response_bytes(raw).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONTINUE);
        assert!(response.body().is_absent());
    }

    #[tokio::test]
    async fn response_to_head_has_no_body() {
        let raw = "HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\n";

        let response = RawHttp::new().parse_response_bytes_for(raw, &Method::HEAD).await.unwrap();
        assert!(response.body().is_absent());
        assert_eq!(response.headers().first("content-length"), Some("10"));
    }
}
