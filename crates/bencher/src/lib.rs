//! Sample messages shared by the benchmarks.

/// A named raw message.
#[derive(Debug, Copy, Clone)]
pub struct Sample {
    name: &'static str,
    content: &'static str,
}

impl Sample {
    pub const fn new(name: &'static str, content: &'static str) -> Self {
        Self { name, content }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

pub static SMALL_REQUEST: Sample = Sample::new("small_request", "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");

pub static LARGE_REQUEST: Sample = Sample::new(
    "large_request",
    concat!(
        "GET /wp-content/uploads/2010/03/hello-kitty-darth-vader-pink.jpg HTTP/1.1\r\n",
        "Host: www.kittyhell.com\r\n",
        "User-Agent: Mozilla/5.0 (Macintosh; U; Intel Mac OS X 10.6; ja-JP-mac; rv:1.9.2.3) Gecko/20100401 Firefox/3.6.3 Pathtraq/0.9\r\n",
        "Accept: text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8\r\n",
        "Accept-Language: ja,en-us;q=0.7,en;q=0.3\r\n",
        "Accept-Encoding: gzip,deflate\r\n",
        "Accept-Charset: Shift_JIS,utf-8;q=0.7,*;q=0.7\r\n",
        "Keep-Alive: 115\r\n",
        "Connection: keep-alive\r\n",
        "Cookie: wp_ozh_wsa_visits=2; wp_ozh_wsa_visit_lasttime=xxxxxxxxxx; __utma=xxxxxxxxx.xxxxxxxxxx.xxxxxxxxxx.xxxxxxxxxx.xxxxxxxxxx.x; __utmz=xxxxxxxxx.xxxxxxxxxx.x.x.utmccn=(referral)|utmcsr=reader.livedoor.com|utmcct=/reader/|utmcmd=referral\r\n",
        "\r\n",
    ),
);

pub static CHUNKED_RESPONSE: Sample = Sample::new(
    "chunked_response",
    concat!(
        "HTTP/1.1 200 OK\r\n",
        "Content-Type: text/plain\r\n",
        "Transfer-Encoding: chunked\r\n",
        "\r\n",
        "4\r\nWiki\r\n",
        "6\r\npedia \r\n",
        "E\r\nin \r\n\r\nchunks.\r\n",
        "0\r\n",
        "\r\n",
    ),
);
