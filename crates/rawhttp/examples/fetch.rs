//! Sends a raw GET to `host:port` and prints the response as received.
//!
//! ```sh
//! cargo run --example fetch -- example.com:80 /index.html
//! ```

use std::error::Error;

use micro_rawhttp::{RawHttp, RawHttpClient};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut args = std::env::args().skip(1);
    let authority = args.next().unwrap_or_else(|| "127.0.0.1:8080".to_owned());
    let path = args.next().unwrap_or_else(|| "/".to_owned());

    let request = RawHttp::new()
        .parse_request_bytes(format!(
            "GET {path} HTTP/1.1\r\nHost: {authority}\r\nAccept: */*\r\nConnection: close\r\n\r\n"
        ))
        .await?;

    info!(%authority, "connecting");
    let mut client = RawHttpClient::connect(authority.as_str()).await?;
    let response = client.send(request).await?.eagerly().await?;

    println!("{}", response.start_line());
    for (name, value) in response.headers().iter() {
        println!("{name}: {value}");
    }
    println!();
    if let Some(body) = response.body().as_eager() {
        println!("{}", body.decode(encoding_rs::UTF_8));
    }

    client.close().await?;
    Ok(())
}
