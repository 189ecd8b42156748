use bytes::BytesMut;
use criterion::{criterion_group, criterion_main, Criterion};
use micro_rawhttp::codec::PayloadDecoder;
use micro_rawhttp::protocol::PayloadItem;
use micro_rawhttp::{MessageWriter, RawHttp};
use std::hint::black_box;
use tokio::runtime::Runtime;
use tokio_util::codec::Decoder;

const REQUEST: &str = "POST /submit HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: 27\r\n\r\n{\"name\":\"rawhttp\",\"id\":42}\n";

const CHUNKED: &[u8] = b"4\r\nWiki\r\n6\r\npedia \r\nE\r\nin \r\n\r\nchunks.\r\n0\r\n\r\n";

fn bench_parse_request(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let http = RawHttp::new();

    c.bench_function("parse_request_with_body", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(http.parse_request_bytes(REQUEST).await.unwrap());
        });
    });
}

fn bench_chunked_decoder(c: &mut Criterion) {
    c.bench_function("decode_chunked_payload", |b| {
        b.iter(|| {
            let mut decoder = PayloadDecoder::chunked();
            let mut bytes = BytesMut::from(CHUNKED);
            while let Some(item) = decoder.decode(&mut bytes).unwrap() {
                if let PayloadItem::Eof = item {
                    break;
                }
                black_box(item);
            }
        });
    });
}

fn bench_write_request(c: &mut Criterion) {
    let runtime = Runtime::new().unwrap();
    let request = runtime.block_on(RawHttp::new().parse_request_bytes(REQUEST)).unwrap();

    c.bench_function("write_request", |b| {
        b.to_async(&runtime).iter(|| async {
            let mut writer = MessageWriter::new(Vec::with_capacity(256));
            let mut request = request.clone();
            writer.write_request(&mut request).await.unwrap();
            black_box(writer.into_inner());
        });
    });
}

criterion_group!(benches, bench_parse_request, bench_chunked_decoder, bench_write_request);
criterion_main!(benches);
