//! Decoder for bodies framed by `Content-Length`,
//! [RFC 9112 Section 6.3](https://www.rfc-editor.org/rfc/rfc9112#section-6.3).

use std::cmp;

use crate::protocol::{ParseError, PayloadItem};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// A decoder for handling HTTP messages with a known content length.
///
/// The decoder tracks the remaining bytes to be read and ensures the total
/// payload matches the specified content length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// The number of bytes remaining to be read from the payload
    length: u64,
}

impl LengthDecoder {
    /// Creates a new LengthDecoder instance.
    ///
    /// # Arguments
    /// * `length` - The total content length to decode, specified by Content-Length header
    pub fn new(length: u64) -> Self {
        Self { length }
    }

    /// Bytes still expected on the stream.
    pub fn remaining(&self) -> u64 {
        self.length
    }
}

/// Implementation of the Decoder trait for content-length based decoding.
///
/// This implementation tracks the remaining bytes to read and ensures the total
/// payload matches the specified content length.
impl Decoder for LengthDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    /// Decodes bytes from the input buffer according to the content length.
    ///
    /// # Arguments
    /// * `src` - Source buffer containing the payload data
    ///
    /// # Returns
    /// * `Ok(Some(PayloadItem::Eof))` when all bytes have been read
    /// * `Ok(Some(PayloadItem::Chunk(bytes)))` when a chunk is successfully decoded
    /// * `Ok(None)` when more data is needed
    /// * `Err(ParseError)` if decoding fails
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.length == 0 {
            return Ok(Some(PayloadItem::Eof));
        }

        if src.is_empty() {
            return Ok(None);
        }

        // Read the minimum of remaining length and available bytes
        let len = cmp::min(self.length, src.len() as u64);
        let bytes = src.split_to(len as usize).freeze();

        self.length -= bytes.len() as u64;
        Ok(Some(PayloadItem::Chunk(bytes)))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(item) => Ok(Some(item)),
            None => Err(ParseError::unexpected_eof("body")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let mut buffer: BytesMut = BytesMut::from(&b"101234567890abcdef\r\n\r\n"[..]);

        let mut length_decoder = LengthDecoder::new(10);
        let item = length_decoder.decode(&mut buffer);

        let payload = item.unwrap().unwrap();
        assert!(payload.is_chunk());

        let bytes = payload.as_bytes().unwrap();

        assert_eq!(bytes.len(), 10);

        assert_eq!(&bytes[..], b"1012345678");
        assert_eq!(&buffer[..], b"90abcdef\r\n\r\n");

        assert!(length_decoder.decode(&mut buffer).unwrap().unwrap().is_eof());
        assert_eq!(buffer.len(), 12);
    }

    #[test]
    fn test_split_input() {
        let mut length_decoder = LengthDecoder::new(8);

        let mut buffer = BytesMut::from(&b"abc"[..]);
        let first = length_decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(&first.as_bytes().unwrap()[..], b"abc");
        assert_eq!(length_decoder.remaining(), 5);
        assert!(length_decoder.decode(&mut buffer).unwrap().is_none());

        buffer.extend_from_slice(b"defgh");
        let second = length_decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(&second.as_bytes().unwrap()[..], b"defgh");
        assert!(length_decoder.decode(&mut buffer).unwrap().unwrap().is_eof());
    }

    #[test]
    fn test_truncated_at_eof() {
        let mut length_decoder = LengthDecoder::new(5);
        let mut buffer = BytesMut::from(&b"ab"[..]);

        assert!(length_decoder.decode_eof(&mut buffer).unwrap().unwrap().is_chunk());

        let result = length_decoder.decode_eof(&mut buffer);
        assert!(matches!(result, Err(ParseError::UnexpectedEndOfStream { element: "body" })));
    }

    #[test]
    fn test_zero_length() {
        let mut length_decoder = LengthDecoder::new(0);
        let mut buffer = BytesMut::from(&b"rest"[..]);

        assert!(length_decoder.decode_eof(&mut buffer).unwrap().unwrap().is_eof());
        assert_eq!(&buffer[..], b"rest");
    }
}
