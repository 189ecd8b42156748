//! De-framing of chunked bodies, [RFC 9112 Section 7.1](https://www.rfc-editor.org/rfc/rfc9112#section-7.1).
//!
//! Only the framing is removed: chunk extensions are skipped, and trailer
//! fields after the last chunk are consumed and dropped. Trailer lines may
//! end with CRLF or a bare LF, like the lines of a head.

use crate::protocol::{ParseError, PayloadItem};
use bytes::{Buf, Bytes, BytesMut};
use std::task::Poll;
use tokio_util::codec::Decoder;
use tracing::trace;
use ChunkedState::*;

/// A decoder for handling HTTP chunked transfer encoding.
///
/// The decoder processes incoming bytes according to the chunked format:
/// - Each chunk starts with its size in hexadecimal
/// - Followed by optional extensions and CRLF
/// - Then the chunk data and CRLF
/// - A zero-sized chunk indicates the end of the message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedDecoder {
    state: ChunkedState,
    remaining_size: u64,
}

impl ChunkedDecoder {
    /// Creates a new ChunkedDecoder instance.
    ///
    /// The decoder starts by expecting the first hex digit of the first chunk size.
    pub fn new() -> Self {
        Self { state: SizeStart, remaining_size: 0 }
    }

    /// True once the terminating chunk and trailers were read.
    pub fn is_finished(&self) -> bool {
        self.state == End
    }
}

impl Default for ChunkedDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkedState {
    /// Read the first hex digit of the chunk size
    SizeStart,
    /// Read the rest of the chunk size in hex
    Size,
    /// Handle whitespace after size
    SizeLws,
    /// Skip chunk extensions
    Extension,
    /// Read LF after chunk size
    SizeLf,
    /// Read chunk data
    Body,
    /// Read CR after chunk data
    BodyCr,
    /// Read LF after chunk data
    BodyLf,
    /// Read optional trailer fields
    Trailer,
    /// Read LF after trailer
    TrailerLf,
    /// Read final CR
    EndCr,
    /// Read final LF
    EndLf,
    /// Final state after reading last chunk
    End,
}

impl Decoder for ChunkedDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    /// Decodes chunked transfer encoded data from the input buffer.
    ///
    /// # Returns
    /// - `Ok(Some(PayloadItem::Chunk(bytes)))` when a chunk is successfully decoded
    /// - `Ok(Some(PayloadItem::Eof))` when the final chunk is processed
    /// - `Ok(None)` when more data is needed
    /// - `Err(ParseError)` if the chunked encoding is invalid
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            if self.state == End {
                trace!("finished reading chunked data");
                return Ok(Some(PayloadItem::Eof));
            }

            if src.is_empty() {
                return Ok(None);
            }

            let mut buf = None;

            self.state = match self.state.step(src, &mut self.remaining_size, &mut buf) {
                Poll::Pending => return Ok(None),
                Poll::Ready(Ok(new_state)) => new_state,
                Poll::Ready(Err(e)) => return Err(e),
            };

            if let Some(bytes) = buf {
                trace!(len = bytes.len(), "read chunked bytes");
                return Ok(Some(PayloadItem::Chunk(bytes)));
            }
        }
    }

    /// The stream ended: anything but a complete terminator is truncation.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(item) => Ok(Some(item)),
            None => Err(ParseError::malformed_chunked_body(format!(
                "stream ended inside the chunked body, state: {:?}, missing chunk bytes: {}",
                self.state, self.remaining_size
            ))),
        }
    }
}

type StepResult = Poll<Result<ChunkedState, ParseError>>;

fn malformed(reason: &'static str) -> StepResult {
    Poll::Ready(Err(ParseError::malformed_chunked_body(reason)))
}

macro_rules! try_next_byte {
    ($src:ident) => {{
        if $src.len() > 0 {
            $src.get_u8()
        } else {
            return Poll::Pending;
        }
    }};
}

/// Value of a hex digit, `None` for any other byte.
fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b + 10 - b'a'),
        b'A'..=b'F' => Some(b + 10 - b'A'),
        _ => None,
    }
}

impl ChunkedState {
    /// Processes the next step in the chunked decoding state machine.
    ///
    /// Takes the current buffer of bytes and updates internal state based on the
    /// chunked transfer encoding format rules.
    ///
    /// # Arguments
    /// * `src` - Source buffer containing the chunked data
    /// * `remaining_size` - Tracks remaining bytes in current chunk
    /// * `buf` - Buffer to store decoded chunk data
    ///
    /// # Returns
    /// The next state in the decoding process or an error if invalid encoding is detected
    fn step(self, src: &mut BytesMut, remaining_size: &mut u64, buf: &mut Option<Bytes>) -> StepResult {
        match self {
            SizeStart => ChunkedState::read_size_start(src, remaining_size),
            Size => ChunkedState::read_size(src, remaining_size),
            SizeLws => ChunkedState::read_size_lws(src),
            Extension => ChunkedState::read_extension(src),
            SizeLf => ChunkedState::read_size_lf(src, *remaining_size),
            Body => ChunkedState::read_body(src, remaining_size, buf),
            BodyCr => ChunkedState::read_body_cr(src),
            BodyLf => ChunkedState::read_body_lf(src),
            Trailer => ChunkedState::read_trailer(src),
            TrailerLf => ChunkedState::read_trailer_lf(src),
            EndCr => ChunkedState::read_end_cr(src),
            EndLf => ChunkedState::read_end_lf(src),
            End => Poll::Ready(Ok(End)),
        }
    }

    /// Reads the first digit of a chunk size. A size line has at least one
    /// digit, so anything else here is malformed.
    fn read_size_start(src: &mut BytesMut, size_per_chunk: &mut u64) -> StepResult {
        match hex_value(try_next_byte!(src)) {
            Some(digit) => {
                *size_per_chunk = u64::from(digit);
                Poll::Ready(Ok(Size))
            }
            None => malformed("chunk size is not hexadecimal"),
        }
    }

    /// Reads and parses the chunk size in hexadecimal format.
    ///
    /// The size is read digit by digit until a delimiter is encountered.
    /// Supports both uppercase and lowercase hex digits.
    ///
    /// # State Transitions
    /// - On hex digit (0-9, a-f, A-F): Stay in Size state to read more digits
    /// - On whitespace (tab/space): Transition to SizeLws state
    /// - On semicolon: Transition to Extension state to handle chunk extensions
    /// - On CR: Transition to SizeLf state to finish size line
    /// - On invalid character: Return error
    fn read_size(src: &mut BytesMut, size_per_chunk: &mut u64) -> StepResult {
        match try_next_byte!(src) {
            b'\t' | b' ' => Poll::Ready(Ok(SizeLws)),
            b';' => Poll::Ready(Ok(Extension)),
            b'\r' => Poll::Ready(Ok(SizeLf)),
            b => match hex_value(b) {
                Some(digit) => match size_per_chunk.checked_mul(16).and_then(|size| size.checked_add(u64::from(digit))) {
                    Some(size) => {
                        *size_per_chunk = size;
                        Poll::Ready(Ok(Size))
                    }
                    None => malformed("chunk size overflows u64"),
                },
                None => malformed("chunk size is not hexadecimal"),
            },
        }
    }

    /// Processes linear whitespace (LWS) after the chunk size.
    ///
    /// State transitions:
    /// - On tab/space: Stay in SizeLws state to handle more whitespace
    /// - On semicolon: Move to Extension state to process chunk extensions
    /// - On CR: Move to SizeLf state to finish size line
    /// - On invalid char: Return error
    fn read_size_lws(src: &mut BytesMut) -> StepResult {
        match try_next_byte!(src) {
            // LWS can follow the chunk size, but no more digits can come
            b'\t' | b' ' => Poll::Ready(Ok(SizeLws)),
            b';' => Poll::Ready(Ok(Extension)),
            b'\r' => Poll::Ready(Ok(SizeLf)),
            _ => malformed("invalid chunk size linear white space"),
        }
    }

    /// Skips chunk extensions up to the CR ending the size line.
    fn read_extension(src: &mut BytesMut) -> StepResult {
        // extensions end at the next CRLF, a bare LF inside one is rejected
        match try_next_byte!(src) {
            b'\r' => Poll::Ready(Ok(SizeLf)),
            b'\n' => malformed("invalid chunk extension contains newline"),
            _ => Poll::Ready(Ok(Extension)),
        }
    }

    /// Validates the LF ending the size line. A zero size is the last
    /// chunk, which is followed by trailers instead of data.
    fn read_size_lf(src: &mut BytesMut, size_per_chunk: u64) -> StepResult {
        match try_next_byte!(src) {
            b'\n' if size_per_chunk == 0 => Poll::Ready(Ok(EndCr)),
            b'\n' => Poll::Ready(Ok(Body)),
            _ => malformed("invalid chunk size LF"),
        }
    }

    /// Reads the actual chunk data bytes.
    ///
    /// # State Transitions
    /// - After reading data with remaining size > 0: Stay in Body state
    /// - After reading data with remaining size = 0: Move to BodyCr state
    fn read_body(src: &mut BytesMut, size_per_chunk: &mut u64, buf: &mut Option<Bytes>) -> StepResult {
        if src.is_empty() {
            return Poll::Ready(Ok(Body));
        }

        if *size_per_chunk == 0 {
            return Poll::Ready(Ok(BodyCr));
        }

        // cap remaining bytes at the max capacity of usize
        let remaining = usize::try_from(*size_per_chunk).unwrap_or(usize::MAX);
        let read_size = std::cmp::min(remaining, src.len());

        *size_per_chunk -= read_size as u64;
        *buf = Some(src.split_to(read_size).freeze());

        if *size_per_chunk > 0 { Poll::Ready(Ok(Body)) } else { Poll::Ready(Ok(BodyCr)) }
    }

    fn read_body_cr(src: &mut BytesMut) -> StepResult {
        match try_next_byte!(src) {
            b'\r' => Poll::Ready(Ok(BodyLf)),
            _ => malformed("invalid chunk body CR"),
        }
    }

    fn read_body_lf(src: &mut BytesMut) -> StepResult {
        match try_next_byte!(src) {
            b'\n' => Poll::Ready(Ok(SizeStart)),
            _ => malformed("invalid chunk body LF"),
        }
    }

    /// Skips a trailer field up to its line end.
    fn read_trailer(src: &mut BytesMut) -> StepResult {
        match try_next_byte!(src) {
            b'\r' => Poll::Ready(Ok(TrailerLf)),
            b'\n' => Poll::Ready(Ok(EndCr)),
            _ => Poll::Ready(Ok(Trailer)),
        }
    }

    fn read_trailer_lf(src: &mut BytesMut) -> StepResult {
        match try_next_byte!(src) {
            b'\n' => Poll::Ready(Ok(EndCr)),
            _ => malformed("invalid trailer end LF"),
        }
    }

    /// Start of a line after the last chunk: either the empty line ending
    /// the body or another trailer field.
    fn read_end_cr(src: &mut BytesMut) -> StepResult {
        match try_next_byte!(src) {
            b'\r' => Poll::Ready(Ok(EndLf)),
            b'\n' => Poll::Ready(Ok(End)),
            _ => Poll::Ready(Ok(Trailer)),
        }
    }

    fn read_end_lf(src: &mut BytesMut) -> StepResult {
        match try_next_byte!(src) {
            b'\n' => Poll::Ready(Ok(End)),
            _ => malformed("invalid chunk end LF"),
        }
    }
}
