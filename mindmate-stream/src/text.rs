//! Byte-to-text adapter for HTTP response bodies.

use std::char::REPLACEMENT_CHARACTER;

use futures::{Stream, StreamExt};

/// Incremental UTF-8 decoder.
///
/// Network chunks can end in the middle of a multi-byte character; those
/// trailing bytes are held back until the next chunk completes them. Invalid
/// sequences are replaced with U+FFFD rather than reported.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    carry: Vec<u8>,
}

impl Utf8Decoder {
    /// Create a decoder with nothing carried over.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk, returning all text that is complete so far.
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let mut pending = std::mem::take(&mut self.carry);
        pending.extend_from_slice(bytes);

        let mut out = String::with_capacity(pending.len());
        let mut rest: &[u8] = &pending;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        // Incomplete sequence at the end: wait for more bytes.
                        None => {
                            self.carry = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Finish decoding. A dangling incomplete sequence becomes one U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.carry.is_empty() {
            String::new()
        } else {
            self.carry.clear();
            REPLACEMENT_CHARACTER.to_string()
        }
    }
}

/// Map a byte stream (such as `reqwest::Response::bytes_stream`) into a
/// stream of text chunks suitable for [`decode`](crate::decode) or
/// [`deltas`](crate::deltas).
///
/// Source errors pass through unchanged and end the stream.
pub fn text_chunks<S, B, E>(byte_stream: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    async_stream::stream! {
        let mut utf8 = Utf8Decoder::new();
        let mut byte_stream = std::pin::pin!(byte_stream);

        while let Some(chunk_result) = byte_stream.next().await {
            match chunk_result {
                Ok(bytes) => {
                    let text = utf8.decode(bytes.as_ref());
                    if !text.is_empty() {
                        yield Ok(text);
                    }
                }
                Err(e) => {
                    yield Err(e);
                    return;
                }
            }
        }

        let tail = utf8.finish();
        if !tail.is_empty() {
            yield Ok(tail);
        }
    }
}
