//! Entry points that drive a [`FrameDecoder`] from a chunk source.
//!
//! Every entry point owns a fresh decoder, so concurrent decodes of
//! independent streams never share state. Errors from the source are handed
//! back to the caller exactly as the source produced them.

use futures::{Stream, StreamExt};

use crate::decoder::FrameDecoder;

/// Decode an asynchronous source of text chunks, calling `on_delta` for each
/// content delta in stream order.
///
/// The source is not polled again after the `[DONE]` sentinel. When the
/// source ends without a sentinel, the remaining buffered text is flushed.
/// The first source error aborts decoding and is returned unchanged.
///
/// ```
/// # futures::executor::block_on(async {
/// let chunks = futures::stream::iter([
///     Ok::<_, std::io::Error>("data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n"),
///     Ok("data: [DONE]\n"),
/// ]);
/// let mut text = String::new();
/// mindmate_stream::decode(chunks, |delta| text.push_str(delta)).await.unwrap();
/// assert_eq!(text, "Hi");
/// # });
/// ```
pub async fn decode<S, T, E, F>(source: S, mut on_delta: F) -> Result<(), E>
where
    S: Stream<Item = Result<T, E>>,
    T: AsRef<str>,
    F: FnMut(&str),
{
    let mut decoder = FrameDecoder::new();
    let mut source = std::pin::pin!(source);

    while let Some(chunk) = source.next().await {
        let chunk = chunk?;
        for delta in decoder.feed(chunk.as_ref()) {
            on_delta(&delta);
        }
        if decoder.is_done() {
            return Ok(());
        }
    }

    for delta in decoder.finish() {
        on_delta(&delta);
    }
    Ok(())
}

/// Synchronous counterpart of [`decode`] for sources that are plain iterators.
pub fn decode_iter<I, T, E, F>(source: I, mut on_delta: F) -> Result<(), E>
where
    I: IntoIterator<Item = Result<T, E>>,
    T: AsRef<str>,
    F: FnMut(&str),
{
    let mut decoder = FrameDecoder::new();

    for chunk in source {
        let chunk = chunk?;
        for delta in decoder.feed(chunk.as_ref()) {
            on_delta(&delta);
        }
        if decoder.is_done() {
            return Ok(());
        }
    }

    for delta in decoder.finish() {
        on_delta(&delta);
    }
    Ok(())
}

/// Decode a source into a stream of content deltas.
///
/// Same contract as [`decode`], for callers that prefer to pull. A source
/// error is yielded once and ends the stream.
pub fn deltas<S, T, E>(source: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<T, E>>,
    T: AsRef<str>,
{
    async_stream::stream! {
        let mut decoder = FrameDecoder::new();
        let mut source = std::pin::pin!(source);

        while let Some(chunk_result) = source.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            for delta in decoder.feed(chunk.as_ref()) {
                yield Ok(delta);
            }
            if decoder.is_done() {
                return;
            }
        }

        for delta in decoder.finish() {
            yield Ok(delta);
        }
    }
}
