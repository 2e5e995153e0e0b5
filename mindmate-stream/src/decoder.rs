//! Incremental decoder from text chunks to content deltas.

use crate::frame::{Frame, content_delta};

/// Turns an open-ended sequence of text chunks into ordered content deltas.
///
/// One decoder serves one logical stream. Chunks may split lines, JSON
/// payloads, or `\r\n` pairs anywhere; the emitted deltas depend only on the
/// concatenated text, never on where the chunk boundaries fall.
///
/// ```
/// use mindmate_stream::FrameDecoder;
///
/// let mut decoder = FrameDecoder::new();
/// let mut out = decoder.feed("data: {\"choic");
/// out.extend(decoder.feed("es\":[{\"delta\":{\"content\":\"ok\"}}]}\n"));
/// out.extend(decoder.finish());
/// assert_eq!(out, vec!["ok"]);
/// ```
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Text received but not yet resolved into a complete line.
    line_buf: String,
    /// Set once `[DONE]` is seen; everything after it is ignored.
    done: bool,
}

/// Which pass a line is processed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    /// Mid-stream: unparseable payloads are pushed back to wait for more input.
    Streaming,
    /// End of stream: unparseable payloads are dropped.
    Flush,
}

/// What the caller should do after one line has been processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineOutcome {
    Continue,
    Rebuffer,
    Done,
}

impl FrameDecoder {
    /// Create a decoder with an empty line buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the `[DONE]` sentinel has been seen.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Text buffered but not yet resolved into deltas.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.line_buf
    }

    /// Feed one chunk and return the deltas it completes, in order.
    ///
    /// Complete lines are extracted until no newline remains. A data frame
    /// whose payload does not parse is left at the front of the buffer and
    /// extraction stops until the next chunk arrives.
    pub fn feed(&mut self, chunk: &str) -> Vec<String> {
        let mut deltas = Vec::new();
        if self.done {
            return deltas;
        }

        self.line_buf.push_str(chunk);

        while let Some(newline_pos) = self.line_buf.find('\n') {
            let line = &self.line_buf[..newline_pos];

            match Self::process_line(line, Pass::Streaming, &mut deltas) {
                LineOutcome::Continue => {
                    self.line_buf.drain(..=newline_pos);
                }
                // The line stays at the front of the buffer.
                LineOutcome::Rebuffer => break,
                LineOutcome::Done => {
                    self.mark_done();
                    break;
                }
            }
        }

        deltas
    }

    /// Flush whatever is left once the source has ended.
    ///
    /// The remaining text is split into lines and classified with the same
    /// rules as [`feed`](Self::feed), except that payloads which still fail to
    /// parse are dropped. The buffer is empty afterwards.
    pub fn finish(&mut self) -> Vec<String> {
        let mut deltas = Vec::new();
        let remaining = std::mem::take(&mut self.line_buf);
        if self.done || remaining.trim().is_empty() {
            return deltas;
        }

        for line in remaining.split('\n') {
            if line.is_empty() {
                continue;
            }
            if Self::process_line(line, Pass::Flush, &mut deltas) == LineOutcome::Done {
                self.done = true;
                break;
            }
        }

        deltas
    }

    fn mark_done(&mut self) {
        tracing::debug!(discarded = self.line_buf.len(), "stream sentinel received");
        self.done = true;
        self.line_buf.clear();
    }

    /// Classify one line and push any delta it carries.
    fn process_line(line: &str, pass: Pass, deltas: &mut Vec<String>) -> LineOutcome {
        let payload = match Frame::classify(line) {
            Frame::Blank | Frame::Comment => return LineOutcome::Continue,
            Frame::Ignored => {
                tracing::trace!(len = line.len(), "skipping non-data line");
                return LineOutcome::Continue;
            }
            Frame::Done => return LineOutcome::Done,
            Frame::Data(payload) => payload,
        };

        match serde_json::from_str::<serde_json::Value>(payload) {
            Ok(json) => {
                if let Some(content) = content_delta(&json) {
                    deltas.push(content.to_string());
                }
                LineOutcome::Continue
            }
            Err(e) => match pass {
                Pass::Streaming => {
                    tracing::trace!(error = %e, "incomplete data frame, waiting for more input");
                    LineOutcome::Rebuffer
                }
                Pass::Flush => {
                    tracing::debug!(error = %e, len = payload.len(), "dropping unparseable trailing frame");
                    LineOutcome::Continue
                }
            },
        }
    }
}
