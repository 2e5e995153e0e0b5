#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod decoder;
pub mod frame;
pub mod stream;
pub mod text;

pub use decoder::FrameDecoder;
pub use frame::{DATA_PREFIX, DONE_SENTINEL, Frame, content_delta};
pub use stream::{decode, decode_iter, deltas};
pub use text::{Utf8Decoder, text_chunks};
