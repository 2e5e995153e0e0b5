#![no_main]
use libfuzzer_sys::fuzz_target;
use mindmate_stream::{FrameDecoder, Utf8Decoder};

fn run(chunks: &[&[u8]]) -> Vec<String> {
    let mut utf8 = Utf8Decoder::new();
    let mut decoder = FrameDecoder::new();
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend(decoder.feed(&utf8.decode(chunk)));
    }
    out.extend(decoder.feed(&utf8.finish()));
    out.extend(decoder.finish());
    out
}

fuzz_target!(|data: &[u8]| {
    // First byte picks the split point; the rest is the stream body.
    let Some((&split, body)) = data.split_first() else {
        return;
    };
    let split = usize::from(split).min(body.len());
    let whole = run(&[body]);
    let halves = run(&[&body[..split], &body[split..]]);
    assert_eq!(whole, halves);
});
