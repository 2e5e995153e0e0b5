//! Property-based tests: chunk-boundary invariance and the concatenation property.

use bytes::Bytes;
use mindmate_stream::{FrameDecoder, decode, text_chunks};
use proptest::prelude::*;

/// One line-level element of a generated stream.
#[derive(Debug, Clone)]
enum Piece {
    Content(String),
    RoleOnly,
    Finish,
    Comment,
    Blank,
    Event,
    /// A complete data line whose payload never parses.
    Broken,
    /// A data line with an empty payload.
    EmptyData,
    Done,
}

impl Piece {
    fn render(&self, crlf: bool) -> String {
        let eol = if crlf { "\r\n" } else { "\n" };
        let line = match self {
            Piece::Content(text) => format!(
                "data: {}",
                serde_json::json!({"choices": [{"index": 0, "delta": {"content": text}}]})
            ),
            Piece::RoleOnly => {
                r#"data: {"choices":[{"index":0,"delta":{"role":"assistant"}}]}"#.to_string()
            }
            Piece::Finish => {
                r#"data: {"choices":[{"index":0,"delta":{},"finish_reason":"stop"}]}"#.to_string()
            }
            Piece::Comment => ": keep-alive".to_string(),
            Piece::Blank => String::new(),
            Piece::Event => "event: completion".to_string(),
            Piece::Broken => "data: {bad".to_string(),
            Piece::EmptyData => "data: ".to_string(),
            Piece::Done => "data: [DONE]".to_string(),
        };
        format!("{line}{eol}")
    }
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['a', 'Z', ' ', '9', 'é', '💚', '"', '\\', '\n', '{', ':']),
        0..10,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

fn arb_piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        6 => arb_text().prop_map(Piece::Content),
        1 => Just(Piece::RoleOnly),
        1 => Just(Piece::Finish),
        1 => Just(Piece::Comment),
        2 => Just(Piece::Blank),
        1 => Just(Piece::Event),
        1 => Just(Piece::Broken),
        1 => Just(Piece::EmptyData),
        1 => Just(Piece::Done),
    ]
}

/// Free-form text built from the fragments the decoder reacts to.
fn arb_noise() -> impl Strategy<Value = String> {
    let fragment = prop_oneof![
        4 => prop::sample::select(vec![
            "data: ",
            "data:",
            "[DONE]",
            ": ",
            "\n",
            "\r",
            "\r\n",
            r#"{"choices":[{"delta":{"content":"#,
            r#""x"}}]}"#,
            "{",
            "}",
        ])
        .prop_map(str::to_string),
        1 => "(?s).{0,8}",
    ];
    prop::collection::vec(fragment, 0..40).prop_map(|parts| parts.concat())
}

/// A rendered stream plus the deltas it must produce.
fn arb_stream() -> impl Strategy<Value = (String, Vec<String>)> {
    (
        prop::collection::vec(arb_piece(), 0..12),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(pieces, crlf, garbage_tail)| {
            let mut body: String = pieces.iter().map(|p| p.render(crlf)).collect();
            if garbage_tail {
                body.push_str("data: {\"choices\":[{");
            }

            let expected = pieces
                .iter()
                .take_while(|p| !matches!(p, Piece::Done))
                .filter_map(|p| match p {
                    Piece::Content(text) if !text.is_empty() => Some(text.clone()),
                    _ => None,
                })
                .collect();

            (body, expected)
        })
}

/// Split `text` at the given byte offsets, snapped down to char boundaries.
fn split_at_chars<'a>(text: &'a str, cuts: &[usize]) -> Vec<&'a str> {
    let mut offsets: Vec<usize> = cuts
        .iter()
        .map(|&c| {
            let mut c = c % (text.len() + 1);
            while !text.is_char_boundary(c) {
                c -= 1;
            }
            c
        })
        .collect();
    offsets.sort_unstable();
    offsets.dedup();

    let mut chunks = Vec::new();
    let mut start = 0;
    for end in offsets {
        chunks.push(&text[start..end]);
        start = end;
    }
    chunks.push(&text[start..]);
    chunks
}

fn run_decoder(chunks: &[&str]) -> Vec<String> {
    let mut decoder = FrameDecoder::new();
    let mut out = Vec::new();
    for chunk in chunks {
        out.extend(decoder.feed(chunk));
    }
    out.extend(decoder.finish());
    out
}

proptest! {
    #[test]
    fn output_is_independent_of_chunk_boundaries(
        (body, expected) in arb_stream(),
        cuts in prop::collection::vec(any::<usize>(), 0..8),
    ) {
        let whole = run_decoder(&[&body]);
        prop_assert_eq!(&whole, &expected);

        let chunks = split_at_chars(&body, &cuts);
        prop_assert_eq!(run_decoder(&chunks), whole);
    }

    #[test]
    fn concatenated_deltas_equal_concatenated_contents(
        (body, expected) in arb_stream(),
        cuts in prop::collection::vec(any::<usize>(), 0..8),
    ) {
        let chunks = split_at_chars(&body, &cuts);
        let joined: String = run_decoder(&chunks).concat();
        prop_assert_eq!(joined, expected.concat());
    }

    #[test]
    fn byte_level_splits_match_text_level(
        (body, expected) in arb_stream(),
        cuts in prop::collection::vec(any::<usize>(), 0..8),
    ) {
        let bytes = body.as_bytes();
        let mut offsets: Vec<usize> = cuts.iter().map(|c| c % (bytes.len() + 1)).collect();
        offsets.sort_unstable();
        offsets.dedup();

        let mut pieces = Vec::new();
        let mut start = 0;
        for end in offsets {
            pieces.push(Ok::<_, std::io::Error>(Bytes::copy_from_slice(&bytes[start..end])));
            start = end;
        }
        pieces.push(Ok(Bytes::copy_from_slice(&bytes[start..])));

        let mut out = Vec::new();
        futures::executor::block_on(decode(
            text_chunks(futures::stream::iter(pieces)),
            |d| out.push(d.to_string()),
        ))
        .unwrap();
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn arbitrary_text_is_split_invariant(
        text in prop_oneof!["(?s).{0,200}", arb_noise()],
        cuts in prop::collection::vec(any::<usize>(), 0..6),
    ) {
        let whole = run_decoder(&[&text]);
        let chunks = split_at_chars(&text, &cuts);
        prop_assert_eq!(run_decoder(&chunks), whole);
    }
}

#[test]
fn every_two_and_three_way_split_of_a_fixed_stream() {
    let body = concat!(
        ": keep-alive\r\n\r\n",
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\r\n\r\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"I hear \"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"you 💚\"}}]}\n\n",
        "data: [DONE]\n\n",
    );
    let expected = vec!["I hear ".to_string(), "you 💚".to_string()];
    let boundaries: Vec<usize> = (0..=body.len()).filter(|&i| body.is_char_boundary(i)).collect();

    for &i in &boundaries {
        assert_eq!(run_decoder(&[&body[..i], &body[i..]]), expected, "split at {i}");
        for &j in boundaries.iter().filter(|&&j| j >= i) {
            assert_eq!(
                run_decoder(&[&body[..i], &body[i..j], &body[j..]]),
                expected,
                "split at {i},{j}"
            );
        }
    }
}
