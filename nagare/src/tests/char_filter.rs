use std::ops::Range;

use crate::char_filter::PatternReplaceCharFilter;
use crate::chunk::ChunkPolicy;
use crate::filter::{KeywordMarkerFilter, MorphemeField, MorphemeFieldFilter};
use crate::source::{StrSource, Utf8Source};
use crate::test_utils;
use crate::token::TokenStream;
use crate::tokenizer::ChunkedTokenizer;

fn collect<T: TokenStream>(stream: &mut T) -> Vec<(String, Range<usize>)> {
    let mut tokens = vec![];
    while let Some(t) = stream.next_token().unwrap() {
        tokens.push((t.text.clone(), t.range_char()));
    }
    tokens
}

#[test]
fn test_corrected_offsets() {
    let filter = PatternReplaceCharFilter::new(StrSource::new("　　東京都に"), "　", "").unwrap();
    let mut tokenizer = ChunkedTokenizer::new(test_utils::vibrato_analyzer());
    tokenizer.set_input(filter);
    assert_eq!(
        collect(&mut tokenizer),
        vec![("東京都".to_string(), 2..5), ("に".to_string(), 5..6)]
    );
    assert_eq!(tokenizer.end(), 6..6);
}

#[test]
fn test_corrected_offsets_across_chunks() {
    let text = "東京（株）に行った。京都（株）に行った。";
    let mut tokenizer = ChunkedTokenizer::new(test_utils::vibrato_analyzer())
        .chunk_policy(ChunkPolicy::fixed(6).unwrap());
    let filter = PatternReplaceCharFilter::new(StrSource::new(text), "（株）", "").unwrap();
    tokenizer.set_input(filter);
    let tokens = collect(&mut tokenizer);
    // End offsets touching a removed span map past it.
    assert_eq!(
        tokens,
        vec![
            ("東京".to_string(), 0..5),
            ("に".to_string(), 5..6),
            ("行っ".to_string(), 6..8),
            ("た".to_string(), 8..9),
            ("京都".to_string(), 10..15),
            ("に".to_string(), 15..16),
            ("行っ".to_string(), 16..18),
            ("た".to_string(), 18..19),
        ]
    );
    let chars: Vec<_> = text.chars().collect();
    for (surface, range) in &tokens {
        assert_eq!(surface.chars().next(), Some(chars[range.start]));
    }
    assert_eq!(tokenizer.end(), 20..20);
}

#[test]
fn test_full_pipeline() {
    let text = "東京　に行った。";
    let filter = PatternReplaceCharFilter::new(Utf8Source::new(text.as_bytes()), "　", "").unwrap();
    let mut tokenizer = ChunkedTokenizer::new(test_utils::vibrato_analyzer());
    tokenizer.set_input(filter);
    let marker = KeywordMarkerFilter::new(tokenizer, ["行っ"]);
    let mut stream = MorphemeFieldFilter::new(marker, MorphemeField::DictionaryForm);
    assert_eq!(
        collect(&mut stream),
        vec![
            ("東京".to_string(), 0..3),
            ("に".to_string(), 3..4),
            ("行っ".to_string(), 4..6),
            ("た".to_string(), 6..7),
        ]
    );
    assert_eq!(stream.end(), 8..8);
}
