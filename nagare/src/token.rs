//! Tokens handed to the indexing pipeline.
use std::ops::Range;

use serde::Serialize;

use crate::errors::Result;
use crate::morpheme::Morpheme;

/// Resultant token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Term text. The surface unless a filter rewrote it.
    pub text: String,

    /// Morpheme the token was made from.
    pub morpheme: Option<Morpheme>,

    /// Starting offset in characters of the original input.
    pub offset_from: usize,

    /// Ending offset in characters of the original input.
    pub offset_to: usize,

    /// Distance in positions from the previous token.
    pub position_increment: usize,

    /// Number of positions the token spans.
    pub position_length: usize,

    /// Whether the text must be kept as is by later filters.
    pub keyword: bool,
}

impl Token {
    /// Resets all fields, keeping the allocation of the text.
    pub fn reset(&mut self) {
        self.text.clear();
        self.morpheme = None;
        self.offset_from = 0;
        self.offset_to = 0;
        self.position_increment = 1;
        self.position_length = 1;
        self.keyword = false;
    }

    /// Gets the offset range in characters.
    #[inline(always)]
    pub const fn range_char(&self) -> Range<usize> {
        self.offset_from..self.offset_to
    }
}

/// Pull-based stream of tokens.
pub trait TokenStream {
    /// Advances to the next token.
    ///
    /// Returns [`None`] once the stream is exhausted, and keeps doing so.
    ///
    /// # Errors
    ///
    /// Errors of the input and of the analyzer are returned as is.
    fn next_token(&mut self) -> Result<Option<&mut Token>>;

    /// Finishes the stream, returning the zero-width range at the final offset.
    fn end(&mut self) -> Range<usize>;
}

impl<S> TokenStream for &mut S
where
    S: TokenStream + ?Sized,
{
    fn next_token(&mut self) -> Result<Option<&mut Token>> {
        (**self).next_token()
    }

    fn end(&mut self) -> Range<usize> {
        (**self).end()
    }
}

impl<S> TokenStream for Box<S>
where
    S: TokenStream + ?Sized,
{
    fn next_token(&mut self) -> Result<Option<&mut Token>> {
        (**self).next_token()
    }

    fn end(&mut self) -> Range<usize> {
        (**self).end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset() {
        let mut token = Token {
            text: "東京".to_string(),
            morpheme: Some(Morpheme::new("東京", 0..2)),
            offset_from: 3,
            offset_to: 5,
            position_increment: 1,
            position_length: 1,
            keyword: true,
        };
        assert_eq!(token.range_char(), 3..5);
        token.reset();
        assert_eq!(token.text, "");
        assert_eq!(token.morpheme, None);
        assert_eq!(token.range_char(), 0..0);
        assert_eq!(token.position_increment, 1);
        assert_eq!(token.position_length, 1);
        assert!(!token.keyword);
    }

    #[test]
    fn test_serialize_stream_offsets() {
        // The morpheme was found at 0..2 of a chunk starting at 10.
        let token = Token {
            text: "京都".to_string(),
            morpheme: Some(Morpheme::new("京都", 0..2)),
            offset_from: 10,
            offset_to: 12,
            position_increment: 1,
            position_length: 1,
            keyword: false,
        };
        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(value["offsetFrom"], 10);
        assert_eq!(value["offsetTo"], 12);
        assert_eq!(value["morpheme"]["surface"], "京都");
        assert!(value["morpheme"].get("begin").is_none());
        assert!(value["morpheme"].get("end").is_none());
    }
}
