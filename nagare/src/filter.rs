//! Filters rewriting the tokens of a stream.
use std::ops::Range;
use std::str::FromStr;

use hashbrown::HashSet;

use crate::errors::{NagareError, Result};
use crate::morpheme::Morpheme;
use crate::token::{Token, TokenStream};

/// Attribute of a morpheme used as the token text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MorphemeField {
    /// Surface string.
    #[default]
    Surface,
    /// Dictionary form, e.g., `行く` for `行っ`.
    DictionaryForm,
    /// Normalized form.
    NormalizedForm,
    /// Reading form. Morphemes without a reading keep their surface.
    ReadingForm,
}

impl MorphemeField {
    /// Gets the attribute of the morpheme.
    pub fn get<'a>(&self, m: &'a Morpheme) -> &'a str {
        match self {
            Self::Surface => m.surface(),
            Self::DictionaryForm => m.dictionary_form(),
            Self::NormalizedForm => m.normalized_form(),
            Self::ReadingForm => match m.reading_form() {
                "" => m.surface(),
                reading => reading,
            },
        }
    }
}

impl FromStr for MorphemeField {
    type Err = NagareError;

    fn from_str(field: &str) -> Result<Self, Self::Err> {
        match field {
            "surface" => Ok(Self::Surface),
            "dictionary" | "dictionary_form" => Ok(Self::DictionaryForm),
            "normalized" | "normalized_form" => Ok(Self::NormalizedForm),
            "reading" | "reading_form" => Ok(Self::ReadingForm),
            _ => Err(NagareError::invalid_argument(
                "field",
                format!("unknown morpheme field: {field}"),
            )),
        }
    }
}

/// Filter replacing the text of each token with an attribute of its morpheme.
///
/// Keyword tokens and tokens without a morpheme are passed through.
/// Offsets and positions are never changed.
pub struct MorphemeFieldFilter<S> {
    inner: S,
    field: MorphemeField,
}

impl<S> MorphemeFieldFilter<S>
where
    S: TokenStream,
{
    /// Creates a new instance.
    pub const fn new(inner: S, field: MorphemeField) -> Self {
        Self { inner, field }
    }

    /// Gets the field written to the token text.
    pub const fn field(&self) -> MorphemeField {
        self.field
    }

    /// Unwraps the filtered stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> TokenStream for MorphemeFieldFilter<S>
where
    S: TokenStream,
{
    fn next_token(&mut self) -> Result<Option<&mut Token>> {
        let Some(token) = self.inner.next_token()? else {
            return Ok(None);
        };
        if !token.keyword {
            if let Some(m) = token.morpheme.as_ref() {
                token.text.clear();
                token.text.push_str(self.field.get(m));
            }
        }
        Ok(Some(token))
    }

    fn end(&mut self) -> Range<usize> {
        self.inner.end()
    }
}

/// Filter marking tokens whose text is in a keyword set.
pub struct KeywordMarkerFilter<S> {
    inner: S,
    keywords: HashSet<String>,
}

impl<S> KeywordMarkerFilter<S>
where
    S: TokenStream,
{
    /// Creates a new instance.
    ///
    /// # Arguments
    ///
    ///  - `inner`: Stream to be filtered.
    ///  - `keywords`: Texts to be marked.
    pub fn new<I, K>(inner: S, keywords: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            inner,
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// Gets the number of keywords.
    pub fn num_keywords(&self) -> usize {
        self.keywords.len()
    }

    /// Unwraps the filtered stream.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> TokenStream for KeywordMarkerFilter<S>
where
    S: TokenStream,
{
    fn next_token(&mut self) -> Result<Option<&mut Token>> {
        let Some(token) = self.inner.next_token()? else {
            return Ok(None);
        };
        if self.keywords.contains(token.text.as_str()) {
            token.keyword = true;
        }
        Ok(Some(token))
    }

    fn end(&mut self) -> Range<usize> {
        self.inner.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::source::StrSource;
    use crate::test_utils;
    use crate::tokenizer::ChunkedTokenizer;

    fn texts<S: TokenStream>(stream: &mut S) -> Vec<String> {
        let mut texts = vec![];
        while let Some(t) = stream.next_token().unwrap() {
            texts.push(t.text.clone());
        }
        texts
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("surface".parse::<MorphemeField>().unwrap(), MorphemeField::Surface);
        assert_eq!(
            "dictionary".parse::<MorphemeField>().unwrap(),
            MorphemeField::DictionaryForm
        );
        assert_eq!(
            "normalized_form".parse::<MorphemeField>().unwrap(),
            MorphemeField::NormalizedForm
        );
        assert_eq!(
            "reading".parse::<MorphemeField>().unwrap(),
            MorphemeField::ReadingForm
        );
        assert!("lemma".parse::<MorphemeField>().is_err());
    }

    #[test]
    fn test_reading_fallback() {
        let m = Morpheme::new("ABC", 0..3);
        assert_eq!(MorphemeField::ReadingForm.get(&m), "ABC");
    }

    #[test]
    fn test_dictionary_form() {
        let mut tokenizer = ChunkedTokenizer::new(test_utils::vibrato_analyzer());
        tokenizer.set_input(StrSource::new("東京都に行った。"));
        let mut filter = MorphemeFieldFilter::new(tokenizer, MorphemeField::DictionaryForm);
        assert_eq!(texts(&mut filter), vec!["東京都", "に", "行く", "た"]);
        assert_eq!(filter.end(), 8..8);
    }

    #[test]
    fn test_reading_form_keeps_offsets() {
        let mut tokenizer = ChunkedTokenizer::new(test_utils::vibrato_analyzer());
        tokenizer.set_input(StrSource::new("京都に行った"));
        let mut filter = MorphemeFieldFilter::new(tokenizer, MorphemeField::ReadingForm);
        let mut tokens = vec![];
        while let Some(t) = filter.next_token().unwrap() {
            tokens.push((t.text.clone(), t.range_char()));
        }
        assert_eq!(
            tokens,
            vec![
                ("キョウト".to_string(), 0..2),
                ("ニ".to_string(), 2..3),
                ("イッ".to_string(), 3..5),
                ("タ".to_string(), 5..6),
            ]
        );
    }

    #[test]
    fn test_keyword_protected() {
        let mut tokenizer = ChunkedTokenizer::new(test_utils::vibrato_analyzer());
        tokenizer.set_input(StrSource::new("東京に行った"));
        let marker = KeywordMarkerFilter::new(tokenizer, ["東京", "行っ"]);
        assert_eq!(marker.num_keywords(), 2);
        let mut filter = MorphemeFieldFilter::new(marker, MorphemeField::ReadingForm);

        let mut tokens = vec![];
        while let Some(t) = filter.next_token().unwrap() {
            tokens.push((t.text.clone(), t.keyword));
        }
        assert_eq!(
            tokens,
            vec![
                ("東京".to_string(), true),
                ("ニ".to_string(), false),
                ("行っ".to_string(), true),
                ("タ".to_string(), false),
            ]
        );
        assert_eq!(filter.end(), 6..6);
    }
}
