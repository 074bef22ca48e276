//! Analyzed units and iterators over them.
mod iter;
mod punctuation;

use std::ops::Range;

use serde::Serialize;

pub use iter::{ChunkMorphemes, MorphemeIterator};
pub use punctuation::NonPunctuationMorphemes;

/// Top-level part-of-speech tags treated as punctuation.
///
/// `記号` is the symbol class of IPADIC, `補助記号` and `空白` are the
/// supplementary-symbol and whitespace classes of UniDic.
pub const PUNCTUATION_POS: &[&str] = &["記号", "補助記号", "空白"];

/// One unit produced by an analyzer.
///
/// The range is measured in characters and is relative to the text handed to
/// the analyzer, not to the whole stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Morpheme {
    surface: String,
    dictionary_form: String,
    normalized_form: String,
    reading_form: String,
    part_of_speech: Vec<String>,
    // Relative to the analyzed text; tokens carry the stream offsets.
    #[serde(skip)]
    begin: usize,
    #[serde(skip)]
    end: usize,
    #[serde(skip)]
    oov: bool,
}

impl Morpheme {
    /// Creates a new morpheme whose other forms default to the surface.
    ///
    /// # Arguments
    ///
    ///  - `surface`: Surface string.
    ///  - `range`: Position range of the surface in characters.
    pub fn new<S>(surface: S, range: Range<usize>) -> Self
    where
        S: Into<String>,
    {
        debug_assert!(range.start <= range.end);
        let surface = surface.into();
        Self {
            dictionary_form: surface.clone(),
            normalized_form: surface.clone(),
            reading_form: String::new(),
            part_of_speech: vec![],
            begin: range.start,
            end: range.end,
            oov: false,
            surface,
        }
    }

    /// Sets the dictionary form.
    pub fn with_dictionary_form<S>(mut self, form: S) -> Self
    where
        S: Into<String>,
    {
        self.dictionary_form = form.into();
        self
    }

    /// Sets the normalized form.
    pub fn with_normalized_form<S>(mut self, form: S) -> Self
    where
        S: Into<String>,
    {
        self.normalized_form = form.into();
        self
    }

    /// Sets the reading form.
    pub fn with_reading_form<S>(mut self, form: S) -> Self
    where
        S: Into<String>,
    {
        self.reading_form = form.into();
        self
    }

    /// Sets the part-of-speech tags, most general first.
    pub fn with_part_of_speech<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.part_of_speech = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the morpheme as out of vocabulary.
    pub const fn with_oov(mut self, yes: bool) -> Self {
        self.oov = yes;
        self
    }

    /// Gets the surface string.
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Gets the dictionary form.
    #[inline(always)]
    pub fn dictionary_form(&self) -> &str {
        &self.dictionary_form
    }

    /// Gets the normalized form.
    #[inline(always)]
    pub fn normalized_form(&self) -> &str {
        &self.normalized_form
    }

    /// Gets the reading form. Empty when the analyzer has none.
    #[inline(always)]
    pub fn reading_form(&self) -> &str {
        &self.reading_form
    }

    /// Gets the part-of-speech tags.
    #[inline(always)]
    pub fn part_of_speech(&self) -> &[String] {
        &self.part_of_speech
    }

    /// Gets the starting position in characters.
    #[inline(always)]
    pub const fn begin(&self) -> usize {
        self.begin
    }

    /// Gets the ending position in characters.
    #[inline(always)]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Gets the position range in characters.
    #[inline(always)]
    pub const fn range_char(&self) -> Range<usize> {
        self.begin..self.end
    }

    /// Checks if the analyzer did not find the morpheme in its lexicons.
    #[inline(always)]
    pub const fn is_oov(&self) -> bool {
        self.oov
    }

    /// Checks if the part of speech marks the morpheme as punctuation.
    pub fn is_punctuation(&self) -> bool {
        self.part_of_speech
            .first()
            .map_or(false, |pos| PUNCTUATION_POS.contains(&pos.as_str()))
    }
}
