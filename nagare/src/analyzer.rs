//! Morphological analyzers consumed by the tokenizer.
mod feature;
mod segment;

use std::rc::Rc;
use std::sync::Arc;

use vibrato::dictionary::LexType;
use vibrato::{Dictionary, Tokenizer};

use crate::errors::{NagareError, Result};
use crate::morpheme::Morpheme;

pub use feature::FeatureLayout;
use segment::Segments;

/// Capability splitting a bounded text into morphemes.
pub trait Analyzer {
    /// Analyzes `text` into morphemes ordered by position.
    ///
    /// Positions of the morphemes are in characters relative to `text`.
    ///
    /// # Errors
    ///
    /// Implementations return [`NagareError`] when the text cannot be analyzed.
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>>;
}

impl<A> Analyzer for &A
where
    A: Analyzer + ?Sized,
{
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>> {
        (**self).analyze(text)
    }
}

impl<A> Analyzer for Box<A>
where
    A: Analyzer + ?Sized,
{
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>> {
        (**self).analyze(text)
    }
}

impl<A> Analyzer for Rc<A>
where
    A: Analyzer + ?Sized,
{
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>> {
        (**self).analyze(text)
    }
}

impl<A> Analyzer for Arc<A>
where
    A: Analyzer + ?Sized,
{
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>> {
        (**self).analyze(text)
    }
}

/// Analyzer backed by [`vibrato::Tokenizer`].
pub struct VibratoAnalyzer {
    tokenizer: Tokenizer,
    layout: FeatureLayout,
    max_sentence_len: Option<usize>,
}

impl VibratoAnalyzer {
    /// Creates a new instance.
    ///
    /// # Arguments
    ///
    ///  - `tokenizer`: Vibrato tokenizer, already configured.
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            layout: FeatureLayout::default(),
            max_sentence_len: None,
        }
    }

    /// Creates a new instance with a default vibrato tokenizer.
    pub fn from_dictionary(dict: Dictionary) -> Self {
        Self::new(Tokenizer::new(dict))
    }

    /// Specifies where the attributes are in the feature strings of the
    /// dictionary. IPADIC's layout is used by default.
    pub fn feature_layout(mut self, layout: FeatureLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Specifies the maximum number of characters given to vibrato at once.
    ///
    /// Longer texts are cut, preferably after a sentence terminator. By
    /// default the whole text is analyzed at once.
    ///
    /// # Errors
    ///
    /// [`NagareError`] is returned when the length is zero.
    pub fn max_sentence_len(mut self, max_sentence_len: usize) -> Result<Self> {
        if max_sentence_len == 0 {
            return Err(NagareError::invalid_argument(
                "max_sentence_len",
                "must be positive",
            ));
        }
        self.max_sentence_len = Some(max_sentence_len);
        Ok(self)
    }

    /// Gets the reference to the vibrato tokenizer.
    pub const fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }
}

impl Analyzer for VibratoAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>> {
        let mut worker = self.tokenizer.new_worker();
        let mut morphemes = vec![];
        let max_len = self.max_sentence_len.unwrap_or(usize::MAX);
        for (start, sentence) in Segments::new(text, max_len) {
            worker.reset_sentence(sentence);
            worker.tokenize();
            morphemes.reserve(worker.num_tokens());
            for t in worker.token_iter() {
                let range = t.range_char();
                let m = self
                    .layout
                    .morpheme(t.surface(), t.feature(), start + range.start..start + range.end)
                    .with_oov(t.lex_type() == LexType::Unknown);
                morphemes.push(m);
            }
        }
        log::trace!("analyzed {} morphemes", morphemes.len());
        Ok(morphemes)
    }
}
