use std::cell::Cell;

use vibrato::dictionary::SystemDictionaryBuilder;

use crate::analyzer::{Analyzer, VibratoAnalyzer};
use crate::errors::{NagareError, Result};
use crate::morpheme::Morpheme;

pub const LEX_CSV: &str = include_str!("./tests/resources/lex.csv");
pub const MATRIX_DEF: &str = include_str!("./tests/resources/matrix.def");
pub const CHAR_DEF: &str = include_str!("./tests/resources/char.def");
pub const UNK_DEF: &str = include_str!("./tests/resources/unk.def");

pub fn vibrato_analyzer() -> VibratoAnalyzer {
    let dict = SystemDictionaryBuilder::from_readers(
        LEX_CSV.as_bytes(),
        MATRIX_DEF.as_bytes(),
        CHAR_DEF.as_bytes(),
        UNK_DEF.as_bytes(),
    )
    .unwrap();
    VibratoAnalyzer::from_dictionary(dict)
}

/// Analyzer emitting one morpheme per character and dropping whitespace, so
/// that its output never depends on where a text is cut.
pub struct CharAnalyzer;

impl Analyzer for CharAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>> {
        Ok(text
            .chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(i, c)| {
                let pos = if "。、「」！？".contains(c) {
                    "記号"
                } else {
                    "名詞"
                };
                Morpheme::new(c.to_string(), i..i + 1).with_part_of_speech([pos])
            })
            .collect())
    }
}

/// Analyzer behaving like [`CharAnalyzer`] except that it fails from the
/// `fail_at`-th call on (counted from 1).
pub struct FailingAnalyzer {
    calls: Cell<usize>,
    fail_at: usize,
}

impl FailingAnalyzer {
    pub fn new(fail_at: usize) -> Self {
        Self {
            calls: Cell::new(0),
            fail_at,
        }
    }
}

impl Analyzer for FailingAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Morpheme>> {
        let calls = self.calls.get() + 1;
        self.calls.set(calls);
        if calls >= self.fail_at {
            return Err(NagareError::invalid_argument("text", "analysis failed"));
        }
        CharAnalyzer.analyze(text)
    }
}
