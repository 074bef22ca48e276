use crate::morpheme::{Morpheme, MorphemeIterator};

/// Decorator skipping morphemes tagged as punctuation.
///
/// Only removes morphemes; the retained ones and the base offset pass through
/// untouched.
pub struct NonPunctuationMorphemes<I> {
    inner: I,
}

impl<I> NonPunctuationMorphemes<I>
where
    I: MorphemeIterator,
{
    /// Creates a new instance wrapping `inner`.
    pub const fn new(inner: I) -> Self {
        Self { inner }
    }

    /// Unwraps the decorated iterator.
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I> Iterator for NonPunctuationMorphemes<I>
where
    I: MorphemeIterator,
{
    type Item = Morpheme;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().find(|m| !m.is_punctuation())
    }
}

impl<I> MorphemeIterator for NonPunctuationMorphemes<I>
where
    I: MorphemeIterator,
{
    #[inline(always)]
    fn base_offset(&self) -> usize {
        self.inner.base_offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::morpheme::ChunkMorphemes;

    fn sample() -> ChunkMorphemes {
        ChunkMorphemes::new(
            vec![
                Morpheme::new("「", 0..1).with_part_of_speech(["記号", "括弧開"]),
                Morpheme::new("東京", 1..3).with_part_of_speech(["名詞"]),
                Morpheme::new("」", 3..4).with_part_of_speech(["記号", "括弧閉"]),
                Morpheme::new("、", 4..5).with_part_of_speech(["補助記号", "読点"]),
                Morpheme::new("に", 5..6).with_part_of_speech(["助詞"]),
                Morpheme::new("。", 6..7).with_part_of_speech(["記号", "句点"]),
            ],
            10,
        )
    }

    #[test]
    fn test_skips_punctuation() {
        let mut it = NonPunctuationMorphemes::new(sample());
        assert_eq!(it.base_offset(), 10);

        let m = it.next().unwrap();
        assert_eq!(m.surface(), "東京");
        assert_eq!(m.range_char(), 1..3);

        let m = it.next().unwrap();
        assert_eq!(m.surface(), "に");
        assert_eq!(m.range_char(), 5..6);

        assert!(it.next().is_none());
        assert!(it.next().is_none());
        assert_eq!(it.base_offset(), 10);
    }

    #[test]
    fn test_offsets_unchanged() {
        let unfiltered: Vec<_> = sample().filter(|m| !m.is_punctuation()).collect();
        let filtered: Vec<_> = NonPunctuationMorphemes::new(sample()).collect();
        assert_eq!(unfiltered, filtered);
    }

    #[test]
    fn test_only_punctuation() {
        let inner = ChunkMorphemes::new(
            vec![Morpheme::new("。", 0..1).with_part_of_speech(["記号", "句点"])],
            0,
        );
        let mut it = NonPunctuationMorphemes::new(inner);
        assert!(it.next().is_none());
    }
}
