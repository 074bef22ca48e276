use crate::morpheme::Morpheme;

/// Forward-only sequence of morphemes from one analyzer invocation.
///
/// Once [`Iterator::next`] returns [`None`] it keeps returning [`None`].
pub trait MorphemeIterator: Iterator<Item = Morpheme> {
    /// Gets the number of characters preceding the analyzed text within its
    /// chunk. Constant for the lifetime of the iterator.
    fn base_offset(&self) -> usize;
}

/// Iterator over the result set of one analyzer invocation.
pub struct ChunkMorphemes {
    morphemes: std::vec::IntoIter<Morpheme>,
    base_offset: usize,
}

impl ChunkMorphemes {
    /// Creates a new instance taking ownership of the analyzed morphemes.
    ///
    /// # Arguments
    ///
    ///  - `morphemes`: Morphemes in the order the analyzer returned them.
    ///  - `base_offset`: Characters preceding the analyzed text within its chunk.
    pub fn new(morphemes: Vec<Morpheme>, base_offset: usize) -> Self {
        Self {
            morphemes: morphemes.into_iter(),
            base_offset,
        }
    }

    /// Creates an iterator with no morphemes and a zero base offset.
    pub fn empty() -> Self {
        Self::new(vec![], 0)
    }
}

impl Default for ChunkMorphemes {
    fn default() -> Self {
        Self::empty()
    }
}

impl Iterator for ChunkMorphemes {
    type Item = Morpheme;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.morphemes.next()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.morphemes.size_hint()
    }
}

impl std::iter::FusedIterator for ChunkMorphemes {}

impl MorphemeIterator for ChunkMorphemes {
    #[inline(always)]
    fn base_offset(&self) -> usize {
        self.base_offset
    }
}

impl<I> MorphemeIterator for Box<I>
where
    I: MorphemeIterator + ?Sized,
{
    #[inline(always)]
    fn base_offset(&self) -> usize {
        (**self).base_offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let mut it = ChunkMorphemes::empty();
        assert_eq!(it.base_offset(), 0);
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }

    #[test]
    fn test_exhaustion() {
        let mut it = ChunkMorphemes::new(
            vec![Morpheme::new("東京", 0..2), Morpheme::new("に", 2..3)],
            5,
        );
        assert_eq!(it.base_offset(), 5);
        assert_eq!(it.next().unwrap().surface(), "東京");
        assert_eq!(it.next().unwrap().surface(), "に");
        assert!(it.next().is_none());
        assert!(it.next().is_none());
        assert_eq!(it.base_offset(), 5);
    }
}
