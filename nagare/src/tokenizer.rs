//! Chunked streaming tokenizer.
use std::ops::Range;

use crate::analyzer::Analyzer;
use crate::chunk::{ChunkPolicy, ChunkReader};
use crate::errors::Result;
use crate::morpheme::{ChunkMorphemes, Morpheme, MorphemeIterator, NonPunctuationMorphemes};
use crate::source::CharSource;
use crate::token::{Token, TokenStream};

/// Progress of a [`ChunkedTokenizer`] through its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Nothing has been read since the last reset.
    Idle,
    /// The current chunk may still have morphemes.
    ChunkActive,
    /// The current chunk is exhausted and the next one has to be read.
    Refilling,
    /// The input is exhausted.
    Done,
}

/// Tokenizer reading its input chunk by chunk.
///
/// Each chunk is analyzed at once, and the offsets of its morphemes are shifted
/// by the number of characters of the preceding chunks, so the stream looks as
/// if the whole input had been analyzed in one go. Chunks are cut by size only;
/// a morpheme spanning a cut is reported as two.
pub struct ChunkedTokenizer<A, S> {
    analyzer: A,
    discard_punctuation: bool,
    reader: ChunkReader,
    input: Option<S>,
    iter: Box<dyn MorphemeIterator>,
    state: State,

    // Characters of the input preceding the current chunk.
    offset: usize,
    chunk_len: usize,
    // End of the last emitted morpheme before offset correction.
    end_offset: usize,

    token: Token,
}

impl<A, S> ChunkedTokenizer<A, S>
where
    A: Analyzer,
    S: CharSource,
{
    /// Creates a new instance discarding punctuation and using the default
    /// [`ChunkPolicy`].
    ///
    /// # Arguments
    ///
    ///  - `analyzer`: Analyzer applied to each chunk.
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer,
            discard_punctuation: true,
            reader: ChunkReader::new(ChunkPolicy::default()),
            input: None,
            iter: Box::new(ChunkMorphemes::empty()),
            state: State::Idle,
            offset: 0,
            chunk_len: 0,
            end_offset: 0,
            token: Token::default(),
        }
    }

    /// Discards morphemes whose part of speech marks them as punctuation.
    pub fn discard_punctuation(mut self, yes: bool) -> Self {
        self.discard_punctuation = yes;
        self
    }

    /// Specifies how the chunk buffer grows.
    pub fn chunk_policy(mut self, policy: ChunkPolicy) -> Self {
        self.reader.set_policy(policy);
        self
    }

    /// Sets the input to be tokenized and resets the tokenizer.
    ///
    /// Returns the previous input if any.
    pub fn set_input(&mut self, input: S) -> Option<S> {
        let prev = self.input.replace(input);
        self.reset();
        prev
    }

    /// Removes the input, leaving the tokenizer without one.
    pub fn take_input(&mut self) -> Option<S> {
        self.reset();
        self.input.take()
    }

    /// Gets the reference to the input.
    pub const fn input(&self) -> Option<&S> {
        self.input.as_ref()
    }

    /// Rewinds the tokenizer to its idle state. The input is kept.
    pub fn reset(&mut self) {
        self.reader.clear();
        self.iter = Box::new(ChunkMorphemes::empty());
        self.state = State::Idle;
        self.offset = 0;
        self.chunk_len = 0;
        self.end_offset = 0;
        self.token.reset();
    }

    /// Gets the reference to the analyzer.
    pub const fn analyzer(&self) -> &A {
        &self.analyzer
    }

    /// Gets the current state.
    pub const fn state(&self) -> State {
        self.state
    }

    /// Gets the current capacity of the chunk buffer in characters.
    pub const fn chunk_capacity(&self) -> usize {
        self.reader.capacity()
    }

    /// Gets the ending offset of the last emitted token, before correction.
    pub const fn end_offset(&self) -> usize {
        self.end_offset
    }

    fn correct_offset(&self, offset: usize) -> usize {
        self.input
            .as_ref()
            .map_or(offset, |input| input.correct_offset(offset))
    }

    /// Reads and analyzes the next chunk.
    ///
    /// Returns `false` if the input is exhausted or missing.
    fn refill(&mut self) -> Result<bool> {
        self.offset += self.chunk_len;
        self.chunk_len = 0;
        self.iter = Box::new(ChunkMorphemes::empty());

        let Some(input) = self.input.as_mut() else {
            return Ok(false);
        };
        if !self.reader.fill(input)? {
            return Ok(false);
        }
        self.chunk_len = self.reader.len_char();
        log::debug!(
            "analyzing a chunk of {} chars at offset {}",
            self.chunk_len,
            self.offset
        );

        let iter = ChunkMorphemes::new(self.analyzer.analyze(self.reader.chunk())?, 0);
        self.iter = if self.discard_punctuation {
            Box::new(NonPunctuationMorphemes::new(iter))
        } else {
            Box::new(iter)
        };
        Ok(true)
    }

    /// Pulls the next morpheme, reading new chunks as needed.
    fn next_morpheme(&mut self) -> Result<Option<Morpheme>> {
        loop {
            match self.state {
                State::Done => return Ok(None),
                State::ChunkActive => match self.iter.next() {
                    Some(m) => return Ok(Some(m)),
                    None => self.state = State::Refilling,
                },
                State::Idle | State::Refilling => match self.refill() {
                    Ok(true) => self.state = State::ChunkActive,
                    Ok(false) => {
                        log::debug!("reached the end of the input at offset {}", self.offset);
                        self.state = State::Done;
                    }
                    Err(e) => {
                        self.state = State::Done;
                        return Err(e);
                    }
                },
            }
        }
    }
}

impl<A, S> TokenStream for ChunkedTokenizer<A, S>
where
    A: Analyzer,
    S: CharSource,
{
    fn next_token(&mut self) -> Result<Option<&mut Token>> {
        let Some(m) = self.next_morpheme()? else {
            return Ok(None);
        };

        let base = self.offset + self.iter.base_offset();
        let begin = base + m.begin();
        let end = base + m.end();
        debug_assert!(begin <= end);
        debug_assert!(self.end_offset <= begin);
        self.end_offset = end;
        let offset_from = self.correct_offset(begin);
        let offset_to = self.correct_offset(end);

        self.token.reset();
        self.token.text.push_str(m.surface());
        self.token.morpheme = Some(m);
        self.token.offset_from = offset_from;
        self.token.offset_to = offset_to;
        self.token.position_increment = 1;
        self.token.position_length = 1;
        log::trace!(
            "token {:?} at {}..{}",
            self.token.text,
            offset_from,
            offset_to
        );
        Ok(Some(&mut self.token))
    }

    fn end(&mut self) -> Range<usize> {
        let last = self.correct_offset(self.offset + self.chunk_len);
        self.iter = Box::new(ChunkMorphemes::empty());
        self.token.reset();
        self.token.offset_from = last;
        self.token.offset_to = last;
        last..last
    }
}
