//! Adaptive reading of input chunks.
use std::io;

use crate::common::{DEFAULT_GROWTH_FACTOR, DEFAULT_INITIAL_CHUNK_SIZE, DEFAULT_MAX_CHUNK_SIZE};
use crate::errors::{NagareError, Result};
use crate::source::CharSource;

/// Growth policy of the chunk buffer. All sizes are in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkPolicy {
    initial_size: usize,
    growth_factor: usize,
    max_size: usize,
}

impl ChunkPolicy {
    /// Creates a new policy.
    ///
    /// # Arguments
    ///
    ///  - `initial_size`: Capacity of the buffer before any growth.
    ///  - `growth_factor`: Multiplier applied each time a read fills the buffer.
    ///  - `max_size`: Ceiling of the capacity.
    ///
    /// # Errors
    ///
    /// [`NagareError`] is returned when
    ///
    ///  - `initial_size` is zero,
    ///  - `initial_size` is larger than `max_size`, or
    ///  - `growth_factor` is less than 2 while `initial_size` is below `max_size`.
    pub fn new(initial_size: usize, growth_factor: usize, max_size: usize) -> Result<Self> {
        if initial_size == 0 {
            return Err(NagareError::invalid_argument(
                "initial_size",
                "must be positive",
            ));
        }
        if initial_size > max_size {
            return Err(NagareError::invalid_argument(
                "max_size",
                format!("must not be less than initial_size ({initial_size})"),
            ));
        }
        if growth_factor < 2 && initial_size < max_size {
            return Err(NagareError::invalid_argument(
                "growth_factor",
                "must be at least 2 unless initial_size equals max_size",
            ));
        }
        Ok(Self {
            initial_size,
            growth_factor,
            max_size,
        })
    }

    /// Creates a policy whose buffer never grows.
    ///
    /// # Errors
    ///
    /// [`NagareError`] is returned when `size` is zero.
    pub fn fixed(size: usize) -> Result<Self> {
        Self::new(size, 1, size)
    }

    /// Gets the initial capacity.
    pub const fn initial_size(&self) -> usize {
        self.initial_size
    }

    /// Gets the growth factor.
    pub const fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Gets the ceiling of the capacity.
    pub const fn max_size(&self) -> usize {
        self.max_size
    }

    fn next_size(&self, current: usize) -> usize {
        current
            .saturating_mul(self.growth_factor)
            .min(self.max_size)
    }
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            initial_size: DEFAULT_INITIAL_CHUNK_SIZE,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            max_size: DEFAULT_MAX_CHUNK_SIZE,
        }
    }
}

/// Growable buffer holding the chunk that has been read but not tokenized yet.
///
/// The capacity never shrinks during the lifetime of the reader.
pub struct ChunkReader {
    policy: ChunkPolicy,
    buffer: String,
    len_char: usize,
    capacity: usize,
}

impl ChunkReader {
    /// Creates a new instance.
    pub fn new(policy: ChunkPolicy) -> Self {
        Self {
            policy,
            buffer: String::new(),
            len_char: 0,
            capacity: policy.initial_size,
        }
    }

    /// Replaces the policy, restarting from its initial capacity.
    pub fn set_policy(&mut self, policy: ChunkPolicy) {
        self.policy = policy;
        self.capacity = policy.initial_size;
        self.clear();
    }

    /// Gets the policy.
    pub const fn policy(&self) -> &ChunkPolicy {
        &self.policy
    }

    /// Gets the current capacity in characters.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Gets the chunk read by the last [`fill`](Self::fill).
    #[inline(always)]
    pub fn chunk(&self) -> &str {
        &self.buffer
    }

    /// Gets the length of the chunk in characters.
    #[inline(always)]
    pub const fn len_char(&self) -> usize {
        self.len_char
    }

    /// Discards the content. The capacity is kept.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.len_char = 0;
    }

    /// Reads the next chunk from `src`, discarding the previous one.
    ///
    /// The buffer grows geometrically while `src` keeps filling it, until the
    /// ceiling of the policy is reached.
    ///
    /// Returns `false` if `src` was exhausted before any character was read.
    ///
    /// # Errors
    ///
    /// Errors of `src` are returned as is.
    pub fn fill<S>(&mut self, src: &mut S) -> io::Result<bool>
    where
        S: CharSource + ?Sized,
    {
        self.clear();
        loop {
            let n = src.read_chars(&mut self.buffer, self.capacity - self.len_char)?;
            self.len_char += n;
            debug_assert!(self.len_char <= self.capacity);

            if n == 0 {
                // The end of the input
                return Ok(self.len_char != 0);
            }
            if self.len_char < self.capacity || self.capacity >= self.policy.max_size {
                return Ok(true);
            }

            let capacity = self.policy.next_size(self.capacity);
            log::debug!(
                "growing the chunk buffer from {} to {} chars",
                self.capacity,
                capacity
            );
            self.capacity = capacity;
        }
    }
}
