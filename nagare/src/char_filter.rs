//! Character filters transforming the input before tokenization.
use std::io;

use regex::Regex;

use crate::errors::Result;
use crate::source::{self, CharSource};

/// Correction points mapping offsets of a transformed text back to the text
/// it was made from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OffsetMap {
    // Pairs of an output offset and the cumulative difference from it onwards,
    // sorted by the offset.
    points: Vec<(usize, isize)>,
}

impl OffsetMap {
    /// Creates an empty map, i.e., the identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a correction point.
    ///
    /// Offsets from `offset` onwards (until the next point) are shifted by
    /// `cumulative_diff`. Points must be added in non-decreasing order of
    /// `offset`; a point at the same offset as the last one replaces it.
    pub fn add(&mut self, offset: usize, cumulative_diff: isize) {
        match self.points.last_mut() {
            Some(last) if last.0 == offset => last.1 = cumulative_diff,
            _ => {
                debug_assert!(self.points.last().map_or(true, |p| p.0 < offset));
                self.points.push((offset, cumulative_diff));
            }
        }
    }

    /// Gets the cumulative difference of the last point.
    pub fn last_diff(&self) -> isize {
        self.points.last().map_or(0, |p| p.1)
    }

    /// Maps an offset of the transformed text to the original one.
    pub fn correct(&self, offset: usize) -> usize {
        let idx = self.points.partition_point(|p| p.0 <= offset);
        if idx == 0 {
            return offset;
        }
        let diff = self.points[idx - 1].1;
        offset.checked_add_signed(diff).unwrap_or(0)
    }

    /// Checks if the map has no correction point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Char filter replacing every match of a pattern.
///
/// The wrapped source is read to the end on the first read, since a match may
/// span any number of characters. Characters removed by a replacement map to
/// the end of the match; characters inserted by it map to the end as well.
pub struct PatternReplaceCharFilter<S> {
    inner: S,
    pattern: Regex,
    replacement: String,
    output: Option<String>,
    pos: usize,
    offsets: OffsetMap,
}

impl<S> PatternReplaceCharFilter<S>
where
    S: CharSource,
{
    /// Creates a new instance.
    ///
    /// # Arguments
    ///
    ///  - `inner`: Source to be filtered.
    ///  - `pattern`: Regular expression to be replaced.
    ///  - `replacement`: Replacement, where `$1` or `${name}` expand to groups.
    ///
    /// # Errors
    ///
    /// [`NagareError`](crate::errors::NagareError) is returned when `pattern`
    /// is not a valid regular expression.
    pub fn new<R>(inner: S, pattern: &str, replacement: R) -> Result<Self>
    where
        R: Into<String>,
    {
        Ok(Self::with_regex(inner, Regex::new(pattern)?, replacement))
    }

    /// Creates a new instance from a compiled regular expression.
    pub fn with_regex<R>(inner: S, pattern: Regex, replacement: R) -> Self
    where
        R: Into<String>,
    {
        Self {
            inner,
            pattern,
            replacement: replacement.into(),
            output: None,
            pos: 0,
            offsets: OffsetMap::new(),
        }
    }

    /// Gets the offset corrections recorded so far.
    pub const fn offsets(&self) -> &OffsetMap {
        &self.offsets
    }

    /// Unwraps the filtered source.
    pub fn into_inner(self) -> S {
        self.inner
    }

    fn transform(&mut self) -> io::Result<String> {
        let mut input = String::new();
        while self.inner.read_chars(&mut input, usize::MAX)? != 0 {}

        let mut output = String::with_capacity(input.len());
        let mut expanded = String::new();
        // Positions in characters
        let mut last_byte = 0;
        let mut last_char = 0;
        let mut output_char = 0;
        for caps in self.pattern.captures_iter(&input) {
            let Some(m) = caps.get(0) else { continue };
            let kept = &input[last_byte..m.start()];
            output.push_str(kept);
            let match_start = last_char + kept.chars().count();
            output_char += match_start - last_char;
            let match_len = m.as_str().chars().count();

            expanded.clear();
            caps.expand(&self.replacement, &mut expanded);
            output.push_str(&expanded);
            let replacement_len = expanded.chars().count();

            record(&mut self.offsets, output_char, match_len, replacement_len);

            output_char += replacement_len;
            last_byte = m.end();
            last_char = match_start + match_len;
        }
        output.push_str(&input[last_byte..]);
        log::debug!(
            "replaced {:?} in {} chars, {} correction points",
            self.pattern.as_str(),
            last_char,
            self.offsets.points.len()
        );
        Ok(output)
    }
}

/// Records the corrections of one replacement starting at `output_start`.
fn record(offsets: &mut OffsetMap, output_start: usize, match_len: usize, replacement_len: usize) {
    let prev = offsets.last_diff();
    if replacement_len < match_len {
        let diff = prev + (match_len - replacement_len) as isize;
        offsets.add(output_start + replacement_len, diff);
    } else {
        for k in 1..=(replacement_len - match_len) {
            offsets.add(output_start + match_len + k, prev - k as isize);
        }
    }
}

impl<S> CharSource for PatternReplaceCharFilter<S>
where
    S: CharSource,
{
    fn read_chars(&mut self, buf: &mut String, max_chars: usize) -> io::Result<usize> {
        if self.output.is_none() {
            self.output = Some(self.transform()?);
        }
        let Some(output) = self.output.as_deref() else {
            return Ok(0);
        };
        let rest = &output[self.pos..];
        let (len_byte, len_char) = source::prefix_len(rest, max_chars);
        buf.push_str(&rest[..len_byte]);
        self.pos += len_byte;
        Ok(len_char)
    }

    fn correct_offset(&self, offset: usize) -> usize {
        self.inner.correct_offset(self.offsets.correct(offset))
    }
}
