//! Character sources feeding the tokenizer.
use std::io::{self, Read};

const BYTE_BUFFER_SIZE: usize = 64 * 1024;

/// Upstream source of characters.
pub trait CharSource {
    /// Appends at most `max_chars` characters to `buf`.
    ///
    /// Returns the number of characters appended. `0` means the end of the
    /// input whenever `max_chars` is positive. A call may return fewer
    /// characters than requested without the input being exhausted.
    ///
    /// # Errors
    ///
    /// Errors of the underlying input are returned as is.
    fn read_chars(&mut self, buf: &mut String, max_chars: usize) -> io::Result<usize>;

    /// Maps an offset in the characters read from this source to an offset in
    /// the original input. The identity unless the source transforms text.
    #[inline(always)]
    fn correct_offset(&self, offset: usize) -> usize {
        offset
    }
}

impl<S> CharSource for &mut S
where
    S: CharSource + ?Sized,
{
    #[inline(always)]
    fn read_chars(&mut self, buf: &mut String, max_chars: usize) -> io::Result<usize> {
        (**self).read_chars(buf, max_chars)
    }

    #[inline(always)]
    fn correct_offset(&self, offset: usize) -> usize {
        (**self).correct_offset(offset)
    }
}

impl<S> CharSource for Box<S>
where
    S: CharSource + ?Sized,
{
    #[inline(always)]
    fn read_chars(&mut self, buf: &mut String, max_chars: usize) -> io::Result<usize> {
        (**self).read_chars(buf, max_chars)
    }

    #[inline(always)]
    fn correct_offset(&self, offset: usize) -> usize {
        (**self).correct_offset(offset)
    }
}

/// In-memory source over a string slice.
#[derive(Clone, Debug)]
pub struct StrSource<'a> {
    rest: &'a str,
    max_read: Option<usize>,
}

impl<'a> StrSource<'a> {
    /// Creates a new instance.
    pub const fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            max_read: None,
        }
    }

    /// Limits the number of characters returned by one call, emulating an
    /// input that only has part of its data ready. `0` removes the limit.
    pub const fn max_read(mut self, max_read: usize) -> Self {
        self.max_read = if max_read == 0 {
            None
        } else {
            Some(max_read)
        };
        self
    }
}

impl CharSource for StrSource<'_> {
    fn read_chars(&mut self, buf: &mut String, max_chars: usize) -> io::Result<usize> {
        let max_chars = self.max_read.map_or(max_chars, |m| m.min(max_chars));
        let (len_byte, len_char) = prefix_len(self.rest, max_chars);
        buf.push_str(&self.rest[..len_byte]);
        self.rest = &self.rest[len_byte..];
        Ok(len_char)
    }
}

/// Source decoding UTF-8 from a byte reader.
///
/// Keeps pulling from the reader until the request is satisfied or the reader
/// reports its end. A multi-byte sequence split across two reads is carried
/// over to the next call.
pub struct Utf8Source<R> {
    rdr: R,
    pending: Vec<u8>,
    consumed: usize,
    eof: bool,
}

impl<R> Utf8Source<R>
where
    R: Read,
{
    /// Creates a new instance.
    pub fn new(rdr: R) -> Self {
        Self {
            rdr,
            pending: vec![],
            consumed: 0,
            eof: false,
        }
    }

    /// Unwraps the byte reader. Undecoded bytes are lost.
    pub fn into_inner(self) -> R {
        self.rdr
    }

    fn decode_pending(&mut self, buf: &mut String, max_chars: usize) -> io::Result<usize> {
        let bytes = &self.pending[self.consumed..];
        let len_valid = match std::str::from_utf8(bytes) {
            Ok(s) => s.len(),
            Err(e) => {
                if e.valid_up_to() == 0 && e.error_len().is_some() {
                    return Err(io::Error::new(io::ErrorKind::InvalidData, e));
                }
                e.valid_up_to()
            }
        };
        let text = std::str::from_utf8(&bytes[..len_valid])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let (len_byte, len_char) = prefix_len(text, max_chars);
        buf.push_str(&text[..len_byte]);
        self.consumed += len_byte;
        if self.consumed == self.pending.len() {
            self.pending.clear();
            self.consumed = 0;
        }
        Ok(len_char)
    }

    fn fill_pending(&mut self) -> io::Result<()> {
        self.pending.drain(..self.consumed);
        self.consumed = 0;

        let mut chunk = [0; BYTE_BUFFER_SIZE];
        loop {
            match self.rdr.read(&mut chunk) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.pending.extend_from_slice(&chunk[..n]);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R> CharSource for Utf8Source<R>
where
    R: Read,
{
    fn read_chars(&mut self, buf: &mut String, max_chars: usize) -> io::Result<usize> {
        let mut total = 0;
        while total < max_chars {
            total += self.decode_pending(buf, max_chars - total)?;
            if total == max_chars {
                break;
            }
            if self.eof {
                if self.consumed != self.pending.len() {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        "stream did not end at a UTF-8 character boundary",
                    ));
                }
                break;
            }
            self.fill_pending()?;
        }
        Ok(total)
    }
}

/// Returns the byte and character lengths of the longest prefix of `text`
/// holding at most `max_chars` characters.
pub(crate) fn prefix_len(text: &str, max_chars: usize) -> (usize, usize) {
    match text.char_indices().nth(max_chars) {
        Some((len_byte, _)) => (len_byte, max_chars),
        None => (text.len(), text.chars().count()),
    }
}
