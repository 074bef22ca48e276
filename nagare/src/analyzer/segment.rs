/// Characters after which a sentence may be cut.
const SENTENCE_TERMINATORS: &[char] = &['。', '！', '？', '!', '?', '.', '\n'];

/// Iterator splitting a text into pieces of at most `max_len` characters.
///
/// A piece ends right after the last sentence terminator inside the window if
/// there is one, otherwise exactly at the window. Yields the starting position
/// of each piece in characters together with the piece.
pub struct Segments<'a> {
    text: &'a str,
    max_len: usize,
    start_char: usize,
}

impl<'a> Segments<'a> {
    pub fn new(text: &'a str, max_len: usize) -> Self {
        debug_assert_ne!(max_len, 0);
        Self {
            text,
            max_len,
            start_char: 0,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.text.is_empty() {
            return None;
        }
        // No more characters than bytes
        if self.text.len() <= self.max_len {
            let piece = self.text;
            let start_char = self.start_char;
            self.text = "";
            self.start_char += piece.chars().count();
            return Some((start_char, piece));
        }

        let mut window_end = self.text.len();
        let mut window_len = 0;
        let mut cut = None;
        for (i, (bi, ch)) in self.text.char_indices().enumerate() {
            if i == self.max_len {
                window_end = bi;
                break;
            }
            window_len = i + 1;
            if SENTENCE_TERMINATORS.contains(&ch) {
                cut = Some((bi + ch.len_utf8(), window_len));
            }
        }

        let (len_byte, len_char) = if window_end == self.text.len() {
            (window_end, window_len)
        } else {
            cut.unwrap_or((window_end, window_len))
        };

        let piece = &self.text[..len_byte];
        let start_char = self.start_char;
        self.text = &self.text[len_byte..];
        self.start_char += len_char;
        Some((start_char, piece))
    }
}
