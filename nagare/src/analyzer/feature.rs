use std::ops::Range;

use crate::morpheme::Morpheme;
use crate::utils;

/// Placeholder used by MeCab-format dictionaries for an empty column.
const EMPTY_COLUMN: &str = "*";

/// Column positions of the attributes in a feature string.
///
/// Missing or `*` columns fall back: the dictionary form to the surface, the
/// normalized form to the dictionary form, and the reading to an empty string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureLayout {
    part_of_speech: Range<usize>,
    dictionary_form: Option<usize>,
    normalized_form: Option<usize>,
    reading_form: Option<usize>,
}

impl FeatureLayout {
    /// Creates a new layout.
    ///
    /// # Arguments
    ///
    ///  - `part_of_speech`: Columns holding the part-of-speech tags.
    ///  - `dictionary_form`: Column holding the dictionary form.
    ///  - `normalized_form`: Column holding the normalized form.
    ///  - `reading_form`: Column holding the reading.
    pub const fn new(
        part_of_speech: Range<usize>,
        dictionary_form: Option<usize>,
        normalized_form: Option<usize>,
        reading_form: Option<usize>,
    ) -> Self {
        Self {
            part_of_speech,
            dictionary_form,
            normalized_form,
            reading_form,
        }
    }

    /// Layout of IPADIC, e.g., `動詞,自立,*,*,五段・カ行促音便,連用タ接続,行く,イッ,イッ`.
    pub const fn ipadic() -> Self {
        Self::new(0..4, Some(6), None, Some(7))
    }

    /// Layout of UniDic, e.g., `動詞,非自立可能,*,*,五段-カ行,連用形-促音便,イク,行く,行っ,イッ,行く,イク,和,...`.
    pub const fn unidic() -> Self {
        Self::new(0..4, Some(10), Some(7), Some(9))
    }

    /// Builds a morpheme from the surface and feature string of a token.
    pub fn morpheme(&self, surface: &str, feature: &str, range: Range<usize>) -> Morpheme {
        let cols = utils::parse_csv_row(feature);
        let column = |idx: Option<usize>| {
            idx.and_then(|i| cols.get(i))
                .map(String::as_str)
                .filter(|c| !c.is_empty() && *c != EMPTY_COLUMN)
        };

        let dictionary_form = column(self.dictionary_form).unwrap_or(surface);
        let normalized_form = column(self.normalized_form).unwrap_or(dictionary_form);
        let reading_form = column(self.reading_form).unwrap_or("");
        let end = self.part_of_speech.end.min(cols.len());
        let start = self.part_of_speech.start.min(end);
        let part_of_speech = cols[start..end]
            .iter()
            .filter(|c| !c.is_empty() && c.as_str() != EMPTY_COLUMN);

        Morpheme::new(surface, range)
            .with_dictionary_form(dictionary_form)
            .with_normalized_form(normalized_form)
            .with_reading_form(reading_form)
            .with_part_of_speech(part_of_speech)
    }
}

impl Default for FeatureLayout {
    fn default() -> Self {
        Self::ipadic()
    }
}
