//! # Nagare
//!
//! Nagare tokenizes text of unbounded length with a morphological analyzer
//! that only handles bounded text. The input is read chunk by chunk into a
//! buffer that grows adaptively, each chunk is analyzed at once, and the
//! resulting morphemes are emitted as tokens whose offsets refer to the whole
//! input.
//!
//! ```
//! use nagare::dictionary::SystemDictionaryBuilder;
//! use nagare::source::StrSource;
//! use nagare::token::TokenStream;
//! use nagare::{ChunkedTokenizer, VibratoAnalyzer};
//!
//! let lex_csv = "東京,0,0,1,名詞,固有名詞,地域,一般,*,*,東京,トウキョウ,トーキョー
//! に,0,0,1,助詞,格助詞,一般,*,*,*,に,ニ,ニ
//! 。,0,0,1,記号,句点,*,*,*,*,。,。,。";
//! let matrix_def = "1 1\n0 0 0";
//! let char_def = "DEFAULT 0 1 0";
//! let unk_def = "DEFAULT,0,0,100,名詞,一般,*,*,*,*,*";
//! let dict = SystemDictionaryBuilder::from_readers(
//!     lex_csv.as_bytes(),
//!     matrix_def.as_bytes(),
//!     char_def.as_bytes(),
//!     unk_def.as_bytes(),
//! )
//! .unwrap();
//!
//! let mut tokenizer = ChunkedTokenizer::new(VibratoAnalyzer::from_dictionary(dict));
//! tokenizer.set_input(StrSource::new("東京に。"));
//!
//! let mut tokens = vec![];
//! while let Some(token) = tokenizer.next_token().unwrap() {
//!     tokens.push((token.text.clone(), token.range_char()));
//! }
//! assert_eq!(
//!     tokens,
//!     vec![("東京".to_string(), 0..2), ("に".to_string(), 2..3)]
//! );
//! assert_eq!(tokenizer.end(), 4..4);
//! ```
#![deny(missing_docs)]

#[cfg(target_pointer_width = "16")]
compile_error!("`target_pointer_width` must be larger than or equal to 32");

pub mod analyzer;
pub mod char_filter;
pub mod chunk;
pub mod common;
pub mod errors;
pub mod filter;
pub mod morpheme;
pub mod source;
pub mod token;
pub mod tokenizer;
mod utils;

#[cfg(test)]
mod test_utils;

pub use vibrato::dictionary;

pub use analyzer::{Analyzer, VibratoAnalyzer};
pub use morpheme::Morpheme;
pub use tokenizer::ChunkedTokenizer;
