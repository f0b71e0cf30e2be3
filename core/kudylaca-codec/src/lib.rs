//! Fixed-width codecs behind Kudylaca word identifiers: letter codes, base-32
//! fields, syllable codes and the grammar tag.

pub mod error;
pub mod grammar;
pub mod symbol;
pub mod syllable;

pub use error::CodecError;
pub use grammar::{decode_grammar_tag, encode_grammar_tag, TAG_WIDTH};
pub use symbol::{base32_to_int, code_to_letter, int_to_base32, letter_to_code, FIELD_WIDTH, UNKNOWN_LETTER};
pub use syllable::{decode_syllable, encode_syllable, EMPTY_SYLLABLE};
