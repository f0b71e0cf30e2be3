use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("value {value} does not fit in a two-symbol field (limit {limit})")]
    ValueOverflow { value: u64, limit: u32 },

    #[error("syllable '{syllable}' encodes to {value}, beyond the two-symbol capacity")]
    SyllableOverflow { syllable: String, value: u64 },

    #[error("{letter:?} at position {position} is not a Kudylaca letter")]
    UnsupportedLetter { letter: char, position: usize },

    #[error("invalid base-32 symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("malformed identifier '{id}': {reason}")]
    MalformedIdentifier { id: String, reason: String },

    #[error("cannot encode an empty word")]
    EmptyWord,
}

impl CodecError {
    pub fn malformed(id: &str, reason: impl Into<String>) -> Self {
        CodecError::MalformedIdentifier {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
