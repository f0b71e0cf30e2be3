//! Compiled word lists: encoded entries archived with rkyv for zero-copy
//! id lookup.

use kudylaca_codec::CodecError;
use kudylaca_protocol::{ArchivedLexicon, ArchivedLexiconEntry, Lexicon, LexiconEntry};
use rkyv::check_archived_root;
use thiserror::Error;
use tracing::warn;

use crate::identifier::{EncodedWord, IdOptions, WordIdCodec};

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("lexicon archive failed validation: {0}")]
    Invalid(String),
    #[error("lexicon version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },
}

impl From<&EncodedWord> for LexiconEntry {
    fn from(e: &EncodedWord) -> Self {
        LexiconEntry {
            word: e.word.clone(),
            id: e.id.clone(),
            time: e.analysis.time_prefix,
            modality: e.analysis.modality_flags().bits(),
            suffix: e.analysis.suffix,
            stem: e.analysis.stem.clone(),
        }
    }
}

/// Encodes every word. Words that cannot be encoded are returned alongside
/// instead of aborting the build.
pub fn build_lexicon<'w, I>(
    codec: &WordIdCodec,
    words: I,
    options: &IdOptions,
) -> (Lexicon, Vec<EncodedWord>, Vec<(String, CodecError)>)
where
    I: IntoIterator<Item = &'w str>,
{
    let mut encoded = Vec::new();
    let mut rejected = Vec::new();
    for word in words {
        match codec.encode(word, options) {
            Ok(e) => encoded.push(e),
            Err(err) => {
                warn!(word, error = %err, "word left out of lexicon");
                rejected.push((word.to_string(), err));
            }
        }
    }
    let lexicon = Lexicon::new(encoded.iter().map(LexiconEntry::from).collect());
    (lexicon, encoded, rejected)
}

/// Validates archive bytes. The buffer must be aligned for the archive
/// (an `rkyv::AlignedVec` is).
pub fn load_lexicon(bytes: &[u8]) -> Result<&ArchivedLexicon, LexiconError> {
    let lexicon = check_archived_root::<Lexicon>(bytes)
        .map_err(|e| LexiconError::Invalid(format!("{:?}", e)))?;
    if lexicon.version != Lexicon::VERSION {
        return Err(LexiconError::Version {
            found: lexicon.version,
            expected: Lexicon::VERSION,
        });
    }
    Ok(lexicon)
}

/// Linear scan by identifier.
pub fn lookup<'a>(lexicon: &'a ArchivedLexicon, id: &str) -> Option<&'a ArchivedLexiconEntry> {
    lexicon.entries.iter().find(|e| e.id.as_str() == id)
}
