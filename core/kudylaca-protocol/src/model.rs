use rkyv::{Archive, Deserialize, Serialize};
use crate::affixes::{Modality, ModalityFlags, PosSuffix, TimePrefix};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// How an analysis was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum AnalysisKind {
    /// Prefixes and suffix detected with a valid stem left over.
    Full = 0,
    /// The full pass left an invalid stem; only a suffix was tried.
    Fallback = 1,
}

/// A word split into affixes and a stem.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct AffixAnalysis {
    pub time_prefix: Option<TimePrefix>,
    /// In order of removal from the front of the word.
    pub modality_prefixes: Vec<Modality>,
    pub suffix: Option<PosSuffix>,
    pub stem: String,
    pub kind: AnalysisKind,
}

impl AffixAnalysis {
    /// The word itself as stem, nothing detected.
    pub fn bare(word: &str, kind: AnalysisKind) -> Self {
        Self {
            time_prefix: None,
            modality_prefixes: Vec::new(),
            suffix: None,
            stem: String::from(word),
            kind,
        }
    }

    pub fn has_affixes(&self) -> bool {
        self.time_prefix.is_some() || !self.modality_prefixes.is_empty() || self.suffix.is_some()
    }

    pub fn modality_flags(&self) -> ModalityFlags {
        self.modality_prefixes.iter().copied().collect()
    }

    pub fn grammar(&self) -> GrammarTag {
        GrammarTag {
            time: self.time_prefix,
            modality: self.modality_flags(),
            suffix: self.suffix,
        }
    }

    /// Affixes and stem glued back together without delimiters.
    pub fn surface(&self) -> String {
        let mut out = String::new();
        if let Some(t) = self.time_prefix {
            out.push_str(t.text());
        }
        for m in &self.modality_prefixes {
            out.push_str(m.text());
        }
        out.push_str(&self.stem);
        if let Some(s) = self.suffix {
            out.push_str(s.text());
        }
        out
    }
}

/// Grammar carried by the six-character tag of an identifier.
///
/// Modality is a set: the order prefixes were applied in is not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct GrammarTag {
    pub time: Option<TimePrefix>,
    pub modality: ModalityFlags,
    pub suffix: Option<PosSuffix>,
}

impl GrammarTag {
    pub fn is_empty(&self) -> bool {
        self.time.is_none() && self.modality.is_empty() && self.suffix.is_none()
    }
}

/// One encoded word of a compiled lexicon.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LexiconEntry {
    pub word: String,
    pub id: String,
    pub time: Option<TimePrefix>,
    /// Raw `ModalityFlags` bits.
    pub modality: u8,
    pub suffix: Option<PosSuffix>,
    pub stem: String,
}

impl LexiconEntry {
    pub fn grammar(&self) -> GrammarTag {
        GrammarTag {
            time: self.time,
            modality: ModalityFlags::from_bits_truncate(self.modality),
            suffix: self.suffix,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Lexicon {
    pub version: u32,
    pub entries: Vec<LexiconEntry>,
}

impl Lexicon {
    pub const VERSION: u32 = 1;

    pub fn new(entries: Vec<LexiconEntry>) -> Self {
        Self { version: Self::VERSION, entries }
    }
}
