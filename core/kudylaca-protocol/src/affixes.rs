use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// Tense marker. Exactly one may open a word (priority 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum TimePrefix {
    Past = 0,    // ha
    Present = 1, // ake
    Future = 2,  // ka
}

impl TimePrefix {
    pub const ALL: [TimePrefix; 3] = [TimePrefix::Past, TimePrefix::Present, TimePrefix::Future];

    pub const fn text(self) -> &'static str {
        match self {
            TimePrefix::Past => "ha",
            TimePrefix::Present => "ake",
            TimePrefix::Future => "ka",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TimePrefix::Past => "Past tense",
            TimePrefix::Present => "Present tense",
            TimePrefix::Future => "Future tense",
        }
    }

    /// Two-character grammar tag field.
    pub const fn tag(self) -> &'static str {
        match self {
            TimePrefix::Past => "TP",
            TimePrefix::Present => "TN",
            TimePrefix::Future => "TF",
        }
    }

    pub const fn priority(self) -> u8 {
        1
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    pub fn from_text(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.text() == text)
    }
}

/// Modality marker. Zero or more may follow the tense marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Modality {
    Absoluteness = 0,   // to
    Indefiniteness = 1, // te
    Absence = 2,        // ta
}

impl Modality {
    /// Canonical order, which is also ascending priority.
    pub const ALL: [Modality; 3] = [Modality::Absoluteness, Modality::Indefiniteness, Modality::Absence];

    pub const fn text(self) -> &'static str {
        match self {
            Modality::Absoluteness => "to",
            Modality::Indefiniteness => "te",
            Modality::Absence => "ta",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Modality::Absoluteness => "Absoluteness",
            Modality::Indefiniteness => "Indefiniteness",
            Modality::Absence => "Absence",
        }
    }

    pub const fn priority(self) -> u8 {
        match self {
            Modality::Absoluteness => 2,
            Modality::Indefiniteness => 3,
            Modality::Absence => 4,
        }
    }

    pub const fn flag(self) -> ModalityFlags {
        match self {
            Modality::Absoluteness => ModalityFlags::TO,
            Modality::Indefiniteness => ModalityFlags::TE,
            Modality::Absence => ModalityFlags::TA,
        }
    }

    pub fn from_text(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.text() == text)
    }
}

/// Part-of-speech suffix. At most one closes a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PosSuffix {
    Participle = 0, // yepi
    Gerund = 1,     // yemu
    Adjective = 2,  // pi
    Verb = 3,       // ye
    Adverb = 4,     // mu
}

impl PosSuffix {
    pub const ALL: [PosSuffix; 5] = [
        PosSuffix::Participle,
        PosSuffix::Gerund,
        PosSuffix::Adjective,
        PosSuffix::Verb,
        PosSuffix::Adverb,
    ];

    pub const fn text(self) -> &'static str {
        match self {
            PosSuffix::Participle => "yepi",
            PosSuffix::Gerund => "yemu",
            PosSuffix::Adjective => "pi",
            PosSuffix::Verb => "ye",
            PosSuffix::Adverb => "mu",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PosSuffix::Participle => "Participle",
            PosSuffix::Gerund => "Gerund",
            PosSuffix::Adjective => "Adjective",
            PosSuffix::Verb => "Verb",
            PosSuffix::Adverb => "Adverb",
        }
    }

    /// Two-character grammar tag field.
    pub const fn tag(self) -> &'static str {
        match self {
            PosSuffix::Participle => "SP",
            PosSuffix::Gerund => "SG",
            PosSuffix::Adjective => "SA",
            PosSuffix::Verb => "SV",
            PosSuffix::Adverb => "SD",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.tag() == tag)
    }

    pub fn from_text(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.text() == text)
    }
}

/// Any prefix of the inventory, with its detection priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub enum Prefix {
    Time(TimePrefix),
    Modality(Modality),
}

impl Prefix {
    pub const fn text(self) -> &'static str {
        match self {
            Prefix::Time(t) => t.text(),
            Prefix::Modality(m) => m.text(),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Prefix::Time(t) => t.label(),
            Prefix::Modality(m) => m.label(),
        }
    }

    pub const fn priority(self) -> u8 {
        match self {
            Prefix::Time(t) => t.priority(),
            Prefix::Modality(m) => m.priority(),
        }
    }
}

bitflags! {
    /// Modality set as carried in the grammar tag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct ModalityFlags: u8 {
        const TO = 1;
        const TE = 2;
        const TA = 4;
    }
}

impl ModalityFlags {
    /// Members in canonical order (`to`, `te`, `ta`).
    pub fn modalities(self) -> impl Iterator<Item = Modality> {
        Modality::ALL.into_iter().filter(move |m| self.contains(m.flag()))
    }
}

impl FromIterator<Modality> for ModalityFlags {
    fn from_iter<I: IntoIterator<Item = Modality>>(iter: I) -> Self {
        iter.into_iter().fold(ModalityFlags::empty(), |acc, m| acc | m.flag())
    }
}
