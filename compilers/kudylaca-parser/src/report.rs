use kudylaca_protocol::alphabet::{is_valid_stem, syllable_estimate};
use kudylaca_protocol::{AffixAnalysis, Modality, PosSuffix, TimePrefix};

use crate::identifier::{normalize, WordIdCodec};
use crate::syllables::word_to_syllables;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Demonstration words covering short stems and every affix kind.
pub const SAMPLE_WORDS: &[&str] = &[
    "happy", "running", "play", "quickly", "eating",
    "abpi", "baye", "comu", "deyepi", "fiyemu",
    "happyye", "happymu", "ab", "ba", "pi",
    "totalayepi", "totalaye", "aketotalaye", "tototalaye",
    "hatotalaye", "katotalaye", "tatotalaye", "tetotalaye",
    "aketotetalaniye",
];

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GrammarReport {
    pub word: String,
    pub analysis: AffixAnalysis,
    pub syllables: Vec<String>,
    pub notes: Vec<String>,
}

impl WordIdCodec {
    pub fn describe(&self, word: &str) -> GrammarReport {
        let word = normalize(word);
        let analysis = self.detector().analyze(&word);
        let syllables = word_to_syllables(&word, "-", &analysis);
        let notes = grammar_notes(&analysis);
        GrammarReport {
            word,
            analysis,
            syllables,
            notes,
        }
    }
}

pub fn describe(word: &str) -> GrammarReport {
    WordIdCodec::default().describe(word)
}

fn grammar_notes(analysis: &AffixAnalysis) -> Vec<String> {
    let mut notes = Vec::new();

    if let Some(t) = analysis.time_prefix {
        notes.push(format!("Tense: {}", t.label()));
    }

    if !analysis.modality_prefixes.is_empty() {
        let labels: Vec<&str> = analysis.modality_prefixes.iter().map(|m| m.label()).collect();
        notes.push(format!("Modality: {}", labels.join(", ")));
        if analysis.modality_prefixes.len() >= 2 {
            notes.push("Compound modal construction".to_string());
        }
    }

    if let Some(s) = analysis.suffix {
        notes.push(format!("Part of speech: {}", s.label()));
    }

    if is_valid_stem(&analysis.stem) {
        let n = syllable_estimate(&analysis.stem);
        let plural = if n == 1 { "" } else { "s" };
        notes.push(format!("Stem: {} ({} syllable{})", analysis.stem, n, plural));
    } else {
        notes.push(format!("Stem: {} (short stem)", analysis.stem));
    }

    notes
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum AffixKind {
    Time,
    Modality,
    Suffix,
}

impl AffixKind {
    pub fn name(self) -> &'static str {
        match self {
            AffixKind::Time => "time",
            AffixKind::Modality => "modality",
            AffixKind::Suffix => "suffix",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AffixInfo {
    pub kind: AffixKind,
    pub label: &'static str,
    pub affix: &'static str,
    pub example: String,
}

/// Every affix the detector knows, prefixes first.
pub fn affix_inventory() -> Vec<AffixInfo> {
    let time = TimePrefix::ALL.into_iter().map(|t| AffixInfo {
        kind: AffixKind::Time,
        label: t.label(),
        affix: t.text(),
        example: format!("{}word", t.text()),
    });
    let modality = Modality::ALL.into_iter().map(|m| AffixInfo {
        kind: AffixKind::Modality,
        label: m.label(),
        affix: m.text(),
        example: format!("{}word", m.text()),
    });
    let suffix = PosSuffix::ALL.into_iter().map(|s| AffixInfo {
        kind: AffixKind::Suffix,
        label: s.label(),
        affix: s.text(),
        example: format!("word{}", s.text()),
    });
    time.chain(modality).chain(suffix).collect()
}
