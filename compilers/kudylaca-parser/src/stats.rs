use std::collections::BTreeMap;

use crate::identifier::EncodedWord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Usage counters, owned by whoever drives the encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UsageStats {
    pub words_processed: u64,
    pub syllables_processed: u64,
    pub grammar_processed: u64,
}

impl UsageStats {
    pub fn record(&mut self, encoded: &EncodedWord) {
        self.words_processed += 1;
        self.syllables_processed += encoded.syllables.len() as u64;
        if encoded.grammar_tag.is_some() {
            self.grammar_processed += 1;
        }
    }

    pub fn merge(&mut self, other: &UsageStats) {
        self.words_processed += other.words_processed;
        self.syllables_processed += other.syllables_processed;
        self.grammar_processed += other.grammar_processed;
    }

    pub fn average_syllables(&self) -> Option<f64> {
        (self.words_processed > 0)
            .then(|| self.syllables_processed as f64 / self.words_processed as f64)
    }
}

/// Number of identifier slots the collision estimate assumes.
///
/// This is a fixed approximation and does not follow from the identifier
/// alphabet or length.
pub const COLLISION_SLOTS: u64 = 1024;

/// Birthday estimate `1 - (1 - 1/1024)^(n(n-1)/2)`, saturating at 1.0 above
/// 1024 words.
pub fn collision_probability(word_count: u64) -> f64 {
    if word_count > COLLISION_SLOTS {
        return 1.0;
    }
    let n = word_count as f64;
    let pairs = n * (n - 1.0) / 2.0;
    1.0 - (1.0 - 1.0 / COLLISION_SLOTS as f64).powf(pairs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CollisionRisk {
    VeryLow,
    Low,
    Moderate,
    High,
}

impl CollisionRisk {
    pub fn from_probability(p: f64) -> Self {
        if p < 0.0001 {
            CollisionRisk::VeryLow
        } else if p < 0.01 {
            CollisionRisk::Low
        } else if p < 0.1 {
            CollisionRisk::Moderate
        } else {
            CollisionRisk::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CollisionRisk::VeryLow => "very low",
            CollisionRisk::Low => "low",
            CollisionRisk::Moderate => "moderate",
            CollisionRisk::High => "high",
        }
    }
}

/// Identifiers shared by more than one distinct word.
pub fn find_collisions<'a, I>(encoded: I) -> BTreeMap<String, Vec<String>>
where
    I: IntoIterator<Item = &'a EncodedWord>,
{
    let mut by_id: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for e in encoded {
        let words = by_id.entry(e.id.clone()).or_default();
        if !words.contains(&e.word) {
            words.push(e.word.clone());
        }
    }
    by_id.retain(|_, words| words.len() > 1);
    by_id
}
