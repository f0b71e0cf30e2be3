//! Affix detection as an ordered chain of strategies.
//!
//! The first strategy that produces an analysis wins. The standard chain runs
//! the full prefix/suffix pass and, when that leaves an invalid stem, a
//! suffix-only fallback.

use kudylaca_protocol::alphabet::is_valid_stem;
use kudylaca_protocol::{AffixAnalysis, AnalysisKind, Modality, PosSuffix, TimePrefix};
use tracing::debug;

pub trait AffixStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` hands the word to the next strategy.
    fn analyze(&self, word: &str) -> Option<AffixAnalysis>;
}

/// Time prefixes, longest first.
pub fn time_prefix_order() -> Vec<TimePrefix> {
    let mut order = TimePrefix::ALL.to_vec();
    order.sort_by_key(|t| core::cmp::Reverse(t.text().len()));
    order
}

/// Modality prefixes, ascending priority.
pub fn modality_order() -> Vec<Modality> {
    let mut order = Modality::ALL.to_vec();
    order.sort_by_key(|m| m.priority());
    order
}

/// Suffixes, longest first.
pub fn suffix_order() -> Vec<PosSuffix> {
    let mut order = PosSuffix::ALL.to_vec();
    order.sort_by_key(|s| core::cmp::Reverse(s.text().len()));
    order
}

/// Time prefix, then modality prefixes, then one suffix. Gives up when the
/// remaining stem is not valid.
#[derive(Debug, Clone)]
pub struct PriorityAffixes {
    time: Vec<TimePrefix>,
    modality: Vec<Modality>,
    suffixes: Vec<PosSuffix>,
}

impl Default for PriorityAffixes {
    fn default() -> Self {
        Self {
            time: time_prefix_order(),
            modality: modality_order(),
            suffixes: suffix_order(),
        }
    }
}

impl PriorityAffixes {
    fn strip_time<'w>(&self, word: &'w str) -> (Option<TimePrefix>, &'w str) {
        for &t in &self.time {
            if let Some(rest) = word.strip_prefix(t.text()) {
                if is_valid_stem(rest) {
                    return (Some(t), rest);
                }
            }
        }
        (None, word)
    }

    /// A modality prefix is only taken if what follows still analyses to a
    /// valid stem, with or without a suffix.
    fn leaves_valid_stem(&self, rest: &str) -> bool {
        let with_suffix = self.suffixes.iter().any(|s| {
            rest.strip_suffix(s.text()).map_or(false, is_valid_stem)
        });
        with_suffix || is_valid_stem(rest)
    }

    fn strip_modality<'w>(&self, mut word: &'w str) -> (Vec<Modality>, &'w str) {
        let mut found = Vec::new();
        'scan: loop {
            for &m in &self.modality {
                if let Some(rest) = word.strip_prefix(m.text()) {
                    if self.leaves_valid_stem(rest) {
                        found.push(m);
                        word = rest;
                        continue 'scan;
                    }
                }
            }
            break;
        }
        (found, word)
    }

    fn strip_suffix<'w>(&self, word: &'w str) -> (Option<PosSuffix>, &'w str) {
        for &s in &self.suffixes {
            if let Some(stem) = word.strip_suffix(s.text()) {
                if is_valid_stem(stem) {
                    return (Some(s), stem);
                }
            }
        }
        (None, word)
    }
}

impl AffixStrategy for PriorityAffixes {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn analyze(&self, word: &str) -> Option<AffixAnalysis> {
        let (time_prefix, rest) = self.strip_time(word);
        let (modality_prefixes, rest) = self.strip_modality(rest);
        let (suffix, stem) = self.strip_suffix(rest);

        if !is_valid_stem(stem) {
            return None;
        }

        Some(AffixAnalysis {
            time_prefix,
            modality_prefixes,
            suffix,
            stem: stem.to_string(),
            kind: AnalysisKind::Full,
        })
    }
}

/// Suffix only, needing two letters in front of it. Always answers.
#[derive(Debug, Clone)]
pub struct SuffixFallback {
    suffixes: Vec<PosSuffix>,
}

impl Default for SuffixFallback {
    fn default() -> Self {
        Self { suffixes: suffix_order() }
    }
}

impl AffixStrategy for SuffixFallback {
    fn name(&self) -> &'static str {
        "suffix-fallback"
    }

    fn analyze(&self, word: &str) -> Option<AffixAnalysis> {
        let mut analysis = AffixAnalysis::bare(word, AnalysisKind::Fallback);
        for &s in &self.suffixes {
            if let Some(stem) = word.strip_suffix(s.text()) {
                if stem.chars().count() >= 2 {
                    analysis.suffix = Some(s);
                    analysis.stem = stem.to_string();
                    break;
                }
            }
        }
        Some(analysis)
    }
}

pub struct AffixDetector {
    strategies: Vec<Box<dyn AffixStrategy>>,
}

impl Default for AffixDetector {
    fn default() -> Self {
        Self::new(vec![
            Box::new(PriorityAffixes::default()),
            Box::new(SuffixFallback::default()),
        ])
    }
}

impl AffixDetector {
    pub fn new(strategies: Vec<Box<dyn AffixStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Expects a normalized (trimmed, lowercase) word.
    pub fn analyze(&self, word: &str) -> AffixAnalysis {
        for strategy in &self.strategies {
            if let Some(analysis) = strategy.analyze(word) {
                debug!(word, strategy = strategy.name(), stem = %analysis.stem, "affixes detected");
                return analysis;
            }
        }
        // Only reached with a chain that lacks a catch-all strategy.
        AffixAnalysis::bare(word, AnalysisKind::Fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_priority_tables() {
        let time: Vec<&str> = time_prefix_order().iter().map(|t| t.text()).collect();
        assert_eq!(time, vec!["ake", "ha", "ka"]);
        let modality: Vec<&str> = modality_order().iter().map(|m| m.text()).collect();
        assert_eq!(modality, vec!["to", "te", "ta"]);
        let suffixes: Vec<&str> = suffix_order().iter().map(|s| s.text()).collect();
        assert_eq!(suffixes, vec!["yepi", "yemu", "pi", "ye", "mu"]);
    }

    #[test]
    fn test_worked_example() {
        let analysis = AffixDetector::default().analyze("hatotalaye");
        assert_eq!(analysis.kind, AnalysisKind::Full);
        assert_eq!(analysis.time_prefix, Some(TimePrefix::Past));
        // "ta" is stripped too: "laye" still splits into "la" + "ye"
        assert_eq!(analysis.modality_prefixes, vec![Modality::Absoluteness, Modality::Absence]);
        assert_eq!(analysis.suffix, Some(PosSuffix::Verb));
        assert_eq!(analysis.stem, "la");
    }

    #[test]
    fn test_time_prefix_first() {
        // "ka" after "ha" is stem text, not a second time prefix
        let analysis = AffixDetector::default().analyze("hakalaye");
        assert_eq!(analysis.time_prefix, Some(TimePrefix::Past));
        assert!(analysis.modality_prefixes.is_empty());
        assert_eq!(analysis.stem, "kala");
    }

    #[test]
    fn test_longest_time_prefix() {
        let analysis = AffixDetector::default().analyze("aketotalaye");
        assert_eq!(analysis.time_prefix, Some(TimePrefix::Present));
        assert_eq!(analysis.modality_prefixes[0], Modality::Absoluteness);
    }

    #[test]
    fn test_modality_needs_valid_remainder() {
        // "tobc": stripping "to" leaves "bc", which has no vowel
        let analysis = AffixDetector::default().analyze("tobca");
        assert_eq!(analysis.modality_prefixes, vec![Modality::Absoluteness]);
        let analysis = AffixDetector::default().analyze("tobc");
        assert!(analysis.modality_prefixes.is_empty());
    }

    #[test]
    fn test_longest_suffix() {
        let analysis = AffixDetector::default().analyze("deyepi");
        assert_eq!(analysis.suffix, Some(PosSuffix::Participle));
        assert_eq!(analysis.stem, "de");
    }

    #[test]
    fn test_no_affixes() {
        let analysis = AffixDetector::default().analyze("ab");
        assert!(!analysis.has_affixes());
        assert_eq!(analysis.stem, "ab");
        assert_eq!(analysis.kind, AnalysisKind::Full);
    }

    #[test]
    fn test_fallback() {
        let detector = AffixDetector::default();
        for word in ["a", "bcd", ""] {
            let analysis = detector.analyze(word);
            assert_eq!(analysis.kind, AnalysisKind::Fallback);
            assert!(!analysis.has_affixes());
            assert_eq!(analysis.stem, word);
        }

        // the suffix would leave nothing, so "pi" is its own stem
        let analysis = detector.analyze("pi");
        assert_eq!(analysis.kind, AnalysisKind::Full);
        assert_eq!(analysis.suffix, None);
        assert_eq!(analysis.stem, "pi");
    }

    #[test]
    fn test_fallback_only_needs_two_letters() {
        let analysis = SuffixFallback::default().analyze("bcpi").unwrap();
        assert_eq!(analysis.kind, AnalysisKind::Fallback);
        assert_eq!(analysis.suffix, Some(PosSuffix::Adjective));
        assert_eq!(analysis.stem, "bc");
    }

    #[test]
    fn test_custom_chain() {
        let detector = AffixDetector::new(vec![Box::new(SuffixFallback::default())]);
        assert_eq!(detector.strategy_names(), vec!["suffix-fallback"]);
        let analysis = detector.analyze("hatalaye");
        assert_eq!(analysis.time_prefix, None);
        assert_eq!(analysis.suffix, Some(PosSuffix::Verb));

        let empty = AffixDetector::new(Vec::new());
        assert_eq!(empty.analyze("hala").stem, "hala");
    }

    proptest! {
        #[test]
        fn test_analyze_is_idempotent(word in "[bcdfghjklmnpqrstvwxzaeiouy]{0,12}") {
            let detector = AffixDetector::default();
            let first = detector.analyze(&word);
            prop_assert_eq!(first.surface(), word.clone());
            let second = detector.analyze(&first.surface());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn test_full_analysis_has_valid_stem(word in "[a-z]{0,12}") {
            let analysis = AffixDetector::default().analyze(&word);
            if analysis.kind == AnalysisKind::Full {
                prop_assert!(is_valid_stem(&analysis.stem));
            }
        }
    }
}
