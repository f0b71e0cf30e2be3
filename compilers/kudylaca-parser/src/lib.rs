pub mod affix;
pub mod identifier;
pub mod lexicon;
pub mod parser;
pub mod report;
pub mod stats;
pub mod syllables;
pub mod token;

pub use affix::{AffixDetector, AffixStrategy, PriorityAffixes, SuffixFallback};
pub use identifier::{analyze, decode, encode, DecodedWord, EncodedWord, IdOptions, WordIdCodec};
pub use kudylaca_codec::CodecError;
pub use lexicon::{build_lexicon, load_lexicon, lookup, LexiconError};
pub use report::{affix_inventory, describe, AffixInfo, AffixKind, GrammarReport, SAMPLE_WORDS};
pub use stats::{collision_probability, find_collisions, CollisionRisk, UsageStats, COLLISION_SLOTS};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_text_to_ids() {
        let codec = WordIdCodec::default();
        let options = IdOptions::default();
        let mut stats = UsageStats::default();

        let text = "ab, hatotalaye. ha-la-ye";
        let mut ids = Vec::new();
        for word in parser::split_words(text) {
            let encoded = codec.encode(word, &options).unwrap();
            stats.record(&encoded);
            ids.push(encoded.id);
        }

        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], "01L1000000");
        assert_eq!(stats.words_processed, 3);
        assert_eq!(stats.syllables_processed, 1 + 6 + 3);

        let back: Vec<String> = ids
            .iter()
            .map(|id| codec.decode(id, &options).unwrap().word)
            .collect();
        assert_eq!(back, vec!["ab", "ha-to-ta-la-y-e", "ha-la-ye"]);
    }

    #[test]
    fn test_samples_never_panic() {
        let codec = WordIdCodec::default();
        for word in SAMPLE_WORDS {
            let report = codec.describe(word);
            assert!(!report.syllables.is_empty());
            match codec.encode(word, &IdOptions::default()) {
                Ok(encoded) => {
                    let decoded = codec.decode(&encoded.id, &IdOptions::default()).unwrap();
                    assert_eq!(decoded.grammar.unwrap(), encoded.analysis.grammar());
                }
                Err(err) => assert!(matches!(err, CodecError::SyllableOverflow { .. })),
            }
        }
    }

    proptest! {
        // Letters outside every affix, so nothing is stripped.
        #[test]
        fn test_short_word_round_trip(word in "[bcdfgjlnrsvwxz]?[aeiou][bcdfgjlnrsvwxz]?") {
            let options = IdOptions::default();
            if let Ok(encoded) = encode(&word, &options) {
                prop_assert!(!encoded.analysis.has_affixes());
                let decoded = decode(&encoded.id, &options).unwrap();
                prop_assert_eq!(decoded.word, word);
            }
        }

        #[test]
        fn test_round_trip_without_delimiter(word in "[bcdfghjklmnpqrstvwxzaeiouy]{1,10}") {
            let options = IdOptions { delimiter: String::new(), ..IdOptions::default() };
            if let Ok(encoded) = encode(&word, &options) {
                let decoded = decode(&encoded.id, &options).unwrap();
                prop_assert_eq!(decoded.grammar, Some(encoded.analysis.grammar()));
                prop_assert_eq!(decoded.word, word);
            }
        }
    }
}
