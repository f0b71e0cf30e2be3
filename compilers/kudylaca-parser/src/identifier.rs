//! Identifier layout: `[length][syllable codes...][grammar tag]`.
//!
//! Every field is fixed width and found by position; there are no
//! separators inside an identifier.

use kudylaca_codec::{
    base32_to_int, decode_grammar_tag, decode_syllable, encode_grammar_tag, encode_syllable,
    int_to_base32, CodecError, FIELD_WIDTH, TAG_WIDTH,
};
use kudylaca_protocol::alphabet::{base32_digit, is_base32_symbol, is_letter};
use kudylaca_protocol::{AffixAnalysis, GrammarTag, Modality, ModalityFlags};
use nom::{bytes::complete::take_while_m_n, multi::count, IResult};
use tracing::{debug, trace};

use crate::affix::AffixDetector;
use crate::syllables::word_to_syllables;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IdOptions {
    /// Syllable separator accepted on encode and used to join on decode.
    pub delimiter: String,
    pub include_length: bool,
    pub include_grammar: bool,
}

impl Default for IdOptions {
    fn default() -> Self {
        Self {
            delimiter: "-".to_string(),
            include_length: true,
            include_grammar: true,
        }
    }
}

impl IdOptions {
    /// Default options without the length field.
    pub fn compact() -> Self {
        Self {
            include_length: false,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EncodedWord {
    pub id: String,
    /// The input after trimming and lowercasing.
    pub word: String,
    pub analysis: AffixAnalysis,
    pub syllables: Vec<String>,
    pub grammar_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DecodedWord {
    pub word: String,
    pub syllables: Vec<String>,
    pub grammar: Option<GrammarTag>,
}

pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Word to identifier and back.
#[derive(Default)]
pub struct WordIdCodec {
    detector: AffixDetector,
}

impl WordIdCodec {
    pub fn new(detector: AffixDetector) -> Self {
        Self { detector }
    }

    pub fn detector(&self) -> &AffixDetector {
        &self.detector
    }

    pub fn analyze(&self, word: &str) -> AffixAnalysis {
        self.detector.analyze(&normalize(word))
    }

    pub fn encode(&self, word: &str, options: &IdOptions) -> Result<EncodedWord, CodecError> {
        let word = normalize(word);
        if word.is_empty() {
            return Err(CodecError::EmptyWord);
        }
        check_letters(&word, &options.delimiter)?;

        // Grammar is read from the letters alone.
        let letters = if options.delimiter.is_empty() {
            word.clone()
        } else {
            word.replace(options.delimiter.as_str(), "")
        };
        let analysis = self.detector.analyze(&letters);
        let syllables = word_to_syllables(&word, &options.delimiter, &analysis);

        let mut id = String::with_capacity(FIELD_WIDTH * (syllables.len() + 1) + TAG_WIDTH);
        if options.include_length {
            let n = u32::try_from(syllables.len()).unwrap_or(u32::MAX);
            id.push_str(&int_to_base32(n)?);
        }
        for syllable in &syllables {
            let code = encode_syllable(syllable)?;
            trace!(syllable = %syllable, code = %code, "syllable encoded");
            id.push_str(&code);
        }

        let grammar_tag = options
            .include_grammar
            .then(|| encode_grammar_tag(&analysis.grammar()));
        if let Some(tag) = &grammar_tag {
            id.push_str(tag);
        }

        debug!(word = %word, id = %id, syllables = syllables.len(), "word encoded");
        Ok(EncodedWord {
            id,
            word,
            analysis,
            syllables,
            grammar_tag,
        })
    }

    pub fn decode(&self, id: &str, options: &IdOptions) -> Result<DecodedWord, CodecError> {
        decode(id, options)
    }
}

pub fn analyze(word: &str) -> AffixAnalysis {
    WordIdCodec::default().analyze(word)
}

pub fn encode(word: &str, options: &IdOptions) -> Result<EncodedWord, CodecError> {
    WordIdCodec::default().encode(word, options)
}

/// Every character must be a letter or part of the delimiter. Positions count
/// characters of the normalized word.
fn check_letters(word: &str, delimiter: &str) -> Result<(), CodecError> {
    let mut rest = word;
    let mut position = 0;
    while let Some(c) = rest.chars().next() {
        if !delimiter.is_empty() && rest.starts_with(delimiter) {
            position += delimiter.chars().count();
            rest = &rest[delimiter.len()..];
            continue;
        }
        if !is_letter(c) {
            return Err(CodecError::UnsupportedLetter { letter: c, position });
        }
        position += 1;
        rest = &rest[c.len_utf8()..];
    }
    Ok(())
}

fn field(input: &str) -> IResult<&str, &str> {
    take_while_m_n(FIELD_WIDTH, FIELD_WIDTH, is_base32_symbol)(input)
}

/// Strict: a wrong length, a length field that disagrees with the payload or
/// a symbol outside the alphabet is an error.
pub fn decode(id: &str, options: &IdOptions) -> Result<DecodedWord, CodecError> {
    let id = id.trim();
    if let Some((position, symbol)) = id.chars().enumerate().find(|(_, c)| base32_digit(*c).is_none()) {
        return Err(CodecError::InvalidSymbol { symbol, position });
    }

    // All ASCII from here, so byte offsets are symbol offsets.
    let mut body = id;
    let grammar = if options.include_grammar {
        if body.len() < TAG_WIDTH {
            return Err(CodecError::malformed(id, "shorter than the grammar tag"));
        }
        let (head, tag) = body.split_at(body.len() - TAG_WIDTH);
        body = head;
        Some(decode_grammar_tag(tag)?)
    } else {
        None
    };

    let (payload, syllable_count) = if options.include_length {
        let (rest, length_field) =
            field(body).map_err(|_| CodecError::malformed(id, "missing length field"))?;
        (rest, base32_to_int(length_field)? as usize)
    } else {
        if body.len() % FIELD_WIDTH != 0 {
            return Err(CodecError::malformed(id, "odd number of syllable symbols"));
        }
        (body, body.len() / FIELD_WIDTH)
    };

    if payload.len() != syllable_count * FIELD_WIDTH {
        return Err(CodecError::malformed(
            id,
            format!("length field says {} syllables, payload holds {} symbols", syllable_count, payload.len()),
        ));
    }
    let (_, codes) = count(field, syllable_count)(payload)
        .map_err(|_| CodecError::malformed(id, "truncated syllable code"))?;

    let syllables = codes
        .into_iter()
        .map(decode_syllable)
        .collect::<Result<Vec<_>, _>>()?;

    let word = match &grammar {
        Some(tag) => restore_affixes(&syllables, tag, &options.delimiter),
        None => syllables.join(&options.delimiter),
    };

    debug!(id, word = %word, "identifier decoded");
    Ok(DecodedWord {
        word,
        syllables,
        grammar,
    })
}

/// Joins the syllables and adds back any affix of the tag that the
/// syllables do not already spell out. Missing modality prefixes come back in
/// canonical order.
pub fn restore_affixes(syllables: &[String], tag: &GrammarTag, delimiter: &str) -> String {
    let mut word = syllables.join(delimiter);
    let letters: String = syllables.concat();
    let mut rest = letters.as_str();

    let mut time_present = false;
    if let Some(t) = tag.time {
        if let Some(after) = rest.strip_prefix(t.text()) {
            rest = after;
            time_present = true;
        }
    }

    // Prefixes of the set may repeat and come in any order.
    let mut seen = ModalityFlags::empty();
    while let Some(m) = tag.modality.modalities().find(|m| rest.starts_with(m.text())) {
        rest = &rest[m.text().len()..];
        seen |= m.flag();
    }

    let pending: Vec<Modality> = tag.modality.difference(seen).modalities().collect();
    if !pending.is_empty() {
        let missing: String = pending.iter().map(|m| m.text()).collect();
        let at = match tag.time {
            Some(t) if time_present && word.starts_with(t.text()) => t.text().len(),
            _ => 0,
        };
        word.insert_str(at, &missing);
    }

    if let Some(t) = tag.time {
        if !time_present {
            word.insert_str(0, t.text());
        }
    }

    if let Some(s) = tag.suffix {
        if !letters.ends_with(s.text()) {
            word.push_str(s.text());
        }
    }

    word
}

#[cfg(test)]
mod tests {
    use super::*;
    use kudylaca_protocol::{PosSuffix, TimePrefix};

    #[test]
    fn test_encode_two_letter_word() {
        let encoded = encode("ab", &IdOptions::default()).unwrap();
        assert_eq!(encoded.id, "01L1000000");
        assert_eq!(encoded.syllables, vec!["ab"]);
        assert_eq!(encoded.grammar_tag.as_deref(), Some("000000"));

        let decoded = decode(&encoded.id, &IdOptions::default()).unwrap();
        assert_eq!(decoded.word, "ab");
        assert!(decoded.grammar.unwrap().is_empty());
    }

    #[test]
    fn test_flags_change_layout() {
        let encoded = encode("ab", &IdOptions::compact()).unwrap();
        assert_eq!(encoded.id, "L1000000");

        let bare = IdOptions {
            include_length: false,
            include_grammar: false,
            ..IdOptions::default()
        };
        let encoded = encode("ab", &bare).unwrap();
        assert_eq!(encoded.id, "L1");
        assert_eq!(encoded.grammar_tag, None);
        assert_eq!(decode("L1", &bare).unwrap().word, "ab");
    }

    #[test]
    fn test_worked_example() {
        let encoded = encode("hatotalaye", &IdOptions::default()).unwrap();
        assert_eq!(encoded.syllables, vec!["ha", "to", "ta", "la", "y", "e"]);
        // y=26 and e=22 each take a field of their own
        assert_eq!(encoded.id, "066LGOGL9L0Q0MTP05SV");

        let joined = decode(&encoded.id, &IdOptions::default()).unwrap();
        assert_eq!(joined.word, "ha-to-ta-la-y-e");
        let grammar = joined.grammar.unwrap();
        assert_eq!(grammar.time, Some(TimePrefix::Past));
        assert_eq!(grammar.modality, ModalityFlags::TO | ModalityFlags::TA);
        assert_eq!(grammar.suffix, Some(PosSuffix::Verb));

        let plain = IdOptions {
            delimiter: String::new(),
            ..IdOptions::default()
        };
        assert_eq!(decode(&encoded.id, &plain).unwrap().word, "hatotalaye");
    }

    #[test]
    fn test_delimited_input() {
        let encoded = encode("Ha-La-Ye", &IdOptions::default()).unwrap();
        assert_eq!(encoded.word, "ha-la-ye");
        assert_eq!(encoded.syllables, vec!["ha", "la", "ye"]);
        assert_eq!(encoded.analysis.time_prefix, Some(TimePrefix::Past));
        assert_eq!(encoded.analysis.suffix, Some(PosSuffix::Verb));
        assert_eq!(decode(&encoded.id, &IdOptions::default()).unwrap().word, "ha-la-ye");
    }

    #[test]
    fn test_missing_affixes_are_restored() {
        // one syllable "la" carrying ha + {to, ta} + ye
        let plain = IdOptions {
            delimiter: String::new(),
            ..IdOptions::default()
        };
        let decoded = decode("019LTP05SV", &plain).unwrap();
        assert_eq!(decoded.syllables, vec!["la"]);
        assert_eq!(decoded.word, "hatotalaye");

        // time present, modality missing: modality goes after the time prefix
        let tag = GrammarTag {
            time: Some(TimePrefix::Past),
            modality: ModalityFlags::TE,
            suffix: None,
        };
        let syllables = vec!["ha".to_string(), "la".to_string()];
        assert_eq!(restore_affixes(&syllables, &tag, "-"), "hate-la");
    }

    #[test]
    fn test_repeated_modality_is_not_duplicated() {
        let plain = IdOptions {
            delimiter: String::new(),
            ..IdOptions::default()
        };
        let encoded = encode("tototalaye", &plain).unwrap();
        assert_eq!(
            encoded.analysis.modality_prefixes,
            vec![Modality::Absoluteness, Modality::Absoluteness, Modality::Absence]
        );
        assert_eq!(decode(&encoded.id, &plain).unwrap().word, "tototalaye");
    }

    #[test]
    fn test_overflow_is_reported() {
        match encode("lacaye", &IdOptions::default()) {
            Err(CodecError::SyllableOverflow { syllable, .. }) => assert_eq!(syllable, "lac"),
            other => panic!("expected overflow, got {:?}", other),
        }
        assert_eq!(encode("   ", &IdOptions::default()), Err(CodecError::EmptyWord));
    }

    #[test]
    fn test_non_letters_are_rejected() {
        let options = IdOptions::default();
        assert_eq!(
            encode("1ab", &options),
            Err(CodecError::UnsupportedLetter { letter: '1', position: 0 })
        );
        assert_eq!(
            encode("éb", &options),
            Err(CodecError::UnsupportedLetter { letter: 'é', position: 0 })
        );
        assert_eq!(
            encode("ab!", &options),
            Err(CodecError::UnsupportedLetter { letter: '!', position: 2 })
        );
        assert_eq!(
            encode("ha-la!", &options),
            Err(CodecError::UnsupportedLetter { letter: '!', position: 5 })
        );

        // without a delimiter the hyphen is just another bad character
        let plain = IdOptions {
            delimiter: String::new(),
            ..IdOptions::default()
        };
        assert_eq!(
            encode("ha-la", &plain),
            Err(CodecError::UnsupportedLetter { letter: '-', position: 2 })
        );
    }

    #[test]
    fn test_malformed_identifiers() {
        let options = IdOptions::default();
        assert!(matches!(decode("01L1", &options), Err(CodecError::MalformedIdentifier { .. })));
        assert!(matches!(decode("02L1000000", &options), Err(CodecError::MalformedIdentifier { .. })));
        assert!(matches!(decode("01L10000000", &options), Err(CodecError::MalformedIdentifier { .. })));
        assert_eq!(
            decode("01l1000000", &options),
            Err(CodecError::InvalidSymbol { symbol: 'l', position: 2 })
        );
        assert!(matches!(
            decode("L1A000000", &IdOptions::compact()),
            Err(CodecError::MalformedIdentifier { .. })
        ));
    }
}
