//! Six-symbol grammar tag: time (2), modality bitmask (2), suffix (2).

use kudylaca_protocol::{GrammarTag, ModalityFlags, PosSuffix, TimePrefix};

use crate::error::CodecError;
use crate::symbol::{base32_to_int, render_field, FIELD_WIDTH};

pub const TAG_WIDTH: usize = 3 * FIELD_WIDTH;

/// Field value for an absent affix.
pub const ABSENT_FIELD: &str = "00";

pub fn encode_grammar_tag(tag: &GrammarTag) -> String {
    let mut out = String::with_capacity(TAG_WIDTH);
    out.push_str(tag.time.map_or(ABSENT_FIELD, TimePrefix::tag));
    // at most 7, always one field
    out.push_str(&render_field(u32::from(tag.modality.bits())));
    out.push_str(tag.suffix.map_or(ABSENT_FIELD, PosSuffix::tag));
    out
}

/// Unknown time or suffix fields decode as absent. Modality comes back in
/// canonical order whatever order it was applied in.
pub fn decode_grammar_tag(code: &str) -> Result<GrammarTag, CodecError> {
    if code.len() != TAG_WIDTH || !code.is_ascii() {
        return Err(CodecError::malformed(code, "grammar tag must be six symbols"));
    }
    let (time, rest) = code.split_at(FIELD_WIDTH);
    let (modality, suffix) = rest.split_at(FIELD_WIDTH);

    let mask = base32_to_int(modality).map_err(|e| match e {
        CodecError::InvalidSymbol { symbol, position } => CodecError::InvalidSymbol {
            symbol,
            position: position + FIELD_WIDTH,
        },
        other => other,
    })?;

    Ok(GrammarTag {
        time: TimePrefix::from_tag(time),
        modality: ModalityFlags::from_bits_truncate((mask & 0xFF) as u8),
        suffix: PosSuffix::from_tag(suffix),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kudylaca_protocol::Modality;
    use proptest::prelude::*;
    use proptest::sample::select;

    #[test]
    fn test_empty_tag() {
        assert_eq!(encode_grammar_tag(&GrammarTag::default()), "000000");
        assert!(decode_grammar_tag("000000").unwrap().is_empty());
    }

    #[test]
    fn test_known_tag() {
        let tag = GrammarTag {
            time: Some(TimePrefix::Past),
            modality: ModalityFlags::TO | ModalityFlags::TA,
            suffix: Some(PosSuffix::Verb),
        };
        assert_eq!(encode_grammar_tag(&tag), "TP05SV");
        assert_eq!(decode_grammar_tag("TP05SV").unwrap(), tag);
    }

    #[test]
    fn test_unknown_fields_are_absent() {
        let tag = decode_grammar_tag("XX03ZZ").unwrap();
        assert_eq!(tag.time, None);
        assert_eq!(tag.suffix, None);
        let modalities: Vec<Modality> = tag.modality.modalities().collect();
        assert_eq!(modalities, vec![Modality::Absoluteness, Modality::Indefiniteness]);
    }

    #[test]
    fn test_unknown_modality_bits_are_dropped() {
        // 31 = 0b11111, only the low three bits name a modality
        assert_eq!(decode_grammar_tag("000V00").unwrap().modality, ModalityFlags::all());
        assert!(decode_grammar_tag("001000").unwrap().modality.is_empty());
    }

    #[test]
    fn test_rejects_malformed_tag() {
        assert!(matches!(decode_grammar_tag("TP05S"), Err(CodecError::MalformedIdentifier { .. })));
        assert_eq!(
            decode_grammar_tag("TP0*SV"),
            Err(CodecError::InvalidSymbol { symbol: '*', position: 3 })
        );
    }

    fn time_strategy() -> impl Strategy<Value = Option<TimePrefix>> {
        select(vec![None, Some(TimePrefix::Past), Some(TimePrefix::Present), Some(TimePrefix::Future)])
    }

    fn suffix_strategy() -> impl Strategy<Value = Option<PosSuffix>> {
        let mut options = vec![None];
        options.extend(PosSuffix::ALL.into_iter().map(Some));
        select(options)
    }

    proptest! {
        #[test]
        fn test_tag_round_trip(time in time_strategy(), bits in 0u8..8, suffix in suffix_strategy()) {
            let tag = GrammarTag { time, modality: ModalityFlags::from_bits_truncate(bits), suffix };
            let code = encode_grammar_tag(&tag);
            prop_assert_eq!(code.len(), TAG_WIDTH);
            prop_assert_eq!(decode_grammar_tag(&code).unwrap(), tag);
        }
    }
}
