//! Letter codes and the two-symbol base-32 field.

use kudylaca_protocol::alphabet::{base32_digit, BASE32_ALPHABET, CONSONANTS, FIRST_VOWEL_CODE, RADIX, VOWELS};

use crate::error::CodecError;

/// Stands in for a letter code outside `1..=26`.
pub const UNKNOWN_LETTER: char = '?';

/// Width of every fixed field in an identifier.
pub const FIELD_WIDTH: usize = 2;

/// Values below this fit in one field.
pub const FIELD_CAPACITY: u32 = RADIX * RADIX;

/// Consonants map to `1..=20`, vowels to `21..=26`, anything else to `0`.
pub fn letter_to_code(letter: char) -> u32 {
    if let Ok(i) = CONSONANTS.binary_search(&letter) {
        return i as u32 + 1;
    }
    if let Ok(i) = VOWELS.binary_search(&letter) {
        return i as u32 + FIRST_VOWEL_CODE;
    }
    0
}

pub fn code_to_letter(code: u32) -> char {
    match code {
        1..=20 => CONSONANTS[code as usize - 1],
        21..=26 => VOWELS[(code - FIRST_VOWEL_CODE) as usize],
        _ => UNKNOWN_LETTER,
    }
}

/// Encodes `n` as exactly two symbols, zero padded.
pub fn int_to_base32(n: u32) -> Result<String, CodecError> {
    if n >= FIELD_CAPACITY {
        return Err(CodecError::ValueOverflow {
            value: u64::from(n),
            limit: FIELD_CAPACITY,
        });
    }
    Ok(render_field(n))
}

// Caller guarantees n < FIELD_CAPACITY.
pub(crate) fn render_field(n: u32) -> String {
    let mut field = String::with_capacity(FIELD_WIDTH);
    field.push(BASE32_ALPHABET[(n / RADIX) as usize]);
    field.push(BASE32_ALPHABET[(n % RADIX) as usize]);
    field
}

/// Positional decode of any number of symbols.
pub fn base32_to_int(code: &str) -> Result<u32, CodecError> {
    let mut value: u32 = 0;
    for (position, symbol) in code.chars().enumerate() {
        let digit = base32_digit(symbol).ok_or(CodecError::InvalidSymbol { symbol, position })?;
        value = value
            .checked_mul(RADIX)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| CodecError::malformed(code, "numeric field overflows 32 bits"))?;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_codes() {
        assert_eq!(letter_to_code('b'), 1);
        assert_eq!(letter_to_code('z'), 20);
        assert_eq!(letter_to_code('a'), 21);
        assert_eq!(letter_to_code('y'), 26);
        assert_eq!(letter_to_code('-'), 0);
        assert_eq!(letter_to_code('A'), 0);

        for code in 1..=26 {
            assert_eq!(letter_to_code(code_to_letter(code)), code);
        }
        assert_eq!(code_to_letter(0), UNKNOWN_LETTER);
        assert_eq!(code_to_letter(27), UNKNOWN_LETTER);
    }

    #[test]
    fn test_field_encoding() {
        assert_eq!(int_to_base32(0).unwrap(), "00");
        assert_eq!(int_to_base32(1).unwrap(), "01");
        assert_eq!(int_to_base32(31).unwrap(), "0V");
        assert_eq!(int_to_base32(32).unwrap(), "10");
        assert_eq!(int_to_base32(1023).unwrap(), "VV");
        assert!(matches!(int_to_base32(1024), Err(CodecError::ValueOverflow { value: 1024, .. })));
    }

    #[test]
    fn test_field_decoding() {
        assert_eq!(base32_to_int("VV").unwrap(), 1023);
        assert_eq!(base32_to_int("100").unwrap(), 1024);
        assert_eq!(base32_to_int("").unwrap(), 0);
        assert_eq!(
            base32_to_int("1W"),
            Err(CodecError::InvalidSymbol { symbol: 'W', position: 1 })
        );
        assert!(base32_to_int("VVVVVVVVV").is_err());
    }
}
