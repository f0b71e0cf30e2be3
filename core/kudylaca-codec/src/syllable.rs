//! A syllable is read as a base-32 number whose digits are its letter codes.

use kudylaca_protocol::alphabet::{is_letter, RADIX};

use crate::error::CodecError;
use crate::symbol::{base32_to_int, code_to_letter, letter_to_code, render_field, FIELD_CAPACITY, FIELD_WIDTH};

/// Code of the empty syllable.
pub const EMPTY_SYLLABLE: &str = "00";

/// Numeric value of a syllable, saturating for absurdly long input.
pub fn syllable_value(syllable: &str) -> u64 {
    syllable.chars().fold(0u64, |acc, c| {
        acc.saturating_mul(u64::from(RADIX))
            .saturating_add(u64::from(letter_to_code(c)))
    })
}

/// Whether the syllable fits in a two-symbol code.
pub fn fits(syllable: &str) -> bool {
    syllable_value(syllable) < u64::from(FIELD_CAPACITY)
}

pub fn encode_syllable(syllable: &str) -> Result<String, CodecError> {
    if syllable.is_empty() {
        return Ok(EMPTY_SYLLABLE.to_string());
    }
    if let Some((position, letter)) = syllable.chars().enumerate().find(|&(_, c)| !is_letter(c)) {
        return Err(CodecError::UnsupportedLetter { letter, position });
    }
    let value = syllable_value(syllable);
    if value >= u64::from(FIELD_CAPACITY) {
        return Err(CodecError::SyllableOverflow {
            syllable: syllable.to_string(),
            value,
        });
    }
    Ok(render_field(value as u32))
}

/// Zero digits are padding and produce no letter.
pub fn decode_syllable(code: &str) -> Result<String, CodecError> {
    if code.chars().count() != FIELD_WIDTH {
        return Err(CodecError::malformed(code, "syllable code must be two symbols"));
    }
    let mut num = base32_to_int(code)?;

    let mut letters = Vec::with_capacity(FIELD_WIDTH);
    while num > 0 {
        let digit = num % RADIX;
        if digit > 0 {
            letters.push(code_to_letter(digit));
        }
        num /= RADIX;
    }

    Ok(letters.into_iter().rev().collect())
}
