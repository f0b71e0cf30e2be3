//! The Kudylaca letter inventory and the 32-symbol identifier alphabet.
//!
//! Letter codes are assigned by sorted position: consonants take `1..=20`,
//! vowels take `21..=26`. Code `0` never names a letter.

/// The 20 consonants, sorted.
pub const CONSONANTS: [char; 20] = [
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm',
    'n', 'p', 'q', 'r', 's', 't', 'v', 'w', 'x', 'z',
];

/// The 6 vowels, sorted.
pub const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

/// Digit symbols of the identifier alphabet, indexed by digit value.
pub const BASE32_ALPHABET: [char; 32] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J',
    'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T',
    'U', 'V',
];

/// Radix of the identifier alphabet.
pub const RADIX: u32 = 32;

/// Code of the first vowel; consonant codes sit below it.
pub const FIRST_VOWEL_CODE: u32 = 21;

pub fn is_consonant(c: char) -> bool {
    CONSONANTS.binary_search(&c).is_ok()
}

pub fn is_vowel(c: char) -> bool {
    VOWELS.binary_search(&c).is_ok()
}

pub fn is_letter(c: char) -> bool {
    is_consonant(c) || is_vowel(c)
}

/// Digit value of an identifier symbol. Lowercase symbols are not accepted.
pub fn base32_digit(symbol: char) -> Option<u32> {
    match symbol {
        '0'..='9' => Some(symbol as u32 - '0' as u32),
        'A'..='V' => Some(symbol as u32 - 'A' as u32 + 10),
        _ => None,
    }
}

pub fn is_base32_symbol(symbol: char) -> bool {
    base32_digit(symbol).is_some()
}

/// A stem is valid when it has at least two letters and at least one vowel.
pub fn is_valid_stem(stem: &str) -> bool {
    stem.chars().count() >= 2 && stem.chars().any(is_vowel)
}

/// Rough syllable count of a stem: one per vowel, never less than one.
pub fn syllable_estimate(stem: &str) -> usize {
    stem.chars().filter(|c| is_vowel(*c)).count().max(1)
}
