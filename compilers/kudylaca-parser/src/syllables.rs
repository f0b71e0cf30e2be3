use kudylaca_protocol::alphabet::is_vowel;
use kudylaca_protocol::AffixAnalysis;

/// Longest syllable the splitter produces.
pub const MAX_SYLLABLE: usize = 3;

/// Stems of up to three letters stay whole. Longer stems close a syllable at
/// three letters or between two vowels.
pub fn split_stem(stem: &str) -> Vec<String> {
    let letters: Vec<char> = stem.chars().collect();
    if letters.is_empty() {
        return Vec::new();
    }
    if letters.len() <= MAX_SYLLABLE {
        return vec![stem.to_string()];
    }

    let mut syllables = Vec::new();
    let mut current = String::new();
    let last = letters.len() - 1;

    for (i, &c) in letters.iter().enumerate() {
        current.push(c);
        if current.chars().count() >= MAX_SYLLABLE || i == last {
            syllables.push(std::mem::take(&mut current));
        } else if is_vowel(c) && is_vowel(letters[i + 1]) {
            syllables.push(std::mem::take(&mut current));
        }
    }
    syllables
}

/// Each vowel closes a syllable; trailing consonants join the last one.
pub fn split_suffix(suffix: &str) -> Vec<String> {
    let mut syllables: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in suffix.chars() {
        current.push(c);
        if is_vowel(c) {
            syllables.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        match syllables.last_mut() {
            Some(last) => last.push_str(&current),
            None => syllables.push(current),
        }
    }
    syllables
}

/// Prefixes verbatim, then the stem, then the suffix.
pub fn syllabify(analysis: &AffixAnalysis) -> Vec<String> {
    let mut syllables = Vec::new();
    if let Some(t) = analysis.time_prefix {
        syllables.push(t.text().to_string());
    }
    syllables.extend(analysis.modality_prefixes.iter().map(|m| m.text().to_string()));
    syllables.extend(split_stem(&analysis.stem));
    if let Some(s) = analysis.suffix {
        syllables.extend(split_suffix(s.text()));
    }
    syllables
}

/// A non-empty delimiter present in the word decides the split; otherwise
/// the analysis does.
pub fn word_to_syllables(word: &str, delimiter: &str, analysis: &AffixAnalysis) -> Vec<String> {
    if !delimiter.is_empty() && word.contains(delimiter) {
        word.split(delimiter).map(str::to_string).collect()
    } else {
        syllabify(analysis)
    }
}
