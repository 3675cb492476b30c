//! Hangul-aware text helpers shared by the parsers and the search surface.

use unicode_normalization::UnicodeNormalization;

/// Zero-width characters and the soft hyphen, dropped before any other step.
const INVISIBLES: [char; 6] = [
    '\u{feff}', '\u{200b}', '\u{200c}', '\u{200d}', '\u{2060}', '\u{00ad}',
];

/// Whether `ch` lies in the precomposed Hangul Syllables block.
pub fn is_syllable(ch: char) -> bool {
    ('가'..='힣').contains(&ch)
}

/// Canonicalize a raw headword.
///
/// Pipeline: drop invisibles, collapse whitespace runs and trim, NFC,
/// strip trailing ASCII digits (dictionary discriminators like `단어01`),
/// then keep only Hangul syllables. The result may be empty; callers skip
/// empty words.
pub fn normalize_word(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !INVISIBLES.contains(c)).collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    let composed: String = collapsed.nfc().collect();
    let digitless = composed.trim_end_matches(|c: char| c.is_ascii_digit());
    digitless.chars().filter(|&c| is_syllable(c)).collect()
}

/// First Hangul syllable of each input string, in input order.
///
/// A string that is already a single Hangul syllable passes through as-is;
/// otherwise the first Hangul syllable found is taken. Strings with no
/// Hangul are skipped.
pub fn initials_from_words<I, S>(words: I) -> Vec<char>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut initials = Vec::new();
    for word in words {
        let composed: String = word.as_ref().trim().nfc().collect();
        let mut chars = composed.chars();
        if let (Some(only), None) = (chars.next(), chars.next()) {
            if is_syllable(only) {
                initials.push(only);
            }
            continue;
        }
        if let Some(ch) = composed.chars().find(|&c| is_syllable(c)) {
            initials.push(ch);
        }
    }
    initials
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_discriminators() {
        assert_eq!(normalize_word("단어01"), "단어");
        assert_eq!(normalize_word("결근"), "결근");
    }

    #[test]
    fn drops_invisibles_and_non_hangul() {
        assert_eq!(normalize_word("\u{feff}결\u{200b}근"), "결근");
        assert_eq!(normalize_word("결근 (缺勤)"), "결근");
        assert_eq!(normalize_word("abc 123"), "");
    }

    #[test]
    fn digits_before_hangul_survive_the_trailing_strip() {
        // Only a trailing run of digits is a discriminator; inner digits
        // fall to the Hangul-only filter instead.
        assert_eq!(normalize_word("단어01가"), "단어가");
    }

    #[test]
    fn normalization_is_a_fixpoint() {
        for raw in ["단어01", " 결  근 ", "\u{feff}신상", "한국어기초사전"] {
            let once = normalize_word(raw);
            assert_eq!(normalize_word(&once), once);
            assert!(once.chars().all(is_syllable));
        }
    }

    #[test]
    fn nfc_composes_decomposed_jamo() {
        // U+1100 U+1161 -> U+AC00 (가)
        let decomposed = "\u{1100}\u{1161}";
        assert_eq!(normalize_word(decomposed), "가");
    }

    #[test]
    fn initials_prefer_single_syllables() {
        let initials = initials_from_words(["결", "근육", " 신상 ", "abc", "x신"]);
        assert_eq!(initials, vec!['결', '근', '신', '신']);
    }

    #[test]
    fn initials_skip_non_hangul_singletons() {
        assert!(initials_from_words(["a", "!", ""]).is_empty());
    }
}
