/// Coarse Unicode script buckets relevant to language detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// CJK unified ideographs (Chinese characters, also used by Japanese).
    Han,
    /// Hiragana and katakana.
    Kana,
    /// Hangul syllables and jamo.
    Hangul,
    /// Latin letters, including the Latin-1 and extended blocks.
    Latin,
    /// Cyrillic letters.
    Cyrillic,
    /// Any other alphabetic character.
    OtherLetter,
    /// Digits, punctuation, whitespace, symbols.
    Neutral,
}

impl Script {
    /// Whether the bucket counts towards the letter total of a profile.
    pub fn is_letter(self) -> bool {
        !matches!(self, Script::Neutral)
    }
}

/// Classifies a single character into its script bucket.
///
/// Ranges follow the Unicode block allocation; only the blocks that matter
/// for telling Chinese, Japanese, Korean and Latin-script text apart are
/// broken out.
pub fn classify(c: char) -> Script {
    let u = c as u32;
    match u {
        0x3040..=0x309F | 0x30A0..=0x30FF | 0x31F0..=0x31FF | 0xFF66..=0xFF9F => Script::Kana,
        0x1100..=0x11FF | 0x3130..=0x318F | 0xA960..=0xA97F | 0xAC00..=0xD7AF | 0xD7B0..=0xD7FF => {
            Script::Hangul
        }
        0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF | 0x20000..=0x2FA1F => Script::Han,
        0x0041..=0x005A | 0x0061..=0x007A => Script::Latin,
        0x00C0..=0x024F | 0x1E00..=0x1EFF if c.is_alphabetic() => Script::Latin,
        0x0400..=0x04FF | 0x0500..=0x052F => Script::Cyrillic,
        _ if c.is_alphabetic() => Script::OtherLetter,
        _ => Script::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_cjk() {
        assert_eq!(classify('中'), Script::Han);
        assert_eq!(classify('の'), Script::Kana);
        assert_eq!(classify('カ'), Script::Kana);
        assert_eq!(classify('한'), Script::Hangul);
    }

    #[test]
    fn test_classify_latin_and_neutral() {
        assert_eq!(classify('a'), Script::Latin);
        assert_eq!(classify('Z'), Script::Latin);
        assert_eq!(classify('é'), Script::Latin);
        assert_eq!(classify('Ж'), Script::Cyrillic);
        assert_eq!(classify('7'), Script::Neutral);
        assert_eq!(classify('《'), Script::Neutral);
        assert_eq!(classify(' '), Script::Neutral);
        assert!(!Script::Neutral.is_letter());
    }
}
