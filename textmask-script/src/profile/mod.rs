use crate::script::{classify, Script};

/// Per-script character counts for a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptProfile {
    pub han: usize,
    pub kana: usize,
    pub hangul: usize,
    pub latin: usize,
    pub cyrillic: usize,
    pub other_letters: usize,
    pub neutral: usize,
}

impl ScriptProfile {
    /// Adds one character to the profile.
    pub fn record(&mut self, c: char) {
        match classify(c) {
            Script::Han => self.han += 1,
            Script::Kana => self.kana += 1,
            Script::Hangul => self.hangul += 1,
            Script::Latin => self.latin += 1,
            Script::Cyrillic => self.cyrillic += 1,
            Script::OtherLetter => self.other_letters += 1,
            Script::Neutral => self.neutral += 1,
        }
    }

    /// Number of characters that belong to a letter-bearing script.
    pub fn letters(&self) -> usize {
        self.han + self.kana + self.hangul + self.latin + self.cyrillic + self.other_letters
    }

    /// Share of letters that fall in `script`, in `0.0..=1.0`.
    ///
    /// Returns `0.0` for text without letters and for `Script::Neutral`.
    pub fn share(&self, script: Script) -> f64 {
        let letters = self.letters();
        if letters == 0 {
            return 0.0;
        }
        let count = match script {
            Script::Han => self.han,
            Script::Kana => self.kana,
            Script::Hangul => self.hangul,
            Script::Latin => self.latin,
            Script::Cyrillic => self.cyrillic,
            Script::OtherLetter => self.other_letters,
            Script::Neutral => return 0.0,
        };
        count as f64 / letters as f64
    }
}

/// Builds a `ScriptProfile` for the whole of `text`.
pub fn profile_text(text: &str) -> ScriptProfile {
    let mut profile = ScriptProfile::default();
    for c in text.chars() {
        profile.record(c);
    }
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_empty() {
        let profile = profile_text("");
        assert_eq!(profile.letters(), 0);
        assert_eq!(profile.share(Script::Han), 0.0);
    }

    #[test]
    fn test_profile_digits_only() {
        let profile = profile_text("2025-08-07");
        assert_eq!(profile.letters(), 0);
        assert_eq!(profile.neutral, 10);
    }

    #[test]
    fn test_profile_mixed() {
        // digits are neutral and do not count as letters
        let profile = profile_text("共有231架SSTO参与");
        assert_eq!(profile.han, 5);
        assert_eq!(profile.latin, 4);
        assert_eq!(profile.share(Script::Han), 5.0 / 9.0);
        assert_eq!(profile.share(Script::Latin), 4.0 / 9.0);
        assert_eq!(profile.share(Script::Neutral), 0.0);
    }
}
