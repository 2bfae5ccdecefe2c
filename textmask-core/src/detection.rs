//! Language detection for `auto` mode.
//!
//! Detection has exactly two outcomes: a detected code, or the fallback
//! code when the text gives no usable signal. Nothing is swallowed, so
//! callers and tests can tell the two apart.
//!
//! License: MIT OR APACHE 2.0

use textmask_script::{profile_text, Script};

/// Code used when detection is inconclusive.
pub const FALLBACK_LANGUAGE: &str = "zh";

/// Minimum share of letters that must be Han for Chinese.
const HAN_THRESHOLD: f64 = 0.3;
/// Minimum share of letters that must be Latin for English.
const LATIN_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The text was recognized as this language code.
    Detected(String),
    /// Nothing conclusive; the contained code should be used instead.
    Fallback(String),
}

impl Detection {
    /// The code to use, whichever branch was taken.
    pub fn code(&self) -> &str {
        match self {
            Detection::Detected(code) | Detection::Fallback(code) => code,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Detection::Fallback(_))
    }
}

/// Guesses the language of a piece of text.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Detection;
}

/// Script-mix heuristic backed by `textmask-script`.
///
/// Kana means Japanese and Hangul means Korean regardless of the rest of
/// the text; otherwise the Han and Latin shares of all letters decide.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptDetector;

impl LanguageDetector for ScriptDetector {
    fn detect(&self, text: &str) -> Detection {
        let profile = profile_text(text);
        if profile.kana > 0 {
            Detection::Detected("ja".to_string())
        } else if profile.hangul > 0 {
            Detection::Detected("ko".to_string())
        } else if profile.share(Script::Han) >= HAN_THRESHOLD {
            Detection::Detected("zh".to_string())
        } else if profile.share(Script::Latin) >= LATIN_THRESHOLD {
            Detection::Detected("en".to_string())
        } else {
            Detection::Fallback(FALLBACK_LANGUAGE.to_string())
        }
    }
}

/// Always answers with the same outcome.
#[derive(Debug, Clone)]
pub struct FixedDetector(pub Detection);

impl LanguageDetector for FixedDetector {
    fn detect(&self, _text: &str) -> Detection {
        self.0.clone()
    }
}
