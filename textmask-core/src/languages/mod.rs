//! Per-language masking processors.
//!
//! Every supported language implements `LanguageProcessor`: how protected
//! spans are delimited, which date shapes exist and in what order they
//! must be tried, and which unit words mark a counted quantity. The
//! pipeline that strings those steps together lives in `SanitizeText`
//! and is shared by every processor.
//!
//! To add a language, create a new file (e.g., `ja.rs`), implement the
//! trait, and register a constructor with the `ProcessorRegistry`.
//!
//! License: MIT OR APACHE 2.0

pub mod bookmark;
pub mod en;
pub mod zh;

use std::fmt;

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::TextmaskError;
pub use bookmark::{Bookmark, Delimiter};

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Per-processor settings, usually read from the `languages` table of the
/// sanitizer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProcessorOptions {
    /// Display name override.
    pub name: Option<String>,
    /// Unit words appended to the language's built-in unit vocabulary.
    pub extra_units: Vec<String>,
}

/// The contract every language processor fulfils.
///
/// Methods return `anyhow::Result` so that processors registered from
/// outside this crate can report their own failures; the shared pipeline
/// tags any such failure with the processor's language code.
pub trait LanguageProcessor: Send + Sync + fmt::Debug {
    /// The registry code, e.g. `"zh"`.
    fn code(&self) -> &str;

    /// Human-readable language name.
    fn name(&self) -> &str;

    /// Replaces each delimiter-wrapped span with a unique placeholder.
    /// Bookmarks are returned in match order.
    fn protect_special_content(&self, text: &str) -> Result<(String, Vec<Bookmark>)>;

    /// Puts protected spans back, in bookmark order.
    fn restore_special_content(&self, text: &str, bookmarks: &[Bookmark]) -> Result<String>;

    /// Masks date-shaped substrings with fixed literal tokens.
    fn replace_dates(&self, text: &str) -> Result<String>;

    /// Masks counted quantities and free-standing numbers.
    fn replace_numbers(&self, text: &str) -> Result<String>;
}

/// The shared sanitization pipeline.
///
/// Implemented once for every `LanguageProcessor`, so individual
/// processors cannot change the order of the steps.
pub trait SanitizeText {
    /// protect → replace dates → replace numbers → restore, then collapse
    /// whitespace runs to a single space and trim.
    fn sanitize_text(&self, text: &str) -> Result<String, TextmaskError>;
}

impl<P: LanguageProcessor + ?Sized> SanitizeText for P {
    fn sanitize_text(&self, text: &str) -> Result<String, TextmaskError> {
        if text.is_empty() {
            return Ok(String::new());
        }
        run_pipeline(self, text).map_err(|source| TextmaskError::Sanitization {
            language: self.code().to_string(),
            source,
        })
    }
}

fn run_pipeline<P: LanguageProcessor + ?Sized>(processor: &P, text: &str) -> Result<String> {
    let (protected, bookmarks) = processor.protect_special_content(text)?;

    let masked = processor.replace_dates(&protected)?;
    let masked = processor.replace_numbers(&masked)?;

    let restored = processor.restore_special_content(&masked, &bookmarks)?;
    if let Some(leaked) = bookmarks.iter().find(|b| restored.contains(&b.placeholder)) {
        return Err(anyhow!("placeholder {} survived restore", leaked.placeholder));
    }

    Ok(WHITESPACE_RUN.replace_all(&restored, " ").trim().to_string())
}

/// Replaces a matched number with one mask character per original character.
pub(crate) fn mask_digits(number: &str) -> String {
    "X".repeat(number.chars().count())
}

/// Builds a regex alternation from literal unit words, longest first so a
/// longer unit is never shadowed by one of its prefixes.
pub(crate) fn unit_alternation(builtin: &[&str], extra: &[String]) -> String {
    let mut units: Vec<String> = Vec::with_capacity(builtin.len() + extra.len());
    for unit in builtin.iter().copied().chain(extra.iter().map(String::as_str)) {
        let unit = unit.trim();
        if !unit.is_empty() && !units.iter().any(|u| u == unit) {
            units.push(unit.to_string());
        }
    }
    units.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    units.iter().map(|u| regex::escape(u)).collect::<Vec<_>>().join("|")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FailingProcessor;

    impl LanguageProcessor for FailingProcessor {
        fn code(&self) -> &str {
            "xx"
        }
        fn name(&self) -> &str {
            "Failing"
        }
        fn protect_special_content(&self, text: &str) -> Result<(String, Vec<Bookmark>)> {
            Ok((text.to_string(), Vec::new()))
        }
        fn restore_special_content(&self, text: &str, _bookmarks: &[Bookmark]) -> Result<String> {
            Ok(text.to_string())
        }
        fn replace_dates(&self, _text: &str) -> Result<String> {
            Err(anyhow!("date rules unavailable"))
        }
        fn replace_numbers(&self, text: &str) -> Result<String> {
            Ok(text.to_string())
        }
    }

    #[derive(Debug)]
    struct DroppingProcessor;

    impl LanguageProcessor for DroppingProcessor {
        fn code(&self) -> &str {
            "drop"
        }
        fn name(&self) -> &str {
            "Dropping"
        }
        fn protect_special_content(&self, text: &str) -> Result<(String, Vec<Bookmark>)> {
            let placeholder = bookmark::new_placeholder(text, &[])?;
            Ok((
                format!("{text} {placeholder}"),
                vec![Bookmark { placeholder, content: "q".to_string(), delimiter: Delimiter::DoubleQuote }],
            ))
        }
        fn restore_special_content(&self, text: &str, _bookmarks: &[Bookmark]) -> Result<String> {
            Ok(text.to_string())
        }
        fn replace_dates(&self, text: &str) -> Result<String> {
            Ok(text.to_string())
        }
        fn replace_numbers(&self, text: &str) -> Result<String> {
            Ok(text.to_string())
        }
    }

    #[test]
    fn test_pipeline_failure_is_tagged_with_language() {
        let err = FailingProcessor.sanitize_text("anything").unwrap_err();
        match &err {
            TextmaskError::Sanitization { language, .. } => assert_eq!(language, "xx"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("language xx"));
        assert!(err.to_string().contains("date rules unavailable"));
    }

    #[test]
    fn test_leaked_placeholder_is_an_error() {
        let err = DroppingProcessor.sanitize_text("text").unwrap_err();
        assert!(err.to_string().contains("survived restore"));
    }

    #[test]
    fn test_empty_input_skips_pipeline() {
        assert_eq!(FailingProcessor.sanitize_text("").unwrap(), "");
    }

    #[test]
    fn test_unit_alternation_longest_first_and_deduped() {
        let alternation = unit_alternation(&["个", "%", "个"], &["percent".to_string(), " ".to_string()]);
        assert_eq!(alternation, "percent|个|%");
    }

    #[test]
    fn test_mask_digits_counts_chars() {
        assert_eq!(mask_digits("98.5"), "XXXX");
        assert_eq!(mask_digits("7"), "X");
    }
}
