// File: textmask-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot sanitization without setting up a
//! registry or sanitizer by hand.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::TextmaskError;
use crate::registry::ProcessorRegistry;
use crate::sanitizer::{LanguageSelector, TextSanitizer};

/// Sanitizes a single string with the built-in languages.
///
/// # Arguments
///
/// * `selector` - `Auto` or the code of a built-in language.
/// * `content` - The string to be sanitized.
pub fn headless_sanitize_string(selector: LanguageSelector, content: &str) -> Result<String, TextmaskError> {
    TextSanitizer::new(selector, Arc::new(ProcessorRegistry::default())).sanitize_text(content)
}

/// Sanitizes every string leaf of a JSON document with the built-in languages.
pub fn headless_sanitize_json(selector: LanguageSelector, document: Value) -> Result<Value, TextmaskError> {
    TextSanitizer::new(selector, Arc::new(ProcessorRegistry::default())).sanitize_json_data(document)
}
