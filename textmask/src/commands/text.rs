//! `textmask text`: sanitizes one string given on the command line.

use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::debug;
use textmask_core::{LanguageSelector, ProcessorOptions, ProcessorRegistry, TextSanitizer};

/// Sanitizes `text` and writes the result followed by a newline.
pub fn run_text<W: Write>(
    registry: Arc<ProcessorRegistry>,
    options: HashMap<String, ProcessorOptions>,
    language: &str,
    text: &str,
    out: &mut W,
) -> Result<()> {
    let selector = LanguageSelector::from(language.to_string());
    let mut sanitizer = TextSanitizer::new(selector, registry).with_processor_options(options);
    let sanitized = sanitizer.sanitize_text(text).context("Failed to sanitize text")?;
    debug!(
        "Sanitized {} byte(s) as '{}'",
        text.len(),
        sanitizer.current_language().unwrap_or("-")
    );
    writeln!(out, "{sanitized}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(language: &str, text: &str) -> String {
        let mut out = Vec::new();
        run_text(Arc::new(ProcessorRegistry::default()), HashMap::new(), language, text, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn masks_chinese_text() {
        assert_eq!(run("zh", "在2021年共有231架SSTO参与"), "在X年共有X架SSTO参与\n");
    }

    #[test]
    fn masks_english_text() {
        assert_eq!(run("en", "We sold 300 cars"), "We sold X cars\n");
    }
}
