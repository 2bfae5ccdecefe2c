//! sanitizer.rs - The orchestrator that turns documents into masked documents.
//!
//! `TextSanitizer` resolves which language applies to a piece of text
//! (explicitly configured, or detected per string in `auto` mode), keeps
//! the matching processor alive between calls, and walks JSON values so
//! that only string leaves are rewritten.
//!
//! A sanitizer memoizes its processor and therefore needs `&mut self`.
//! Concurrent callers should each own one.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::detection::{LanguageDetector, ScriptDetector, FALLBACK_LANGUAGE};
use crate::errors::TextmaskError;
use crate::languages::zh::ChineseProcessor;
use crate::languages::{LanguageProcessor, ProcessorOptions, SanitizeText};
use crate::registry::ProcessorRegistry;

/// The selector value that requests per-text detection.
pub const AUTO: &str = "auto";

/// Which language a sanitizer applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum LanguageSelector {
    /// Detect the language of every string separately.
    #[default]
    Auto,
    /// Always use this (lowercased) code.
    Code(String),
}

impl From<String> for LanguageSelector {
    fn from(value: String) -> Self {
        let value = value.trim().to_lowercase();
        if value == AUTO {
            LanguageSelector::Auto
        } else {
            LanguageSelector::Code(value)
        }
    }
}

impl From<LanguageSelector> for String {
    fn from(selector: LanguageSelector) -> Self {
        selector.to_string()
    }
}

impl FromStr for LanguageSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LanguageSelector::from(s.to_string()))
    }
}

impl fmt::Display for LanguageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageSelector::Auto => f.write_str(AUTO),
            LanguageSelector::Code(code) => f.write_str(code),
        }
    }
}

/// Masks dates and numbers in text and in JSON documents.
pub struct TextSanitizer {
    selector: LanguageSelector,
    registry: Arc<ProcessorRegistry>,
    detector: Box<dyn LanguageDetector>,
    options: HashMap<String, ProcessorOptions>,
    processor: Option<Box<dyn LanguageProcessor>>,
}

impl fmt::Debug for TextSanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSanitizer")
            .field("selector", &self.selector)
            .field("registry", &self.registry)
            .field("current_language", &self.current_language())
            .finish()
    }
}

impl TextSanitizer {
    /// A sanitizer using the script-based detector and default options.
    pub fn new(selector: LanguageSelector, registry: Arc<ProcessorRegistry>) -> Self {
        Self {
            selector,
            registry,
            detector: Box::new(ScriptDetector),
            options: HashMap::new(),
            processor: None,
        }
    }

    /// Replaces the detector used in `auto` mode.
    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Sets per-language processor options, keyed by language code.
    pub fn with_processor_options(mut self, options: HashMap<String, ProcessorOptions>) -> Self {
        self.options = options
            .into_iter()
            .map(|(code, opts)| (code.to_lowercase(), opts))
            .collect();
        self
    }

    pub fn selector(&self) -> &LanguageSelector {
        &self.selector
    }

    /// Code of the processor currently held, if any.
    pub fn current_language(&self) -> Option<&str> {
        self.processor.as_ref().map(|p| p.code())
    }

    fn options_for(&self, code: &str) -> ProcessorOptions {
        self.options.get(code).cloned().unwrap_or_default()
    }

    fn resolve_language(&self, text: &str) -> String {
        match &self.selector {
            LanguageSelector::Code(code) => code.clone(),
            LanguageSelector::Auto => {
                let detection = self.detector.detect(text);
                if detection.is_fallback() {
                    debug!("Language detection inconclusive, using '{}'.", detection.code());
                } else {
                    debug!("Detected language: {}", detection.code());
                }
                detection.code().to_lowercase()
            }
        }
    }

    /// The processor registered for the fallback code, or the built-in
    /// Chinese processor when the registry has none.
    fn fallback_processor(&self) -> Result<Box<dyn LanguageProcessor>, TextmaskError> {
        let options = self.options_for(FALLBACK_LANGUAGE);
        match self.registry.create(FALLBACK_LANGUAGE, &options) {
            Err(TextmaskError::UnsupportedLanguage(_)) => Ok(Box::new(ChineseProcessor::with_options(&options)?)),
            other => other,
        }
    }

    /// Makes sure the held processor matches `code`, creating a new one
    /// only when the resolved code changed.
    fn ensure_processor(&mut self, code: &str) -> Result<&dyn LanguageProcessor, TextmaskError> {
        let reusable = self.processor.as_ref().map_or(false, |p| p.code() == code);
        if !reusable {
            let processor: Box<dyn LanguageProcessor> = match self.registry.create(code, &self.options_for(code)) {
                Ok(processor) => {
                    debug!("Created processor for language: {}", code);
                    processor
                }
                Err(TextmaskError::UnsupportedLanguage(requested)) => {
                    warn!(
                        "Unsupported language code: {}, using default Chinese processor",
                        requested
                    );
                    self.fallback_processor()?
                }
                Err(e) => return Err(e),
            };
            self.processor = Some(processor);
        }
        self.processor
            .as_deref()
            .ok_or_else(|| TextmaskError::Fatal("no language processor available".to_string()))
    }

    /// Sanitizes a single string. Empty input returns an empty string
    /// without running detection.
    pub fn sanitize_text(&mut self, text: &str) -> Result<String, TextmaskError> {
        if text.is_empty() {
            return Ok(String::new());
        }
        let code = self.resolve_language(text);
        let processor = self.ensure_processor(&code)?;
        processor.sanitize_text(text)
    }

    /// Sanitizes every string leaf of `data`. Keys, key order, array order
    /// and non-string scalars are left untouched.
    pub fn sanitize_json_data(&mut self, data: Value) -> Result<Value, TextmaskError> {
        match data {
            Value::Object(map) => {
                let sanitized = map
                    .into_iter()
                    .map(|(key, value)| Ok((key, self.sanitize_json_data(value)?)))
                    .collect::<Result<Map<String, Value>, TextmaskError>>()?;
                Ok(Value::Object(sanitized))
            }
            Value::Array(items) => {
                let sanitized = items
                    .into_iter()
                    .map(|item| self.sanitize_json_data(item))
                    .collect::<Result<Vec<Value>, TextmaskError>>()?;
                Ok(Value::Array(sanitized))
            }
            Value::String(text) => Ok(Value::String(self.sanitize_text(&text)?)),
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{Detection, FixedDetector};
    use crate::languages::en::EnglishProcessor;
    use crate::languages::Bookmark;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sanitizer(selector: &str) -> TextSanitizer {
        TextSanitizer::new(selector.parse().unwrap(), Arc::new(ProcessorRegistry::default()))
    }

    #[test]
    fn test_selector_parsing() {
        assert_eq!("AUTO".parse::<LanguageSelector>().unwrap(), LanguageSelector::Auto);
        assert_eq!(
            " En ".parse::<LanguageSelector>().unwrap(),
            LanguageSelector::Code("en".to_string())
        );
        assert_eq!(LanguageSelector::Code("zh".to_string()).to_string(), "zh");
    }

    #[test]
    fn test_explicit_languages() {
        assert_eq!(sanitizer("zh").sanitize_text("有123辆车").unwrap(), "有X辆车");
        assert_eq!(sanitizer("en").sanitize_text("I have 123 cars").unwrap(), "I have X cars");
    }

    #[test]
    fn test_auto_detects_per_string() {
        let mut s = sanitizer("auto");
        assert_eq!(s.sanitize_text("今天是2025年8月7日").unwrap(), "今天是X年X月X日");
        assert_eq!(s.current_language(), Some("zh"));
        assert_eq!(
            s.sanitize_text("Today is August 7, 2025").unwrap(),
            "Today is Month DD, YYYY"
        );
        assert_eq!(s.current_language(), Some("en"));
    }

    #[test]
    fn test_auto_fallback_uses_chinese() {
        let mut s = sanitizer("auto");
        assert_eq!(s.sanitize_text("2025-08-07").unwrap(), "X年X月X日");
        assert_eq!(s.current_language(), Some("zh"));
    }

    #[test]
    fn test_empty_text_skips_detection() {
        let mut s = sanitizer("auto");
        assert_eq!(s.sanitize_text("").unwrap(), "");
        assert_eq!(s.current_language(), None);
    }

    #[test]
    fn test_unsupported_code_matches_chinese_output() {
        let text = "2025年共有5102人参与，“第3届”";
        let expected = sanitizer("zh").sanitize_text(text).unwrap();
        let mut s = sanitizer("xx");
        assert_eq!(s.sanitize_text(text).unwrap(), expected);
        assert_eq!(s.current_language(), Some("zh"));
    }

    #[derive(Debug)]
    struct YearTagProcessor;

    impl LanguageProcessor for YearTagProcessor {
        fn code(&self) -> &str {
            "zh"
        }
        fn name(&self) -> &str {
            "Year tags"
        }
        fn protect_special_content(&self, text: &str) -> anyhow::Result<(String, Vec<Bookmark>)> {
            Ok((text.to_string(), Vec::new()))
        }
        fn restore_special_content(&self, text: &str, _bookmarks: &[Bookmark]) -> anyhow::Result<String> {
            Ok(text.to_string())
        }
        fn replace_dates(&self, text: &str) -> anyhow::Result<String> {
            Ok(text.replace("2025", "CUSTOM"))
        }
        fn replace_numbers(&self, text: &str) -> anyhow::Result<String> {
            Ok(text.to_string())
        }
    }

    #[test]
    fn test_unsupported_code_uses_registered_chinese_processor() {
        let mut registry = ProcessorRegistry::default();
        registry.register("zh", |_: &ProcessorOptions| {
            Ok(Box::new(YearTagProcessor) as Box<dyn LanguageProcessor>)
        });
        let registry = Arc::new(registry);

        let mut zh = TextSanitizer::new(LanguageSelector::Code("zh".to_string()), Arc::clone(&registry));
        let mut unknown = TextSanitizer::new(LanguageSelector::Code("xx".to_string()), registry);
        assert_eq!(zh.sanitize_text("年份2025").unwrap(), "年份CUSTOM");
        assert_eq!(unknown.sanitize_text("年份2025").unwrap(), "年份CUSTOM");
    }

    #[test]
    fn test_fallback_without_registered_chinese_uses_builtin() {
        let mut registry = ProcessorRegistry::empty();
        registry.register("en", |options: &ProcessorOptions| {
            Ok(Box::new(EnglishProcessor::with_options(options)?) as Box<dyn LanguageProcessor>)
        });
        let mut s = TextSanitizer::new(LanguageSelector::Code("xx".to_string()), Arc::new(registry));
        assert_eq!(s.sanitize_text("有123辆车").unwrap(), "有X辆车");
        assert_eq!(s.current_language(), Some("zh"));
    }

    #[test]
    fn test_unsupported_detection_falls_back() {
        let mut s = sanitizer("auto")
            .with_detector(Box::new(FixedDetector(Detection::Detected("fr".to_string()))));
        assert_eq!(s.sanitize_text("有3辆车").unwrap(), "有X辆车");
        assert_eq!(s.current_language(), Some("zh"));
    }

    #[test]
    fn test_processor_is_memoized() {
        let created = Arc::new(AtomicUsize::new(0));
        let mut registry = ProcessorRegistry::default();
        let counter = Arc::clone(&created);
        registry.register("en", move |options: &ProcessorOptions| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(EnglishProcessor::with_options(options)?) as Box<dyn LanguageProcessor>)
        });
        let mut s = TextSanitizer::new(LanguageSelector::Code("en".to_string()), Arc::new(registry));
        for _ in 0..3 {
            s.sanitize_text("42 items").unwrap();
        }
        assert_eq!(created.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_processor_options_are_applied() {
        let mut options = HashMap::new();
        options.insert(
            "ZH".to_string(),
            ProcessorOptions { name: None, extra_units: vec!["艘".to_string()] },
        );
        let mut s = sanitizer("zh").with_processor_options(options);
        assert_eq!(s.sanitize_text("7艘船").unwrap(), "X艘船");
    }

    #[test]
    fn test_json_structure_is_preserved() {
        let mut s = sanitizer("zh");
        let doc = json!({
            "title": "《星际公元5102年消费者权益保护测试》",
            "content": "今天是5102年18月27日，共有231架个人SSTO参与测试",
            "count": 7,
            "ratio": 0.5,
            "flag": true,
            "missing": null,
            "details": {
                "date_range": "5102年1月-16月",
                "items": ["有123辆车", 2025, ""]
            }
        });
        let out = s.sanitize_json_data(doc).unwrap();

        assert_eq!(out["title"], "《星际公元5102年消费者权益保护测试》");
        assert_eq!(out["content"], "今天是X年X月X日，共有X架个人SSTO参与测试");
        assert_eq!(out["count"], 7);
        assert_eq!(out["ratio"], 0.5);
        assert_eq!(out["flag"], true);
        assert!(out["missing"].is_null());
        assert_eq!(out["details"]["date_range"], "X年X月-X月");
        assert_eq!(out["details"]["items"], json!(["有X辆车", 2025, ""]));

        let keys: Vec<&String> = out.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["title", "content", "count", "ratio", "flag", "missing", "details"]);
    }
}
