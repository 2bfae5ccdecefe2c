// textmask-core/src/lib.rs
//! # textmask Core Library
//!
//! `textmask-core` masks volatile, potentially re-identifying content in
//! free text: dates become fixed tokens such as `X年X月X日` or
//! `YYYY-MM-DD`, and numbers become runs of `X`. Quoted titles and
//! citations are protected and come back verbatim.
//!
//! ## Modules
//!
//! * `languages`: The `LanguageProcessor` trait, the shared pipeline and the Chinese and English processors.
//! * `rules`: Ordered masking rules and their cached compilation.
//! * `registry`: Maps language codes to processor constructors.
//! * `detection`: Two-outcome language detection for `auto` mode.
//! * `sanitizer`: `TextSanitizer`, which selects processors and walks JSON values.
//! * `config`: `SanitizerConfig`, loadable from YAML.
//! * `file_handler` / `batch`: File discovery and concurrent batch processing.
//! * `headless`: One-shot convenience functions.
//!
//! ## Usage Example
//!
//! ```rust
//! use std::sync::Arc;
//! use textmask_core::{LanguageSelector, ProcessorRegistry, TextSanitizer};
//! use serde_json::json;
//!
//! fn main() -> anyhow::Result<()> {
//!     let registry = Arc::new(ProcessorRegistry::default());
//!     let mut sanitizer = TextSanitizer::new(LanguageSelector::Auto, registry);
//!
//!     let document = json!({
//!         "title": "《星际公元5102年消费者权益保护测试》",
//!         "content": "有123辆车",
//!     });
//!     let masked = sanitizer.sanitize_json_data(document)?;
//!
//!     assert_eq!(masked["title"], "《星际公元5102年消费者权益保护测试》");
//!     assert_eq!(masked["content"], "有X辆车");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return `TextmaskError`. Processor trait methods use
//! `anyhow::Result` so externally registered languages can report their
//! own failures.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod batch;
pub mod config;
pub mod detection;
pub mod errors;
pub mod file_handler;
pub mod headless;
pub mod languages;
pub mod registry;
pub mod rules;
pub mod sanitizer;

pub use batch::{BatchProcessor, BatchReport, FileFailure};
pub use config::SanitizerConfig;
pub use detection::{Detection, FixedDetector, LanguageDetector, ScriptDetector, FALLBACK_LANGUAGE};
pub use errors::TextmaskError;
pub use headless::{headless_sanitize_json, headless_sanitize_string};
pub use languages::en::EnglishProcessor;
pub use languages::zh::ChineseProcessor;
pub use languages::{Bookmark, Delimiter, LanguageProcessor, ProcessorOptions, SanitizeText};
pub use registry::{ProcessorConstructor, ProcessorRegistry};
pub use rules::{PatternRule, RuleSet};
pub use sanitizer::{LanguageSelector, TextSanitizer, AUTO};
