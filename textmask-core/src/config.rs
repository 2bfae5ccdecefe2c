//! Configuration management for `textmask-core`.
//!
//! A `SanitizerConfig` collects everything a batch run needs besides its
//! input path: the language selector, the worker bound, the suffix of
//! processed files, and per-language processor options. It can be loaded
//! from YAML and is validated against a `ProcessorRegistry`.
//!
//! License: MIT OR Apache-2.0

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::errors::TextmaskError;
use crate::languages::ProcessorOptions;
use crate::registry::ProcessorRegistry;
use crate::sanitizer::LanguageSelector;

pub const DEFAULT_WORKERS: usize = 10;
pub const MIN_WORKERS: usize = 1;
pub const MAX_WORKERS: usize = 50;
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_p";

/// Top-level configuration for sanitizing a batch of JSON files.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// `auto` or a registered language code.
    pub language: LanguageSelector,
    /// Upper bound on concurrently processed files.
    pub workers: usize,
    /// Appended to the file stem of every output file (`name_p.json`).
    pub output_suffix: String,
    /// Processor options keyed by language code.
    pub languages: HashMap<String, ProcessorOptions>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            language: LanguageSelector::Auto,
            workers: DEFAULT_WORKERS,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            languages: HashMap::new(),
        }
    }
}

impl SanitizerConfig {
    /// Loads a configuration from a YAML file. Missing fields take their
    /// default values.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SanitizerConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(
            "Loaded configuration: language={}, workers={}, {} language override(s).",
            config.language,
            config.workers,
            config.languages.len()
        );
        Ok(config)
    }

    /// Checks every field, reporting all problems at once.
    pub fn validate(&self, registry: &ProcessorRegistry) -> Result<(), TextmaskError> {
        let mut errors = Vec::new();

        if !(MIN_WORKERS..=MAX_WORKERS).contains(&self.workers) {
            errors.push(format!(
                "`workers` must be between {} and {}, got {}.",
                MIN_WORKERS, MAX_WORKERS, self.workers
            ));
        }

        let suffix = self.output_suffix.trim();
        if suffix.is_empty() {
            errors.push("`output_suffix` cannot be empty.".to_string());
        } else if suffix.contains(['/', '\\']) {
            errors.push(format!("`output_suffix` '{}' cannot contain path separators.", suffix));
        }

        if let LanguageSelector::Code(code) = &self.language {
            if !registry.supports(code) {
                let supported: Vec<String> = registry.supported_codes().into_iter().collect();
                errors.push(format!(
                    "Language '{}' is not supported (expected auto or one of: {}).",
                    code,
                    supported.join(", ")
                ));
            }
        }

        for (code, options) in &self.languages {
            if !registry.supports(code) {
                errors.push(format!("Options given for unknown language '{}'.", code));
            }
            for unit in &options.extra_units {
                if unit.trim().is_empty() {
                    errors.push(format!("Language '{}' has an empty entry in `extra_units`.", code));
                } else if unit.chars().any(|c| c.is_ascii_digit()) {
                    errors.push(format!("Language '{}': unit '{}' cannot contain digits.", code, unit));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(TextmaskError::InvalidConfig(errors.join("\n")))
        }
    }
}
