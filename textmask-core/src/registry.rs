//! registry.rs - Maps language codes to processor constructors.
//!
//! The registry is an ordinary value: build one, register any extra
//! languages, and hand it (usually behind an `Arc`) to every sanitizer
//! that should see the same set of languages.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::errors::TextmaskError;
use crate::languages::en::{self, EnglishProcessor};
use crate::languages::zh::{self, ChineseProcessor};
use crate::languages::{LanguageProcessor, ProcessorOptions};

/// Builds a processor from its options.
pub type ProcessorConstructor =
    Arc<dyn Fn(&ProcessorOptions) -> Result<Box<dyn LanguageProcessor>, TextmaskError> + Send + Sync>;

/// The code→constructor table used to create language processors.
#[derive(Clone)]
pub struct ProcessorRegistry {
    constructors: HashMap<String, ProcessorConstructor>,
}

impl fmt::Debug for ProcessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorRegistry")
            .field("codes", &self.supported_codes())
            .finish()
    }
}

impl Default for ProcessorRegistry {
    /// A registry with the built-in Chinese and English processors.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(zh::CODE, |options: &ProcessorOptions| {
            Ok(Box::new(ChineseProcessor::with_options(options)?) as Box<dyn LanguageProcessor>)
        });
        registry.register(en::CODE, |options: &ProcessorOptions| {
            Ok(Box::new(EnglishProcessor::with_options(options)?) as Box<dyn LanguageProcessor>)
        });
        registry
    }
}

impl ProcessorRegistry {
    /// A registry with no languages at all.
    pub fn empty() -> Self {
        Self { constructors: HashMap::new() }
    }

    /// Adds or replaces the constructor for `code`. The last registration
    /// for a code wins.
    pub fn register<F>(&mut self, code: &str, constructor: F)
    where
        F: Fn(&ProcessorOptions) -> Result<Box<dyn LanguageProcessor>, TextmaskError> + Send + Sync + 'static,
    {
        let code = code.to_lowercase();
        if self.constructors.insert(code.clone(), Arc::new(constructor)).is_some() {
            debug!("Replaced processor constructor for language '{}'.", code);
        } else {
            debug!("Registered processor constructor for language '{}'.", code);
        }
    }

    /// Creates a processor for `code` (case-insensitive).
    pub fn create(&self, code: &str, options: &ProcessorOptions) -> Result<Box<dyn LanguageProcessor>, TextmaskError> {
        let constructor = self
            .constructors
            .get(&code.to_lowercase())
            .ok_or_else(|| TextmaskError::UnsupportedLanguage(code.to_string()))?;
        constructor(options)
    }

    pub fn supports(&self, code: &str) -> bool {
        self.constructors.contains_key(&code.to_lowercase())
    }

    /// Every registered code, sorted.
    pub fn supported_codes(&self) -> BTreeSet<String> {
        self.constructors.keys().cloned().collect()
    }
}
