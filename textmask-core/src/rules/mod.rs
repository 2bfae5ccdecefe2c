//! Ordered masking rules and their compilation.
//!
//! A language processor describes its date and number masking as ordered
//! lists of `PatternRule`s. Order is significant: a later rule sees the
//! output of every earlier one, so broad patterns (a bare four-digit year)
//! must come after the specific date shapes they would otherwise destroy.

pub mod compiler;

pub use compiler::{compile_rules, get_or_compile_rules, CompiledRule, RuleSet};

use std::hash::Hash;

/// Maximum allowed length for a masking pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// A single (pattern, replacement) pair in a language's rule list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternRule {
    /// Identifier used in logs and compilation errors (e.g., "zh_full_date").
    pub name: String,
    /// The regex pattern string.
    pub pattern: String,
    /// Replacement text; `${n}` references capture groups.
    pub replace_with: String,
    /// Compile the pattern with case-insensitive matching.
    pub case_insensitive: bool,
}

impl PatternRule {
    pub fn new(name: &str, pattern: &str, replace_with: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
            replace_with: replace_with.to_string(),
            case_insensitive: false,
        }
    }

    /// Same rule, matched without regard to case.
    pub fn ignore_case(mut self) -> Self {
        self.case_insensitive = true;
        self
    }
}
