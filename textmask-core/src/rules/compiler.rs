//! compiler.rs - Compilation and caching of masking rules.
//!
//! Converts ordered `PatternRule` lists into `RuleSet`s. Compiled sets are
//! kept in a global, thread-safe cache keyed by a hash of the rule list, so
//! swapping processors back and forth does not recompile their patterns.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{Regex, RegexBuilder};
use lazy_static::lazy_static;
use std::borrow::Cow;
use std::sync::{Arc, RwLock};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;

use super::{PatternRule, MAX_PATTERN_LENGTH};
use crate::errors::TextmaskError;

/// A single compiled masking rule.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The text every match is replaced with.
    pub replace_with: String,
    /// The name of the originating `PatternRule`.
    pub name: String,
}

/// An ordered collection of compiled rules, applied first to last.
#[derive(Debug)]
pub struct RuleSet {
    pub rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Applies every rule in order, each one to the output of the previous.
    pub fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();
        for rule in &self.rules {
            if let Cow::Owned(replaced) = rule.regex.replace_all(&current, rule.replace_with.as_str()) {
                debug!("Rule '{}' rewrote text.", rule.name);
                current = replaced;
            }
        }
        current
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

lazy_static! {
    /// A thread-safe, global cache of compiled rule sets.
    /// The key is a hash of the ordered rule list.
    static ref RULE_SET_CACHE: RwLock<HashMap<u64, Arc<RuleSet>>> = RwLock::new(HashMap::new());
}

/// Hashes an ordered rule list. Order is part of the key: the same rules in
/// a different order mask differently.
fn hash_rules(rules: &[PatternRule]) -> u64 {
    let mut hasher = DefaultHasher::new();
    rules.hash(&mut hasher);
    hasher.finish()
}

/// Compiles a list of `PatternRule`s into a `RuleSet`, preserving order.
///
/// All failures are collected and reported together.
pub fn compile_rules(rules_to_compile: &[PatternRule]) -> Result<RuleSet, TextmaskError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::with_capacity(rules_to_compile.len());
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        if rule.pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(TextmaskError::PatternLengthExceeded(
                rule.name.clone(),
                rule.pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(&rule.pattern)
            .case_insensitive(rule.case_insensitive)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build();

        match regex_result {
            Ok(regex) => {
                log::debug!(
                    target: "textmask_core::rules",
                    "Rule '{}' compiled successfully.",
                    &rule.name
                );
                compiled_rules.push(CompiledRule {
                    regex,
                    replace_with: rule.replace_with.clone(),
                    name: rule.name.clone(),
                });
            }
            Err(e) => {
                compilation_errors.push(TextmaskError::RuleCompilation(rule.name.clone(), e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors.iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(TextmaskError::Fatal(format!("Failed to compile {} rule(s):\n{}", compilation_errors.len(), error_message)))
    } else {
        debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
        Ok(RuleSet { rules: compiled_rules })
    }
}

/// Gets a `RuleSet` from the cache or compiles it if not found.
pub fn get_or_compile_rules(rules: &[PatternRule]) -> Result<Arc<RuleSet>, TextmaskError> {
    let cache_key = hash_rules(rules);

    {
        let cache = RULE_SET_CACHE
            .read()
            .map_err(|_| TextmaskError::Fatal("rule set cache lock poisoned".to_string()))?;
        if let Some(rule_set) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", &cache_key);
            return Ok(Arc::clone(rule_set));
        }
    } // Read lock is released here.

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled = Arc::new(compile_rules(rules)?);

    RULE_SET_CACHE
        .write()
        .map_err(|_| TextmaskError::Fatal("rule set cache lock poisoned".to_string()))?
        .insert(cache_key, Arc::clone(&compiled));

    debug!("Successfully compiled and cached rules for key: {}", &cache_key);
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_apply_in_order() {
        let rules = vec![
            PatternRule::new("full", r"\d{4}-\d{2}-\d{2}", "DATE"),
            PatternRule::new("year", r"\d{4}", "YEAR"),
        ];
        let set = compile_rules(&rules).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.apply("on 2025-08-07 and 1999"), "on DATE and YEAR");
    }

    #[test]
    fn test_reversed_order_changes_result() {
        let rules = vec![
            PatternRule::new("year", r"\d{4}", "YEAR"),
            PatternRule::new("full", r"\d{4}-\d{2}-\d{2}", "DATE"),
        ];
        let set = compile_rules(&rules).unwrap();
        assert_eq!(set.apply("2025-08-07"), "YEAR-08-07");
    }

    #[test]
    fn test_case_insensitive_rule() {
        let rules = vec![PatternRule::new("month", "august", "Month").ignore_case()];
        let set = compile_rules(&rules).unwrap();
        assert_eq!(set.apply("AUGUST and August"), "Month and Month");
    }

    #[test]
    fn test_compile_errors_are_collected() {
        let rules = vec![
            PatternRule::new("broken_a", r"(\d+", "X"),
            PatternRule::new("ok", r"\d+", "X"),
            PatternRule::new("too_long", &"a".repeat(MAX_PATTERN_LENGTH + 1), "X"),
        ];
        let err = compile_rules(&rules).unwrap_err().to_string();
        assert!(err.contains("Failed to compile 2 rule(s)"));
        assert!(err.contains("broken_a"));
        assert!(err.contains("too_long"));
    }

    #[test]
    fn test_cache_returns_shared_instance() {
        let rules = vec![PatternRule::new("cache_probe", r"cache-\d+", "cache-N")];
        let first = get_or_compile_rules(&rules).unwrap();
        let second = get_or_compile_rules(&rules).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
