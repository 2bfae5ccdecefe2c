//! English processor.
//!
//! Protects single- and double-quoted spans, masks numeric and spelled-out
//! month dates, and masks counted quantities followed by an English unit.
//!
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::bookmark::{protect_spans, restore_bookmarks, Bookmark, Delimiter};
use super::{mask_digits, unit_alternation, LanguageProcessor, ProcessorOptions};
use crate::errors::TextmaskError;
use crate::rules::{get_or_compile_rules, PatternRule, RuleSet};

pub const CODE: &str = "en";

static PROTECTED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)"|'([^']*)'"#).expect("en protect pattern is valid"));

static FREE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+\.?\d*)\b").expect("en number pattern is valid"));

pub const UNITS: &[&str] = &[
    "cars", "car", "vehicles", "vehicle", "people", "items", "item", "units", "unit", "dollars",
    "dollar", "USD", "%", "percent",
];

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

fn date_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::new("en_us_date", r"\d{1,2}/\d{1,2}/\d{4}", "MM/DD/YYYY").ignore_case(),
        PatternRule::new("en_iso_date", r"\d{4}-\d{1,2}-\d{1,2}", "YYYY-MM-DD").ignore_case(),
        PatternRule::new(
            "en_long_date",
            &format!(r"({MONTHS})\s+\d{{1,2}},\s+\d{{4}}"),
            "Month DD, YYYY",
        )
        .ignore_case(),
        PatternRule::new("en_month_year", r"\d{1,2}/\d{4}", "MM/YYYY").ignore_case(),
        PatternRule::new("en_year", r"\d{4}", "YYYY").ignore_case(),
    ]
}

fn unit_rules(extra_units: &[String]) -> Vec<PatternRule> {
    vec![PatternRule::new(
        "en_counted_quantity",
        &format!(r"(\d+\.?\d*)\s*({})", unit_alternation(UNITS, extra_units)),
        "X ${2}",
    )
    .ignore_case()]
}

#[derive(Debug)]
pub struct EnglishProcessor {
    name: String,
    dates: Arc<RuleSet>,
    units: Arc<RuleSet>,
}

impl EnglishProcessor {
    pub fn new() -> Result<Self, TextmaskError> {
        Self::with_options(&ProcessorOptions::default())
    }

    pub fn with_options(options: &ProcessorOptions) -> Result<Self, TextmaskError> {
        Ok(Self {
            name: options.name.clone().unwrap_or_else(|| "English".to_string()),
            dates: get_or_compile_rules(&date_rules())?,
            units: get_or_compile_rules(&unit_rules(&options.extra_units))?,
        })
    }
}

impl LanguageProcessor for EnglishProcessor {
    fn code(&self) -> &str {
        CODE
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn protect_special_content(&self, text: &str) -> Result<(String, Vec<Bookmark>)> {
        protect_spans(text, &PROTECTED_SPAN, &[Delimiter::DoubleQuote, Delimiter::SingleQuote])
    }

    fn restore_special_content(&self, text: &str, bookmarks: &[Bookmark]) -> Result<String> {
        Ok(restore_bookmarks(text, bookmarks))
    }

    fn replace_dates(&self, text: &str) -> Result<String> {
        Ok(self.dates.apply(text))
    }

    fn replace_numbers(&self, text: &str) -> Result<String> {
        let text = self.units.apply(text);
        Ok(FREE_NUMBER
            .replace_all(&text, |caps: &Captures| mask_digits(&caps[1]))
            .into_owned())
    }
}
