//! Chinese processor.
//!
//! Protects book titles (`《…》`) and curly-quoted speech (`“…”`), masks
//! dates written with 年/月/日 or dash/slash separators, and masks counted
//! quantities using the Chinese measure-word vocabulary.
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

pub const CODE: &str = "zh";

static PROTECTED_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"《(.*?)》|“(.*?)”").expect("zh protect pattern is valid"));

static FREE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d+\.?\d*)\b").expect("zh number pattern is valid"));

static LEAD_IN_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(量|如|例|和|率|到|达|获)(\s*)(\d+\.?\d*)").expect("zh lead-in pattern is valid")
});

/// Measure words and suffixes that mark the preceding number as a count.
pub const UNITS: &[&str] = &[
    "辆", "个", "所", "家", "车", "只", "队", "位", "笔", "头", "楼", "层", "多", "条", "张", "片",
    "块", "类", "万", "道", "封", "百", "-", "届", "和", "亿", "千", "根", "本", "台", "架", "扇",
    "朵", "堆", "名", "厘", "分", "种", "场", "余", "人", "项", "期", "件", "篇", "%", "份", "次",
    "X",
];

/// Quote and bracket marks next to which numbers are left alone.
const QUOTE_MARKS: &[char] = &['《', '》', '“', '”', '『', '』', '「', '」', '〈', '〉'];

fn date_rules() -> Vec<PatternRule> {
    vec![
        PatternRule::new("zh_full_date", r"\d{4}年\d{1,2}月\d{1,2}日", "X年X月X日"),
        PatternRule::new("zh_iso_date", r"\d{4}-\d{1,2}-\d{1,2}", "X年X月X日"),
        PatternRule::new("zh_year_month", r"\d{4}年\d{1,2}月", "X年X月"),
        PatternRule::new("zh_month_day", r"\d{1,2}月\d{1,2}日", "X月X日"),
        PatternRule::new("zh_month_range", r"\d{1,2}-\d{1,2}月", "X-X月"),
        PatternRule::new("zh_spaced_month_day", r"\d{1,2} 月\d{1,2} 日", "X月X日"),
        PatternRule::new("zh_year", r"\d{4}年", "X年"),
        PatternRule::new("zh_month", r"\d{1,2}月", "X月"),
        PatternRule::new("zh_day", r"\d{1,2}日", "X日"),
        PatternRule::new("zh_slash_date", r"\d{4}/\d{1,2}/\d{1,2}", "X年X月X日"),
    ]
}

fn unit_rules(extra_units: &[String]) -> Vec<PatternRule> {
    vec![PatternRule::new(
        "zh_counted_quantity",
        &format!(r"(\d+\.?\d*)({})", unit_alternation(UNITS, extra_units)),
        "X${2}",
    )]
}

fn is_quote_mark(c: Option<char>) -> bool {
    c.map_or(false, |c| QUOTE_MARKS.contains(&c))
}

#[derive(Debug)]
pub struct ChineseProcessor {
    name: String,
    dates: Arc<RuleSet>,
    units: Arc<RuleSet>,
}

impl ChineseProcessor {
    pub fn new() -> Result<Self, TextmaskError> {
        Self::with_options(&ProcessorOptions::default())
    }

    pub fn with_options(options: &ProcessorOptions) -> Result<Self, TextmaskError> {
        Ok(Self {
            name: options.name.clone().unwrap_or_else(|| "Chinese".to_string()),
            dates: get_or_compile_rules(&date_rules())?,
            units: get_or_compile_rules(&unit_rules(&options.extra_units))?,
        })
    }

    /// Masks free-standing numbers unless they touch a quote mark.
    fn mask_free_numbers(&self, text: &str) -> String {
        FREE_NUMBER
            .replace_all(text, |caps: &Captures| {
                let whole = &caps[0];
                let start = caps.get(0).map_or(0, |m| m.start());
                let end = start + whole.len();
                let before = text[..start].chars().next_back();
                let after = text[end..].chars().next();
                if is_quote_mark(before) || is_quote_mark(after) {
                    whole.to_string()
                } else {
                    mask_digits(&caps[1])
                }
            })
            .into_owned()
    }

    /// Masks numbers that follow one of the lead-in characters, even when
    /// no unit word follows them.
    fn mask_lead_in_numbers(&self, text: &str) -> String {
        LEAD_IN_NUMBER
            .replace_all(text, |caps: &Captures| {
                let start = caps.get(0).map_or(0, |m| m.start());
                if is_quote_mark(text[..start].chars().next_back()) {
                    caps[0].to_string()
                } else {
                    format!("{}{}{}", &caps[1], &caps[2], mask_digits(&caps[3]))
                }
            })
            .into_owned()
    }
}

impl LanguageProcessor for ChineseProcessor {
    fn code(&self) -> &str {
        CODE
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn protect_special_content(&self, text: &str) -> Result<(String, Vec<Bookmark>)> {
        protect_spans(text, &PROTECTED_SPAN, &[Delimiter::BookTitle, Delimiter::CurlyQuote])
    }

    fn restore_special_content(&self, text: &str, bookmarks: &[Bookmark]) -> Result<String> {
        Ok(restore_bookmarks(text, bookmarks))
    }

    fn replace_dates(&self, text: &str) -> Result<String> {
        Ok(self.dates.apply(text))
    }

    fn replace_numbers(&self, text: &str) -> Result<String> {
        let text = self.units.apply(text);
        let text = self.mask_free_numbers(&text);
        Ok(self.mask_lead_in_numbers(&text))
    }
}
