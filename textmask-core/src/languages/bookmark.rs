//! Protected spans and the placeholders that stand in for them.
//!
//! Before any masking runs, delimiter-wrapped spans are cut out of the text
//! and replaced by opaque placeholder tokens. Each cut is recorded as a
//! `Bookmark` so the span can be put back verbatim once masking is done.

use anyhow::{anyhow, Result};
use log::warn;
use regex::Regex;
use uuid::Uuid;

/// Prefix shared by every placeholder token.
pub const PLACEHOLDER_PREFIX: &str = "__BOOKMARK_";
const PLACEHOLDER_SUFFIX: &str = "__";
const MAX_PLACEHOLDER_ATTEMPTS: usize = 8;

/// The delimiter pair that wrapped a protected span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `"…"`
    DoubleQuote,
    /// `'…'`
    SingleQuote,
    /// `《…》`
    BookTitle,
    /// `“…”`
    CurlyQuote,
}

impl Delimiter {
    pub fn open(self) -> char {
        match self {
            Delimiter::DoubleQuote => '"',
            Delimiter::SingleQuote => '\'',
            Delimiter::BookTitle => '《',
            Delimiter::CurlyQuote => '“',
        }
    }

    pub fn close(self) -> char {
        match self {
            Delimiter::DoubleQuote => '"',
            Delimiter::SingleQuote => '\'',
            Delimiter::BookTitle => '》',
            Delimiter::CurlyQuote => '”',
        }
    }

    /// Re-wraps `content` in this delimiter pair.
    pub fn wrap(self, content: &str) -> String {
        let mut wrapped = String::with_capacity(content.len() + 6);
        wrapped.push(self.open());
        wrapped.push_str(content);
        wrapped.push(self.close());
        wrapped
    }
}

/// A protected span: the placeholder that replaced it, its inner content,
/// and the delimiter pair that surrounded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub placeholder: String,
    pub content: String,
    pub delimiter: Delimiter,
}

/// Generates a placeholder that occurs nowhere in `text` or `taken`.
///
/// The token is a UUIDv4 with its hex digits shifted into letters, so it
/// contains no decimal digits and no date or number rule can touch it.
pub fn new_placeholder(text: &str, taken: &[Bookmark]) -> Result<String> {
    for _ in 0..MAX_PLACEHOLDER_ATTEMPTS {
        let token: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .map(|c| match c {
                '0'..='9' => (b'g' + (c as u8 - b'0')) as char,
                other => other,
            })
            .collect();
        let placeholder = format!("{PLACEHOLDER_PREFIX}{token}{PLACEHOLDER_SUFFIX}");
        if !text.contains(&placeholder) && taken.iter().all(|b| b.placeholder != placeholder) {
            return Ok(placeholder);
        }
    }
    Err(anyhow!(
        "could not generate a unique placeholder after {} attempts",
        MAX_PLACEHOLDER_ATTEMPTS
    ))
}

/// Replaces every match of `pattern` with a fresh placeholder.
///
/// `pattern` is an alternation whose i-th capture group holds the inner
/// content for `delimiters[i]`. The delimiter is chosen by which group
/// participated in the match, so empty spans keep their kind.
pub fn protect_spans(
    text: &str,
    pattern: &Regex,
    delimiters: &[Delimiter],
) -> Result<(String, Vec<Bookmark>)> {
    let mut bookmarks: Vec<Bookmark> = Vec::new();
    let mut protected = String::with_capacity(text.len());
    let mut last_end = 0usize;

    for caps in pattern.captures_iter(text) {
        let whole = caps.get(0).ok_or_else(|| anyhow!("protect pattern produced an empty capture"))?;
        let (group, delimiter) = delimiters
            .iter()
            .enumerate()
            .find_map(|(i, d)| caps.get(i + 1).map(|m| (m, *d)))
            .ok_or_else(|| anyhow!("protect pattern matched without a content group"))?;

        let placeholder = new_placeholder(text, &bookmarks)?;
        protected.push_str(&text[last_end..whole.start()]);
        protected.push_str(&placeholder);
        last_end = whole.end();

        bookmarks.push(Bookmark {
            placeholder,
            content: group.as_str().to_string(),
            delimiter,
        });
    }
    protected.push_str(&text[last_end..]);

    Ok((protected, bookmarks))
}

/// Puts every bookmarked span back in place of its placeholder.
///
/// A placeholder missing from `text` is skipped with a warning.
pub fn restore_bookmarks(text: &str, bookmarks: &[Bookmark]) -> String {
    let mut restored = text.to_string();
    for bookmark in bookmarks {
        if restored.contains(&bookmark.placeholder) {
            restored = restored.replacen(&bookmark.placeholder, &bookmark.delimiter.wrap(&bookmark.content), 1);
        } else {
            warn!(
                "Placeholder for protected span {:?} was not found during restore.",
                bookmark.delimiter.wrap(&bookmark.content)
            );
        }
    }
    restored
}
