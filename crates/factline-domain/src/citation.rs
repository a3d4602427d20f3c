//! Citation markers embedded in explanations
//!
//! Explanations reference evidence with inline `{{n}}` markers, where `n` is the
//! 1-based `source_number` within the claim's evidence set. This module scans an
//! explanation into alternating literal and reference tokens.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(\d+)\}\}").expect("citation marker pattern is valid")
});

/// A piece of an explanation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationToken<'a> {
    /// Plain text between markers
    Literal(&'a str),
    /// A `{{n}}` marker, carrying `n`
    Reference(u32),
}

/// Iterator over the tokens of an explanation
pub struct CitationTokens<'a> {
    text: &'a str,
    pos: usize,
    pending: Option<u32>,
}

impl<'a> Iterator for CitationTokens<'a> {
    type Item = CitationToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(n) = self.pending.take() {
            return Some(CitationToken::Reference(n));
        }
        if self.pos >= self.text.len() {
            return None;
        }

        let rest = &self.text[self.pos..];
        for caps in MARKER.captures_iter(rest) {
            let (Some(whole), Some(digits)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            // Numbers too large for u32 stay literal text.
            let Ok(n) = digits.as_str().parse::<u32>() else {
                continue;
            };

            let literal = &rest[..whole.start()];
            self.pos += whole.end();
            if literal.is_empty() {
                return Some(CitationToken::Reference(n));
            }
            self.pending = Some(n);
            return Some(CitationToken::Literal(literal));
        }

        self.pos = self.text.len();
        Some(CitationToken::Literal(rest))
    }
}

/// Scan an explanation into literal and reference tokens
///
/// # Examples
///
/// ```
/// use factline_domain::citation::{tokenize, CitationToken};
///
/// let tokens: Vec<_> = tokenize("Height is 330 m {{1}}.").collect();
/// assert_eq!(
///     tokens,
///     vec![
///         CitationToken::Literal("Height is 330 m "),
///         CitationToken::Reference(1),
///         CitationToken::Literal("."),
///     ]
/// );
/// ```
pub fn tokenize(explanation: &str) -> CitationTokens<'_> {
    CitationTokens {
        text: explanation,
        pos: 0,
        pending: None,
    }
}

/// Source numbers referenced by an explanation, in order of first appearance
pub fn referenced_numbers(explanation: &str) -> Vec<u32> {
    let mut seen = BTreeSet::new();
    tokenize(explanation)
        .filter_map(|token| match token {
            CitationToken::Reference(n) if seen.insert(n) => Some(n),
            _ => None,
        })
        .collect()
}

/// Remove every marker, leaving only literal text
pub fn strip_markers(explanation: &str) -> String {
    tokenize(explanation)
        .filter_map(|token| match token {
            CitationToken::Literal(text) => Some(text),
            CitationToken::Reference(_) => None,
        })
        .collect()
}
