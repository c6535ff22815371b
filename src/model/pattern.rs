//! Compiled search expressions.
//!
//! Patterns are compiled in multi-line mode so `^` and `$` anchor at line
//! boundaries whether they are tested against a single line span or against
//! the whole document from an offset.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// A search expression failed to compile.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid pattern '{pattern}': {reason}")]
pub struct PatternError {
    /// The expression as typed by the user.
    pub pattern: String,
    /// Compiler diagnostic.
    pub reason: String,
}

/// A compiled regular expression used by the search navigator.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    regex: Regex,
    ignore_case: bool,
}

impl SearchPattern {
    /// Compile a case-sensitive pattern.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the expression is not valid.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Self::with_options(pattern, false)
    }

    /// Compile a pattern, optionally ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if the expression is not valid.
    pub fn with_options(pattern: &str, ignore_case: bool) -> Result<Self, PatternError> {
        let regex = RegexBuilder::new(pattern)
            .multi_line(true)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|e| PatternError {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { regex, ignore_case })
    }

    /// The source expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the pattern was compiled case-insensitively.
    pub fn ignores_case(&self) -> bool {
        self.ignore_case
    }

    /// Test the pattern against exactly `haystack[start..end]`.
    ///
    /// Nothing outside the span takes part in the match, and a trailing line
    /// break is not part of it either. Returns `false` for a span that is
    /// out of range or not on character boundaries.
    pub fn is_match_span(&self, haystack: &str, start: usize, end: usize) -> bool {
        haystack.get(start..end).is_some_and(|span| {
            let line = span.strip_suffix('\n').unwrap_or(span);
            self.regex.is_match(line)
        })
    }

    /// Byte offset of the first match starting at or after `offset`.
    ///
    /// The text before `offset` still provides context for anchors and word
    /// boundaries.
    pub fn find_from(&self, haystack: &str, offset: usize) -> Option<usize> {
        if offset > haystack.len() || !haystack.is_char_boundary(offset) {
            return None;
        }
        self.regex.find_at(haystack, offset).map(|m| m.start())
    }
}

impl PartialEq for SearchPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str() && self.ignore_case == other.ignore_case
    }
}

impl Eq for SearchPattern {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pattern_reports_source() {
        let err = SearchPattern::new("[a-").unwrap_err();
        assert_eq!(err.pattern, "[a-");
        assert!(!err.reason.is_empty());
    }

    #[test]
    fn bounded_span_ignores_text_outside_it() {
        let pattern = SearchPattern::new("needle").unwrap();
        let text = "hay\nneedle\nhay\n";
        assert!(!pattern.is_match_span(text, 0, 4));
        assert!(pattern.is_match_span(text, 4, 11));
        assert!(!pattern.is_match_span(text, 11, 15));
    }

    #[test]
    fn bounded_span_excludes_the_line_break() {
        let pattern = SearchPattern::new("^$").unwrap();
        assert!(!pattern.is_match_span("abc\n", 0, 4));
        assert!(pattern.is_match_span("abc\n\n", 4, 5));
    }

    #[test]
    fn bounded_span_out_of_range_is_no_match() {
        let pattern = SearchPattern::new("a").unwrap();
        assert!(!pattern.is_match_span("abc", 2, 10));
    }

    #[test]
    fn line_anchors_apply_per_line() {
        let pattern = SearchPattern::new("^two$").unwrap();
        let text = "one\ntwo\nthree\n";
        assert_eq!(pattern.find_from(text, 0), Some(4));
        assert!(pattern.is_match_span(text, 4, 8));
    }

    #[test]
    fn find_from_skips_earlier_matches() {
        let pattern = SearchPattern::new("x").unwrap();
        let text = "x\nx\n";
        assert_eq!(pattern.find_from(text, 0), Some(0));
        assert_eq!(pattern.find_from(text, 1), Some(2));
        assert_eq!(pattern.find_from(text, 3), None);
        assert_eq!(pattern.find_from(text, 99), None);
    }

    #[test]
    fn ignore_case_option() {
        let sensitive = SearchPattern::new("error").unwrap();
        let insensitive = SearchPattern::with_options("error", true).unwrap();
        assert!(!sensitive.is_match_span("ERROR", 0, 5));
        assert!(insensitive.is_match_span("ERROR", 0, 5));
        assert!(insensitive.ignores_case());
        assert_eq!(insensitive.as_str(), "error");
    }
}
