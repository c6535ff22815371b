//! Formatted text buffer.
//!
//! [`FmText`] stores line-oriented text together with style runs. The pager
//! never edits it in place: it appends, slices out line and column windows
//! for display, and maps between byte offsets and line numbers for search.
//!
//! A line is a run of text terminated by `\n`; a non-empty tail without a
//! terminator counts as one more line.

use crate::model::pattern::SearchPattern;
use memchr::{memchr_iter, memrchr};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// A styled byte range. Bytes outside every run use the default style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StyleRun {
    start: usize,
    end: usize,
    style: Style,
}

/// Text with per-range styling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FmText {
    text: String,
    /// Sorted, non-overlapping, non-empty.
    runs: Vec<StyleRun>,
}

impl FmText {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unstyled text.
    pub fn append_normal(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append text in `style`.
    pub fn append_styled(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        let start = self.text.len();
        self.text.push_str(text);
        if style == Style::default() {
            return;
        }
        let end = self.text.len();
        match self.runs.last_mut() {
            Some(last) if last.end == start && last.style == style => last.end = end,
            _ => self.runs.push(StyleRun { start, end, style }),
        }
    }

    /// Raw text without styling.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the buffer holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the last character is a line break.
    pub fn ends_with_newline(&self) -> bool {
        self.text.ends_with('\n')
    }

    /// Number of lines, counting an unterminated tail as a line.
    pub fn num_lines(&self) -> usize {
        let breaks = memchr_iter(b'\n', self.text.as_bytes()).count();
        if self.text.is_empty() || self.ends_with_newline() {
            breaks
        } else {
            breaks + 1
        }
    }

    /// Zero-based line number containing byte `offset`.
    ///
    /// Offsets past the end map to the line after the last line break.
    pub fn line_number(&self, offset: usize) -> usize {
        let end = offset.min(self.text.len());
        memchr_iter(b'\n', &self.text.as_bytes()[..end]).count()
    }

    /// Byte offset where line `line` starts, or the buffer length if the
    /// buffer has fewer lines.
    fn line_start(&self, line: usize) -> usize {
        if line == 0 {
            return 0;
        }
        memchr_iter(b'\n', self.text.as_bytes())
            .nth(line - 1)
            .map_or(self.text.len(), |nl| nl + 1)
    }

    /// Byte span `(start, end)` of line `line`, where `end` is one past its
    /// line break (the start of the next line).
    ///
    /// A line past the end of the buffer yields `(len, len)`.
    pub fn line_extents(&self, line: usize) -> (usize, usize) {
        let start = self.line_start(line);
        let end = memchr::memchr(b'\n', &self.text.as_bytes()[start..])
            .map_or(self.text.len(), |i| start + i + 1);
        (start, end)
    }

    /// Start of the line that ends at byte `end`, found by scanning back to
    /// the previous line break.
    pub fn previous_line_start(&self, end: usize) -> usize {
        if end == 0 {
            return 0;
        }
        let end = end.min(self.text.len());
        memrchr(b'\n', &self.text.as_bytes()[..end - 1]).map_or(0, |nl| nl + 1)
    }

    /// Copy of `count` lines starting at line `first`.
    pub fn truncate_lines(&self, first: usize, count: usize) -> FmText {
        let start = self.line_start(first);
        let end = if count == 0 {
            start
        } else {
            self.line_start(first.saturating_add(count))
        };
        self.slice(start..end)
    }

    /// Copy holding, on every line, only the characters whose display
    /// columns fall within `first_col..=last_col`.
    ///
    /// A wide character straddling either edge is dropped.
    pub fn truncate_cols(&self, first_col: usize, last_col: usize) -> FmText {
        let mut out = FmText::new();
        let mut col = 0usize;
        for (chunk, style) in self.segments() {
            let mut kept = String::with_capacity(chunk.len());
            for ch in chunk.chars() {
                if ch == '\n' {
                    kept.push('\n');
                    col = 0;
                    continue;
                }
                let width = ch.width().unwrap_or(0);
                if col >= first_col && col + width <= last_col.saturating_add(1) {
                    kept.push(ch);
                }
                col += width;
            }
            out.append_styled(&kept, style);
        }
        out
    }

    /// Byte offset of the first match of `pattern` at or after `offset`.
    pub fn search(&self, pattern: &SearchPattern, offset: usize) -> Option<usize> {
        pattern.find_from(&self.text, offset)
    }

    /// Convert to ratatui text, one [`Line`] per buffer line.
    pub fn to_text(&self) -> Text<'static> {
        let mut lines = Vec::new();
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut open = false;
        for (chunk, style) in self.segments() {
            for (i, piece) in chunk.split('\n').enumerate() {
                if i > 0 {
                    lines.push(Line::from(std::mem::take(&mut spans)));
                    open = false;
                }
                if !piece.is_empty() {
                    spans.push(Span::styled(piece.to_string(), style));
                    open = true;
                }
            }
        }
        if open {
            lines.push(Line::from(spans));
        }
        Text::from(lines)
    }

    /// Copy of a byte range, carrying the styles that overlap it.
    fn slice(&self, range: Range<usize>) -> FmText {
        let Range { start, end } = range;
        let runs = self
            .runs
            .iter()
            .filter(|run| run.end > start && run.start < end)
            .map(|run| StyleRun {
                start: run.start.max(start) - start,
                end: run.end.min(end) - start,
                style: run.style,
            })
            .collect();
        FmText {
            text: self.text[start..end].to_string(),
            runs,
        }
    }

    /// Consecutive chunks of text with their style, covering the buffer in
    /// order.
    fn segments(&self) -> impl Iterator<Item = (&str, Style)> + '_ {
        let mut pos = 0usize;
        let mut runs = self.runs.iter().peekable();
        std::iter::from_fn(move || {
            if pos >= self.text.len() {
                return None;
            }
            match runs.peek() {
                Some(run) if run.start <= pos => {
                    let run = runs.next()?;
                    pos = run.end;
                    Some((&self.text[run.start..run.end], run.style))
                }
                Some(run) => {
                    let chunk = &self.text[pos..run.start];
                    pos = run.start;
                    Some((chunk, Style::default()))
                }
                None => {
                    let chunk = &self.text[pos..];
                    pos = self.text.len();
                    Some((chunk, Style::default()))
                }
            }
        })
    }
}

impl From<&str> for FmText {
    fn from(text: &str) -> Self {
        let mut fm = FmText::new();
        fm.append_normal(text);
        fm
    }
}

#[cfg(test)]
#[path = "fmtext_tests.rs"]
mod tests;
