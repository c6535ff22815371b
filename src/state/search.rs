//! Line-granular regular-expression search.
//!
//! Downward search uses the document's forward search from an offset.
//! There is no reverse counterpart, so upward search walks back one line
//! at a time, finding each line's start with a reverse scan for the
//! previous line break and testing the pattern against exactly that line.

use crate::model::SearchPattern;
use crate::region::RegionTree;
use crate::state::viewer::Viewer;
use tracing::debug;

/// Whether the current top line may itself be the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Stay on the top line if it matches.
    IncludeCurrent,
    /// Start with the line after (or before) the top line.
    SkipCurrent,
}

/// Which way to scan from the top line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    /// Towards the end of the document.
    Downwards,
    /// Towards the start of the document.
    Upwards,
}

impl SearchDirection {
    /// The other direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Downwards => Self::Upwards,
            Self::Upwards => Self::Downwards,
        }
    }
}

impl Viewer {
    /// Scroll to the nearest line matching `pattern` in `direction`.
    ///
    /// Returns `false` and leaves the view untouched if no line matches.
    pub fn search(
        &mut self,
        tree: &mut RegionTree,
        pattern: &SearchPattern,
        mode: SearchMode,
        direction: SearchDirection,
    ) -> bool {
        let found = match direction {
            SearchDirection::Downwards => self.find_downwards(pattern, mode),
            SearchDirection::Upwards => self.find_upwards(pattern, mode),
        };
        debug!(
            pattern = pattern.as_str(),
            ?direction,
            ?mode,
            line = ?found,
            "search"
        );
        match found {
            Some(line) => {
                self.top_line = line;
                self.mark_dirty(tree);
                true
            }
            None => false,
        }
    }

    fn find_downwards(&self, pattern: &SearchPattern, mode: SearchMode) -> Option<usize> {
        let (start, end) = self.document.line_extents(self.top_line);
        let from = match mode {
            SearchMode::IncludeCurrent => start,
            SearchMode::SkipCurrent => end,
        };
        // An empty match at the very end lies past the last line.
        let offset = self
            .document
            .search(pattern, from)
            .filter(|offset| *offset < self.document.len())?;
        Some(self.document.line_number(offset))
    }

    fn find_upwards(&self, pattern: &SearchPattern, mode: SearchMode) -> Option<usize> {
        let (start, end) = self.document.line_extents(self.top_line);
        let text = self.document.as_str();
        let mut line_end = match mode {
            SearchMode::IncludeCurrent => end,
            SearchMode::SkipCurrent => start,
        };
        while line_end > 0 {
            let line_start = self.document.previous_line_start(line_end);
            if pattern.is_match_span(text, line_start, line_end) {
                return Some(self.document.line_number(line_start));
            }
            line_end = line_start;
        }
        None
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
