//! Vertical and horizontal scrolling.
//!
//! Every operation clamps instead of failing and then schedules a repaint.
//! Scrolling down stops once the last line reaches the bottom of the
//! content pane and never moves backwards.

use crate::region::RegionTree;
use crate::state::viewer::Viewer;
use tracing::trace;

impl Viewer {
    /// Scroll down by up to `amount` lines.
    ///
    /// Does nothing if the last line is already at or above the bottom of
    /// the content pane.
    pub fn scroll_down(&mut self, tree: &mut RegionTree, amount: usize) {
        let winlines = self.winlines(tree);
        let room = self
            .line_count
            .saturating_sub(self.top_line.saturating_add(winlines));
        let amount = amount.min(room);
        if amount > 0 {
            self.top_line += amount;
            trace!(top_line = self.top_line, "scrolled down");
            self.mark_dirty(tree);
        }
    }

    /// Scroll up by `amount` lines, stopping at the first line.
    pub fn scroll_up(&mut self, tree: &mut RegionTree, amount: usize) {
        self.top_line = self.top_line.saturating_sub(amount);
        self.mark_dirty(tree);
    }

    /// Scroll down one screen.
    pub fn page_down(&mut self, tree: &mut RegionTree) {
        let winlines = self.winlines(tree);
        self.scroll_down(tree, winlines);
    }

    /// Scroll up one screen.
    pub fn page_up(&mut self, tree: &mut RegionTree) {
        let winlines = self.winlines(tree);
        self.scroll_up(tree, winlines);
    }

    /// Scroll down one line.
    pub fn line_down(&mut self, tree: &mut RegionTree) {
        self.scroll_down(tree, 1);
    }

    /// Scroll up one line.
    pub fn line_up(&mut self, tree: &mut RegionTree) {
        self.scroll_up(tree, 1);
    }

    /// Shift the view `n` columns to the right.
    pub fn shift_right(&mut self, tree: &mut RegionTree, n: usize) {
        self.right_shift = self.right_shift.saturating_add(n);
        self.mark_dirty(tree);
    }

    /// Shift the view `n` columns to the left, stopping at column 0.
    pub fn shift_left(&mut self, tree: &mut RegionTree, n: usize) {
        self.right_shift = self.right_shift.saturating_sub(n);
        self.mark_dirty(tree);
    }

    /// Show the first line, unshifted.
    pub fn jump_top(&mut self, tree: &mut RegionTree) {
        self.top_line = 0;
        self.right_shift = 0;
        self.mark_dirty(tree);
    }

    /// Scroll so the last line sits on the bottom row of the content pane.
    ///
    /// A document shorter than the pane stays at the first line.
    pub fn jump_bottom(&mut self, tree: &mut RegionTree) {
        let winlines = self.winlines(tree);
        self.top_line = self.line_count.saturating_sub(winlines);
        self.mark_dirty(tree);
    }
}
