//! Geometry of the viewer's child regions.
//!
//! The content pane takes every row of the host but the last; the last row
//! holds the status line or, while it is active, the command overlay. Both
//! bottom-row regions always get the same position since only one of them
//! is ever shown.

use crate::region::{Position, RegionTree};
use crate::state::overlay::BottomLine;
use crate::state::viewer::Viewer;

/// Rows reserved below the content pane.
const BOTTOM_OFFSET: i32 = 1;

impl Viewer {
    /// Position the child regions for the host's current size.
    ///
    /// A host one row tall (or less) leaves the content pane with zero or
    /// negative height; the arithmetic is applied as-is.
    pub fn layout(&self, tree: &mut RegionTree) {
        let host = tree.get_position(self.host);
        tree.set_position(
            self.content,
            Position::new(host.lines - BOTTOM_OFFSET, host.cols, 0, 0),
        );
        let bottom = self.bottom_position(tree);
        tree.set_position(self.status, bottom);
        if let BottomLine::CommandEntry { region, .. } = &self.bottom {
            tree.set_position(*region, bottom);
        }
    }

    /// Where the status line (or the overlay replacing it) goes.
    pub(super) fn bottom_position(&self, tree: &RegionTree) -> Position {
        let host = tree.get_position(self.host);
        Position::new(BOTTOM_OFFSET, host.cols, host.lines - BOTTOM_OFFSET, 0)
    }
}
