//! Content pane widget.

use crate::state::Viewer;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Widget},
};

/// Marker painted on rows below the end of the document.
pub const EMPTY_INDICATOR: &str = "~";

/// Renders the visible window of a viewer's document.
///
/// The window starts at the viewer's top line and right shift and spans the
/// pane's nominal size, which may be larger than the clipped `area` it is
/// rendered into. Rows past the last document line get an
/// [`EMPTY_INDICATOR`]. A pane with no rows or columns paints nothing.
#[derive(Debug, Clone, Copy)]
pub struct ContentView<'a> {
    viewer: &'a Viewer,
    winlines: i32,
    wincols: i32,
}

impl<'a> ContentView<'a> {
    /// Create the widget for a pane of `winlines` × `wincols`.
    pub fn new(viewer: &'a Viewer, winlines: i32, wincols: i32) -> Self {
        Self {
            viewer,
            winlines,
            wincols,
        }
    }
}

impl Widget for ContentView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (Ok(winlines), Ok(wincols)) = (
            usize::try_from(self.winlines),
            usize::try_from(self.wincols),
        ) else {
            return;
        };
        if winlines == 0 || wincols == 0 || area.is_empty() {
            return;
        }

        let top = self.viewer.top_line();
        let shift = self.viewer.right_shift();
        let visible = self
            .viewer
            .document()
            .truncate_lines(top, winlines)
            .truncate_cols(shift, shift.saturating_add(wincols - 1));
        Paragraph::new(visible.to_text()).render(area, buf);

        let used = self.viewer.line_count().saturating_sub(top);
        for row in area.rows().skip(used) {
            buf.set_string(row.x, row.y, EMPTY_INDICATOR, Style::default());
        }
    }
}
