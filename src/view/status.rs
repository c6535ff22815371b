//! Status line widget.

use crate::state::Viewer;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

/// Shown while lines remain below the content pane.
pub const MORE_TEXT: &str = "--More-- (Space to see more, 'q' to quit)";

/// Shown once the last line is on screen.
pub const END_TEXT: &str = "--End-- (Press 'q' to quit)";

/// One-row indicator of whether more of the document lies below.
#[derive(Debug, Clone, Copy)]
pub struct StatusLine<'a> {
    viewer: &'a Viewer,
    winlines: i32,
}

impl<'a> StatusLine<'a> {
    /// Create the widget; `winlines` is the content pane's height.
    pub fn new(viewer: &'a Viewer, winlines: i32) -> Self {
        Self { viewer, winlines }
    }

    /// The indicator text for the viewer's current position.
    pub fn text(&self) -> &'static str {
        let remaining = to_i64(self.viewer.line_count()) - to_i64(self.viewer.top_line());
        if remaining > i64::from(self.winlines) {
            MORE_TEXT
        } else {
            END_TEXT
        }
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let style = Style::default().add_modifier(Modifier::REVERSED);
        buf.set_stringn(area.x, area.y, self.text(), usize::from(area.width), style);
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
