//! Command line widget for the overlay editor.

use crate::editor::LineEditor;
use crate::model::FmText;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::Widget,
};

/// Renders a [`LineEditor`]'s prompt and text on one row.
///
/// Text wider than the row scrolls horizontally so the cursor stays in
/// view.
#[derive(Debug, Clone, Copy)]
pub struct CommandLine<'a> {
    editor: &'a LineEditor,
}

impl<'a> CommandLine<'a> {
    /// Create the widget.
    pub fn new(editor: &'a LineEditor) -> Self {
        Self { editor }
    }

    /// Screen cell of the cursor when rendered into `area`.
    pub fn cursor_position(&self, area: Rect) -> Position {
        let offset = self.editor.scroll_offset(area.width);
        let col = self.editor.cursor_column().saturating_sub(offset);
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        Position::new(
            area.x + col.min(area.width.saturating_sub(1)),
            area.y,
        )
    }
}

impl Widget for CommandLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let mut line = String::from(self.editor.locktext());
        line.push_str(self.editor.text());
        let offset = self.editor.scroll_offset(area.width);
        let last = offset + usize::from(area.width) - 1;
        let visible = FmText::from(line.as_str()).truncate_cols(offset, last);
        buf.set_stringn(
            area.x,
            area.y,
            visible.as_str(),
            usize::from(area.width),
            Style::default(),
        );
    }
}
