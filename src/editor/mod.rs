//! Inline single-line editor used by the command overlay.
//!
//! The editor is bound to one region: it subscribes to that region's redraw
//! notifications on creation and cancels the subscription in
//! [`LineEditor::release`]. Text is split into a locked prefix (the prompt,
//! such as `:`) and the editable remainder; the cursor never enters the
//! prefix.

pub mod history;

pub use history::History;

use crate::region::{RegionId, RegionTree, Signal, SignalKind, Subscription};
use crate::state::command::Command;
use crate::view::CommandLine;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::Widget;
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// Editing style of a [`LineEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStyle {
    /// A single line; line breaks in inserted text become spaces.
    OneLine,
}

/// What a key press did to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The text or cursor changed; keep editing.
    Continue,
    /// The user asked to submit the line.
    Submit,
    /// The user abandoned the line.
    Cancel,
    /// The key has no meaning for the editor.
    Ignored,
}

/// Called with the editable text when the line is submitted.
pub type SubmitCallback = Box<dyn FnMut(&str) -> Option<Command>>;

/// Single-line text entry with a locked prompt and history recall.
pub struct LineEditor {
    region: RegionId,
    lines: i32,
    cols: i32,
    style: EditStyle,
    locktext: String,
    buffer: String,
    /// Byte offset into `buffer`, always on a char boundary.
    cursor: usize,
    history: History,
    history_age: Option<usize>,
    draft: String,
    callback: Option<SubmitCallback>,
    redraw: Subscription,
}

impl LineEditor {
    /// Create an editor painting into `region`, which is `lines` × `cols`.
    ///
    /// `history` is copied; the caller records submitted lines in its own
    /// history.
    pub fn new(
        tree: &mut RegionTree,
        region: RegionId,
        lines: i32,
        cols: i32,
        style: EditStyle,
        history: &History,
    ) -> Self {
        let redraw = tree.subscribe(region, SignalKind::Redraw);
        Self {
            region,
            lines,
            cols,
            style,
            locktext: String::new(),
            buffer: String::new(),
            cursor: 0,
            history: history.clone(),
            history_age: None,
            draft: String::new(),
            callback: None,
            redraw,
        }
    }

    /// Cancel the redraw subscription and drop the editor.
    pub fn release(self, tree: &mut RegionTree) {
        tree.unsubscribe(self.redraw);
    }

    /// Region the editor paints into.
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Size `(lines, cols)` the editor was created with.
    pub fn size(&self) -> (i32, i32) {
        (self.lines, self.cols)
    }

    /// Editing style.
    pub fn style(&self) -> EditStyle {
        self.style
    }

    /// Set the non-editable prefix shown before the text.
    pub fn set_locktext(&mut self, text: &str) {
        self.locktext = self.normalize(text);
    }

    /// The locked prefix.
    pub fn locktext(&self) -> &str {
        &self.locktext
    }

    /// The editable text, without the locked prefix.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Cursor position as a byte offset into [`text`](Self::text).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert text at the cursor.
    pub fn insert_str(&mut self, text: &str) {
        let text = self.normalize(text);
        self.buffer.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    /// Insert one character at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut utf8));
    }

    /// Delete the character before the cursor. Returns `false` at the start
    /// of the editable text.
    pub fn backspace(&mut self) -> bool {
        let Some(ch) = self.buffer[..self.cursor].chars().next_back() else {
            return false;
        };
        self.cursor -= ch.len_utf8();
        self.buffer.remove(self.cursor);
        true
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.buffer.len() {
            return false;
        }
        self.buffer.remove(self.cursor);
        true
    }

    /// Move the cursor one character left.
    pub fn move_left(&mut self) {
        if let Some(ch) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    /// Move the cursor one character right.
    pub fn move_right(&mut self) {
        if let Some(ch) = self.buffer[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    /// Move the cursor to the start of the editable text.
    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Move the cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Delete everything before the cursor.
    pub fn kill_to_start(&mut self) {
        self.buffer.drain(..self.cursor);
        self.cursor = 0;
    }

    /// Replace the text with the previous (older) history entry.
    pub fn history_prev(&mut self) {
        let age = self.history_age.map_or(0, |a| a + 1);
        let Some(entry) = self.history.recent(age).map(str::to_string) else {
            return;
        };
        if self.history_age.is_none() {
            self.draft = std::mem::take(&mut self.buffer);
        }
        self.history_age = Some(age);
        self.replace_text(entry);
    }

    /// Replace the text with the next (newer) history entry, or the line
    /// being typed before history was browsed.
    pub fn history_next(&mut self) {
        match self.history_age {
            None => {}
            Some(0) => {
                self.history_age = None;
                let draft = std::mem::take(&mut self.draft);
                self.replace_text(draft);
            }
            Some(age) => {
                let entry = self.history.recent(age - 1).map(str::to_string);
                if let Some(entry) = entry {
                    self.history_age = Some(age - 1);
                    self.replace_text(entry);
                }
            }
        }
    }

    /// Install the callback run by [`submit`](Self::submit).
    pub fn set_callback(&mut self, callback: SubmitCallback) {
        self.callback = Some(callback);
    }

    /// Run the submit callback with the editable text.
    pub fn submit(&mut self) -> Option<Command> {
        let text = self.buffer.clone();
        self.callback.as_mut().and_then(|callback| callback(&text))
    }

    /// Apply a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> EditOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => EditOutcome::Submit,
            KeyCode::Esc => EditOutcome::Cancel,
            KeyCode::Char('g') if ctrl => EditOutcome::Cancel,
            KeyCode::Char('a') if ctrl => {
                self.move_home();
                EditOutcome::Continue
            }
            KeyCode::Char('e') if ctrl => {
                self.move_end();
                EditOutcome::Continue
            }
            KeyCode::Char('u') if ctrl => {
                self.kill_to_start();
                EditOutcome::Continue
            }
            KeyCode::Char('p') if ctrl => {
                self.history_prev();
                EditOutcome::Continue
            }
            KeyCode::Char('n') if ctrl => {
                self.history_next();
                EditOutcome::Continue
            }
            KeyCode::Char(_) if ctrl => EditOutcome::Ignored,
            KeyCode::Char(ch) => {
                self.insert_char(ch);
                EditOutcome::Continue
            }
            KeyCode::Backspace => {
                self.backspace();
                EditOutcome::Continue
            }
            KeyCode::Delete => {
                self.delete();
                EditOutcome::Continue
            }
            KeyCode::Left => {
                self.move_left();
                EditOutcome::Continue
            }
            KeyCode::Right => {
                self.move_right();
                EditOutcome::Continue
            }
            KeyCode::Home => {
                self.move_home();
                EditOutcome::Continue
            }
            KeyCode::End => {
                self.move_end();
                EditOutcome::Continue
            }
            KeyCode::Up => {
                self.history_prev();
                EditOutcome::Continue
            }
            KeyCode::Down => {
                self.history_next();
                EditOutcome::Continue
            }
            _ => EditOutcome::Ignored,
        }
    }

    /// Display column of the cursor, counting the locked prefix.
    pub fn cursor_column(&self) -> usize {
        self.locktext.width() + self.buffer[..self.cursor].width()
    }

    /// First column shown when the line is `width` columns wide, chosen so
    /// the cursor stays visible.
    pub fn scroll_offset(&self, width: u16) -> usize {
        let width = usize::from(width);
        if width == 0 {
            return 0;
        }
        (self.cursor_column() + 1).saturating_sub(width)
    }

    /// Whether `signal` is this editor's redraw notification.
    pub fn handles(&self, signal: &Signal) -> bool {
        signal.subscription == self.redraw.id()
    }

    /// Paint the prompt line into the editor's region.
    pub fn redraw(&self, tree: &mut RegionTree) {
        let area = tree.absolute_area(self.region);
        CommandLine::new(self).render(area, tree.canvas_mut());
    }

    fn replace_text(&mut self, text: String) {
        self.buffer = text;
        self.cursor = self.buffer.len();
    }

    fn normalize(&self, text: &str) -> String {
        match self.style {
            EditStyle::OneLine => text.replace(['\n', '\r'], " "),
        }
    }
}

impl fmt::Debug for LineEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineEditor")
            .field("region", &self.region)
            .field("locktext", &self.locktext)
            .field("buffer", &self.buffer)
            .field("cursor", &self.cursor)
            .field("has_callback", &self.callback.is_some())
            .finish_non_exhaustive()
    }
}
