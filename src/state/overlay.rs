//! Command overlay on the viewer's bottom row.
//!
//! The bottom row shows either the status line or a one-line editor in its
//! own region. [`BottomLine`] holds the overlay region and editor only while
//! the editor is up, so the two presentations cannot coexist.

use crate::editor::{EditStyle, History, LineEditor, SubmitCallback};
use crate::region::{RegionId, RegionTree};
use crate::state::viewer::Viewer;
use tracing::debug;

/// What the viewer's bottom row is showing.
#[derive(Debug, Default)]
pub enum BottomLine {
    /// The status line.
    #[default]
    Status,
    /// The command line editor, in its own region.
    CommandEntry {
        /// Overlay region, positioned over the status line.
        region: RegionId,
        /// Editor painting into `region`.
        editor: LineEditor,
    },
}

/// An active editing session started by [`Viewer::start_command`].
///
/// The caller keeps it while the editor has focus and calls
/// [`deactivate`](Self::deactivate) once the line is submitted or
/// cancelled.
#[derive(Debug)]
pub struct EditContext {
    name: &'static str,
    deactivate: fn(&mut Viewer, &mut RegionTree),
}

impl EditContext {
    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// End the session, restoring the status line.
    pub fn deactivate(self, viewer: &mut Viewer, tree: &mut RegionTree) {
        debug!(context = self.name, "edit context deactivated");
        (self.deactivate)(viewer, tree);
    }
}

impl Viewer {
    /// Replace the status line with a command line editor.
    ///
    /// Returns `None` if the editor is already up.
    pub fn activate_command_entry(
        &mut self,
        tree: &mut RegionTree,
        history: &History,
    ) -> Option<&mut LineEditor> {
        if matches!(self.bottom, BottomLine::CommandEntry { .. }) {
            return None;
        }
        let region = tree.new_child(self.host);
        let bottom = self.bottom_position(tree);
        tree.set_position(region, bottom);
        let pos = tree.get_position(region);
        let editor = LineEditor::new(tree, region, pos.lines, pos.cols, EditStyle::OneLine, history);
        self.bottom = BottomLine::CommandEntry { region, editor };

        tree.hide(self.status);
        tree.show(region);
        debug!("command entry active");
        self.editor_mut()
    }

    /// Put the status line back. Does nothing if the editor is not up.
    pub fn deactivate_command_entry(&mut self, tree: &mut RegionTree) {
        let BottomLine::CommandEntry { region, editor } = std::mem::take(&mut self.bottom) else {
            return;
        };
        tree.hide(region);
        tree.show(self.status);
        tree.unlink(region);
        editor.release(tree);
        debug!("command entry closed");
    }

    /// Open the command line for a command typed as `buff`.
    ///
    /// The first word of `buff` names the command that opened the prompt and
    /// is dropped; the rest is placed after a locked `:` prompt. `on_submit`
    /// runs when the line is submitted. Returns `None` if the editor is
    /// already up.
    pub fn start_command(
        &mut self,
        tree: &mut RegionTree,
        history: &History,
        buff: &str,
        on_submit: SubmitCallback,
    ) -> Option<EditContext> {
        let rest = skip_tokens(buff, 1);
        let editor = self.activate_command_entry(tree, history)?;
        editor.set_locktext(":");
        editor.insert_str(rest);
        editor.set_callback(on_submit);
        Some(EditContext {
            name: "editline",
            deactivate: Viewer::deactivate_command_entry,
        })
    }

    /// Whether the command line editor is up.
    pub fn is_command_entry(&self) -> bool {
        matches!(self.bottom, BottomLine::CommandEntry { .. })
    }

    /// The overlay region while the editor is up.
    pub fn overlay_region(&self) -> Option<RegionId> {
        match &self.bottom {
            BottomLine::CommandEntry { region, .. } => Some(*region),
            BottomLine::Status => None,
        }
    }

    /// The command line editor while it is up.
    pub fn editor(&self) -> Option<&LineEditor> {
        match &self.bottom {
            BottomLine::CommandEntry { editor, .. } => Some(editor),
            BottomLine::Status => None,
        }
    }

    /// Mutable access to the command line editor while it is up.
    pub fn editor_mut(&mut self) -> Option<&mut LineEditor> {
        match &mut self.bottom {
            BottomLine::CommandEntry { editor, .. } => Some(editor),
            BottomLine::Status => None,
        }
    }
}

/// Skip `count` whitespace-separated words of `buff` and the whitespace
/// after them. Quoted text counts as part of a word.
pub fn skip_tokens(buff: &str, count: usize) -> &str {
    let mut rest = buff;
    for _ in 0..count {
        rest = rest.trim_start();
        let mut quote = None;
        let end = rest
            .char_indices()
            .find(|&(_, ch)| match quote {
                Some(q) => {
                    if ch == q {
                        quote = None;
                    }
                    false
                }
                None if ch == '\'' || ch == '"' => {
                    quote = Some(ch);
                    false
                }
                None => ch.is_whitespace(),
            })
            .map_or(rest.len(), |(i, _)| i);
        rest = rest[end..].trim_start();
    }
    rest
}
