//! The pager widget's state and lifecycle.
//!
//! A [`Viewer`] owns its document, its scroll position and two permanent
//! child regions of a caller-owned host region: the content pane and the
//! one-row status line. While the command overlay is active a third child
//! takes the status line's place (see [`BottomLine`]).
//!
//! The viewer never paints from a mutating call. Mutations mark its regions
//! dirty and painting happens when the host delivers redraw signals to
//! [`Viewer::handle_signal`].

use crate::model::FmText;
use crate::region::{RegionId, RegionTree, Signal, SignalKind, Subscription};
use crate::state::overlay::BottomLine;
use crate::view::{ContentView, StatusLine};
use ratatui::widgets::Widget;
use std::fmt;
use tracing::debug;

/// One-shot callback run at the start of [`Viewer::destroy`].
pub type CloseHook = Box<dyn FnOnce(&Viewer)>;

/// Host subscriptions held for the viewer's lifetime.
#[derive(Debug)]
pub(super) struct ViewerSubscriptions {
    pub(super) content_redraw: Subscription,
    pub(super) status_redraw: Subscription,
    pub(super) host_resized: Subscription,
}

/// A scrollable view of a document anchored in a host region.
pub struct Viewer {
    pub(super) document: FmText,
    pub(super) line_count: usize,
    pub(super) top_line: usize,
    pub(super) right_shift: usize,
    pub(super) host: RegionId,
    pub(super) content: RegionId,
    pub(super) status: RegionId,
    pub(super) bottom: BottomLine,
    pub(super) on_close: Option<CloseHook>,
    pub(super) subscriptions: ViewerSubscriptions,
}

impl Viewer {
    /// Create a viewer showing `text` inside `host`.
    pub fn from_text(tree: &mut RegionTree, host: RegionId, text: &str) -> Self {
        Self::from_fmtext(tree, host, &FmText::from(text))
    }

    /// Create a viewer showing a copy of `document` inside `host`.
    ///
    /// A missing final line break is added so the last line counts like
    /// every other.
    pub fn from_fmtext(tree: &mut RegionTree, host: RegionId, document: &FmText) -> Self {
        let mut document = document.clone();
        if !document.is_empty() && !document.ends_with_newline() {
            document.append_normal("\n");
        }
        let line_count = document.num_lines();

        let content = tree.new_child(host);
        let status = tree.new_child(host);
        let subscriptions = ViewerSubscriptions {
            content_redraw: tree.subscribe(content, SignalKind::Redraw),
            status_redraw: tree.subscribe(status, SignalKind::Redraw),
            host_resized: tree.subscribe(host, SignalKind::Resized),
        };

        let viewer = Self {
            document,
            line_count,
            top_line: 0,
            right_shift: 0,
            host,
            content,
            status,
            bottom: BottomLine::Status,
            on_close: None,
            subscriptions,
        };
        viewer.layout(tree);
        tree.show(content);
        tree.show(status);
        debug!(lines = line_count, "viewer created");
        viewer
    }

    /// Install a callback to run once when the viewer is destroyed.
    /// Replaces any earlier hook.
    pub fn set_close_hook(&mut self, hook: impl FnOnce(&Viewer) + 'static) {
        self.on_close = Some(Box::new(hook));
    }

    /// Append text to the document.
    pub fn append_text(&mut self, tree: &mut RegionTree, text: &str) {
        self.document.append_normal(text);
        self.line_count = self.document.num_lines();
        self.mark_dirty(tree);
    }

    /// Schedule a repaint of the content pane and status line.
    pub fn mark_dirty(&self, tree: &mut RegionTree) {
        tree.dirty(self.content);
        tree.dirty(self.status);
    }

    /// Tear the viewer down.
    ///
    /// Runs the close hook, closes the command overlay, cancels every
    /// subscription and unlinks the child regions. The host region is left
    /// alone.
    pub fn destroy(mut self, tree: &mut RegionTree) {
        if let Some(hook) = self.on_close.take() {
            hook(&self);
        }
        self.deactivate_command_entry(tree);
        let Self {
            content,
            status,
            subscriptions,
            ..
        } = self;
        tree.unsubscribe(subscriptions.host_resized);
        tree.unsubscribe(subscriptions.content_redraw);
        tree.unsubscribe(subscriptions.status_redraw);
        tree.unlink(content);
        tree.unlink(status);
        debug!("viewer destroyed");
    }

    /// Act on a host notification.
    ///
    /// Returns `false` if the signal belongs to none of this viewer's
    /// subscriptions.
    pub fn handle_signal(&self, tree: &mut RegionTree, signal: &Signal) -> bool {
        let subs = &self.subscriptions;
        if signal.subscription == subs.host_resized.id() {
            self.layout(tree);
        } else if signal.subscription == subs.content_redraw.id() {
            self.redraw_content(tree);
        } else if signal.subscription == subs.status_redraw.id() {
            self.redraw_status(tree);
        } else if let BottomLine::CommandEntry { editor, .. } = &self.bottom {
            if !editor.handles(signal) {
                return false;
            }
            editor.redraw(tree);
        } else {
            return false;
        }
        true
    }

    /// Index of the first visible line.
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Columns the view is shifted right.
    pub fn right_shift(&self) -> usize {
        self.right_shift
    }

    /// Cached number of document lines.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// The displayed document.
    pub fn document(&self) -> &FmText {
        &self.document
    }

    /// Region the viewer is anchored in.
    pub fn host_region(&self) -> RegionId {
        self.host
    }

    /// Content pane region.
    pub fn content_region(&self) -> RegionId {
        self.content
    }

    /// Status line region.
    pub fn status_region(&self) -> RegionId {
        self.status
    }

    /// Height of the content pane; zero when the pane is degenerate.
    pub fn winlines(&self, tree: &RegionTree) -> usize {
        usize::try_from(tree.get_position(self.content).lines).unwrap_or(0)
    }

    fn redraw_content(&self, tree: &mut RegionTree) {
        let pos = tree.get_position(self.content);
        let area = tree.absolute_area(self.content);
        ContentView::new(self, pos.lines, pos.cols).render(area, tree.canvas_mut());
    }

    fn redraw_status(&self, tree: &mut RegionTree) {
        let area = tree.absolute_area(self.status);
        let winlines = tree.get_position(self.content).lines;
        StatusLine::new(self, winlines).render(area, tree.canvas_mut());
    }
}

impl fmt::Debug for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewer")
            .field("line_count", &self.line_count)
            .field("top_line", &self.top_line)
            .field("right_shift", &self.right_shift)
            .field("host", &self.host)
            .field("content", &self.content)
            .field("status", &self.status)
            .field("bottom", &self.bottom)
            .field("has_close_hook", &self.on_close.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "viewer_tests.rs"]
mod tests;
