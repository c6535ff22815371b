//! TUI rendering and terminal management (impure shell)
//!
//! [`PagerApp`] owns the terminal, the region tree and the viewer. Key
//! presses are mapped to viewer operations or fed to the command line
//! editor; after each event the tree's signals are pumped through the
//! viewer, which paints into the tree's canvas, and the canvas is copied
//! into the terminal frame.

mod command_line;
mod content;
mod status;

pub use command_line::CommandLine;
pub use content::{ContentView, EMPTY_INDICATOR};
pub use status::{StatusLine, END_TEXT, MORE_TEXT};

use crate::config::{KeyBindings, ResolvedConfig};
use crate::editor::{EditOutcome, History, SubmitCallback};
use crate::model::{AppError, KeyAction, SearchPattern};
use crate::region::RegionTree;
use crate::source::InputSource;
use crate::state::{
    parse_command, Command, EditContext, SearchDirection, SearchMode, Viewer,
};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] crate::model::InputError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct PagerApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    tree: RegionTree,
    viewer: Viewer,
    input_source: InputSource,
    history: History,
    /// Edit sessions holding keyboard focus, innermost last.
    contexts: Vec<EditContext>,
    key_bindings: KeyBindings,
    last_search: Option<(SearchPattern, SearchDirection)>,
    /// Initial search still waiting for streamed text to match.
    pending_search: Option<SearchPattern>,
    config: ResolvedConfig,
}

impl PagerApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen, then shows
    /// whatever the input source has ready.
    pub fn new(mut input_source: InputSource, config: ResolvedConfig) -> Result<Self, TuiError> {
        let initial = input_source.poll()?.unwrap_or_default();

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Self::with_terminal(terminal, &initial, input_source, config)
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q, Ctrl+C or the `quit` command).
    /// Redraws only on user input, resizes, or newly arrived text.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Streaming stdin is checked this often while the user is idle
        const TICK: Duration = Duration::from_millis(100);

        self.draw()?;

        loop {
            if event::poll(TICK)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        self.draw()?;
                    }
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        self.draw()?;
                    }
                    _ => {}
                }
            } else if self.poll_input()? {
                self.draw()?;
            }
        }
    }
}

impl<B> PagerApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create the application around an existing terminal showing `text`.
    ///
    /// `input_source` is polled later for text to append. Used directly
    /// with `TestBackend` in tests.
    pub fn with_terminal(
        terminal: Terminal<B>,
        text: &str,
        input_source: InputSource,
        config: ResolvedConfig,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let mut tree = RegionTree::new(size.width, size.height);
        let root = tree.root();
        let mut viewer = Viewer::from_text(&mut tree, root, text);
        viewer.set_close_hook(|viewer| {
            info!(
                lines = viewer.line_count(),
                top_line = viewer.top_line(),
                "pager closed"
            );
        });
        info!(
            lines = viewer.line_count(),
            width = size.width,
            height = size.height,
            "pager started"
        );

        Ok(Self {
            terminal,
            tree,
            viewer,
            input_source,
            history: History::new(config.history_capacity),
            contexts: Vec::new(),
            key_bindings: KeyBindings::default(),
            last_search: None,
            pending_search: None,
            config,
        })
    }

    /// Poll the input source and append whatever arrived.
    ///
    /// Returns true if text was appended.
    pub fn poll_input(&mut self) -> Result<bool, TuiError> {
        if !self.input_source.is_live() {
            return Ok(false);
        }
        let appended = match self.input_source.poll()? {
            Some(text) => {
                trace!(bytes = text.len(), "appending input");
                self.viewer.append_text(&mut self.tree, &text);
                true
            }
            None => false,
        };
        if appended {
            self.retry_pending_search();
        } else if !self.input_source.is_live() && self.pending_search.take().is_some() {
            info!("initial search never matched");
        }
        Ok(appended)
    }

    /// Search downwards for the first match of `pattern`.
    ///
    /// While nothing matches and the input source is still live, the search
    /// is retried each time text is appended, until it matches or the user
    /// presses a key.
    pub fn initial_search(&mut self, pattern: SearchPattern) {
        self.last_search = Some((pattern.clone(), SearchDirection::Downwards));
        self.pending_search = Some(pattern);
        self.retry_pending_search();
    }

    /// Whether an initial search is still waiting for a match.
    pub fn is_search_pending(&self) -> bool {
        self.pending_search.is_some()
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        if self.pending_search.take().is_some() {
            debug!("initial search abandoned");
        }
        if !self.contexts.is_empty() {
            return self.handle_edit_key(key);
        }
        match self.key_bindings.get(key) {
            Some(action) => self.apply_action(action),
            None => {
                trace!(?key, "unbound key");
                false
            }
        }
    }

    /// Apply a key action. Returns true if app should quit.
    pub fn apply_action(&mut self, action: KeyAction) -> bool {
        debug!(?action, "key action");
        let tree = &mut self.tree;
        let viewer = &mut self.viewer;
        let shift_width = self.config.shift_width;
        match action {
            KeyAction::LineDown => viewer.line_down(tree),
            KeyAction::LineUp => viewer.line_up(tree),
            KeyAction::PageDown => viewer.page_down(tree),
            KeyAction::PageUp => viewer.page_up(tree),
            KeyAction::Top => viewer.jump_top(tree),
            KeyAction::Bottom => viewer.jump_bottom(tree),
            KeyAction::ShiftLeft => viewer.shift_left(tree, shift_width),
            KeyAction::ShiftRight => viewer.shift_right(tree, shift_width),
            KeyAction::SearchForward => self.open_prompt("start-command search "),
            KeyAction::SearchBackward => self.open_prompt("start-command search -r "),
            KeyAction::StartCommand => self.open_prompt("start-command "),
            KeyAction::NextMatch => self.repeat_search(false),
            KeyAction::PrevMatch => self.repeat_search(true),
            KeyAction::Quit => return true,
        }
        false
    }

    /// Run a parsed command. Returns true if app should quit.
    pub fn execute(&mut self, command: Command) -> bool {
        debug!(?command, "executing command");
        let tree = &mut self.tree;
        match command {
            Command::Search { pattern, direction } => {
                let found = self
                    .viewer
                    .search(tree, &pattern, SearchMode::IncludeCurrent, direction);
                if !found {
                    info!(pattern = pattern.as_str(), "pattern not found");
                }
                self.last_search = Some((pattern, direction));
            }
            Command::Top => self.viewer.jump_top(tree),
            Command::Bottom => self.viewer.jump_bottom(tree),
            Command::Left(n) => self
                .viewer
                .shift_left(tree, n.unwrap_or(self.config.shift_width)),
            Command::Right(n) => self
                .viewer
                .shift_right(tree, n.unwrap_or(self.config.shift_width)),
            Command::Quit => return true,
        }
        false
    }

    /// Handle a terminal resize event
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "terminal resized");
        self.tree.resize_root(width, height);
    }

    /// Render the current frame
    ///
    /// Pumps pending signals through the viewer, then copies the painted
    /// canvas into the terminal and places the cursor on the command line
    /// while it is open.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        self.pump_signals();

        let canvas = self.tree.canvas();
        let cursor = self.viewer.editor().map(|editor| {
            let area = self.tree.absolute_area(editor.region());
            CommandLine::new(editor).cursor_position(area)
        });

        self.terminal.draw(|frame| {
            let area = frame.area().intersection(canvas.area);
            let buf = frame.buffer_mut();
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    if let (Some(src), Some(dst)) = (canvas.cell((x, y)), buf.cell_mut((x, y))) {
                        *dst = src.clone();
                    }
                }
            }
            if let Some(position) = cursor {
                frame.set_cursor_position(position);
            }
        })?;

        Ok(())
    }

    /// The viewer being shown.
    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Submitted command lines.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The terminal, for inspecting a test backend.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Mutable access to the terminal, for resizing a test backend.
    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Whether a command line is holding keyboard focus.
    pub fn is_editing(&self) -> bool {
        !self.contexts.is_empty()
    }

    /// Destroy the viewer, releasing its regions.
    pub fn close(self) {
        let Self {
            mut tree, viewer, ..
        } = self;
        viewer.destroy(&mut tree);
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> bool {
        let Some(editor) = self.viewer.editor_mut() else {
            warn!("edit context without an editor");
            self.contexts.clear();
            return false;
        };
        match editor.handle_key(key) {
            EditOutcome::Continue => {
                let region = editor.region();
                self.tree.dirty(region);
                false
            }
            EditOutcome::Ignored => false,
            EditOutcome::Cancel => {
                self.close_contexts();
                false
            }
            EditOutcome::Submit => {
                let line = editor.text().to_string();
                let command = editor.submit();
                self.history.push(line);
                self.close_contexts();
                command.is_some_and(|command| self.execute(command))
            }
        }
    }

    fn open_prompt(&mut self, buff: &str) {
        let ignore_case = self.config.ignore_case;
        let on_submit: SubmitCallback =
            Box::new(move |line| match parse_command(line, ignore_case) {
                Ok(command) => Some(command),
                Err(e) => {
                    warn!(line, error = %e, "command rejected");
                    None
                }
            });
        match self
            .viewer
            .start_command(&mut self.tree, &self.history, buff, on_submit)
        {
            Some(context) => {
                debug!(context = context.name(), "edit context opened");
                self.contexts.push(context);
            }
            None => debug!("command line already open"),
        }
    }

    fn close_contexts(&mut self) {
        while let Some(context) = self.contexts.pop() {
            context.deactivate(&mut self.viewer, &mut self.tree);
        }
    }

    fn repeat_search(&mut self, reverse: bool) {
        let Some((pattern, direction)) = &self.last_search else {
            debug!("no previous search");
            return;
        };
        let direction = if reverse {
            direction.reversed()
        } else {
            *direction
        };
        if !self
            .viewer
            .search(&mut self.tree, pattern, SearchMode::SkipCurrent, direction)
        {
            info!(pattern = pattern.as_str(), ?direction, "no further match");
        }
    }

    fn retry_pending_search(&mut self) {
        let Some(pattern) = self.pending_search.take() else {
            return;
        };
        let found = self.viewer.search(
            &mut self.tree,
            &pattern,
            SearchMode::IncludeCurrent,
            SearchDirection::Downwards,
        );
        if found {
            debug!(pattern = pattern.as_str(), "initial search matched");
        } else if self.input_source.is_live() {
            self.pending_search = Some(pattern);
        } else {
            info!(pattern = pattern.as_str(), "pattern not found");
        }
    }

    fn pump_signals(&mut self) {
        loop {
            let signals = self.tree.take_signals();
            if signals.is_empty() {
                return;
            }
            for signal in &signals {
                if !self.viewer.handle_signal(&mut self.tree, signal) {
                    trace!(?signal, "unclaimed signal");
                }
            }
        }
    }
}

/// Initialize and run the TUI application with input source and config
///
/// This is the main entry point for the TUI. It handles terminal
/// setup, runs the event loop, and ensures cleanup on exit. An
/// `initial_search` is run downwards before the first frame and retried
/// as streamed text arrives.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    input_source: InputSource,
    config: ResolvedConfig,
    initial_search: Option<SearchPattern>,
) -> Result<(), TuiError> {
    let mut app = PagerApp::new(input_source, config)?;

    if let Some(pattern) = initial_search {
        app.initial_search(pattern);
    }

    // Run the app and ensure cleanup happens even on error
    let result = app.run();
    app.close();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
