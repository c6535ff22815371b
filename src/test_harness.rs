//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing by wrapping
//! PagerApp<TestBackend> with convenient methods for simulating user
//! interactions.

use crate::config::ResolvedConfig;
use crate::source::{FileSource, InputSource, StdinSource};
use crate::state::Viewer;
use crate::view::{PagerApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Trailing spaces are removed from every row.
pub fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
///
/// Wraps PagerApp<TestBackend> to provide a clean API for simulating user
/// interactions in acceptance tests.
pub struct AcceptanceTestHarness {
    app: PagerApp<TestBackend>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Load a fixture file with a custom terminal size
    pub fn from_fixture_with_size(path: &str, width: u16, height: u16) -> Result<Self, TuiError> {
        let mut source = FileSource::new(path)?;
        let text = source.drain().unwrap_or_default();
        Self::from_text_with_config(&text, width, height, ResolvedConfig::default())
    }

    /// Show `text` in a terminal of the given size
    pub fn from_text(text: &str, width: u16, height: u16) -> Result<Self, TuiError> {
        Self::from_text_with_config(text, width, height, ResolvedConfig::default())
    }

    /// Show `text` with a specific configuration
    pub fn from_text_with_config(
        text: &str,
        width: u16,
        height: u16,
        config: ResolvedConfig,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;

        // Empty stdin source; nothing more ever arrives
        let idle = InputSource::Stdin(StdinSource::from_reader(&b""[..]));

        let app = PagerApp::with_terminal(terminal, text, idle, config)?;
        Ok(Self { app, running: true })
    }

    /// Send a single key event
    ///
    /// Returns true if the app quit as a result of this key.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        let quit = self.app.handle_key(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Send a sequence of keys, stopping early if the app quits
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break;
            }
        }
    }

    /// Type text (sends individual character key events)
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            if self.send_key(KeyCode::Char(ch)) {
                break;
            }
        }
    }

    /// Open the command line, type `line` and press Enter
    pub fn run_command(&mut self, line: &str) -> bool {
        self.send_key(KeyCode::Char(':'));
        self.type_text(line);
        self.send_key(KeyCode::Enter)
    }

    /// Resize the terminal
    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.terminal_mut().backend_mut().resize(width, height);
        self.app.handle_resize(width, height);
    }

    /// The viewer, for assertions
    pub fn viewer(&self) -> &Viewer {
        self.app.viewer()
    }

    /// The application, for assertions
    pub fn app(&self) -> &PagerApp<TestBackend> {
        &self.app
    }

    /// Check if app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .draw()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
