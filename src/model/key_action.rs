//! Domain-level keyboard actions independent of key bindings.

/// What a key press asks the pager to do.
///
/// The mapping from `crossterm::event::KeyEvent` to `KeyAction` lives in
/// [`KeyBindings`](crate::config::KeyBindings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Vertical scrolling
    /// Scroll down one line. Default: j/↓/Enter
    LineDown,
    /// Scroll up one line. Default: k/↑
    LineUp,
    /// Scroll down one screen. Default: Space/f/Page Down/Ctrl+f
    PageDown,
    /// Scroll up one screen. Default: b/Page Up/Ctrl+b
    PageUp,
    /// Jump to the first line and reset the horizontal shift. Default: g/</Home
    Top,
    /// Jump so the last line sits at the bottom. Default: G/>/End
    Bottom,

    // Horizontal scrolling
    /// Shift the view left. Default: h/←
    ShiftLeft,
    /// Shift the view right. Default: l/→
    ShiftRight,

    // Search
    /// Open the command line pre-filled with a downward search. Default: /
    SearchForward,
    /// Open the command line pre-filled with an upward search. Default: ?
    SearchBackward,
    /// Repeat the last search in its direction. Default: n
    NextMatch,
    /// Repeat the last search in the opposite direction. Default: N
    PrevMatch,

    // Command line
    /// Open the command line. Default: :
    StartCommand,

    // Application
    /// Close the pager. Default: q
    Quit,
}
