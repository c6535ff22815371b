//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Defaults follow the usual pager conventions (`more`/`less`).
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Event kind and state are ignored, as is Shift on punctuation (some
    /// terminals report `?` as Shift+`?`).
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let mut modifiers = key.modifiers;
        if let KeyCode::Char(c) = key.code {
            if c.is_uppercase() {
                modifiers.insert(KeyModifiers::SHIFT);
            } else if !c.is_alphabetic() {
                modifiers.remove(KeyModifiers::SHIFT);
            }
        }
        self.bindings
            .get(&KeyEvent::new(key.code, modifiers))
            .copied()
    }

    /// Bind `key` to `action`, replacing any earlier binding.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no key is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = Self {
            bindings: HashMap::new(),
        };
        let plain = |c: char| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        let shifted = |c: char| KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT);
        let ctrl = |c: char| KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL);
        let key = |code: KeyCode| KeyEvent::new(code, KeyModifiers::NONE);

        // Paging
        bindings.bind(plain(' '), KeyAction::PageDown);
        bindings.bind(plain('f'), KeyAction::PageDown);
        bindings.bind(ctrl('f'), KeyAction::PageDown);
        bindings.bind(key(KeyCode::PageDown), KeyAction::PageDown);
        bindings.bind(plain('b'), KeyAction::PageUp);
        bindings.bind(ctrl('b'), KeyAction::PageUp);
        bindings.bind(key(KeyCode::PageUp), KeyAction::PageUp);

        // Line scrolling
        bindings.bind(plain('j'), KeyAction::LineDown);
        bindings.bind(key(KeyCode::Down), KeyAction::LineDown);
        bindings.bind(key(KeyCode::Enter), KeyAction::LineDown);
        bindings.bind(plain('k'), KeyAction::LineUp);
        bindings.bind(key(KeyCode::Up), KeyAction::LineUp);

        // Horizontal shift
        bindings.bind(plain('h'), KeyAction::ShiftLeft);
        bindings.bind(key(KeyCode::Left), KeyAction::ShiftLeft);
        bindings.bind(plain('l'), KeyAction::ShiftRight);
        bindings.bind(key(KeyCode::Right), KeyAction::ShiftRight);

        // Jumps
        bindings.bind(plain('g'), KeyAction::Top);
        bindings.bind(plain('<'), KeyAction::Top);
        bindings.bind(key(KeyCode::Home), KeyAction::Top);
        bindings.bind(shifted('G'), KeyAction::Bottom);
        bindings.bind(plain('>'), KeyAction::Bottom);
        bindings.bind(key(KeyCode::End), KeyAction::Bottom);

        // Search
        bindings.bind(plain('/'), KeyAction::SearchForward);
        bindings.bind(plain('?'), KeyAction::SearchBackward);
        bindings.bind(plain('n'), KeyAction::NextMatch);
        bindings.bind(shifted('N'), KeyAction::PrevMatch);

        // Command line
        bindings.bind(plain(':'), KeyAction::StartCommand);

        // Application controls
        bindings.bind(plain('q'), KeyAction::Quit);
        bindings.bind(ctrl('c'), KeyAction::Quit);

        bindings
    }
}
