//! Keyboard shortcuts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A key with its modifiers. `Cmd` on macOS counts as `Ctrl`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeyChord {
    /// Lowercased key name: `"z"`, `"delete"`, `"escape"`, `"f2"`
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into().to_lowercase(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Parse `"Ctrl+Shift+Z"` style notation
    pub fn parse(text: &str) -> Option<Self> {
        let mut chord = KeyChord::default();
        for part in text.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "" => return None,
                "ctrl" | "control" | "cmd" | "meta" => chord.ctrl = true,
                "shift" => chord.shift = true,
                "alt" | "option" => chord.alt = true,
                "esc" => chord.key = "escape".to_string(),
                "del" => chord.key = "delete".to_string(),
                key => chord.key = key.to_string(),
            }
        }
        (!chord.key.is_empty()).then_some(chord)
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        let mut chars = self.key.chars();
        match chars.next() {
            Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    Duplicate,
    Delete,
    Rename,
    Save,
    TogglePreview,
    Escape,
}

impl Command {
    /// Commands that stay active in preview mode
    pub fn allowed_in_preview(&self) -> bool {
        matches!(self, Command::TogglePreview | Command::Save | Command::Escape)
    }
}

#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: Vec<(KeyChord, Command)>,
}

impl Default for Keymap {
    fn default() -> Self {
        let bindings = vec![
            (KeyChord::new("z").ctrl(), Command::Undo),
            (KeyChord::new("z").ctrl().shift(), Command::Redo),
            (KeyChord::new("y").ctrl(), Command::Redo),
            (KeyChord::new("c").ctrl(), Command::Copy),
            (KeyChord::new("x").ctrl(), Command::Cut),
            (KeyChord::new("v").ctrl(), Command::Paste),
            (KeyChord::new("d").ctrl(), Command::Duplicate),
            (KeyChord::new("delete"), Command::Delete),
            (KeyChord::new("backspace"), Command::Delete),
            (KeyChord::new("f2"), Command::Rename),
            (KeyChord::new("s").ctrl(), Command::Save),
            (KeyChord::new("p").ctrl(), Command::TogglePreview),
            (KeyChord::new("escape"), Command::Escape),
        ];
        Self { bindings }
    }
}

impl Keymap {
    pub fn lookup(&self, chord: &KeyChord) -> Option<Command> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == chord)
            .map(|(_, command)| *command)
    }

    /// First chord bound to `command`, for menu hints
    pub fn shortcut_for(&self, command: Command) -> Option<&KeyChord> {
        self.bindings
            .iter()
            .find(|(_, bound)| *bound == command)
            .map(|(chord, _)| chord)
    }

    pub fn bind(&mut self, chord: KeyChord, command: Command) {
        self.bindings.retain(|(bound, _)| bound != &chord);
        self.bindings.push((chord, command));
    }
}
