//! Keyboard shortcut registry and key resolution.

use crate::input::{Key, KeyInput};
use crate::tools::ToolKind;

/// Digit keys selecting each tool, in menu order.
const TOOL_KEYS: [&str; 3] = ["1", "2", "3"];

/// Arrow direction for nudging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit offset in canvas coordinates (y grows downward).
    pub fn unit(self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

/// What a key press asks the editor to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Activate the tool at a menu index.
    SelectTool(usize),
    /// Delete with pointer-tool semantics.
    Delete,
    /// Copy the current box to the clipboard.
    Copy,
    /// Paste a box from the clipboard.
    Paste,
    /// Move the current box one step.
    Nudge(Direction),
}

/// Result of handling a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutOutcome {
    /// The action that ran, if the key is bound.
    pub action: Option<ShortcutAction>,
    /// The host should suppress the key's default behavior.
    pub prevent_default: bool,
}

impl ShortcutOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled(action: ShortcutAction) -> Self {
        Self {
            action: Some(action),
            prevent_default: true,
        }
    }
}

/// Map a key press to its action. Keys typed into text fields and unbound
/// keys resolve to `None`.
pub fn resolve(input: &KeyInput) -> Option<ShortcutAction> {
    if !input.focus_on_body {
        return None;
    }
    match &input.key {
        Key::Character(c) => match c.as_str() {
            "1" | "2" | "3" => c.parse::<usize>().ok().map(|n| ShortcutAction::SelectTool(n - 1)),
            "c" | "C" if input.modifiers.ctrl => Some(ShortcutAction::Copy),
            "v" | "V" if input.modifiers.ctrl => Some(ShortcutAction::Paste),
            _ => None,
        },
        Key::Backspace => Some(ShortcutAction::Delete),
        Key::ArrowUp => Some(ShortcutAction::Nudge(Direction::Up)),
        Key::ArrowDown => Some(ShortcutAction::Nudge(Direction::Down)),
        Key::ArrowLeft => Some(ShortcutAction::Nudge(Direction::Left)),
        Key::ArrowRight => Some(ShortcutAction::Nudge(Direction::Right)),
        Key::Other => None,
    }
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+C").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        let mut shortcuts: Vec<Shortcut> = ToolKind::ALL
            .iter()
            .map(|tool| Shortcut::new(TOOL_KEYS[tool.index()], false, tool.hint()))
            .collect();
        shortcuts.extend([
            Shortcut::new("Backspace", false, "Delete selected boxes"),
            Shortcut::new("C", true, "Copy current box"),
            Shortcut::new("V", true, "Paste box"),
            Shortcut::new("Arrows", false, "Nudge current box"),
        ]);
        shortcuts
    }

    /// Log all shortcuts.
    pub fn log_all() {
        log::info!("Keyboard shortcuts:");
        for shortcut in Self::all() {
            log::info!("  {:12} {}", shortcut.format(), shortcut.description);
        }
    }
}
