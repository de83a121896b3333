//! Boxboard Core Library
//!
//! Platform-agnostic state and interaction logic for the Boxboard editor:
//! boxes on a canvas, tool handlers, snapping and keyboard shortcuts.

pub mod board;
pub mod canvas;
pub mod clipboard;
pub mod config;
pub mod debounce;
pub mod div_box;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod selection;
pub mod shortcuts;
pub mod snap;
pub mod tools;

pub use board::Board;
pub use canvas::Canvas;
pub use clipboard::{ClipboardBackend, ClipboardError, MemoryClipboard};
pub use config::{BoardConfig, ConfigError};
pub use div_box::{BackgroundLayer, BoxId, DivBox, DivBoxOptions};
pub use editor::{Editor, EditorError, LinearGradient, PenImageType, RadialGradient};
pub use geometry::{align_to_grid, align_to_range, GRID_STEP};
pub use input::{Key, KeyInput, Modifiers, PointerEvent, PointerTarget};
pub use selection::SelectionRect;
pub use shortcuts::{Direction, Shortcut, ShortcutAction, ShortcutOutcome, ShortcutRegistry};
pub use snap::{GuideLine, Guides, SNAP_THRESHOLD};
pub use tools::{ToolHandler, ToolKind};
