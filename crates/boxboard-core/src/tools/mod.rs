//! Tool system for the editor.
//!
//! Each tool owns a pointer handler; [`crate::Canvas`] dispatches pointer
//! events to the handler of the active tool.

mod div;
mod pen;
mod pointer;

pub use div::DivTool;
pub use pen::PenTool;
pub use pointer::PointerTool;

use crate::board::Board;
use crate::editor::Editor;
use crate::input::{Modifiers, PointerTarget};
use kurbo::Point;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Available tools, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pointer,
    Pen,
    Div,
}

impl ToolKind {
    /// All tools in menu order. A tool's position here is its menu index.
    pub const ALL: [ToolKind; 3] = [ToolKind::Pointer, ToolKind::Pen, ToolKind::Div];

    /// Tool at a menu index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Menu index of this tool.
    pub fn index(self) -> usize {
        match self {
            ToolKind::Pointer => 0,
            ToolKind::Pen => 1,
            ToolKind::Div => 2,
        }
    }

    /// Stable key used by menus.
    pub fn key(self) -> &'static str {
        match self {
            ToolKind::Pointer => "pointer",
            ToolKind::Pen => "pen",
            ToolKind::Div => "div",
        }
    }

    /// Short hint shown next to the menu entry.
    pub fn hint(self) -> &'static str {
        match self {
            ToolKind::Pointer => "mouse",
            ToolKind::Pen => "pen mode",
            ToolKind::Div => "div mode",
        }
    }
}

/// Everything a tool handler may read or change while handling one event.
pub struct ToolContext<'a> {
    pub board: &'a mut Board,
    pub editor: &'a mut Editor,
    /// Pointer position in canvas coordinates.
    pub position: Point,
    /// What the pointer is over.
    pub target: PointerTarget,
    pub modifiers: Modifiers,
    pub now: Instant,
}

/// Pointer handler for one tool.
///
/// The board's pressing flag and pointer offsets are updated by the canvas
/// before `on_pointer_down`/`on_pointer_move` and after `on_pointer_up`.
pub trait ToolHandler {
    fn on_pointer_down(&mut self, cx: &mut ToolContext<'_>);
    fn on_pointer_move(&mut self, cx: &mut ToolContext<'_>);
    fn on_pointer_up(&mut self, cx: &mut ToolContext<'_>);

    /// Called on every tick so time-based work can complete.
    fn tick(&mut self, _board: &mut Board, _now: Instant) {}

    /// Drop any in-flight gesture state.
    fn reset(&mut self) {}
}
