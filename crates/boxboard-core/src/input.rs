//! Pointer and keyboard input types.

use crate::board::Board;
use crate::div_box::BoxId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Element id prefix hosts use for rendered boxes (`divbox_<index>`).
pub const BOX_ELEMENT_PREFIX: &str = "divbox_";

/// Element id of a box's resize handle.
pub const RESIZE_ELEMENT_ID: &str = "resize";

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// What the pointer is over when an event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointerTarget {
    /// Empty canvas surface.
    Canvas,
    /// The body of a box.
    Box(BoxId),
    /// A box's resize handle.
    ResizeHandle(BoxId),
    /// Anything else (toolbars, overlays, outside the canvas).
    #[default]
    Other,
}

impl PointerTarget {
    /// Resolve a rendered element id to a target.
    ///
    /// `resize` handles are identified through their parent's id. Indices
    /// that do not name a box resolve to [`PointerTarget::Other`].
    pub fn from_element_id(board: &Board, id: &str, parent_id: Option<&str>) -> Self {
        let box_at = |element: &str| {
            element
                .strip_prefix(BOX_ELEMENT_PREFIX)
                .and_then(|index| index.parse::<usize>().ok())
                .and_then(|index| board.id_at_index(index))
        };

        if id == RESIZE_ELEMENT_ID {
            parent_id
                .and_then(box_at)
                .map_or(Self::Other, Self::ResizeHandle)
        } else {
            box_at(id).map_or(Self::Other, Self::Box)
        }
    }

    /// The box under the pointer, via either its body or its handle.
    pub fn box_id(self) -> Option<BoxId> {
        match self {
            Self::Box(id) | Self::ResizeHandle(id) => Some(id),
            Self::Canvas | Self::Other => None,
        }
    }
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        target: PointerTarget,
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        target: PointerTarget,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        target: PointerTarget,
        modifiers: Modifiers,
    },
}

/// Keys the editor reacts to. Everything else is [`Key::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Character(String),
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Other,
}

/// A key press.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
    /// False while focus is inside a text field.
    pub focus_on_body: bool,
}

impl KeyInput {
    /// A key pressed with page focus and no modifiers.
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            focus_on_body: true,
        }
    }

    /// A key pressed with Ctrl held.
    pub fn ctrl(key: Key) -> Self {
        Self {
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
            ..Self::plain(key)
        }
    }
}
