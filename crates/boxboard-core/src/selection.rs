//! Drag-select rectangle and box manipulation state.

use crate::div_box::{BoxId, DivBox};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Side length of the square resize handle at a box's bottom-right corner.
pub const RESIZE_HANDLE_SIZE: f64 = 10.0;

/// Normalized rectangle swept by a drag, anchored at its top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SelectionRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionRect {
    /// Rectangle spanning two points in any order.
    pub fn from_points(start: Point, current: Point) -> Self {
        Self {
            left: start.x.min(current.x),
            top: start.y.min(current.y),
            width: (current.x - start.x).abs(),
            height: (current.y - start.y).abs(),
        }
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.left,
            self.top,
            self.left + self.width,
            self.top + self.height,
        )
    }

    /// Strict containment: every edge of the box lies inside, none touching.
    pub fn contains_box(&self, b: &DivBox) -> bool {
        self.left < b.left
            && self.left + self.width > b.right()
            && self.top < b.top
            && self.top + self.height > b.bottom()
    }
}

/// Square resize handle of a box.
pub fn resize_handle(b: &DivBox, handle_size: f64) -> Rect {
    Rect::new(
        b.right() - handle_size,
        b.bottom() - handle_size,
        b.right(),
        b.bottom(),
    )
}

/// What a drag does to its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragKind {
    Move,
    Resize,
}

/// State of an active drag on a single box.
#[derive(Debug, Clone)]
pub struct DragState {
    /// The box being dragged.
    pub box_id: BoxId,
    pub kind: DragKind,
    /// Starting point of the drag.
    pub start_point: Point,
    /// Current point of the drag.
    pub current_point: Point,
    /// Box geometry when the drag began.
    pub original: Rect,
}

impl DragState {
    /// Start a drag.
    pub fn new(box_id: BoxId, kind: DragKind, start_point: Point, original: Rect) -> Self {
        Self {
            box_id,
            kind,
            start_point,
            current_point: start_point,
            original,
        }
    }

    /// Get the drag delta.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }
}
