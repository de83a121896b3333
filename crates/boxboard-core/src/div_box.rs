//! Boxes placed on the canvas.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a box. Never serialized: a pasted box gets a new one.
pub type BoxId = Uuid;

/// One background image layer, positioned in box-local units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundLayer {
    /// CSS background-image; absent when the pen had no image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl BackgroundLayer {
    /// A layer that covers a box of the given size.
    pub fn covering(image: Option<String>, size: Size) -> Self {
        Self {
            image,
            x: 0.0,
            y: 0.0,
            w: size.width,
            h: size.height,
        }
    }
}

/// A rectangle on the canvas with a gradient background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DivBox {
    #[serde(skip, default = "Uuid::new_v4")]
    pub(crate) id: BoxId,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub background: Vec<BackgroundLayer>,
    pub selected: bool,
    pub is_resizable: bool,
}

impl DivBox {
    /// Create an unselected, resizable box with no background.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            left,
            top,
            width,
            height,
            background: Vec::new(),
            selected: false,
            is_resizable: true,
        }
    }

    pub fn id(&self) -> BoxId {
        self.id
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// The box as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.left, self.top, self.right(), self.bottom())
    }

    /// Move the top-left corner.
    pub fn set_origin(&mut self, origin: Point) {
        self.left = origin.x;
        self.top = origin.y;
    }

    /// Serialize for the clipboard.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Overrides for [`crate::Board::draw_div_box`]. Unset fields take the
/// board's defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DivBoxOptions {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub background: Option<Vec<BackgroundLayer>>,
    pub selected: Option<bool>,
    pub is_resizable: Option<bool>,
}

impl DivBoxOptions {
    /// Options that place a box exactly over a rectangle.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            left: Some(rect.x0),
            top: Some(rect.y0),
            width: Some(rect.width()),
            height: Some(rect.height()),
            ..Self::default()
        }
    }
}
