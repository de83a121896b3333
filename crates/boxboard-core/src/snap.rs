//! Edge snapping between boxes and the guide lines that show it.

use crate::div_box::DivBox;
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// Distance (in canvas units) within which box edges snap together.
pub const SNAP_THRESHOLD: f64 = 10.0;

/// Thickness of a rendered guide line.
pub const GUIDE_THICKNESS: f64 = 1.0;

/// Style values for one guide line overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The guide lines currently shown, at most one per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Guides {
    /// Horizontal line: a top or bottom edge matched.
    pub horizontal: Option<GuideLine>,
    /// Vertical line: a left or right edge matched.
    pub vertical: Option<GuideLine>,
}

impl Guides {
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_none() && self.vertical.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Result of snapping a moving box against its neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The (possibly) snapped top-left corner.
    pub point: Point,
    pub guides: Guides,
}

impl SnapResult {
    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        !self.guides.is_empty()
    }
}

/// Match the candidate's near and far edge on one axis against another box's
/// near and far edge. Returns the snapped near-edge coordinate and the edge
/// that matched.
fn snap_axis(start: f64, extent: f64, other_start: f64, other_end: f64, threshold: f64) -> Option<(f64, f64)> {
    let end = start + extent;
    if (start - other_start).abs() <= threshold {
        Some((other_start, other_start))
    } else if (start - other_end).abs() <= threshold {
        Some((other_end, other_end))
    } else if (end - other_start).abs() <= threshold {
        Some((other_start - extent, other_start))
    } else if (end - other_end).abs() <= threshold {
        Some((other_end - extent, other_end))
    } else {
        None
    }
}

/// Snap a box of `size` placed at `position` to the edges of `others`.
///
/// Every box is tested against the unsnapped position and there is no early
/// exit, so when several boxes match on the same axis the last one in list
/// order wins, not the nearest.
pub fn align_to_nearest_box<'a>(
    position: Point,
    size: Size,
    others: impl IntoIterator<Item = &'a DivBox>,
    threshold: f64,
) -> SnapResult {
    let mut point = position;
    let mut guides = Guides::default();

    for other in others {
        if let Some((x, edge)) = snap_axis(position.x, size.width, other.left, other.right(), threshold) {
            point.x = x;
            let top = position.y.min(other.top);
            let bottom = (position.y + size.height).max(other.bottom());
            guides.vertical = Some(GuideLine {
                left: edge,
                top,
                width: GUIDE_THICKNESS,
                height: bottom - top,
            });
        }
        if let Some((y, edge)) = snap_axis(position.y, size.height, other.top, other.bottom(), threshold) {
            point.y = y;
            let left = position.x.min(other.left);
            let right = (position.x + size.width).max(other.right());
            guides.horizontal = Some(GuideLine {
                left,
                top: edge,
                width: right - left,
                height: GUIDE_THICKNESS,
            });
        }
    }

    SnapResult { point, guides }
}
