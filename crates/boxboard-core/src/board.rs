//! Board state: the placed boxes and the pointer gesture in progress.

use crate::config::BoardConfig;
use crate::div_box::{BackgroundLayer, BoxId, DivBox, DivBoxOptions};
use crate::editor::Editor;
use crate::geometry::{align_to_grid, align_to_range, GRID_STEP};
use crate::input::PointerTarget;
use crate::selection::{resize_handle, DragKind, DragState, SelectionRect};
use crate::snap::{align_to_nearest_box, Guides};
use crate::tools::ToolKind;
use kurbo::{Point, Rect, Size};

/// Smallest width or height a box may have.
pub const MIN_BOX_SIZE: f64 = 1.0;

/// All boxes on the canvas plus the transient interaction state around them.
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    canvas_size: Size,
    /// Boxes, back to front.
    boxes: Vec<DivBox>,
    /// Last known pointer position.
    offset: Point,
    /// Where the current press started.
    press_point: Point,
    is_pressing: bool,
    /// Drag/resize target.
    current: Option<BoxId>,
    drag: Option<DragState>,
    guides: Guides,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl Board {
    /// Create an empty board.
    pub fn new(config: BoardConfig) -> Self {
        Self {
            canvas_size: Size::new(config.canvas_width, config.canvas_height),
            config,
            boxes: Vec::new(),
            offset: Point::ZERO,
            press_point: Point::ZERO,
            is_pressing: false,
            current: None,
            drag: None,
            guides: Guides::default(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// Update the canvas bounds, e.g. after the host resized.
    pub fn set_canvas_size(&mut self, size: Size) {
        self.canvas_size = size;
    }

    /// Boxes in z-order (back to front).
    pub fn boxes(&self) -> &[DivBox] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn get(&self, id: BoxId) -> Option<&DivBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BoxId) -> Option<&mut DivBox> {
        self.boxes.iter_mut().find(|b| b.id == id)
    }

    /// Position of a box in z-order.
    pub fn index_of(&self, id: BoxId) -> Option<usize> {
        self.boxes.iter().position(|b| b.id == id)
    }

    /// Id of the box at a z-order position.
    pub fn id_at_index(&self, index: usize) -> Option<BoxId> {
        self.boxes.get(index).map(DivBox::id)
    }

    /// Ids of every selected box.
    pub fn selected_ids(&self) -> Vec<BoxId> {
        self.boxes.iter().filter(|b| b.selected).map(DivBox::id).collect()
    }

    /// The drag/resize target.
    pub fn current(&self) -> Option<BoxId> {
        self.current
    }

    pub fn current_box(&self) -> Option<&DivBox> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn set_current(&mut self, id: Option<BoxId>) {
        self.current = id;
    }

    /// Guide lines to render.
    pub fn guides(&self) -> &Guides {
        &self.guides
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Record the latest pointer position.
    pub fn set_offset(&mut self, point: Point) {
        self.offset = point;
    }

    pub fn press_point(&self) -> Point {
        self.press_point
    }

    pub fn is_pressing(&self) -> bool {
        self.is_pressing
    }

    /// Start a press at a point.
    pub fn press(&mut self, point: Point) {
        self.is_pressing = true;
        self.press_point = point;
        self.offset = point;
    }

    /// End the current press.
    pub fn release(&mut self) {
        self.is_pressing = false;
    }

    /// Rectangle between the press point and the current pointer offset.
    pub fn pointer_select_rect(&self) -> SelectionRect {
        SelectionRect::from_points(self.press_point, self.offset)
    }

    /// The pointer is pressed and has travelled past the drag threshold.
    pub fn is_pointer_dragging(&self) -> bool {
        let moved = self.offset - self.press_point;
        let threshold = self.config.drag_threshold;
        self.is_pressing && (moved.x.abs() > threshold || moved.y.abs() > threshold)
    }

    /// A drag-select gesture is in progress: a drag under the pointer tool.
    pub fn is_pointer_selecting(&self, tool: ToolKind) -> bool {
        tool == ToolKind::Pointer && self.is_pointer_dragging()
    }

    /// Add a box. Unset options default to a pen-sized box centered on the
    /// last pointer offset, clamped into the canvas, painted with the pen.
    ///
    /// Afterwards no box is current, the pointer tool is active and the press
    /// is over.
    pub fn draw_div_box(&mut self, options: DivBoxOptions, editor: &mut Editor) -> BoxId {
        let pen_size = editor.pen_size;
        let half = pen_size / 2.0;
        let max_left = (self.canvas_size.width - pen_size).max(0.0);
        let max_top = (self.canvas_size.height - pen_size).max(0.0);

        let width = options.width.unwrap_or(pen_size).max(MIN_BOX_SIZE);
        let height = options.height.unwrap_or(pen_size).max(MIN_BOX_SIZE);
        let left = options
            .left
            .unwrap_or_else(|| align_to_range(self.offset.x - half, (Some(0.0), max_left)));
        let top = options
            .top
            .unwrap_or_else(|| align_to_range(self.offset.y - half, (Some(0.0), max_top)));
        let background = options.background.unwrap_or_else(|| {
            vec![BackgroundLayer::covering(editor.pen_image(), Size::new(width, height))]
        });

        let mut div_box = DivBox::new(left, top, width, height);
        div_box.background = background;
        div_box.selected = options.selected.unwrap_or(false);
        div_box.is_resizable = options.is_resizable.unwrap_or(true);
        let id = div_box.id;
        log::debug!("Drew box {} at ({}, {}) {}x{}", id, left, top, width, height);
        self.boxes.push(div_box);

        self.current = None;
        self.drag = None;
        self.guides.clear();
        editor.set_tool(ToolKind::Pointer);
        self.is_pressing = false;
        id
    }

    /// Remove a box.
    pub fn remove(&mut self, id: BoxId) -> Option<DivBox> {
        let index = self.index_of(id)?;
        if self.current == Some(id) {
            self.current = None;
        }
        if self.drag.as_ref().is_some_and(|d| d.box_id == id) {
            self.end_drag();
        }
        Some(self.boxes.remove(index))
    }

    /// Delete according to the active tool: the current box under the div
    /// tool, every selected box under the pointer tool, nothing otherwise.
    /// Returns how many boxes were removed.
    pub fn on_close(&mut self, tool: ToolKind) -> usize {
        let removed = match tool {
            ToolKind::Div => {
                let current = self.current;
                current.and_then(|id| self.remove(id)).map_or(0, |_| 1)
            }
            ToolKind::Pointer => {
                let ids = self.selected_ids();
                ids.into_iter().filter_map(|id| self.remove(id)).count()
            }
            ToolKind::Pen => 0,
        };
        if removed > 0 {
            log::info!("Deleted {} box(es)", removed);
        }
        removed
    }

    /// Reset interaction state when the active tool changes.
    pub fn on_switch_menu(&mut self) {
        self.is_pressing = false;
        self.clear_selection();
        self.current = None;
        self.end_drag();
    }

    /// Unselect every box.
    pub fn clear_selection(&mut self) {
        for b in &mut self.boxes {
            b.selected = false;
        }
    }

    /// Select one box and unselect the rest.
    pub fn select_only(&mut self, id: BoxId) {
        for b in &mut self.boxes {
            b.selected = b.id == id;
        }
    }

    /// Flip one box's selection, leaving the others alone.
    pub fn toggle_selected(&mut self, id: BoxId) {
        if let Some(b) = self.get_mut(id) {
            b.selected = !b.selected;
        }
    }

    /// Select exactly the boxes strictly inside a rectangle.
    pub fn select_within(&mut self, rect: SelectionRect) {
        for b in &mut self.boxes {
            b.selected = rect.contains_box(b);
        }
    }

    /// Select exactly the boxes inside the current drag-select rectangle.
    pub fn select_within_pointer_rect(&mut self) {
        self.select_within(self.pointer_select_rect());
    }

    /// Snap a box placed at `position` to the other boxes' edges and record
    /// the guide lines. Returns the snapped top-left corner.
    pub fn align_to_nearest_box(&mut self, position: Point, id: BoxId) -> Point {
        let Some(size) = self.get(id).map(DivBox::size) else {
            return position;
        };
        let result = align_to_nearest_box(
            position,
            size,
            self.boxes.iter().filter(|b| b.id != id),
            self.config.snap_threshold,
        );
        if result.is_snapped() {
            log::trace!("Snapped box {} to ({}, {})", id, result.point.x, result.point.y);
        }
        self.guides = result.guides;
        result.point
    }

    /// What lies under a canvas point, topmost box first.
    pub fn target_at(&self, point: Point) -> PointerTarget {
        let handle_size = self.config.resize_handle_size;
        for b in self.boxes.iter().rev() {
            if b.is_resizable && resize_handle(b, handle_size).contains(point) {
                return PointerTarget::ResizeHandle(b.id);
            }
            if b.as_rect().contains(point) {
                return PointerTarget::Box(b.id);
            }
        }
        let canvas = Rect::from_origin_size(Point::ZERO, self.canvas_size);
        if canvas.contains(point) {
            PointerTarget::Canvas
        } else {
            PointerTarget::Other
        }
    }

    /// The drag in progress, if any.
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Make a box current and start moving it.
    pub fn begin_move(&mut self, id: BoxId, point: Point) -> bool {
        self.begin_drag(id, DragKind::Move, point)
    }

    /// Make a box current and start resizing it. Refused for boxes that are
    /// not resizable.
    pub fn begin_resize(&mut self, id: BoxId, point: Point) -> bool {
        if !self.get(id).is_some_and(|b| b.is_resizable) {
            return false;
        }
        self.begin_drag(id, DragKind::Resize, point)
    }

    fn begin_drag(&mut self, id: BoxId, kind: DragKind, point: Point) -> bool {
        let Some(original) = self.get(id).map(DivBox::as_rect) else {
            return false;
        };
        self.current = Some(id);
        self.drag = Some(DragState::new(id, kind, point, original));
        true
    }

    /// Continue the drag in progress to a new pointer position.
    pub fn drag_to(&mut self, point: Point) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.current_point = point;
        let drag = drag.clone();
        let delta = drag.delta();

        match drag.kind {
            DragKind::Move => {
                let candidate = drag.original.origin() + delta;
                let snapped = self.align_to_nearest_box(candidate, drag.box_id);
                let canvas = self.canvas_size;
                let size = drag.original.size();
                let origin = Point::new(
                    align_to_range(snapped.x, (Some(0.0), (canvas.width - size.width).max(0.0))),
                    align_to_range(snapped.y, (Some(0.0), (canvas.height - size.height).max(0.0))),
                );
                if let Some(b) = self.get_mut(drag.box_id) {
                    b.set_origin(origin);
                }
            }
            DragKind::Resize => {
                let width = align_to_grid(drag.original.width() + delta.x).max(GRID_STEP);
                let height = align_to_grid(drag.original.height() + delta.y).max(GRID_STEP);
                if let Some(b) = self.get_mut(drag.box_id) {
                    resize_box(b, Size::new(width, height));
                }
            }
        }
    }

    /// Finish the drag in progress and hide the guides.
    pub fn end_drag(&mut self) {
        self.drag = None;
        self.guides.clear();
    }

    /// Shift the current box. Returns false when no box is current.
    pub fn nudge(&mut self, dx: f64, dy: f64) -> bool {
        let Some(id) = self.current else {
            return false;
        };
        let Some(b) = self.get_mut(id) else {
            return false;
        };
        b.left += dx;
        b.top += dy;
        true
    }
}

/// Resize a box, scaling its background layers with it.
fn resize_box(b: &mut DivBox, size: Size) {
    for layer in &mut b.background {
        layer.x = layer.x * size.width / b.width;
        layer.w = layer.w * size.width / b.width;
        layer.y = layer.y * size.height / b.height;
        layer.h = layer.h * size.height / b.height;
    }
    b.width = size.width;
    b.height = size.height;
}
