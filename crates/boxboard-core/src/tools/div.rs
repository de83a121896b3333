//! Div tool: drag anywhere to create a box spanning the drag.
//!
//! Two presses edit instead of create: one on a resizable box's handle
//! resizes it, one on the body of the current box moves it. A click on a box
//! makes it current.

use super::{ToolContext, ToolHandler};
use crate::div_box::DivBoxOptions;
use crate::input::PointerTarget;

/// Handler for [`super::ToolKind::Div`].
#[derive(Debug, Clone, Default)]
pub struct DivTool;

impl ToolHandler for DivTool {
    fn on_pointer_down(&mut self, cx: &mut ToolContext<'_>) {
        match cx.target {
            PointerTarget::ResizeHandle(id) => {
                cx.board.begin_resize(id, cx.position);
            }
            PointerTarget::Box(id) if cx.board.current() == Some(id) => {
                cx.board.begin_move(id, cx.position);
            }
            PointerTarget::Box(_) => {}
            PointerTarget::Canvas | PointerTarget::Other => cx.board.set_current(None),
        }
    }

    fn on_pointer_move(&mut self, cx: &mut ToolContext<'_>) {
        if cx.board.is_pressing() && cx.board.drag().is_some() {
            cx.board.drag_to(cx.position);
        }
    }

    fn on_pointer_up(&mut self, cx: &mut ToolContext<'_>) {
        if cx.board.drag().is_some() {
            cx.board.end_drag();
            return;
        }
        if !cx.board.is_pointer_dragging() {
            if let PointerTarget::Box(id) | PointerTarget::ResizeHandle(id) = cx.target {
                cx.board.set_current(Some(id));
            }
            return;
        }

        let rect = cx.board.pointer_select_rect();
        if rect.width <= 0.0 || rect.height <= 0.0 {
            log::debug!("Ignoring zero-area box drag");
            return;
        }
        cx.board.draw_div_box(DivBoxOptions::from_rect(rect.to_rect()), cx.editor);
    }
}
