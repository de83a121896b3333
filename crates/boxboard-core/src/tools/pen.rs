//! Pen tool: click to stamp a pen-sized box under the pointer.

use super::{ToolContext, ToolHandler};
use crate::div_box::DivBoxOptions;
use crate::input::PointerTarget;

/// Handler for [`super::ToolKind::Pen`].
#[derive(Debug, Clone, Default)]
pub struct PenTool;

impl ToolHandler for PenTool {
    fn on_pointer_down(&mut self, _cx: &mut ToolContext<'_>) {}

    fn on_pointer_move(&mut self, _cx: &mut ToolContext<'_>) {}

    fn on_pointer_up(&mut self, cx: &mut ToolContext<'_>) {
        if cx.board.is_pointer_dragging() || cx.target == PointerTarget::Other {
            return;
        }
        if cx.editor.pen_image().is_none() {
            log::warn!("Pen has no image to draw with");
            return;
        }
        cx.board.draw_div_box(DivBoxOptions::default(), cx.editor);
    }
}
