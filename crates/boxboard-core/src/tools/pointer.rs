//! Pointer tool: click to select, drag to sweep-select.

use super::{ToolContext, ToolHandler, ToolKind};
use crate::board::Board;
use crate::debounce::Debounce;
use crate::input::PointerTarget;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Handler for [`ToolKind::Pointer`].
#[derive(Debug, Clone)]
pub struct PointerTool {
    /// Coalesces containment checks while the selection rectangle grows.
    recompute: Debounce,
}

impl PointerTool {
    pub fn new(recompute: Debounce) -> Self {
        Self { recompute }
    }

    /// Whether a debounced containment check is waiting.
    pub fn has_pending_recompute(&self) -> bool {
        self.recompute.is_pending()
    }
}

impl ToolHandler for PointerTool {
    fn on_pointer_down(&mut self, _cx: &mut ToolContext<'_>) {}

    fn on_pointer_move(&mut self, cx: &mut ToolContext<'_>) {
        if cx.board.is_pointer_selecting(ToolKind::Pointer) {
            self.recompute.schedule(cx.now);
        }
    }

    fn on_pointer_up(&mut self, cx: &mut ToolContext<'_>) {
        if cx.board.is_pointer_selecting(ToolKind::Pointer) {
            self.recompute.cancel();
            cx.board.select_within_pointer_rect();
            log::debug!("Drag-select picked {} box(es)", cx.board.selected_ids().len());
            return;
        }

        match cx.target {
            PointerTarget::Canvas => cx.board.clear_selection(),
            PointerTarget::Box(id) | PointerTarget::ResizeHandle(id) => {
                cx.board.set_current(Some(id));
                if cx.modifiers.ctrl {
                    cx.board.toggle_selected(id);
                } else {
                    cx.board.select_only(id);
                }
            }
            PointerTarget::Other => {}
        }
    }

    fn tick(&mut self, board: &mut Board, now: Instant) {
        if self.recompute.poll(now) && board.is_pointer_selecting(ToolKind::Pointer) {
            board.select_within_pointer_rect();
        }
    }

    fn reset(&mut self) {
        self.recompute.cancel();
    }
}
