//! Editing session: editor state, board state and tool handlers together.

use crate::board::Board;
use crate::clipboard::{decode_paste, encode_box, ClipboardBackend, ClipboardResult};
use crate::config::BoardConfig;
use crate::debounce::Debounce;
use crate::div_box::{BoxId, DivBoxOptions};
use crate::editor::{Editor, EditorError};
use crate::input::{KeyInput, PointerEvent};
use crate::shortcuts::{resolve, ShortcutAction, ShortcutOutcome};
use crate::tools::{DivTool, PenTool, PointerTool, ToolContext, ToolHandler, ToolKind};

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// The entry point hosts drive: feed it pointer events, key presses and ticks,
/// then render [`Board::boxes`] and [`Board::guides`].
#[derive(Debug, Clone)]
pub struct Canvas {
    editor: Editor,
    board: Board,
    pointer: PointerTool,
    div: DivTool,
    pen: PenTool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl Canvas {
    pub fn new(config: BoardConfig) -> Self {
        let pointer = PointerTool::new(Debounce::new(config.select_debounce()));
        Self {
            editor: Editor::with_pen_size(config.pen_size),
            board: Board::new(config),
            pointer,
            div: DivTool,
            pen: PenTool,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The active tool.
    pub fn tool(&self) -> ToolKind {
        self.editor.tool()
    }

    /// Activate the tool at a menu index, resetting selection and gestures.
    pub fn switch_tool_index(&mut self, index: usize) -> Result<ToolKind, EditorError> {
        let tool = self.editor.set_tool_index(index)?;
        self.after_switch(tool);
        Ok(tool)
    }

    /// Activate a tool, resetting selection and gestures.
    pub fn switch_tool(&mut self, tool: ToolKind) {
        self.editor.set_tool(tool);
        self.after_switch(tool);
    }

    fn after_switch(&mut self, tool: ToolKind) {
        self.board.on_switch_menu();
        self.pointer.reset();
        self.div.reset();
        self.pen.reset();
        log::info!("Switched to {} tool", tool.key());
    }

    /// Add a box with the given options. See [`Board::draw_div_box`].
    pub fn draw_div_box(&mut self, options: DivBoxOptions) -> BoxId {
        self.board.draw_div_box(options, &mut self.editor)
    }

    /// Route a pointer event to the active tool.
    pub fn handle_pointer_event(&mut self, event: PointerEvent, now: Instant) {
        let Self {
            editor,
            board,
            pointer,
            div,
            pen,
        } = self;
        let handler: &mut dyn ToolHandler = match editor.tool() {
            ToolKind::Pointer => pointer,
            ToolKind::Pen => pen,
            ToolKind::Div => div,
        };

        match event {
            PointerEvent::Down { position, target, modifiers } => {
                board.press(position);
                let mut cx = ToolContext { board, editor, position, target, modifiers, now };
                handler.on_pointer_down(&mut cx);
            }
            PointerEvent::Move { position, target, modifiers } => {
                board.set_offset(position);
                let mut cx = ToolContext { board, editor, position, target, modifiers, now };
                handler.on_pointer_move(&mut cx);
            }
            PointerEvent::Up { position, target, modifiers } => {
                board.set_offset(position);
                let mut cx = ToolContext { board, editor, position, target, modifiers, now };
                handler.on_pointer_up(&mut cx);
                board.release();
            }
        }
    }

    /// Run time-based work that has come due. Hosts call this every frame.
    pub fn tick(&mut self, now: Instant) {
        match self.editor.tool() {
            ToolKind::Pointer => self.pointer.tick(&mut self.board, now),
            ToolKind::Pen => self.pen.tick(&mut self.board, now),
            ToolKind::Div => self.div.tick(&mut self.board, now),
        }
    }

    /// Whether a debounced drag-select recompute is waiting for [`Canvas::tick`].
    pub fn has_pending_work(&self) -> bool {
        self.pointer.has_pending_recompute()
    }

    /// Copy the current box to the clipboard as JSON. Returns false when no
    /// box is current.
    pub fn copy_current(&self, clipboard: &mut dyn ClipboardBackend) -> ClipboardResult<bool> {
        let Some(current) = self.board.current_box() else {
            return Ok(false);
        };
        let text = encode_box(current)?;
        clipboard.write_text(&text)?;
        Ok(true)
    }

    /// Read the clipboard and paste the box it holds.
    pub fn paste(&mut self, clipboard: &mut dyn ClipboardBackend) -> ClipboardResult<BoxId> {
        let text = clipboard.read_text()?;
        self.paste_text(&text)
    }

    /// Paste a box from clipboard text. Only size, background and
    /// resizability carry over; the box lands at the pointer.
    pub fn paste_text(&mut self, text: &str) -> ClipboardResult<BoxId> {
        let options = decode_paste(text)?;
        let id = self.draw_div_box(options);
        log::info!("Pasted box {}", id);
        Ok(id)
    }

    /// Handle a key press. Clipboard failures are logged, never returned.
    pub fn handle_key(&mut self, input: &KeyInput, clipboard: &mut dyn ClipboardBackend) -> ShortcutOutcome {
        let Some(action) = resolve(input) else {
            return ShortcutOutcome::ignored();
        };

        match action {
            ShortcutAction::SelectTool(index) => {
                if let Err(e) = self.switch_tool_index(index) {
                    log::warn!("{}", e);
                }
            }
            ShortcutAction::Delete => {
                if self.tool() == ToolKind::Pointer {
                    self.board.on_close(ToolKind::Pointer);
                }
            }
            ShortcutAction::Copy => match self.copy_current(clipboard) {
                Ok(true) => log::info!("Copied box to clipboard"),
                Ok(false) => log::debug!("Nothing to copy"),
                Err(e) => log::warn!("Copy failed: {}", e),
            },
            ShortcutAction::Paste => {
                if let Err(e) = self.paste(clipboard) {
                    log::warn!("Paste failed: {}", e);
                }
            }
            ShortcutAction::Nudge(direction) => {
                let (x, y) = direction.unit();
                let step = self.board.config().nudge_step;
                self.board.nudge(x * step, y * step);
            }
        }
        ShortcutOutcome::handled(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClipboardError, MemoryClipboard};
    use crate::input::{Key, Modifiers, PointerTarget};
    use crate::shortcuts::Direction;
    use kurbo::{Point, Rect};
    use std::time::Duration;

    fn down(x: f64, y: f64, target: PointerTarget) -> PointerEvent {
        PointerEvent::Down { position: Point::new(x, y), target, modifiers: Modifiers::default() }
    }

    fn moved(x: f64, y: f64, target: PointerTarget) -> PointerEvent {
        PointerEvent::Move { position: Point::new(x, y), target, modifiers: Modifiers::default() }
    }

    fn up(x: f64, y: f64, target: PointerTarget) -> PointerEvent {
        PointerEvent::Up { position: Point::new(x, y), target, modifiers: Modifiers::default() }
    }

    fn place(canvas: &mut Canvas, left: f64, top: f64, width: f64, height: f64) -> BoxId {
        canvas.draw_div_box(DivBoxOptions::from_rect(Rect::new(left, top, left + width, top + height)))
    }

    fn click(canvas: &mut Canvas, x: f64, y: f64, now: Instant) {
        let target = canvas.board().target_at(Point::new(x, y));
        canvas.handle_pointer_event(down(x, y, target), now);
        canvas.handle_pointer_event(up(x, y, target), now);
    }

    #[test]
    fn test_drag_select_picks_contained_boxes() {
        let mut canvas = Canvas::default();
        let a = place(&mut canvas, 10.0, 10.0, 20.0, 20.0);
        let b = place(&mut canvas, 100.0, 100.0, 20.0, 20.0);
        let now = Instant::now();

        canvas.handle_pointer_event(down(0.0, 0.0, PointerTarget::Canvas), now);
        canvas.handle_pointer_event(moved(50.0, 50.0, PointerTarget::Canvas), now);
        canvas.handle_pointer_event(up(50.0, 50.0, PointerTarget::Canvas), now);

        assert!(canvas.board().get(a).unwrap().selected);
        assert!(!canvas.board().get(b).unwrap().selected);
        assert!(!canvas.has_pending_work());
    }

    #[test]
    fn test_drag_select_recompute_is_debounced() {
        let mut canvas = Canvas::default();
        let a = place(&mut canvas, 10.0, 10.0, 20.0, 20.0);
        let start = Instant::now();

        canvas.handle_pointer_event(down(0.0, 0.0, PointerTarget::Canvas), start);
        canvas.handle_pointer_event(moved(50.0, 50.0, PointerTarget::Canvas), start);
        assert!(canvas.has_pending_work());

        canvas.tick(start + Duration::from_millis(5));
        assert!(!canvas.board().get(a).unwrap().selected);

        canvas.tick(start + Duration::from_millis(10));
        assert!(canvas.board().get(a).unwrap().selected);
        assert!(!canvas.has_pending_work());
    }

    #[test]
    fn test_click_canvas_clears_selection() {
        let mut canvas = Canvas::default();
        let a = place(&mut canvas, 10.0, 10.0, 20.0, 20.0);
        canvas.board_mut().select_only(a);
        click(&mut canvas, 500.0, 500.0, Instant::now());
        assert!(canvas.board().selected_ids().is_empty());
    }

    #[test]
    fn test_click_box_selects_and_ctrl_click_toggles() {
        let mut canvas = Canvas::default();
        let a = place(&mut canvas, 10.0, 10.0, 20.0, 20.0);
        let b = place(&mut canvas, 100.0, 100.0, 20.0, 20.0);
        let now = Instant::now();

        click(&mut canvas, 15.0, 15.0, now);
        assert_eq!(canvas.board().selected_ids(), vec![a]);
        assert_eq!(canvas.board().current(), Some(a));

        let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
        let target = PointerTarget::Box(b);
        let at = Point::new(105.0, 105.0);
        canvas.handle_pointer_event(PointerEvent::Down { position: at, target, modifiers: ctrl }, now);
        canvas.handle_pointer_event(PointerEvent::Up { position: at, target, modifiers: ctrl }, now);
        assert_eq!(canvas.board().selected_ids(), vec![a, b]);
    }

    #[test]
    fn test_div_tool_drag_creates_box_and_returns_to_pointer() {
        let mut canvas = Canvas::default();
        canvas.switch_tool(ToolKind::Div);
        let now = Instant::now();

        canvas.handle_pointer_event(down(100.0, 100.0, PointerTarget::Canvas), now);
        canvas.handle_pointer_event(moved(150.0, 180.0, PointerTarget::Canvas), now);
        canvas.handle_pointer_event(up(150.0, 180.0, PointerTarget::Canvas), now);

        assert_eq!(canvas.board().len(), 1);
        let b = &canvas.board().boxes()[0];
        assert_eq!((b.left, b.top, b.width, b.height), (100.0, 100.0, 50.0, 80.0));
        assert_eq!(canvas.tool(), ToolKind::Pointer);
        assert!(!canvas.board().is_pressing());
    }

    #[test]
    fn test_div_tool_click_without_drag_creates_nothing() {
        let mut canvas = Canvas::default();
        canvas.switch_tool(ToolKind::Div);
        click(&mut canvas, 100.0, 100.0, Instant::now());
        assert!(canvas.board().is_empty());
        assert_eq!(canvas.tool(), ToolKind::Div);
    }

    #[test]
    fn test_div_tool_drag_from_box_creates_new_box() {
        let mut canvas = Canvas::default();
        let id = place(&mut canvas, 100.0, 100.0, 100.0, 100.0);
        canvas.switch_tool(ToolKind::Div);
        let now = Instant::now();

        canvas.handle_pointer_event(down(150.0, 150.0, PointerTarget::Box(id)), now);
        canvas.handle_pointer_event(moved(400.0, 400.0, PointerTarget::Canvas), now);
        canvas.handle_pointer_event(up(400.0, 400.0, PointerTarget::Canvas), now);

        assert_eq!(canvas.board().len(), 2);
        let original = canvas.board().get(id).unwrap();
        assert_eq!((original.left, original.top), (100.0, 100.0));
        let created = &canvas.board().boxes()[1];
        assert_eq!(
            (created.left, created.top, created.width, created.height),
            (150.0, 150.0, 250.0, 250.0)
        );
        assert_eq!(canvas.tool(), ToolKind::Pointer);
    }

    #[test]
    fn test_div_tool_resizes_from_handle() {
        let mut canvas = Canvas::default();
        let id = place(&mut canvas, 300.0, 300.0, 50.0, 50.0);
        canvas.switch_tool(ToolKind::Div);
        let now = Instant::now();

        let target = PointerTarget::ResizeHandle(id);
        canvas.handle_pointer_event(down(345.0, 345.0, target), now);
        canvas.handle_pointer_event(moved(375.0, 365.0, target), now);
        canvas.handle_pointer_event(up(375.0, 365.0, target), now);

        let b = canvas.board().get(id).unwrap();
        assert_eq!((b.width, b.height), (80.0, 70.0));
        assert_eq!(canvas.board().len(), 1);
        assert_eq!(canvas.tool(), ToolKind::Div);
    }

    #[test]
    fn test_div_tool_moves_current_box() {
        let mut canvas = Canvas::default();
        let id = place(&mut canvas, 300.0, 300.0, 50.0, 50.0);
        canvas.switch_tool(ToolKind::Div);
        let now = Instant::now();

        click(&mut canvas, 310.0, 310.0, now);
        assert_eq!(canvas.board().current(), Some(id));
        assert_eq!(canvas.board().len(), 1);

        let target = PointerTarget::Box(id);
        canvas.handle_pointer_event(down(310.0, 310.0, target), now);
        canvas.handle_pointer_event(moved(360.0, 330.0, target), now);
        canvas.handle_pointer_event(up(360.0, 330.0, target), now);

        let b = canvas.board().get(id).unwrap();
        assert_eq!((b.left, b.top), (350.0, 320.0));
        assert_eq!(canvas.board().len(), 1);
        assert_eq!(canvas.board().current(), Some(id));
        assert!(canvas.board().guides().is_empty());
    }

    #[test]
    fn test_pen_click_stamps_box_centered_on_pointer() {
        let mut canvas = Canvas::default();
        canvas.switch_tool(ToolKind::Pen);
        click(&mut canvas, 300.0, 300.0, Instant::now());

        assert_eq!(canvas.board().len(), 1);
        let b = &canvas.board().boxes()[0];
        assert_eq!((b.left, b.top, b.width, b.height), (250.0, 250.0, 100.0, 100.0));
        assert_eq!(b.background[0].image, canvas.editor().pen_image());
        assert_eq!(canvas.tool(), ToolKind::Pointer);
    }

    #[test]
    fn test_pen_without_image_refuses_to_stamp() {
        let mut canvas = Canvas::default();
        canvas.editor_mut().pen_image_type = crate::editor::PenImageType::Radial;
        canvas.editor_mut().radial_gradient.shape = String::new();
        canvas.switch_tool(ToolKind::Pen);
        click(&mut canvas, 300.0, 300.0, Instant::now());
        assert!(canvas.board().is_empty());
    }

    #[test]
    fn test_digit_keys_switch_tool_and_clear_selection() {
        let mut canvas = Canvas::default();
        let mut clipboard = MemoryClipboard::new();
        let a = place(&mut canvas, 10.0, 10.0, 20.0, 20.0);
        canvas.board_mut().select_only(a);

        let outcome = canvas.handle_key(&KeyInput::plain(Key::Character("3".into())), &mut clipboard);
        assert!(outcome.prevent_default);
        assert_eq!(canvas.tool(), ToolKind::Div);
        assert!(canvas.board().selected_ids().is_empty());
        assert_eq!(canvas.switch_tool_index(7), Err(EditorError::UnknownTool(7)));
    }

    #[test]
    fn test_backspace_deletes_selected_under_pointer_only() {
        let mut canvas = Canvas::default();
        let mut clipboard = MemoryClipboard::new();
        let backspace = KeyInput::plain(Key::Backspace);
        place(&mut canvas, 0.0, 0.0, 10.0, 10.0);
        let before = canvas.board().len();

        let id = place(&mut canvas, 100.0, 100.0, 10.0, 10.0);
        canvas.board_mut().select_only(id);
        assert!(canvas.handle_key(&backspace, &mut clipboard).prevent_default);
        assert_eq!(canvas.board().len(), before);

        let id = place(&mut canvas, 100.0, 100.0, 10.0, 10.0);
        canvas.switch_tool(ToolKind::Pen);
        canvas.board_mut().select_only(id);
        assert!(canvas.handle_key(&backspace, &mut clipboard).prevent_default);
        assert_eq!(canvas.board().len(), before + 1);
    }

    #[test]
    fn test_paste_honors_payload_and_stays_on_canvas() {
        let mut canvas = Canvas::default();
        let mut clipboard = MemoryClipboard::new();
        clipboard
            .write_text(
                r#"{"left":900,"top":900,"width":50,"height":50,
                "background":[{"image":"red","x":0,"y":0,"w":50,"h":50}],
                "selected":true,"isResizable":false}"#,
            )
            .unwrap();

        let outcome = canvas.handle_key(&KeyInput::ctrl(Key::Character("v".into())), &mut clipboard);
        assert_eq!(outcome.action, Some(ShortcutAction::Paste));
        assert_eq!(canvas.board().len(), 1);
        let b = &canvas.board().boxes()[0];
        assert_eq!((b.width, b.height), (50.0, 50.0));
        assert!(!b.is_resizable);
        assert!(!b.selected);
        assert_eq!(b.background[0].image.as_deref(), Some("red"));
        assert!(b.left >= 0.0 && b.top >= 0.0);
    }

    #[test]
    fn test_paste_size_only_descriptor() {
        let mut canvas = Canvas::default();
        let mut clipboard = MemoryClipboard::new();
        clipboard
            .write_text(
                r#"{"width":50,"height":50,
                "background":[{"image":"red","x":0,"y":0,"w":50,"h":50}],
                "isResizable":false}"#,
            )
            .unwrap();

        let outcome = canvas.handle_key(&KeyInput::ctrl(Key::Character("v".into())), &mut clipboard);
        assert!(outcome.prevent_default);
        assert_eq!(canvas.board().len(), 1);
        let b = &canvas.board().boxes()[0];
        assert_eq!((b.width, b.height), (50.0, 50.0));
        assert!(!b.is_resizable);
        assert_eq!(b.background.len(), 1);
        assert_eq!(b.background[0].image.as_deref(), Some("red"));
        assert!(b.left >= 0.0 && b.top >= 0.0);

        let id = canvas.paste_text(r#"{"width":20,"height":30}"#).unwrap();
        let b = canvas.board().get(id).unwrap();
        assert_eq!(b.background[0].w, 20.0);
        assert!(b.is_resizable);
    }

    #[test]
    fn test_copy_then_paste_duplicates_current() {
        let mut canvas = Canvas::default();
        let mut clipboard = MemoryClipboard::new();
        let id = place(&mut canvas, 10.0, 10.0, 40.0, 30.0);

        canvas.handle_key(&KeyInput::ctrl(Key::Character("c".into())), &mut clipboard);
        assert!(clipboard.text().is_none());

        canvas.board_mut().set_current(Some(id));
        canvas.handle_key(&KeyInput::ctrl(Key::Character("c".into())), &mut clipboard);
        assert!(clipboard.text().unwrap().contains("\"isResizable\":true"));

        canvas.handle_key(&KeyInput::ctrl(Key::Character("v".into())), &mut clipboard);
        assert_eq!(canvas.board().len(), 2);
        let copy = &canvas.board().boxes()[1];
        assert_eq!((copy.width, copy.height), (40.0, 30.0));
        assert_ne!(copy.id(), id);
    }

    #[test]
    fn test_malformed_paste_is_reported_not_applied() {
        let mut canvas = Canvas::default();
        let mut clipboard = MemoryClipboard::new();
        clipboard.write_text("hello").unwrap();

        assert!(matches!(canvas.paste(&mut clipboard), Err(ClipboardError::Malformed(_))));
        let outcome = canvas.handle_key(&KeyInput::ctrl(Key::Character("v".into())), &mut clipboard);
        assert!(outcome.prevent_default);
        assert!(canvas.board().is_empty());
    }

    #[test]
    fn test_plain_c_and_v_are_not_handled() {
        let mut canvas = Canvas::default();
        let mut clipboard = MemoryClipboard::new();
        let outcome = canvas.handle_key(&KeyInput::plain(Key::Character("c".into())), &mut clipboard);
        assert_eq!(outcome, ShortcutOutcome::ignored());
        let outcome = canvas.handle_key(&KeyInput::plain(Key::Character("v".into())), &mut clipboard);
        assert!(!outcome.prevent_default);
    }

    #[test]
    fn test_arrows_nudge_current_by_step() {
        let mut canvas = Canvas::default();
        let mut clipboard = MemoryClipboard::new();
        let id = place(&mut canvas, 10.0, 10.0, 20.0, 20.0);
        canvas.board_mut().set_current(Some(id));

        let outcome = canvas.handle_key(&KeyInput::plain(Key::ArrowRight), &mut clipboard);
        assert_eq!(outcome.action, Some(ShortcutAction::Nudge(Direction::Right)));
        canvas.handle_key(&KeyInput::plain(Key::ArrowUp), &mut clipboard);
        let b = canvas.board().get(id).unwrap();
        assert_eq!((b.left, b.top), (12.0, 8.0));
    }

    #[test]
    fn test_keys_ignored_outside_body_focus() {
        let mut canvas = Canvas::default();
        let mut clipboard = MemoryClipboard::new();
        let mut input = KeyInput::plain(Key::Character("2".into()));
        input.focus_on_body = false;
        assert!(!canvas.handle_key(&input, &mut clipboard).prevent_default);
        assert_eq!(canvas.tool(), ToolKind::Pointer);
    }
}
