//! Translation of winit window events into core input.

use boxboard_core::{Board, Key, KeyInput, Modifiers, PointerEvent};
use kurbo::Point;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{self, ModifiersState, NamedKey};

/// Map a winit logical key onto the keys the editor understands.
pub fn key_from_winit(key: &keyboard::Key) -> Key {
    match key {
        keyboard::Key::Named(NamedKey::Backspace) => Key::Backspace,
        keyboard::Key::Named(NamedKey::ArrowUp) => Key::ArrowUp,
        keyboard::Key::Named(NamedKey::ArrowDown) => Key::ArrowDown,
        keyboard::Key::Named(NamedKey::ArrowLeft) => Key::ArrowLeft,
        keyboard::Key::Named(NamedKey::ArrowRight) => Key::ArrowRight,
        keyboard::Key::Character(c) => Key::Character(c.to_string()),
        _ => Key::Other,
    }
}

pub fn modifiers_from_winit(state: ModifiersState) -> Modifiers {
    Modifiers {
        shift: state.shift_key(),
        ctrl: state.control_key(),
        alt: state.alt_key(),
        meta: state.super_key(),
    }
}

/// Tracks the cursor and modifiers between winit events and turns button
/// and motion events into [`PointerEvent`]s.
///
/// The window has no text fields, so key presses always count as having
/// page focus.
#[derive(Debug, Clone, Default)]
pub struct EventHandler {
    cursor: Point,
    modifiers: Modifiers,
    left_pressed: bool,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_modifiers(&mut self, state: ModifiersState) {
        self.modifiers = modifiers_from_winit(state);
    }

    /// Cursor moved to a canvas position.
    pub fn cursor_moved(&mut self, position: Point, board: &Board) -> PointerEvent {
        self.cursor = position;
        PointerEvent::Move {
            position,
            target: board.target_at(position),
            modifiers: self.modifiers,
        }
    }

    /// A mouse button changed state. Only the left button drives the editor.
    pub fn mouse_input(&mut self, state: ElementState, button: MouseButton, board: &Board) -> Option<PointerEvent> {
        if button != MouseButton::Left {
            return None;
        }
        let position = self.cursor;
        let target = board.target_at(position);
        let modifiers = self.modifiers;
        match state {
            ElementState::Pressed => {
                self.left_pressed = true;
                Some(PointerEvent::Down { position, target, modifiers })
            }
            // A release without a matching press started outside the window.
            ElementState::Released if !self.left_pressed => None,
            ElementState::Released => {
                self.left_pressed = false;
                Some(PointerEvent::Up { position, target, modifiers })
            }
        }
    }

    /// A key was pressed.
    pub fn key_pressed(&self, key: &keyboard::Key) -> KeyInput {
        KeyInput {
            key: key_from_winit(key),
            modifiers: self.modifiers,
            focus_on_body: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxboard_core::{DivBoxOptions, Editor, PointerTarget};
    use kurbo::Rect;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_from_winit(&keyboard::Key::Named(NamedKey::Backspace)), Key::Backspace);
        assert_eq!(key_from_winit(&keyboard::Key::Named(NamedKey::ArrowLeft)), Key::ArrowLeft);
        assert_eq!(
            key_from_winit(&keyboard::Key::Character("c".into())),
            Key::Character("c".to_string())
        );
        assert_eq!(key_from_winit(&keyboard::Key::Named(NamedKey::Escape)), Key::Other);
    }

    #[test]
    fn test_modifiers_mapping() {
        let modifiers = modifiers_from_winit(ModifiersState::CONTROL | ModifiersState::SHIFT);
        assert!(modifiers.ctrl);
        assert!(modifiers.shift);
        assert!(!modifiers.alt);
        assert!(!modifiers.meta);
    }

    #[test]
    fn test_press_and_release_use_last_cursor() {
        let mut board = Board::default();
        let mut editor = Editor::new();
        let id = board.draw_div_box(DivBoxOptions::from_rect(Rect::new(0.0, 0.0, 50.0, 50.0)), &mut editor);
        let mut handler = EventHandler::new();

        handler.cursor_moved(Point::new(20.0, 20.0), &board);
        let down = handler.mouse_input(ElementState::Pressed, MouseButton::Left, &board);
        assert_eq!(
            down,
            Some(PointerEvent::Down {
                position: Point::new(20.0, 20.0),
                target: PointerTarget::Box(id),
                modifiers: Modifiers::default(),
            })
        );

        handler.cursor_moved(Point::new(300.0, 300.0), &board);
        let up = handler.mouse_input(ElementState::Released, MouseButton::Left, &board);
        assert!(matches!(up, Some(PointerEvent::Up { target: PointerTarget::Canvas, .. })));
    }

    #[test]
    fn test_ignores_other_buttons_and_stray_release() {
        let board = Board::default();
        let mut handler = EventHandler::new();
        assert!(handler.mouse_input(ElementState::Pressed, MouseButton::Right, &board).is_none());
        assert!(handler.mouse_input(ElementState::Released, MouseButton::Left, &board).is_none());
    }

    #[test]
    fn test_key_pressed_carries_modifiers() {
        let mut handler = EventHandler::new();
        handler.set_modifiers(ModifiersState::CONTROL);
        let input = handler.key_pressed(&keyboard::Key::Character("v".into()));
        assert!(input.modifiers.ctrl);
        assert!(input.focus_on_body);
    }
}
