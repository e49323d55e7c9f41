use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::gesture::GestureInterpreter;
use crate::game::{Command, Vector};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Game(Command),
    Quit,
    None,
}

/// Turns terminal events into [`InputAction`]s
///
/// A left-button press and release form a drag. Terminal rows are about twice
/// as tall as columns are wide, so rows count double when measuring it.
pub struct InputHandler {
    swipe_distance: f64,
    drag_start: Option<Vector>,
}

impl InputHandler {
    pub fn new(swipe_distance: f64) -> Self {
        Self {
            swipe_distance,
            drag_start: None,
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> InputAction {
        match event {
            Event::Key(key) => self.handle_key_event(*key),
            Event::Mouse(mouse) => self.handle_mouse_event(*mouse),
            _ => InputAction::None,
        }
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> InputAction {
        // Only process key press events, not release
        if key.kind == KeyEventKind::Release {
            return InputAction::None;
        }

        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,
            code => GestureInterpreter::from_key(code, key.modifiers)
                .map_or(InputAction::None, InputAction::Game),
        }
    }

    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) -> InputAction {
        let position = Vector::new(i32::from(mouse.column), i32::from(mouse.row) * 2);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_start = Some(position);
                InputAction::None
            }
            MouseEventKind::Up(MouseButton::Left) => match self.drag_start.take() {
                Some(start) => InputAction::Game(GestureInterpreter::from_drag(
                    start,
                    position,
                    self.swipe_distance,
                )),
                None => InputAction::None,
            },
            MouseEventKind::Down(MouseButton::Right) => {
                InputAction::Game(GestureInterpreter::from_tap())
            }
            _ => InputAction::None,
        }
    }
}
