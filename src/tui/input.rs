//! Translation of terminal events into game commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use strictly_hanoi::{PillarId, Point};

use super::viewport::Viewport;

/// A command for the app, decoded from one terminal event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Leave the game.
    Quit,
    /// Restart the current level.
    Restart,
    /// A pillar number was typed.
    Pillar(PillarId),
    /// Left button pressed at a world point.
    Press(Point),
    /// Pointer dragged to a world point.
    Drag(Point),
    /// Left button released at a world point.
    Release(Point),
    /// Any other key.
    OtherKey,
}

/// Decodes a key event. Key releases and repeats yield `None`.
pub fn key_command(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let command = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Char(c @ '1'..='3') => {
            let slot = c as u8 - b'0';
            match PillarId::from_slot(slot) {
                Some(pillar) => Command::Pillar(pillar),
                None => Command::OtherKey,
            }
        }
        _ => Command::OtherKey,
    };
    Some(command)
}

/// Decodes a mouse event through the viewport.
///
/// Presses outside the board are dropped; drags and releases are clamped
/// to its edge so a held disk never gets stuck.
pub fn mouse_command(mouse: MouseEvent, viewport: &Viewport) -> Option<Command> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => viewport
            .to_world(mouse.column, mouse.row)
            .map(Command::Press),
        MouseEventKind::Drag(MouseButton::Left) => viewport
            .to_world_clamped(mouse.column, mouse.row)
            .map(Command::Drag),
        MouseEventKind::Up(MouseButton::Left) => viewport
            .to_world_clamped(mouse.column, mouse.row)
            .map(Command::Release),
        _ => None,
    }
}
