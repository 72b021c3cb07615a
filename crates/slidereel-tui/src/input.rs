use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    NextSlide,
    PrevSlide,
    FirstSlide,
    LastSlide,
    /// Digit key: zero-based active slide position
    JumpTo(usize),
    ToggleRtl,
    CycleReplay,
    HideSlide,
    ShowAll,
    ToggleAutoplay,
    Reload,
    PendingG, // first 'g' of "gg"
    None,
}

/// Pointer activity relevant to the carousel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    Press { column: u16, row: u16 },
    Drag { column: u16, row: u16 },
    Release,
    Move { column: u16, row: u16 },
    None,
}

/// Map a key press to an action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    let binding = KeyBinding::new(key.code, key.modifiers);

    if app.pending_key == Some('g') && keymap.is_g_prefix(&binding) {
        return keymap.double_g_action().copied().unwrap_or(Action::None);
    }

    if let Some(action) = keymap.get(&binding) {
        return *action;
    }

    if keymap.is_g_prefix(&binding) {
        return Action::PendingG;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::JumpTo(c as usize - '1' as usize)
        }
        _ => Action::None,
    }
}

pub fn handle_mouse_event(mouse: MouseEvent) -> PointerAction {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerAction::Press { column, row },
        MouseEventKind::Drag(MouseButton::Left) => PointerAction::Drag { column, row },
        MouseEventKind::Up(MouseButton::Left) => PointerAction::Release,
        MouseEventKind::Moved => PointerAction::Move { column, row },
        _ => PointerAction::None,
    }
}
