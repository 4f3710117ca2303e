#![cfg(not(coverage))]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, ModifierKeyCode};
use lesson_core::{InteractionEvent, TutorError};

use crate::tui_state::{TuiContext, TuiUiState};

const GRAB_STEP: f32 = 0.25;

/// Returns true when the TUI should exit.
pub(crate) fn handle_key(
    key: KeyEvent,
    context: &TuiContext<'_>,
    ui: &mut TuiUiState,
) -> Result<bool, TutorError> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }
    if key.code == KeyCode::Esc && ui.grabbing {
        ui.grabbing = false;
        ui.status = "grab cancelled".to_string();
        return Ok(false);
    }
    if key.code == KeyCode::Esc || key.code == KeyCode::Char('q') {
        return Ok(true);
    }

    if is_shift(&key) {
        ui.apply(context, InteractionEvent::Modifier { pressed: true });
        if !matches!(key.code, KeyCode::Char(_)) {
            return Ok(false);
        }
    }

    if ui.grabbing {
        if let Some(event) = grab_move(key.code) {
            ui.apply(context, event);
            return Ok(false);
        }
    }

    match key.code {
        KeyCode::Char('h') => ui.help_visible = !ui.help_visible,
        KeyCode::Char('r') => ui.restart(context)?,
        KeyCode::Char('s') => ui.save(context)?,
        KeyCode::Char('l') => ui.load(context)?,
        KeyCode::Char('c') | KeyCode::Char(' ') => {
            ui.apply(context, InteractionEvent::Select);
        }
        KeyCode::Char('u') => {
            ui.apply(context, InteractionEvent::Deselect);
        }
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            ui.apply(context, InteractionEvent::DeleteKey);
        }
        KeyCode::Char('g') | KeyCode::Char('G') => {
            if ui.is_holding_selection() {
                ui.grabbing = true;
                ui.status = "grab".to_string();
            } else {
                ui.status = "select the cube first".to_string();
            }
        }
        KeyCode::Enter if ui.grabbing => {
            ui.grabbing = false;
            ui.status = "placed".to_string();
        }
        KeyCode::Enter | KeyCode::Char('n') => return ui.continue_learning(context),
        _ => {}
    }

    Ok(false)
}

fn is_shift(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Modifier(ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift)
    ) || key.modifiers.contains(KeyModifiers::SHIFT)
}

fn grab_move(code: KeyCode) -> Option<InteractionEvent> {
    let (dx, dy, dz) = match code {
        KeyCode::Left => (-GRAB_STEP, 0.0, 0.0),
        KeyCode::Right => (GRAB_STEP, 0.0, 0.0),
        KeyCode::Up => (0.0, GRAB_STEP, 0.0),
        KeyCode::Down => (0.0, -GRAB_STEP, 0.0),
        KeyCode::PageUp => (0.0, 0.0, GRAB_STEP),
        KeyCode::PageDown => (0.0, 0.0, -GRAB_STEP),
        _ => return None,
    };
    Some(InteractionEvent::Move { dx, dy, dz })
}
