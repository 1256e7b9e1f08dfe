//! Keyboard input dispatch: global keys, then form editing.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::AppState;

/// Longest text accepted in a single field.
const MAX_FIELD_LEN: usize = 16;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Global keys.
    match key.code {
        KeyCode::Esc => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Enter => {
            app.submit_requested = true;
            return;
        }
        _ => {}
    }

    // 2. Focus movement.
    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.form.focus = app.form.focus.prev();
            } else {
                app.form.focus = app.form.focus.next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form.focus = app.form.focus.prev();
        }

        // 3. Editing the focused field.
        KeyCode::Backspace => {
            app.form.focused_mut().pop();
        }
        KeyCode::Char(c) if !c.is_control() => {
            let field = app.form.focused_mut();
            if field.chars().count() < MAX_FIELD_LEN {
                field.push(c);
            }
        }
        _ => {}
    }
}
