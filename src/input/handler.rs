use crate::app::AppState;
use crate::domain::View;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Translate a key press into an app command. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    // Any key clears a stale warning
    app.dismiss_message();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        handle_control_key(app, key.code);
        return app.should_quit;
    }

    match key.code {
        KeyCode::Up => app.move_selection_up(),
        KeyCode::Down => app.move_selection_down(),

        // Add, open task, or run a typed command
        KeyCode::Enter => app.submit_input(),

        // Clear the input first, then go back to the task list
        KeyCode::Esc => {
            if app.input.is_empty() {
                app.deselect_task();
            } else {
                app.input.clear();
            }
        }

        KeyCode::Backspace => app.input_backspace(),

        KeyCode::Delete if app.input.is_empty() => app.delete_selected(),

        // Space toggles the selected item unless the user is typing
        KeyCode::Char(' ') if app.input.is_empty() && matches!(app.view, View::Items(_)) => {
            app.toggle_status();
        }

        KeyCode::Char(c) => app.input_push(c),

        _ => {}
    }

    app.should_quit
}

/// Shortcuts that work while text is being typed
fn handle_control_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Char('c') => app.quit(),
        KeyCode::Char('p') => app.toggle_pause(),
        KeyCode::Char('r') => app.restart_selected(),
        KeyCode::Char('t') => app.toggle_status(),
        _ => {}
    }
}
