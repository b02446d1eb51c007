mod details;
mod list;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Layout};

use details::handle_details;
use list::handle_list;

/// Handle a key press in the current layout
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    // Any key dismisses the status message
    app.status = None;

    if is_quit(key) {
        app.should_quit = true;
        return;
    }

    // Ctrl and Alt chords are not bound outside the quit key
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return;
    }

    match app.layout {
        Layout::TaskList => handle_list(app, key),
        Layout::TaskDetails => handle_details(app, key),
    }
}

/// `q` or Ctrl+C, in either layout
fn is_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => !key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
