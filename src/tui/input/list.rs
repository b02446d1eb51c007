use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_list(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter | KeyCode::Char('l') => app.open_selected(),
        KeyCode::Char('c') => app.complete_selected(),
        KeyCode::Char('n') => app.request_create(),
        _ => {}
    }
}
