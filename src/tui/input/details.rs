use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, DETAILS_PAGE};
use crate::tui::event::ScrollDirection;

pub(super) fn handle_details(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('h') => app.close_details(),
        KeyCode::Char('e') => app.request_edit(),
        KeyCode::PageUp => app.scroll_details(ScrollDirection::Up, DETAILS_PAGE),
        KeyCode::PageDown => app.scroll_details(ScrollDirection::Down, DETAILS_PAGE),
        _ => {}
    }
}
