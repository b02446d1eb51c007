pub mod detail_view;
pub mod status_row;
pub mod task_table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Clear};

use crate::tui::app::{App, Layout as AppLayout};
use crate::tui::event::Pointer;

/// Buffers reused across frames for per-frame projections of the task list.
///
/// Every pass starts by clearing it, so nothing drawn in one frame can leak
/// into the next while the allocations are kept.
#[derive(Debug, Default)]
pub struct RenderScratch {
    /// `[title, tags]` cells for the visible table rows, already truncated
    pub(crate) rows: Vec<[String; 2]>,
}

impl RenderScratch {
    pub fn begin(&mut self) {
        self.rows.clear();
    }
}

/// Main render function: clears the whole frame and draws the current layout
pub fn render(frame: &mut Frame, app: &mut App, scratch: &mut RenderScratch) {
    scratch.begin();
    let area = frame.area();

    frame.render_widget(Clear, area);
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: content | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let details_open = app.layout == AppLayout::TaskDetails && app.active.is_some();

    // The table under an open overlay does not react to the pointer
    task_table::render_task_table(frame, app, scratch, chunks[0], !details_open);
    if details_open {
        detail_view::render_detail_overlay(frame, app, chunks[0]);
    }

    status_row::render_status_row(frame, app, chunks[1]);
}

/// Take the frame's pointer if it lies inside `area`
pub(super) fn claim_pointer(app: &mut App, area: Rect) -> Option<Pointer> {
    let pointer = app.pointer?;
    let inside = pointer.column >= area.x
        && pointer.column < area.right()
        && pointer.row >= area.y
        && pointer.row < area.bottom();
    if inside {
        app.pointer = None;
        Some(pointer)
    } else {
        None
    }
}

/// Create a centered rectangle of the given percentage of the parent
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
