use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::{RenderScratch, claim_pointer};

/// Share of the row given to the title column
const TITLE_PERCENT: usize = 70;

/// First task row shown when `visible` rows fit: keeps the selection on
/// screen, pinned to the bottom edge once it scrolls past it.
pub fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return 0;
    }
    selected.saturating_sub(visible - 1)
}

/// Render the two-column task table (title, tags).
///
/// With `interactive` set, the row under the pointer claims it and is drawn
/// with the hover background.
pub fn render_task_table(
    frame: &mut Frame,
    app: &mut App,
    scratch: &mut RenderScratch,
    area: Rect,
    interactive: bool,
) {
    let bg = app.theme.background;

    if app.tasks.is_empty() {
        let empty = Paragraph::new(" No tasks. Press n to create one.")
            .style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    let body = Rect {
        y: area.y.saturating_add(1),
        height: area.height.saturating_sub(1),
        ..area
    };
    let visible = body.height as usize;
    let offset = scroll_offset(app.selected, visible);
    let end = app.tasks.len().min(offset + visible);

    let hovered = if interactive {
        claim_pointer(app, Rect { height: (end - offset) as u16, ..body })
            .map(|p| offset + (p.row - body.y) as usize)
    } else {
        None
    };

    let spacing: u16 = 1;
    let usable = area.width.saturating_sub(spacing) as usize;
    let title_width = usable * TITLE_PERCENT / 100;
    let tags_width = usable - title_width;

    for task in &app.tasks[offset..end] {
        scratch.rows.push([
            format!(" {}", truncate_to_width(&task.title, title_width.saturating_sub(1))),
            truncate_to_width(&task.tags, tags_width),
        ]);
    }

    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let rows = scratch.rows.iter().enumerate().map(|(i, [title, tags])| {
        let idx = offset + i;
        let style = if idx == app.selected {
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else if Some(idx) == hovered {
            text_style.bg(app.theme.hover_bg)
        } else {
            text_style
        };
        Row::new([
            Cell::from(title.as_str()),
            Cell::from(tags.as_str()).style(Style::default().fg(app.theme.cyan)),
        ])
        .style(style)
    });

    let header_style = Style::default()
        .fg(app.theme.dim)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let header = Row::new([Cell::from(" Title"), Cell::from("Tags")]).style(header_style);

    let table = Table::new(
        rows,
        [
            Constraint::Length(title_width as u16),
            Constraint::Length(tags_width as u16),
        ],
    )
    .header(header)
    .column_spacing(spacing)
    .style(Style::default().bg(bg));

    frame.render_widget(table, area);
}
