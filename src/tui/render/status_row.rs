use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Layout};
use crate::util::unicode::{display_width, truncate_to_width};

const LIST_HINTS: &str = "j/k move  enter open  n new  c complete  q quit";
const DETAILS_HINTS: &str = "esc back  e edit  pgup/pgdn scroll  q quit";

/// Render the status row (bottom of screen): the pending message if there is
/// one, otherwise key hints for the current layout and the task count.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if let Some(status) = &app.status {
        let color = if status.is_error {
            app.theme.red
        } else {
            app.theme.text_bright
        };
        Line::from(Span::styled(
            truncate_to_width(&format!(" {}", status.text), width),
            Style::default().fg(color).bg(bg),
        ))
    } else {
        let hints = match app.layout {
            Layout::TaskList => LIST_HINTS,
            Layout::TaskDetails => DETAILS_HINTS,
        };
        let count = match app.tasks.len() {
            1 => "1 task ".to_string(),
            n => format!("{n} tasks "),
        };

        let mut spans = vec![Span::styled(
            format!(" {hints}"),
            Style::default().fg(app.theme.dim).bg(bg),
        )];
        let content_width = display_width(hints) + 1;
        let count_width = display_width(&count);
        if content_width + count_width < width {
            let padding = width - content_width - count_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(count, Style::default().fg(app.theme.text).bg(bg)));
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
