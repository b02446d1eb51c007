use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::tui::app::App;

use super::{centered_rect, claim_pointer};

/// Render the active task in a panel above the task table: centered title and
/// tags, then the details in a bordered block scrolled by `details_scroll`.
pub fn render_detail_overlay(frame: &mut Frame, app: &mut App, area: Rect) {
    if app.active.is_none() {
        return;
    }

    let overlay_area = centered_rect(80, 80, area);
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.overlay_bg;
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .style(Style::default().bg(bg));
    let inner = outer.inner(overlay_area);
    frame.render_widget(outer, overlay_area);

    // Layout: title | tags | gap | details
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(inner);

    let details_hovered = claim_pointer(app, chunks[3]).is_some();

    let Some(task) = app.active.as_ref() else {
        return;
    };

    let title = Paragraph::new(task.title.as_str())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(title, chunks[0]);

    let tags = if task.tags.is_empty() {
        Paragraph::new("no tags").style(Style::default().fg(app.theme.dim).bg(bg))
    } else {
        Paragraph::new(task.tags.as_str()).style(Style::default().fg(app.theme.cyan).bg(bg))
    };
    frame.render_widget(tags.alignment(Alignment::Center), chunks[1]);

    let border_color = if details_hovered {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let details_block = Block::default()
        .borders(Borders::ALL)
        .title(" Details ")
        .border_style(Style::default().fg(border_color).bg(bg));
    let details = Paragraph::new(task.details.as_str())
        .block(details_block)
        .wrap(Wrap { trim: false })
        .scroll((app.details_scroll, 0))
        .style(Style::default().fg(app.theme.text).bg(bg));
    frame.render_widget(details, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::event::Pointer;
    use crate::tui::test_helpers::{TERM_H, TERM_W, app_with_files, render_to_string};

    fn draw(app: &mut App) -> String {
        render_to_string(TERM_W, TERM_H, |frame, area| {
            render_detail_overlay(frame, app, area)
        })
    }

    #[test]
    fn shows_title_tags_and_details() {
        let (_tmp, mut app) =
            app_with_files(&[("1.todo", "Renew passport\ntravel admin\n\nphotos\nform B\n")]);
        app.open_selected();
        let output = draw(&mut app);

        assert!(output.contains("Renew passport"));
        assert!(output.contains("travel admin"));
        assert!(output.contains("Details"));
        assert!(output.contains("photos"));
        assert!(output.contains("form B"));
    }

    #[test]
    fn title_is_centered() {
        let (_tmp, mut app) = app_with_files(&[("1.todo", "Mid\n")]);
        app.open_selected();
        let output = draw(&mut app);
        let title_line = output.lines().find(|l| l.contains("Mid")).unwrap();
        let col = title_line.find("Mid").unwrap();
        // Centered within an 80-column screen, give or take the border
        assert!((36..=41).contains(&col), "title at column {col}");
    }

    #[test]
    fn missing_tags_placeholder() {
        let (_tmp, mut app) = app_with_files(&[("1.todo", "Alone\n")]);
        app.open_selected();
        assert!(draw(&mut app).contains("no tags"));
    }

    #[test]
    fn scroll_hides_leading_lines() {
        let (_tmp, mut app) =
            app_with_files(&[("1.todo", "T\n\n\nfirst line\nsecond line\nthird line\n")]);
        app.open_selected();
        app.details_scroll = 1;
        let output = draw(&mut app);
        assert!(!output.contains("first line"));
        assert!(output.contains("second line"));
    }

    #[test]
    fn details_block_claims_the_pointer() {
        let (_tmp, mut app) = app_with_files(&[("1.todo", "T\n\n\nbody\n")]);
        app.open_selected();
        app.pointer = Some(Pointer {
            column: TERM_W / 2,
            row: TERM_H / 2,
        });
        draw(&mut app);
        assert!(app.pointer.is_none());
    }

    #[test]
    fn nothing_drawn_without_active_task() {
        let (_tmp, mut app) = app_with_files(&[("1.todo", "T\n")]);
        assert_eq!(draw(&mut app), "");
    }
}
