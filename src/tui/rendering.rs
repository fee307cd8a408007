use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Scrollbar,
        ScrollbarOrientation, Wrap,
    },
    Frame,
};

use crate::workflow::{Phase, Progress};
use super::app::App;
use super::models::{ItemStatus, SetupField};

const TITLE: &str = "Folder Name Translator";

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    if app.show_setup {
        render_setup_screen(f, size, app);
    } else {
        render_main_screen(f, size, app);
    }

    if app.show_failures {
        render_failures_popup(f, app);
    }

    if app.show_confirm {
        render_confirm_popup(f, app);
    }

    if app.show_help {
        render_help_popup(f, app);
    }
}

/// Drawn from the controller's progress callback while a batch is running.
pub fn render_busy(f: &mut Frame, progress: &Progress) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1), Constraint::Length(3)])
        .split(f.area());

    let verb = match progress.phase {
        Phase::Translating => "Translating",
        Phase::Renaming => "Renaming",
    };

    render_title(f, chunks[0], &format!("{} - {}...", TITLE, verb));

    let current = Paragraph::new(Text::from(vec![
        Line::from(""),
        Line::from(format!("{}: {}", verb, progress.current)),
    ]))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(current, chunks[1]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress.fraction().clamp(0.0, 1.0))
        .label(format!("{}/{}", progress.done, progress.total));
    f.render_widget(gauge, chunks[2]);
}

fn render_title(f: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(title.to_string())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White))
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

pub fn render_setup_screen(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    render_title(f, chunks[0], &format!("{} - Setup", TITLE));

    let masked = app.masked_api_key();
    let fields = [
        (SetupField::Folder, "Folder", app.folder_input.as_str()),
        (SetupField::ApiKey, "DeepL API Key", masked.as_str()),
        (SetupField::TargetLang, "Target Language", app.lang_input.as_str()),
    ];

    for (i, (field, label, value)) in fields.iter().enumerate() {
        let active = app.setup_field == *field;
        let border = if active { Color::Yellow } else { Color::Gray };
        let text = if active {
            format!("{}_", value)
        } else {
            value.to_string()
        };

        let input = Paragraph::new(text)
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .title(*label)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
        f.render_widget(input, chunks[i + 1]);
    }

    let info = match &app.status_message {
        Some(msg) => Paragraph::new(msg.clone()).style(Style::default().fg(Color::Red)),
        None => Paragraph::new(Text::from(vec![
            Line::from("Names of the folder's immediate children are translated and shown for review."),
            Line::from("Nothing is renamed until you confirm."),
        ]))
        .style(Style::default().fg(Color::Gray)),
    };
    f.render_widget(info.wrap(Wrap { trim: true }), chunks[4]);

    let hint = if app.setup_ready() {
        "Tab/Up/Down switch field, ENTER to preview, Esc to quit"
    } else {
        "Tab/Up/Down switch field, Esc to quit"
    };
    let controls = Paragraph::new(hint)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    f.render_widget(controls, chunks[5]);
}

pub fn render_main_screen(f: &mut Frame, area: Rect, app: &App) {
    let chunks = if app.show_preview {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)].as_ref())
            .split(area)
    };

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(chunks[0]);

    render_header(f, left_chunks[0], app);
    render_file_list(f, left_chunks[1], app);
    render_status_bar(f, left_chunks[2], app);

    if app.show_preview && chunks.len() > 1 {
        render_preview_panel(f, chunks[1], app);
    }
}

pub fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = if app.finished {
        format!("{} - Completed!", TITLE)
    } else {
        let folder = app
            .preview
            .as_ref()
            .map(|p| p.folder().display().to_string())
            .unwrap_or_default();
        format!("{} - {}", TITLE, folder)
    };

    render_title(f, area, &title);
}

fn status_badge(status: &ItemStatus) -> (&'static str, Color) {
    match status {
        ItemStatus::Pending => ("[PENDING]", Color::Yellow),
        ItemStatus::Unchanged => ("[UNCHANGED]", Color::Gray),
        ItemStatus::Renamed => ("[RENAMED]", Color::Green),
        ItemStatus::Failed => ("[FAILED]", Color::Red),
    }
}

pub fn render_file_list(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .files
        .iter()
        .map(|file| {
            let (icon, color) = status_badge(&file.status);
            let target = file.translated_name.as_deref().unwrap_or("?");

            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", icon), Style::default().fg(color)),
                Span::styled(file.original_name.clone(), Style::default().fg(Color::White)),
                Span::styled(" -> ", Style::default().fg(Color::Gray)),
                Span::styled(target.to_string(), Style::default().fg(Color::Cyan)),
            ]))
        })
        .collect();

    let files_list = List::new(items)
        .block(
            Block::default()
                .title(format!("Preview ({} items)", app.files.len()))
                .borders(Borders::ALL)
                .style(Style::default().fg(Color::White))
                .border_style(Style::default().fg(Color::Blue)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(files_list, area, &mut app.list_state.clone());

    if app.files.len() > area.height.saturating_sub(2) as usize {
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));

        f.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut app.scroll_state.clone(),
        );
    }
}

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(area);

    let (label, ratio) = if let Some(status_msg) = &app.status_message {
        (status_msg.clone(), if app.finished { 1.0 } else { 0.0 })
    } else if app.finished {
        (
            format!(
                "Complete! {} renamed, {} unchanged, {} failed",
                app.stats.renamed, app.stats.unchanged, app.stats.failed
            ),
            1.0,
        )
    } else {
        (format!("Ready to rename {} items", app.stats.total - app.stats.failed), 0.0)
    };

    let style = if app.stats.failed > 0 {
        Style::default().fg(Color::Red)
    } else if app.status_message.is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Green)
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .gauge_style(style)
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, chunks[0]);

    let controls_text = if app.finished {
        "s: new folder, f: failures, h: help, q: quit"
    } else {
        "r: rename, p: re-run, s: setup, h: help, q: quit"
    };

    let controls = Paragraph::new(controls_text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    f.render_widget(controls, chunks[1]);
}

pub fn render_preview_panel(f: &mut Frame, area: Rect, app: &App) {
    let Some(file) = app.selected_file() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let original = Paragraph::new(Text::from(vec![
        Line::from("Original:"),
        Line::from(Span::styled(
            file.original_name.clone(),
            Style::default().fg(Color::Red),
        )),
    ]))
    .block(
        Block::default()
            .title("Before")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(original, chunks[0]);

    let new_style = match file.status {
        ItemStatus::Renamed => Style::default().fg(Color::Green),
        ItemStatus::Failed => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Yellow),
    };

    let mut new_lines = vec![
        Line::from("New:"),
        Line::from(Span::styled(
            file.translated_name.clone().unwrap_or_else(|| "(no translation)".to_string()),
            new_style,
        )),
    ];

    if let Some(error) = &file.error_message {
        new_lines.push(Line::from(""));
        new_lines.push(Line::from(Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        )));
    }

    let new = Paragraph::new(Text::from(new_lines))
        .block(
            Block::default()
                .title("After")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(new, chunks[1]);
}

pub fn render_confirm_popup(f: &mut Frame, app: &App) {
    let popup_area = centered_rect(50, 25, f.area());
    let count = app.preview.as_ref().map(|p| p.len()).unwrap_or(0);

    let text = vec![
        Line::from(""),
        Line::from(format!("Rename {} item(s) in the selected folder?", count)),
        Line::from("Renames already performed are not rolled back."),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" to confirm, "),
            Span::styled("n", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" to cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title("Confirm")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

pub fn render_failures_popup(f: &mut Frame, app: &App) {
    let popup_area = centered_rect(70, 60, f.area());

    let items: Vec<ListItem> = if app.failures.is_empty() {
        vec![ListItem::new("No failures")]
    } else {
        app.failures
            .iter()
            .map(|failure| {
                ListItem::new(Line::from(vec![
                    Span::styled(failure.name.clone(), Style::default().fg(Color::White)),
                    Span::raw(": "),
                    Span::styled(failure.error.to_string(), Style::default().fg(Color::Red)),
                ]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title(format!("Failures ({}) - f to close", app.failures.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );

    f.render_widget(Clear, popup_area);
    f.render_widget(list, popup_area);
}

pub fn render_help_popup(f: &mut Frame, _app: &App) {
    let popup_area = centered_rect(60, 50, f.area());

    let help_text = vec![
        Line::from(vec![
            Span::styled(format!("{} - Help", TITLE), Style::default().add_modifier(Modifier::BOLD))
        ]),
        Line::from(""),
        Line::from("Navigation:"),
        Line::from("  Up/k    - Move up"),
        Line::from("  Down/j  - Move down"),
        Line::from(""),
        Line::from("Actions:"),
        Line::from("  Enter   - Run preview (setup screen)"),
        Line::from("  p       - Re-run the preview"),
        Line::from("  r       - Rename (asks for confirmation)"),
        Line::from("  f       - Show per-item failures"),
        Line::from("  s       - Back to setup / pick another folder"),
        Line::from("  v       - Toggle before/after panel"),
        Line::from("  h       - Toggle this help"),
        Line::from("  q/Esc   - Quit application"),
        Line::from(""),
        Line::from("Only immediate children are translated."),
        Line::from("Failed items never block the rest of the batch."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press Esc or h to close", Style::default().fg(Color::Gray))
        ]),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup_area);
    f.render_widget(paragraph, popup_area);
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(50, 50, area);

        assert_eq!(popup.width, 50);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 25);
        assert_eq!(popup.y, 10);
    }
}
