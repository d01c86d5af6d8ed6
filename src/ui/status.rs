use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};
use crate::ui::text::display_col;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let buffer = model.session.buffer();
    let cursor = buffer.cursor();
    let line = buffer.line_at(cursor.line).unwrap_or_default();
    let position = format!(
        "Ln {}, Col {}",
        cursor.line + 1,
        display_col(&line, cursor.col) + 1
    );
    let selection = buffer
        .selected_text()
        .map(|text| format!("  [{} selected]", text.chars().count()))
        .unwrap_or_default();

    let status = format!(
        " {}  {}{}  F1:help",
        model.session.title(),
        position,
        selection
    );
    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
