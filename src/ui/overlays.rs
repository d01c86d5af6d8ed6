use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::app::Model;
use crate::command::Command;
use crate::ui::dialog::{ConfirmDialog, ErrorDialog};
use crate::ui::picker::FilePicker;

fn popup_style() -> Style {
    Style::default().bg(Color::Black).fg(Color::White)
}

fn dim_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).clamp(20, 60);
    let popup_height = area.height.saturating_sub(4).clamp(8, 26);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = model
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = model
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::styled("File", section_style));
    for command in Command::FILE_MENU {
        lines.push(Line::raw(format!(
            "  {:<20}{}",
            command.shortcut(),
            command.label()
        )));
    }
    lines.push(Line::raw(""));

    lines.push(Line::styled("Edit", section_style));
    for command in Command::EDIT_MENU {
        lines.push(Line::raw(format!(
            "  {:<20}{}",
            command.shortcut(),
            command.label()
        )));
    }
    lines.push(Line::raw("  ^A                  Select all"));
    lines.push(Line::raw("  Shift+arrows        Extend selection"));
    lines.push(Line::raw("  Mouse drag          Select text"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Navigation", section_style));
    lines.push(Line::raw("  Arrows, Home/End    Move cursor"));
    lines.push(Line::raw("  Ctrl+Left/Right     Word movement"));
    lines.push(Line::raw("  Ctrl+Home/End       Buffer start / end"));
    lines.push(Line::raw("  PageUp/PageDown     Page"));
    lines.push(Line::raw("  Click menu item     Run command"));
    lines.push(Line::raw(""));

    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!("  Global: {global_cfg}")));
    lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(popup_style());
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let content_height = inner.height.saturating_sub(1);
    let content = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(lines), content);

    let footer = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    frame.render_widget(
        Paragraph::new(Line::styled("Any key closes", dim_style())),
        footer,
    );
}

pub fn render_confirm_dialog(dialog: &ConfirmDialog, frame: &mut Frame, area: Rect) {
    let message_width = u16::try_from(dialog.message.chars().count()).unwrap_or(u16::MAX);
    let popup_width = message_width.saturating_add(6).max(36);
    let popup = centered_popup_rect(popup_width, 7, area);

    let selected = dialog.selected();
    let mut buttons: Vec<Span> = Vec::new();
    for (answer, label) in ConfirmDialog::buttons() {
        let style = if answer == selected {
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Yellow)
        };
        buttons.push(Span::raw("  "));
        buttons.push(Span::styled(format!("[ {label} ]"), style));
    }

    let lines = vec![
        Line::raw(dialog.message.as_str()),
        Line::raw(""),
        Line::from(buttons).alignment(Alignment::Center),
        Line::styled("y/n/c · Tab moves · Esc cancels", dim_style())
            .alignment(Alignment::Center),
    ];

    let block = Block::default()
        .title(format!(" {} ", dialog.title))
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(popup_style());
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        popup,
    );
}

pub fn render_error_dialog(dialog: &ErrorDialog, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(8).clamp(20, 72);
    let inner_width = usize::from(popup_width.saturating_sub(4)).max(1);
    let message_rows = dialog.message.chars().count().div_ceil(inner_width).max(1);
    let popup_height = u16::try_from(message_rows + 4).unwrap_or(u16::MAX);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let lines = vec![
        Line::styled(dialog.message.as_str(), Style::default().fg(Color::LightRed)),
        Line::raw(""),
        Line::styled("Press any key", dim_style()).alignment(Alignment::Center),
    ];
    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(popup_style().fg(Color::LightRed));
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        popup,
    );
}

pub fn render_file_picker(picker: &FilePicker, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(10).clamp(30, 80);
    let popup_height = area.height.saturating_sub(4).clamp(8, 24);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let block = Block::default()
        .title(format!(" {} ", picker.title()))
        .borders(Borders::ALL)
        .style(popup_style());
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);
    if inner.height < 4 {
        return;
    }

    let dir_area = Rect::new(inner.x, inner.y, inner.width, 1);
    let list_area = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 3);
    let name_area = Rect::new(inner.x, inner.y + inner.height - 2, inner.width, 1);
    let hint_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);

    let header = picker.error.as_ref().map_or_else(
        || Line::styled(picker.dir.display().to_string(), dim_style()),
        |err| Line::styled(err.as_str(), Style::default().fg(Color::LightRed)),
    );
    frame.render_widget(Paragraph::new(header), dir_area);

    let items: Vec<ListItem> = picker
        .entries
        .iter()
        .map(|entry| {
            if entry.is_dir {
                ListItem::new(format!("{}/", entry.name)).style(Style::default().fg(Color::Cyan))
            } else {
                ListItem::new(entry.name.as_str())
            }
        })
        .collect();
    let list = List::new(items).highlight_style(
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(picker.selected));
    frame.render_stateful_widget(list, list_area, &mut state);

    let name_line = Line::from(vec![
        Span::styled("Name: ", Style::default().fg(Color::Yellow)),
        Span::raw(picker.name.as_str()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]);
    frame.render_widget(Paragraph::new(name_line), name_area);

    let filter = if picker.show_all { "all files" } else { "*.txt" };
    frame.render_widget(
        Paragraph::new(Line::styled(
            format!("Enter choose · Tab fill · ^T {filter} · Esc cancel"),
            dim_style(),
        )),
        hint_area,
    );
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
