use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;
use crate::editor::Cursor;

use super::menu::render_menu_bar;
use super::text::{char_cells, display_col};
use super::{overlays, status};

fn selection_style() -> Style {
    Style::default().bg(Color::Blue).fg(Color::White)
}

/// Split the screen into menu bar, editor pane, and status bar.
pub fn split_screen(area: Rect) -> [Rect; 3] {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area)
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let [menu_area, editor_area, status_area] = split_screen(area);

    render_menu_bar(frame, menu_area);
    render_editor(model, frame, editor_area);
    if model.active_toast().is_some() {
        status::render_toast_bar(model, frame, status_area);
    } else {
        status::render_status_bar(model, frame, status_area);
    }

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    } else if let Some(position) = cursor_screen_position(model, editor_area) {
        frame.set_cursor_position(position);
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let buffer = model.session.buffer();
    let gutter = model.gutter_width();
    let text_cols = usize::from(area.width).saturating_sub(gutter);
    let selection = buffer.selection_range();

    let start = model.scroll_offset;
    let end = (start + usize::from(area.height)).min(buffer.line_count());

    let mut content: Vec<Line> = Vec::new();
    for line_idx in start..end {
        let line_text = buffer.line_at(line_idx).unwrap_or_default();
        let line_num = format!("{:>width$} ", line_idx + 1, width = gutter - 1);
        let mut spans = vec![Span::styled(line_num, Style::default().fg(Color::DarkGray))];
        let selected = selection.and_then(|(from, to)| selected_bytes(line_idx, &line_text, from, to));
        spans.extend(visible_spans(
            &line_text,
            model.h_scroll,
            text_cols,
            selected,
        ));
        if let Some((from, to)) = selection
            && from.line <= line_idx
            && line_idx < to.line
            && display_col(&line_text, line_text.len()) >= model.h_scroll
        {
            // The line break itself is part of the selection.
            spans.push(Span::styled(" ", selection_style()));
        }
        content.push(Line::from(spans));
    }

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content), area);
}

/// Byte range of `line_text` covered by the selection `from..to`.
fn selected_bytes(
    line_idx: usize,
    line_text: &str,
    from: Cursor,
    to: Cursor,
) -> Option<(usize, usize)> {
    if line_idx < from.line || line_idx > to.line {
        return None;
    }
    let start = if line_idx == from.line { from.col } else { 0 };
    let end = if line_idx == to.line {
        to.col
    } else {
        line_text.len()
    };
    (start < end).then_some((start, end))
}

/// The slice of a line shown between display columns `h_scroll` and
/// `h_scroll + width`, with tabs expanded and the selection highlighted.
fn visible_spans(
    line_text: &str,
    h_scroll: usize,
    width: usize,
    selected: Option<(usize, usize)>,
) -> Vec<Span<'static>> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_selected = false;
    let mut col = 0;
    let limit = h_scroll + width;

    for (idx, ch) in line_text.char_indices() {
        if col >= limit {
            break;
        }
        let cells = char_cells(ch, col);
        if cells == 0 {
            // Combining marks ride on the previous char; other controls vanish.
            if !ch.is_control() && col > h_scroll {
                run.push(ch);
            }
            continue;
        }
        let next = col + cells;
        if next <= h_scroll {
            col = next;
            continue;
        }
        let in_selection = selected.is_some_and(|(a, b)| idx >= a && idx < b);
        if in_selection != run_selected && !run.is_empty() {
            spans.push(styled_run(std::mem::take(&mut run), run_selected));
        }
        run_selected = in_selection;

        // Partially scrolled-off tabs and wide chars become blanks.
        let clipped = col < h_scroll || next > limit;
        if ch == '\t' || clipped {
            let shown = next.min(limit) - col.max(h_scroll);
            run.extend(std::iter::repeat_n(' ', shown));
        } else if ch.is_control() {
            run.push(' ');
        } else {
            run.push(ch);
        }
        col = next;
    }
    if !run.is_empty() {
        spans.push(styled_run(run, run_selected));
    }
    spans
}

fn styled_run(text: String, selected: bool) -> Span<'static> {
    if selected {
        Span::styled(text, selection_style())
    } else {
        Span::raw(text)
    }
}

/// Where the terminal cursor goes, if the buffer cursor is on screen.
fn cursor_screen_position(model: &Model, area: Rect) -> Option<Position> {
    let buffer = model.session.buffer();
    let cursor = buffer.cursor();
    let row = cursor.line.checked_sub(model.scroll_offset)?;
    if row >= usize::from(area.height) {
        return None;
    }
    let line = buffer.line_at(cursor.line).unwrap_or_default();
    let col = display_col(&line, cursor.col).checked_sub(model.h_scroll)?;
    let x = model.gutter_width() + col;
    if x >= usize::from(area.width) {
        return None;
    }
    Some(Position::new(
        area.x + u16::try_from(x).ok()?,
        area.y + u16::try_from(row).ok()?,
    ))
}
