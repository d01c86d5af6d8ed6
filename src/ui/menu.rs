use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Heading,
    Item(Command),
    Gap,
}

/// One run of text in the menu bar, starting at column `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSegment {
    pub text: String,
    pub x: u16,
    pub kind: SegmentKind,
}

/// The menu bar, laid out left to right.
pub fn menu_segments() -> Vec<MenuSegment> {
    let groups: [(&str, &[Command]); 2] = [
        ("File", &Command::FILE_MENU),
        ("Edit", &Command::EDIT_MENU),
    ];
    let mut segments = Vec::new();
    let mut x: u16 = 0;
    let mut push = |text: String, kind: SegmentKind| {
        let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
        segments.push(MenuSegment { text, x, kind });
        x = x.saturating_add(width);
    };

    for (group_idx, (heading, commands)) in groups.iter().enumerate() {
        push(
            if group_idx == 0 { " " } else { " │ " }.to_string(),
            SegmentKind::Gap,
        );
        push(format!("{heading}:"), SegmentKind::Heading);
        for command in *commands {
            push(" ".to_string(), SegmentKind::Gap);
            push(
                format!("{} {}", command.label(), command.shortcut()),
                SegmentKind::Item(*command),
            );
        }
    }
    push("   F1 Help".to_string(), SegmentKind::Gap);
    segments
}

/// The command whose menu item covers column `col`, if any.
pub fn command_at_column(col: u16) -> Option<Command> {
    menu_segments().into_iter().find_map(|segment| {
        let SegmentKind::Item(command) = segment.kind else {
            return None;
        };
        let width = u16::try_from(segment.text.width()).unwrap_or(u16::MAX);
        (col >= segment.x && col < segment.x.saturating_add(width)).then_some(command)
    })
}

pub fn render_menu_bar(frame: &mut Frame, area: Rect) {
    let base = Style::default().bg(Color::Blue).fg(Color::White);
    let spans: Vec<Span> = menu_segments()
        .into_iter()
        .map(|segment| match segment.kind {
            SegmentKind::Heading => Span::styled(segment.text, base.add_modifier(Modifier::BOLD)),
            SegmentKind::Item(_) => Span::styled(segment.text, base.fg(Color::Yellow)),
            SegmentKind::Gap => Span::styled(segment.text, base),
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_is_in_the_menu() {
        let items: Vec<Command> = menu_segments()
            .into_iter()
            .filter_map(|s| match s.kind {
                SegmentKind::Item(c) => Some(c),
                _ => None,
            })
            .collect();
        assert_eq!(items, Command::ALL.to_vec());
    }

    #[test]
    fn test_command_at_column_hits_each_item() {
        for segment in menu_segments() {
            if let SegmentKind::Item(command) = segment.kind {
                assert_eq!(command_at_column(segment.x), Some(command));
            }
        }
    }

    #[test]
    fn test_heading_is_not_clickable() {
        let heading = menu_segments()
            .into_iter()
            .find(|s| s.kind == SegmentKind::Heading)
            .unwrap();
        assert_eq!(command_at_column(heading.x), None);
        assert_eq!(command_at_column(0), None);
    }
}
