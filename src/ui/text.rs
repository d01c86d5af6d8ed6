//! Byte-column ↔ screen-column conversion for buffer lines.

use unicode_width::UnicodeWidthChar;

pub const TAB_WIDTH: usize = 4;

/// Cells taken by `ch` when it starts at screen column `at_col`.
pub fn char_cells(ch: char, at_col: usize) -> usize {
    if ch == '\t' {
        TAB_WIDTH - (at_col % TAB_WIDTH)
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Screen column of byte offset `byte_col` within `line`.
pub fn display_col(line: &str, byte_col: usize) -> usize {
    let mut col = 0;
    for (idx, ch) in line.char_indices() {
        if idx >= byte_col {
            break;
        }
        col += char_cells(ch, col);
    }
    col
}

/// Byte offset of the char drawn at screen column `target`. Columns past
/// the end of the line map to the line end.
pub fn byte_col_at_display(line: &str, target: usize) -> usize {
    let mut col = 0;
    for (idx, ch) in line.char_indices() {
        let cells = char_cells(ch, col);
        if col + cells > target {
            return idx;
        }
        col += cells;
    }
    line.len()
}
