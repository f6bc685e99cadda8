use ratatui::layout::Rect;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Display width of the first `upto` chars, used to place the terminal cursor.
pub(crate) fn chars_width(chars: &[char], upto: usize) -> usize {
    chars[..upto.min(chars.len())]
        .iter()
        .map(|c| UnicodeWidthChar::width(*c).unwrap_or(0))
        .sum()
}

/// Truncate a string to fit within `width` display columns, adding ".." if truncated.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return take_width(s, width).to_string();
    }
    format!("{}..", take_width(s, width - 2))
}

/// Pad or truncate a string to exactly `width` display columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let s = truncate_display(s, width);
    let sw = display_width(&s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(sw)))
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

// Longest prefix of `s` that fits in `budget` columns, cut on a char boundary.
fn take_width(s: &str, budget: usize) -> &str {
    let mut used = 0;
    for (i, ch) in s.char_indices() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            return &s[..i];
        }
        used += cw;
    }
    s
}
