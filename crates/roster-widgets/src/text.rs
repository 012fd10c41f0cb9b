//! Display-width helpers for row labels.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal columns `s` occupies.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `max_width` columns, ending with `tail` when cut.
///
/// Wide characters are never split; a tail wider than `max_width` is itself
/// cut.
///
/// ```
/// use roster_widgets::text::truncate;
///
/// assert_eq!(truncate("Delete forever", 8, "…"), "Delete …");
/// assert_eq!(truncate("日本語", 5, "…"), "日本…");
/// ```
pub fn truncate(s: &str, max_width: usize, tail: &str) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let tail_width = display_width(tail);
    if tail_width >= max_width {
        return take_width(tail, max_width);
    }
    let mut out = take_width(s, max_width - tail_width);
    out.push_str(tail);
    out
}

fn take_width(s: &str, max_width: usize) -> String {
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = c.width().unwrap_or(0);
        if width + cw > max_width {
            break;
        }
        out.push(c);
        width += cw;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_unchanged() {
        assert_eq!(truncate("Copy", 4, "…"), "Copy");
        assert_eq!(truncate("", 0, "…"), "");
    }

    #[test]
    fn cuts_with_tail() {
        assert_eq!(truncate("Paste special", 6, "…"), "Paste…");
    }

    #[test]
    fn wide_characters_are_not_split() {
        // 日 and 本 are two columns each; only one fits before the tail.
        assert_eq!(truncate("日本語", 4, "…"), "日…");
        assert_eq!(display_width("日本語"), 6);
    }

    #[test]
    fn tail_wider_than_room() {
        assert_eq!(truncate("abcdef", 2, "..."), "..");
        assert_eq!(truncate("abcdef", 0, "…"), "");
    }
}
