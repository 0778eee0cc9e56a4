use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Greedy word wrap into at most `max_lines` rows. The last row is
/// ellipsized when text is left over; a word wider than a row is cut.
pub fn wrap_words(text: &str, width: u16, max_lines: usize) -> Vec<String> {
    let width = width as usize;
    if width == 0 || max_lines == 0 {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        let rest = lines.split_off(max_lines - 1).join(" ");
        lines.push(ellipsize(&rest, width));
    }
    lines.iter().map(|line| truncate(line, width)).collect()
}

/// Cut `text` to `width` columns without marking the cut.
pub fn truncate(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Cut `text` to `width` columns, ending in `…` when anything was dropped.
pub fn ellipsize(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = truncate(text, width - 1);
    out.push('…');
    out
}
