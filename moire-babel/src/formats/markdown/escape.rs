//! Markdown escaping
//!
//! Text is escaped with backslashes, which CommonMark allows before any ASCII punctuation.
//! Characters that only matter at the start of a block (headings, list markers, setext
//! underlines) are escaped only there.

/// Always escaped
const SPECIAL: &[char] = &['\\', '`', '*', '_', '[', ']', '<', '>', '|', '~', '&'];

/// Escaped when they open a block
const BLOCK_START: &[char] = &['#', '+', '-', '=', '>'];

pub fn escape_markdown(text: &str, at_block_start: bool) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 10);
    let ordered_marker = if at_block_start {
        ordered_marker_dot(text)
    } else {
        None
    };

    for (index, c) in text.char_indices() {
        let escape = SPECIAL.contains(&c)
            || (at_block_start && index == 0 && BLOCK_START.contains(&c))
            || ordered_marker == Some(index);
        if escape {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Byte index of the `.` or `)` in a leading `12.` / `12)`, which would start an ordered list
fn ordered_marker_dot(text: &str) -> Option<usize> {
    let digits = text.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    match text[digits..].chars().next() {
        Some('.') | Some(')') => Some(digits),
        _ => None,
    }
}

/// Escape a trailing `#` run that CommonMark would read as the heading's closing sequence
pub fn escape_closing_hashes(title: &str) -> String {
    let body = title.trim_end_matches('#');
    if body.len() == title.len() || !(body.is_empty() || body.ends_with([' ', '\t'])) {
        return title.to_string();
    }
    format!("{}\\{}", body, &title[body.len()..])
}

/// Remove backslash escapes before ASCII punctuation
pub fn unescape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.peek().copied() {
                if next.is_ascii_punctuation() {
                    result.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        result.push(c);
    }

    result
}

/// Link destination, wrapped in `<>` when it holds characters a bare destination cannot
pub fn escape_destination(url: &str) -> String {
    if url.contains([' ', '(', ')', '<', '>']) {
        let inner = url.replace('<', "\\<").replace('>', "\\>");
        format!("<{}>", inner)
    } else {
        url.to_string()
    }
}
