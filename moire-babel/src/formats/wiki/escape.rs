//! MediaWiki escaping
//!
//! Wiki markup has no backslash escape, so reserved characters become numeric character
//! references. Apostrophes are only markup in runs (`''`, `'''`), so a lone `'` inside a word is
//! kept; one at either end of the text could join a run formed with neighbouring markup and is
//! escaped.

use crate::render::text::{decode_entities, numeric_entity};

/// Always escaped
const SPECIAL: &[char] = &['&', '<', '>', '[', ']', '{', '}', '|', '~'];

/// Escaped when they open a block
const BLOCK_START: &[char] = &['*', '#', ':', ';', '=', '-'];

pub fn escape_wiki(text: &str, at_block_start: bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len() + text.len() / 10);

    for (index, &c) in chars.iter().enumerate() {
        let escape = match c {
            '\'' => {
                index == 0
                    || index + 1 == chars.len()
                    || chars[index - 1] == '\''
                    || chars[index + 1] == '\''
            }
            _ => {
                SPECIAL.contains(&c) || (at_block_start && index == 0 && BLOCK_START.contains(&c))
            }
        };
        if escape {
            result.push_str(&numeric_entity(c));
        } else {
            result.push(c);
        }
    }

    result
}

/// A heading title ending in `=` would merge with the closing `=` marks
pub fn escape_heading_end(title: &str) -> String {
    match title.strip_suffix('=') {
        Some(body) => format!("{}{}", body, numeric_entity('=')),
        None => title.to_string(),
    }
}

pub fn unescape_wiki(text: &str) -> String {
    decode_entities(text)
}

/// Content of `<nowiki>` and `<pre>`, where only tags and entities are still recognized
pub fn escape_nowiki(code: &str) -> String {
    code.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// External link target or tag attribute value
pub fn escape_target(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ' ' => result.push_str("%20"),
            '"' => result.push_str("%22"),
            '<' => result.push_str("%3C"),
            '>' => result.push_str("%3E"),
            '[' => result.push_str("%5B"),
            ']' => result.push_str("%5D"),
            _ => result.push(c),
        }
    }
    result
}
