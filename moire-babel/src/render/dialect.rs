//! The per-dialect hooks used by the renderer

use super::rules::RuleTable;
use super::RenderOptions;

/// An output dialect: its rule table and its text conventions
///
/// Implementations are immutable after construction and shared between threads.
pub trait Dialect: Send + Sync {
    /// Short name, also the output subdirectory (`markdown`, `html`, `wiki`)
    fn name(&self) -> &str;

    /// How each command is written
    fn rules(&self) -> &RuleTable;

    fn options(&self) -> &RenderOptions;

    /// Escape document text so it reads back as the same characters.
    ///
    /// `at_block_start` is set when the text opens a block, where some dialects give line-start
    /// characters (`#`, `*`, `=`) a meaning.
    fn escape_text(&self, text: &str, at_block_start: bool) -> String;

    /// Inverse of [Dialect::escape_text]
    fn unescape_text(&self, text: &str) -> String;

    /// Escape the content of a code span or code block
    fn escape_code(&self, code: &str) -> String {
        code.to_string()
    }

    /// Escape a url, anchor id or language name placed in an attribute or link target
    fn escape_attribute(&self, value: &str) -> String;

    /// Guard the end of a rendered heading title against the dialect's closing markup
    fn heading_title(&self, title: &str) -> String {
        title.to_string()
    }

    /// Wrap the content of a paragraph
    fn paragraph(&self, content: &str) -> String {
        content.to_string()
    }
}
