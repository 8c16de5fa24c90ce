//! Markdown format implementation
//!
//! CommonMark output, one-way (moire → Markdown).
//!
//! # Data Model
//!
//! | Moire | Markdown | Notes |
//! |-------|----------|-------|
//! | `\1`..`\6` | `#`..`######` | anchor ids are dropped |
//! | `\b` / `\i` | `**x**` / `*x*` | |
//! | `\m` | `` `x` `` | fence longer than any backtick run inside |
//! | `\ref` | `[text](url)` | `<url>` when the url holds spaces or parens |
//! | `\code` | fenced block | language after the opening fence |
//! | `\list` / `\numbers` | `- x` / `1. x` | nested content indented under the marker |
//! | `\hr` | `---` | |
//! | paragraph | bare text | |

mod escape;

pub use escape::{escape_closing_hashes, escape_destination, escape_markdown, unescape_markdown};

use crate::format::Format;
use crate::render::{
    CodeBlockStyle, CodeSpanStyle, Dialect, HeadingStyle, ListStyle, RenderOptions, Rule,
    RuleTable,
};
use moire_parser::moire::registry::Command;

pub struct MarkdownFormat {
    rules: RuleTable,
    options: RenderOptions,
}

impl MarkdownFormat {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            rules: RuleTable::from_fn(Self::rule),
            options,
        }
    }

    pub fn rule(command: Command) -> Rule {
        match command {
            Command::Heading(_) => Rule::Heading(HeadingStyle::Hashes),
            Command::Bold => Rule::Span {
                open: "**",
                close: "**",
            },
            Command::Italic => Rule::Span {
                open: "*",
                close: "*",
            },
            Command::Code => Rule::CodeSpan(CodeSpanStyle::Backticks),
            Command::Link => Rule::Link("[{text}]({url})"),
            Command::CodeBlock => Rule::CodeBlock(CodeBlockStyle::Fenced),
            Command::List => Rule::List(ListStyle::Indented { marker: "-" }),
            Command::Numbers => Rule::List(ListStyle::Indented { marker: "." }),
            Command::Rule => Rule::Separator("---"),
            Command::Raw => Rule::Verbatim,
        }
    }
}

impl Default for MarkdownFormat {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Dialect for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn rules(&self) -> &RuleTable {
        &self.rules
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn escape_text(&self, text: &str, at_block_start: bool) -> String {
        escape_markdown(text, at_block_start)
    }

    fn unescape_text(&self, text: &str) -> String {
        unescape_markdown(text)
    }

    fn escape_attribute(&self, value: &str) -> String {
        escape_destination(value)
    }

    fn heading_title(&self, title: &str) -> String {
        escape_closing_hashes(title)
    }
}

impl Format for MarkdownFormat {
    fn description(&self) -> &str {
        "CommonMark Markdown"
    }

    fn file_extension(&self) -> &str {
        "md"
    }

    fn as_dialect(&self) -> &dyn Dialect {
        self
    }
}
