//! MediaWiki format implementation
//!
//! Wikitext output, one-way (moire → wiki).
//!
//! # Data Model
//!
//! | Moire | Wiki | Notes |
//! |-------|------|-------|
//! | `\1`..`\6` | `= x =`..`====== x ======` | anchor ids are dropped |
//! | `\b` / `\i` | `'''x'''` / `''x''` | |
//! | `\m` | `<code><nowiki>x</nowiki></code>` | |
//! | `\ref` | `[url text]` | |
//! | `\code` | `<syntaxhighlight lang="X">` or `<pre>` | `<pre>` when no language is given |
//! | `\list` / `\numbers` | `*` / `#` | markers repeat once per enclosing list |
//! | `\hr` | `----` | |
//! | paragraph | bare text | |
//!
//! Blocks inside a list item other than nested lists continue the item on a `*:` line.

mod escape;

pub use escape::{escape_heading_end, escape_nowiki, escape_target, escape_wiki, unescape_wiki};

use crate::format::Format;
use crate::render::{
    CodeBlockStyle, CodeBlockTag, CodeSpanStyle, Dialect, HeadingStyle, ListStyle,
    RenderOptions, Rule, RuleTable,
};
use moire_parser::moire::registry::Command;

pub struct WikiFormat {
    rules: RuleTable,
    options: RenderOptions,
}

impl WikiFormat {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            rules: RuleTable::from_fn(Self::rule),
            options,
        }
    }

    pub fn rule(command: Command) -> Rule {
        match command {
            Command::Heading(_) => Rule::Heading(HeadingStyle::Equals),
            Command::Bold => Rule::Span {
                open: "'''",
                close: "'''",
            },
            Command::Italic => Rule::Span {
                open: "''",
                close: "''",
            },
            Command::Code => Rule::CodeSpan(CodeSpanStyle::Tagged {
                open: "<code><nowiki>",
                close: "</nowiki></code>",
            }),
            Command::Link => Rule::Link("[{url} {text}]"),
            Command::CodeBlock => Rule::CodeBlock(CodeBlockStyle::Tagged {
                plain: CodeBlockTag {
                    open: "<pre>",
                    close: "</pre>",
                    escape: true,
                },
                with_language: CodeBlockTag {
                    open: "<syntaxhighlight lang=\"{language}\">\n",
                    close: "\n</syntaxhighlight>",
                    escape: false,
                },
            }),
            Command::List => Rule::List(ListStyle::Repeated { marker: "*" }),
            Command::Numbers => Rule::List(ListStyle::Repeated { marker: "#" }),
            Command::Rule => Rule::Separator("----"),
            Command::Raw => Rule::Verbatim,
        }
    }
}

impl Default for WikiFormat {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Dialect for WikiFormat {
    fn name(&self) -> &str {
        "wiki"
    }

    fn rules(&self) -> &RuleTable {
        &self.rules
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn escape_text(&self, text: &str, at_block_start: bool) -> String {
        escape_wiki(text, at_block_start)
    }

    fn unescape_text(&self, text: &str) -> String {
        unescape_wiki(text)
    }

    fn escape_code(&self, code: &str) -> String {
        escape_nowiki(code)
    }

    fn escape_attribute(&self, value: &str) -> String {
        escape_target(value)
    }

    fn heading_title(&self, title: &str) -> String {
        escape_heading_end(title)
    }
}

impl Format for WikiFormat {
    fn description(&self) -> &str {
        "MediaWiki wikitext"
    }

    fn file_extension(&self) -> &str {
        "wiki"
    }

    fn as_dialect(&self) -> &dyn Dialect {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moire_parser::parse_document;

    fn to_wiki(source: &str) -> String {
        let doc = parse_document(source).unwrap();
        WikiFormat::default().serialize(&doc).unwrap()
    }

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(
            to_wiki(r"\1{Title}{id} Some \m{code} text."),
            "= Title =\n\nSome <code><nowiki>code</nowiki></code> text.\n"
        );
    }

    #[test]
    fn test_emphasis_and_links() {
        assert_eq!(
            to_wiki(r"\b{bold} \i{it's} \ref{https://x.org/a b}{the site}"),
            "'''bold''' ''it's'' [https://x.org/a%20b the site]\n"
        );
    }

    #[test]
    fn test_apostrophe_next_to_markup_is_escaped() {
        assert_eq!(to_wiki(r"\b{Moire}'s"), "'''Moire'''&#39;s\n");
    }

    #[test]
    fn test_code_blocks() {
        assert_eq!(
            to_wiki(r"\code{a < b}"),
            "<pre>a &lt; b</pre>\n"
        );
        assert_eq!(
            to_wiki(r"\code{a < b}{python}"),
            "<syntaxhighlight lang=\"python\">\na < b\n</syntaxhighlight>\n"
        );
    }

    #[test]
    fn test_nested_lists() {
        let source = r"\numbers{one}{two \list{a}{b \numbers{deep}}}{three}";
        insta::assert_snapshot!(to_wiki(source).trim_end(), @r"
        # one
        # two
        #* a
        #* b
        #*# deep
        # three
        ");
    }

    #[test]
    fn test_item_continuation() {
        assert_eq!(
            to_wiki("\\list{first\n\nsecond paragraph}"),
            "* first\n*: second paragraph\n"
        );
    }

    #[test]
    fn test_rule() {
        assert_eq!(to_wiki("a \\hr b"), "a\n\n----\n\nb\n");
    }
}
