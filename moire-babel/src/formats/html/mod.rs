//! HTML format implementation
//!
//! HTML fragment output, one-way (moire → HTML). No `<html>` or `<body>` wrapper is emitted, so
//! the result can be dropped into a page template.
//!
//! # Data Model
//!
//! | Moire | HTML | Notes |
//! |-------|------|-------|
//! | `\1`..`\6` | `<h1>`..`<h6>` | the second argument becomes the `id` attribute |
//! | `\b` / `\i` | `<strong>` / `<em>` | |
//! | `\m` | `<code>` | |
//! | `\ref` | `<a href>` | |
//! | `\code` | `<pre><code class="language-X">` | class only when a language is given |
//! | `\list` / `\numbers` | `<ul>` / `<ol>` with `<li>` | items indented by nesting depth |
//! | `\hr` | `<hr />` | |
//! | paragraph | `<p>` | |

mod escape;

pub use escape::{escape_html, unescape_html};

use crate::format::Format;
use crate::render::{
    CodeBlockStyle, CodeBlockTag, CodeSpanStyle, Dialect, HeadingStyle, ListStyle,
    RenderOptions, Rule, RuleTable,
};
use moire_parser::moire::registry::Command;

pub struct HtmlFormat {
    rules: RuleTable,
    options: RenderOptions,
}

impl HtmlFormat {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            rules: RuleTable::from_fn(Self::rule),
            options,
        }
    }

    pub fn rule(command: Command) -> Rule {
        match command {
            Command::Heading(_) => Rule::Heading(HeadingStyle::Tagged),
            Command::Bold => Rule::Span {
                open: "<strong>",
                close: "</strong>",
            },
            Command::Italic => Rule::Span {
                open: "<em>",
                close: "</em>",
            },
            Command::Code => Rule::CodeSpan(CodeSpanStyle::Tagged {
                open: "<code>",
                close: "</code>",
            }),
            Command::Link => Rule::Link("<a href=\"{url}\">{text}</a>"),
            Command::CodeBlock => Rule::CodeBlock(CodeBlockStyle::Tagged {
                plain: CodeBlockTag {
                    open: "<pre><code>",
                    close: "</code></pre>",
                    escape: true,
                },
                with_language: CodeBlockTag {
                    open: "<pre><code class=\"language-{language}\">",
                    close: "</code></pre>",
                    escape: true,
                },
            }),
            Command::List => Rule::List(ListStyle::Tagged { tag: "ul" }),
            Command::Numbers => Rule::List(ListStyle::Tagged { tag: "ol" }),
            Command::Rule => Rule::Separator("<hr />"),
            Command::Raw => Rule::Verbatim,
        }
    }
}

impl Default for HtmlFormat {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl Dialect for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn rules(&self) -> &RuleTable {
        &self.rules
    }

    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn escape_text(&self, text: &str, _at_block_start: bool) -> String {
        escape_html(text)
    }

    fn unescape_text(&self, text: &str) -> String {
        unescape_html(text)
    }

    fn escape_code(&self, code: &str) -> String {
        escape_html(code)
    }

    fn escape_attribute(&self, value: &str) -> String {
        escape_html(value)
    }

    fn paragraph(&self, content: &str) -> String {
        format!("<p>{}</p>", content)
    }
}

impl Format for HtmlFormat {
    fn description(&self) -> &str {
        "HTML fragment"
    }

    fn file_extension(&self) -> &str {
        "html"
    }

    fn as_dialect(&self) -> &dyn Dialect {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moire_parser::parse_document;

    fn to_html(source: &str) -> String {
        let doc = parse_document(source).unwrap();
        HtmlFormat::default().serialize(&doc).unwrap()
    }

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(
            to_html(r"\1{Title}{id} Some \m{code} text."),
            "<h1 id=\"id\">Title</h1>\n\n<p>Some <code>code</code> text.</p>\n"
        );
    }

    #[test]
    fn test_heading_without_id() {
        assert_eq!(to_html(r"\3{A & B}"), "<h3>A &amp; B</h3>\n");
    }

    #[test]
    fn test_inline_markup() {
        assert_eq!(
            to_html(r"\b{bold} \i{it} \ref{https://x.org/?a=1&b=2}{x < y}"),
            "<p><strong>bold</strong> <em>it</em> <a href=\"https://x.org/?a=1&amp;b=2\">x &lt; y</a></p>\n"
        );
    }

    #[test]
    fn test_code_block_escapes_content() {
        assert_eq!(
            to_html("\\code{if a < b \\{ go() \\}}{rust}"),
            "<pre><code class=\"language-rust\">if a &lt; b { go() }</code></pre>\n"
        );
        assert_eq!(
            to_html(r"\code{plain}"),
            "<pre><code>plain</code></pre>\n"
        );
    }

    #[test]
    fn test_nested_lists() {
        let source = r"\list{one}{two \numbers{a}{b}}";
        insta::assert_snapshot!(to_html(source).trim_end(), @r"
        <ul>
          <li>one</li>
          <li>two
            <ol>
              <li>a</li>
              <li>b</li>
            </ol>
          </li>
        </ul>
        ");
    }

    #[test]
    fn test_rule_and_raw() {
        assert_eq!(
            to_html("\\hr\n\\raw{<span>&nbsp;</span>}"),
            "<hr />\n\n<p><span>&nbsp;</span></p>\n"
        );
    }
}
