//! The document walker shared by every dialect

use super::context::{ListFrame, RenderContext};
use super::dialect::Dialect;
use super::rules::{CodeBlockStyle, CodeSpanStyle, HeadingStyle, ListStyle, Rule};
use super::text;
use crate::error::FormatError;
use moire_parser::moire::ast::{CommandNode, Document, Node};
use moire_parser::moire::registry::{Command, Layout};

/// A rendered block, before the dialect's final wrapping
#[derive(Debug, Clone, PartialEq, Eq)]
enum Block {
    /// Flowing text, not yet wrapped by [Dialect::paragraph]
    Paragraph(String),
    List(String),
    Other(String),
}

impl Block {
    fn text(&self) -> &str {
        match self {
            Block::Paragraph(text) | Block::List(text) | Block::Other(text) => text,
        }
    }
}

/// Accumulates the blocks of one flow (the document, or one argument)
#[derive(Debug, Default)]
struct Flow {
    blocks: Vec<Block>,
    paragraph: String,
}

impl Flow {
    fn push_text(&mut self, dialect: &dyn Dialect, piece: &str) {
        let collapsed = text::collapse_line_breaks(piece);
        let at_block_start = self.paragraph.is_empty();
        let piece = if at_block_start {
            collapsed.trim_start()
        } else {
            &collapsed[..]
        };
        if !piece.is_empty() {
            self.paragraph
                .push_str(&dialect.escape_text(piece, at_block_start));
        }
    }

    fn push_inline(&mut self, rendered: &str) {
        if self.paragraph.is_empty() {
            self.paragraph.push_str(rendered.trim_start());
        } else {
            self.paragraph.push_str(rendered);
        }
    }

    fn push_block(&mut self, block: Block) {
        self.end_paragraph();
        self.blocks.push(block);
    }

    fn end_paragraph(&mut self) {
        let paragraph = self.paragraph.trim_end();
        if !paragraph.is_empty() {
            self.blocks.push(Block::Paragraph(paragraph.to_string()));
        }
        self.paragraph.clear();
    }

    fn finish(mut self) -> Vec<Block> {
        self.end_paragraph();
        self.blocks
    }
}

/// An inline argument split into its edge whitespace and its rendered content
///
/// Spans put their delimiters around `content` only, so `\b{bold }text` keeps the space
/// between the span and the following word.
struct InlineParts {
    lead: String,
    content: String,
    trail: String,
}

impl InlineParts {
    fn wrap(&self, open: &str, close: &str) -> String {
        if self.content.is_empty() {
            return self.lead.clone();
        }
        format!("{}{}{}{}{}", self.lead, open, self.content, close, self.trail)
    }
}

/// One rendered list item: its leading paragraph and whatever follows it
struct ListItem {
    first: String,
    rest: Vec<Block>,
}

/// Renders documents in one dialect
pub struct Renderer<'d> {
    dialect: &'d dyn Dialect,
}

impl<'d> Renderer<'d> {
    pub fn new(dialect: &'d dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Render `doc` into `ctx`'s output buffer
    pub fn render(&self, doc: &Document, ctx: &mut RenderContext) -> Result<(), FormatError> {
        let blocks = self.render_flow(&doc.children, ctx)?;
        let body = blocks
            .iter()
            .map(|block| self.finish(block))
            .collect::<Vec<_>>()
            .join("\n\n");
        if !body.is_empty() {
            ctx.push_str(&body);
            ctx.push_str("\n");
        }
        Ok(())
    }

    /// Render `doc` with a fresh context
    pub fn render_to_string(&self, doc: &Document) -> Result<String, FormatError> {
        let mut ctx = RenderContext::new();
        self.render(doc, &mut ctx)?;
        Ok(ctx.into_output())
    }

    fn finish(&self, block: &Block) -> String {
        match block {
            Block::Paragraph(text) => self.dialect.paragraph(text),
            Block::List(text) | Block::Other(text) => text.clone(),
        }
    }

    fn render_flow(&self, nodes: &[Node], ctx: &mut RenderContext) -> Result<Vec<Block>, FormatError> {
        let mut flow = Flow::default();

        for node in nodes {
            match node {
                Node::Text(text) => {
                    for (index, piece) in text::split_paragraphs(&text.text).enumerate() {
                        if index > 0 {
                            flow.end_paragraph();
                        }
                        flow.push_text(self.dialect, piece);
                    }
                }
                Node::Command(command) => {
                    let block = self.render_command(command, ctx)?;
                    match command.spec().map_or(Layout::Inline, |spec| spec.layout) {
                        Layout::Inline => flow.push_inline(block.text()),
                        Layout::Block => flow.push_block(block),
                    }
                }
            }
        }

        Ok(flow.finish())
    }

    /// Render nodes that must stay on one line of flow, such as a heading title
    fn render_inline(&self, nodes: &[Node], ctx: &mut RenderContext) -> Result<String, FormatError> {
        let blocks = self.render_flow(nodes, ctx)?;
        Ok(blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn inline_argument(
        &self,
        node: &CommandNode,
        index: usize,
        ctx: &mut RenderContext,
    ) -> Result<String, FormatError> {
        match node.argument(index) {
            Some(argument) => self.render_inline(&argument.nodes, ctx),
            None => Ok(String::new()),
        }
    }

    fn inline_parts(
        &self,
        node: &CommandNode,
        index: usize,
        ctx: &mut RenderContext,
    ) -> Result<InlineParts, FormatError> {
        let nodes: &[Node] = match node.argument(index) {
            Some(argument) => &argument.nodes[..],
            None => &[],
        };
        let lead = match nodes.first() {
            Some(Node::Text(text)) => {
                let rest = text.text.trim_start();
                edge_whitespace(&text.text[..text.text.len() - rest.len()])
            }
            _ => String::new(),
        };
        let trail = match nodes.last() {
            Some(Node::Text(text)) => edge_whitespace(&text.text[text.text.trim_end().len()..]),
            _ => String::new(),
        };
        Ok(InlineParts {
            lead,
            content: self.render_inline(nodes, ctx)?,
            trail,
        })
    }

    fn rule_for(&self, node: &CommandNode) -> Result<Rule, FormatError> {
        self.dialect
            .rules()
            .get(node.command)
            .copied()
            .ok_or_else(|| FormatError::UnsupportedCommand {
                command: node.name.clone(),
                dialect: self.dialect.name().to_string(),
                position: node.position,
            })
    }

    fn render_command(&self, node: &CommandNode, ctx: &mut RenderContext) -> Result<Block, FormatError> {
        let rendered = match self.rule_for(node)? {
            Rule::Heading(style) => self.heading(style, node, ctx)?,
            Rule::Span { open, close } => self.inline_parts(node, 0, ctx)?.wrap(open, close),
            Rule::CodeSpan(style) => self.code_span(style, &literal(node, 0)),
            Rule::Link(template) => self.link(template, node, ctx)?,
            Rule::CodeBlock(style) => self.code_block(style, node),
            Rule::List(style) => return self.list(style, node, ctx).map(Block::List),
            Rule::Separator(separator) => separator.to_string(),
            Rule::Verbatim => literal(node, 0),
        };
        Ok(Block::Other(rendered))
    }

    fn heading(
        &self,
        style: HeadingStyle,
        node: &CommandNode,
        ctx: &mut RenderContext,
    ) -> Result<String, FormatError> {
        let level = match node.command {
            Command::Heading(level) => level,
            _ => 1,
        };
        let number = if self.dialect.options().number_headings {
            Some(ctx.next_heading_number(level))
        } else {
            None
        };

        let mut title = self.inline_argument(node, 0, ctx)?;
        if let Some(number) = number {
            title = format!("{} {}", number, title);
        }
        let title = self.dialect.heading_title(&title);
        let anchor = literal(node, 1).trim().to_string();
        let n = usize::from(level);

        Ok(match style {
            HeadingStyle::Hashes => format!("{} {}", "#".repeat(n), title),
            HeadingStyle::Tagged if anchor.is_empty() => format!("<h{n}>{title}</h{n}>"),
            HeadingStyle::Tagged => format!(
                "<h{n} id=\"{}\">{title}</h{n}>",
                self.dialect.escape_attribute(&anchor)
            ),
            HeadingStyle::Equals => {
                let marks = "=".repeat(n);
                format!("{marks} {title} {marks}")
            }
        })
    }

    fn code_span(&self, style: CodeSpanStyle, code: &str) -> String {
        let code = text::collapse_line_breaks(code);
        match style {
            CodeSpanStyle::Backticks => {
                let ticks = "`".repeat(text::longest_run(&code, '`') + 1);
                let pad = if code.starts_with('`') || code.ends_with('`') {
                    " "
                } else {
                    ""
                };
                format!("{ticks}{pad}{code}{pad}{ticks}")
            }
            CodeSpanStyle::Tagged { open, close } => {
                format!("{}{}{}", open, self.dialect.escape_code(&code), close)
            }
        }
    }

    fn link(
        &self,
        template: &str,
        node: &CommandNode,
        ctx: &mut RenderContext,
    ) -> Result<String, FormatError> {
        let url = literal(node, 0).trim().to_string();
        let mut label = self.inline_parts(node, 1, ctx)?;
        if label.content.is_empty() {
            label.content = self.dialect.escape_text(&url, false);
        }
        let target = self.dialect.escape_attribute(&url);

        let link = text::fill_template(template, |name| match name {
            "url" => Some(target.as_str()),
            "text" => Some(label.content.as_str()),
            _ => None,
        });
        Ok(format!("{}{}{}", label.lead, link, label.trail))
    }

    fn code_block(&self, style: CodeBlockStyle, node: &CommandNode) -> String {
        let code = text::normalize_code(&literal(node, 0));
        let language = literal(node, 1).trim().to_string();

        match style {
            CodeBlockStyle::Fenced => {
                let fence = "`".repeat((text::longest_run(&code, '`') + 1).max(3));
                format!("{fence}{language}\n{code}\n{fence}")
            }
            CodeBlockStyle::Tagged {
                plain,
                with_language,
            } => {
                let tag = if language.is_empty() {
                    plain
                } else {
                    with_language
                };
                let language = self.dialect.escape_attribute(&language);
                let open = text::fill_template(tag.open, |name| match name {
                    "language" => Some(language.as_str()),
                    _ => None,
                });
                let body = if tag.escape {
                    self.dialect.escape_code(&code)
                } else {
                    code
                };
                format!("{}{}{}", open, body, tag.close)
            }
        }
    }

    fn list(
        &self,
        style: ListStyle,
        node: &CommandNode,
        ctx: &mut RenderContext,
    ) -> Result<String, FormatError> {
        let ordered = node.command == Command::Numbers;
        let marker = match style {
            ListStyle::Indented { marker }
            | ListStyle::Tagged { tag: marker }
            | ListStyle::Repeated { marker } => marker,
        };

        ctx.scoped(ListFrame { marker }, |ctx| -> Result<String, FormatError> {
            let mut items = Vec::with_capacity(node.arguments.len());
            for argument in &node.arguments {
                let mut blocks = self.render_flow(&argument.nodes, ctx)?.into_iter();
                let item = match blocks.next() {
                    Some(Block::Paragraph(first)) => ListItem {
                        first,
                        rest: blocks.collect(),
                    },
                    Some(block) => ListItem {
                        first: String::new(),
                        rest: std::iter::once(block).chain(blocks).collect(),
                    },
                    None => ListItem {
                        first: String::new(),
                        rest: Vec::new(),
                    },
                };
                items.push(item);
            }

            Ok(match style {
                ListStyle::Indented { marker } => self.indented_list(marker, ordered, &items),
                ListStyle::Tagged { tag } => self.tagged_list(tag, &items),
                ListStyle::Repeated { .. } => {
                    let prefix: String = ctx.lists().iter().map(|frame| frame.marker).collect();
                    self.repeated_list(&prefix, &items)
                }
            })
        })
    }

    /// `- item` lists; for ordered lists the marker is the suffix after the item number
    fn indented_list(&self, marker: &str, ordered: bool, items: &[ListItem]) -> String {
        let mut lines: Vec<String> = Vec::new();

        for (index, item) in items.iter().enumerate() {
            let bullet = if ordered {
                format!("{}{}", index + 1, marker)
            } else {
                marker.to_string()
            };
            let pad = " ".repeat(self.dialect.options().indent.max(bullet.len() + 1));

            let mut first_lines = item.first.lines();
            let head = first_lines.next().unwrap_or("");
            lines.push(format!("{} {}", bullet, head).trim_end().to_string());
            lines.extend(first_lines.map(|line| indent_line(&pad, line)));

            for block in &item.rest {
                if !matches!(block, Block::List(_)) {
                    lines.push(String::new());
                }
                lines.extend(self.finish(block).lines().map(|line| indent_line(&pad, line)));
            }
        }

        lines.join("\n")
    }

    fn tagged_list(&self, tag: &str, items: &[ListItem]) -> String {
        let pad = " ".repeat(self.dialect.options().indent);
        let mut out = format!("<{tag}>\n");

        for item in items {
            if item.rest.is_empty() {
                out.push_str(&format!("{pad}<li>{}</li>\n", item.first));
                continue;
            }
            out.push_str(&format!("{pad}<li>{}\n", item.first));
            for block in &item.rest {
                for line in self.finish(block).lines() {
                    out.push_str(&indent_line(&pad, &indent_line(&pad, line)));
                    out.push('\n');
                }
            }
            out.push_str(&format!("{pad}</li>\n"));
        }

        out.push_str(&format!("</{tag}>"));
        out
    }

    /// `*` / `#` lists; `prefix` holds the marker of every enclosing list
    fn repeated_list(&self, prefix: &str, items: &[ListItem]) -> String {
        let mut lines: Vec<String> = Vec::new();

        for item in items {
            lines.push(format!("{} {}", prefix, item.first).trim_end().to_string());
            for block in &item.rest {
                match block {
                    Block::List(nested) => lines.extend(nested.lines().map(str::to_string)),
                    other => lines.push(format!("{}: {}", prefix, self.finish(other))),
                }
            }
        }

        lines.join("\n")
    }
}

/// Whitespace kept at the edge of an inline argument; a run holding a line break is one space
fn edge_whitespace(run: &str) -> String {
    text::collapse_line_breaks(run).into_owned()
}

fn indent_line(pad: &str, line: &str) -> String {
    if line.is_empty() {
        String::new()
    } else {
        format!("{}{}", pad, line)
    }
}

/// Plain text of a literal argument, empty when absent
fn literal(node: &CommandNode, index: usize) -> String {
    node.argument(index)
        .map(|argument| argument.plain_text())
        .unwrap_or_default()
}
