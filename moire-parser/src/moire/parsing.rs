//! Parsing: tokens to the document tree
//!
//!     A small recursive-descent parser. The whole token stream is lexed first (brace balance is
//!     only known at the end of input), then consumed exactly once:
//!
//!     - text and escape tokens merge into one [TextNode]
//!     - a command marker is resolved against the [registry](crate::moire::registry) and then
//!       greedily takes the argument groups that follow it
//!     - each group is parsed recursively until its closing brace
//!
//! Argument Groups
//!
//!     Groups may be separated from the command and from each other by whitespace, as long as the
//!     whitespace holds at most one line break and a `{` follows it:
//!
//!         \ref {https://example.org} {the example}
//!
//!         \list
//!             {first}
//!             {second}
//!
//!     Whitespace that is not followed by a group is ordinary text. A blank line always ends the
//!     argument list. A group that does not belong to a command is a syntax error; literal braces
//!     are written `\{` and `\}`.

use crate::moire::ast::error::{ParseError, ParseResult};
use crate::moire::ast::range::{Position, SourceLocation};
use crate::moire::ast::{Argument, CommandNode, Document, Node, TextNode};
use crate::moire::lexing::tokenize;
use crate::moire::registry::{self, ArgKind};
use crate::moire::token::{SpannedToken, Token};

/// Parse a moire source into a document
pub fn parse_document(source: &str) -> ParseResult<Document> {
    let tokens = tokenize(source)?;
    let end = SourceLocation::new(source).end();
    let document = Parser::new(tokens, end).parse()?;
    log::debug!("parsed {} top-level nodes", document.children.len());
    Ok(document)
}

/// What the next token is, without borrowing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookahead {
    Text,
    Command,
    Open,
    Close,
}

pub struct Parser {
    tokens: Vec<SpannedToken>,
    index: usize,
    /// End-of-input position, for errors detected after the last token
    end: Position,
}

impl Parser {
    pub fn new(tokens: Vec<SpannedToken>, end: Position) -> Self {
        Self {
            tokens,
            index: 0,
            end,
        }
    }

    pub fn parse(mut self) -> ParseResult<Document> {
        let children = self.parse_sequence(None)?;
        Ok(Document::new(children))
    }

    fn lookahead_at(&self, index: usize) -> Option<(Lookahead, Position)> {
        self.tokens.get(index).map(|spanned| {
            let kind = match spanned.token {
                Token::Text(_) | Token::Escape(_) => Lookahead::Text,
                Token::CommandStart(_) => Lookahead::Command,
                Token::ArgOpen => Lookahead::Open,
                Token::ArgClose => Lookahead::Close,
            };
            (kind, spanned.position)
        })
    }

    fn lookahead(&self) -> Option<(Lookahead, Position)> {
        self.lookahead_at(self.index)
    }

    /// Parse nodes until the end of input (`group` is `None`) or until the `}` closing the group
    /// opened at `group`. The closing brace is left for the caller.
    fn parse_sequence(&mut self, group: Option<Position>) -> ParseResult<Vec<Node>> {
        let mut nodes = Vec::new();

        while let Some((kind, position)) = self.lookahead() {
            match kind {
                Lookahead::Text => nodes.push(Node::Text(self.parse_text())),
                Lookahead::Command => nodes.push(Node::Command(self.parse_command()?)),
                Lookahead::Open => {
                    return Err(ParseError::syntax(
                        "argument group does not follow a command (write \\{ for a literal brace)",
                        position,
                    ));
                }
                Lookahead::Close => {
                    if group.is_some() {
                        return Ok(nodes);
                    }
                    return Err(ParseError::syntax(
                        "unmatched '}' closes no argument group",
                        position,
                    ));
                }
            }
        }

        match group {
            Some(opened) => Err(ParseError::syntax(
                format!("unclosed argument group opened at {}", opened),
                self.end,
            )),
            None => Ok(nodes),
        }
    }

    fn parse_text(&mut self) -> TextNode {
        let position = self.tokens[self.index].position;
        let mut text = String::new();

        while let Some(spanned) = self.tokens.get(self.index) {
            match &spanned.token {
                Token::Text(chunk) => text.push_str(chunk),
                Token::Escape(ch) => text.push(*ch),
                _ => break,
            }
            self.index += 1;
        }

        TextNode::new(text, position)
    }

    fn parse_command(&mut self) -> ParseResult<CommandNode> {
        let SpannedToken {
            token, position, ..
        } = self.tokens[self.index].clone();
        self.index += 1;

        let name = match token {
            Token::CommandStart(name) => name,
            other => {
                return Err(ParseError::syntax(
                    format!("expected a command, found {:?}", other.to_string()),
                    position,
                ))
            }
        };

        let spec = registry::lookup(&name).ok_or_else(|| ParseError::UnknownCommand {
            name: name.clone(),
            position,
        })?;

        let mut arguments = Vec::new();
        loop {
            match self.lookahead() {
                Some((Lookahead::Open, opened)) => {
                    self.index += 1;
                    let nodes = self.parse_sequence(Some(opened))?;
                    // the closing brace
                    self.index += 1;
                    arguments.push(Argument::new(nodes, opened));
                }
                Some((Lookahead::Text, _)) if self.at_group_separator() => self.index += 1,
                _ => break,
            }
        }

        if !spec.accepts(arguments.len()) {
            return Err(ParseError::Arity {
                name,
                expected: spec.arity(),
                found: arguments.len(),
                position,
            });
        }

        for (index, argument) in arguments.iter().enumerate() {
            if spec.arg_kind(index) != ArgKind::Literal {
                continue;
            }
            if let Some(nested) = argument.nodes.iter().find_map(Node::as_command) {
                return Err(ParseError::syntax(
                    format!(
                        "\\{} is not allowed in argument {} of \\{}, which is literal text",
                        nested.name,
                        index + 1,
                        name
                    ),
                    nested.position,
                ));
            }
        }

        log::trace!("\\{} with {} argument(s) at {}", name, arguments.len(), position);

        Ok(CommandNode {
            command: spec.command,
            name,
            arguments,
            position,
        })
    }

    /// Whether the current token is whitespace between a command and its next argument group
    fn at_group_separator(&self) -> bool {
        let is_whitespace = match self.tokens.get(self.index).map(|t| &t.token) {
            Some(Token::Text(text)) => {
                text.chars().all(char::is_whitespace) && text.matches('\n').count() <= 1
            }
            _ => false,
        };
        is_whitespace && matches!(self.lookahead_at(self.index + 1), Some((Lookahead::Open, _)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moire::registry::Command;

    fn parse(source: &str) -> Document {
        parse_document(source).expect("source to parse")
    }

    fn only_command(doc: &Document) -> &CommandNode {
        doc.children
            .iter()
            .find_map(Node::as_command)
            .expect("a command node")
    }

    #[test]
    fn test_plain_text_is_one_node() {
        let doc = parse("just some text\nover two lines");
        assert_eq!(doc.children.len(), 1);
        assert_eq!(
            doc.children[0].as_text().unwrap().text,
            "just some text\nover two lines"
        );
    }

    #[test]
    fn test_escapes_merge_into_text() {
        let doc = parse(r"a \{b\} \\ c");
        assert_eq!(doc.children.len(), 1);
        assert_eq!(doc.children[0].as_text().unwrap().text, r"a {b} \ c");
    }

    #[test]
    fn test_heading_scenario() {
        let doc = parse(r"\1{Title}{id} Some \m{code} text.");
        assert_eq!(doc.children.len(), 4);

        let heading = doc.children[0].as_command().unwrap();
        assert_eq!(heading.command, Command::Heading(1));
        assert_eq!(heading.arguments.len(), 2);
        assert_eq!(heading.arguments[0].plain_text(), "Title");
        assert_eq!(heading.arguments[1].plain_text(), "id");

        assert_eq!(doc.children[1].as_text().unwrap().text, " Some ");
        let code = doc.children[2].as_command().unwrap();
        assert_eq!(code.command, Command::Code);
        assert_eq!(doc.children[3].as_text().unwrap().text, " text.");
    }

    #[test]
    fn test_whitespace_separates_groups() {
        let doc = parse("\\ref {https://example.org} {example}");
        let link = only_command(&doc);
        assert_eq!(link.arguments.len(), 2);
        assert_eq!(link.arguments[1].plain_text(), "example");
    }

    #[test]
    fn test_list_groups_on_following_lines() {
        let doc = parse("\\list\n    {one}\n    {two}\n    {three}\n");
        let list = only_command(&doc);
        assert_eq!(list.command, Command::List);
        assert_eq!(list.arguments.len(), 3);
        // trailing newline stays as text
        assert_eq!(doc.children.len(), 2);
    }

    #[test]
    fn test_blank_line_ends_argument_list() {
        let err = parse_document("\\b{x}\n\n{y}").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert_eq!(err.position(), Position::new(3, 1));
    }

    #[test]
    fn test_zero_argument_command_keeps_following_text() {
        let doc = parse("\\hr next");
        assert_eq!(doc.children.len(), 2);
        assert_eq!(only_command(&doc).command, Command::Rule);
        assert_eq!(doc.children[1].as_text().unwrap().text, " next");
    }

    #[test]
    fn test_nested_commands_in_arguments() {
        let doc = parse(r"\list{plain}{with \b{bold \i{and italic}}}{\numbers{a}{b}}");
        let list = only_command(&doc);
        assert_eq!(list.arguments.len(), 3);
        let bold = list.arguments[1].nodes[1].as_command().unwrap();
        assert_eq!(bold.command, Command::Bold);
        let italic = bold.arguments[0].nodes[1].as_command().unwrap();
        assert_eq!(italic.command, Command::Italic);
        let inner = list.arguments[2].nodes[0].as_command().unwrap();
        assert_eq!(inner.command, Command::Numbers);
        assert_eq!(inner.arguments.len(), 2);
    }

    #[test]
    fn test_empty_argument_group() {
        let doc = parse(r"\b{}");
        assert!(only_command(&doc).arguments[0].nodes.is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let err = parse_document("ok\n  \\frob{x}").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownCommand {
                name: "frob".to_string(),
                position: Position::new(2, 3),
            }
        );
    }

    #[test]
    fn test_arity_too_many() {
        let err = parse_document(r"\b{one}{two}").unwrap_err();
        match err {
            ParseError::Arity {
                name,
                found,
                position,
                ..
            } => {
                assert_eq!(name, "b");
                assert_eq!(found, 2);
                assert_eq!(position, Position::new(1, 1));
            }
            other => panic!("expected arity error, got {:?}", other),
        }
    }

    #[test]
    fn test_arity_too_few() {
        assert!(matches!(
            parse_document(r"see \ref here"),
            Err(ParseError::Arity { found: 0, .. })
        ));
    }

    #[test]
    fn test_command_inside_literal_argument() {
        let err = parse_document(r"\m{\b{x}}").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert_eq!(err.position(), Position::new(1, 4));
    }

    #[test]
    fn test_group_without_command() {
        let err = parse_document("text {group}").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert_eq!(err.position(), Position::new(1, 6));
    }

    #[test]
    fn test_unclosed_group_reports_end_of_input() {
        let err = parse_document(r"\m{code").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
        assert_eq!(err.position(), Position::new(1, 8));
    }

    #[test]
    fn test_positions_of_nodes() {
        let doc = parse("a\n\\b{x}");
        assert_eq!(doc.children[0].position(), Position::new(1, 1));
        let bold = doc.children[1].as_command().unwrap();
        assert_eq!(bold.position, Position::new(2, 1));
        assert_eq!(bold.arguments[0].position, Position::new(2, 3));
        assert_eq!(bold.arguments[0].nodes[0].position(), Position::new(2, 4));
    }
}
