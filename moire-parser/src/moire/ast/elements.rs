//! AST node types
//!
//!     A moire document is a flat sequence of nodes at the root. Structure comes from commands:
//!     a [CommandNode] owns its arguments, and each [Argument] is itself a node sequence, so
//!     lists, links and headings nest arbitrarily.
//!
//!     The tree is built once by the parser and only read afterwards. Renderers borrow it
//!     immutably, which is what makes rendering one document to several dialects at once safe.

use crate::moire::ast::range::Position;
use crate::moire::registry::{self, Command, CommandSpec};
use serde::Serialize;

/// The root node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Leaf text fragments in document order (depth-first, left to right)
    pub fn text_fragments(&self) -> Vec<&str> {
        let mut fragments = Vec::new();
        collect_fragments(&self.children, &mut fragments);
        fragments
    }

    /// Every command node in document order, nested ones included
    pub fn commands(&self) -> Vec<&CommandNode> {
        let mut commands = Vec::new();
        collect_commands(&self.children, &mut commands);
        commands
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Text(TextNode),
    Command(CommandNode),
}

impl Node {
    pub fn position(&self) -> Position {
        match self {
            Node::Text(text) => text.position,
            Node::Command(command) => command.position,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) => Some(text),
            Node::Command(_) => None,
        }
    }

    pub fn as_command(&self) -> Option<&CommandNode> {
        match self {
            Node::Command(command) => Some(command),
            Node::Text(_) => None,
        }
    }
}

/// Literal content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextNode {
    pub text: String,
    pub position: Position,
}

impl TextNode {
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// A command with its argument groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandNode {
    pub command: Command,
    /// The name as written in the source
    pub name: String,
    pub arguments: Vec<Argument>,
    pub position: Position,
}

impl CommandNode {
    pub fn spec(&self) -> Option<&'static CommandSpec> {
        registry::spec_for(self.command)
    }

    pub fn argument(&self, index: usize) -> Option<&Argument> {
        self.arguments.get(index)
    }
}

/// One `{...}` group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub nodes: Vec<Node>,
    pub position: Position,
}

impl Argument {
    pub fn new(nodes: Vec<Node>, position: Position) -> Self {
        Self { nodes, position }
    }

    /// Concatenated text of the argument, for literal slots
    pub fn plain_text(&self) -> String {
        let mut fragments = Vec::new();
        collect_fragments(&self.nodes, &mut fragments);
        fragments.concat()
    }
}

fn collect_fragments<'a>(nodes: &'a [Node], out: &mut Vec<&'a str>) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push(&text.text),
            Node::Command(command) => {
                for argument in &command.arguments {
                    collect_fragments(&argument.nodes, out);
                }
            }
        }
    }
}

fn collect_commands<'a>(nodes: &'a [Node], out: &mut Vec<&'a CommandNode>) {
    for node in nodes {
        if let Node::Command(command) = node {
            out.push(command);
            for argument in &command.arguments {
                collect_commands(&argument.nodes, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Node {
        Node::Text(TextNode::new(s, Position::default()))
    }

    fn command(command: Command, name: &str, arguments: Vec<Vec<Node>>) -> Node {
        Node::Command(CommandNode {
            command,
            name: name.to_string(),
            arguments: arguments
                .into_iter()
                .map(|nodes| Argument::new(nodes, Position::default()))
                .collect(),
            position: Position::default(),
        })
    }

    #[test]
    fn test_text_fragments_in_document_order() {
        let doc = Document::new(vec![
            text("a "),
            command(
                Command::List,
                "list",
                vec![vec![text("b")], vec![command(Command::Bold, "b", vec![vec![text("c")]])]],
            ),
            text(" d"),
        ]);
        assert_eq!(doc.text_fragments(), vec!["a ", "b", "c", " d"]);
    }

    #[test]
    fn test_commands_include_nested() {
        let doc = Document::new(vec![command(
            Command::List,
            "list",
            vec![vec![command(Command::Code, "m", vec![vec![text("x")]])]],
        )]);
        let names: Vec<_> = doc.commands().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["list", "m"]);
    }

    #[test]
    fn test_plain_text() {
        let arg = Argument::new(vec![text("fn "), text("main")], Position::default());
        assert_eq!(arg.plain_text(), "fn main");
    }
}
