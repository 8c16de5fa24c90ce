//! Command registry
//!
//!     The closed set of commands moire understands. Every command is a [Command] variant, and
//!     [COMMANDS] holds one [CommandSpec] per source name with its arity, argument kinds and
//!     layout. The parser validates against it; renderers key their rule tables on [Command],
//!     so adding a variant forces every dialect to say how it renders it.
//!
//!     | Name        | Arity | Arguments                      | Layout |
//!     |-------------|-------|--------------------------------|--------|
//!     | `1` .. `6`  | 1..2  | title, anchor id               | block  |
//!     | `b`, `i`    | 1     | content                        | inline |
//!     | `m`         | 1     | code (literal)                 | inline |
//!     | `ref`       | 1..2  | url (literal), text            | inline |
//!     | `code`      | 1..2  | content, language (literal)    | block  |
//!     | `list`      | 1..   | items                          | block  |
//!     | `numbers`   | 1..   | items                          | block  |
//!     | `hr`        | 0     |                                | block  |
//!     | `raw`       | 1     | passthrough text (literal)     | inline |

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Every construct the markup can express
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Command {
    /// Section heading, level 1 to 6
    Heading(u8),
    Bold,
    Italic,
    /// Inline literal / code span
    Code,
    Link,
    /// Fenced code block with an optional language tag
    CodeBlock,
    /// Unordered list
    List,
    /// Ordered list
    Numbers,
    /// Horizontal rule
    Rule,
    /// Literal passthrough, emitted without dialect escaping
    Raw,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Heading(level) => write!(f, "heading-{}", level),
            Command::Bold => write!(f, "bold"),
            Command::Italic => write!(f, "italic"),
            Command::Code => write!(f, "code"),
            Command::Link => write!(f, "link"),
            Command::CodeBlock => write!(f, "code-block"),
            Command::List => write!(f, "list"),
            Command::Numbers => write!(f, "numbers"),
            Command::Rule => write!(f, "rule"),
            Command::Raw => write!(f, "raw"),
        }
    }
}

/// How an argument's content is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArgKind {
    /// Markup: text and nested commands, escaped for the target dialect
    Inline,
    /// Plain text only (urls, ids, code); nested commands are rejected
    Literal,
}

/// Whether a command flows inside a paragraph or stands as its own block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layout {
    Inline,
    Block,
}

/// Static descriptor of one command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    pub name: &'static str,
    pub command: Command,
    pub min_args: usize,
    /// `None` means unbounded
    pub max_args: Option<usize>,
    /// Kind of each argument slot; the last kind repeats for variadic commands
    pub args: &'static [ArgKind],
    pub layout: Layout,
    pub description: &'static str,
}

impl CommandSpec {
    /// Whether `count` argument groups satisfy the arity bounds
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min_args && self.max_args.map_or(true, |max| count <= max)
    }

    /// Kind of the argument at `index`
    pub fn arg_kind(&self, index: usize) -> ArgKind {
        self.args
            .get(index)
            .or_else(|| self.args.last())
            .copied()
            .unwrap_or(ArgKind::Inline)
    }

    /// Human-readable arity, e.g. `1`, `1..2`, `1 or more`
    pub fn arity(&self) -> String {
        match self.max_args {
            Some(max) if max == self.min_args => max.to_string(),
            Some(max) => format!("{}..{}", self.min_args, max),
            None => format!("{} or more", self.min_args),
        }
    }
}

const HEADING_ARGS: &[ArgKind] = &[ArgKind::Inline, ArgKind::Literal];

const fn heading(name: &'static str, level: u8, description: &'static str) -> CommandSpec {
    CommandSpec {
        name,
        command: Command::Heading(level),
        min_args: 1,
        max_args: Some(2),
        args: HEADING_ARGS,
        layout: Layout::Block,
        description,
    }
}

/// Every supported command
pub static COMMANDS: &[CommandSpec] = &[
    heading("1", 1, "Level 1 heading: {title} {anchor id}"),
    heading("2", 2, "Level 2 heading: {title} {anchor id}"),
    heading("3", 3, "Level 3 heading: {title} {anchor id}"),
    heading("4", 4, "Level 4 heading: {title} {anchor id}"),
    heading("5", 5, "Level 5 heading: {title} {anchor id}"),
    heading("6", 6, "Level 6 heading: {title} {anchor id}"),
    CommandSpec {
        name: "b",
        command: Command::Bold,
        min_args: 1,
        max_args: Some(1),
        args: &[ArgKind::Inline],
        layout: Layout::Inline,
        description: "Strong emphasis",
    },
    CommandSpec {
        name: "i",
        command: Command::Italic,
        min_args: 1,
        max_args: Some(1),
        args: &[ArgKind::Inline],
        layout: Layout::Inline,
        description: "Emphasis",
    },
    CommandSpec {
        name: "m",
        command: Command::Code,
        min_args: 1,
        max_args: Some(1),
        args: &[ArgKind::Literal],
        layout: Layout::Inline,
        description: "Inline code span",
    },
    CommandSpec {
        name: "ref",
        command: Command::Link,
        min_args: 1,
        max_args: Some(2),
        args: &[ArgKind::Literal, ArgKind::Inline],
        layout: Layout::Inline,
        description: "Hyperlink: {url} {text}",
    },
    CommandSpec {
        name: "code",
        command: Command::CodeBlock,
        min_args: 1,
        max_args: Some(2),
        args: &[ArgKind::Literal, ArgKind::Literal],
        layout: Layout::Block,
        description: "Code block: {content} {language}",
    },
    CommandSpec {
        name: "list",
        command: Command::List,
        min_args: 1,
        max_args: None,
        args: &[ArgKind::Inline],
        layout: Layout::Block,
        description: "Unordered list: {item} {item} ...",
    },
    CommandSpec {
        name: "numbers",
        command: Command::Numbers,
        min_args: 1,
        max_args: None,
        args: &[ArgKind::Inline],
        layout: Layout::Block,
        description: "Ordered list: {item} {item} ...",
    },
    CommandSpec {
        name: "hr",
        command: Command::Rule,
        min_args: 0,
        max_args: Some(0),
        args: &[],
        layout: Layout::Block,
        description: "Horizontal rule",
    },
    CommandSpec {
        name: "raw",
        command: Command::Raw,
        min_args: 1,
        max_args: Some(1),
        args: &[ArgKind::Literal],
        layout: Layout::Inline,
        description: "Literal passthrough, not escaped for the target",
    },
];

static BY_NAME: Lazy<HashMap<&'static str, &'static CommandSpec>> =
    Lazy::new(|| COMMANDS.iter().map(|spec| (spec.name, spec)).collect());

/// Look up a command by its source name
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    BY_NAME.get(name).copied()
}

/// The descriptor for a command variant
pub fn spec_for(command: Command) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.command == command)
}

/// All command variants, in registry order
pub fn all_commands() -> impl Iterator<Item = Command> {
    COMMANDS.iter().map(|spec| spec.command)
}
