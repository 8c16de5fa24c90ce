//! Rendering rules: how a dialect writes each command
//!
//! Rules are plain data. A dialect maps every [Command] to a [Rule] with an exhaustive `match`,
//! so adding a command to the registry fails to compile until every dialect handles it. The
//! mapping is materialized once into a [RuleTable], which the renderer consults per node.

use moire_parser::moire::registry::{all_commands, Command};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// `## Title`
    Hashes,
    /// `<h2 id="anchor">Title</h2>`
    Tagged,
    /// `== Title ==`
    Equals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSpanStyle {
    /// Backtick fence one longer than the longest backtick run inside
    Backticks,
    /// Fixed tags around escaped code
    Tagged {
        open: &'static str,
        close: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeBlockTag {
    /// Opening tag; `{language}` is replaced with the block's language
    pub open: &'static str,
    pub close: &'static str,
    /// Whether the content goes through the dialect's code escaping
    pub escape: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeBlockStyle {
    /// Backtick fence with the language after the opening fence
    Fenced,
    Tagged {
        plain: CodeBlockTag,
        with_language: CodeBlockTag,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// `- item` / `1. item`, nested content indented under the marker
    Indented { marker: &'static str },
    /// `<ul>` / `<ol>` with one `<li>` per item
    Tagged { tag: &'static str },
    /// `*` / `#` repeated once per enclosing list
    Repeated { marker: &'static str },
}

/// How one command is written in one dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Heading(HeadingStyle),
    /// Inline content between two fixed strings
    Span {
        open: &'static str,
        close: &'static str,
    },
    CodeSpan(CodeSpanStyle),
    /// Template with `{url}` and `{text}` placeholders
    Link(&'static str),
    CodeBlock(CodeBlockStyle),
    List(ListStyle),
    /// A fixed block, such as a horizontal rule
    Separator(&'static str),
    /// The literal argument, unescaped
    Verbatim,
}

/// The rules of one dialect, keyed by command
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<Command, Rule>,
}

impl RuleTable {
    /// Build a table by asking `rule_for` about every registered command
    pub fn from_fn(rule_for: impl Fn(Command) -> Rule) -> Self {
        let rules = all_commands()
            .map(|command| (command, rule_for(command)))
            .collect();
        Self { rules }
    }

    pub fn get(&self, command: Command) -> Option<&Rule> {
        self.rules.get(&command)
    }

    /// The same table with no rule for `command`
    pub fn without(mut self, command: Command) -> Self {
        self.rules.remove(&command);
        self
    }

    /// Registered commands that have no rule, in registry order
    pub fn missing(&self) -> Vec<Command> {
        all_commands()
            .filter(|command| !self.rules.contains_key(command))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
