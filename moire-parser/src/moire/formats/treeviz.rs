//! Treeviz formatter for AST nodes
//!
//! Treeviz is a visual representation of the AST, one line per node, which enables quick scanning
//! of the tree. Nesting is drawn with box characters, two columns per level.
//!
//! So the format is :
//! <prefix><connector> <icon> <label> (label truncated to 30 characters)
//!
//! Example:
//!
//!   ⧉ document
//!   ├─ § \1
//!   │ ├─ • argument 1
//!   │ │ └─ ◦ Contributing
//!   │ └─ • argument 2
//!   │   └─ ◦ contributing
//!   └─ ◦ Run the tests before…
//!
//! Icons
//!     Document: ⧉
//!     Text: ◦
//!     Argument: •
//!     Heading: §
//!     List / Numbers: ☰
//!     Bold: 𝐁
//!     Italic: 𝐼
//!     Code: ƒ
//!     Link: ⊕
//!     CodeBlock: 𝒱
//!     Rule: ―
//!     Raw: ⋯

use crate::moire::ast::{Document, Node};
use crate::moire::registry::Command;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push('…');
        truncated
    } else {
        s.to_string()
    }
}

fn command_icon(command: Command) -> &'static str {
    match command {
        Command::Heading(_) => "§",
        Command::Bold => "𝐁",
        Command::Italic => "𝐼",
        Command::Code => "ƒ",
        Command::Link => "⊕",
        Command::CodeBlock => "𝒱",
        Command::List | Command::Numbers => "☰",
        Command::Rule => "―",
        Command::Raw => "⋯",
    }
}

/// One line of the tree, before drawing
struct Line {
    icon: &'static str,
    label: String,
    line: usize,
    children: Vec<Line>,
}

fn node_line(node: &Node) -> Line {
    match node {
        Node::Text(text) => Line {
            icon: "◦",
            label: truncate(&text.text.escape_debug().to_string(), 30),
            line: text.position.line,
            children: Vec::new(),
        },
        Node::Command(command) => Line {
            icon: command_icon(command.command),
            label: format!("\\{}", command.name),
            line: command.position.line,
            children: command
                .arguments
                .iter()
                .enumerate()
                .map(|(index, argument)| Line {
                    icon: "•",
                    label: format!("argument {}", index + 1),
                    line: argument.position.line,
                    children: argument.nodes.iter().map(node_line).collect(),
                })
                .collect(),
        },
    }
}

fn draw(line: &Line, prefix: &str, is_last: bool, show_linum: bool, output: &mut String) {
    let connector = if is_last { "└─" } else { "├─" };
    if show_linum {
        output.push_str(&format!("{:02} ", line.line));
    }
    output.push_str(&format!("{}{} {} {}\n", prefix, connector, line.icon, line.label));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let count = line.children.len();
    for (i, child) in line.children.iter().enumerate() {
        draw(child, &child_prefix, i + 1 == count, show_linum, output);
    }
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_linum(doc, false)
}

pub fn to_treeviz_str_with_linum(doc: &Document, show_linum: bool) -> String {
    let mut output = String::from("⧉ document\n");
    let count = doc.children.len();
    for (i, node) in doc.children.iter().enumerate() {
        draw(&node_line(node), "", i + 1 == count, show_linum, &mut output);
    }
    output
}
