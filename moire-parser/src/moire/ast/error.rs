//! Error types for lexing and parsing

use crate::moire::ast::range::Position;
use thiserror::Error;

/// Errors that stop the processing of a document before any rendering happens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unbalanced braces, malformed command markers, misplaced argument groups
    #[error("{position}: syntax error: {message}")]
    Syntax { message: String, position: Position },

    /// A command name that is not in the registry
    #[error("{position}: unknown command \\{name}")]
    UnknownCommand { name: String, position: Position },

    /// A known command with the wrong number of argument groups
    #[error("{position}: \\{name} expects {expected} argument(s), found {found}")]
    Arity {
        name: String,
        expected: String,
        found: usize,
        position: Position,
    },
}

impl ParseError {
    pub fn syntax(message: impl Into<String>, position: Position) -> Self {
        ParseError::Syntax {
            message: message.into(),
            position,
        }
    }

    /// Where in the source the error was detected
    pub fn position(&self) -> Position {
        match self {
            ParseError::Syntax { position, .. }
            | ParseError::UnknownCommand { position, .. }
            | ParseError::Arity { position, .. } => *position,
        }
    }

    /// The message without the position prefix
    pub fn message(&self) -> String {
        match self {
            ParseError::Syntax { message, .. } => format!("syntax error: {}", message),
            ParseError::UnknownCommand { name, .. } => format!("unknown command \\{}", name),
            ParseError::Arity {
                name,
                expected,
                found,
                ..
            } => format!(
                "\\{} expects {} argument(s), found {}",
                name, expected, found
            ),
        }
    }
}

/// Type alias for parser results
pub type ParseResult<T> = Result<T, ParseError>;

/// Format source context around an error position
///
/// Shows 2 lines before the error, the error line with >> marker, and 2 lines after.
/// All lines are numbered for easy reference.
pub fn format_source_context(source: &str, position: Position) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = position.line.saturating_sub(1);

    let start_line = error_line.saturating_sub(2);
    let end_line = (error_line + 3).min(lines.len());

    let mut context = String::new();

    for (line_num, line) in lines.iter().enumerate().take(end_line).skip(start_line) {
        let marker = if line_num == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, line_num + 1, line));
    }

    context
}
