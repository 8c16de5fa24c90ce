//! Token types shared by the lexer, the parser and tooling.
//!
//!     Moire has very few tokens. The logos lexer recognizes five raw shapes (see [RawToken]):
//!     command markers, escapes, the two argument delimiters and runs of plain text. The
//!     position-tracking [Lexer](crate::moire::lexing::Lexer) turns those into [Token]s that
//!     own their payload, and pairs each with its source [Position].
//!
//!     Reserved characters are `\`, `{` and `}`. Anything else is text.

use crate::moire::ast::range::Position;
use logos::Logos;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// The command marker character
pub const COMMAND_MARKER: char = '\\';
/// Opens an argument group
pub const ARG_OPEN: char = '{';
/// Closes an argument group
pub const ARG_CLOSE: char = '}';

/// Characters that must be escaped to appear literally in text
pub const RESERVED: [char; 3] = [COMMAND_MARKER, ARG_OPEN, ARG_CLOSE];

/// Raw token shapes recognized by logos
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum RawToken {
    #[regex(r"\\[A-Za-z0-9]+")]
    Command,

    #[regex(r"\\[\\{}]")]
    Escape,

    #[token("{")]
    Open,

    #[token("}")]
    Close,

    #[regex(r"[^\\{}]+")]
    Text,
}

/// A lexical unit of a moire document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Token {
    Text(String),
    CommandStart(String),
    ArgOpen,
    ArgClose,
    Escape(char),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text(text) => write!(f, "{}", text),
            Token::CommandStart(name) => write!(f, "{}{}", COMMAND_MARKER, name),
            Token::ArgOpen => write!(f, "{}", ARG_OPEN),
            Token::ArgClose => write!(f, "{}", ARG_CLOSE),
            Token::Escape(ch) => write!(f, "{}{}", COMMAND_MARKER, ch),
        }
    }
}

/// A token with its source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpannedToken {
    pub token: Token,
    pub position: Position,
    pub span: Range<usize>,
}

impl SpannedToken {
    pub fn new(token: Token, position: Position, span: Range<usize>) -> Self {
        Self {
            token,
            position,
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(source: &str) -> Vec<Result<RawToken, ()>> {
        RawToken::lexer(source).collect()
    }

    #[test]
    fn test_command_marker() {
        assert_eq!(raw(r"\ref"), vec![Ok(RawToken::Command)]);
        assert_eq!(raw(r"\1"), vec![Ok(RawToken::Command)]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            raw(r"\{\}\\"),
            vec![
                Ok(RawToken::Escape),
                Ok(RawToken::Escape),
                Ok(RawToken::Escape)
            ]
        );
    }

    #[test]
    fn test_groups_and_text() {
        assert_eq!(
            raw(r"\b{bold} text"),
            vec![
                Ok(RawToken::Command),
                Ok(RawToken::Open),
                Ok(RawToken::Text),
                Ok(RawToken::Close),
                Ok(RawToken::Text),
            ]
        );
    }

    #[test]
    fn test_lone_backslash_is_an_error() {
        let tokens = raw(r"a \ b");
        assert_eq!(tokens[0], Ok(RawToken::Text));
        assert!(tokens.contains(&Err(())));
    }

    #[test]
    fn test_token_display_reconstructs_source() {
        let tokens = [
            Token::CommandStart("m".to_string()),
            Token::ArgOpen,
            Token::Text("x".to_string()),
            Token::Escape('}'),
            Token::ArgClose,
        ];
        let joined: String = tokens.iter().map(|t| t.to_string()).collect();
        assert_eq!(joined, r"\m{x\}}");
    }
}
