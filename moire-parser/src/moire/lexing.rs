//! Lexing: source text to positioned tokens
//!
//!     The [Lexer] wraps the logos-generated [RawToken] lexer and adds what logos does not know
//!     about: exact 1-based line/column positions and brace balance. It is a lazy iterator of
//!     `Result<SpannedToken, ParseError>`; after the first error it yields nothing more.
//!
//!     Brace balance is checked here, not in the parser: a `}` closing nothing fails at that `}`,
//!     and a `{` still open when the input ends fails at the end-of-input position. Since the
//!     parser needs the complete token stream anyway, [tokenize] collects it eagerly.
//!
//!     A lexer is cheap to clone, and [Lexer::new] over the same source always replays the same
//!     sequence.

use crate::moire::ast::error::{ParseError, ParseResult};
use crate::moire::ast::range::{Position, SourceLocation};
use crate::moire::token::{RawToken, SpannedToken, Token, COMMAND_MARKER};
use logos::Logos;

#[derive(Clone)]
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, RawToken>,
    location: SourceLocation<'src>,
    open_groups: Vec<Position>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: RawToken::lexer(source),
            location: SourceLocation::new(source),
            open_groups: Vec::new(),
            finished: false,
        }
    }

    fn fail(&mut self, error: ParseError) -> Option<ParseResult<SpannedToken>> {
        self.finished = true;
        Some(Err(error))
    }
}

impl Iterator for Lexer<'_> {
    type Item = ParseResult<SpannedToken>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let raw = match self.inner.next() {
            Some(raw) => raw,
            None => {
                self.finished = true;
                return self.open_groups.last().copied().map(|opened| {
                    Err(ParseError::syntax(
                        format!("unclosed argument group opened at {}", opened),
                        self.location.end(),
                    ))
                });
            }
        };

        let span = self.inner.span();
        let slice = self.inner.slice();
        let position = self.location.byte_to_position(span.start);

        let token = match raw {
            Ok(RawToken::Command) => Token::CommandStart(slice[1..].to_string()),
            Ok(RawToken::Escape) => {
                Token::Escape(slice[1..].chars().next().unwrap_or(COMMAND_MARKER))
            }
            Ok(RawToken::Open) => {
                self.open_groups.push(position);
                Token::ArgOpen
            }
            Ok(RawToken::Close) => {
                if self.open_groups.pop().is_none() {
                    return self.fail(ParseError::syntax(
                        "unmatched '}' closes no argument group",
                        position,
                    ));
                }
                Token::ArgClose
            }
            Ok(RawToken::Text) => Token::Text(slice.to_string()),
            Err(()) => {
                let message = if slice.starts_with(COMMAND_MARKER) {
                    "malformed command marker: '\\' must be followed by a command name or one of '\\', '{', '}'"
                        .to_string()
                } else {
                    format!("unexpected input {:?}", slice)
                };
                return self.fail(ParseError::syntax(message, position));
            }
        };

        Some(Ok(SpannedToken::new(token, position, span)))
    }
}

/// Lex a whole document, stopping at the first error
pub fn tokenize(source: &str) -> ParseResult<Vec<SpannedToken>> {
    let tokens: ParseResult<Vec<_>> = Lexer::new(source).collect();
    if let Ok(tokens) = &tokens {
        log::debug!("lexed {} tokens", tokens.len());
    }
    tokens
}
