//! # moire-parser
//!
//! Lexer, parser and command registry for the moire markup format.
//!
//! Moire is a small command markup: a backslash introduces a command, braces delimit its
//! arguments, and everything else is text.
//!
//!     \2 {Code style} {code-style}
//!
//!     We format with \m {rustfmt}; see \ref {https://rust-lang.github.io/rustfmt} {its docs}.
//!
//!     \list
//!         {run \m {cargo fmt}}
//!         {run \m {cargo test}}
//!
//! Pipeline
//!
//!     source ─ lexing ─▶ tokens ─ parsing ─▶ Document
//!
//!     Lexing (see [moire::lexing]) is the only stage that sees raw text; it checks brace balance
//!     and tracks positions. Parsing (see [moire::parsing]) resolves commands against the
//!     [registry](moire::registry) and enforces arity. The resulting
//!     [Document](moire::ast::Document) is immutable and is what renderers consume.
//!
//! Rendering to publication dialects lives in the moire-babel crate.

pub mod moire;

pub use moire::ast::{Document, ParseError, Position};
pub use moire::parsing::parse_document;
