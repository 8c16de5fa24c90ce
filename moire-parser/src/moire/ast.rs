//! AST definitions and utilities for the moire format
//!
//!     A moire document is plain UTF-8 text in which commands mark structure:
//!
//!         \1 {Contributing} {contributing}
//!
//!         Run \m {cargo test} before sending a patch.
//!
//!     The parsed form is a [Document] (the root node) holding [Node]s. A node is either literal
//!     text or a command with argument groups, and every argument is again a node sequence.
//!
//! Location Tracking
//!
//!     The lexer pairs each token with a byte span and a 1-based [Position]. The parser copies the
//!     position of the first token of a text run, command or argument group into the node, so
//!     diagnostics raised at any later stage can still point at the source.

pub mod elements;
pub mod error;
pub mod range;

pub use elements::{Argument, CommandNode, Document, Node, TextNode};
pub use error::{format_source_context, ParseError, ParseResult};
pub use range::{Position, SourceLocation};
