//! Rendering engine shared by all output dialects
//!
//!     A dialect is data: a [RuleTable] saying how each command is written, plus a handful of
//!     text hooks (escaping, paragraph wrapping) on the [Dialect] trait. The [Renderer] walks the
//!     document once, depth-first and left to right, and asks the dialect for the pieces.
//!
//! Flow Layout
//!
//!     Text and inline commands accumulate into a paragraph. A blank line inside text (a newline,
//!     optional spaces or tabs, and another newline) ends the paragraph, as does any block
//!     command. Within a paragraph a whitespace run holding a newline collapses to one space.
//!     Top-level blocks are joined by one blank line and the output ends with a newline.
//!
//! State
//!
//!     Each render owns a [RenderContext]: the list nesting stack, heading counters and the
//!     output buffer. The document, the command registry and the rule tables are shared
//!     read-only, so any number of renders may run at once.

pub mod context;
pub mod dialect;
pub mod engine;
pub mod rules;
pub mod text;

pub use context::{ListFrame, RenderContext};
pub use dialect::Dialect;
pub use engine::Renderer;
pub use rules::{
    CodeBlockStyle, CodeBlockTag, CodeSpanStyle, HeadingStyle, ListStyle, Rule, RuleTable,
};

use serde::{Deserialize, Serialize};

/// Per-dialect rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Prefix headings with their hierarchical number (`1.2.`)
    pub number_headings: bool,
    /// Spaces per list nesting level, for dialects that indent nested lists
    pub indent: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            number_headings: false,
            indent: 2,
        }
    }
}
