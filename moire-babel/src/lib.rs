//! Multi-dialect rendering for moire documents
//!
//!     This crate turns a parsed moire [Document](moire_parser::Document) into Markdown, HTML or
//!     MediaWiki text, one document at a time or as a batch over a source tree.
//!
//! Architecture
//!
//!     - Format trait: uniform interface for all output formats
//!     - FormatRegistry: centralized discovery and selection of formats
//!     - render: the one traversal every format shares, driven by per-format rule tables
//!     - publish: single-document output and the batch build driver
//!
//!     This is a pure lib, that is, it powers the moire cli but is shell agnostic: no code here
//!     prints, reads env vars or assumes a terminal. Diagnostics go through the `log` facade.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── render                  # RenderContext, rule tables, the Dialect trait, the walker
//!     ├── formats
//!     │   └── <format>
//!     │       ├── escape.rs       # Text escaping and its inverse
//!     │       └── mod.rs          # Rule table and Format implementation
//!     ├── publish.rs
//!     └── lib.rs
//!
//! Formats Are Data
//!
//!     A format never walks the tree itself. It maps every command to a [Rule](render::Rule)
//!     with an exhaustive `match` (so a new command cannot be forgotten) and supplies its
//!     escaping. Adding a dialect means adding one rule function and one escape module.

pub mod error;
pub mod format;
pub mod formats;
pub mod publish;
pub mod registry;
pub mod render;

pub use error::{FormatError, PublishError};
pub use format::Format;
pub use publish::{build, publish, BuildReport, BuildSpec, PublishSpec};
pub use registry::FormatRegistry;
pub use render::{RenderContext, RenderOptions, Renderer};
