//! Format trait definition
//!
//! This module defines the Format trait that every output format implements. A format is a
//! [Dialect] (rules and text conventions) plus what the driver needs to publish it: a
//! description and the extension of the files it writes.

use crate::error::FormatError;
use crate::render::{Dialect, Renderer};
use moire_parser::Document;

/// Trait for output formats
///
/// # Examples
///
/// ```ignore
/// let format = MarkdownFormat::default();
/// let text = format.serialize(&document)?;
/// ```
pub trait Format: Dialect {
    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// Extension of written files, without the dot
    fn file_extension(&self) -> &str;

    /// This format as a plain dialect, for the renderer
    fn as_dialect(&self) -> &dyn Dialect;

    /// Serialize a document into this format
    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Renderer::new(self.as_dialect()).render_to_string(doc)
    }
}
