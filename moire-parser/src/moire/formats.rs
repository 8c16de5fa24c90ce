//! Inspection formats for parsed documents
//!
//!     These are debugging views of the AST, not publication dialects (those live in
//!     moire-babel). JSON and YAML go through serde; treeviz is a compact drawing.

pub mod treeviz;

pub use treeviz::{to_treeviz_str, to_treeviz_str_with_linum};

use crate::moire::ast::Document;
use crate::moire::token::SpannedToken;

pub fn ast_to_json(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(doc)
}

pub fn ast_to_yaml(doc: &Document) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(doc)
}

pub fn tokens_to_json(tokens: &[SpannedToken]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tokens)
}
