//! CLI-specific transforms
//!
//! This module defines the inspection views available in the CLI. Each transform is a stage +
//! format combination (e.g. "token-json", "ast-treeviz").

use moire_parser::moire::formats::{
    ast_to_json, ast_to_yaml, to_treeviz_str_with_linum, tokens_to_json,
};
use moire_parser::moire::lexing::tokenize;
use moire_parser::parse_document;

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] = &["token-json", "ast-json", "ast-yaml", "ast-treeviz"];

/// Execute a named transform on a source text
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    show_line_numbers: bool,
) -> Result<String, String> {
    match transform_name {
        "token-json" => {
            let tokens = tokenize(source).map_err(|e| format!("Transform failed: {}", e))?;
            tokens_to_json(&tokens).map_err(|e| format!("JSON serialization failed: {}", e))
        }
        "ast-json" => {
            let doc = parse_document(source).map_err(|e| format!("Transform failed: {}", e))?;
            ast_to_json(&doc).map_err(|e| format!("JSON serialization failed: {}", e))
        }
        "ast-yaml" => {
            let doc = parse_document(source).map_err(|e| format!("Transform failed: {}", e))?;
            ast_to_yaml(&doc).map_err(|e| format!("YAML serialization failed: {}", e))
        }
        "ast-treeviz" => {
            let doc = parse_document(source).map_err(|e| format!("Transform failed: {}", e))?;
            Ok(to_treeviz_str_with_linum(&doc, show_line_numbers))
        }
        _ => Err(format!(
            "Unknown transform: {} (available: {})",
            transform_name,
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}
