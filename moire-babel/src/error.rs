//! Error types for rendering and publishing

use moire_parser::{ParseError, Position};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while rendering a document to one output format
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),

    #[error("{position}: \\{command} has no rendering rule for {dialect}")]
    UnsupportedCommand {
        command: String,
        dialect: String,
        position: Position,
    },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormatError {
    pub fn position(&self) -> Option<Position> {
        match self {
            FormatError::UnsupportedCommand { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Errors raised by the publishing driver, each tied to the source document it concerns
#[derive(Debug, Error)]
pub enum PublishError {
    /// The document did not lex or parse; nothing was rendered for it
    #[error("{}:{error}", .path.display())]
    Parse { path: PathBuf, error: ParseError },

    /// One dialect failed; other dialects of the same document are unaffected
    #[error("{}", render_message(.path, .dialect, .error))]
    Render {
        path: PathBuf,
        dialect: String,
        error: FormatError,
    },

    /// Reading the source or writing an output failed
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A requested dialect does not exist; raised before any document is read
    #[error("unknown output format '{0}'")]
    UnknownDialect(String),
}

/// `path:line:col: message` when the error has a position (the message names the dialect),
/// `path: dialect: message` otherwise
fn render_message(path: &Path, dialect: &str, error: &FormatError) -> String {
    match error.position() {
        Some(_) => format!("{}:{}", path.display(), error),
        None => format!("{}: {}: {}", path.display(), dialect, error),
    }
}

impl PublishError {
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            PublishError::Parse { path, .. }
            | PublishError::Render { path, .. }
            | PublishError::Io { path, .. } => Some(path),
            PublishError::UnknownDialect(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_has_path_and_position() {
        let err = PublishError::Parse {
            path: PathBuf::from("docs/guide.moi"),
            error: ParseError::UnknownCommand {
                name: "zap".to_string(),
                position: Position::new(3, 5),
            },
        };
        assert_eq!(err.to_string(), "docs/guide.moi:3:5: unknown command \\zap");
    }

    #[test]
    fn test_render_error_display() {
        let err = PublishError::Render {
            path: PathBuf::from("a.moi"),
            dialect: "wiki".to_string(),
            error: FormatError::UnsupportedCommand {
                command: "code".to_string(),
                dialect: "wiki".to_string(),
                position: Position::new(2, 1),
            },
        };
        assert_eq!(err.to_string(), "a.moi:2:1: \\code has no rendering rule for wiki");
    }

    #[test]
    fn test_render_error_without_position_names_dialect() {
        let err = PublishError::Render {
            path: PathBuf::from("a.moi"),
            dialect: "html".to_string(),
            error: FormatError::FormatNotFound("html".to_string()),
        };
        assert_eq!(err.to_string(), "a.moi: html: format 'html' not found");
    }

    #[test]
    fn test_io_error_carries_path_only() {
        let err = PublishError::Io {
            path: PathBuf::from("missing.moi"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "missing.moi: not found");
        assert_eq!(err.path(), Some(&PathBuf::from("missing.moi")));
    }
}
