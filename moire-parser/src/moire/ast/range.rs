//! Position and location tracking for source locations
//!
//! This module defines the data structures for representing positions in moire sources, as well
//! as utilities for converting byte offsets to line/column positions.
//!
//! ## Types
//!
//! - [`Position`] - A 1-based line:column position
//! - [`SourceLocation`] - Utility for converting byte offsets to positions
//!
//! ## Key Design
//!
//! - **1-based**: lines and columns both start at 1, so a position can be shown to a user as-is
//! - **Columns count characters**: a multi-byte UTF-8 character advances the column by one
//! - **Efficient conversion**: O(log n) binary search over line starts
//!
//! The lexer produces `(Token, byte range)` pairs from logos and converts the start of each range
//! through a [`SourceLocation`] built once per document.

use serde::Serialize;
use std::fmt;

/// A position in a moire source (1-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// Provides fast conversion from byte offsets to line/column positions
#[derive(Debug, Clone)]
pub struct SourceLocation<'src> {
    source: &'src str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'src> SourceLocation<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Offsets past the end of the source clamp to the end-of-input position.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let byte_offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        let line_start = self.line_starts[line];
        let column = self.source[line_start..byte_offset].chars().count();

        Position::new(line + 1, column + 1)
    }

    /// The position one past the last character of the source
    pub fn end(&self) -> Position {
        self.byte_to_position(self.source.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 7).to_string(), "3:7");
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 5) < Position::new(2, 1));
        assert!(Position::new(2, 1) < Position::new(2, 3));
    }

    #[test]
    fn test_first_character_is_one_one() {
        let loc = SourceLocation::new("abc");
        assert_eq!(loc.byte_to_position(0), Position::new(1, 1));
    }

    #[test]
    fn test_newline_resets_column() {
        let loc = SourceLocation::new("ab\ncd\n\nef");
        assert_eq!(loc.byte_to_position(1), Position::new(1, 2));
        assert_eq!(loc.byte_to_position(3), Position::new(2, 1));
        assert_eq!(loc.byte_to_position(6), Position::new(3, 1));
        assert_eq!(loc.byte_to_position(8), Position::new(4, 2));
    }

    #[test]
    fn test_columns_count_characters() {
        let loc = SourceLocation::new("héllo");
        // 'l' sits after a two-byte character
        assert_eq!(loc.byte_to_position(3), Position::new(1, 3));
    }

    #[test]
    fn test_end_position() {
        let loc = SourceLocation::new("ab\ncd");
        assert_eq!(loc.end(), Position::new(2, 3));

        let loc = SourceLocation::new("ab\n");
        assert_eq!(loc.end(), Position::new(2, 1));

        let loc = SourceLocation::new("");
        assert_eq!(loc.end(), Position::new(1, 1));
    }
}
