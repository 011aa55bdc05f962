//! Source positions.

use std::fmt;

/// A 1-based line/column coordinate in sdl source text.
///
/// Columns count characters, not bytes, so positions stay meaningful for
/// non-ASCII identifiers and string contents. The scanner advances one
/// position characterwise over every piece of matched text, which keeps
/// coordinates correct for tokens that contain embedded newlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The first position of a source unit.
    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }

    /// Advance over `text`, resetting the column at every newline.
    pub fn advance(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// The position reached after consuming `text` from `self`.
    pub fn advanced(mut self, text: &str) -> Self {
        self.advance(text);
        self
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
