//! Shared lexing error types.

use std::fmt;
use std::sync::Arc;

use crate::sdl::token::Position;

/// Errors that can occur during lexing.
///
/// Both kinds are fatal to the current lex pass: the stream yields the error
/// once and is exhausted afterwards. There is no skip-and-continue and no
/// fallback token kind; callers report the coordinates to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// Layout violation: an unindent to a level that was never pushed, or a
    /// raw-string line that failed to indent where the block required it.
    Indentation {
        message: String,
        line: usize,
        column: usize,
        source_name: String,
    },
    /// No rule matched at the cursor; carries the offending character.
    UnknownToken {
        text: String,
        line: usize,
        column: usize,
        source_name: String,
    },
}

impl LexError {
    pub(crate) fn indentation(message: &str, at: Position, source_name: &Arc<str>) -> Self {
        LexError::Indentation {
            message: message.to_string(),
            line: at.line,
            column: at.column,
            source_name: source_name.to_string(),
        }
    }

    pub(crate) fn unknown_token(text: String, at: Position, source_name: &Arc<str>) -> Self {
        LexError::UnknownToken {
            text,
            line: at.line,
            column: at.column,
            source_name: source_name.to_string(),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::Indentation {
                message,
                line,
                column,
                source_name,
            } => {
                write!(f, "{} at {}:{}:{}", message, source_name, line, column)
            }
            LexError::UnknownToken {
                text,
                line,
                column,
                source_name,
            } => {
                write!(
                    f,
                    "Unknown token {:?} at {}:{}:{}",
                    text, source_name, line, column
                )
            }
        }
    }
}

impl std::error::Error for LexError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_display() {
        let err = LexError::Indentation {
            message: "Incorrect unindent".to_string(),
            line: 7,
            column: 3,
            source_name: "schema.sdl".to_string(),
        };
        assert_eq!(err.to_string(), "Incorrect unindent at schema.sdl:7:3");
    }

    #[test]
    fn test_unknown_token_display() {
        let err = LexError::UnknownToken {
            text: "%".to_string(),
            line: 1,
            column: 12,
            source_name: "schema.sdl".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown token \"%\" at schema.sdl:1:12");
    }
}
