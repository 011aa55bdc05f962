//! Lexer
//!
//!     This module turns sdl source text into the token stream consumed by
//!     the schema parser. Scanning is rule-driven: each lexer state owns an
//!     ordered rule table (see [rules]) and the first rule that matches at
//!     the cursor wins. On top of that sits the layout machinery (see
//!     [layout]), which reinterprets physical newlines and whitespace as
//!     INDENT/DEDENT/NL structure tokens depending on the active state.
//!
//! States
//!
//!     Scanning starts whitespace-sensitive. Opening a bracket switches to
//!     the whitespace-insensitive state, where bracketed groups may be
//!     formatted freely across lines; the closing bracket switches back.
//!     The `:=` turnstile enters the raw-string state, which has its own
//!     small rule table and its own indentation rules, sharing the one
//!     indent stack with code layout so that leaving the block restores the
//!     enclosing indentation.
//!
//! The Stream
//!
//!     [lex] (or [Lexer::tokens] for custom keyword tables) returns a lazy
//!     iterator of `Result<Token, LexError>`. Tokens appear in strict
//!     source order; one raw match can yield several tokens because layout
//!     synthesis interleaves the structure tokens around it. Errors are
//!     fatal: the stream yields the error once and ends.

pub mod common;
pub mod keywords;
pub mod layout;
pub mod rules;
pub mod scanner;

pub use common::LexError;
pub use keywords::DEFAULT_KEYWORDS;
pub use rules::LexerState;
pub use scanner::{lex, Lexer, TokenStream};
// Re-export token types for consumers that import them from `lexing`
pub use crate::sdl::token::{Keyword, Position, Token, TokenKind};
