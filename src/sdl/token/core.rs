//! Core token types.
//!
//!     Tokens are immutable once produced. The lexer never rewrites a token
//!     in place; where a token's classification changes after the fact (the
//!     raw-string dedent exit), a fresh token is built from the same span.
//!
//!     The kind enumeration is closed. Keywords are carried as a nested
//!     closed enum rather than one variant per spelling, so the keyword
//!     table stays configuration (spelling -> kind) while the kind space
//!     stays finite for the parser.

use std::fmt;
use std::sync::Arc;

use super::position::Position;

/// Reserved words of the sdl format.
///
/// The mapping from spelling to keyword is configuration supplied to the
/// lexer (see [DEFAULT_KEYWORDS](crate::sdl::lexing::keywords::DEFAULT_KEYWORDS));
/// this enum is the closed set of kinds that mapping may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Keyword {
    Abstract,
    Action,
    Atom,
    Attribute,
    Concept,
    Constraint,
    Event,
    Extending,
    Final,
    Index,
    Link,
    On,
    To,
}

impl Keyword {
    /// The canonical spelling used by the default keyword table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Abstract => "abstract",
            Keyword::Action => "action",
            Keyword::Atom => "atom",
            Keyword::Attribute => "attribute",
            Keyword::Concept => "concept",
            Keyword::Constraint => "constraint",
            Keyword::Event => "event",
            Keyword::Extending => "extending",
            Keyword::Final => "final",
            Keyword::Index => "index",
            Keyword::Link => "link",
            Keyword::On => "on",
            Keyword::To => "to",
        }
    }
}

/// All kinds of tokens the lexer can produce.
///
/// Layout kinds deserve a note: `Newline` is the physical `\n` as matched
/// from source, while `Nl` is the synthetic logical-line terminator; `Indent`
/// and `Dedent` are synthetic block markers with empty text; `RawLeadWs` is
/// the leading whitespace of a raw-string line, whose width drives the
/// raw-string indentation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TokenKind {
    Keyword(Keyword),

    // Structural punctuation
    LParen,
    RParen,
    LSBracket,
    RSBracket,
    LCBracket,
    RCBracket,
    Comma,
    DoubleColon,
    Colon,
    Turnstile,
    Arrow,
    Mapping,
    Dot,

    // Literals
    IConst,
    FConst,
    Str,
    RawStr,
    Ident,

    // Layout
    Ws,
    Comment,
    Newline,
    Nl,
    Indent,
    Dedent,
    RawLeadWs,
}

impl TokenKind {
    /// Whitespace, comments and physical newlines never open a logical line
    /// and never participate in indentation checks.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Ws | TokenKind::Comment)
    }

    /// Synthetic layout kinds produced by the lexer rather than matched from
    /// source text.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, TokenKind::Indent | TokenKind::Dedent | TokenKind::Nl)
    }
}

/// One lexed token: kind, matched text and source coordinates.
///
/// `end` is the position one past the last character of `text`, so a
/// zero-width synthetic token has `start == end`. The source name is shared
/// across all tokens of one lex pass and is used only for diagnostics.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub start: Position,
    pub end: Position,
    pub source_name: Arc<str>,
}

impl Token {
    /// Build a zero-width synthetic token (`Indent`, `Dedent`, `Nl`) at `at`.
    pub fn synthetic(kind: TokenKind, at: Position, source_name: &Arc<str>) -> Self {
        Token {
            kind,
            text: String::new(),
            start: at,
            end: at,
            source_name: Arc::clone(source_name),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {} {:?}", self.kind, self.start, self.text)
    }
}
