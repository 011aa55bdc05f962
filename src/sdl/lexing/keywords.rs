//! The keyword table.
//!
//!     The keyword table is configuration: a mapping from exact literal
//!     spelling to keyword kind, compiled into the rule tables ahead of the
//!     generic identifier rule so keyword spellings always win over
//!     identifiers of the same text. A custom table can be supplied through
//!     [Lexer::with_keywords](super::scanner::Lexer::with_keywords); this
//!     module only ships the default.
//!
//!     Words like `required`, `property` and `type` are deliberately absent:
//!     they are position-dependent in the grammar and are resolved by the
//!     parser from plain identifiers.

use crate::sdl::token::Keyword;

/// The default spelling -> keyword mapping for sdl schemas.
pub const DEFAULT_KEYWORDS: &[(&str, Keyword)] = &[
    ("abstract", Keyword::Abstract),
    ("action", Keyword::Action),
    ("atom", Keyword::Atom),
    ("attribute", Keyword::Attribute),
    ("concept", Keyword::Concept),
    ("constraint", Keyword::Constraint),
    ("event", Keyword::Event),
    ("extending", Keyword::Extending),
    ("final", Keyword::Final),
    ("index", Keyword::Index),
    ("link", Keyword::Link),
    ("on", Keyword::On),
    ("to", Keyword::To),
];
