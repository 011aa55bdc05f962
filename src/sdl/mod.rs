//! The sdl domain: the token model and the lexing pipeline.
//!
//! Layout follows the usual split for this kind of code: `token` holds the
//! immutable value types shared by the lexer and its consumers, `lexing`
//! holds the rule tables, the layout machinery and the scanner driver.

pub mod lexing;
pub mod token;
