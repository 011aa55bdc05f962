//! # sdl-lexer
//!
//! An indentation-aware lexer for the sdl schema-definition format.
//!
//! The sdl format describes database schemas with Python-like layout: nesting
//! is expressed through indentation rather than braces, except inside
//! bracketed groups, where layout is free-form. Declarations may also attach
//! multi-line raw bodies with the `:=` turnstile, and those bodies follow
//! their own indentation rules while sharing the surrounding block structure.
//!
//! This crate covers tokenization only: it turns source text into a stream of
//! position-annotated tokens (including the synthetic `INDENT`/`DEDENT`/`NL`
//! structure tokens) for a downstream grammar-driven parser. Parsing, AST
//! construction and schema validation live elsewhere.
//!
//! See the [lexing module](crate::sdl::lexing) for the pipeline design.

pub mod sdl;
