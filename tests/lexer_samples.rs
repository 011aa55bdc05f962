//! Integration tests for the lexer using representative schema sources.
//!
//! These tests assert exact token sequences for the layout behaviors that
//! matter to the parser: indentation structure, bracket free-form regions,
//! raw-string blocks, and keyword/literal disambiguation.

use rstest::rstest;
use sdl_lexer::sdl::lexing::{lex, Keyword, LexError, Lexer, Position, Token, TokenKind};

fn collect(source: &str) -> Vec<Token> {
    lex(source, "sample.sdl")
        .collect::<Result<Vec<_>, _>>()
        .expect("lex failed")
}

/// Token kinds with trivia stripped, which is how the parser sees the stream.
fn significant(source: &str) -> Vec<TokenKind> {
    collect(source)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

#[test]
fn test_bracketed_body_is_free_form() {
    // Entering `{` switches to the whitespace-insensitive state, so the
    // body line produces no INDENT/DEDENT/NL despite its layout; `}`
    // switches back, and no INDENT was ever pushed inside the brackets.
    let src = "type Foo {\n    required property x -> str\n}\n";
    assert_eq!(
        significant(src),
        vec![
            TokenKind::Ident, // type
            TokenKind::Ident, // Foo
            TokenKind::LCBracket,
            TokenKind::Ident, // required
            TokenKind::Ident, // property
            TokenKind::Ident, // x
            TokenKind::Arrow,
            TokenKind::Ident, // str
            TokenKind::RCBracket,
            TokenKind::Nl,
        ]
    );
}

#[test]
fn test_parenthesized_group_suppresses_layout() {
    let src = "index foo(\n        a,\n    b\n)\n";
    let toks = collect(src);
    // Arbitrary newlines and varying leading whitespace between the
    // brackets never produce structure tokens.
    let inner: Vec<_> = toks
        .iter()
        .skip_while(|t| t.kind != TokenKind::LParen)
        .take_while(|t| t.kind != TokenKind::RParen)
        .map(|t| t.kind)
        .collect();
    assert!(inner
        .iter()
        .all(|k| !matches!(k, TokenKind::Indent | TokenKind::Dedent | TokenKind::Nl)));
}

#[test]
fn test_turnstile_with_same_line_value() {
    let src = "abstract link foo:\n    bar := 1\n";
    assert_eq!(
        significant(src),
        vec![
            TokenKind::Keyword(Keyword::Abstract),
            TokenKind::Keyword(Keyword::Link),
            TokenKind::Ident, // foo
            TokenKind::Colon,
            TokenKind::Nl,
            TokenKind::Indent, // the `bar` line indents the code layout
            TokenKind::Ident,  // bar
            TokenKind::Turnstile,
            TokenKind::RawStr, // the rest of the `:=` line
            TokenKind::Nl,
            TokenKind::Dedent, // end of input restores the stack to [0]
        ]
    );
    let raw = collect(src)
        .into_iter()
        .find(|t| t.kind == TokenKind::RawStr)
        .expect("raw string token");
    assert_eq!(raw.text, " 1");
}

#[test]
fn test_raw_block_round_trip() {
    // The concatenated RAWSTRING texts equal the block body with the
    // block's common leading indentation stripped.
    let src = "bar :=\n    first line\n\n    second line\n";
    let toks = collect(src);
    let body: String = toks
        .iter()
        .filter(|t| t.kind == TokenKind::RawStr)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(body, "first line\n\nsecond line\n");
}

#[test]
fn test_raw_block_exits_on_dedent() {
    let src = "a:\n    b :=\n        val\n    c\n";
    assert_eq!(
        significant(src),
        vec![
            TokenKind::Ident, // a
            TokenKind::Colon,
            TokenKind::Nl,
            TokenKind::Indent,
            TokenKind::Ident, // b
            TokenKind::Turnstile,
            TokenKind::Nl,
            TokenKind::Indent,
            TokenKind::RawLeadWs,
            TokenKind::RawStr, // "val"
            TokenKind::RawStr, // "\n"
            TokenKind::Nl,
            TokenKind::Dedent, // leaves the raw block...
            TokenKind::Ident,  // ...and `c` is ordinary code again
            TokenKind::Nl,
            TokenKind::Dedent,
        ]
    );
}

#[test]
fn test_raw_block_closed_by_eof() {
    let src = "a :=\n    v";
    assert_eq!(
        significant(src),
        vec![
            TokenKind::Ident,
            TokenKind::Turnstile,
            TokenKind::Nl,
            TokenKind::Indent,
            TokenKind::RawLeadWs,
            TokenKind::RawStr,
            TokenKind::Nl,
            TokenKind::Dedent,
        ]
    );
}

#[test]
fn test_keyword_precedence_over_ident() {
    // Exact keyword spellings always win over the identifier rule.
    let toks = collect("abstract abstracted");
    assert_eq!(toks[0].kind, TokenKind::Keyword(Keyword::Abstract));
    assert_eq!(toks[2].kind, TokenKind::Ident);
    assert_eq!(toks[2].text, "abstracted");
}

#[test]
fn test_comments_never_open_a_line() {
    let src = "a:\n    # indented comment\n    b\n";
    assert_eq!(
        significant(src),
        vec![
            TokenKind::Ident,
            TokenKind::Colon,
            TokenKind::Nl,
            TokenKind::Indent, // pushed at `b`, not at the comment
            TokenKind::Ident,
            TokenKind::Nl,
            TokenKind::Dedent,
        ]
    );
}

#[rstest]
#[case("10", TokenKind::IConst)]
#[case("1.", TokenKind::FConst)]
#[case(".5", TokenKind::FConst)]
#[case("1e3", TokenKind::FConst)]
#[case("1.5e-2", TokenKind::FConst)]
#[case("'text'", TokenKind::Str)]
#[case("$$raw body$$", TokenKind::Str)]
#[case("name", TokenKind::Ident)]
#[case("1*", TokenKind::Mapping)]
#[case("::", TokenKind::DoubleColon)]
#[case("->", TokenKind::Arrow)]
fn test_literal_kinds(#[case] src: &str, #[case] expected: TokenKind) {
    let toks = collect(src);
    assert_eq!(toks[0].kind, expected);
    assert_eq!(toks[0].text, src);
}

#[test]
fn test_double_dot_is_a_lexical_error() {
    let err = lex("1..2", "nums.sdl")
        .collect::<Result<Vec<_>, _>>()
        .expect_err("1..2 must not lex");
    assert_eq!(
        err,
        LexError::UnknownToken {
            text: "1".to_string(),
            line: 1,
            column: 1,
            source_name: "nums.sdl".to_string(),
        }
    );
}

#[test]
fn test_unindent_to_unrecorded_level() {
    // Levels pushed are 0 and 8; column 5 matches neither. The error sits
    // at the offending line's first non-blank token.
    let err = lex("a:\n        b\n    c\n", "indent.sdl")
        .collect::<Result<Vec<_>, _>>()
        .expect_err("bad unindent must fail");
    assert_eq!(
        err,
        LexError::Indentation {
            message: "Incorrect unindent".to_string(),
            line: 3,
            column: 5,
            source_name: "indent.sdl".to_string(),
        }
    );
}

#[test]
fn test_raw_block_requires_indent() {
    let err = lex("a :=\nnope\n", "raw.sdl")
        .collect::<Result<Vec<_>, _>>()
        .expect_err("unindented raw content must fail");
    assert!(matches!(
        err,
        LexError::Indentation { ref message, line: 2, .. } if message == "Incorrect indentation"
    ));
}

#[test]
fn test_positions_are_one_based_and_exact() {
    let toks = collect("atom x:\n    y\n");
    assert_eq!(toks[0].start, Position { line: 1, column: 1 });
    assert_eq!(toks[0].end, Position { line: 1, column: 5 });
    let y = toks
        .iter()
        .find(|t| t.kind == TokenKind::Ident && t.text == "y")
        .expect("y token");
    assert_eq!(y.start, Position { line: 2, column: 5 });
}

#[test]
fn test_custom_keyword_table_changes_precedence() {
    // The keyword table is configuration; under an empty table every word
    // is an identifier.
    let lexer = Lexer::with_keywords(&[]);
    let toks: Vec<_> = lexer
        .tokens("abstract link", "custom.sdl")
        .collect::<Result<Vec<_>, _>>()
        .expect("lex failed");
    assert!(toks
        .iter()
        .filter(|t| !t.kind.is_trivia() && !t.kind.is_synthetic())
        .all(|t| t.kind == TokenKind::Ident));
}

#[test]
fn test_nested_schema_document() {
    let src = "\
concept Named:\n    atom name extending str\n\nconcept User extending Named:\n    link friends to User:\n        mapping := **\n";
    let toks = collect(src);
    let indents = toks.iter().filter(|t| t.kind == TokenKind::Indent).count();
    let dedents = toks.iter().filter(|t| t.kind == TokenKind::Dedent).count();
    assert_eq!(indents, dedents);
    // The `:= **` value lexes as raw text, not as a MAPPING token.
    let raw: Vec<_> = toks
        .iter()
        .filter(|t| t.kind == TokenKind::RawStr)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(raw, vec![" **"]);
    assert!(!toks.iter().any(|t| t.kind == TokenKind::Mapping));
}
