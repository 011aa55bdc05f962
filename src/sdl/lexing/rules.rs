//! Rule tables and pattern compilation.
//!
//!     Each lexer state owns an ordered list of rules. A rule is a
//!     `\A`-anchored regex plus the token kind it produces and an optional
//!     state transition. Matching tries the rules strictly in declaration
//!     order and the first one that fires wins; this is NOT longest-match.
//!     Keyword rules are declared ahead of the identifier rule precisely so
//!     exact keyword spellings beat identifiers of the same text, and the
//!     two float rules rely on the same ordering for their overlap.
//!
//!     Two rule attributes stand in for zero-width regex assertions, which
//!     keeps every pattern a plain regular expression:
//!
//!         - An anchor condition (line start / just after `:=`) gates the
//!           rule on cursor facts the driver tracks anyway.
//!         - A trailing-context check runs after the pattern and can reject
//!           the match, letting the next rule have a go. This is how the
//!           integer rule refuses to eat the front of a float.
//!
//!     When no rule fires, the synthetic error alternative covers exactly
//!     one character, which localizes the unknown-token error at the cursor.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::keywords::DEFAULT_KEYWORDS;
use crate::sdl::token::{Keyword, TokenKind};

/// The scanning mode of the lexer.
///
/// `WsSensitive` is the initial state and tracks indentation.
/// `WsInsensitive` is active inside bracketed groups, where layout is
/// free-form. `RawString` is active inside a `:=` raw body, which has its own
/// indentation rules and must not be tokenized as code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerState {
    WsSensitive,
    WsInsensitive,
    RawString,
}

/// Cursor facts a rule may require before its pattern is tried.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RuleContext {
    pub at_line_start: bool,
    pub after_turnstile: bool,
}

#[derive(Debug, Clone, Copy)]
enum Anchor {
    Anywhere,
    LineStart,
    AfterTurnstile,
}

impl Anchor {
    fn permits(self, ctx: &RuleContext) -> bool {
        match self {
            Anchor::Anywhere => true,
            Anchor::LineStart => ctx.at_line_start,
            Anchor::AfterTurnstile => ctx.after_turnstile,
        }
    }
}

/// Trailing-context restriction applied after the pattern matches.
#[derive(Debug, Clone, Copy)]
enum Trailing {
    None,
    /// Reject when the next character is `[eE.0-9]`: an integer must not run
    /// into an exponent or a fraction dot.
    IntBoundary,
    /// Reject a match ending in `.` when another `.` follows, so `1..2`
    /// stays a lexical error instead of lexing as the float `1.`.
    NoDoubleDot,
}

impl Trailing {
    fn accepts(self, text: &str, next: Option<char>) -> bool {
        match self {
            Trailing::None => true,
            Trailing::IntBoundary => match next {
                Some(c) => !(c == 'e' || c == 'E' || c == '.' || c.is_ascii_digit()),
                None => true,
            },
            Trailing::NoDoubleDot => !(text.ends_with('.') && next == Some('.')),
        }
    }
}

enum Matcher {
    /// A `\A`-anchored pattern matched at the cursor.
    Pattern(Regex),
    /// A `$tag$` opener; the match extends to the identical closing tag on
    /// the same line. String bodies cannot cross newlines.
    DollarQuoted(Regex),
}

impl Matcher {
    fn match_len(&self, rest: &str) -> Option<usize> {
        match self {
            Matcher::Pattern(re) => re.find(rest).map(|m| m.end()),
            Matcher::DollarQuoted(re) => {
                let opener = re.find(rest)?;
                let tag = &rest[..opener.end()];
                let line_end = rest.find('\n').unwrap_or(rest.len());
                let body = rest.get(opener.end()..line_end)?;
                let close = body.find(tag)?;
                Some(opener.end() + close + tag.len())
            }
        }
    }
}

/// One lexing rule: pattern, produced kind, optional state transition.
pub(crate) struct Rule {
    pub kind: TokenKind,
    /// `None` means keep the current state.
    pub next_state: Option<LexerState>,
    matcher: Matcher,
    anchor: Anchor,
    trailing: Trailing,
}

impl Rule {
    fn new(kind: TokenKind, pattern: &str, next_state: Option<LexerState>) -> Self {
        Rule {
            kind,
            next_state,
            matcher: Matcher::Pattern(compile(pattern)),
            anchor: Anchor::Anywhere,
            trailing: Trailing::None,
        }
    }

    fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    fn trailing(mut self, trailing: Trailing) -> Self {
        self.trailing = trailing;
        self
    }

    fn dollar_quoted(kind: TokenKind, opener: &str) -> Self {
        Rule {
            kind,
            next_state: None,
            matcher: Matcher::DollarQuoted(compile(opener)),
            anchor: Anchor::Anywhere,
            trailing: Trailing::None,
        }
    }
}

// Rule patterns are static strings (keyword spellings are escaped), so a
// compile failure is a bug in this module, not an input condition.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// The ordered rule list of one lexer state.
pub(crate) struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// First-match-wins lookup at the cursor. Returns the winning rule and
    /// the byte length of the matched text, or `None` when only the error
    /// alternative would fire.
    pub fn match_at(&self, rest: &str, ctx: &RuleContext) -> Option<(&Rule, usize)> {
        for rule in &self.rules {
            if !rule.anchor.permits(ctx) {
                continue;
            }
            let Some(len) = rule.matcher.match_len(rest) else {
                continue;
            };
            if !rule.trailing.accepts(&rest[..len], rest[len..].chars().next()) {
                continue;
            }
            return Some((rule, len));
        }
        None
    }
}

/// The compiled rule tables of all three states.
///
/// `WsSensitive` and `WsInsensitive` share one list: the states differ only
/// in how the layout synthesizer treats their tokens. `RawString` uses an
/// entirely separate, small list because raw content must not be tokenized
/// as code.
pub(crate) struct RuleTables {
    common: RuleTable,
    raw: RuleTable,
}

impl RuleTables {
    pub fn for_state(&self, state: LexerState) -> &RuleTable {
        match state {
            LexerState::WsSensitive | LexerState::WsInsensitive => &self.common,
            LexerState::RawString => &self.raw,
        }
    }

    /// Compile the tables for a keyword table.
    pub fn build(keywords: &[(&str, Keyword)]) -> Self {
        let mut rules = Vec::new();

        // Keyword rules come first so spellings win over IDENT. Whole-word
        // matching keeps `linked` an identifier.
        for (spelling, kw) in keywords {
            rules.push(Rule::new(
                TokenKind::Keyword(*kw),
                &format!(r"\A{}\b", regex::escape(spelling)),
                None,
            ));
        }

        rules.push(Rule::new(TokenKind::Comment, r"\A#[^\n]*", None));
        rules.push(Rule::new(TokenKind::Ws, r"\A[\s--\n]+", None));
        rules.push(Rule::new(TokenKind::Newline, r"\A\n", None));

        rules.push(Rule::new(
            TokenKind::LParen,
            r"\A\(",
            Some(LexerState::WsInsensitive),
        ));
        rules.push(Rule::new(
            TokenKind::RParen,
            r"\A\)",
            Some(LexerState::WsSensitive),
        ));
        rules.push(Rule::new(
            TokenKind::LSBracket,
            r"\A\[",
            Some(LexerState::WsInsensitive),
        ));
        rules.push(Rule::new(
            TokenKind::RSBracket,
            r"\A\]",
            Some(LexerState::WsSensitive),
        ));
        rules.push(Rule::new(
            TokenKind::LCBracket,
            r"\A\{",
            Some(LexerState::WsInsensitive),
        ));
        rules.push(Rule::new(
            TokenKind::RCBracket,
            r"\A\}",
            Some(LexerState::WsSensitive),
        ));

        rules.push(Rule::new(TokenKind::Comma, r"\A,", None));
        rules.push(Rule::new(TokenKind::DoubleColon, r"\A::", None));
        rules.push(Rule::new(
            TokenKind::Turnstile,
            r"\A:=",
            Some(LexerState::RawString),
        ));
        rules.push(Rule::new(TokenKind::Colon, r"\A:", None));
        rules.push(Rule::new(TokenKind::Arrow, r"\A->", None));

        // Cardinality spellings: 11, 1*, *1, **. Declared before ICONST so
        // `11` stays a mapping.
        rules.push(Rule::new(TokenKind::Mapping, r"\A[1*][1*]", None));

        rules.push(Rule::new(TokenKind::IConst, r"\A\d+", None).trailing(Trailing::IntBoundary));
        rules.push(Rule::new(
            TokenKind::FConst,
            r"\A(?:\d+(?:\.\d*)?|\.\d+)[eE][+-]?[0-9](?:[0-9_]*[0-9])?",
            None,
        ));
        rules.push(
            Rule::new(TokenKind::FConst, r"\A(?:\d+\.\d*|\.\d+)", None)
                .trailing(Trailing::NoDoubleDot),
        );
        rules.push(Rule::new(TokenKind::Dot, r"\A\.", None));

        rules.push(Rule::new(TokenKind::Str, r"\A'[^'\n]*'", None));
        rules.push(Rule::dollar_quoted(
            TokenKind::Str,
            r"\A\$(?:[A-Za-z_\x{80}-\x{FF}][0-9]*)*\$",
        ));

        rules.push(Rule::new(
            TokenKind::Ident,
            r"\A(?:[\w--\d]|\$)(?:\w|\$)*",
            None,
        ));

        let common = RuleTable { rules };

        let raw = RuleTable {
            rules: vec![
                // Whitespace run ending in a newline, directly after `:=`:
                // the raw body starts on the following line.
                Rule::new(TokenKind::Newline, r"\A\s*\n", None)
                    .anchored(Anchor::AfterTurnstile),
                // Rest of the `:=` line: a single-line raw value.
                Rule::new(
                    TokenKind::RawStr,
                    r"\A[^\n]+",
                    Some(LexerState::WsSensitive),
                )
                .anchored(Anchor::AfterTurnstile),
                // Blank line inside the block.
                Rule::new(TokenKind::RawStr, r"\A[\s--\n]*\n", None)
                    .anchored(Anchor::LineStart),
                // Leading whitespace of a content line; its width drives the
                // raw indentation rules.
                Rule::new(TokenKind::RawLeadWs, r"\A[\s--\n]+", None)
                    .anchored(Anchor::LineStart),
                // Catch-all: line content up to the newline, or the lone
                // newline itself. Always consumes at least one character.
                Rule::new(TokenKind::RawStr, r"\A(?:\n|[^\n]+)", None),
            ],
        };

        RuleTables { common, raw }
    }
}

/// Tables for the default keyword configuration, built once.
pub(crate) static DEFAULT_TABLES: Lazy<Arc<RuleTables>> =
    Lazy::new(|| Arc::new(RuleTables::build(DEFAULT_KEYWORDS)));
