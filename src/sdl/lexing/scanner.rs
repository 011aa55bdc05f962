//! The scanner driver.
//!
//!     The driver owns the whole per-pass scan state: byte cursor, source
//!     position, current lexer state, the layout synthesizer, and a queue
//!     of tokens that have been synthesized but not yet delivered. Each
//!     `next()` call either drains the queue or performs one driver step:
//!     match the current state's rule table at the cursor, build the raw
//!     token, run it through layout synthesis, then apply state
//!     transitions. A rule's own transition wins; otherwise a one-shot
//!     override requested by the synthesizer (the raw-string dedent exit)
//!     is applied and cleared.
//!
//!     Progress is guaranteed structurally: every rule match consumes at
//!     least one character, and the error alternative consumes one too, so
//!     the cursor strictly advances every step.

use std::collections::VecDeque;
use std::sync::Arc;

use super::common::LexError;
use super::layout::Layout;
use super::rules::{LexerState, RuleContext, RuleTables, DEFAULT_TABLES};
use crate::sdl::token::{Keyword, Position, Token, TokenKind};

/// The sdl lexer: compiled rule tables plus the start-token extension point.
///
/// One `Lexer` can serve any number of source units; each call to
/// [tokens](Lexer::tokens) creates an independent scan with its own cursor
/// and indent stack.
pub struct Lexer {
    tables: Arc<RuleTables>,
    start_tokens: Vec<TokenKind>,
}

impl Lexer {
    /// A lexer with the default keyword table.
    pub fn new() -> Self {
        Lexer {
            tables: Arc::clone(&DEFAULT_TABLES),
            start_tokens: Vec::new(),
        }
    }

    /// A lexer with a custom keyword table. The table is compiled once, at
    /// construction.
    pub fn with_keywords(keywords: &[(&str, Keyword)]) -> Self {
        Lexer {
            tables: Arc::new(RuleTables::build(keywords)),
            start_tokens: Vec::new(),
        }
    }

    /// Kinds to emit as zero-width tokens before any input is scanned.
    /// Empty by default; derived grammars use this to prime their parser.
    pub fn start_tokens(mut self, kinds: Vec<TokenKind>) -> Self {
        self.start_tokens = kinds;
        self
    }

    /// Lex `source`, labeled `source_name` for diagnostics.
    pub fn tokens<'a>(&self, source: &'a str, source_name: &str) -> TokenStream<'a> {
        let source_name: Arc<str> = Arc::from(source_name);
        let mut queue = VecDeque::new();
        for kind in &self.start_tokens {
            queue.push_back(Token::synthetic(*kind, Position::start(), &source_name));
        }
        TokenStream {
            src: source,
            source_name,
            tables: Arc::clone(&self.tables),
            pos: 0,
            position: Position::start(),
            state: LexerState::WsSensitive,
            layout: Layout::new(),
            queue,
            after_turnstile: false,
            pending_error: None,
            done: false,
        }
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lex `source` with the default keyword table.
pub fn lex<'a>(source: &'a str, source_name: &str) -> TokenStream<'a> {
    Lexer::new().tokens(source, source_name)
}

/// A lazy, finite, forward-only token stream over one source unit.
///
/// Yields `Ok(Token)` in strict source order (synthesized tokens interleaved
/// as the layout rules dictate), then either ends after the EOF-closing
/// tokens or yields one fatal `Err` and ends. Dropping the stream early
/// needs no cleanup.
pub struct TokenStream<'a> {
    src: &'a str,
    source_name: Arc<str>,
    tables: Arc<RuleTables>,
    pos: usize,
    position: Position,
    state: LexerState,
    layout: Layout,
    queue: VecDeque<Token>,
    after_turnstile: bool,
    pending_error: Option<LexError>,
    done: bool,
}

impl TokenStream<'_> {
    /// One driver step: match, build the raw token, synthesize, transition.
    fn step(&mut self) -> Result<(), LexError> {
        let rest = &self.src[self.pos..];
        let ctx = RuleContext {
            at_line_start: self.pos == 0 || self.src.as_bytes()[self.pos - 1] == b'\n',
            after_turnstile: self.after_turnstile,
        };

        let table = self.tables.for_state(self.state);
        let Some((rule, len)) = table.match_at(rest, &ctx) else {
            // The error alternative: one character, localized here.
            let text: String = rest.chars().take(1).collect();
            return Err(LexError::unknown_token(
                text,
                self.position,
                &self.source_name,
            ));
        };

        let text = &rest[..len];
        let start = self.position;
        let end = start.advanced(text);
        let token = Token {
            kind: rule.kind,
            text: text.to_string(),
            start,
            end,
            source_name: Arc::clone(&self.source_name),
        };

        self.pos += len;
        self.position = end;
        self.after_turnstile = rule.kind == TokenKind::Turnstile;

        let next_state = rule.next_state;
        self.layout.process(self.state, token, &mut self.queue)?;

        match next_state {
            Some(next) if next != self.state => self.state = next,
            _ => {
                if let Some(next) = self.layout.take_pending_state() {
                    self.state = next;
                }
            }
        }
        Ok(())
    }
}

impl Iterator for TokenStream<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            // Tokens synthesized before a failure are still delivered, in
            // order, ahead of the error itself.
            if let Some(token) = self.queue.pop_front() {
                return Some(Ok(token));
            }
            if let Some(err) = self.pending_error.take() {
                self.done = true;
                return Some(Err(err));
            }
            if self.done {
                return None;
            }
            if self.pos >= self.src.len() {
                self.layout
                    .finish(self.position, &self.source_name, &mut self.queue);
                self.done = true;
                continue;
            }
            if let Err(err) = self.step() {
                self.pending_error = Some(err);
            }
        }
    }
}
