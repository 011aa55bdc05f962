//! Indentation layout synthesis.
//!
//!     This module turns raw lexical tokens into the indentation-aware
//!     stream the parser expects. The scanner feeds every raw token through
//!     [Layout::process], which yields zero or more tokens: any synthetic
//!     INDENT/DEDENT/NL derived from the token, then the token itself, in
//!     that order. Non-layout tokens pass through untouched.
//!
//!     There is exactly one indent stack per lex pass and both layout
//!     systems share it: code layout (WsSensitive) measures indentation as
//!     the start column of the first significant token of a line, while
//!     raw-string layout (RawString) measures it as the character count of
//!     a leading-whitespace token. Sharing the stack is what makes leaving
//!     a raw block restore the enclosing code indentation correctly.
//!
//!     WsInsensitive deliberately does nothing here: inside bracketed
//!     groups newlines and leading whitespace are plain trivia.
//!
//! Logical lines
//!
//!     A logical line runs from its first significant token to the physical
//!     newline that ends it, at which point an NL is synthesized and the
//!     line closes. Indentation is only examined while no logical line is
//!     open, and whitespace/comments/newlines never open one.

use std::collections::VecDeque;
use std::sync::Arc;

use super::common::LexError;
use super::rules::LexerState;
use crate::sdl::token::{Position, Token, TokenKind};

/// The stack of indentation widths.
///
/// Always non-empty with 0 at the bottom; strictly increasing bottom to top
/// within one nesting region. Owned by the active scan and reset per lex
/// pass.
#[derive(Debug)]
pub(crate) struct IndentStack {
    levels: Vec<usize>,
}

impl IndentStack {
    pub fn new() -> Self {
        IndentStack { levels: vec![0] }
    }

    pub fn top(&self) -> usize {
        self.levels.last().copied().unwrap_or(0)
    }

    pub fn push(&mut self, level: usize) {
        self.levels.push(level);
    }

    /// Pop one level; the bottom 0 is never removed.
    pub fn pop(&mut self) {
        if self.levels.len() > 1 {
            self.levels.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }
}

/// The layout synthesizer: indent stack, logical-line flag, and the one-shot
/// state override requested when a raw-string block dedents back into code.
#[derive(Debug)]
pub(crate) struct Layout {
    indent: IndentStack,
    logical_line_started: bool,
    pending_state: Option<LexerState>,
}

impl Layout {
    pub fn new() -> Self {
        Layout {
            indent: IndentStack::new(),
            // True at start of input guards against indenting the very
            // first line.
            logical_line_started: true,
            pending_state: None,
        }
    }

    /// Take the one-shot state override, clearing it.
    pub fn take_pending_state(&mut self) -> Option<LexerState> {
        self.pending_state.take()
    }

    #[cfg(test)]
    pub fn stack_depth(&self) -> usize {
        self.indent.depth()
    }

    /// Process one raw token, pushing its synthesized tokens and then the
    /// token itself onto `out`.
    pub fn process(
        &mut self,
        state: LexerState,
        token: Token,
        out: &mut VecDeque<Token>,
    ) -> Result<(), LexError> {
        let raw_kind = token.kind;
        let mut token = token;

        if state == LexerState::WsSensitive
            && !self.logical_line_started
            && !raw_kind.is_trivia()
        {
            // Potential indentation change at the first significant token
            // of a line.
            let last_indent = self.indent.top();
            let cur_indent = token.start.column.saturating_sub(1);

            if cur_indent > last_indent {
                self.indent.push(cur_indent);
                out.push_back(Token::synthetic(
                    TokenKind::Indent,
                    token.start,
                    &token.source_name,
                ));
            } else if cur_indent < last_indent {
                while self.indent.top() > cur_indent {
                    self.indent.pop();
                    if self.indent.top() < cur_indent {
                        // The target column was never pushed.
                        return Err(LexError::indentation(
                            "Incorrect unindent",
                            token.start,
                            &token.source_name,
                        ));
                    }
                    out.push_back(Token::synthetic(
                        TokenKind::Dedent,
                        token.start,
                        &token.source_name,
                    ));
                }
            }
        } else if state == LexerState::RawString {
            let last_indent = self.indent.top();
            let cur_indent = token.text.chars().count();

            if !self.logical_line_started && raw_kind != TokenKind::Newline {
                // The block body must indent past the enclosing level.
                if raw_kind == TokenKind::RawLeadWs && cur_indent > last_indent {
                    self.indent.push(cur_indent);
                    // The raw content begins where the whitespace ends.
                    out.push_back(Token::synthetic(
                        TokenKind::Indent,
                        token.end,
                        &token.source_name,
                    ));
                } else if !token.text.trim().is_empty() {
                    return Err(LexError::indentation(
                        "Incorrect indentation",
                        token.end,
                        &token.source_name,
                    ));
                }
            } else if raw_kind == TokenKind::RawLeadWs && cur_indent < last_indent {
                // Dedent inside the raw block: close the logical line, then
                // unwind to the new width.
                out.push_back(Token::synthetic(
                    TokenKind::Nl,
                    token.start,
                    &token.source_name,
                ));
                while self.indent.top() > cur_indent {
                    self.indent.pop();
                    if self.indent.top() < cur_indent {
                        return Err(LexError::indentation(
                            "Incorrect unindent",
                            token.end,
                            &token.source_name,
                        ));
                    }
                    out.push_back(Token::synthetic(
                        TokenKind::Dedent,
                        token.end,
                        &token.source_name,
                    ));
                }
                // This whitespace is no longer raw content: it is the first
                // whitespace of ordinary code. Tokens are immutable, so a
                // fresh WS token is built from the same span.
                self.pending_state = Some(LexerState::WsSensitive);
                token = Token {
                    kind: TokenKind::Ws,
                    ..token
                };
            }
        }

        if self.logical_line_started
            && matches!(state, LexerState::WsSensitive | LexerState::RawString)
            && raw_kind == TokenKind::Newline
        {
            out.push_back(Token::synthetic(
                TokenKind::Nl,
                token.start,
                &token.source_name,
            ));
            self.logical_line_started = false;
        } else if !raw_kind.is_trivia() {
            self.logical_line_started = true;
        }

        out.push_back(token);
        Ok(())
    }

    /// Emit the EOF-closing tokens: a final NL if a logical line is still
    /// open, then one DEDENT per remaining level until the stack is `[0]`.
    pub fn finish(&mut self, at: Position, source_name: &Arc<str>, out: &mut VecDeque<Token>) {
        if self.logical_line_started {
            out.push_back(Token::synthetic(TokenKind::Nl, at, source_name));
            self.logical_line_started = false;
        }
        while self.indent.depth() > 1 {
            self.indent.pop();
            out.push_back(Token::synthetic(TokenKind::Dedent, at, source_name));
        }
    }
}
