//! Parser state / token cursor (component 7): a cursor over an already
//! tokenised buffer, the run-mode the statement dispatcher is in, the
//! pre-processor's `#if` nesting, and — in interactive mode — the linked
//! list of token-stream lines read so far.

use minic_lex::{Payload, Token, TokenKind, TokenReader};
use minic_pp::Preprocessor;
use minic_util::Symbol;

/// What the (external) statement dispatcher should do with the tokens the
/// cursor is currently yielding. Owned here because the cursor is what
/// `break`/`continue`/`goto`/`return` unwind *through* — each causes the
/// cursor to fast-forward past statements until the unwind target is
/// reached, without the cursor itself knowing what a "statement" is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Executing normally.
    Run,
    /// Skipping tokens without executing them (an inactive `#if` branch, or
    /// the untaken side of an `if`/`else`).
    Skip,
    /// Unwinding out of a function body after `return`.
    Return,
    /// Unwinding out of the innermost loop/`switch` after `break`.
    Break,
    /// Unwinding to the top of the innermost loop after `continue`.
    Continue,
    /// Searching for a label after `goto`; `search_label` names the target.
    Goto,
    /// Unwinding back to the evaluator's `call()` entry point.
    Caller,
}

/// One interactively-entered, already-tokenised input line.
pub struct TokenLine {
    pub buf: Vec<u8>,
    next: Option<Box<TokenLine>>,
}

/// Singly-linked list of `TokenLine`s, oldest first. Used only by
/// interactive (REPL) parsing: each `Interpreter::parse_interactive_line`
/// call appends one node, and `prune_before_cursor` drops every node whose
/// tokens the cursor has already fully consumed, since they can never be
/// re-entered (no backward `goto` crosses a REPL line boundary).
#[derive(Default)]
pub struct InteractiveLines {
    head: Option<Box<TokenLine>>,
}

impl InteractiveLines {
    pub fn new() -> Self {
        Self { head: None }
    }

    pub fn push(&mut self, buf: Vec<u8>) {
        let node = Box::new(TokenLine { buf, next: None });
        match &mut self.head {
            None => self.head = Some(node),
            Some(head) => {
                let mut cur = head.as_mut();
                while cur.next.is_some() {
                    cur = cur.next.as_mut().unwrap();
                }
                cur.next = Some(node);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        let mut n = 0;
        let mut cur = self.head.as_deref();
        while let Some(node) = cur {
            n += 1;
            cur = node.next.as_deref();
        }
        n
    }

    /// The lines in order, oldest first — the shape a cursor traverses.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        let mut cur = self.head.as_deref();
        std::iter::from_fn(move || {
            let node = cur?;
            cur = node.next.as_deref();
            Some(node.buf.as_slice())
        })
    }

    /// Drops every line before the `keep_from`th (0-indexed), freeing their
    /// buffers. Called once the cursor has moved past them for good.
    pub fn prune_before_cursor(&mut self, keep_from: usize) {
        let mut head = self.head.take();
        for _ in 0..keep_from {
            head = match head {
                Some(node) => node.next,
                None => break,
            };
        }
        self.head = head;
    }
}

/// A cursor over one or more already-tokenised line buffers, addressed as
/// if they were concatenated end to end. A translation-unit cursor always
/// holds exactly one line; an interactive cursor holds a snapshot of every
/// `InteractiveLines` node read so far, so a function body entered across
/// several REPL prompts (§4.7 boundary scenario 5) can still be lifted by
/// `copy_tokens` as a single contiguous range, the same as if it had all
/// come from one file.
///
/// The snapshot is owned rather than borrowed: building it from
/// `InteractiveLines` would otherwise borrow the `Interpreter` field that
/// holds it for as long as the cursor lives, which conflicts with handing
/// `&mut Interpreter` to the evaluator in the same call. The copy costs one
/// clone of the accumulated interactive input per `parse` call, which is
/// never more than a few source lines.
pub struct Cursor {
    lines: Vec<Vec<u8>>,
    pos: usize,
    run_mode: RunMode,
    search_label: Option<Symbol>,
    debug_mode: bool,
}

impl Cursor {
    /// A cursor over a single buffer — the normal case for a translation
    /// unit, or any other one-shot tokenisation.
    pub fn new(buf: &[u8]) -> Self {
        Self::over_lines(vec![buf.to_vec()])
    }

    /// A cursor spanning every line currently accumulated in `lines`,
    /// oldest first, addressed as one continuous token stream.
    pub fn over_interactive_lines(lines: &InteractiveLines) -> Self {
        Self::over_lines(lines.iter().map(<[u8]>::to_vec).collect())
    }

    fn over_lines(lines: Vec<Vec<u8>>) -> Self {
        debug_assert!(!lines.is_empty(), "a cursor needs at least one line");
        Self { lines, pos: 0, run_mode: RunMode::Run, search_label: None, debug_mode: false }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Resolves a global position into the `(line index, offset within that
    /// line)` it falls in. A position exactly at a line boundary resolves
    /// to the start of the *next* line (so running off the end of one
    /// REPL-entered line flows straight into the next, the way a single
    /// file's buffer flows from one statement to the next). A position at
    /// or past the end of the last line clamps to that line's end, mirroring
    /// `TokenReader`'s own "keep returning the sentinel" behaviour.
    fn locate(&self, pos: usize) -> (usize, usize) {
        let mut remaining = pos;
        let last = self.lines.len() - 1;
        for (idx, line) in self.lines.iter().enumerate() {
            if idx == last {
                return (idx, remaining.min(line.len()));
            }
            if remaining < line.len() {
                return (idx, remaining);
            }
            remaining -= line.len();
        }
        unreachable!("lines is non-empty")
    }

    fn line_start(&self, line_idx: usize) -> usize {
        self.lines[..line_idx].iter().map(Vec::len).sum()
    }

    pub fn peek(&self) -> Token {
        self.get_raw_token_at(self.pos).0
    }

    /// Decodes and consumes the next token without any run-mode filtering,
    /// hopping across line boundaries as needed.
    pub fn get_raw_token(&mut self) -> Token {
        let (token, new_pos) = self.get_raw_token_at(self.pos);
        self.pos = new_pos;
        token
    }

    /// Core of `get_raw_token`/`peek`: decodes the token at `pos`, hopping
    /// forward across line boundaries when a line's own sentinel
    /// (`Eof`/`EndOfFunction`) is reached but later lines remain, without
    /// mutating `self`.
    fn get_raw_token_at(&self, pos: usize) -> (Token, usize) {
        let mut pos = pos;
        loop {
            let (line_idx, local_pos) = self.locate(pos);
            let is_last_line = line_idx + 1 == self.lines.len();
            let mut reader = TokenReader::new(&self.lines[line_idx]);
            reader.seek(local_pos);
            let token = reader.next();
            if !is_last_line && matches!(token.kind, TokenKind::Eof | TokenKind::EndOfFunction) {
                pos = self.line_start(line_idx) + self.lines[line_idx].len();
                continue;
            }
            return (token, self.line_start(line_idx) + reader.position());
        }
    }

    /// Consumes the next token, transparently handling `#ifdef`/`#ifndef`/
    /// `#else`/`#endif` against `preprocessor`'s nesting counters and
    /// silently skipping every other token while an enclosing branch is
    /// inactive — the Rust shape of `original_source/lex.cpp`'s
    /// `LexGetToken` pre-processing loop.
    ///
    /// `#if <constant-expression>` is the one directive this cannot fully
    /// dispatch itself: evaluating the expression needs the full
    /// expression evaluator, which per §1 lives with the host `Evaluator`,
    /// not here. `HashIf` is therefore returned to the caller unconsumed
    /// (even while skipping, so nesting stays balanced); the caller reads
    /// the expression tokens, decides the condition, and calls
    /// `preprocessor.handle_if` before asking this cursor for another
    /// token.
    pub fn get_token(&mut self, preprocessor: &mut Preprocessor) -> Token {
        loop {
            let token = self.get_raw_token();
            match token.kind {
                TokenKind::HashIfdef | TokenKind::HashIfndef => {
                    let is_defined = match self.get_raw_token().payload {
                        Payload::Symbol(sym) => preprocessor.is_macro_defined(sym),
                        _ => false,
                    };
                    preprocessor.handle_ifdef(is_defined, token.kind == TokenKind::HashIfndef);
                    self.to_end_of_line();
                }
                TokenKind::HashElse => {
                    let _ = preprocessor.handle_else();
                    self.to_end_of_line();
                }
                TokenKind::HashEndif => {
                    let _ = preprocessor.handle_endif();
                    self.to_end_of_line();
                }
                TokenKind::HashIf | TokenKind::Eof | TokenKind::EndOfFunction => return token,
                _ if preprocessor.is_active() => return token,
                _ => {}
            }
        }
    }

    /// Advances past tokens up to and including the next `EndOfLine` (or
    /// `Eof`/`EndOfFunction`, whichever comes first) without interpreting
    /// them — used to recover after a malformed directive line.
    pub fn to_end_of_line(&mut self) {
        loop {
            match self.peek().kind {
                TokenKind::EndOfLine | TokenKind::Eof | TokenKind::EndOfFunction => return,
                _ => {
                    self.get_raw_token();
                }
            }
        }
    }

    /// Lifts the token range `[start, end)` out of this cursor's lines,
    /// terminated by `EndOfFunction` — used to save a function or macro
    /// body for later invocation. `start`/`end` may fall in different
    /// lines; each line's own sentinel is stripped as the range is walked,
    /// the same as a single-buffer copy strips its one trailing sentinel.
    pub fn copy_tokens(&self, start: usize, end: usize) -> Vec<u8> {
        let mut out = Vec::new();
        let mut pos = start;
        while pos < end {
            let (line_idx, local_pos) = self.locate(pos);
            let line = &self.lines[line_idx];
            let mut reader = TokenReader::new(line);
            reader.seek(local_pos);
            let before = reader.position();
            let token = reader.next();
            let is_last_line = line_idx + 1 == self.lines.len();
            if matches!(token.kind, TokenKind::Eof | TokenKind::EndOfFunction) {
                if is_last_line {
                    break;
                }
                pos = self.line_start(line_idx) + line.len();
                continue;
            }
            out.extend_from_slice(&line[before..reader.position()]);
            pos = self.line_start(line_idx) + reader.position();
        }
        out.push(TokenKind::EndOfFunction as u8);
        out.push(0);
        out
    }

    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    pub fn set_run_mode(&mut self, mode: RunMode) {
        self.run_mode = mode;
    }

    pub fn search_label(&self) -> Option<Symbol> {
        self.search_label
    }

    pub fn set_search_label(&mut self, label: Option<Symbol>) {
        self.search_label = label;
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn set_debug_mode(&mut self, enabled: bool) {
        self.debug_mode = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minic_lex::TokenWriter;

    fn sample_buf() -> Vec<u8> {
        let mut w = TokenWriter::new();
        w.push(Token::simple(TokenKind::Int, 1));
        w.push(Token::simple(TokenKind::Identifier, 5));
        w.push(Token::simple(TokenKind::Semicolon, 6));
        w.push(Token::simple(TokenKind::EndOfLine, 0));
        w.finish(TokenKind::Eof)
    }

    #[test]
    fn peek_does_not_advance() {
        let buf = sample_buf();
        let mut cursor = Cursor::new(&buf);
        assert_eq!(cursor.peek().kind, TokenKind::Int);
        assert_eq!(cursor.peek().kind, TokenKind::Int);
        assert_eq!(cursor.get_raw_token().kind, TokenKind::Int);
    }

    #[test]
    fn to_end_of_line_stops_at_sentinel() {
        let buf = sample_buf();
        let mut cursor = Cursor::new(&buf);
        cursor.to_end_of_line();
        assert_eq!(cursor.peek().kind, TokenKind::EndOfLine);
    }

    #[test]
    fn copy_tokens_round_trips_via_interactive_cursor() {
        let buf = sample_buf();
        let cursor = Cursor::new(&buf);
        let copy = cursor.copy_tokens(0, buf.len());
        let mut reader = TokenReader::new(&copy);
        assert_eq!(reader.next().kind, TokenKind::Int);
        assert_eq!(reader.next().kind, TokenKind::Identifier);
        assert_eq!(reader.next().kind, TokenKind::Semicolon);
        assert_eq!(reader.next().kind, TokenKind::EndOfLine);
        assert_eq!(reader.next().kind, TokenKind::EndOfFunction);
        let _ = Payload::None;
    }

    #[test]
    fn interactive_lines_prune_drops_consumed_nodes() {
        let mut lines = InteractiveLines::new();
        lines.push(vec![1]);
        lines.push(vec![2]);
        lines.push(vec![3]);
        assert_eq!(lines.len(), 3);
        lines.prune_before_cursor(2);
        assert_eq!(lines.len(), 1);
    }

    fn line_buf(tokens: &[Token]) -> Vec<u8> {
        let mut w = TokenWriter::new();
        for t in tokens {
            w.push(*t);
        }
        w.finish(TokenKind::Eof)
    }

    /// A function body entered across three separate REPL lines must still
    /// be lift-able as one contiguous token range, the way a single file's
    /// buffer would be.
    #[test]
    fn cursor_spans_interactive_lines_for_copy_tokens() {
        let mut lines = InteractiveLines::new();
        lines.push(line_buf(&[Token::simple(TokenKind::Int, 1), Token::simple(TokenKind::Identifier, 5)]));
        lines.push(line_buf(&[Token::simple(TokenKind::OpenCurlyBracket, 1)]));
        lines.push(line_buf(&[Token::simple(TokenKind::Return, 2), Token::simple(TokenKind::CloseCurlyBracket, 1)]));

        let cursor = Cursor::over_interactive_lines(&lines);
        let total_len: usize = lines.iter().map(<[u8]>::len).sum();
        let copy = cursor.copy_tokens(0, total_len);

        let mut reader = TokenReader::new(&copy);
        assert_eq!(reader.next().kind, TokenKind::Int);
        assert_eq!(reader.next().kind, TokenKind::Identifier);
        assert_eq!(reader.next().kind, TokenKind::OpenCurlyBracket);
        assert_eq!(reader.next().kind, TokenKind::Return);
        assert_eq!(reader.next().kind, TokenKind::CloseCurlyBracket);
        assert_eq!(reader.next().kind, TokenKind::EndOfFunction);
    }

    #[test]
    fn cursor_get_raw_token_crosses_interactive_line_boundary() {
        let mut lines = InteractiveLines::new();
        lines.push(line_buf(&[Token::simple(TokenKind::Int, 1)]));
        lines.push(line_buf(&[Token::simple(TokenKind::Semicolon, 1)]));

        let mut cursor = Cursor::over_interactive_lines(&lines);
        assert_eq!(cursor.get_raw_token().kind, TokenKind::Int);
        assert_eq!(cursor.get_raw_token().kind, TokenKind::Semicolon);
        assert_eq!(cursor.get_raw_token().kind, TokenKind::Eof);
    }

    #[test]
    fn get_token_skips_an_inactive_branch_and_tracks_nesting() {
        let mut w = TokenWriter::new();
        w.push(Token::simple(TokenKind::HashIfdef, 1));
        w.push(Token { kind: TokenKind::Identifier, column: 1, payload: Payload::Symbol(Symbol(1)) });
        w.push(Token::simple(TokenKind::EndOfLine, 0));
        w.push(Token::simple(TokenKind::Int, 1)); // inside the (undefined) branch: skipped
        w.push(Token::simple(TokenKind::HashEndif, 1));
        w.push(Token::simple(TokenKind::EndOfLine, 0));
        w.push(Token::simple(TokenKind::Semicolon, 1)); // after #endif: visible again
        let buf = w.finish(TokenKind::Eof);

        let mut cursor = Cursor::new(&buf);
        let mut pp = Preprocessor::new();
        // The `Int` inside the inactive branch never surfaces; the first
        // token seen is the `EndOfLine` that follows `#endif`.
        assert_eq!(cursor.get_token(&mut pp).kind, TokenKind::EndOfLine);
        assert_eq!(cursor.get_token(&mut pp).kind, TokenKind::Semicolon);
        assert!(pp.is_active());
    }
}
