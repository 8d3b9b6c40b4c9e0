//! The main lexer dispatch loop and mode state machine (§4.6).

use minic_util::{Interner, Symbol};

use crate::cursor::Cursor;
use crate::error::LexError;
use crate::token::{Payload, Token, TokenKind};
use crate::token_stream::TokenWriter;

/// Lexer mode. Distinct from run-of-the-mill "lexer state" because a handful
/// of tokens are only recognised while inside a `#define`/`#include` line —
/// everywhere else the lexer behaves identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    HashInclude,
    HashDefine,
    HashDefineSpace,
    HashDefineSpaceIdent,
}

/// A lex error tagged with the source position it was raised at.
#[derive(Debug, Clone, PartialEq)]
pub struct LexErrorAt {
    pub error: LexError,
    pub line: u32,
    pub column: u32,
}

/// Something that can turn source bytes into interned symbols. Implemented
/// by `minic_util::Interner`; kept as a trait here so `minic-lex` does not
/// need to depend on the concrete interner type for more than this one use.
pub trait SymbolSource {
    fn intern(&mut self, bytes: &[u8]) -> Symbol;
}

impl SymbolSource for Interner {
    fn intern(&mut self, bytes: &[u8]) -> Symbol {
        Interner::intern(self, bytes)
    }
}

pub struct Lexer<'a, I: SymbolSource> {
    cursor: Cursor<'a>,
    interner: &'a mut I,
    mode: Mode,
    /// Physical newlines consumed while scanning a single token (block
    /// comments, line-continuations inside string/char literals) that have
    /// not yet been surfaced as `EndOfLine` sentinels. Flushed one at a time
    /// before the next real token is returned, so the emitted stream still
    /// carries one `EndOfLine` per physical source line even though the
    /// newline itself was swallowed mid-token.
    extra_newlines: u32,
}

impl<'a, I: SymbolSource> Lexer<'a, I> {
    pub fn new(source: &'a str, interner: &'a mut I) -> Self {
        Self { cursor: Cursor::new(source), interner, mode: Mode::Normal, extra_newlines: 0 }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn err(&self, error: LexError) -> LexErrorAt {
        LexErrorAt { error, line: self.cursor.line(), column: self.cursor.column() }
    }

    /// Returns whether any whitespace was actually consumed, so callers that
    /// care about "no intervening whitespace" (the `HashDefineSpaceIdent`
    /// `(`-check) can tell a macro name followed immediately by `(` apart
    /// from one merely followed eventually by a `(`.
    fn skip_inline_whitespace(&mut self) -> bool {
        let mut skipped_any = false;
        while matches!(self.cursor.current(), b' ' | b'\t' | b'\r') {
            self.cursor.advance();
            skipped_any = true;
        }
        if skipped_any && self.mode == Mode::HashDefine {
            self.mode = Mode::HashDefineSpace;
        }
        skipped_any
    }

    /// Produces the next token, or `None` once end-of-file has been reached
    /// (after the caller has consumed the `Eof` token returned just before).
    pub fn next_token(&mut self) -> Result<Token, LexErrorAt> {
        if self.extra_newlines > 0 {
            self.extra_newlines -= 1;
            return Ok(Token::simple(TokenKind::EndOfLine, 0));
        }

        let skipped_whitespace = self.skip_inline_whitespace();

        if let Some(consumed) = comment::skip(&mut self.cursor)? {
            self.extra_newlines += consumed;
            return self.next_token();
        }

        let column = self.cursor.column().min(u8::MAX as u32) as u8;

        if self.cursor.is_at_end() {
            return Ok(Token::simple(TokenKind::Eof, column));
        }

        let c = self.cursor.current();

        if self.mode == Mode::HashDefineSpaceIdent {
            self.mode = Mode::Normal;
            // Only an immediately-following `(` (no intervening whitespace)
            // marks a function-like macro; `#define FOO (x)` is an
            // object-like macro whose body happens to start with `(`.
            if c == b'(' && !skipped_whitespace {
                self.cursor.advance();
                return Ok(Token::simple(TokenKind::OpenMacroBracket, column));
            }
        }

        if c == b'\n' {
            self.cursor.advance();
            if self.mode != Mode::Normal {
                self.mode = Mode::Normal;
            }
            return Ok(Token::simple(TokenKind::EndOfLine, column));
        }

        if c == b'#' && self.cursor.column() == 1 {
            return identifier::lex_hash(self, column);
        }

        if c.is_ascii_alphabetic() || c == b'_' {
            return identifier::lex_identifier(self, column);
        }

        if c.is_ascii_digit() || (c == b'.' && self.cursor.at(1).is_ascii_digit()) {
            return number::lex_number(self, column);
        }

        if c == b'"' || (self.mode == Mode::HashInclude && c == b'<') {
            return string::lex_string(self, column);
        }

        if c == b'\'' {
            return string::lex_char(self, column);
        }

        operator::lex_operator(self, column)
    }

    /// Tokenises the whole source into a wire-format buffer terminated with
    /// `sentinel` (`Eof` for a translation unit, `EndOfFunction` for an
    /// embedded macro/function body).
    pub fn tokenize(mut self, sentinel: TokenKind) -> Result<Vec<u8>, LexErrorAt> {
        let mut writer = TokenWriter::new();
        loop {
            let tok = self.next_token()?;
            if tok.kind == TokenKind::Eof {
                break;
            }
            writer.push(tok);
        }
        Ok(writer.finish(sentinel))
    }
}

// Submodules reach into `Lexer`'s private fields via `pub(super)` accessors
// below rather than `pub(crate)` fields, keeping the mode/cursor invariants
// local to this file.
impl<'a, I: SymbolSource> Lexer<'a, I> {
    pub(super) fn cursor_mut(&mut self) -> &mut Cursor<'a> {
        &mut self.cursor
    }

    pub(super) fn cursor(&self) -> &Cursor<'a> {
        &self.cursor
    }

    pub(super) fn intern(&mut self, bytes: &[u8]) -> Symbol {
        self.interner.intern(bytes)
    }

    pub(super) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub(super) fn raise(&self, error: LexError) -> LexErrorAt {
        self.err(error)
    }

    /// Records a newline swallowed mid-token (escaped line continuation
    /// inside a string/char literal) so it is replayed as an `EndOfLine`
    /// sentinel before the next real token.
    pub(super) fn bump_extra_newline(&mut self) {
        self.extra_newlines += 1;
    }
}

use super::{comment, identifier, number, operator, string};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_a_minimal_declaration() {
        let mut interner = Interner::new();
        let mut lexer = Lexer::new("int a = 1;\n", &mut interner);
        let kinds: Vec<TokenKind> = std::iter::from_fn(|| match lexer.next_token() {
            Ok(t) if t.kind == TokenKind::Eof => None,
            Ok(t) => Some(t.kind),
            Err(_) => None,
        })
        .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Int,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::IntegerConstant,
                TokenKind::Semicolon,
                TokenKind::EndOfLine,
            ]
        );
    }

    #[test]
    fn function_like_macro_open_paren_has_no_intervening_space() {
        let mut interner = Interner::new();
        let mut lexer = Lexer::new("#define MAX(a, b)\n", &mut interner);
        let kinds: Vec<TokenKind> = std::iter::from_fn(|| match lexer.next_token() {
            Ok(t) if t.kind == TokenKind::Eof => None,
            Ok(t) => Some(t.kind),
            Err(_) => None,
        })
        .collect();
        assert!(kinds.contains(&TokenKind::OpenMacroBracket));
    }

    #[test]
    fn object_like_macro_with_parenthesised_body_is_not_function_like() {
        let mut interner = Interner::new();
        let mut lexer = Lexer::new("#define FOO (x)\n", &mut interner);
        let kinds: Vec<TokenKind> = std::iter::from_fn(|| match lexer.next_token() {
            Ok(t) if t.kind == TokenKind::Eof => None,
            Ok(t) => Some(t.kind),
            Err(_) => None,
        })
        .collect();
        assert!(!kinds.contains(&TokenKind::OpenMacroBracket));
        assert!(kinds.contains(&TokenKind::OpenBracket));
    }

    #[test]
    fn illegal_byte_is_fatal() {
        let mut interner = Interner::new();
        let mut lexer = Lexer::new("int `a;", &mut interner);
        lexer.next_token().unwrap();
        assert!(lexer.next_token().is_err());
    }
}
