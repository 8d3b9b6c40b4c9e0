//! Identifiers, reserved words, and `#directive` recognition, including the
//! `#define` mode progression described in §4.6:
//! `Normal --#define--> HashDefine --space--> HashDefineSpace
//!  --name--> HashDefineSpaceIdent --back to Normal after the name or its
//!  immediately-following `(`.

use super::core::{Lexer, Mode, SymbolSource};
use crate::error::LexError;
use crate::token::{Payload, Token, TokenKind};

fn scan_word<'a, I: SymbolSource>(lexer: &mut Lexer<'a, I>) -> &'a [u8] {
    let start = lexer.cursor().position();
    while {
        let c = lexer.cursor().current();
        c.is_ascii_alphanumeric() || c == b'_'
    } {
        lexer.cursor_mut().advance();
    }
    let end = lexer.cursor().position();
    lexer.cursor().slice(start, end)
}

pub(super) fn lex_identifier<I: SymbolSource>(
    lexer: &mut Lexer<'_, I>,
    column: u8,
) -> Result<Token, crate::lexer::LexErrorAt> {
    let word = scan_word(lexer);
    let text = std::str::from_utf8(word).expect("identifier bytes are ASCII");

    if let Some(kind) = crate::token::reserved_word(text) {
        return Ok(Token::simple(kind, column));
    }

    if lexer.mode() == Mode::HashDefineSpace {
        lexer.set_mode(Mode::HashDefineSpaceIdent);
    }

    let sym = lexer.intern(word);
    Ok(Token { kind: TokenKind::Identifier, column, payload: Payload::Symbol(sym) })
}

/// Lexes a `#` at the start of a line: the `#` itself is not emitted as a
/// token, only the directive keyword that follows it (matching the token
/// enumeration, which has no standalone `Hash` variant).
pub(super) fn lex_hash<I: SymbolSource>(
    lexer: &mut Lexer<'_, I>,
    column: u8,
) -> Result<Token, crate::lexer::LexErrorAt> {
    lexer.cursor_mut().advance(); // consume '#'
    while matches!(lexer.cursor().current(), b' ' | b'\t') {
        lexer.cursor_mut().advance();
    }
    let word = scan_word(lexer);
    let text = std::str::from_utf8(word).unwrap_or("");
    let kind = match text {
        "define" => {
            lexer.set_mode(Mode::HashDefine);
            TokenKind::HashDefine
        }
        "else" => TokenKind::HashElse,
        "endif" => TokenKind::HashEndif,
        "if" => TokenKind::HashIf,
        "ifdef" => TokenKind::HashIfdef,
        "ifndef" => TokenKind::HashIfndef,
        "include" => {
            lexer.set_mode(Mode::HashInclude);
            TokenKind::HashInclude
        }
        _ => return Err(lexer.raise(LexError::IllegalCharacter('#'))),
    };
    Ok(Token::simple(kind, column))
}
