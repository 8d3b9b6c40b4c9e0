//! String and character literal scanning, including C escape sequences and
//! the `<path>` form used after `#include`.

use super::core::{Lexer, Mode, SymbolSource};
use crate::error::LexError;
use crate::lexer::LexErrorAt;
use crate::token::{Payload, Token, TokenKind};

/// Decodes one escape sequence after a backslash has already been consumed.
/// Returns `None` for a line-continuation (`\<LF>` / `\<CR><LF>`), which
/// contributes a byte to `extra_newlines` instead of to the literal's value.
fn escape<I: SymbolSource>(lexer: &mut Lexer<'_, I>) -> Result<Option<u8>, LexErrorAt> {
    let c = lexer.cursor().current();
    match c {
        b'\n' => {
            lexer.cursor_mut().advance();
            lexer.bump_extra_newline();
            Ok(None)
        }
        b'\r' if lexer.cursor().at(1) == b'\n' => {
            lexer.cursor_mut().advance();
            lexer.cursor_mut().advance();
            lexer.bump_extra_newline();
            Ok(None)
        }
        b'a' => {
            lexer.cursor_mut().advance();
            Ok(Some(0x07))
        }
        b'b' => {
            lexer.cursor_mut().advance();
            Ok(Some(0x08))
        }
        b'f' => {
            lexer.cursor_mut().advance();
            Ok(Some(0x0C))
        }
        b'n' => {
            lexer.cursor_mut().advance();
            Ok(Some(b'\n'))
        }
        b'r' => {
            lexer.cursor_mut().advance();
            Ok(Some(b'\r'))
        }
        b't' => {
            lexer.cursor_mut().advance();
            Ok(Some(b'\t'))
        }
        b'v' => {
            lexer.cursor_mut().advance();
            Ok(Some(0x0B))
        }
        b'\\' => {
            lexer.cursor_mut().advance();
            Ok(Some(b'\\'))
        }
        b'\'' => {
            lexer.cursor_mut().advance();
            Ok(Some(b'\''))
        }
        b'"' => {
            lexer.cursor_mut().advance();
            Ok(Some(b'"'))
        }
        b'0'..=b'3' => {
            let mut value: u32 = 0;
            let mut n = 0;
            while n < 3 && matches!(lexer.cursor().current(), b'0'..=b'7') {
                value = value * 8 + (lexer.cursor().current() - b'0') as u32;
                lexer.cursor_mut().advance();
                n += 1;
            }
            Ok(Some(value as u8))
        }
        b'x' => {
            lexer.cursor_mut().advance();
            let mut value: u32 = 0;
            let mut n = 0;
            while n < 2 && lexer.cursor().current().is_ascii_hexdigit() {
                value = value * 16 + (lexer.cursor().current() as char).to_digit(16).unwrap();
                lexer.cursor_mut().advance();
                n += 1;
            }
            Ok(Some(value as u8))
        }
        _ => Err(lexer.raise(LexError::IllegalCharacter(c as char))),
    }
}

pub(super) fn lex_string<I: SymbolSource>(
    lexer: &mut Lexer<'_, I>,
    column: u8,
) -> Result<Token, LexErrorAt> {
    let closing = if lexer.mode() == Mode::HashInclude && lexer.cursor().current() == b'<' {
        b'>'
    } else {
        b'"'
    };
    lexer.cursor_mut().advance(); // opening quote or '<'

    let mut bytes = Vec::new();
    loop {
        if lexer.cursor().is_at_end() || lexer.cursor().current() == b'\n' {
            return Err(lexer.raise(LexError::UnterminatedString));
        }
        let c = lexer.cursor().current();
        if c == closing {
            lexer.cursor_mut().advance();
            break;
        }
        if c == b'\\' {
            lexer.cursor_mut().advance();
            if let Some(b) = escape(lexer)? {
                bytes.push(b);
            }
            continue;
        }
        bytes.push(c);
        lexer.cursor_mut().advance();
    }

    let sym = lexer.intern(&bytes);
    Ok(Token { kind: TokenKind::StringConstant, column, payload: Payload::Symbol(sym) })
}

pub(super) fn lex_char<I: SymbolSource>(
    lexer: &mut Lexer<'_, I>,
    column: u8,
) -> Result<Token, LexErrorAt> {
    lexer.cursor_mut().advance(); // opening quote

    if lexer.cursor().current() == b'\'' {
        return Err(lexer.raise(LexError::EmptyCharConstant));
    }

    let value = if lexer.cursor().current() == b'\\' {
        lexer.cursor_mut().advance();
        escape(lexer)?.unwrap_or(0)
    } else {
        let c = lexer.cursor().current();
        lexer.cursor_mut().advance();
        c
    };

    if lexer.cursor().current() != b'\'' {
        return Err(lexer.raise(LexError::UnterminatedChar));
    }
    lexer.cursor_mut().advance();

    Ok(Token { kind: TokenKind::CharacterConstant, column, payload: Payload::Char(value) })
}

#[cfg(test)]
mod tests {
    use super::super::core::Lexer;
    use crate::token::{Payload, TokenKind};
    use minic_util::Interner;

    #[test]
    fn decodes_common_escapes_in_string() {
        let mut interner = Interner::new();
        let mut lexer = Lexer::new(r#""a\nb\tc""#, &mut interner);
        let t = lexer.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::StringConstant);
        let Payload::Symbol(sym) = t.payload else { panic!("expected symbol payload") };
        assert_eq!(interner.resolve(sym), "a\nb\tc");
    }

    #[test]
    fn char_constant_decodes_escape() {
        let mut interner = Interner::new();
        let mut lexer = Lexer::new(r"'\n'", &mut interner);
        let t = lexer.next_token().unwrap();
        assert_eq!(t.payload, Payload::Char(b'\n'));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let mut interner = Interner::new();
        let mut lexer = Lexer::new("\"abc", &mut interner);
        assert!(lexer.next_token().is_err());
    }

    #[test]
    fn empty_char_constant_is_an_error() {
        let mut interner = Interner::new();
        let mut lexer = Lexer::new("''", &mut interner);
        assert!(lexer.next_token().is_err());
    }
}
