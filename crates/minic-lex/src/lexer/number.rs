//! Integer and floating-point literal scanning: decimal, `0x`/`0X` hex,
//! `0b`/`0B` binary, leading-zero octal, and floating point (triggered by a
//! `.`, an exponent, or an `f`/`F` suffix), with `u`/`U`/`l`/`L` integer
//! suffixes consumed and otherwise ignored (picoc does not distinguish
//! `int`/`long`/`unsigned` at the lexical level — that's a typing concern).

use super::core::{Lexer, SymbolSource};
use crate::error::LexError;
use crate::lexer::LexErrorAt;
use crate::token::{Payload, Token, TokenKind};

fn text_at<'a, I: SymbolSource>(lexer: &Lexer<'a, I>, start: usize) -> &'a str {
    let end = lexer.cursor().position();
    std::str::from_utf8(lexer.cursor().slice(start, end)).unwrap_or("")
}

fn consume_while<I: SymbolSource>(lexer: &mut Lexer<'_, I>, mut pred: impl FnMut(u8) -> bool) {
    while pred(lexer.cursor().current()) {
        lexer.cursor_mut().advance();
    }
}

fn skip_int_suffix<I: SymbolSource>(lexer: &mut Lexer<'_, I>) {
    consume_while(lexer, |c| matches!(c, b'u' | b'U' | b'l' | b'L'));
}

fn skip_float_suffix<I: SymbolSource>(lexer: &mut Lexer<'_, I>) {
    consume_while(lexer, |c| matches!(c, b'f' | b'F' | b'l' | b'L'));
}

pub(super) fn lex_number<I: SymbolSource>(
    lexer: &mut Lexer<'_, I>,
    column: u8,
) -> Result<Token, LexErrorAt> {
    let start = lexer.cursor().position();

    if lexer.cursor().current() == b'0' && matches!(lexer.cursor().at(1), b'x' | b'X') {
        lexer.cursor_mut().advance();
        lexer.cursor_mut().advance();
        let digits_start = lexer.cursor().position();
        consume_while(lexer, |c| c.is_ascii_hexdigit());
        if lexer.cursor().position() == digits_start {
            let bad = text_at(lexer, start).to_string();
            return Err(lexer.raise(LexError::MalformedNumber(bad)));
        }
        let digits = text_at(lexer, digits_start);
        let value = i64::from_str_radix(digits, 16)
            .map_err(|_| lexer.raise(LexError::MalformedNumber(text_at(lexer, start).to_string())))?;
        skip_int_suffix(lexer);
        return Ok(Token { kind: TokenKind::IntegerConstant, column, payload: Payload::Int(value) });
    }

    if lexer.cursor().current() == b'0' && matches!(lexer.cursor().at(1), b'b' | b'B') {
        lexer.cursor_mut().advance();
        lexer.cursor_mut().advance();
        let digits_start = lexer.cursor().position();
        consume_while(lexer, |c| matches!(c, b'0' | b'1'));
        if lexer.cursor().position() == digits_start {
            let bad = text_at(lexer, start).to_string();
            return Err(lexer.raise(LexError::MalformedNumber(bad)));
        }
        let digits = text_at(lexer, digits_start);
        let value = i64::from_str_radix(digits, 2)
            .map_err(|_| lexer.raise(LexError::MalformedNumber(text_at(lexer, start).to_string())))?;
        skip_int_suffix(lexer);
        return Ok(Token { kind: TokenKind::IntegerConstant, column, payload: Payload::Int(value) });
    }

    // Decimal integer part (also the whole-number part of a float).
    consume_while(lexer, |c| c.is_ascii_digit());

    let mut is_float = false;
    if lexer.cursor().current() == b'.' {
        is_float = true;
        lexer.cursor_mut().advance();
        consume_while(lexer, |c| c.is_ascii_digit());
    }
    if matches!(lexer.cursor().current(), b'e' | b'E') {
        let has_sign = matches!(lexer.cursor().at(1), b'+' | b'-');
        let exponent_digit_offset = if has_sign { 2 } else { 1 };
        if lexer.cursor().at(exponent_digit_offset).is_ascii_digit() {
            is_float = true;
            lexer.cursor_mut().advance(); // e/E
            if has_sign {
                lexer.cursor_mut().advance();
            }
            consume_while(lexer, |c| c.is_ascii_digit());
        }
    }

    if !is_float && matches!(lexer.cursor().current(), b'f' | b'F') {
        is_float = true;
    }

    let text = text_at(lexer, start);
    if is_float {
        skip_float_suffix(lexer);
        let numeric_part = text_at(lexer, start);
        let trimmed = numeric_part.trim_end_matches(['f', 'F', 'l', 'L']);
        let value: f64 = trimmed
            .parse()
            .map_err(|_| lexer.raise(LexError::MalformedNumber(numeric_part.to_string())))?;
        return Ok(Token { kind: TokenKind::FpConstant, column, payload: Payload::Fp(value) });
    }

    if text.is_empty() {
        return Err(lexer.raise(LexError::MalformedNumber(text.to_string())));
    }

    let value = if text.len() > 1 && text.starts_with('0') {
        i64::from_str_radix(&text[1..], 8)
            .map_err(|_| lexer.raise(LexError::MalformedNumber(text.to_string())))?
    } else {
        text.parse::<i64>().map_err(|_| lexer.raise(LexError::MalformedNumber(text.to_string())))?
    };
    skip_int_suffix(lexer);
    Ok(Token { kind: TokenKind::IntegerConstant, column, payload: Payload::Int(value) })
}

#[cfg(test)]
mod tests {
    use super::super::core::Lexer;
    use crate::token::{Payload, TokenKind};
    use minic_util::Interner;

    fn lex_one(src: &str) -> crate::token::Token {
        let mut interner = Interner::new();
        let mut lexer = Lexer::new(src, &mut interner);
        lexer.next_token().unwrap()
    }

    #[test]
    fn decimal_integer() {
        let t = lex_one("123");
        assert_eq!(t.kind, TokenKind::IntegerConstant);
        assert_eq!(t.payload, Payload::Int(123));
    }

    #[test]
    fn hex_integer() {
        let t = lex_one("0x1F");
        assert_eq!(t.payload, Payload::Int(31));
    }

    #[test]
    fn octal_integer() {
        let t = lex_one("017");
        assert_eq!(t.payload, Payload::Int(15));
    }

    #[test]
    fn binary_integer() {
        let t = lex_one("0b101");
        assert_eq!(t.payload, Payload::Int(5));
    }

    #[test]
    fn floating_point_with_exponent() {
        let t = lex_one("1.5e2");
        assert_eq!(t.kind, TokenKind::FpConstant);
        assert_eq!(t.payload, Payload::Fp(150.0));
    }

    #[test]
    fn integer_with_suffix() {
        let t = lex_one("10UL");
        assert_eq!(t.payload, Payload::Int(10));
    }
}
