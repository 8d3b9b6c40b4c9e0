//! Maximal-munch scanning of operators and structural punctuation.

use super::core::{Lexer, SymbolSource};
use crate::error::LexError;
use crate::lexer::LexErrorAt;
use crate::token::{Token, TokenKind};

pub(super) fn lex_operator<I: SymbolSource>(
    lexer: &mut Lexer<'_, I>,
    column: u8,
) -> Result<Token, LexErrorAt> {
    let c0 = lexer.cursor().current();
    let c1 = lexer.cursor().at(1);
    let c2 = lexer.cursor().at(2);

    // Three-character operators.
    let three = match (c0, c1, c2) {
        (b'<', b'<', b'=') => Some(TokenKind::ShiftLeftAssign),
        (b'>', b'>', b'=') => Some(TokenKind::ShiftRightAssign),
        (b'.', b'.', b'.') => Some(TokenKind::Ellipsis),
        _ => None,
    };
    if let Some(kind) = three {
        lexer.cursor_mut().advance();
        lexer.cursor_mut().advance();
        lexer.cursor_mut().advance();
        return Ok(Token::simple(kind, column));
    }

    // Two-character operators.
    let two = match (c0, c1) {
        (b'+', b'=') => Some(TokenKind::AddAssign),
        (b'-', b'=') => Some(TokenKind::SubtractAssign),
        (b'*', b'=') => Some(TokenKind::MultiplyAssign),
        (b'/', b'=') => Some(TokenKind::DivideAssign),
        (b'%', b'=') => Some(TokenKind::ModulusAssign),
        (b'&', b'=') => Some(TokenKind::ArithmeticAndAssign),
        (b'|', b'=') => Some(TokenKind::ArithmeticOrAssign),
        (b'^', b'=') => Some(TokenKind::ArithmeticExorAssign),
        (b'+', b'+') => Some(TokenKind::Increment),
        (b'-', b'-') => Some(TokenKind::Decrement),
        (b'<', b'<') => Some(TokenKind::ShiftLeft),
        (b'>', b'>') => Some(TokenKind::ShiftRight),
        (b'&', b'&') => Some(TokenKind::LogicalAnd),
        (b'|', b'|') => Some(TokenKind::LogicalOr),
        (b'=', b'=') => Some(TokenKind::Equal),
        (b'!', b'=') => Some(TokenKind::NotEqual),
        (b'<', b'=') => Some(TokenKind::LessEqual),
        (b'>', b'=') => Some(TokenKind::GreaterEqual),
        (b'-', b'>') => Some(TokenKind::Arrow),
        _ => None,
    };
    if let Some(kind) = two {
        lexer.cursor_mut().advance();
        lexer.cursor_mut().advance();
        return Ok(Token::simple(kind, column));
    }

    let one = match c0 {
        b'(' => Some(TokenKind::OpenBracket),
        b')' => Some(TokenKind::CloseBracket),
        b'{' => Some(TokenKind::OpenCurlyBracket),
        b'}' => Some(TokenKind::CloseCurlyBracket),
        b'[' => Some(TokenKind::OpenSquareBracket),
        b']' => Some(TokenKind::CloseSquareBracket),
        b';' => Some(TokenKind::Semicolon),
        b',' => Some(TokenKind::Comma),
        b':' => Some(TokenKind::Colon),
        b'?' => Some(TokenKind::QuestionMark),
        b'.' => Some(TokenKind::Dot),
        b'=' => Some(TokenKind::Assign),
        b'+' => Some(TokenKind::Plus),
        b'-' => Some(TokenKind::Minus),
        b'*' => Some(TokenKind::Asterisk),
        b'/' => Some(TokenKind::Slash),
        b'%' => Some(TokenKind::Modulus),
        b'<' => Some(TokenKind::LessThan),
        b'>' => Some(TokenKind::GreaterThan),
        b'&' => Some(TokenKind::ArithmeticAnd),
        b'|' => Some(TokenKind::ArithmeticOr),
        b'^' => Some(TokenKind::ArithmeticExor),
        b'~' => Some(TokenKind::UnaryExor),
        b'!' => Some(TokenKind::LogicalNot),
        _ => None,
    };
    match one {
        Some(kind) => {
            lexer.cursor_mut().advance();
            Ok(Token::simple(kind, column))
        }
        None => Err(lexer.raise(LexError::IllegalCharacter(c0 as char))),
    }
}
