//! Lexical errors (§7: "Lex errors"). All fatal; the lexer does not
//! resynchronise after reporting one.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    #[error("illegal character '{0}'")]
    IllegalCharacter(char),
    #[error("unterminated string constant")]
    UnterminatedString,
    #[error("unterminated character constant")]
    UnterminatedChar,
    #[error("malformed numeric literal: {0}")]
    MalformedNumber(String),
    #[error("empty character constant")]
    EmptyCharConstant,
}
