//! Lexical analysis: converts C-dialect source text into the compact
//! binary token stream consumed by the preprocessor and parser.

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod token;
pub mod token_stream;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::{LexErrorAt, Lexer, Mode, SymbolSource};
pub use token::{Payload, Token, TokenKind};
pub use token_stream::{copy_tokens, TokenReader, TokenWriter};
