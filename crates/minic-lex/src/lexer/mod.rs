//! Lexer module, split the way the teacher crate splits its lexer: one file
//! per lexical category, with `core` holding the main dispatch loop.
//!
//! - `core` — `Lexer` struct, mode state, main dispatch
//! - `identifier` — identifiers, reserved words, `#directive` recognition
//! - `number` — integer and floating-point literals
//! - `string` — string and character literal scanning with C escapes
//! - `operator` — maximal-munch operator/punctuation scanning
//! - `comment` — `/* ... */` and `// ...` skipping

mod comment;
mod core;
mod identifier;
mod number;
mod operator;
mod string;

pub use self::core::{LexErrorAt, Lexer, Mode, SymbolSource};
