//! Command modules for the minic CLI.

pub mod lex;
pub mod repl;

pub use lex::{LexArgs, LexCommand};
pub use repl::{ReplArgs, ReplCommand};
