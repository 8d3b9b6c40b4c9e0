//! Interpreter facade tying the lexer, value/type model, scope engine, and
//! pre-processor together behind the host-facing API (§6): the `Cursor`
//! parser state, the `Interpreter` that owns every interpreter-instance
//! table and arena, and the `Evaluator`/`Platform` traits a host implements
//! to supply statement execution and I/O.

pub mod cursor;
pub mod error;
pub mod interpreter;

pub use cursor::{Cursor, InteractiveLines, RunMode, TokenLine};
pub use error::CoreError;
pub use interpreter::{Evaluator, Interpreter, LibraryEntry, NativeFn, Platform, DEFAULT_ARENA_CAPACITY};
