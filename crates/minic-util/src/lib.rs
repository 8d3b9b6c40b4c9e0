//! Foundation types shared by every layer of the minic interpreter.
//!
//! This crate has no dependency on the rest of the workspace: it provides
//! the two leaf components of the interpreter core (the heap arena and the
//! string interner), plus the span/diagnostic machinery used to report
//! errors in the `"<file>:<line>:<column>: <message>"` format the rest of
//! the crates rely on.

pub mod arena;
pub mod diagnostic;
pub mod index;
pub mod span;
pub mod symbol;

pub use arena::{Arena, ArenaError, ArenaPtr, StackMark};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, Level};
pub use index::{Idx, IndexVec};
pub use span::{FileId, SourceMap, Span};
pub use symbol::{Interner, Symbol};
