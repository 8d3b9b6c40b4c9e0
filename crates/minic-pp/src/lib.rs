//! Pre-processor directive engine: `#define`/`#include`/`#if`/`#ifdef`/
//! `#ifndef`/`#else`/`#endif` (component 9 of the interpreter core).

pub mod engine;
pub mod error;
pub mod macros;

pub use engine::Preprocessor;
pub use error::PreprocessorError;
pub use macros::{MacroDef, MacroTable};
