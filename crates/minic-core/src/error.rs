//! Aggregated error type for the host-facing API. Every variant here is
//! fatal in the sense of §7: the interpreter instance that raised it should
//! be discarded by the host and, if desired, recreated — there is no
//! internal recovery primitive standing in for picoc's `setjmp`/`longjmp`.

use thiserror::Error;

use minic_lex::{LexError, LexErrorAt};
use minic_pp::PreprocessorError;
use minic_util::ArenaError;
use minic_value::{TableError, TypeError, ValueError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("{0}")]
    Type(#[from] TypeError),
    #[error("{0}")]
    Table(#[from] TableError),
    #[error("{0}")]
    Value(#[from] ValueError),
    #[error("{0}")]
    Preprocessor(#[from] PreprocessorError),
    #[error("out of memory")]
    OutOfMemory,
    #[error("{0}")]
    Diagnostic(String),
}

impl From<ArenaError> for CoreError {
    fn from(err: ArenaError) -> Self {
        match err {
            ArenaError::OutOfMemory { .. } => CoreError::OutOfMemory,
            other => CoreError::Diagnostic(other.to_string()),
        }
    }
}

impl From<LexErrorAt> for CoreError {
    fn from(err: LexErrorAt) -> Self {
        CoreError::Diagnostic(format!("{}:{}: {}", err.line, err.column, err.error))
    }
}
