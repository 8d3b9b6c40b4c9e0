use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PreprocessorError {
    #[error("#else without #if")]
    ElseWithoutIf,
    #[error("#endif without #if")]
    EndifWithoutIf,
    #[error("expected an identifier after #ifdef/#ifndef")]
    ExpectedIdentifier,
    #[error("#define requires a macro name")]
    ExpectedMacroName,
    #[error("wrong number of arguments for macro invocation: expected {expected}, got {actual}")]
    ArgumentCountMismatch { expected: usize, actual: usize },
}
