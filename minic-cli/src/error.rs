//! Error handling for the minic CLI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinicCliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("could not read source file: {0}")]
    FileOperation(String),

    #[error("interpreter core error: {0}")]
    Core(#[from] minic_core::CoreError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MinicCliError>;
