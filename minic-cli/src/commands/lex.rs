//! `minic lex`: tokenise a source file and print its token stream, mostly
//! useful for inspecting how the lexer handles a given input.

use std::path::PathBuf;

use minic_lex::{Lexer, TokenKind, TokenReader};
use minic_util::Interner;

use crate::error::{MinicCliError, Result};

#[derive(Debug, Clone)]
pub struct LexArgs {
    pub file: PathBuf,
}

pub struct LexCommand {
    args: LexArgs,
}

impl LexCommand {
    pub fn new(args: LexArgs) -> Self {
        Self { args }
    }

    pub fn run(&self) -> Result<()> {
        let source = std::fs::read_to_string(&self.args.file)
            .map_err(|e| MinicCliError::FileOperation(format!("{}: {e}", self.args.file.display())))?;

        let mut interner = Interner::new();
        let buf = Lexer::new(&source, &mut interner)
            .tokenize(TokenKind::Eof)
            .map_err(|e| MinicCliError::FileOperation(format!("{}:{}: {}", e.line, e.column, e.error)))?;

        let mut reader = TokenReader::new(&buf);
        loop {
            let token = reader.next();
            match token.kind {
                TokenKind::Eof | TokenKind::EndOfFunction => break,
                _ => println!("{:>4} {:?} {:?}", token.column, token.kind, token.payload),
            }
        }
        Ok(())
    }
}
