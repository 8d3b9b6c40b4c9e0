//! A minimal demonstration [`minic_core::Evaluator`]. Real statement and
//! expression execution is a host concern the core deliberately leaves
//! open (see `minic_core::interpreter`); this implementation only walks
//! and traces the token stream, which is enough to exercise the facade
//! end to end without pretending to run C.

use minic_core::{CoreError, Cursor, Evaluator, Interpreter};
use minic_lex::TokenKind;
use minic_util::Symbol;
use minic_value::ValueId;
use tracing::{debug, info};

#[derive(Default)]
pub struct TracingEvaluator;

impl TracingEvaluator {
    /// Consumes and logs every token up to `Eof`/`EndOfFunction`, counting
    /// how many were seen. Routed through the interpreter's pre-processor
    /// so an inactive `#if`/`#ifdef` branch is skipped rather than traced.
    fn trace_tokens(interp: &mut Interpreter, cursor: &mut Cursor) -> usize {
        let mut count = 0;
        loop {
            let token = cursor.get_token(&mut interp.preprocessor);
            match token.kind {
                TokenKind::Eof | TokenKind::EndOfFunction => break,
                _ => {
                    debug!(kind = ?token.kind, payload = ?token.payload, "token");
                    count += 1;
                }
            }
        }
        count
    }
}

impl Evaluator for TracingEvaluator {
    fn exec_translation_unit(&mut self, interp: &mut Interpreter, cursor: &mut Cursor) -> Result<(), CoreError> {
        let count = Self::trace_tokens(interp, cursor);
        info!(tokens = count, "parsed translation unit");
        Ok(())
    }

    fn exec_interactive_line(&mut self, interp: &mut Interpreter, cursor: &mut Cursor) -> Result<(), CoreError> {
        let count = Self::trace_tokens(interp, cursor);
        info!(tokens = count, "parsed interactive line");
        Ok(())
    }

    fn call(&mut self, interp: &mut Interpreter, name: Symbol, _args: &[ValueId], _result: Option<ValueId>) -> Result<(), CoreError> {
        let name = interp.interner.resolve(name).to_owned();
        Err(CoreError::Diagnostic(format!("no function body available to call `{name}` (statement execution is out of scope)")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minic_core::Platform;

    struct NullPlatform;
    impl Platform for NullPlatform {
        fn putc(&mut self, _c: u8) {}
        fn get_character(&mut self) -> Option<u8> {
            None
        }
        fn get_line(&mut self, _prompt: &str) -> Option<String> {
            None
        }
        fn exit(&mut self, code: i32) -> ! {
            std::process::exit(code)
        }
        fn read_file(&mut self, _path: &str) -> Option<Vec<u8>> {
            None
        }
    }

    #[test]
    fn exec_translation_unit_consumes_all_tokens() {
        let mut interp = Interpreter::new(Box::new(TracingEvaluator), Box::new(NullPlatform));
        interp.parse("t.c", "int a; int b;\n", false, false).unwrap();
    }

    #[test]
    fn call_reports_unsupported_execution() {
        let mut interp = Interpreter::new(Box::new(TracingEvaluator), Box::new(NullPlatform));
        let err = interp.call("f", &[], None).unwrap_err();
        assert!(matches!(err, CoreError::Diagnostic(_)));
    }
}
