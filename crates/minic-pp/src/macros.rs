//! `#define`d macro bodies: object-like (`#define PI 3`) and function-like
//! (`#define MAX(a, b) ...`), stored as raw token-stream bytes — the same
//! `EndOfFunction`-terminated encoding `copy_tokens` produces for a lifted
//! function body, since expanding a macro and calling a function both boil
//! down to "run this token range with these parameter bindings in scope".

use minic_util::Symbol;
use rustc_hash::FxHashMap;

use crate::error::PreprocessorError;

pub struct MacroDef {
    /// `None` for an object-like macro; `Some(params)` for a function-like
    /// one, where `params` is the ordered formal parameter names.
    pub params: Option<Vec<Symbol>>,
    /// Token-stream bytes for the macro body, terminated by
    /// `TokenKind::EndOfFunction`.
    pub body: Vec<u8>,
}

impl MacroDef {
    pub fn is_function_like(&self) -> bool {
        self.params.is_some()
    }

    /// Validates an invocation's argument count against the macro's
    /// parameter list. Object-like macros take no arguments.
    pub fn check_arity(&self, arg_count: usize) -> Result<(), PreprocessorError> {
        let expected = self.params.as_ref().map_or(0, Vec::len);
        if arg_count != expected {
            return Err(PreprocessorError::ArgumentCountMismatch { expected, actual: arg_count });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MacroTable {
    macros: FxHashMap<Symbol, MacroDef>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: Symbol, def: MacroDef) {
        // Re-`#define`s are common in headers guarded by `#ifndef`; picoc
        // silently lets the new definition win rather than erroring.
        self.macros.insert(name, def);
    }

    pub fn is_defined(&self, name: Symbol) -> bool {
        self.macros.contains_key(&name)
    }

    pub fn get(&self, name: Symbol) -> Option<&MacroDef> {
        self.macros.get(&name)
    }

    pub fn undef(&mut self, name: Symbol) -> bool {
        self.macros.remove(&name).is_some()
    }
}
