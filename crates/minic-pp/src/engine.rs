//! `#if`/`#ifdef`/`#ifndef`/`#else`/`#endif` nesting (component 9),
//! grounded directly on `original_source/lex.cpp`'s `LexHashIfdef`/
//! `LexHashIf`/`#else`/`#endif` handling: two counters track how deep the
//! directive nesting is (`hash_if_level`) and how deep the *active* (not
//! skipped) branch is (`hash_if_evaluate_to_level`). Tokens are skipped
//! exactly when the two have diverged.

use minic_util::Symbol;

use crate::error::PreprocessorError;
use crate::macros::{MacroDef, MacroTable};

pub struct Preprocessor {
    hash_if_level: u32,
    hash_if_evaluate_to_level: u32,
    macros: MacroTable,
}

impl Preprocessor {
    pub fn new() -> Self {
        Self { hash_if_level: 0, hash_if_evaluate_to_level: 0, macros: MacroTable::new() }
    }

    /// Whether tokens at the current nesting depth should be executed. When
    /// `false`, the cursor driving traversal should skip to the next
    /// `#else`/`#endif` at the same depth without evaluating anything.
    pub fn is_active(&self) -> bool {
        self.hash_if_evaluate_to_level == self.hash_if_level
    }

    pub fn hash_if_level(&self) -> u32 {
        self.hash_if_level
    }

    /// `#ifdef`/`#ifndef`. `negate` is `true` for `#ifndef`.
    pub fn handle_ifdef(&mut self, is_defined: bool, negate: bool) {
        if self.is_active() && is_defined != negate {
            self.hash_if_evaluate_to_level += 1;
        }
        self.hash_if_level += 1;
    }

    /// `#if <constant-expression>`. The expression itself is evaluated by
    /// the host's `Evaluator` (out of scope here); this only folds the
    /// resulting boolean into the nesting counters.
    pub fn handle_if(&mut self, condition_true: bool) {
        if self.is_active() && condition_true {
            self.hash_if_evaluate_to_level += 1;
        }
        self.hash_if_level += 1;
    }

    pub fn handle_else(&mut self) -> Result<(), PreprocessorError> {
        if self.hash_if_level > 0 && self.hash_if_evaluate_to_level == self.hash_if_level - 1 {
            self.hash_if_evaluate_to_level += 1;
        } else if self.hash_if_evaluate_to_level == self.hash_if_level {
            if self.hash_if_level == 0 {
                return Err(PreprocessorError::ElseWithoutIf);
            }
            self.hash_if_evaluate_to_level -= 1;
        }
        Ok(())
    }

    pub fn handle_endif(&mut self) -> Result<(), PreprocessorError> {
        if self.hash_if_level == 0 {
            return Err(PreprocessorError::EndifWithoutIf);
        }
        self.hash_if_level -= 1;
        if self.hash_if_evaluate_to_level > self.hash_if_level {
            self.hash_if_evaluate_to_level = self.hash_if_level;
        }
        Ok(())
    }

    pub fn define_object_macro(&mut self, name: Symbol, body: Vec<u8>) {
        self.macros.define(name, MacroDef { params: None, body });
    }

    pub fn define_function_macro(&mut self, name: Symbol, params: Vec<Symbol>, body: Vec<u8>) {
        self.macros.define(name, MacroDef { params: Some(params), body });
    }

    pub fn is_macro_defined(&self, name: Symbol) -> bool {
        self.macros.is_defined(name)
    }

    pub fn macro_def(&self, name: Symbol) -> Option<&MacroDef> {
        self.macros.get(name)
    }

    pub fn undef_macro(&mut self, name: Symbol) -> bool {
        self.macros.undef(name)
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
