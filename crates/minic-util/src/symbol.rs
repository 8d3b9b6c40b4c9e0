//! String interning.
//!
//! Canonicalises identifier and string-literal byte sequences to a stable,
//! `Copy`, pointer-comparable [`Symbol`]. Unlike the teacher crate this
//! interner is **not** a process-wide `static`: each [`Interpreter`] in
//! `minic-core` owns one `Interner`, so that multiple interpreter instances
//! can be created and torn down independently without sharing state (see
//! DESIGN.md, "Global state").

use crate::define_idx;
use rustc_hash::FxHashMap;

define_idx! {
    /// A stable handle to an interned byte sequence.
    ///
    /// `Symbol(0)` is always the empty string, registered when the
    /// [`Interner`] is constructed.
    Symbol
}

impl Symbol {
    pub const EMPTY: Symbol = Symbol(0);
}

/// Owns the backing storage for every string interned by one interpreter
/// instance. Strings are bump-allocated into `arena` so that `resolve`
/// can hand back a `&str` borrowed from `self` without a second copy.
pub struct Interner {
    arena: bumpalo::Bump,
    lookup: FxHashMap<&'static str, Symbol>,
    strings: Vec<&'static str>,
}

impl Interner {
    pub fn new() -> Self {
        let mut interner = Self {
            arena: bumpalo::Bump::new(),
            lookup: FxHashMap::default(),
            strings: Vec::new(),
        };
        let empty = interner.intern_str("");
        debug_assert_eq!(empty, Symbol::EMPTY);
        interner
    }

    /// Intern a byte sequence, returning its canonical handle. Invalid UTF-8
    /// is lossily replaced, matching the lexer's treatment of source bytes
    /// (identifiers and string literals are validated to be ASCII/UTF-8 by
    /// the lexer before they ever reach the interner).
    pub fn intern(&mut self, bytes: &[u8]) -> Symbol {
        match std::str::from_utf8(bytes) {
            Ok(s) => self.intern_str(s),
            Err(_) => self.intern_str(&String::from_utf8_lossy(bytes)),
        }
    }

    pub fn intern_str(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.lookup.get(s) {
            return sym;
        }
        // SAFETY: the bytes are owned by `self.arena`, which lives as long
        // as `self`; we only ever hand out `&'static str` internally and
        // always resolve it back through a borrow of `&self`, so the
        // apparent 'static lifetime never escapes this type's API.
        let copied: &'static str = unsafe { std::mem::transmute(self.arena.alloc_str(s) as &str) };
        let sym = Symbol(self.strings.len() as u32);
        self.strings.push(copied);
        self.lookup.insert(copied, sym);
        sym
    }

    pub fn resolve(&self, sym: Symbol) -> &str {
        self.strings[sym.index()]
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
