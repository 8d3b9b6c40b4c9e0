//! Symbol tables (component 5): interned-identifier to value bindings,
//! plus the reserved-word and intern-sentinel entry kinds a lookup can also
//! resolve to, grounded on the original implementation's `TableHash` /
//! `TableSearch` / `TableSet` triad.

use minic_lex::TokenKind;
use minic_util::Symbol;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::value::ValueId;

/// What an identifier resolves to in a [`SymbolTable`].
pub enum TableEntry {
    /// A bound variable or function, with the source location of its
    /// declaration (for diagnostics and "redefinition of X" errors).
    Value { value: ValueId, file: Symbol, line: u32, column: u32 },
    /// A reserved word, recorded in the table the lexer consults to decide
    /// whether an identifier is actually a keyword token.
    ReservedWord(TokenKind),
    /// Placeholder entry used by the string interner's own bookkeeping
    /// table to record that an identifier has been interned, independent
    /// of whether it is currently bound to a value.
    InternSentinel,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("redefinition of an existing table entry")]
    AlreadyDefined,
}

/// A mapping from interned identifier to [`TableEntry`]. Per-interpreter
/// instances exist for: the reserved-word table (fixed at init), the
/// globals table (file-scope definitions), the string-literal table
/// (canonical values for string literals), and one per active lexical
/// scope/frame for locals.
pub struct SymbolTable {
    entries: FxHashMap<Symbol, TableEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self { entries: FxHashMap::default() }
    }

    /// Binds `name` to `entry`. Rejects a second binding of the same name
    /// in the same table (picoc's `TableSet` semantics) — callers that want
    /// shadowing use a fresh table per scope instead of overwriting.
    pub fn set(&mut self, name: Symbol, entry: TableEntry) -> Result<(), TableError> {
        if self.entries.contains_key(&name) {
            return Err(TableError::AlreadyDefined);
        }
        self.entries.insert(name, entry);
        Ok(())
    }

    /// Forces a binding regardless of whether one already exists; used by
    /// the globals table when re-entering interactive mode redefines a
    /// top-level function.
    pub fn set_overwrite(&mut self, name: Symbol, entry: TableEntry) {
        self.entries.insert(name, entry);
    }

    pub fn get(&self, name: Symbol) -> Option<&TableEntry> {
        self.entries.get(&name)
    }

    pub fn get_mut(&mut self, name: Symbol) -> Option<&mut TableEntry> {
        self.entries.get_mut(&name)
    }

    pub fn delete(&mut self, name: Symbol) -> Option<TableEntry> {
        self.entries.remove(&name)
    }

    pub fn for_each(&self, mut f: impl FnMut(Symbol, &TableEntry)) {
        for (&name, entry) in &self.entries {
            f(name, entry);
        }
    }

    pub fn find_if(&self, mut pred: impl FnMut(Symbol, &TableEntry) -> bool) -> Option<(Symbol, &TableEntry)> {
        self.entries.iter().find(|(&name, entry)| pred(name, entry)).map(|(&name, entry)| (name, entry))
    }

    /// Removes every entry matching `pred`, returning the count removed.
    pub fn delete_if(&mut self, mut pred: impl FnMut(Symbol, &TableEntry) -> bool) -> usize {
        let doomed: Vec<Symbol> = self.entries.iter().filter(|(&name, entry)| pred(name, entry)).map(|(&name, _)| name).collect();
        for name in &doomed {
            self.entries.remove(name);
        }
        doomed.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minic_util::Idx;

    fn dummy_value() -> ValueId {
        ValueId::from_usize(0)
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut table = SymbolTable::new();
        table.set(Symbol(1), TableEntry::Value { value: dummy_value(), file: Symbol::EMPTY, line: 1, column: 1 }).unwrap();
        assert!(matches!(table.get(Symbol(1)), Some(TableEntry::Value { .. })));
    }

    #[test]
    fn redefining_an_existing_entry_is_an_error() {
        let mut table = SymbolTable::new();
        table.set(Symbol(1), TableEntry::InternSentinel).unwrap();
        assert_eq!(table.set(Symbol(1), TableEntry::InternSentinel), Err(TableError::AlreadyDefined));
    }

    #[test]
    fn delete_if_removes_matching_entries_only() {
        let mut table = SymbolTable::new();
        table.set(Symbol(1), TableEntry::ReservedWord(TokenKind::Int)).unwrap();
        table.set(Symbol(2), TableEntry::InternSentinel).unwrap();
        let removed = table.delete_if(|_, e| matches!(e, TableEntry::ReservedWord(_)));
        assert_eq!(removed, 1);
        assert!(table.get(Symbol(1)).is_none());
        assert!(table.get(Symbol(2)).is_some());
    }
}
