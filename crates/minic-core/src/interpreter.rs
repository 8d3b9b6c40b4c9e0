//! The `Interpreter` facade (component 2): owns every piece of state a
//! running instance needs — the arena, interner, source map, type
//! registry, the globals/string-literal/reserved-word tables, the scope
//! engine, and the pre-processor — and exposes the host-facing API from
//! §6. Statement/expression execution itself is out of scope here; it is
//! supplied by the host through the [`Evaluator`] trait.
//!
//! `Evaluator` is kept out of `Interpreter`'s own borrow of itself by
//! storing it as an `Option<Box<dyn Evaluator>>` that is taken out for the
//! duration of each call and put back afterwards — the usual way to let a
//! trait object receive `&mut Interpreter` (which would otherwise alias the
//! field holding it) without `unsafe`.

use rustc_hash::FxHashMap;
use tracing::instrument;

use minic_lex::{Lexer, TokenKind};
use minic_pp::Preprocessor;
use minic_util::{Arena, Interner, SourceMap, Symbol};
use minic_value::{Placement, ScopeEngine, SymbolTable, TableEntry, TypeId, TypeRegistry, ValueArena, ValueId};

use crate::cursor::{Cursor, InteractiveLines};
use crate::error::CoreError;

/// Default arena capacity for an interpreter constructed with
/// [`Interpreter::new`]; hosts that need a different size go through
/// [`Interpreter::with_arena_capacity`] (the CLI wires this to its TOML
/// config's `arena_bytes` key).
pub const DEFAULT_ARENA_CAPACITY: usize = 1 << 20;

/// A native (host-implemented) function bound into a library table by
/// [`Interpreter::library_add`].
pub type NativeFn = fn(&mut Interpreter, args: &[ValueId], result: Option<ValueId>) -> Result<(), CoreError>;

/// Host-supplied statement/expression execution, kept outside this crate's
/// scope per §1. Implementations receive `&mut Interpreter` so they can
/// allocate values, open scopes, and look up identifiers using the core's
/// machinery while deciding themselves what a statement or expression
/// means.
pub trait Evaluator {
    fn exec_translation_unit(&mut self, interp: &mut Interpreter, cursor: &mut Cursor) -> Result<(), CoreError>;
    fn exec_interactive_line(&mut self, interp: &mut Interpreter, cursor: &mut Cursor) -> Result<(), CoreError>;
    fn call(&mut self, interp: &mut Interpreter, name: Symbol, args: &[ValueId], result: Option<ValueId>) -> Result<(), CoreError>;
}

/// Host-supplied I/O, kept separate from [`Evaluator`] because a platform
/// implementation rarely changes with the language dialect while the
/// evaluator always does.
pub trait Platform {
    fn putc(&mut self, c: u8);
    fn get_character(&mut self) -> Option<u8>;
    fn get_line(&mut self, prompt: &str) -> Option<String>;
    fn exit(&mut self, code: i32) -> !;
    fn read_file(&mut self, path: &str) -> Option<Vec<u8>>;
}

/// One entry in a host library table, as passed to [`Interpreter::library_add`].
pub struct LibraryEntry {
    pub prototype: &'static str,
    pub function: NativeFn,
}

pub struct Interpreter {
    pub arena: Arena,
    pub interner: Interner,
    pub source_map: SourceMap,
    pub types: TypeRegistry,
    pub values: ValueArena,
    pub globals: SymbolTable,
    pub string_literals: SymbolTable,
    pub reserved_words: SymbolTable,
    pub scopes: ScopeEngine,
    pub preprocessor: Preprocessor,
    programs: Vec<Vec<u8>>,
    interactive_lines: InteractiveLines,
    libraries: FxHashMap<String, Vec<(Symbol, NativeFn)>>,
    evaluator: Option<Box<dyn Evaluator>>,
    platform: Box<dyn Platform>,
}

impl Interpreter {
    pub fn new(evaluator: Box<dyn Evaluator>, platform: Box<dyn Platform>) -> Self {
        Self::with_arena_capacity(evaluator, platform, DEFAULT_ARENA_CAPACITY)
    }

    pub fn with_arena_capacity(evaluator: Box<dyn Evaluator>, platform: Box<dyn Platform>, arena_capacity: usize) -> Self {
        let mut interp = Self {
            arena: Arena::new(arena_capacity),
            interner: Interner::new(),
            source_map: SourceMap::new(),
            types: TypeRegistry::new(),
            values: ValueArena::new(),
            globals: SymbolTable::new(),
            string_literals: SymbolTable::new(),
            reserved_words: SymbolTable::new(),
            scopes: ScopeEngine::new(),
            preprocessor: Preprocessor::new(),
            programs: Vec::new(),
            interactive_lines: InteractiveLines::new(),
            libraries: FxHashMap::default(),
            evaluator: Some(evaluator),
            platform,
        };
        interp.init();
        interp
    }

    /// Seeds the reserved-word table. Separate from `new` so a host that
    /// wants to reset an instance's lexical state without rebuilding the
    /// arena/type registry can call it again.
    #[instrument(skip(self))]
    pub fn init(&mut self) {
        for &(text, kind) in RESERVED_WORDS {
            let name = self.interner.intern_str(text);
            self.reserved_words.set_overwrite(name, TableEntry::ReservedWord(kind));
        }
    }

    /// Drops the program buffers and interactive-line history. Exists
    /// alongside `Drop` so a long-lived host (the REPL, between files) can
    /// reclaim memory without discarding the whole instance.
    pub fn cleanup(&mut self) {
        self.programs.clear();
        self.interactive_lines = InteractiveLines::new();
    }

    pub fn platform_mut(&mut self) -> &mut dyn Platform {
        self.platform.as_mut()
    }

    /// Binds `name` as a global of `type_id`, zero-initialised, for the
    /// host to populate afterwards via `self.values.write`.
    pub fn define_platform_var(&mut self, name: &str, type_id: TypeId, placement: Placement) -> Result<ValueId, CoreError> {
        let sym = self.interner.intern_str(name);
        let scope = self.scopes.current_scope().unwrap_or_else(|| self.scopes.scope_begin());
        let value = self.values.alloc_value_from_type(&mut self.arena, &self.types, type_id, placement, scope)?;
        self.globals.set(sym, TableEntry::Value { value, file: Symbol::EMPTY, line: 0, column: 0 })?;
        Ok(value)
    }

    /// Binds `name` as a global of `type_id` and immediately copies
    /// `data` into it — the "from pointer" variant used to expose a
    /// host-owned scalar (e.g. `argc`) without a follow-up write.
    pub fn define_platform_var_from_pointer(&mut self, name: &str, type_id: TypeId, data: &[u8]) -> Result<ValueId, CoreError> {
        let value = self.define_platform_var(name, type_id, Placement::Heap)?;
        self.values.write(&mut self.arena, value, data);
        Ok(value)
    }

    /// Tokenises `source`, registers it with the source map under
    /// `filename`, and hands the resulting cursor to the evaluator's
    /// `exec_translation_unit` (`is_interactive == false`) or
    /// `exec_interactive_line` (`is_interactive == true`). `enable_debugger`
    /// is threaded through to the cursor for the evaluator to consult.
    #[instrument(skip(self, source))]
    pub fn parse(&mut self, filename: &str, source: &str, is_interactive: bool, enable_debugger: bool) -> Result<(), CoreError> {
        self.source_map.add_file(filename, source);
        let sentinel = TokenKind::Eof;
        let buf = Lexer::new(source, &mut self.interner).tokenize(sentinel)?;

        let mut cursor = if is_interactive {
            self.interactive_lines.push(buf);
            Cursor::over_interactive_lines(&self.interactive_lines)
        } else {
            self.programs.push(buf.clone());
            Cursor::new(&buf)
        };
        cursor.set_debug_mode(enable_debugger);

        let mut evaluator = self.evaluator.take().expect("Interpreter::evaluator missing mid-call");
        let result = if is_interactive {
            evaluator.exec_interactive_line(self, &mut cursor)
        } else {
            evaluator.exec_translation_unit(self, &mut cursor)
        };
        self.evaluator = Some(evaluator);
        result
    }

    /// The interactive-line history, exposed so the evaluator can prune
    /// lines it has fully consumed once it knows a statement/definition is
    /// complete — the core itself has no notion of "complete" to prune by.
    pub fn interactive_lines(&mut self) -> &mut InteractiveLines {
        &mut self.interactive_lines
    }

    /// Reads one line via the platform's `get_line` and feeds it to
    /// `parse` as an interactive line. Returns `Ok(())` with no effect on
    /// end-of-input (the host's REPL loop should stop calling once this
    /// keeps happening, rather than treating EOF as an error).
    pub fn parse_interactive_line(&mut self, prompt: &str) -> Result<(), CoreError> {
        let Some(line) = self.platform.get_line(prompt) else {
            return Ok(());
        };
        self.parse("<interactive>", &line, true, false)
    }

    /// Invokes a previously-defined function by name through the
    /// evaluator, following picoc's `PlatformCallFunction` entry point.
    #[instrument(skip(self, args, result))]
    pub fn call(&mut self, function_name: &str, args: &[ValueId], result: Option<ValueId>) -> Result<(), CoreError> {
        let name = self.interner.intern_str(function_name);
        let mut evaluator = self.evaluator.take().expect("Interpreter::evaluator missing mid-call");
        let outcome = evaluator.call(self, name, args, result);
        self.evaluator = Some(evaluator);
        outcome
    }

    /// Registers a table of native functions under `table_name` (e.g.
    /// `"stdio"`, `"string"`), each keyed by its C prototype text so the
    /// evaluator can parse the prototype for argument/return types when a
    /// call site references it.
    pub fn library_add(&mut self, table_name: &str, entries: &[LibraryEntry]) {
        let bucket = self.libraries.entry(table_name.to_owned()).or_default();
        for entry in entries {
            let proto_sym = self.interner.intern_str(entry.prototype);
            bucket.push((proto_sym, entry.function));
        }
    }

    pub fn library_lookup(&self, table_name: &str) -> Option<&[(Symbol, NativeFn)]> {
        self.libraries.get(table_name).map(Vec::as_slice)
    }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Reserved words as recorded in the reserved-word table (component 5):
/// kept here in addition to `minic_lex::reserved_word`'s text-based lookup
/// so a host inspecting `Interpreter::reserved_words` sees the same fixed
/// set the lexer actually recognises.
const RESERVED_WORDS: &[(&str, TokenKind)] = &[
    ("auto", TokenKind::Auto),
    ("break", TokenKind::Break),
    ("case", TokenKind::Case),
    ("char", TokenKind::Char),
    ("continue", TokenKind::Continue),
    ("default", TokenKind::Default),
    ("do", TokenKind::Do),
    ("double", TokenKind::Double),
    ("else", TokenKind::Else),
    ("enum", TokenKind::Enum),
    ("extern", TokenKind::Extern),
    ("float", TokenKind::Float),
    ("for", TokenKind::For),
    ("goto", TokenKind::Goto),
    ("if", TokenKind::If),
    ("int", TokenKind::Int),
    ("long", TokenKind::Long),
    ("register", TokenKind::Register),
    ("return", TokenKind::Return),
    ("short", TokenKind::Short),
    ("signed", TokenKind::Signed),
    ("sizeof", TokenKind::Sizeof),
    ("static", TokenKind::Static),
    ("struct", TokenKind::Struct),
    ("switch", TokenKind::Switch),
    ("typedef", TokenKind::Typedef),
    ("union", TokenKind::Union),
    ("unsigned", TokenKind::Unsigned),
    ("void", TokenKind::Void),
    ("while", TokenKind::While),
    ("new", TokenKind::New),
    ("delete", TokenKind::Delete),
];

#[cfg(test)]
mod tests {
    use super::*;
    use minic_value::Base;

    struct NullEvaluator;
    impl Evaluator for NullEvaluator {
        fn exec_translation_unit(&mut self, _interp: &mut Interpreter, _cursor: &mut Cursor) -> Result<(), CoreError> {
            Ok(())
        }
        fn exec_interactive_line(&mut self, _interp: &mut Interpreter, _cursor: &mut Cursor) -> Result<(), CoreError> {
            Ok(())
        }
        fn call(&mut self, _interp: &mut Interpreter, _name: Symbol, _args: &[ValueId], _result: Option<ValueId>) -> Result<(), CoreError> {
            Ok(())
        }
    }

    struct NullPlatform {
        lines: Vec<String>,
    }
    impl Platform for NullPlatform {
        fn putc(&mut self, _c: u8) {}
        fn get_character(&mut self) -> Option<u8> {
            None
        }
        fn get_line(&mut self, _prompt: &str) -> Option<String> {
            self.lines.pop()
        }
        fn exit(&mut self, code: i32) -> ! {
            std::process::exit(code)
        }
        fn read_file(&mut self, _path: &str) -> Option<Vec<u8>> {
            None
        }
    }

    fn new_interp() -> Interpreter {
        Interpreter::new(Box::new(NullEvaluator), Box::new(NullPlatform { lines: Vec::new() }))
    }

    #[test]
    fn init_seeds_reserved_word_table() {
        let interp = new_interp();
        assert_eq!(interp.reserved_words.len(), RESERVED_WORDS.len());
    }

    #[test]
    fn parse_translation_unit_runs_without_error() {
        let mut interp = new_interp();
        interp.parse("t.c", "int a;\n", false, false).unwrap();
    }

    #[test]
    fn define_platform_var_binds_a_global() {
        let mut interp = new_interp();
        let int_ty = interp.types.base_type(Base::Int);
        let id = interp.define_platform_var_from_pointer("argc", int_ty, &1i32.to_le_bytes()).unwrap();
        assert_eq!(interp.values.read(&interp.arena, &interp.types, id), 1i32.to_le_bytes());
    }

    #[test]
    fn library_add_registers_entries_under_their_table_name() {
        fn dummy(_interp: &mut Interpreter, _args: &[ValueId], _result: Option<ValueId>) -> Result<(), CoreError> {
            Ok(())
        }
        let mut interp = new_interp();
        interp.library_add("stdio", &[LibraryEntry { prototype: "void puts(char *s)", function: dummy }]);
        assert_eq!(interp.library_lookup("stdio").map(|entries| entries.len()), Some(1));
        assert!(interp.library_lookup("string").is_none());
    }
}
