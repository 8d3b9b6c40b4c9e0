//! Scope engine (component 8): lexical scope begin/end, call-frame
//! push/pop, and file-local `static` variable name mangling.
//!
//! Scope ids are plain monotonically-increasing handles rather than the
//! original implementation's pointer-XOR-position hash — see DESIGN.md,
//! "Scope identity", for why a safe counter is preferable here (the
//! pointer trick existed only to avoid a side table in a language without
//! an honest integer-handle idiom).

use minic_util::{define_idx, Interner, Symbol};

use crate::table::{SymbolTable, TableEntry};
use crate::value::{ValueArena, ValueId};
use minic_util::{Arena, StackMark};

define_idx! {
    /// Identifies one lexical scope (a block, a function body, file scope).
    /// `Value::scope_id` tags every value with the scope it was declared
    /// in; a scope that has ended marks its values `out_of_scope` rather
    /// than deleting them (§8 invariant).
    ScopeId
}

/// One active function call: the frame's own local symbol table, its
/// parameter values, and enough state to unwind cleanly on return.
pub struct StackFrame {
    pub function_name: Symbol,
    pub params: Vec<ValueId>,
    pub locals: SymbolTable,
    arena_mark: StackMark,
    scope_id: ScopeId,
}

impl StackFrame {
    pub fn scope_id(&self) -> ScopeId {
        self.scope_id
    }
}

/// Result of looking a name up through the active scope chain, explicit
/// about the "out of scope but still allocated" case so the evaluator can
/// raise a distinct diagnostic from a plain undefined-identifier error.
pub enum LookupResult {
    Found(ValueId),
    OutOfScope(ValueId),
    Undefined,
}

pub struct ScopeEngine {
    next_scope_id: u32,
    /// Active scopes, innermost last. A scope is active from `scope_begin`
    /// until its matching `scope_end`.
    active: Vec<ScopeId>,
    frames: Vec<StackFrame>,
}

impl ScopeEngine {
    pub fn new() -> Self {
        Self { next_scope_id: 0, active: Vec::new(), frames: Vec::new() }
    }

    fn fresh_scope_id(&mut self) -> ScopeId {
        let id = ScopeId(self.next_scope_id);
        self.next_scope_id += 1;
        id
    }

    pub fn current_scope(&self) -> Option<ScopeId> {
        self.active.last().copied()
    }

    /// Opens a new lexical scope, nested inside whatever scope is
    /// currently active.
    pub fn scope_begin(&mut self) -> ScopeId {
        let id = self.fresh_scope_id();
        self.active.push(id);
        id
    }

    /// Closes `scope`, marking every value declared in it as
    /// `out_of_scope` (not deleting it — a stale reference from an
    /// enclosing scope must still resolve to the same bytes until the
    /// frame holding it is itself popped).
    pub fn scope_end(&mut self, scope: ScopeId, values: &mut ValueArena) {
        debug_assert_eq!(self.active.last().copied(), Some(scope), "scope_end does not match innermost scope_begin");
        self.active.pop();
        values.mark_out_of_scope(scope);
    }

    pub fn is_active(&self, scope: ScopeId) -> bool {
        self.active.contains(&scope)
    }

    /// Pushes a new call frame: marks the arena's stack pointer and opens a
    /// fresh scope for the callee's locals.
    pub fn frame_push(&mut self, arena: &Arena, function_name: Symbol, params: Vec<ValueId>) {
        let arena_mark = arena.push_stack_frame();
        let scope_id = self.scope_begin();
        self.frames.push(StackFrame {
            function_name,
            params,
            locals: SymbolTable::new(),
            arena_mark,
            scope_id,
        });
    }

    /// Pops the innermost call frame: closes its scope (marking its locals
    /// out-of-scope) and releases every stack allocation made since the
    /// matching `frame_push` in one step.
    pub fn frame_pop(&mut self, arena: &mut Arena, values: &mut ValueArena) -> StackFrame {
        let frame = self.frames.pop().expect("frame_pop without matching frame_push");
        self.scope_end(frame.scope_id, values);
        arena.pop_stack_frame(frame.arena_mark);
        frame
    }

    pub fn current_frame(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    pub fn current_frame_mut(&mut self) -> Option<&mut StackFrame> {
        self.frames.last_mut()
    }

    pub fn call_depth(&self) -> usize {
        self.frames.len()
    }

    /// Looks `name` up in `table`, distinguishing "declared but its scope
    /// has ended" from "never declared" so the evaluator can raise the
    /// right diagnostic (§8 boundary scenario: out-of-scope vs undefined).
    pub fn lookup(&self, table: &SymbolTable, values: &ValueArena, name: Symbol) -> LookupResult {
        match table.get(name) {
            Some(TableEntry::Value { value, .. }) => {
                if values.get(*value).out_of_scope {
                    LookupResult::OutOfScope(*value)
                } else {
                    LookupResult::Found(*value)
                }
            }
            _ => LookupResult::Undefined,
        }
    }
}

impl Default for ScopeEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Mangles a file-local `static` variable's name to `/<file>/<func>/<name>`
/// so that same-named statics in different functions (or the same function
/// compiled from different files in a REPL session) never collide in the
/// globals table. `func` is empty for a file-scope static.
pub fn mangle_static_name(interner: &mut Interner, file: &str, func: &str, name: &str) -> Symbol {
    interner.intern_str(&format!("/{file}/{func}/{name}"))
}
