//! Value model (component 4): uniform tagged value objects with storage
//! location, ownership, and scope tracking, plus the arena-backed
//! allocation operations from §4.4.
//!
//! `Storage` is the ownership sum type that replaces picoc's four-flag
//! scheme (see DESIGN.md, "Ownership of values" / §9 of the expanded spec):
//! a value's bytes live inline in the `Value` record itself (for anything
//! that fits in 8 bytes — the common case of scalars), in the shared
//! arena's heap or stack region, or are a transparent alias of another
//! value (used for `l-value`s derived from a struct member or array
//! element access).

use minic_util::{define_idx, Arena, ArenaError, ArenaPtr, IndexVec};
use thiserror::Error;

use crate::scope::ScopeId;
use crate::types::{TypeError, TypeId, TypeRegistry};

define_idx! {
    /// A stable handle to an allocated [`Value`].
    ValueId
}

/// Largest byte count `alloc_value_and_copy` will copy from a caller-owned
/// buffer in one call — a defensive bound against accidentally copying an
/// entire array/struct initialiser through a temporary stack buffer.
pub const MAX_TMP_COPY_BUF: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Storage {
    Inline([u8; 8]),
    ArenaHeap(ArenaPtr),
    ArenaStack(ArenaPtr),
    Shared(ValueId),
}

#[derive(Clone, Copy, Debug)]
pub struct Value {
    pub type_id: TypeId,
    pub storage: Storage,
    pub is_lvalue: bool,
    /// For a value derived from another (a struct member, an array
    /// element, a dereferenced pointer): the value it was derived from.
    /// Contract: `lvalue_from` is only `Some` when `storage` is
    /// `Storage::Shared`, and the referenced `ValueId` always outlives
    /// `self` (it is freed no earlier, since `self` exists only to name a
    /// sub-range of it).
    pub lvalue_from: Option<ValueId>,
    pub scope_id: ScopeId,
    pub out_of_scope: bool,
}

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error(transparent)]
    Arena(#[from] ArenaError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error("copy of {len} bytes exceeds MAX_TMP_COPY_BUF ({MAX_TMP_COPY_BUF})")]
    CopyTooLarge { len: usize },
}

/// Where a value's bytes should be allocated, when allocation is needed at
/// all (an `Inline` value never touches the arena).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Heap,
    Stack,
}

/// Owns the table of live [`Value`] records. The bytes a non-inline value
/// points at live in the [`Arena`] passed explicitly to each operation
/// (owned by `minic_core::Interpreter`, not by this type), mirroring the
/// the teacher's separation between object metadata and the bump region
/// backing it.
pub struct ValueArena {
    values: IndexVec<ValueId, Value>,
}

impl ValueArena {
    pub fn new() -> Self {
        Self { values: IndexVec::new() }
    }

    pub fn get(&self, id: ValueId) -> &Value {
        &self.values[id]
    }

    fn storage_for(
        arena: &mut Arena,
        types: &TypeRegistry,
        type_id: TypeId,
        placement: Placement,
    ) -> Result<Storage, ValueError> {
        let size = types.size_of(type_id, None)? as usize;
        if size <= 8 {
            return Ok(Storage::Inline([0u8; 8]));
        }
        Ok(match placement {
            Placement::Heap => Storage::ArenaHeap(arena.alloc_heap(size)?),
            Placement::Stack => Storage::ArenaStack(arena.alloc_stack(size)?),
        })
    }

    /// Allocates a zeroed value of `type_id`, backed by the heap or stack
    /// end of `arena` per `placement` (inline if it fits in 8 bytes).
    pub fn alloc_value_from_type(
        &mut self,
        arena: &mut Arena,
        types: &TypeRegistry,
        type_id: TypeId,
        placement: Placement,
        scope_id: ScopeId,
    ) -> Result<ValueId, ValueError> {
        let storage = Self::storage_for(arena, types, type_id, placement)?;
        Ok(self.values.push(Value {
            type_id,
            storage,
            is_lvalue: true,
            lvalue_from: None,
            scope_id,
            out_of_scope: false,
        }))
    }

    /// Identical to `alloc_value_from_type`, kept as a distinct name to
    /// mirror the original API's `VariableAllocValueAndData`, which callers
    /// use when they intend to overwrite the bytes immediately afterwards.
    pub fn alloc_value_and_data(
        &mut self,
        arena: &mut Arena,
        types: &TypeRegistry,
        type_id: TypeId,
        placement: Placement,
        scope_id: ScopeId,
    ) -> Result<ValueId, ValueError> {
        self.alloc_value_from_type(arena, types, type_id, placement, scope_id)
    }

    /// Allocates a value of `type_id` and copies `data` into it.
    pub fn alloc_value_and_copy(
        &mut self,
        arena: &mut Arena,
        types: &TypeRegistry,
        type_id: TypeId,
        data: &[u8],
        placement: Placement,
        scope_id: ScopeId,
    ) -> Result<ValueId, ValueError> {
        if data.len() > MAX_TMP_COPY_BUF {
            return Err(ValueError::CopyTooLarge { len: data.len() });
        }
        let id = self.alloc_value_from_type(arena, types, type_id, placement, scope_id)?;
        self.write(arena, id, data);
        Ok(id)
    }

    /// Wraps bytes that already live somewhere in `arena` (e.g. a struct
    /// member's sub-range) as a value in its own right, without copying.
    pub fn alloc_value_from_existing_data(
        &mut self,
        type_id: TypeId,
        storage: Storage,
        scope_id: ScopeId,
    ) -> ValueId {
        self.values.push(Value {
            type_id,
            storage,
            is_lvalue: true,
            lvalue_from: None,
            scope_id,
            out_of_scope: false,
        })
    }

    /// Creates a transparent alias of `target` — used for l-values derived
    /// from another value (a struct field, an array element) that must
    /// read/write through to the same bytes.
    pub fn alloc_value_shared(&mut self, target: ValueId, type_id: TypeId, scope_id: ScopeId) -> ValueId {
        self.values.push(Value {
            type_id,
            storage: Storage::Shared(target),
            is_lvalue: true,
            lvalue_from: Some(target),
            scope_id,
            out_of_scope: false,
        })
    }

    /// Re-allocates `id`'s storage for `new_type`, freeing the old
    /// heap/stack allocation if any. Used when an incomplete array is
    /// resized once its initialiser's element count becomes known.
    pub fn realloc(
        &mut self,
        arena: &mut Arena,
        types: &TypeRegistry,
        id: ValueId,
        new_type: TypeId,
        placement: Placement,
    ) -> Result<(), ValueError> {
        let old_storage = self.values[id].storage;
        if let Storage::ArenaHeap(ptr) = old_storage {
            let old_size = types.size_of(self.values[id].type_id, None)? as usize;
            arena.free_heap(ptr, old_size);
        }
        let storage = Self::storage_for(arena, types, new_type, placement)?;
        let value = &mut self.values[id];
        value.type_id = new_type;
        value.storage = storage;
        Ok(())
    }

    /// Releases `id`'s arena allocation, if it owns one. `Inline` and
    /// `Shared` values have nothing to free; stack allocations are normally
    /// released in bulk by `ScopeEngine::frame_pop`, but a caller that
    /// knows a value was its frame's most recent stack allocation may free
    /// it early.
    pub fn free(&mut self, arena: &mut Arena, types: &TypeRegistry, id: ValueId) -> Result<(), ValueError> {
        let value = self.values[id];
        match value.storage {
            Storage::ArenaHeap(ptr) => {
                let size = types.size_of(value.type_id, None)? as usize;
                arena.free_heap(ptr, size);
            }
            Storage::ArenaStack(ptr) => {
                let size = types.size_of(value.type_id, None)? as usize;
                // Ignore mismatch: the common case frees via frame_pop in
                // bulk, so an out-of-order free_heap-style pop here is a
                // best-effort reclaim rather than a hard requirement.
                let _ = arena.pop_stack(ptr, size);
            }
            Storage::Inline(_) | Storage::Shared(_) => {}
        }
        Ok(())
    }

    /// Reads `id`'s current bytes, following through `Shared` aliases.
    pub fn read(&self, arena: &Arena, types: &TypeRegistry, id: ValueId) -> Vec<u8> {
        let value = self.values[id];
        match value.storage {
            Storage::Inline(bytes) => {
                let size = types.size_of(value.type_id, None).unwrap_or(8) as usize;
                bytes[..size.min(8)].to_vec()
            }
            Storage::ArenaHeap(ptr) | Storage::ArenaStack(ptr) => {
                let size = types.size_of(value.type_id, None).unwrap_or(0) as usize;
                arena.read(ptr, size).to_vec()
            }
            Storage::Shared(target) => self.read(arena, types, target),
        }
    }

    /// Overwrites `id`'s bytes, following through `Shared` aliases.
    pub fn write(&mut self, arena: &mut Arena, id: ValueId, data: &[u8]) {
        let storage = self.values[id].storage;
        match storage {
            Storage::Inline(mut bytes) => {
                let n = data.len().min(8);
                bytes[..n].copy_from_slice(&data[..n]);
                self.values[id].storage = Storage::Inline(bytes);
            }
            Storage::ArenaHeap(ptr) | Storage::ArenaStack(ptr) => arena.write(ptr, data),
            Storage::Shared(target) => self.write(arena, target, data),
        }
    }

    pub fn mark_out_of_scope(&mut self, scope: ScopeId) {
        for value in self.values.iter_mut() {
            if value.scope_id == scope {
                value.out_of_scope = true;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for ValueArena {
    fn default() -> Self {
        Self::new()
    }
}
