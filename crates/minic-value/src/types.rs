//! Type registry: constructs and deduplicates [`TypeId`]s (component 3 of
//! the spec). Scalar base types are singletons seeded at construction;
//! pointer and array types are interned by a `(constructor, operand)` key so
//! that e.g. every `int*` in a translation unit shares one `TypeId`.
//! Struct/union/enum types are identified by tag name and may exist in an
//! incomplete (forward-declared) state until [`TypeRegistry::complete_struct`]
//! registers their fields.

use minic_util::{define_idx, IndexVec, Symbol};
use rustc_hash::FxHashMap;
use thiserror::Error;

define_idx! {
    /// A stable, interned handle to a type descriptor. Two pointers to the
    /// same pointee, or two arrays of the same element and length, always
    /// share a `TypeId`.
    TypeId
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Base {
    Void,
    Char,
    Short,
    Int,
    Long,
    UnsignedChar,
    UnsignedShort,
    UnsignedInt,
    UnsignedLong,
    FP,
    Pointer,
    Array,
    Struct,
    Union,
    Enum,
    Function,
    Macro,
    GotoLabel,
    Type,
}

impl Base {
    /// Byte size for a scalar base. Panics (via `debug_assert`, caught in
    /// tests) for the structural bases, whose size depends on their operand
    /// or fields and is computed by [`TypeRegistry::size_of`] instead.
    fn scalar_size(self) -> Option<u32> {
        use Base::*;
        match self {
            Void => Some(0),
            Char | UnsignedChar => Some(1),
            Short | UnsignedShort => Some(2),
            Int | UnsignedInt => Some(4),
            Long | UnsignedLong => Some(8),
            FP => Some(8),
            Pointer => Some(8),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct StructField {
    pub name: Symbol,
    pub ty: TypeId,
    pub offset: u32,
}

#[derive(Clone)]
pub struct TypeDescriptor {
    pub base: Base,
    /// Pointee for `Pointer`, element type for `Array`.
    pub from_type: Option<TypeId>,
    /// Element count for `Array`; `0` denotes an incomplete array.
    pub array_size: u32,
    /// Tag name for `Struct`/`Union`/`Enum`.
    pub identifier: Option<Symbol>,
    pub size: u32,
    pub align: u32,
    /// `None` until `complete_struct` registers the field layout; presence
    /// of `Some` is what makes a struct/union type complete.
    pub fields: Option<Vec<StructField>>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("type already completed")]
    AlreadyComplete,
    #[error("unknown type id")]
    UnknownType,
    #[error("array has no declared size")]
    IncompleteArray,
    #[error("struct/union type is incomplete")]
    IncompleteStruct,
}

#[derive(Clone, PartialEq, Eq, Hash)]
enum TypeKey {
    Base(Base),
    Pointer(TypeId),
    Array(TypeId, u32),
    Tag(Symbol),
}

pub struct TypeRegistry {
    types: IndexVec<TypeId, TypeDescriptor>,
    cache: FxHashMap<TypeKey, TypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        let mut registry = Self { types: IndexVec::new(), cache: FxHashMap::default() };
        use Base::*;
        for base in [
            Void, Char, Short, Int, Long, UnsignedChar, UnsignedShort, UnsignedInt,
            UnsignedLong, FP,
        ] {
            registry.base_type(base);
        }
        registry
    }

    /// Returns the singleton `TypeId` for a scalar base, registering it on
    /// first use.
    pub fn base_type(&mut self, base: Base) -> TypeId {
        let size = base
            .scalar_size()
            .expect("base_type called with a structural Base; use pointer_to/array_of/declare_struct");
        let key = TypeKey::Base(base);
        if let Some(&id) = self.cache.get(&key) {
            return id;
        }
        let id = self.types.push(TypeDescriptor {
            base,
            from_type: None,
            array_size: 0,
            identifier: None,
            size,
            align: size.max(1),
            fields: None,
        });
        self.cache.insert(key, id);
        id
    }

    pub fn pointer_to(&mut self, target: TypeId) -> TypeId {
        let key = TypeKey::Pointer(target);
        if let Some(&id) = self.cache.get(&key) {
            return id;
        }
        let id = self.types.push(TypeDescriptor {
            base: Base::Pointer,
            from_type: Some(target),
            array_size: 0,
            identifier: None,
            size: 8,
            align: 8,
            fields: None,
        });
        self.cache.insert(key, id);
        id
    }

    /// `size == 0` denotes an incomplete array (`int x[]`); its `size_of`
    /// must be supplied by the caller via `size_of`'s override parameter
    /// once the real extent is known (e.g. from an initialiser).
    pub fn array_of(&mut self, element: TypeId, size: u32) -> Result<TypeId, TypeError> {
        let key = TypeKey::Array(element, size);
        if let Some(&id) = self.cache.get(&key) {
            return Ok(id);
        }
        let element_size = self.size_of(element, None)?;
        let id = self.types.push(TypeDescriptor {
            base: Base::Array,
            from_type: Some(element),
            array_size: size,
            identifier: None,
            size: element_size * size,
            align: self.types[element].align,
            fields: None,
        });
        self.cache.insert(key, id);
        Ok(id)
    }

    /// Returns the existing type for `tag`, or registers a new incomplete
    /// one. `base` must be `Struct`, `Union`, or `Enum`.
    pub fn declare_tagged(&mut self, tag: Symbol, base: Base) -> TypeId {
        debug_assert!(matches!(base, Base::Struct | Base::Union | Base::Enum));
        let key = TypeKey::Tag(tag);
        if let Some(&id) = self.cache.get(&key) {
            return id;
        }
        // Enums have no field layout of their own (their members are named
        // integer constants, tracked by the evaluator's symbol table, not
        // by the type); they are complete as soon as they are declared.
        let (size, align, fields) =
            if base == Base::Enum { (4, 4, Some(Vec::new())) } else { (0, 1, None) };
        let id = self.types.push(TypeDescriptor {
            base,
            from_type: None,
            array_size: 0,
            identifier: Some(tag),
            size,
            align,
            fields,
        });
        self.cache.insert(key, id);
        id
    }

    /// Registers the field layout for a previously-declared struct/union,
    /// computing byte offsets, padding to each field's alignment, and the
    /// overall size/alignment. Structs lay fields out sequentially; unions
    /// overlay every field at offset 0 and take the size of the largest.
    pub fn complete_struct(
        &mut self,
        type_id: TypeId,
        field_names_and_types: &[(Symbol, TypeId)],
    ) -> Result<(), TypeError> {
        if self.types[type_id].fields.is_some() {
            return Err(TypeError::AlreadyComplete);
        }
        let is_union = self.types[type_id].base == Base::Union;

        let mut fields = Vec::with_capacity(field_names_and_types.len());
        let mut offset = 0u32;
        let mut max_align = 1u32;
        let mut max_size = 0u32;
        for &(name, ty) in field_names_and_types {
            let field_size = self.size_of(ty, None)?;
            let field_align = self.types[ty].align.max(1);
            max_align = max_align.max(field_align);
            if is_union {
                fields.push(StructField { name, ty, offset: 0 });
                max_size = max_size.max(field_size);
            } else {
                offset = align_up(offset, field_align);
                fields.push(StructField { name, ty, offset });
                offset += field_size;
            }
        }
        let total = if is_union { max_size } else { align_up(offset, max_align) };

        let descriptor = &mut self.types[type_id];
        descriptor.fields = Some(fields);
        descriptor.size = total;
        descriptor.align = max_align;
        Ok(())
    }

    pub fn get(&self, type_id: TypeId) -> &TypeDescriptor {
        &self.types[type_id]
    }

    /// Byte footprint of `type_id`. `array_size_override` supplies the
    /// element count for an incomplete array whose size was not yet known
    /// at `array_of` time (e.g. `int x[] = {1, 2, 3}`).
    pub fn size_of(&self, type_id: TypeId, array_size_override: Option<u32>) -> Result<u32, TypeError> {
        let descriptor = &self.types[type_id];
        match descriptor.base {
            Base::Array if descriptor.array_size == 0 => {
                let count = array_size_override.ok_or(TypeError::IncompleteArray)?;
                let element = descriptor.from_type.expect("array type missing element type");
                Ok(self.size_of(element, None)? * count)
            }
            Base::Struct | Base::Union if descriptor.fields.is_none() => Err(TypeError::IncompleteStruct),
            _ => Ok(descriptor.size),
        }
    }

    pub fn is_complete(&self, type_id: TypeId) -> bool {
        let d = &self.types[type_id];
        match d.base {
            Base::Array => d.array_size != 0,
            Base::Struct | Base::Union => d.fields.is_some(),
            _ => true,
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn align_up(offset: u32, align: u32) -> u32 {
    (offset + align - 1) & !(align - 1)
}
