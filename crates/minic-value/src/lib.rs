//! Value and type model: how C values are represented, typed, allocated,
//! scoped, and bound to identifiers (components 3, 4, 5, and 8 of the
//! interpreter core).

pub mod scope;
pub mod table;
pub mod types;
pub mod value;

pub use scope::{mangle_static_name, LookupResult, ScopeEngine, ScopeId, StackFrame};
pub use table::{SymbolTable, TableEntry, TableError};
pub use types::{Base, StructField, TypeDescriptor, TypeError, TypeId, TypeRegistry};
pub use value::{Placement, Storage, Value, ValueArena, ValueError, ValueId, MAX_TMP_COPY_BUF};
