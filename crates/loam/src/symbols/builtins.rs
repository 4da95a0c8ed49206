//! The built-in type prelude installed into every root scope.

use super::{ScopeError, Symbol, SymbolTable, SymbolType, SymbolTypeFlags};
use crate::utf8::Text;

const TYPE: SymbolTypeFlags = SymbolTypeFlags::TYPE;
const INTEGER: SymbolTypeFlags = SymbolTypeFlags::INTEGER;
const UNSIGNED: SymbolTypeFlags = SymbolTypeFlags::UNSIGNED;

/// Identifier and flag set for every built-in type symbol.
#[rustfmt::skip]
const BUILTIN_TYPES: [(&str, SymbolTypeFlags); 18] = [
    ("type",   TYPE),
    ("none",   TYPE.union(SymbolTypeFlags::NONE)),
    ("auto",   TYPE.union(SymbolTypeFlags::AUTO)),
    ("Bool",   TYPE.union(SymbolTypeFlags::BOOL)),
    ("Int8",   TYPE.union(INTEGER)),
    ("Int16",  TYPE.union(INTEGER).union(SymbolTypeFlags::INT16)),
    ("Int32",  TYPE.union(INTEGER).union(SymbolTypeFlags::INT32)),
    ("Int64",  TYPE.union(INTEGER).union(SymbolTypeFlags::INT64)),
    ("UInt8",  TYPE.union(UNSIGNED).union(INTEGER)),
    ("UInt16", TYPE.union(UNSIGNED).union(INTEGER).union(SymbolTypeFlags::INT16)),
    ("UInt32", TYPE.union(UNSIGNED).union(INTEGER).union(SymbolTypeFlags::INT32)),
    ("UInt64", TYPE.union(UNSIGNED).union(INTEGER).union(SymbolTypeFlags::INT64)),
    ("Char",   TYPE.union(SymbolTypeFlags::CHARACTER)),
    ("String", TYPE.union(SymbolTypeFlags::CHARACTER).union(SymbolTypeFlags::LIST)),
    ("List",   TYPE.union(SymbolTypeFlags::LIST)),
    ("Array",  TYPE.union(SymbolTypeFlags::ARRAY)),
    ("Dict",   TYPE.union(SymbolTypeFlags::STRUCT).union(SymbolTypeFlags::LIST)),
    ("Set",    TYPE.union(SymbolTypeFlags::STRUCT).union(SymbolTypeFlags::ARRAY)),
];

/// Installs the prelude into `table`, failing on the first symbol that
/// cannot be inserted.
pub(super) fn install(table: &mut SymbolTable) -> Result<(), ScopeError> {
    for (ident, flags) in BUILTIN_TYPES {
        let symbol = Symbol::with_type(Text::from(ident), SymbolType::new(flags));
        if !table.insert(symbol) {
            return Err(ScopeError::Prelude(ident));
        }
    }
    Ok(())
}
