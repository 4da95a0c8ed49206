//! Symbol tables and the lexical scope stack.
//!
//! Scopes form a tree: each table holds its own bindings plus a weak
//! reference to the scope that encloses it, so a chain can never cycle
//! and popping a scope whose parent has already been released degrades to
//! a no-op. The parser-facing handle is a [`ScopeStack`], which owns the
//! innermost scope through shared ownership — an outer holder releasing
//! its reference cannot invalidate a scope that is still reachable.
//!
//! A fresh stack starts with the built-in type prelude (`type`, `none`,
//! `auto`, `Bool`, the sized integers, `Char`, `String` and the container
//! types) installed in the root scope.

mod builtins;

use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    rc::{Rc, Weak},
};

use bitflags::bitflags;
use thiserror::Error;

use crate::utf8::Text;

bitflags! {
    /// The independent type flags a symbol's type is a bag of.
    ///
    /// Width and signedness are encoded by absence: a numeric type with no
    /// width flag is 8-bit and one with no [`UNSIGNED`](Self::UNSIGNED)
    /// flag is signed. [`INTEGER`](Self::INTEGER) marks the numeric types
    /// themselves so that `Int8` is distinguishable from a bare `type`.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct SymbolTypeFlags: u32 {
        /// A numeric integer type; doubles as the signed, 8-bit default.
        const INTEGER = 1 << 0;
        /// Unsigned rather than signed.
        const UNSIGNED = 1 << 1;
        /// 16 bits wide.
        const INT16 = 1 << 2;
        /// 32 bits wide.
        const INT32 = 1 << 3;
        /// 64 bits wide.
        const INT64 = 1 << 4;
        /// A character type.
        const CHARACTER = 1 << 8;
        /// A list; combined with `CHARACTER` this is a string.
        const LIST = 1 << 9;
        /// A structure.
        const STRUCT = 1 << 10;
        /// An array; `STRUCT | ARRAY` is a set.
        const ARRAY = 1 << 11;
        /// The boolean type.
        const BOOL = 1 << 12;
        /// A function.
        const FUNCTION = 1 << 13;
        /// A reference to some other type.
        const REFERENCE = 1 << 14;
        /// A pointer to some other type.
        const POINTER = 1 << 15;
        /// A template type or value pack.
        const PACK = 1 << 16;
        /// A placeholder resolved from the right-hand side of an
        /// assignment.
        const AUTO = 1 << 17;
        /// The none type.
        const NONE = 1 << 18;
        /// The symbol names a type rather than a value of that type.
        const TYPE = 1 << 19;
    }
}

/// The type of a symbol: a set of [`SymbolTypeFlags`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SymbolType(SymbolTypeFlags);

impl SymbolType {
    /// A type built from the given flag set.
    #[must_use]
    pub const fn new(flags: SymbolTypeFlags) -> Self {
        Self(flags)
    }

    /// The raw flag set.
    #[must_use]
    pub const fn flags(self) -> SymbolTypeFlags {
        self.0
    }

    /// `true` when no flags are set, which no well-formed symbol has.
    #[must_use]
    pub const fn is_invalid(self) -> bool {
        self.0.is_empty()
    }

    /// `true` when any of `flags` is present.
    #[must_use]
    pub const fn includes(self, flags: SymbolTypeFlags) -> bool {
        self.0.intersects(flags)
    }

    /// This type with `flags` removed.
    #[must_use]
    pub const fn without(self, flags: SymbolTypeFlags) -> Self {
        Self(self.0.difference(flags))
    }

    /// The type of a *value* of this type: the `TYPE` marker is dropped,
    /// except on the `type` symbol itself, which stays as it is.
    #[must_use]
    pub fn for_value(self) -> Self {
        if self.0 == SymbolTypeFlags::TYPE {
            self
        } else {
            self.without(SymbolTypeFlags::TYPE)
        }
    }
}

impl From<SymbolTypeFlags> for SymbolType {
    fn from(flags: SymbolTypeFlags) -> Self {
        Self(flags)
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.includes(SymbolTypeFlags::REFERENCE) {
            "reference "
        } else if self.includes(SymbolTypeFlags::POINTER) {
            "pointer "
        } else {
            ""
        };
        let sign = if self.includes(SymbolTypeFlags::UNSIGNED) {
            "u"
        } else {
            ""
        };
        let base = self.0.difference(
            SymbolTypeFlags::REFERENCE | SymbolTypeFlags::POINTER | SymbolTypeFlags::UNSIGNED,
        );
        let is_type = base != SymbolTypeFlags::TYPE && base.contains(SymbolTypeFlags::TYPE);
        let name = base_name(base.difference(SymbolTypeFlags::TYPE));
        if is_type {
            write!(formatter, "type {kind}'{sign}{name}'")
        } else if base == SymbolTypeFlags::TYPE {
            write!(formatter, "{kind}type")
        } else {
            write!(formatter, "{kind}{sign}{name}")
        }
    }
}

fn base_name(flags: SymbolTypeFlags) -> &'static str {
    let numeric = flags.difference(SymbolTypeFlags::INTEGER);
    if flags.is_empty() {
        // A symbol whose type has not been determined yet.
        "invalid"
    } else if flags == SymbolTypeFlags::INTEGER {
        "Int8"
    } else if numeric == SymbolTypeFlags::INT16 {
        "Int16"
    } else if numeric == SymbolTypeFlags::INT32 {
        "Int32"
    } else if numeric == SymbolTypeFlags::INT64 {
        "Int64"
    } else if flags == SymbolTypeFlags::CHARACTER {
        "Char"
    } else if flags == SymbolTypeFlags::CHARACTER | SymbolTypeFlags::LIST {
        "String"
    } else if flags == SymbolTypeFlags::BOOL {
        "Bool"
    } else if flags == SymbolTypeFlags::STRUCT {
        "class"
    } else if flags == SymbolTypeFlags::LIST {
        "List"
    } else if flags == SymbolTypeFlags::ARRAY {
        "Array"
    } else if flags == SymbolTypeFlags::STRUCT | SymbolTypeFlags::LIST {
        "Dict"
    } else if flags == SymbolTypeFlags::STRUCT | SymbolTypeFlags::ARRAY {
        "Set"
    } else if flags == SymbolTypeFlags::AUTO {
        "auto"
    } else if flags == SymbolTypeFlags::NONE {
        "none"
    } else if flags == SymbolTypeFlags::FUNCTION {
        "function"
    } else {
        "invalid"
    }
}

/// An identifier bound in a scope, with its type.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Symbol {
    ident: Text,
    symbol_type: SymbolType,
}

impl Symbol {
    /// A symbol with an as-yet-undetermined type.
    #[must_use]
    pub fn new(ident: Text) -> Self {
        Self {
            ident,
            symbol_type: SymbolType::default(),
        }
    }

    /// A symbol with a known type.
    #[must_use]
    pub fn with_type(ident: Text, symbol_type: SymbolType) -> Self {
        Self { ident, symbol_type }
    }

    /// The identifier this symbol binds.
    #[must_use]
    pub fn ident(&self) -> &Text {
        &self.ident
    }

    /// The symbol's type.
    #[must_use]
    pub const fn symbol_type(&self) -> SymbolType {
        self.symbol_type
    }

    /// Replaces the symbol's type.
    pub const fn set_type(&mut self, symbol_type: SymbolType) {
        self.symbol_type = symbol_type;
    }

    /// `true` when the symbol names a type.
    #[must_use]
    pub fn is_type(&self) -> bool {
        self.symbol_type.includes(SymbolTypeFlags::TYPE)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<Symbol {} -> {}>", self.ident, self.symbol_type)
    }
}

/// A shared handle to a scope.
pub type ScopeHandle = Rc<RefCell<SymbolTable>>;

/// One lexical scope: identifier bindings plus a weak link to the
/// enclosing scope.
#[derive(Default)]
pub struct SymbolTable {
    parent: Weak<RefCell<SymbolTable>>,
    table: BTreeMap<Text, Symbol>,
}

impl SymbolTable {
    /// A root scope with no parent.
    #[must_use]
    pub fn new_root() -> Self {
        Self::default()
    }

    /// A scope nested inside `parent`. The link is weak: the child never
    /// keeps its parent alive.
    #[must_use]
    pub fn new_child(parent: &ScopeHandle) -> Self {
        Self {
            parent: Rc::downgrade(parent),
            table: BTreeMap::new(),
        }
    }

    /// The enclosing scope, if it is still alive.
    #[must_use]
    pub fn parent(&self) -> Option<ScopeHandle> {
        self.parent.upgrade()
    }

    /// Number of bindings in this scope alone.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// `true` when this scope binds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Binds a fresh, untyped symbol for `ident` and returns it for the
    /// caller to complete. Fails when `ident` is already bound here.
    pub fn add(&mut self, ident: Text) -> Option<&mut Symbol> {
        if self.table.contains_key(&ident) {
            log::error!("symbol `{ident}` already defined in current scope");
            return None;
        }
        let symbol = Symbol::new(ident.clone());
        Some(self.table.entry(ident).or_insert(symbol))
    }

    /// Inserts a complete symbol. Returns `false` when its identifier is
    /// already bound in this exact scope — ancestor bindings do not
    /// conflict.
    pub fn insert(&mut self, symbol: Symbol) -> bool {
        if self.table.contains_key(symbol.ident()) {
            log::error!(
                "symbol `{}` already defined in current scope",
                symbol.ident()
            );
            return false;
        }
        self.table.insert(symbol.ident().clone(), symbol);
        true
    }

    /// Looks `ident` up in this scope only.
    #[must_use]
    pub fn find_local(&self, ident: &str) -> Option<Symbol> {
        self.table.get(&Text::from(ident)).cloned()
    }

    /// Looks `ident` up in this scope, then walks the parent chain,
    /// returning the innermost binding.
    #[must_use]
    pub fn find(&self, ident: &str) -> Option<Symbol> {
        if let Some(symbol) = self.find_local(ident) {
            return Some(symbol);
        }
        self.parent.upgrade()?.borrow().find(ident)
    }
}

/// Installing the prelude into a fresh root scope failed.
#[derive(Error, Debug)]
pub enum ScopeError {
    /// A built-in type could not be inserted into the root scope.
    #[error("built-in type `{0}` could not be installed")]
    Prelude(&'static str),
}

/// The parser's handle on the innermost scope.
///
/// Construction builds the root scope and installs the built-in type
/// prelude; [`push`](ScopeStack::push) opens a nested scope and
/// [`pop`](ScopeStack::pop) returns to the parent.
pub struct ScopeStack {
    current: ScopeHandle,
}

impl ScopeStack {
    /// A stack holding a root scope populated with the built-in types.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Prelude`] if any built-in fails to install,
    /// which is fatal to parser construction.
    pub fn new() -> Result<Self, ScopeError> {
        let mut root = SymbolTable::new_root();
        builtins::install(&mut root)?;
        Ok(Self {
            current: Rc::new(RefCell::new(root)),
        })
    }

    /// The innermost scope.
    #[must_use]
    pub fn current(&self) -> ScopeHandle {
        Rc::clone(&self.current)
    }

    /// Opens a scope nested in the current one and makes it current.
    pub fn push(&mut self) -> ScopeHandle {
        let child = SymbolTable::new_child(&self.current);
        self.current = Rc::new(RefCell::new(child));
        self.current()
    }

    /// Closes the current scope, making its parent current again.
    ///
    /// Returns `false` — leaving the current scope in place — when the
    /// parent has already been released, or at the root.
    pub fn pop(&mut self) -> bool {
        let parent = self.current.borrow().parent();
        match parent {
            Some(parent) => {
                self.current = parent;
                true
            }
            None => {
                log::debug!("pop with no live parent scope; current scope retained");
                false
            }
        }
    }

    /// Inserts a symbol into the current scope; `false` on a local
    /// duplicate.
    pub fn insert(&self, symbol: Symbol) -> bool {
        self.current.borrow_mut().insert(symbol)
    }

    /// Looks `ident` up in the current scope only.
    #[must_use]
    pub fn find_local(&self, ident: &str) -> Option<Symbol> {
        self.current.borrow().find_local(ident)
    }

    /// Looks `ident` up through the scope chain.
    #[must_use]
    pub fn find(&self, ident: &str) -> Option<Symbol> {
        self.current.borrow().find(ident)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::{ScopeStack, Symbol, SymbolTable, SymbolType, SymbolTypeFlags};
    use crate::utf8::Text;

    fn typed(ident: &str, flags: SymbolTypeFlags) -> Symbol {
        Symbol::with_type(Text::from(ident), SymbolType::new(flags))
    }

    #[test]
    fn insert_then_find_local() {
        let mut table = SymbolTable::new_root();
        assert!(table.is_empty());
        assert!(table.insert(typed("x", SymbolTypeFlags::BOOL)));
        assert_eq!(table.len(), 1);
        let found = table.find_local("x").unwrap();
        assert_eq!(found.symbol_type().flags(), SymbolTypeFlags::BOOL);
        assert!(table.find_local("y").is_none());
    }

    #[test]
    fn duplicate_insert_fails() {
        let mut table = SymbolTable::new_root();
        assert!(table.insert(typed("x", SymbolTypeFlags::BOOL)));
        assert!(!table.insert(typed("x", SymbolTypeFlags::LIST)));
        // The original binding survives.
        assert_eq!(
            table.find_local("x").unwrap().symbol_type().flags(),
            SymbolTypeFlags::BOOL
        );
        assert!(table.add(Text::from("x")).is_none());
    }

    #[test]
    fn find_walks_the_parent_chain() {
        let mut stack = ScopeStack::new().unwrap();
        assert!(stack.insert(typed("outer", SymbolTypeFlags::BOOL)));
        stack.push();
        assert!(stack.insert(typed("inner", SymbolTypeFlags::LIST)));

        // Local search sees only the innermost scope.
        assert!(stack.find_local("outer").is_none());
        assert!(stack.find_local("inner").is_some());
        // Full search walks outwards.
        assert!(stack.find("outer").is_some());

        // Shadowing is permitted across scopes; the innermost binding
        // wins.
        assert!(stack.insert(typed("outer", SymbolTypeFlags::ARRAY)));
        assert_eq!(
            stack.find("outer").unwrap().symbol_type().flags(),
            SymbolTypeFlags::ARRAY
        );

        assert!(stack.pop());
        assert_eq!(
            stack.find("outer").unwrap().symbol_type().flags(),
            SymbolTypeFlags::BOOL
        );
    }

    #[test]
    fn pop_at_root_is_a_no_op() {
        let mut stack = ScopeStack::new().unwrap();
        let root = stack.current();
        assert!(!stack.pop());
        assert!(Rc::ptr_eq(&root, &stack.current()));
    }

    #[test]
    fn pop_with_dead_parent_is_a_no_op() {
        let parent = Rc::new(RefCell::new(SymbolTable::new_root()));
        let child = SymbolTable::new_child(&parent);
        drop(parent);
        assert!(child.parent().is_none());
        // A find through the dead link stops at this scope.
        assert!(child.find("type").is_none());
    }

    #[test]
    fn prelude_is_installed() {
        let stack = ScopeStack::new().unwrap();
        let int32 = stack.find("Int32").unwrap();
        assert!(int32.is_type());
        assert_eq!(
            int32.symbol_type().flags(),
            SymbolTypeFlags::TYPE | SymbolTypeFlags::INTEGER | SymbolTypeFlags::INT32
        );
        let string = stack.find("String").unwrap();
        assert_eq!(
            string.symbol_type().flags(),
            SymbolTypeFlags::TYPE | SymbolTypeFlags::CHARACTER | SymbolTypeFlags::LIST
        );
        assert!(stack.find("Set").is_some());
        assert!(stack.find("Int128").is_none());
    }

    #[test]
    fn value_types_drop_the_type_marker() {
        let uint8 = SymbolType::new(
            SymbolTypeFlags::TYPE | SymbolTypeFlags::UNSIGNED | SymbolTypeFlags::INTEGER,
        );
        assert_eq!(
            uint8.for_value().flags(),
            SymbolTypeFlags::UNSIGNED | SymbolTypeFlags::INTEGER
        );
        // The `type` symbol itself keeps its marker.
        let meta = SymbolType::new(SymbolTypeFlags::TYPE);
        assert_eq!(meta.for_value(), meta);
    }

    #[test]
    fn display_names() {
        let show = |flags: SymbolTypeFlags| SymbolType::new(flags).to_string();
        assert_eq!(show(SymbolTypeFlags::INTEGER), "Int8");
        assert_eq!(
            show(SymbolTypeFlags::INTEGER | SymbolTypeFlags::UNSIGNED | SymbolTypeFlags::INT64),
            "uInt64"
        );
        assert_eq!(
            show(SymbolTypeFlags::TYPE | SymbolTypeFlags::BOOL),
            "type 'Bool'"
        );
        assert_eq!(
            show(SymbolTypeFlags::REFERENCE | SymbolTypeFlags::CHARACTER | SymbolTypeFlags::LIST),
            "reference String"
        );
        assert_eq!(show(SymbolTypeFlags::TYPE), "type");
        // An untyped symbol is not an Int8: the empty flag set has no
        // name of its own.
        assert_eq!(show(SymbolTypeFlags::empty()), "invalid");
    }
}
