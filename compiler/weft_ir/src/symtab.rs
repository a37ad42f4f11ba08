//! Symbol table mapping names to their declaring node.
//!
//! Populated by name resolution; consulted by later passes to resolve path
//! expressions. Only constant declarations participate; parser states live
//! in their own namespace and are never resolved through this table.

use rustc_hash::FxHashMap;

use crate::{DeclId, Name};

/// Name-to-declaration table for constant declarations.
#[derive(Default, Debug)]
pub struct SymbolTable {
    decls: FxHashMap<Name, DeclId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration. Later declarations shadow earlier ones of the
    /// same name.
    pub fn declare(&mut self, name: Name, decl: DeclId) {
        self.decls.insert(name, decl);
    }

    /// Resolve a path to its declaring node.
    #[inline]
    pub fn get_declaration(&self, name: Name) -> Option<DeclId> {
        self.decls.get(&name).copied()
    }
}
