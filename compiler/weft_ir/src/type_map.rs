//! Node-to-type map produced by type checking.
//!
//! Passes that run after the type checker consult this map for the type of
//! any expression node, and record here which nodes are compile-time
//! constants. Entries are keyed on node identity (`ExprId`), so replacement
//! nodes allocated by a rewriting pass get their own entries.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{ExprId, Type};

/// Types and compile-time-constant marks for expression nodes.
#[derive(Default, Debug)]
pub struct TypeMap {
    types: FxHashMap<ExprId, Type>,
    constants: FxHashSet<ExprId>,
}

impl TypeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The type of a node, if the type checker recorded one.
    #[inline]
    pub fn get(&self, id: ExprId) -> Option<&Type> {
        self.types.get(&id)
    }

    /// The type of a node that must have one.
    ///
    /// # Panics
    /// Panics if the node has no recorded type; the type checker is
    /// expected to have typed every node before this is called.
    #[track_caller]
    pub fn get_required(&self, id: ExprId) -> &Type {
        // weft_diagnostic's bug! macro lives downstream of this crate, so
        // the panic here spells out the same "internal compiler error"
        // prefix by hand.
        self.types
            .get(&id)
            .unwrap_or_else(|| panic!("internal compiler error: no type recorded for {id:?}"))
    }

    /// Record the type of a node.
    pub fn set_type(&mut self, id: ExprId, ty: Type) {
        self.types.insert(id, ty);
    }

    /// Mark a node as a compile-time constant.
    pub fn set_compile_time_constant(&mut self, id: ExprId) {
        self.constants.insert(id);
    }

    /// Whether a node has been marked as a compile-time constant.
    #[inline]
    pub fn is_compile_time_constant(&self, id: ExprId) -> bool {
        self.constants.contains(&id)
    }
}
