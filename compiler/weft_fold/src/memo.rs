//! Constant memo.
//!
//! Maps AST nodes already proven constant to their literal value. Entries
//! are recorded under two keys: the rewritten node and its pre-rewrite
//! original. The original matters because path expressions resolve to the
//! declaration node as it was before this pass rewrote it; without the
//! second key, a reference visited after its declaration would miss.
//!
//! The memo is insert-only and lives for one invocation of the pass.

use rustc_hash::FxHashMap;

use weft_ir::{DeclId, ExprId};

/// Insert-only map from proven-constant nodes to their constant value.
///
/// An entry's value is always a fully constant expression: a `Constant`, a
/// `BoolLiteral`, or a `List` whose every component is constant.
#[derive(Default, Debug)]
pub struct ConstantMemo {
    exprs: FxHashMap<ExprId, ExprId>,
    decls: FxHashMap<DeclId, ExprId>,
}

impl ConstantMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a constant value under both the rewritten node and its
    /// pre-rewrite original. Existing entries are never overwritten.
    pub fn record(&mut self, node: ExprId, original: ExprId, value: ExprId) {
        self.exprs.entry(node).or_insert(value);
        self.exprs.entry(original).or_insert(value);
    }

    /// The memoized constant for an expression node, if any.
    #[inline]
    pub fn expr_constant(&self, id: ExprId) -> Option<ExprId> {
        self.exprs.get(&id).copied()
    }

    /// Record the constant value of a declaration.
    pub fn record_decl(&mut self, decl: DeclId, value: ExprId) {
        self.decls.entry(decl).or_insert(value);
    }

    /// The memoized constant for a declaration, if any.
    #[inline]
    pub fn decl_constant(&self, decl: DeclId) -> Option<ExprId> {
        self.decls.get(&decl).copied()
    }

    /// Number of memoized expression nodes.
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
