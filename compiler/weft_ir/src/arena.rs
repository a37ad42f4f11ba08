//! Arena allocation for the flat AST.
//!
//! All expressions live in one contiguous vector; child references are
//! `ExprId` indices and child lists are ranges into flattened side arrays.
//! Rewriting passes allocate replacement nodes into the same arena, so a
//! node's identity (its index) is stable for the arena's lifetime.
//!
//! # Capacity Limits
//! - Max expressions: 4 billion (`u32::MAX`)
//! - Max list length: 65,535 (`u16::MAX`)

use std::fmt;

use crate::ast::{Expr, SelectCase};
use crate::{CaseRange, ExprId, ExprRange};

/// Panic helper for capacity overflow (cold path, never inlined).
#[cold]
#[inline(never)]
fn panic_capacity_exceeded(value: usize, context: &str, max: u64) -> ! {
    panic!("arena capacity exceeded: {context} has {value} elements, max is {max}")
}

/// Convert usize to u32, panicking with a clear message on overflow.
#[inline]
fn to_u32(value: usize, context: &str) -> u32 {
    u32::try_from(value)
        .unwrap_or_else(|_| panic_capacity_exceeded(value, context, u64::from(u32::MAX)))
}

/// Convert usize to u16, panicking with a clear message on overflow.
#[inline]
fn to_u16(value: usize, context: &str) -> u16 {
    u16::try_from(value)
        .unwrap_or_else(|_| panic_capacity_exceeded(value, context, u64::from(u16::MAX)))
}

/// Contiguous storage for all expressions in a module.
#[derive(Clone, Default)]
pub struct ExprArena {
    /// All expressions (indexed by `ExprId`).
    exprs: Vec<Expr>,

    /// Flattened expression lists (for `List` components).
    expr_lists: Vec<ExprId>,

    /// Flattened select cases (for `Select` arms).
    cases: Vec<SelectCase>,
}

impl ExprArena {
    /// Create a new empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, return its ID.
    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(expr);
        id
    }

    /// Get an expression by ID.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Number of expressions allocated.
    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Allocate an expression list, return its range.
    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = to_u32(self.expr_lists.len(), "expression lists");
        self.expr_lists.extend(exprs);
        let len = to_u16(self.expr_lists.len() - start as usize, "expression list");
        ExprRange::new(start, len)
    }

    /// Get an expression list by range.
    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        let end = start + range.len as usize;
        &self.expr_lists[start..end]
    }

    /// Allocate select cases, return their range.
    pub fn alloc_cases(&mut self, cases: impl IntoIterator<Item = SelectCase>) -> CaseRange {
        let start = to_u32(self.cases.len(), "select cases");
        self.cases.extend(cases);
        let len = to_u16(self.cases.len() - start as usize, "select case list");
        CaseRange::new(start, len)
    }

    /// Get select cases by range.
    #[inline]
    pub fn get_cases(&self, range: CaseRange) -> &[SelectCase] {
        let start = range.start as usize;
        let end = start + range.len as usize;
        &self.cases[start..end]
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExprArena {{ {} exprs, {} lists, {} cases }}",
            self.exprs.len(),
            self.expr_lists.len(),
            self.cases.len()
        )
    }
}
