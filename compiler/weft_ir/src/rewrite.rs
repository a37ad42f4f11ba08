//! Post-order expression rewriting.
//!
//! The traversal engine for tree-transforming passes. [`rewrite_postorder`]
//! walks an expression bottom-up: children are rewritten first, the node is
//! rebuilt (as a fresh allocation with the same span) only when a child
//! changed, and the rewriter is then invoked once with the rebuilt node and
//! its pre-rewrite original.
//!
//! The contract matters for pass authors:
//!
//! - By the time [`ExprRewriter::rewrite_expr`] runs on a node, every child
//!   has already been rewritten. The rewriter must not recurse itself.
//! - `original` is the node identity the pass's inputs (type maps, symbol
//!   tables) were built against; `id` is the rebuilt node. They are equal
//!   when no child changed.
//! - Returning `id` unchanged keeps the node; returning any other ID
//!   replaces the whole subtree.

use crate::ast::{Expr, ExprKind, SelectCase};
use crate::{ExprArena, ExprId};

/// A pass invoked once per expression node in post-order.
pub trait ExprRewriter {
    /// Rewrite one node. `id` is the node after child rebuilding; `original`
    /// is the node as it was before this traversal visited it.
    fn rewrite_expr(&mut self, arena: &mut ExprArena, id: ExprId, original: ExprId) -> ExprId;
}

/// Rewrite the tree rooted at `id` in post-order, returning the new root.
pub fn rewrite_postorder<R: ExprRewriter + ?Sized>(
    arena: &mut ExprArena,
    id: ExprId,
    rw: &mut R,
) -> ExprId {
    let node = arena.get_expr(id).clone();
    let span = node.span;

    let rebuilt = match node.kind {
        // Leaves
        ExprKind::Constant(_)
        | ExprKind::BoolLiteral(_)
        | ExprKind::Path(_)
        | ExprKind::Default => id,

        ExprKind::Unary { op, operand } => {
            let new_operand = rewrite_postorder(arena, operand, rw);
            if new_operand == operand {
                id
            } else {
                arena.alloc_expr(Expr::new(
                    ExprKind::Unary {
                        op,
                        operand: new_operand,
                    },
                    span,
                ))
            }
        }

        ExprKind::Binary { op, left, right } => {
            let new_left = rewrite_postorder(arena, left, rw);
            let new_right = rewrite_postorder(arena, right, rw);
            if new_left == left && new_right == right {
                id
            } else {
                arena.alloc_expr(Expr::new(
                    ExprKind::Binary {
                        op,
                        left: new_left,
                        right: new_right,
                    },
                    span,
                ))
            }
        }

        ExprKind::Member { expr, member } => {
            let new_expr = rewrite_postorder(arena, expr, rw);
            if new_expr == expr {
                id
            } else {
                arena.alloc_expr(Expr::new(
                    ExprKind::Member {
                        expr: new_expr,
                        member,
                    },
                    span,
                ))
            }
        }

        ExprKind::Slice { target, msb, lsb } => {
            let new_target = rewrite_postorder(arena, target, rw);
            let new_msb = rewrite_postorder(arena, msb, rw);
            let new_lsb = rewrite_postorder(arena, lsb, rw);
            if new_target == target && new_msb == msb && new_lsb == lsb {
                id
            } else {
                arena.alloc_expr(Expr::new(
                    ExprKind::Slice {
                        target: new_target,
                        msb: new_msb,
                        lsb: new_lsb,
                    },
                    span,
                ))
            }
        }

        ExprKind::Cast { ty, expr } => {
            let new_expr = rewrite_postorder(arena, expr, rw);
            if new_expr == expr {
                id
            } else {
                arena.alloc_expr(Expr::new(ExprKind::Cast { ty, expr: new_expr }, span))
            }
        }

        ExprKind::Concat { left, right } => {
            let new_left = rewrite_postorder(arena, left, rw);
            let new_right = rewrite_postorder(arena, right, rw);
            if new_left == left && new_right == right {
                id
            } else {
                arena.alloc_expr(Expr::new(
                    ExprKind::Concat {
                        left: new_left,
                        right: new_right,
                    },
                    span,
                ))
            }
        }

        ExprKind::Range { lo, hi } => {
            let new_lo = rewrite_postorder(arena, lo, rw);
            let new_hi = rewrite_postorder(arena, hi, rw);
            if new_lo == lo && new_hi == hi {
                id
            } else {
                arena.alloc_expr(Expr::new(
                    ExprKind::Range {
                        lo: new_lo,
                        hi: new_hi,
                    },
                    span,
                ))
            }
        }

        ExprKind::Mask { value, mask } => {
            let new_value = rewrite_postorder(arena, value, rw);
            let new_mask = rewrite_postorder(arena, mask, rw);
            if new_value == value && new_mask == mask {
                id
            } else {
                arena.alloc_expr(Expr::new(
                    ExprKind::Mask {
                        value: new_value,
                        mask: new_mask,
                    },
                    span,
                ))
            }
        }

        ExprKind::List(range) => {
            let components = arena.get_expr_list(range).to_vec();
            let rewritten: Vec<ExprId> = components
                .iter()
                .map(|&c| rewrite_postorder(arena, c, rw))
                .collect();
            if rewritten == components {
                id
            } else {
                let new_range = arena.alloc_expr_list(rewritten);
                arena.alloc_expr(Expr::new(ExprKind::List(new_range), span))
            }
        }

        ExprKind::Select { select, cases } => {
            let new_select = rewrite_postorder(arena, select, rw);
            let case_list = arena.get_cases(cases).to_vec();
            let rewritten: Vec<SelectCase> = case_list
                .iter()
                .map(|c| SelectCase {
                    keyset: rewrite_postorder(arena, c.keyset, rw),
                    state: rewrite_postorder(arena, c.state, rw),
                })
                .collect();
            if new_select == select && rewritten == case_list {
                id
            } else {
                let new_cases = arena.alloc_cases(rewritten);
                arena.alloc_expr(Expr::new(
                    ExprKind::Select {
                        select: new_select,
                        cases: new_cases,
                    },
                    span,
                ))
            }
        }
    };

    rw.rewrite_expr(arena, rebuilt, id)
}
