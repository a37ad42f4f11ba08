//! Keyset containment.
//!
//! Decides whether a select case's keyset matches a concrete selector
//! value. The answer is three-valued: a keyset built from values that do
//! not fold cannot be decided at compile time, and the select reduction
//! must keep such a case.

use num_bigint::BigInt;

use weft_diagnostic::{bug, errors};
use weft_ir::{ExprArena, ExprId, ExprKind};

use crate::Folder;

/// Result of matching a keyset against a selector value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Containment {
    Yes,
    No,
    DontKnow,
}

impl Folder<'_> {
    /// Does `keyset` contain the constant selector `value`?
    ///
    /// `value` must be fully constant (the select handler only calls this
    /// with a folded selector); keyset operands that fail to fold when
    /// required produce a diagnostic and `DontKnow`.
    pub fn set_contains(
        &mut self,
        arena: &ExprArena,
        keyset: ExprId,
        value: ExprId,
    ) -> Containment {
        if matches!(arena.get_expr(keyset).kind, ExprKind::Default) {
            return Containment::Yes;
        }

        if let ExprKind::List(value_range) = arena.get_expr(value).kind {
            let components = arena.get_expr_list(value_range).to_vec();
            if let ExprKind::List(keyset_range) = arena.get_expr(keyset).kind {
                let keys = arena.get_expr_list(keyset_range).to_vec();
                if keys.len() != components.len() {
                    bug!(
                        "keyset and selector size mismatch: {} vs {}",
                        keys.len(),
                        components.len()
                    );
                }
                for (key, component) in keys.iter().zip(&components) {
                    match self.set_contains(arena, *key, *component) {
                        Containment::Yes => {}
                        other => return other,
                    }
                }
                return Containment::Yes;
            }
            // A non-list keyset matches a selector tuple of exactly one
            // element.
            if components.len() != 1 {
                bug!("selector list has {} elements for a scalar keyset", components.len());
            }
            return self.set_contains(arena, keyset, components[0]);
        }

        if let ExprKind::BoolLiteral(selector) = arena.get_expr(value).kind {
            let Some(key) = self.get_constant(arena, keyset) else {
                self.sink.emit(errors::keyset_not_constant(arena.get_expr(keyset).span));
                return Containment::DontKnow;
            };
            let ExprKind::BoolLiteral(key_value) = arena.get_expr(key).kind else {
                bug!("expected a boolean keyset, got {:?}", arena.get_expr(key).kind);
            };
            return if key_value == selector {
                Containment::Yes
            } else {
                Containment::No
            };
        }

        let ExprKind::Constant(selector) = &arena.get_expr(value).kind else {
            bug!("expected a constant selector, got {:?}", arena.get_expr(value).kind);
        };
        let selector = selector.value.clone();

        match arena.get_expr(keyset).kind.clone() {
            ExprKind::Constant(key) => {
                if key.value == selector {
                    Containment::Yes
                } else {
                    Containment::No
                }
            }
            ExprKind::Range { lo, hi } => {
                let Some(lo) = self.keyset_bound(arena, lo) else {
                    return Containment::DontKnow;
                };
                let Some(hi) = self.keyset_bound(arena, hi) else {
                    return Containment::DontKnow;
                };
                if lo <= selector && hi >= selector {
                    Containment::Yes
                } else {
                    Containment::No
                }
            }
            ExprKind::Mask { value: base, mask } => {
                let Some(base) = self.keyset_bound(arena, base) else {
                    return Containment::DontKnow;
                };
                let Some(mask) = self.keyset_bound(arena, mask) else {
                    return Containment::DontKnow;
                };
                // The selector matches when it agrees with the base on
                // every masked bit.
                if (base & &mask) == (&mask & selector) {
                    Containment::Yes
                } else {
                    Containment::No
                }
            }
            _ => {
                self.sink.emit(errors::unexpected_keyset(arena.get_expr(keyset).span));
                Containment::DontKnow
            }
        }
    }

    /// Fold one range/mask bound to its integer value, reporting a
    /// diagnostic when it is not a compile-time constant.
    fn keyset_bound(&mut self, arena: &ExprArena, bound: ExprId) -> Option<BigInt> {
        let Some(folded) = self.get_constant(arena, bound) else {
            self.sink.emit(errors::keyset_not_constant(arena.get_expr(bound).span));
            return None;
        };
        match &arena.get_expr(folded).kind {
            ExprKind::Constant(c) => Some(c.value.clone()),
            other => bug!("expected an integer keyset bound, got {other:?}"),
        }
    }
}
