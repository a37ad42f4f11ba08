//! Expression nodes.
//!
//! All children are arena indices, not boxes. Expressions are immutable;
//! passes "mutate" by allocating a replacement node that carries the span
//! of the node it replaces.

use std::fmt;

use num_bigint::BigInt;

use super::operators::{BinaryOp, UnaryOp};
use crate::{CaseRange, ExprId, ExprRange, Name, Span, Type};

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Print radix of an integer constant, preserved from the source literal
/// so folded values render the way the programmer wrote them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum PrintBase {
    Binary,
    Octal,
    #[default]
    Decimal,
    Hex,
}

impl PrintBase {
    /// Numeric radix (2, 8, 10, or 16).
    pub const fn radix(self) -> u32 {
        match self {
            PrintBase::Binary => 2,
            PrintBase::Octal => 8,
            PrintBase::Decimal => 10,
            PrintBase::Hex => 16,
        }
    }
}

/// An integer constant.
///
/// The value is exact; no width masking is applied while folding. The
/// `was_cast` flag records that the value was produced by operator-level
/// folding, telling downstream passes that width reconciliation may still
/// be required.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Constant {
    pub value: BigInt,
    pub ty: Type,
    pub base: PrintBase,
    pub was_cast: bool,
}

impl Constant {
    /// A decimal constant of the given type.
    pub fn new(value: impl Into<BigInt>, ty: Type) -> Self {
        Constant {
            value: value.into(),
            ty,
            base: PrintBase::Decimal,
            was_cast: false,
        }
    }

    /// A constant with an explicit print base.
    pub fn with_base(value: impl Into<BigInt>, ty: Type, base: PrintBase) -> Self {
        Constant {
            value: value.into(),
            ty,
            base,
            was_cast: false,
        }
    }

    /// A constant produced by operator-level folding.
    pub fn folded(value: impl Into<BigInt>, ty: Type, base: PrintBase) -> Self {
        Constant {
            value: value.into(),
            ty,
            base,
            was_cast: true,
        }
    }
}

/// One arm of a select expression: a keyset pattern and the state reached
/// when the selector matches it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SelectCase {
    pub keyset: ExprId,
    pub state: ExprId,
}

/// Expression variants.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer constant: `42`, `0xFF`, `8w16`
    Constant(Constant),

    /// Boolean literal: `true`, `false`
    BoolLiteral(bool),

    /// Reference to a declaration by name.
    Path(Name),

    /// Tuple/struct value: `{ a, b, c }`
    List(ExprRange),

    /// Member projection: `expr.member`
    Member { expr: ExprId, member: Name },

    /// Bit slice: `target[msb:lsb]`
    Slice {
        target: ExprId,
        msb: ExprId,
        lsb: ExprId,
    },

    /// Explicit cast: `(ty) expr`
    Cast { ty: Type, expr: ExprId },

    /// Bit concatenation: `left ++ right`
    Concat { left: ExprId, right: ExprId },

    /// Keyset range: `lo .. hi` (both bounds inclusive)
    Range { lo: ExprId, hi: ExprId },

    /// Keyset bitmask: `value &&& mask`
    Mask { value: ExprId, mask: ExprId },

    /// Keyset wildcard: `default` / `_`
    Default,

    /// Unary operation.
    Unary { op: UnaryOp, operand: ExprId },

    /// Binary operation.
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// Multi-way dispatch on a selector against case keysets.
    Select { select: ExprId, cases: CaseRange },
}
