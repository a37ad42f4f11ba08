//! The folder: per-node constant reduction.
//!
//! One handler per expression kind, invoked by the post-order rewriter once
//! every child has already been folded. A handler either returns the node
//! unchanged or allocates a replacement that evaluates to the same value;
//! proven constants are recorded in the [`ConstantMemo`] under both the
//! rewritten node and its pre-rewrite original.
//!
//! # Dual mode
//!
//! The folder runs both before and after type checking. Folds that would
//! commit to a specific width are unsafe before types are known, so the
//! presence of a type map gates them: slice folding, struct member
//! projection, struct casts, enum recognition, select reduction, and the
//! strict operand-type errors. Before type checking, those situations
//! silently keep the original node so a later run of the pass can finish
//! the job.
//!
//! # Error policy
//!
//! A fold that fails reports through the diagnostic sink and returns the
//! original node; later passes still see a well-formed tree. Conditions the
//! type checker was responsible for preventing abort via `bug!`.

use num_bigint::{BigInt, Sign};
use num_traits::{One, ToPrimitive, Zero};

use weft_diagnostic::{bug, errors, DiagnosticSink};
use weft_ir::{
    BinaryOp, BitsType, CaseRange, Constant, ConstDecl, DeclId, Expr, ExprArena, ExprId, ExprKind,
    ExprRewriter, Name, SelectCase, Span, StringInterner, SymbolTable, Type, TypeMap, UnaryOp,
    MAX_WIDTH_SUPPORTED,
};

use crate::{ConstantMemo, Containment};

/// Failure of the exact-arithmetic function supplied to [`Folder::binary`].
pub(crate) enum ArithError {
    DivideByZero,
    ModuloByZero,
    Negative(&'static str),
}

/// An exact integer function driving the binary fold engine. Comparisons
/// return 0/1.
type ArithFn = fn(&BigInt, &BigInt) -> Result<BigInt, ArithError>;

/// Per-node constant reduction.
///
/// Construction is builder-style; the optional collaborators decide what
/// the folder is allowed to do:
///
/// - without a [`SymbolTable`], path resolution is skipped;
/// - without a [`TypeMap`], `types_known` is false and the width-committing
///   folds are suppressed.
pub struct Folder<'a> {
    pub(crate) symbols: Option<&'a SymbolTable>,
    pub(crate) type_map: Option<&'a mut TypeMap>,
    pub(crate) interner: &'a StringInterner,
    pub(crate) sink: &'a mut DiagnosticSink,
    pub(crate) warnings: bool,
    pub(crate) memo: ConstantMemo,
}

impl<'a> Folder<'a> {
    pub fn new(
        interner: &'a StringInterner,
        sink: &'a mut DiagnosticSink,
        warnings: bool,
    ) -> Self {
        Folder {
            symbols: None,
            type_map: None,
            interner,
            sink,
            warnings,
            memo: ConstantMemo::new(),
        }
    }

    /// Enable path resolution against the given symbol table.
    #[must_use]
    pub fn with_symbols(mut self, symbols: &'a SymbolTable) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Enable the type-dependent folds against the given type map.
    #[must_use]
    pub fn with_type_map(mut self, type_map: &'a mut TypeMap) -> Self {
        self.type_map = Some(type_map);
        self
    }

    /// Whether type checking has run.
    #[inline]
    pub fn types_known(&self) -> bool {
        self.type_map.is_some()
    }

    /// The constants proven so far.
    pub fn memo(&self) -> &ConstantMemo {
        &self.memo
    }

    // -- Constant extraction --

    /// The constant form of `id`, or `None`.
    ///
    /// Succeeds when the node is memoized, is itself a `Constant` or
    /// `BoolLiteral`, is a `List` whose every component is constant, or
    /// (types known) is an enum instance, returned as-is without unwrapping.
    /// This is the only place "is this expression a value?" is decided.
    pub fn get_constant(&self, arena: &ExprArena, id: ExprId) -> Option<ExprId> {
        if let Some(value) = self.memo.expr_constant(id) {
            return Some(value);
        }
        match &arena.get_expr(id).kind {
            ExprKind::Constant(_) | ExprKind::BoolLiteral(_) => Some(id),
            ExprKind::List(components) => {
                for &component in arena.get_expr_list(*components) {
                    self.get_constant(arena, component)?;
                }
                Some(id)
            }
            ExprKind::Member { .. } if self.types_known() => {
                match self.type_map.as_deref().and_then(|tm| tm.get(id)) {
                    Some(Type::Enum { .. }) => Some(id),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Record `result` as the constant value of the rewritten node and its
    /// pre-rewrite original.
    fn set_constant(&mut self, node: ExprId, original: ExprId, result: ExprId) {
        tracing::trace!(?node, ?original, ?result, "folded to constant");
        self.memo.record(node, original, result);
    }

    /// The integer constant at `id`, cloned out of the arena.
    pub(crate) fn as_constant(&self, arena: &ExprArena, id: ExprId) -> Option<Constant> {
        match &arena.get_expr(id).kind {
            ExprKind::Constant(c) => Some(c.clone()),
            _ => None,
        }
    }

    // -- Dispatch --

    /// Fold one node; the entry point invoked by the post-order rewriter.
    pub fn fold_expr(&mut self, arena: &mut ExprArena, id: ExprId, original: ExprId) -> ExprId {
        let kind = arena.get_expr(id).kind.clone();
        match kind {
            ExprKind::Path(name) => self.fold_path(arena, id, original, name),
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::Neg => self.fold_neg(arena, id, original, operand),
                UnaryOp::BitNot => self.fold_complement(arena, id, original, operand),
                UnaryOp::Not => self.fold_logical_not(arena, id, original, operand),
            },
            ExprKind::Binary { op, left, right } => {
                self.fold_binary(arena, id, original, op, left, right)
            }
            ExprKind::Slice { target, msb, lsb } => {
                self.fold_slice(arena, id, original, target, msb, lsb)
            }
            ExprKind::Member { expr, member } => {
                self.fold_member(arena, id, original, expr, member)
            }
            ExprKind::Concat { left, right } => self.fold_concat(arena, id, original, left, right),
            ExprKind::Cast { ty, expr } => self.fold_cast(arena, id, original, ty, expr),
            ExprKind::Select { select, cases } => {
                self.fold_select(arena, id, original, select, cases)
            }
            ExprKind::Constant(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::List(_)
            | ExprKind::Range { .. }
            | ExprKind::Mask { .. }
            | ExprKind::Default => id,
        }
    }

    // -- Path resolution --

    /// Substitute a reference to a constant declaration by its value.
    ///
    /// List values are propagated through the memo but not substituted in
    /// place: downstream consumers expect a name there, and member
    /// projection reaches the value through `get_constant`.
    fn fold_path(&mut self, arena: &mut ExprArena, id: ExprId, original: ExprId, name: Name) -> ExprId {
        let Some(symbols) = self.symbols else {
            return id;
        };
        let Some(decl) = symbols.get_declaration(name) else {
            return id;
        };
        let Some(value) = self.memo.decl_constant(decl) else {
            return id;
        };
        self.set_constant(id, original, value);
        if matches!(arena.get_expr(value).kind, ExprKind::List(_)) {
            id
        } else {
            value
        }
    }

    // -- Constant declarations --

    /// Fold a constant declaration and memoize it for later references.
    /// Returns the rebuilt declaration if the initializer changed.
    pub fn fold_const_decl(
        &mut self,
        arena: &mut ExprArena,
        decl: &ConstDecl,
        decl_id: DeclId,
    ) -> Option<ConstDecl> {
        let Some(folded) = self.get_constant(arena, decl.init) else {
            if self.types_known() {
                self.sink
                    .emit(errors::non_constant_initializer(arena.get_expr(decl.init).span));
            }
            return None;
        };

        let mut new_init = folded;
        if self.types_known() {
            self.memo.record_decl(decl_id, folded);
        } else if let Some(cst) = self.as_constant(arena, folded) {
            // This declaration may imply a cast, and the type checker has
            // not inserted it yet. Re-stamp the initializer with the
            // declared type so later references see the value the checker
            // would produce.
            if let Some(decl_bits) = decl.ty.as_bits() {
                let needs_stamp = cst.ty.is_inf_int()
                    || cst.ty.as_bits().is_some_and(|tb| tb != decl_bits);
                if needs_stamp {
                    let span = arena.get_expr(folded).span;
                    new_init = arena.alloc_expr(Expr::new(
                        ExprKind::Constant(Constant::with_base(
                            cst.value,
                            Type::Bits(decl_bits),
                            cst.base,
                        )),
                        span,
                    ));
                }
                self.memo.record_decl(decl_id, new_init);
            }
        }

        if new_init != decl.init {
            Some(decl.with_init(new_init))
        } else {
            None
        }
    }

    // -- Unary operators --

    fn fold_neg(&mut self, arena: &mut ExprArena, id: ExprId, original: ExprId, operand: ExprId) -> ExprId {
        let span = arena.get_expr(id).span;
        let Some(value) = self.get_constant(arena, operand) else {
            return id;
        };
        let Some(cst) = self.as_constant(arena, value) else {
            self.sink.emit(errors::expected_integer(arena.get_expr(value).span));
            return id;
        };

        if cst.ty.is_inf_int() {
            return arena.alloc_expr(Expr::new(
                ExprKind::Constant(Constant::with_base(-cst.value, Type::InfInt, cst.base)),
                span,
            ));
        }
        if let Some(tb) = cst.ty.as_bits() {
            let result = arena.alloc_expr(Expr::new(
                ExprKind::Constant(Constant::folded(-cst.value, Type::Bits(tb), cst.base)),
                span,
            ));
            self.set_constant(id, original, result);
            return result;
        }
        if self.types_known() {
            self.sink
                .emit(errors::invalid_operand_type(span, UnaryOp::Neg.as_symbol()));
        }
        id
    }

    fn fold_complement(
        &mut self,
        arena: &mut ExprArena,
        id: ExprId,
        original: ExprId,
        operand: ExprId,
    ) -> ExprId {
        let span = arena.get_expr(id).span;
        let Some(value) = self.get_constant(arena, operand) else {
            return id;
        };
        let Some(cst) = self.as_constant(arena, value) else {
            self.sink.emit(errors::expected_integer(arena.get_expr(value).span));
            return id;
        };

        if cst.ty.is_inf_int() {
            // Complement needs a width; an unbounded value has none.
            self.sink.emit(errors::missing_width(span));
            return id;
        }
        let Some(tb) = cst.ty.as_bits() else {
            if self.types_known() {
                self.sink
                    .emit(errors::invalid_operand_type(span, UnaryOp::BitNot.as_symbol()));
            }
            return id;
        };

        // Two's complement of the exact value; width masking is applied by
        // downstream passes.
        let complement = -(cst.value + BigInt::one());
        let result = arena.alloc_expr(Expr::new(
            ExprKind::Constant(Constant::folded(complement, Type::Bits(tb), cst.base)),
            span,
        ));
        self.set_constant(id, original, result);
        result
    }

    fn fold_logical_not(
        &mut self,
        arena: &mut ExprArena,
        id: ExprId,
        original: ExprId,
        operand: ExprId,
    ) -> ExprId {
        let span = arena.get_expr(id).span;
        let Some(value) = self.get_constant(arena, operand) else {
            return id;
        };
        let ExprKind::BoolLiteral(b) = arena.get_expr(value).kind.clone() else {
            self.sink.emit(errors::expected_boolean(arena.get_expr(value).span));
            return id;
        };
        let result = arena.alloc_expr(Expr::new(ExprKind::BoolLiteral(!b), span));
        self.set_constant(id, original, result);
        result
    }

    // -- Binary operators --

    fn fold_binary(
        &mut self,
        arena: &mut ExprArena,
        id: ExprId,
        original: ExprId,
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    ) -> ExprId {
        match op {
            BinaryOp::Add => self.binary(arena, id, original, op, left, right, |a, b| Ok(a + b)),
            BinaryOp::Sub => self.binary(arena, id, original, op, left, right, |a, b| Ok(a - b)),
            BinaryOp::Mul => self.binary(arena, id, original, op, left, right, |a, b| Ok(a * b)),
            BinaryOp::BitAnd => self.binary(arena, id, original, op, left, right, |a, b| Ok(a & b)),
            BinaryOp::BitOr => self.binary(arena, id, original, op, left, right, |a, b| Ok(a | b)),
            BinaryOp::BitXor => self.binary(arena, id, original, op, left, right, |a, b| Ok(a ^ b)),
            BinaryOp::Div => self.binary(arena, id, original, op, left, right, |a, b| {
                if a.sign() == Sign::Minus || b.sign() == Sign::Minus {
                    return Err(ArithError::Negative("division"));
                }
                if b.is_zero() {
                    return Err(ArithError::DivideByZero);
                }
                Ok(a / b)
            }),
            BinaryOp::Mod => self.binary(arena, id, original, op, left, right, |a, b| {
                if a.sign() == Sign::Minus || b.sign() == Sign::Minus {
                    return Err(ArithError::Negative("modulo"));
                }
                if b.is_zero() {
                    return Err(ArithError::ModuloByZero);
                }
                Ok(a % b)
            }),
            BinaryOp::Lt => self.binary(arena, id, original, op, left, right, |a, b| {
                Ok(BigInt::from(u8::from(a < b)))
            }),
            BinaryOp::LtEq => self.binary(arena, id, original, op, left, right, |a, b| {
                Ok(BigInt::from(u8::from(a <= b)))
            }),
            BinaryOp::Gt => self.binary(arena, id, original, op, left, right, |a, b| {
                Ok(BigInt::from(u8::from(a > b)))
            }),
            BinaryOp::GtEq => self.binary(arena, id, original, op, left, right, |a, b| {
                Ok(BigInt::from(u8::from(a >= b)))
            }),
            BinaryOp::Eq | BinaryOp::NotEq => {
                self.fold_compare(arena, id, original, op, left, right)
            }
            BinaryOp::Shl | BinaryOp::Shr => self.fold_shift(arena, id, original, op, left, right),
            BinaryOp::And | BinaryOp::Or => {
                self.fold_logical(arena, id, original, op, left, right)
            }
        }
    }

    /// The engine behind every non-short-circuiting binary fold.
    ///
    /// Extracts both operands as integer constants, unifies their types
    /// (promoting `InfInt` toward a concrete width), applies `func` over
    /// the exact values, and wraps the result: relational operators as a
    /// `BoolLiteral`, everything else as a `Constant` in the unified type
    /// with the left operand's print base and the `was_cast` flag set.
    fn binary(
        &mut self,
        arena: &mut ExprArena,
        id: ExprId,
        original: ExprId,
        op: BinaryOp,
        left_id: ExprId,
        right_id: ExprId,
        func: ArithFn,
    ) -> ExprId {
        let span = arena.get_expr(id).span;
        let (Some(eleft), Some(eright)) = (
            self.get_constant(arena, left_id),
            self.get_constant(arena, right_id),
        ) else {
            return id;
        };

        let Some(left) = self.as_constant(arena, eleft) else {
            self.sink.emit(errors::expected_integer(arena.get_expr(left_id).span));
            return id;
        };
        let Some(right) = self.as_constant(arena, eright) else {
            self.sink.emit(errors::expected_integer(arena.get_expr(right_id).span));
            return id;
        };

        let left_bits = if left.ty.is_inf_int() {
            None
        } else {
            match left.ty.as_bits() {
                Some(tb) => Some(tb),
                None => {
                    if self.types_known() {
                        self.sink
                            .emit(errors::invalid_operand_type(span, op.as_symbol()));
                    }
                    return id;
                }
            }
        };
        let right_bits = if right.ty.is_inf_int() {
            None
        } else {
            match right.ty.as_bits() {
                Some(tb) => Some(tb),
                None => {
                    if self.types_known() {
                        self.sink
                            .emit(errors::invalid_operand_type(span, op.as_symbol()));
                    }
                    return id;
                }
            }
        };

        let result_ty = match (left_bits, right_bits) {
            (Some(lt), Some(rt)) => {
                if lt != rt {
                    self.sink.emit(errors::operand_type_mismatch(
                        span,
                        op.as_symbol(),
                        &lt.to_string(),
                        &rt.to_string(),
                    ));
                    return id;
                }
                Type::Bits(rt)
            }
            (None, Some(rt)) => Type::Bits(rt),
            (Some(lt), None) => Type::Bits(lt),
            (None, None) => Type::InfInt,
        };

        let value = match func(&left.value, &right.value) {
            Ok(value) => value,
            Err(ArithError::DivideByZero) => {
                self.sink.emit(errors::division_by_zero(span));
                return id;
            }
            Err(ArithError::ModuloByZero) => {
                self.sink.emit(errors::modulo_by_zero(span));
                return id;
            }
            Err(ArithError::Negative(operation)) => {
                self.sink.emit(errors::negative_operand(span, operation));
                return id;
            }
        };

        let kind = if op.is_relational() {
            ExprKind::BoolLiteral(!value.is_zero())
        } else {
            ExprKind::Constant(Constant::folded(value, result_ty, left.base))
        };
        let result = arena.alloc_expr(Expr::new(kind, span));
        self.set_constant(id, original, result);
        result
    }

    /// `==` / `!=`. Booleans compare as booleans; everything else goes
    /// through the integer engine.
    fn fold_compare(
        &mut self,
        arena: &mut ExprArena,
        id: ExprId,
        original: ExprId,
        op: BinaryOp,
        left_id: ExprId,
        right_id: ExprId,
    ) -> ExprId {
        let span = arena.get_expr(id).span;
        let (Some(eleft), Some(eright)) = (
            self.get_constant(arena, left_id),
            self.get_constant(arena, right_id),
        ) else {
            return id;
        };

        let eq_test = op == BinaryOp::Eq;
        if let ExprKind::BoolLiteral(lv) = arena.get_expr(eleft).kind.clone() {
            let ExprKind::BoolLiteral(rv) = arena.get_expr(eright).kind.clone() else {
                self.sink.emit(errors::both_operands_boolean(span));
                return id;
            };
            let result =
                arena.alloc_expr(Expr::new(ExprKind::BoolLiteral((lv == rv) == eq_test), span));
            self.set_constant(id, original, result);
            return result;
        }

        if eq_test {
            self.binary(arena, id, original, op, left_id, right_id, |a, b| {
                Ok(BigInt::from(u8::from(a == b)))
            })
        } else {
            self.binary(arena, id, original, op, left_id, right_id, |a, b| {
                Ok(BigInt::from(u8::from(a != b)))
            })
        }
    }

    // -- Shifts --

    /// `<<` / `>>`. The right operand folds first: a zero amount short-cuts
    /// to the left operand, and the amount's type never influences the
    /// result type; only the left operand's does.
    fn fold_shift(
        &mut self,
        arena: &mut ExprArena,
        id: ExprId,
        original: ExprId,
        op: BinaryOp,
        left_id: ExprId,
        right_id: ExprId,
    ) -> ExprId {
        let span = arena.get_expr(id).span;
        let Some(amount_expr) = self.get_constant(arena, right_id) else {
            return id;
        };
        let Some(amount_cst) = self.as_constant(arena, amount_expr) else {
            self.sink.emit(errors::expected_integer(arena.get_expr(amount_expr).span));
            return id;
        };
        if amount_cst.value.sign() == Sign::Minus {
            self.sink.emit(errors::negative_shift(span));
            return id;
        }
        if amount_cst.value.is_zero() {
            if let Some(value) = self.get_constant(arena, left_id) {
                self.set_constant(id, original, value);
            }
            return left_id;
        }

        let Some(value_expr) = self.get_constant(arena, left_id) else {
            return id;
        };
        let Some(value_cst) = self.as_constant(arena, value_expr) else {
            self.sink.emit(errors::expected_integer(arena.get_expr(value_expr).span));
            return id;
        };
        let Some(amount) = amount_cst.value.to_u32() else {
            self.sink.emit(errors::width_too_large(span, MAX_WIDTH_SUPPORTED));
            return id;
        };

        if self.warnings {
            if let Some(tb) = value_cst.ty.as_bits() {
                if tb.width < amount {
                    self.sink.emit(errors::shift_overflow(span, tb.width, amount));
                }
            }
        }

        let value = match op {
            BinaryOp::Shl => value_cst.value << amount,
            BinaryOp::Shr => value_cst.value >> amount,
            _ => unreachable!("shift handler invoked for {op:?}"),
        };
        let result = arena.alloc_expr(Expr::new(
            ExprKind::Constant(Constant::with_base(value, value_cst.ty, value_cst.base)),
            span,
        ));
        self.set_constant(id, original, result);
        result
    }

    // -- Logical short-circuit --

    /// `&&` / `||`. Only the left operand is folded: when it decides the
    /// result the whole expression collapses to a literal; otherwise the
    /// right subtree is the result, returned as-is without re-folding.
    fn fold_logical(
        &mut self,
        arena: &mut ExprArena,
        id: ExprId,
        original: ExprId,
        op: BinaryOp,
        left_id: ExprId,
        right_id: ExprId,
    ) -> ExprId {
        let span = arena.get_expr(id).span;
        let Some(left) = self.get_constant(arena, left_id) else {
            return id;
        };
        let ExprKind::BoolLiteral(lv) = arena.get_expr(left).kind.clone() else {
            self.sink.emit(errors::expected_boolean(arena.get_expr(left).span));
            return id;
        };

        let left_decides = match op {
            BinaryOp::And => !lv,
            BinaryOp::Or => lv,
            _ => unreachable!("logical handler invoked for {op:?}"),
        };
        if left_decides {
            let result = arena.alloc_expr(Expr::new(ExprKind::BoolLiteral(lv), span));
            self.set_constant(id, original, result);
            return result;
        }
        if let Some(value) = self.get_constant(arena, right_id) {
            self.set_constant(id, original, value);
        }
        right_id
    }

    // -- Slice --

    fn fold_slice(
        &mut self,
        arena: &mut ExprArena,
        id: ExprId,
        original: ExprId,
        target: ExprId,
        msb: ExprId,
        lsb: ExprId,
    ) -> ExprId {
        let span = arena.get_expr(id).span;
        let (Some(msb_expr), Some(lsb_expr)) = (
            self.get_constant(arena, msb),
            self.get_constant(arena, lsb),
        ) else {
            self.sink.emit(errors::slice_index_not_constant(span));
            return id;
        };

        // The indices are checked even before type checking, but the fold
        // itself needs the slice's width from the type map.
        if !self.types_known() {
            return id;
        }
        let Some(target_expr) = self.get_constant(arena, target) else {
            return id;
        };

        let Some(cmsb) = self.as_constant(arena, msb_expr) else {
            self.sink.emit(errors::expected_integer(arena.get_expr(msb_expr).span));
            return id;
        };
        let Some(clsb) = self.as_constant(arena, lsb_expr) else {
            self.sink.emit(errors::expected_integer(arena.get_expr(lsb_expr).span));
            return id;
        };
        let Some(cbase) = self.as_constant(arena, target_expr) else {
            self.sink.emit(errors::expected_integer(arena.get_expr(target_expr).span));
            return id;
        };

        let (Some(m), Some(l)) = (cmsb.value.to_u32(), clsb.value.to_u32()) else {
            self.sink.emit(errors::width_too_large(span, MAX_WIDTH_SUPPORTED));
            return id;
        };
        if m < l {
            self.sink.emit(errors::slice_bad_order(span));
            return id;
        }
        if m > MAX_WIDTH_SUPPORTED || l > MAX_WIDTH_SUPPORTED {
            self.sink.emit(errors::width_too_large(span, MAX_WIDTH_SUPPORTED));
            return id;
        }

        let width = m - l + 1;
        let mask = (BigInt::one() << width) - BigInt::one();
        let value = (&cbase.value >> l) & mask;

        let result_ty = self.type_map.as_deref().unwrap().get_required(original).clone();
        if result_ty.as_bits().is_none() {
            bug!("type of slice is not a bits type: {result_ty:?}");
        }
        let result = arena.alloc_expr(Expr::new(
            ExprKind::Constant(Constant::folded(value, result_ty, cbase.base)),
            span,
        ));
        self.set_constant(id, original, result);
        result
    }

    // -- Member projection --

    fn fold_member(
        &mut self,
        arena: &mut ExprArena,
        id: ExprId,
        original: ExprId,
        expr: ExprId,
        member: Name,
    ) -> ExprId {
        if !self.types_known() {
            return id;
        }
        let span = arena.get_expr(id).span;
        let inner_ty = self.type_map.as_deref().unwrap().get_required(expr).clone();
        let original_ty = self.type_map.as_deref().unwrap().get(original).cloned();

        let result = match &inner_ty {
            Type::Stack { size, .. } if member == Name::STACK_SIZE => {
                let size = *size;
                arena.alloc_expr(Expr::new(
                    ExprKind::Constant(Constant::new(size, Type::InfInt)),
                    span,
                ))
            }
            _ => {
                let Some(value) = self.get_constant(arena, expr) else {
                    return id;
                };
                let Type::Struct { fields, .. } = &inner_ty else {
                    bug!("expected a struct type, got {}", inner_ty.display(self.interner));
                };
                let ExprKind::List(components) = arena.get_expr(value).kind else {
                    bug!(
                        "expected a list of constants, got {:?}",
                        arena.get_expr(value).kind
                    );
                };
                let index = fields
                    .iter()
                    .position(|f| f.name == member)
                    .unwrap_or_else(|| {
                        bug!(
                            "field {} not found in type {}",
                            self.interner.resolve(member),
                            inner_ty.display(self.interner)
                        )
                    });
                // Clone the component so the projection result has its own
                // identity in the type map.
                let component = arena.get_expr_list(components)[index];
                let clone = arena.get_expr(component).clone();
                arena.alloc_expr(clone)
            }
        };

        let type_map = self.type_map.as_deref_mut().unwrap();
        if let Some(ty) = original_ty {
            type_map.set_type(result, ty);
        }
        type_map.set_compile_time_constant(result);
        self.set_constant(id, original, result);
        result
    }

    // -- Concatenation --

    fn fold_concat(
        &mut self,
        arena: &mut ExprArena,
        id: ExprId,
        original: ExprId,
        left_id: ExprId,
        right_id: ExprId,
    ) -> ExprId {
        let span = arena.get_expr(id).span;
        let (Some(eleft), Some(eright)) = (
            self.get_constant(arena, left_id),
            self.get_constant(arena, right_id),
        ) else {
            return id;
        };

        let Some(left) = self.as_constant(arena, eleft) else {
            self.sink.emit(errors::expected_integer(arena.get_expr(left_id).span));
            return id;
        };
        let Some(right) = self.as_constant(arena, eright) else {
            self.sink.emit(errors::expected_integer(arena.get_expr(right_id).span));
            return id;
        };

        let (Some(lt), Some(rt)) = (left.ty.as_bits(), right.ty.as_bits()) else {
            self.sink.emit(errors::concat_width_unknown(span));
            return id;
        };
        if lt != rt {
            self.sink.emit(errors::operand_type_mismatch(
                span,
                "++",
                &lt.to_string(),
                &rt.to_string(),
            ));
            return id;
        }

        let result_ty = Type::Bits(BitsType {
            width: lt.width + rt.width,
            signed: lt.signed,
        });
        let value = (left.value << rt.width) | right.value;
        let result = arena.alloc_expr(Expr::new(
            ExprKind::Constant(Constant::with_base(value, result_ty, left.base)),
            span,
        ));
        self.set_constant(id, original, result);
        result
    }

    // -- Cast --

    fn fold_cast(
        &mut self,
        arena: &mut ExprArena,
        id: ExprId,
        original: ExprId,
        node_ty: Type,
        expr: ExprId,
    ) -> ExprId {
        let span = arena.get_expr(id).span;
        let Some(value) = self.get_constant(arena, expr) else {
            return id;
        };

        let target_ty = if self.types_known() {
            self.type_map.as_deref().unwrap().get_required(original).clone()
        } else {
            node_ty
        };

        match target_ty {
            Type::Bits(tb) => {
                let value_kind = arena.get_expr(value).kind.clone();
                let result = match value_kind {
                    ExprKind::Constant(c) => {
                        // Re-stamp the value with the new type; no
                        // re-encoding, downstream passes apply masking.
                        arena.alloc_expr(Expr::new(
                            ExprKind::Constant(Constant::with_base(
                                c.value,
                                Type::Bits(tb),
                                c.base,
                            )),
                            span,
                        ))
                    }
                    ExprKind::BoolLiteral(b) => arena.alloc_expr(Expr::new(
                        ExprKind::Constant(Constant::new(i32::from(b), Type::Bits(tb))),
                        span,
                    )),
                    other => bug!("expected a boolean literal, got {other:?}"),
                };
                self.set_constant(id, original, result);
                result
            }
            Type::Struct { .. } if self.types_known() => {
                let clone = arena.get_expr(value).clone();
                let result = arena.alloc_expr(clone);
                let type_map = self.type_map.as_deref_mut().unwrap();
                type_map.set_type(result, target_ty);
                type_map.set_compile_time_constant(result);
                self.set_constant(id, original, result);
                result
            }
            _ => id,
        }
    }

    // -- Select reduction --

    /// Partially evaluate a select against a constant selector.
    ///
    /// Cases are walked in source order. A case that definitely does not
    /// match is pruned; an undecidable case is kept; the first definite
    /// match finishes the walk. When no undecidable case preceded it, the
    /// whole select reduces to the matching case's state. Otherwise the
    /// match's keyset is rewritten to `default`: the kept undecidable case
    /// may not match at runtime, and control must still fall through to
    /// what was the definite match.
    fn fold_select(
        &mut self,
        arena: &mut ExprArena,
        id: ExprId,
        _original: ExprId,
        select: ExprId,
        cases: CaseRange,
    ) -> ExprId {
        if !self.types_known() {
            return id;
        }
        let span = arena.get_expr(id).span;
        let Some(selector) = self.get_constant(arena, select) else {
            return id;
        };

        let case_list = arena.get_cases(cases).to_vec();
        let mut kept: Vec<SelectCase> = Vec::new();
        let mut some_unknown = false;
        let mut changes = false;
        let mut finished = false;
        let mut result = id;

        for case in case_list {
            if finished {
                if self.warnings {
                    let case_span = arena
                        .get_expr(case.keyset)
                        .span
                        .merge(arena.get_expr(case.state).span);
                    self.sink.emit(errors::unreachable_case(case_span));
                }
                continue;
            }
            match self.set_contains(arena, case.keyset, selector) {
                Containment::No => {
                    changes = true;
                }
                Containment::DontKnow => {
                    some_unknown = true;
                    kept.push(case);
                }
                Containment::Yes => {
                    changes = true;
                    finished = true;
                    if some_unknown {
                        let keyset = arena.alloc_expr(Expr::new(ExprKind::Default, Span::DUMMY));
                        kept.push(SelectCase {
                            keyset,
                            state: case.state,
                        });
                    } else {
                        result = case.state;
                    }
                }
            }
        }

        if changes {
            if kept.is_empty() && result == id && self.warnings {
                self.sink.emit(errors::no_case_matches(span));
            }
            if result == id {
                let new_cases = arena.alloc_cases(kept);
                return arena.alloc_expr(Expr::new(
                    ExprKind::Select {
                        select,
                        cases: new_cases,
                    },
                    span,
                ));
            }
        }
        result
    }
}

impl ExprRewriter for Folder<'_> {
    fn rewrite_expr(&mut self, arena: &mut ExprArena, id: ExprId, original: ExprId) -> ExprId {
        self.fold_expr(arena, id, original)
    }
}
