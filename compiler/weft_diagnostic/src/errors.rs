//! Diagnostic constructors for constant evaluation.
//!
//! One constructor per error code keeps the message wording in a single
//! place; passes import these instead of formatting messages inline.

use weft_ir::Span;

use crate::{Diagnostic, ErrorCode};

pub fn non_constant_initializer(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3001)
        .with_message("cannot evaluate initializer for constant")
        .with_label(span, "not a compile-time constant")
}

pub fn expected_integer(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3002)
        .with_message("expected an integer value")
        .with_label(span, "")
}

pub fn expected_boolean(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3003)
        .with_message("expected a boolean value")
        .with_label(span, "")
}

pub fn both_operands_boolean(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3003)
        .with_message("both operands must be boolean")
        .with_label(span, "")
}

pub fn missing_width(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3004)
        .with_message(
            "operation cannot be applied to values with unknown width; \
             please specify the width explicitly",
        )
        .with_label(span, "value has no width")
}

pub fn concat_width_unknown(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3004)
        .with_message("both operand widths must be known")
        .with_label(span, "")
}

pub fn invalid_operand_type(span: Span, operator: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3005)
        .with_message(format!(
            "`{operator}` can only be applied to bit<> or int<> types"
        ))
        .with_label(span, "")
}

pub fn operand_type_mismatch(span: Span, operator: &str, left: &str, right: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3006)
        .with_message(format!(
            "operands of `{operator}` have different types: {left} and {right}"
        ))
        .with_label(span, "")
}

pub fn division_by_zero(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3007)
        .with_message("division by zero")
        .with_label(span, "")
}

pub fn modulo_by_zero(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3008)
        .with_message("modulo by zero")
        .with_label(span, "")
}

pub fn negative_operand(span: Span, operation: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3009)
        .with_message(format!("{operation} is not defined for negative numbers"))
        .with_label(span, "")
}

pub fn negative_shift(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3010)
        .with_message("shifts with negative amounts are not permitted")
        .with_label(span, "")
}

pub fn slice_index_not_constant(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3011)
        .with_message("bit indices must be compile-time constants")
        .with_label(span, "")
}

pub fn slice_bad_order(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3012)
        .with_message("bit slices must be specified as [msb:lsb]")
        .with_label(span, "msb is smaller than lsb")
}

pub fn width_too_large(span: Span, max: u32) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3013)
        .with_message(format!("compiler only supports widths up to {max}"))
        .with_label(span, "")
}

pub fn keyset_not_constant(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3014)
        .with_message("expression must evaluate to a constant")
        .with_label(span, "")
}

pub fn unexpected_keyset(span: Span) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3015)
        .with_message("unexpected expression in a keyset")
        .with_label(span, "")
}

pub fn shift_overflow(span: Span, width: u32, amount: u32) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E3901)
        .with_message(format!("shifting {width}-bit value with {amount}"))
        .with_label(span, "shift amount exceeds the value's width")
}

pub fn unreachable_case(span: Span) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E3902)
        .with_message("unreachable select case")
        .with_label(span, "an earlier case always matches")
}

pub fn no_case_matches(span: Span) -> Diagnostic {
    Diagnostic::warning(ErrorCode::E3903)
        .with_message("no select case matches")
        .with_label(span, "")
}
