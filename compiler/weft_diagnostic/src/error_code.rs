//! Error codes for all compiler diagnostics.
//!
//! Each code is a unique identifier (e.g. `E3007`) with the first digit
//! indicating the compiler phase. Every `Diagnostic` the folding passes
//! emit carries one, so tests and downstream tooling can match on the code
//! instead of the message text.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E3xxx: constant evaluation errors
/// - E39xx: constant evaluation warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Constant evaluation errors (E3xxx)
    /// Initializer of a constant declaration cannot be evaluated
    E3001,
    /// Expected an integer value
    E3002,
    /// Expected a boolean value
    E3003,
    /// Operation applied to a value with unknown width
    E3004,
    /// Operation only applies to bit<> or int<> types
    E3005,
    /// Operands have different types
    E3006,
    /// Division by zero
    E3007,
    /// Modulo by zero
    E3008,
    /// Division or modulo of a negative value
    E3009,
    /// Shift by a negative amount
    E3010,
    /// Slice indices must be compile-time constants
    E3011,
    /// Slice indices given in the wrong order
    E3012,
    /// Width exceeds the maximum the compiler supports
    E3013,
    /// Keyset bound must evaluate to a constant
    E3014,
    /// Unexpected expression in a keyset
    E3015,

    // Constant evaluation warnings (E39xx)
    /// Shift amount exceeds the width of the shifted value
    E3901,
    /// Select case is unreachable
    E3902,
    /// No select case matches
    E3903,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
