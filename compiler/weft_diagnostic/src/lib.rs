//! Diagnostic system for the Weft compiler.
//!
//! - Error codes for searchability (`ErrorCode`)
//! - Builder-style diagnostics with labeled spans (`Diagnostic`)
//! - An ordered sink with error/warning counts (`DiagnosticSink`)
//! - Constructor helpers, one per code (`errors`)
//! - The [`bug!`] macro for internal invariant violations
//!
//! Recoverable problems flow through the sink; invariants that an earlier
//! phase was supposed to establish are not recoverable and abort via
//! [`bug!`].

mod diagnostic;
mod error_code;
pub mod errors;
mod sink;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use sink::DiagnosticSink;

/// Abort on an internal invariant violation.
///
/// Use for conditions that a previous compiler phase is responsible for
/// preventing; hitting one means the compiler itself is wrong, so there is
/// no diagnostic to emit and nothing to recover.
#[macro_export]
macro_rules! bug {
    ($($arg:tt)*) => {
        panic!("internal compiler error: {}", format_args!($($arg)*))
    };
}
