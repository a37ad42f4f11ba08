//! Compiler configuration constants.

/// Largest bit width the compiler accepts for slice indices and shift
/// amounts. Wider operations are rejected with a diagnostic instead of
/// silently producing enormous intermediate values.
pub const MAX_WIDTH_SUPPORTED: u32 = 2048;
