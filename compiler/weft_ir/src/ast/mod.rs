//! AST node definitions.

mod decl;
mod expr;
mod operators;

pub use decl::{Annotation, ConstDecl, Module, State};
pub use expr::{Constant, Expr, ExprKind, PrintBase, SelectCase};
pub use operators::{BinaryOp, UnaryOp};
