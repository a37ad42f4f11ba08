//! Weft IR - Intermediate Representation Types
//!
//! Core data structures for the Weft compiler:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Arena-allocated AST nodes (`Expr`, `ConstDecl`, `Module`)
//! - The language's types and the type map produced by type checking
//! - The symbol table produced by name resolution
//! - The post-order rewriting engine used by tree-transforming passes
//!
//! # Design
//!
//! - **Intern everything**: strings become `Name(u32)`.
//! - **Flatten everything**: no `Box<Expr>`; children are `ExprId(u32)`
//!   indices into a contiguous arena, and node identity is the index.
//! - Expressions are immutable; passes allocate replacement nodes carrying
//!   the span of the node they replace.

mod arena;
pub mod ast;
mod config;
mod expr_id;
mod name;
pub mod rewrite;
mod span;
mod symtab;
mod type_map;
mod types;

pub use arena::ExprArena;
pub use ast::{
    Annotation, BinaryOp, Constant, ConstDecl, Expr, ExprKind, Module, PrintBase, SelectCase,
    State, UnaryOp,
};
pub use config::MAX_WIDTH_SUPPORTED;
pub use expr_id::{CaseRange, DeclId, ExprId, ExprRange};
pub use name::{Name, StringInterner};
pub use rewrite::{rewrite_postorder, ExprRewriter};
pub use span::Span;
pub use symtab::SymbolTable;
pub use type_map::TypeMap;
pub use types::{BitsType, StructField, Type};
