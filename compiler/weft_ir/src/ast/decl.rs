//! Top-level declarations.

use crate::{ExprId, Name, Span, Type};

/// A declaration annotation, e.g. `@deprecated`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Annotation {
    pub name: Name,
}

/// A named constant binding: `const bit<16> ARP = 0x0806;`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConstDecl {
    pub name: Name,
    pub annotations: Vec<Annotation>,
    pub ty: Type,
    pub init: ExprId,
    pub span: Span,
}

impl ConstDecl {
    /// Rebuild this declaration around a new initializer, keeping
    /// everything else.
    #[must_use]
    pub fn with_init(&self, init: ExprId) -> Self {
        ConstDecl {
            name: self.name,
            annotations: self.annotations.clone(),
            ty: self.ty.clone(),
            init,
            span: self.span,
        }
    }
}

/// A parser state. Its transition is either a select expression or a
/// direct path to the next state.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct State {
    pub name: Name,
    pub transition: ExprId,
    pub span: Span,
}

/// A compilation unit: constant declarations and parser states, in source
/// order.
#[derive(Clone, Default, Debug)]
pub struct Module {
    pub consts: Vec<ConstDecl>,
    pub states: Vec<State>,
}

impl Module {
    pub fn new() -> Self {
        Self::default()
    }
}
