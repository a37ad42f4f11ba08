//! Constant folding for the Weft compiler.
//!
//! Bottom-up partial evaluation of expressions: wherever an expression is
//! fully determined by compile-time information, it is replaced by an
//! equivalent literal node. The pass honors width-and-sign promotion
//! between `bit<w>`/`int<w>` and the unbounded literal type, propagates
//! named constants through the symbol table, and partially evaluates
//! select expressions by pruning arms that cannot match.
//!
//! The pass runs usefully in two configurations:
//!
//! - **Before type checking** (no type map): only the width-independent
//!   folds run, and situations the checker has not disambiguated yet are
//!   left alone silently.
//! - **After type checking** (with a type map): all folds run, and
//!   expressions that must be constant but are not produce errors.
//!
//! All arithmetic is exact ([`num_bigint::BigInt`]); widths are reconciled
//! by downstream passes, guided by the `was_cast` flag on folded
//! constants.

mod contains;
mod folder;
mod memo;

pub use contains::Containment;
pub use folder::Folder;
pub use memo::ConstantMemo;

use weft_diagnostic::DiagnosticSink;
use weft_ir::{
    rewrite_postorder, DeclId, ExprArena, Module, StringInterner, SymbolTable, TypeMap,
};

/// The constant-folding pass over a module.
///
/// Folds every constant declaration in source order (so each declaration's
/// value is available to the ones after it) and then every parser state's
/// transition expression.
pub struct ConstantFolding<'a> {
    symbols: Option<&'a SymbolTable>,
    type_map: Option<&'a mut TypeMap>,
    sink: &'a mut DiagnosticSink,
    warnings: bool,
}

impl<'a> ConstantFolding<'a> {
    pub fn new(sink: &'a mut DiagnosticSink) -> Self {
        ConstantFolding {
            symbols: None,
            type_map: None,
            sink,
            warnings: true,
        }
    }

    /// Resolve path expressions against the given symbol table.
    #[must_use]
    pub fn with_symbols(mut self, symbols: &'a SymbolTable) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Enable the type-dependent folds.
    #[must_use]
    pub fn with_type_map(mut self, type_map: &'a mut TypeMap) -> Self {
        self.type_map = Some(type_map);
        self
    }

    /// Control emission of non-fatal warnings.
    #[must_use]
    pub fn with_warnings(mut self, warnings: bool) -> Self {
        self.warnings = warnings;
        self
    }

    /// Run the pass. Returns whether anything in the module changed.
    pub fn run(
        self,
        module: &mut Module,
        arena: &mut ExprArena,
        interner: &StringInterner,
    ) -> bool {
        let mut folder = Folder::new(interner, self.sink, self.warnings);
        if let Some(symbols) = self.symbols {
            folder = folder.with_symbols(symbols);
        }
        if let Some(type_map) = self.type_map {
            folder = folder.with_type_map(type_map);
        }

        let mut changed = false;
        for index in 0..module.consts.len() {
            let init = module.consts[index].init;
            let folded = rewrite_postorder(arena, init, &mut folder);
            if folded != init {
                module.consts[index].init = folded;
                changed = true;
            }
            let decl = module.consts[index].clone();
            if let Some(rebuilt) = folder.fold_const_decl(arena, &decl, DeclId::new(index as u32))
            {
                module.consts[index] = rebuilt;
                changed = true;
            }
        }

        for state in &mut module.states {
            let folded = rewrite_postorder(arena, state.transition, &mut folder);
            if folded != state.transition {
                state.transition = folded;
                changed = true;
            }
        }

        tracing::debug!(
            constants = folder.memo().len(),
            changed,
            "constant folding complete"
        );
        changed
    }
}
