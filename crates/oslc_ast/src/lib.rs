// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

//! Typed AST for the oslc shading language front end.
//!
//! Nodes are built through smart constructors on [`Context`]. Each constructor
//! resolves names against the symbol table, infers the node's type, applies the
//! rewrites the language calls for (constant folding, compound assignment,
//! component access), and records diagnostics in the context's error list.
//! Construction never fails: a node that cannot be resolved gets `Type::Unknown`.

// Constructors, grouped by node family
mod access;
mod declarations;
mod display;
mod expressions;
mod refs;
mod statements;
mod typecheck;

pub mod ast;
pub mod context;
pub mod fold;
pub mod node_counts;
pub mod operators;
pub mod options;
pub mod semantic_error;
pub mod symbols;
pub mod types;
pub mod validate;

pub use ast::{Ast, LiteralValue, Node, NodeId, NodeKind, NodeType};
pub use context::Context;
pub use display::TreeDisplay;
pub use options::CompilerOptions;
pub use semantic_error::{SemanticError, SemanticErrorKind, SemanticErrorList};
pub use symbols::{Symbol, SymbolId, SymbolKind, SymbolTable};
pub use types::Type;

// Reexport the diagnostics interface
pub use oslc_source_file::{Severity, SourceLoc};
