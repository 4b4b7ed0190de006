// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

use crate::ast::{Ast, Node, NodeId, NodeKind};
use crate::options::CompilerOptions;
use crate::semantic_error::{SemanticError, SemanticErrorKind, SemanticErrorList};
use crate::symbols::{Symbol, SymbolId, SymbolKind, SymbolTable};
use crate::types::{StructId, StructRegistry, StructSpec, Type};
use oslc_source_file::{Severity, SourceLoc};

/// State shared by every node constructor while one compilation unit is built:
/// the node arena, the symbol table, declared struct layouts, the diagnostics
/// reported so far, and the current source position.
#[derive(Debug)]
pub struct Context {
    pub(crate) ast: Ast,
    pub(crate) semantic_errors: SemanticErrorList,
    pub symbol_table: SymbolTable,
    pub(crate) structs: StructRegistry,
    options: CompilerOptions,
    location: SourceLoc,
}

impl Context {
    pub fn new<T: ToString>(file: T) -> Context {
        Context::with_options(file, CompilerOptions::default())
    }

    pub fn with_options<T: ToString>(file: T, options: CompilerOptions) -> Context {
        Context {
            ast: Ast::new(options.count_nodes),
            semantic_errors: SemanticErrorList::new(),
            symbol_table: SymbolTable::new(),
            structs: StructRegistry::new(),
            options,
            location: SourceLoc::new(file, 1),
        }
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn ast_mut(&mut self) -> &mut Ast {
        &mut self.ast
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.ast[id]
    }

    pub fn errors(&self) -> &SemanticErrorList {
        &self.semantic_errors
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbol_table[id]
    }

    pub fn structs(&self) -> &StructRegistry {
        &self.structs
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn as_tuple(self) -> (Ast, SemanticErrorList, SymbolTable) {
        (self.ast, self.semantic_errors, self.symbol_table)
    }

    /// The position stamped on nodes created from now on.
    pub fn location(&self) -> &SourceLoc {
        &self.location
    }

    pub fn set_location<T: ToString>(&mut self, file: T, line: u32) {
        self.location = SourceLoc::new(file, line);
    }

    pub fn set_line(&mut self, line: u32) {
        self.location.set_line(line);
    }

    pub fn enter_scope(&mut self) {
        self.symbol_table.enter_scope();
    }

    pub fn exit_scope(&mut self) {
        self.symbol_table.exit_scope();
    }

    /// Record the layout of a struct and bind its name as a type symbol.
    pub fn declare_struct(&mut self, spec: StructSpec) -> StructId {
        let name = spec.name().to_string();
        let id = self.structs.declare(spec);
        self.symbol_table
            .insert(Symbol::new(name, Type::Struct(id), SymbolKind::Type, None));
        id
    }

    pub fn code_from_type(&self, typ: &Type) -> String {
        self.structs.code_from_type(typ)
    }

    pub fn type_name(&self, typ: &Type) -> String {
        self.structs.display(typ).to_string()
    }

    /// Comma separated type names of the nodes in the chain starting at `head`.
    pub fn list_to_types_string(&self, head: Option<NodeId>) -> String {
        self.ast
            .siblings(head)
            .map(|id| self.type_name(self.ast[id].typ()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn error(&mut self, loc: &SourceLoc, kind: SemanticErrorKind) {
        self.report(Severity::Error, kind, loc);
    }

    /// Record a warning, or an error if warnings are treated as errors.
    pub fn warning(&mut self, loc: &SourceLoc, kind: SemanticErrorKind) {
        let severity = if self.options.warnings_as_errors {
            Severity::Error
        } else {
            Severity::Warning
        };
        self.report(severity, kind, loc);
    }

    pub fn info<T: ToString>(&mut self, loc: &SourceLoc, msg: T) {
        self.report(Severity::Info, SemanticErrorKind::Note(msg.to_string()), loc);
    }

    pub fn message<T: ToString>(&mut self, loc: &SourceLoc, msg: T) {
        self.report(Severity::Message, SemanticErrorKind::Note(msg.to_string()), loc);
    }

    fn report(&mut self, severity: Severity, kind: SemanticErrorKind, loc: &SourceLoc) {
        tracing::debug!(%loc, %severity, "{kind}");
        self.semantic_errors
            .insert_error(SemanticError::new(kind, severity, loc.clone()));
    }

    pub(crate) fn node_error(&mut self, id: NodeId, kind: SemanticErrorKind) {
        let loc = self.ast[id].loc.clone();
        self.error(&loc, kind);
    }

    pub(crate) fn node_warning(&mut self, id: NodeId, kind: SemanticErrorKind) {
        let loc = self.ast[id].loc.clone();
        self.warning(&loc, kind);
    }

    /// Allocate a node at the current location with the given children.
    pub(crate) fn new_node(&mut self, kind: NodeKind, children: &[Option<NodeId>]) -> NodeId {
        let id = self.ast.alloc(Node::new(kind, self.location.clone()));
        for child in children {
            self.ast.add_child(id, *child);
        }
        id
    }

    pub(crate) fn set_type(&mut self, id: NodeId, typ: Type) {
        self.ast[id].typ = typ;
    }

    pub(crate) fn typ(&self, id: NodeId) -> &Type {
        &self.ast[id].typ
    }
}

/// Run the statements with a fresh scope entered on the context's symbol table.
#[macro_export]
macro_rules! with_scope {
    ($ctxt:ident, $($code:stmt);+ $(;)?) => {
        $ctxt.enter_scope();
        $($code)+
        $ctxt.exit_scope();
    };

    ($ctxt:ident, $code:block) => {
        $ctxt.enter_scope();
        $code;
        $ctxt.exit_scope();
    };
}
