// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// Defines data structures and api for symbols, scope, and symbol tables.
//
// Every `Symbol` lives in `SymbolTable::all_symbols` and is addressed by `SymbolId`.
// A name is bound in at most one `Symbol` per scope; binding a function name again
// in the same scope replaces the binding, and the new function symbol links to the
// previous one through `FunctionInfo::next_poly`, forming the polymorphic chain.

use crate::ast::NodeId;
use crate::types::Type;
use hashbrown::HashMap;
use std::fmt;

// This wrapped `usize` serves as
// * A unique label for instances of `Symbol`.
// * An index into `all_symbols: Vec<Symbol>`.
// * The values in `SymbolMap`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(usize);

impl From<SymbolId> for usize {
    fn from(symid: SymbolId) -> usize {
        symid.0
    }
}

/// Scope identifier. The global scope is 0; every scope entered afterwards
/// gets the next unused id, so ids are never reused within a compilation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId(0);

    pub fn is_global(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Function,
    Param,
    OutputParam,
    Local,
    Temp,
    Type,
    Metadata,
}

/// The extra state carried by function symbols.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionInfo {
    argcodes: String,
    next_poly: Option<SymbolId>,
    takes_derivs: bool,
    printf_args: bool,
    texture_args: bool,
    readwrite_special_case: bool,
}

impl FunctionInfo {
    pub fn argcodes(&self) -> &str {
        &self.argcodes
    }

    pub fn set_argcodes<T: ToString>(&mut self, argcodes: T) {
        self.argcodes = argcodes.to_string();
    }

    /// The next (older) overload of the same name, if any.
    pub fn next_poly(&self) -> Option<SymbolId> {
        self.next_poly
    }

    pub fn set_next_poly(&mut self, next_poly: Option<SymbolId>) {
        self.next_poly = next_poly;
    }

    pub fn takes_derivs(&self) -> bool {
        self.takes_derivs
    }

    pub fn set_takes_derivs(&mut self, val: bool) {
        self.takes_derivs = val;
    }

    pub fn printf_args(&self) -> bool {
        self.printf_args
    }

    pub fn set_printf_args(&mut self, val: bool) {
        self.printf_args = val;
    }

    pub fn texture_args(&self) -> bool {
        self.texture_args
    }

    pub fn set_texture_args(&mut self, val: bool) {
        self.texture_args = val;
    }

    pub fn readwrite_special_case(&self) -> bool {
        self.readwrite_special_case
    }

    pub fn set_readwrite_special_case(&mut self, val: bool) {
        self.readwrite_special_case = val;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    typ: Type,
    kind: SymbolKind,
    scope: ScopeId,
    readonly: bool,
    node: Option<NodeId>,
    field_id: Option<usize>,
    function: Option<FunctionInfo>,
}

impl Symbol {
    /// A data symbol. Input parameters are readonly.
    pub fn new<T: ToString>(name: T, typ: Type, kind: SymbolKind, node: Option<NodeId>) -> Symbol {
        Symbol {
            name: name.to_string(),
            typ,
            kind,
            scope: ScopeId::GLOBAL,
            readonly: kind == SymbolKind::Param,
            node,
            field_id: None,
            function: if kind == SymbolKind::Function {
                Some(FunctionInfo::default())
            } else {
                None
            },
        }
    }

    /// A function symbol returning `typ`. `node` is `None` for compiled built-ins.
    pub fn function<T: ToString>(name: T, typ: Type, node: Option<NodeId>) -> Symbol {
        Symbol::new(name, typ, SymbolKind::Function, node)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn typ(&self) -> &Type {
        &self.typ
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn is_function(&self) -> bool {
        self.kind == SymbolKind::Function
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn readonly(&self) -> bool {
        self.readonly
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }

    /// The AST node that declared this symbol.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn field_id(&self) -> Option<usize> {
        self.field_id
    }

    pub fn set_field_id(&mut self, field_id: usize) {
        self.field_id = Some(field_id);
    }

    pub fn function_info(&self) -> Option<&FunctionInfo> {
        self.function.as_ref()
    }

    pub fn function_info_mut(&mut self) -> Option<&mut FunctionInfo> {
        self.function.as_mut()
    }

    /// Name as seen by the backend: unique across scopes.
    pub fn mangled(&self) -> String {
        if self.scope.is_global() {
            self.name.clone()
        } else {
            format!("___{}_{}", self.scope, self.name)
        }
    }
}

/// A `SymbolMap` is a map from names to `SymbolId` for a single instance of a scope.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SymbolMap {
    table: HashMap<String, SymbolId>,
    scope_id: ScopeId,
}

impl SymbolMap {
    fn new(scope_id: ScopeId) -> SymbolMap {
        SymbolMap {
            table: HashMap::<String, SymbolId>::new(),
            scope_id,
        }
    }

    fn insert<T: ToString>(&mut self, name: T, sym: SymbolId) {
        self.table.insert(name.to_string(), sym);
    }

    fn get_symbol_id(&self, name: &str) -> Option<SymbolId> {
        self.table.get(name).copied()
    }

    fn len(&self) -> usize {
        self.table.len()
    }
}

/// A `SymbolTable` is a stack of `SymbolMap`s together with a `Vec` mapping
/// `SymbolId` to `Symbol`s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTable {
    /// A stack each of whose elements represent a scope mapping `name: String` to `SymbolId`.
    symbol_table_stack: Vec<SymbolMap>,
    /// A list of all `Symbol`s. Indices are `SymbolId`.
    all_symbols: Vec<Symbol>,
    /// The id handed to the next scope entered.
    next_scope_id: usize,
}

impl SymbolTable {
    /// Create a new `SymbolTable` and initialize with the global scope.
    pub fn new() -> SymbolTable {
        SymbolTable {
            symbol_table_stack: vec![SymbolMap::new(ScopeId::GLOBAL)],
            all_symbols: Vec::<Symbol>::new(),
            next_scope_id: 1,
        }
    }

    pub fn number_of_scopes(&self) -> usize {
        self.symbol_table_stack.len()
    }

    pub fn enter_scope(&mut self) -> ScopeId {
        let scope_id = ScopeId(self.next_scope_id);
        self.next_scope_id += 1;
        self.symbol_table_stack.push(SymbolMap::new(scope_id));
        scope_id
    }

    /// Leave the current scope. The global scope is never popped.
    pub fn exit_scope(&mut self) {
        if self.symbol_table_stack.len() > 1 {
            self.symbol_table_stack.pop();
        }
    }

    pub fn scope_id(&self) -> ScopeId {
        self.current_scope().scope_id
    }

    // The stack always holds at least the global scope.
    fn current_scope(&self) -> &SymbolMap {
        &self.symbol_table_stack[self.symbol_table_stack.len() - 1]
    }

    fn current_scope_mut(&mut self) -> &mut SymbolMap {
        let top = self.symbol_table_stack.len() - 1;
        &mut self.symbol_table_stack[top]
    }

    /// Return the length (number of bindings) in the current scope.
    pub fn len_current_scope(&self) -> usize {
        self.current_scope().len()
    }

    /// Total number of symbols created, in every scope.
    pub fn num_symbols(&self) -> usize {
        self.all_symbols.len()
    }

    /// Stamp `symbol` with the current scope, bind its name there, and return its id.
    /// An existing binding of the same name in the current scope is replaced.
    pub fn insert(&mut self, mut symbol: Symbol) -> SymbolId {
        symbol.scope = self.scope_id();
        let symbol_id = SymbolId(self.all_symbols.len());
        self.current_scope_mut().insert(symbol.name(), symbol_id);
        self.all_symbols.push(symbol);
        symbol_id
    }

    /// Look up `name` in the stack of scopes, innermost first.
    pub fn find(&self, name: &str) -> Option<SymbolId> {
        self.symbol_table_stack
            .iter()
            .rev()
            .find_map(|table| table.get_symbol_id(name))
    }

    /// Look up `name` for a redeclaration check. Finds a binding in the current
    /// scope, or a function bound in the global scope. Shadowing a variable of an
    /// enclosing scope is not a clash; reusing the name of a global function is.
    pub fn clash(&self, name: &str) -> Option<SymbolId> {
        if let Some(id) = self.current_scope().get_symbol_id(name) {
            return Some(id);
        }
        self.symbol_table_stack[0]
            .get_symbol_id(name)
            .filter(|id| self[*id].is_function())
    }

    /// Iterate over the polymorphic chain that starts at `head`, newest first.
    pub fn overloads(&self, head: Option<SymbolId>) -> PolyIter<'_> {
        PolyIter { table: self, next: head }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

pub struct PolyIter<'a> {
    table: &'a SymbolTable,
    next: Option<SymbolId>,
}

impl Iterator for PolyIter<'_> {
    type Item = SymbolId;

    fn next(&mut self) -> Option<SymbolId> {
        let current = self.next?;
        self.next = self.table[current]
            .function_info()
            .and_then(|info| info.next_poly());
        Some(current)
    }
}

use std::ops::{Index, IndexMut};
impl Index<SymbolId> for SymbolTable {
    type Output = Symbol;

    // Interface for retrieving `Symbol`s from `all_symbols`
    fn index(&self, symbol_id: SymbolId) -> &Self::Output {
        &self.all_symbols[symbol_id.0]
    }
}

impl IndexMut<SymbolId> for SymbolTable {
    fn index_mut(&mut self, symbol_id: SymbolId) -> &mut Self::Output {
        &mut self.all_symbols[symbol_id.0]
    }
}

#[test]
fn test_symbol_table_scopes() {
    let mut table = SymbolTable::new();
    let x = table.insert(Symbol::new("x", Type::Int, SymbolKind::Local, None));
    assert_eq!(table.find("x"), Some(x));
    assert_eq!(table[x].scope(), ScopeId::GLOBAL);

    let inner = table.enter_scope();
    assert_eq!(table.find("x"), Some(x));
    assert_eq!(table.clash("x"), None);
    let x2 = table.insert(Symbol::new("x", Type::Float, SymbolKind::Local, None));
    assert_eq!(table.find("x"), Some(x2));
    assert_eq!(table[x2].scope(), inner);
    assert_eq!(table[x2].mangled(), format!("___{inner}_x"));

    table.exit_scope();
    assert_eq!(table.find("x"), Some(x));
    let again = table.enter_scope();
    assert_ne!(again, inner);
}

#[test]
fn test_clash_sees_global_functions() {
    let mut table = SymbolTable::new();
    let f = table.insert(Symbol::function("noise", Type::Float, None));
    table.enter_scope();
    assert_eq!(table.clash("noise"), Some(f));
}

#[test]
fn test_input_params_are_readonly() {
    assert!(Symbol::new("a", Type::Int, SymbolKind::Param, None).readonly());
    assert!(!Symbol::new("a", Type::Int, SymbolKind::OutputParam, None).readonly());
    assert!(!Symbol::new("a", Type::Int, SymbolKind::Local, None).readonly());
}
