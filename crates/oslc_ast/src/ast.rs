// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// The AST node model and the arena that owns every node.
//
// A node has up to `MAX_CHILDREN` ordered child slots, any of which may be empty,
// and an optional `next` link. A child slot holds the head of a sibling chain, so
// statement lists, formal parameter lists and argument lists hang off a single slot.
// The arena keeps the structure a strict tree: a node is reachable from at most
// one child slot or `next` link.

use crate::node_counts::NodeCounts;
use crate::operators::{
    AssignOp, BinaryOp, IncDecOp, LoopKind, LoopModKind, ShaderKind, UnaryOp,
};
use crate::symbols::{Symbol, SymbolId};
use crate::types::{StructId, Type};
use oslc_source_file::SourceLoc;
use std::borrow::Cow;
use std::ops::{Index, IndexMut};

pub const MAX_CHILDREN: usize = 4;

// Index into `Ast::nodes`. Ids of freed nodes may be handed out again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl From<NodeId> for usize {
    fn from(id: NodeId) -> usize {
        id.0
    }
}

/// Variant tag of a node, without the payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum NodeType {
    ShaderDeclaration,
    FunctionDeclaration,
    VariableDeclaration,
    VariableRef,
    PreIncDec,
    PostIncDec,
    Index,
    StructSelect,
    ConditionalStatement,
    LoopStatement,
    LoopModStatement,
    ReturnStatement,
    CompoundInitializer,
    Literal,
    UnaryExpression,
    BinaryExpression,
    AssignExpression,
    TernaryExpression,
    TypecastExpression,
    TypeConstructor,
    FunctionCall,
}

impl NodeType {
    pub const COUNT: usize = 21;

    pub const ALL: [NodeType; NodeType::COUNT] = [
        NodeType::ShaderDeclaration,
        NodeType::FunctionDeclaration,
        NodeType::VariableDeclaration,
        NodeType::VariableRef,
        NodeType::PreIncDec,
        NodeType::PostIncDec,
        NodeType::Index,
        NodeType::StructSelect,
        NodeType::ConditionalStatement,
        NodeType::LoopStatement,
        NodeType::LoopModStatement,
        NodeType::ReturnStatement,
        NodeType::CompoundInitializer,
        NodeType::Literal,
        NodeType::UnaryExpression,
        NodeType::BinaryExpression,
        NodeType::AssignExpression,
        NodeType::TernaryExpression,
        NodeType::TypecastExpression,
        NodeType::TypeConstructor,
        NodeType::FunctionCall,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            NodeType::ShaderDeclaration => "shader_declaration",
            NodeType::FunctionDeclaration => "function_declaration",
            NodeType::VariableDeclaration => "variable_declaration",
            NodeType::VariableRef => "variable_ref",
            NodeType::PreIncDec => "preincdec",
            NodeType::PostIncDec => "postincdec",
            NodeType::Index => "index",
            NodeType::StructSelect => "structselect",
            NodeType::ConditionalStatement => "conditional_statement",
            NodeType::LoopStatement => "loop_statement",
            NodeType::LoopModStatement => "loopmod_statement",
            NodeType::ReturnStatement => "return_statement",
            NodeType::CompoundInitializer => "compound_initializer",
            NodeType::Literal => "literal",
            NodeType::UnaryExpression => "unary_expression",
            NodeType::BinaryExpression => "binary_expression",
            NodeType::AssignExpression => "assign_expression",
            NodeType::TernaryExpression => "ternary_expression",
            NodeType::TypecastExpression => "typecast_expression",
            NodeType::TypeConstructor => "type_constructor",
            NodeType::FunctionCall => "function_call",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Int(i32),
    Float(f32),
    String(String),
}

impl LiteralValue {
    pub fn typ(&self) -> Type {
        match self {
            LiteralValue::Int(_) => Type::Int,
            LiteralValue::Float(_) => Type::Float,
            LiteralValue::String(_) => Type::String,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            LiteralValue::Int(val) => Some(*val),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            LiteralValue::Float(val) => Some(*val),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LiteralValue::String(val) => Some(val.as_str()),
            _ => None,
        }
    }
}

/// The symbol declared by a variable declaration. Metadata declarations own their
/// symbol; every other declaration binds it in the symbol table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclSymbol {
    Table(SymbolId),
    Owned(Box<Symbol>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShaderDecl {
    pub(crate) kind: ShaderKind,
    pub(crate) name: String,
}

impl ShaderDecl {
    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDecl {
    pub(crate) name: String,
    pub(crate) sym: Option<SymbolId>,
    pub(crate) is_builtin: bool,
}

impl FunctionDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `None` if the signature could not be resolved.
    pub fn sym(&self) -> Option<SymbolId> {
        self.sym
    }

    pub fn is_builtin(&self) -> bool {
        self.is_builtin
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableDecl {
    pub(crate) name: String,
    pub(crate) sym: Option<DeclSymbol>,
    pub(crate) is_param: bool,
    pub(crate) is_output: bool,
    pub(crate) is_metadata: bool,
    pub(crate) is_init_list: bool,
}

impl VariableDecl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sym(&self) -> Option<&DeclSymbol> {
        self.sym.as_ref()
    }

    /// The id of the declared symbol, unless it is an owned metadata symbol.
    pub fn sym_id(&self) -> Option<SymbolId> {
        match self.sym {
            Some(DeclSymbol::Table(id)) => Some(id),
            _ => None,
        }
    }

    pub fn is_param(&self) -> bool {
        self.is_param
    }

    pub fn is_output(&self) -> bool {
        self.is_output
    }

    pub fn is_metadata(&self) -> bool {
        self.is_metadata
    }

    pub fn is_init_list(&self) -> bool {
        self.is_init_list
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableRef {
    pub(crate) name: String,
    pub(crate) sym: Option<SymbolId>,
}

impl VariableRef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sym(&self) -> Option<SymbolId> {
        self.sym
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructSelect {
    pub(crate) field: String,
    // Name of the flattened field symbol, e.g. "s.pos".
    pub(crate) field_name: String,
    pub(crate) struct_id: Option<StructId>,
    pub(crate) field_id: Option<usize>,
    pub(crate) field_sym: Option<SymbolId>,
    // Synthesized component index for `c.r`, `p.x`, ... Owned by this node,
    // not one of its children.
    pub(crate) comp_index: Option<NodeId>,
}

impl StructSelect {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn struct_id(&self) -> Option<StructId> {
        self.struct_id
    }

    pub fn field_id(&self) -> Option<usize> {
        self.field_id
    }

    pub fn field_sym(&self) -> Option<SymbolId> {
        self.field_sym
    }

    pub fn comp_index(&self) -> Option<NodeId> {
        self.comp_index
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperatorExpr<Op> {
    pub(crate) op: Op,
    // User overload `__operator__<opword>__`, if one was declared.
    pub(crate) overload: Option<SymbolId>,
}

impl<Op: Copy> OperatorExpr<Op> {
    pub fn op(&self) -> Op {
        self.op
    }

    pub fn overload(&self) -> Option<SymbolId> {
        self.overload
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionCall {
    pub(crate) name: String,
    pub(crate) sym: Option<SymbolId>,
    pub(crate) poly: Option<SymbolId>,
    pub(crate) struct_ctor: bool,
    // Bit 0 is the return value, bit i+1 is argument i.
    pub(crate) argread: u32,
    pub(crate) argwrite: u32,
}

impl FunctionCall {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sym(&self) -> Option<SymbolId> {
        self.sym
    }

    /// The overload selected from the polymorphic chain.
    pub fn poly(&self) -> Option<SymbolId> {
        self.poly
    }

    pub fn is_struct_ctr(&self) -> bool {
        self.struct_ctor
    }

    pub fn argread(&self, arg: usize) -> bool {
        arg < 32 && self.argread & (1 << arg) != 0
    }

    pub fn argwrite(&self, arg: usize) -> bool {
        arg < 32 && self.argwrite & (1 << arg) != 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    ShaderDeclaration(ShaderDecl),
    FunctionDeclaration(FunctionDecl),
    VariableDeclaration(VariableDecl),
    VariableRef(VariableRef),
    PreIncDec(IncDecOp),
    PostIncDec(IncDecOp),
    Index,
    StructSelect(StructSelect),
    ConditionalStatement,
    LoopStatement(LoopKind),
    LoopModStatement(LoopModKind),
    ReturnStatement,
    CompoundInitializer { ctor: bool },
    Literal(LiteralValue),
    UnaryExpression(OperatorExpr<UnaryOp>),
    BinaryExpression(OperatorExpr<BinaryOp>),
    AssignExpression(AssignOp),
    TernaryExpression,
    TypecastExpression,
    TypeConstructor,
    FunctionCall(FunctionCall),
}

impl NodeKind {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::ShaderDeclaration(_) => NodeType::ShaderDeclaration,
            NodeKind::FunctionDeclaration(_) => NodeType::FunctionDeclaration,
            NodeKind::VariableDeclaration(_) => NodeType::VariableDeclaration,
            NodeKind::VariableRef(_) => NodeType::VariableRef,
            NodeKind::PreIncDec(_) => NodeType::PreIncDec,
            NodeKind::PostIncDec(_) => NodeType::PostIncDec,
            NodeKind::Index => NodeType::Index,
            NodeKind::StructSelect(_) => NodeType::StructSelect,
            NodeKind::ConditionalStatement => NodeType::ConditionalStatement,
            NodeKind::LoopStatement(_) => NodeType::LoopStatement,
            NodeKind::LoopModStatement(_) => NodeType::LoopModStatement,
            NodeKind::ReturnStatement => NodeType::ReturnStatement,
            NodeKind::CompoundInitializer { .. } => NodeType::CompoundInitializer,
            NodeKind::Literal(_) => NodeType::Literal,
            NodeKind::UnaryExpression(_) => NodeType::UnaryExpression,
            NodeKind::BinaryExpression(_) => NodeType::BinaryExpression,
            NodeKind::AssignExpression(_) => NodeType::AssignExpression,
            NodeKind::TernaryExpression => NodeType::TernaryExpression,
            NodeKind::TypecastExpression => NodeType::TypecastExpression,
            NodeKind::TypeConstructor => NodeType::TypeConstructor,
            NodeKind::FunctionCall(_) => NodeType::FunctionCall,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    kind: NodeKind,
    children: [Option<NodeId>; MAX_CHILDREN],
    nchildren: usize,
    next: Option<NodeId>,
    pub(crate) typ: Type,
    pub(crate) loc: SourceLoc,
    pub(crate) is_lvalue: bool,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, loc: SourceLoc) -> Node {
        Node {
            kind,
            children: [None; MAX_CHILDREN],
            nchildren: 0,
            next: None,
            typ: Type::Unknown,
            loc,
            is_lvalue: false,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Variant name used by the tree dump. Parameters print as "parameter".
    pub fn nodetypename(&self) -> &'static str {
        match &self.kind {
            NodeKind::VariableDeclaration(decl) if decl.is_param => "parameter",
            kind => kind.node_type().name(),
        }
    }

    /// Operator or sub-variant selector, 0 for variants that have none.
    pub fn opcode(&self) -> i32 {
        match &self.kind {
            NodeKind::ShaderDeclaration(decl) => decl.kind as i32,
            NodeKind::PreIncDec(op) | NodeKind::PostIncDec(op) => *op as i32,
            NodeKind::LoopStatement(kind) => *kind as i32,
            NodeKind::LoopModStatement(kind) => *kind as i32,
            NodeKind::UnaryExpression(expr) => expr.op as i32,
            NodeKind::BinaryExpression(expr) => expr.op as i32,
            NodeKind::AssignExpression(op) => *op as i32,
            _ => 0,
        }
    }

    pub fn opname(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::ShaderDeclaration(decl) => Some(decl.kind.name()),
            NodeKind::PreIncDec(op) | NodeKind::PostIncDec(op) => Some(op.opname()),
            NodeKind::LoopStatement(kind) => Some(kind.opname()),
            NodeKind::LoopModStatement(kind) => Some(kind.opname()),
            NodeKind::UnaryExpression(expr) => Some(expr.op.opname()),
            NodeKind::BinaryExpression(expr) => Some(expr.op.opname()),
            NodeKind::AssignExpression(op) => Some(op.opname()),
            NodeKind::FunctionCall(call) => Some(call.name.as_str()),
            _ => None,
        }
    }

    pub fn opword(&self) -> Option<&'static str> {
        match &self.kind {
            NodeKind::UnaryExpression(expr) => Some(expr.op.opword()),
            NodeKind::BinaryExpression(expr) => Some(expr.op.opword()),
            NodeKind::AssignExpression(op) => Some(op.opword()),
            _ => None,
        }
    }

    /// Role of child slot `i`, as printed by the tree dump.
    pub fn child_name(&self, i: usize) -> Option<Cow<'static, str>> {
        let names: &[&'static str] = match &self.kind {
            NodeKind::ShaderDeclaration(_) | NodeKind::FunctionDeclaration(_) => {
                &["metadata", "formals", "statements"]
            }
            NodeKind::VariableDeclaration(_) => &["initializer", "metadata"],
            NodeKind::Index => {
                return Some(Cow::Borrowed(if i == 0 { "expression" } else { "index" }))
            }
            NodeKind::StructSelect(_) => &["structure"],
            NodeKind::ConditionalStatement => &["condition", "truestatement", "falsestatement"],
            NodeKind::LoopStatement(_) => {
                &["initializer", "condition", "iteration", "bodystatement"]
            }
            NodeKind::ReturnStatement => &["expression"],
            NodeKind::CompoundInitializer { ctor } => {
                if *ctor {
                    &["args"]
                } else {
                    &["expression_list"]
                }
            }
            NodeKind::UnaryExpression(_) | NodeKind::PreIncDec(_) | NodeKind::PostIncDec(_) => {
                &["expression"]
            }
            NodeKind::BinaryExpression(_) => &["left", "right"],
            NodeKind::AssignExpression(_) => &["variable", "expression"],
            NodeKind::TernaryExpression => &["condition", "trueexpression", "falseexpression"],
            NodeKind::TypecastExpression => &["expr"],
            NodeKind::TypeConstructor => &["args"],
            NodeKind::FunctionCall(_) => return Some(Cow::Owned(format!("param{i}"))),
            NodeKind::VariableRef(_) | NodeKind::Literal(_) | NodeKind::LoopModStatement(_) => {
                &[]
            }
        };
        names.get(i).map(|name| Cow::Borrowed(*name))
    }

    pub fn child(&self, i: usize) -> Option<NodeId> {
        self.children.get(i).copied().flatten()
    }

    /// Number of child slots in use, including empty ones.
    pub fn nchildren(&self) -> usize {
        self.nchildren
    }

    pub fn children(&self) -> &[Option<NodeId>] {
        &self.children[..self.nchildren]
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn typ(&self) -> &Type {
        &self.typ
    }

    pub fn loc(&self) -> &SourceLoc {
        &self.loc
    }

    pub fn is_lvalue(&self) -> bool {
        self.is_lvalue
    }
}

/// The arena owning every node of a compilation unit.
#[derive(Debug, Default)]
pub struct Ast {
    nodes: Vec<Option<Node>>,
    free_slots: Vec<NodeId>,
    counts: Option<NodeCounts>,
}

impl Ast {
    pub fn new(count_nodes: bool) -> Ast {
        Ast {
            nodes: Vec::new(),
            free_slots: Vec::new(),
            counts: count_nodes.then(NodeCounts::new),
        }
    }

    pub fn counts(&self) -> Option<&NodeCounts> {
        self.counts.as_ref()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0), Some(Some(_)))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(|node| node.as_ref())
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(counts) = self.counts.as_mut() {
            counts.register(node.node_type());
        }
        match self.free_slots.pop() {
            Some(id) => {
                self.nodes[id.0] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Free `id`, its subtree, its sibling chain, and any component index it owns.
    /// Uses an explicit work list, so arbitrarily long chains are fine.
    pub fn free(&mut self, id: NodeId) {
        let mut worklist = vec![id];
        while let Some(id) = worklist.pop() {
            let Some(node) = self.nodes.get_mut(id.0).and_then(|slot| slot.take()) else {
                continue;
            };
            if let Some(counts) = self.counts.as_mut() {
                counts.deregister(node.node_type());
            }
            self.free_slots.push(id);
            worklist.extend(node.children.iter().flatten());
            worklist.extend(node.next);
            if let NodeKind::StructSelect(select) = &node.kind {
                worklist.extend(select.comp_index);
            }
        }
    }

    /// Append `child` to the next child slot of `parent`. An empty child still
    /// takes a slot, so positions stay meaningful.
    pub fn add_child(&mut self, parent: NodeId, child: Option<NodeId>) {
        let node = &mut self[parent];
        assert!(node.nchildren < MAX_CHILDREN, "too many children for {:?}", node.node_type());
        node.children[node.nchildren] = child;
        node.nchildren += 1;
    }

    /// Empty every child slot of `parent` and return what was there. The
    /// detached nodes are not freed.
    pub(crate) fn take_children(&mut self, parent: NodeId) -> Vec<Option<NodeId>> {
        let node = &mut self[parent];
        let taken = node.children[..node.nchildren].to_vec();
        node.children = [None; MAX_CHILDREN];
        node.nchildren = 0;
        taken
    }

    pub(crate) fn set_next(&mut self, id: NodeId, next: Option<NodeId>) {
        self[id].next = next;
    }

    pub fn siblings(&self, head: Option<NodeId>) -> Siblings<'_> {
        Siblings { ast: self, next: head }
    }

    pub fn list_len(&self, head: Option<NodeId>) -> usize {
        self.siblings(head).count()
    }

    pub fn list_to_vec(&self, head: Option<NodeId>) -> Vec<NodeId> {
        self.siblings(head).collect()
    }

    /// Link the nodes of `list` into a sibling chain, in order, and return its head.
    pub fn vec_to_list(&mut self, list: &[NodeId]) -> Option<NodeId> {
        for pair in list.windows(2) {
            self.set_next(pair[0], Some(pair[1]));
        }
        if let Some(last) = list.last() {
            self.set_next(*last, None);
        }
        list.first().copied()
    }

    /// Reverse the sibling chain starting at `head` in place; return the new head.
    pub fn reverse(&mut self, head: Option<NodeId>) -> Option<NodeId> {
        let mut prev = None;
        let mut current = head;
        while let Some(id) = current {
            current = self[id].next;
            self[id].next = prev;
            prev = Some(id);
        }
        prev
    }

    /// Link `tail` after the last node of `list`; return the head of the result.
    pub fn append(&mut self, list: Option<NodeId>, tail: Option<NodeId>) -> Option<NodeId> {
        let Some(head) = list else {
            return tail;
        };
        let mut last = head;
        while let Some(next) = self[last].next {
            last = next;
        }
        self.set_next(last, tail);
        Some(head)
    }

    /// Copy the subtree rooted at `id`. The copy does not include `id`'s siblings.
    pub(crate) fn deep_copy(&mut self, id: NodeId) -> NodeId {
        let mut node = self[id].clone();
        node.next = None;
        for slot in node.children.iter_mut() {
            if let Some(child) = *slot {
                *slot = self.copy_list(Some(child));
            }
        }
        if let NodeKind::StructSelect(select) = &mut node.kind {
            if let Some(comp) = select.comp_index {
                select.comp_index = Some(self.deep_copy(comp));
            }
        }
        self.alloc(node)
    }

    fn copy_list(&mut self, head: Option<NodeId>) -> Option<NodeId> {
        let originals = self.list_to_vec(head);
        let copies: Vec<NodeId> = originals.into_iter().map(|id| self.deep_copy(id)).collect();
        self.vec_to_list(&copies)
    }
}

impl Drop for Ast {
    fn drop(&mut self) {
        if let Some(counts) = &self.counts {
            for line in counts.report() {
                tracing::debug!("{line}");
            }
        }
    }
}

impl Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.nodes.get(id.0) {
            Some(Some(node)) => node,
            _ => panic!("use of freed or unknown AST node {:?}", id),
        }
    }
}

impl IndexMut<NodeId> for Ast {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.nodes.get_mut(id.0) {
            Some(Some(node)) => node,
            _ => panic!("use of freed or unknown AST node {:?}", id),
        }
    }
}

pub struct Siblings<'a> {
    ast: &'a Ast,
    next: Option<NodeId>,
}

impl Iterator for Siblings<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.ast[current].next;
        Some(current)
    }
}

#[cfg(test)]
fn literal(ast: &mut Ast, val: i32) -> NodeId {
    ast.alloc(Node::new(
        NodeKind::Literal(LiteralValue::Int(val)),
        SourceLoc::default(),
    ))
}

#[test]
fn test_free_reuses_slots() {
    let mut ast = Ast::new(true);
    let a = literal(&mut ast, 1);
    let b = literal(&mut ast, 2);
    ast.vec_to_list(&[a, b]);
    ast.free(a);
    assert!(ast.is_empty());
    assert_eq!(ast.counts().map(|c| c.peak(NodeType::Literal)), Some(2));
    let c = literal(&mut ast, 3);
    assert!(c == a || c == b);
    assert_eq!(ast.len(), 1);
}

#[test]
fn test_append() {
    let mut ast = Ast::new(false);
    let ids: Vec<_> = (0..4).map(|i| literal(&mut ast, i)).collect();
    let first = ast.vec_to_list(&ids[..2]);
    let second = ast.vec_to_list(&ids[2..]);
    let all = ast.append(first, second);
    assert_eq!(ast.list_to_vec(all), ids);
    assert_eq!(ast.append(None, second), second);
}
