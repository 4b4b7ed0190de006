// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// Expression nodes: operators, assignment, casts, constructors and calls.

use crate::ast::{DeclSymbol, FunctionCall, NodeId, NodeKind, OperatorExpr};
use crate::context::Context;
use crate::fold::fold_binary;
use crate::operators::{AssignOp, BinaryOp, IncDecOp, UnaryOp};
use crate::semantic_error::SemanticErrorKind::*;
use crate::symbols::{Symbol, SymbolId, SymbolKind};
use crate::types::{assignable, promote_types, Type};

impl Context {
    // The overload of the user function `__operator__<opword>__` matching
    // `operands`, if one is visible. Operands the builtin operator handles only
    // take an overload declared for exactly their types.
    fn operator_overload(&self, opword: &str, operands: &[NodeId]) -> Option<SymbolId> {
        let head = self
            .symbol_table
            .find(&format!("__operator__{opword}__"))
            .filter(|sym| self.symbol_table[*sym].is_function())?;
        if operands.iter().any(|arg| self.typ(*arg).is_structure()) {
            self.resolve_overload(head, operands)
        } else {
            self.exact_overload(head, operands)
        }
    }

    pub fn unary_expression(&mut self, op: UnaryOp, expr: NodeId) -> NodeId {
        let overload = self.operator_overload(op.opword(), &[expr]);
        let id = self.new_node(
            NodeKind::UnaryExpression(OperatorExpr { op, overload }),
            &[Some(expr)],
        );
        let typ = match overload {
            Some(sym) => self.symbol_table[sym].typ().clone(),
            None if op == UnaryOp::Not => Type::Int,
            None => self.typ(expr).clone(),
        };
        self.set_type(id, typ);
        id
    }

    /// A binary expression node, without constant folding.
    pub fn binary_expression(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        let overload = if op.is_overloadable() {
            self.operator_overload(op.opword(), &[left, right])
        } else {
            None
        };
        let id = self.new_node(
            NodeKind::BinaryExpression(OperatorExpr { op, overload }),
            &[Some(left), Some(right)],
        );
        let typ = match overload {
            Some(sym) => self.symbol_table[sym].typ().clone(),
            None => binary_result_type(op, self.typ(left), self.typ(right)),
        };
        self.set_type(id, typ);
        id
    }

    /// `left op right`, folded to a literal when both operands are int literals or
    /// both are float literals. The operand nodes are freed when folding happens.
    pub fn make_binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        if let (NodeKind::Literal(lv), NodeKind::Literal(rv)) =
            (self.ast[left].kind(), self.ast[right].kind())
        {
            if let Some(folded) = fold_binary(op, lv, rv) {
                tracing::trace!("folded {:?} {} {:?} to {:?}", lv, op.opname(), rv, folded);
                self.ast.free(left);
                self.ast.free(right);
                return self.literal(folded);
            }
        }
        self.binary_expression(op, left, right)
    }

    /// `var op expr`. A compound assignment `a op= b` is rewritten as
    /// `a = a op b`, with the `a` on the right a copy of the target.
    pub fn assign_expression(&mut self, var: NodeId, op: AssignOp, expr: NodeId) -> NodeId {
        let rhs = match op.binary_op() {
            Some(binop) => {
                let copy = self.ast.deep_copy(var);
                self.binary_expression(binop, copy, expr)
            }
            None => expr,
        };
        let id = self.new_node(
            NodeKind::AssignExpression(AssignOp::Assign),
            &[Some(var), Some(rhs)],
        );
        let typ = self.typ(var).clone();
        self.set_type(id, typ);
        self.check_symbol_writeability(var, false);
        id
    }

    pub fn preincdec(&mut self, op: IncDecOp, expr: NodeId) -> NodeId {
        let id = self.new_node(NodeKind::PreIncDec(op), &[Some(expr)]);
        let typ = self.typ(expr).clone();
        self.set_type(id, typ);
        self.check_symbol_writeability(expr, false);
        id
    }

    pub fn postincdec(&mut self, op: IncDecOp, expr: NodeId) -> NodeId {
        let id = self.new_node(NodeKind::PostIncDec(op), &[Some(expr)]);
        let typ = self.typ(expr).clone();
        self.set_type(id, typ);
        self.check_symbol_writeability(expr, false);
        id
    }

    pub fn ternary_expression(
        &mut self,
        cond: NodeId,
        trueexpr: NodeId,
        falseexpr: NodeId,
    ) -> NodeId {
        let id = self.new_node(
            NodeKind::TernaryExpression,
            &[Some(cond), Some(trueexpr), Some(falseexpr)],
        );
        let typ = promote_types(self.typ(trueexpr), self.typ(falseexpr));
        self.set_type(id, typ);
        id
    }

    pub fn typecast_expression(&mut self, typ: Type, expr: NodeId) -> NodeId {
        let id = self.new_node(NodeKind::TypecastExpression, &[Some(expr)]);
        self.set_type(id, typ);
        id
    }

    pub fn type_constructor(&mut self, typ: Type, args: Option<NodeId>) -> NodeId {
        let id = self.new_node(NodeKind::TypeConstructor, &[args]);
        self.set_type(id, typ);
        id
    }

    /// `{ expr, ... }`. The type is set once the initializer is checked against
    /// the declaration it initializes.
    pub fn compound_initializer(&mut self, exprlist: Option<NodeId>) -> NodeId {
        self.new_node(
            NodeKind::CompoundInitializer { ctor: false },
            &[exprlist],
        )
    }

    /// A call of `name`, or of the already resolved `funcsym`. A struct type name
    /// in function position is a struct constructor.
    pub fn function_call<T: ToString>(
        &mut self,
        name: T,
        args: Option<NodeId>,
        funcsym: Option<SymbolId>,
    ) -> NodeId {
        let name = name.to_string();
        let sym = funcsym.or_else(|| self.symbol_table.find(&name));
        let id = self.new_node(
            NodeKind::FunctionCall(FunctionCall {
                name: name.clone(),
                sym,
                poly: funcsym,
                struct_ctor: false,
                argread: !1,
                argwrite: 1,
            }),
            &[args],
        );
        let Some(sym) = sym else {
            self.node_error(id, UnknownFunction(name));
            return id;
        };

        let symbol = &self.symbol_table[sym];
        if symbol.kind() == SymbolKind::Type && symbol.typ().is_structure() {
            let typ = symbol.typ().clone();
            if let NodeKind::FunctionCall(call) = self.ast[id].kind_mut() {
                call.struct_ctor = true;
            }
            self.set_type(id, typ);
            return id;
        }
        if !symbol.is_function() {
            self.node_error(id, NotAFunction(name));
            if let NodeKind::FunctionCall(call) = self.ast[id].kind_mut() {
                call.sym = None;
            }
            return id;
        }

        let args = self.ast.list_to_vec(args);
        let poly = match funcsym {
            Some(poly) => Some(poly),
            None => self.resolve_overload(sym, &args),
        };
        let Some(poly) = poly else {
            if args.iter().all(|arg| !self.typ(*arg).is_unknown()) {
                let args = self.list_to_types_string(args.first().copied());
                self.node_error(id, NoMatchingOverload { name, args });
            }
            return id;
        };

        let typ = self.symbol_table[poly].typ().clone();
        let mut argwrite = 1;
        if let Some(decl) = self.symbol_table[poly].node() {
            for (i, formal) in self.ast.siblings(self.ast[decl].child(1)).enumerate() {
                let is_output = match self.ast[formal].kind() {
                    NodeKind::VariableDeclaration(formal_decl) => formal_decl.is_output(),
                    _ => false,
                };
                if is_output && i + 1 < 32 {
                    argwrite |= 1 << (i + 1);
                }
            }
        }
        if let NodeKind::FunctionCall(call) = self.ast[id].kind_mut() {
            call.poly = Some(poly);
            call.argwrite = argwrite;
        }
        self.set_type(id, typ);
        id
    }

    // Pick the overload of `head`'s polymorphic chain that accepts `args`: an exact
    // signature match if there is one, otherwise the first overload whose formals
    // accept the arguments. A signature ending in '.' accepts trailing keyword
    // arguments.
    fn resolve_overload(&self, head: SymbolId, args: &[NodeId]) -> Option<SymbolId> {
        self.exact_overload(head, args).or_else(|| {
            self.symbol_table
                .overloads(Some(head))
                .find(|f| self.accepts(&self.symbol_table[*f], args))
        })
    }

    fn exact_overload(&self, head: SymbolId, args: &[NodeId]) -> Option<SymbolId> {
        let argcodes: String = args
            .iter()
            .map(|arg| self.code_from_type(self.typ(*arg)))
            .collect();
        self.symbol_table.overloads(Some(head)).find(|f| {
            let sym = &self.symbol_table[*f];
            sym.function_info().is_some_and(|info| {
                let ret = self.code_from_type(sym.typ());
                let codes = info.argcodes().trim_end_matches('.');
                codes.strip_prefix(ret.as_str()) == Some(argcodes.as_str())
            })
        })
    }

    fn accepts(&self, func: &Symbol, args: &[NodeId]) -> bool {
        let Some(decl) = func.node() else {
            return false;
        };
        let keyword_args = func
            .function_info()
            .is_some_and(|info| info.argcodes().ends_with('.'));
        let formals = self.ast.list_to_vec(self.ast[decl].child(1));
        let arity_ok = formals.len() == args.len() || (keyword_args && args.len() >= formals.len());
        arity_ok
            && formals
                .iter()
                .zip(args)
                .all(|(formal, arg)| assignable(self.typ(*formal), self.typ(*arg)))
    }

    /// Return `true` if `var` may be assigned to. Writing to an input parameter
    /// is reported as a warning, writing to any other readonly symbol as an
    /// error, unless `quiet`. Targets without a known symbol are accepted.
    pub fn check_symbol_writeability(&mut self, var: NodeId, quiet: bool) -> bool {
        let Some(dest) = self.writeability_target(var) else {
            return true;
        };
        if !dest.readonly() {
            return true;
        }
        if !quiet {
            let name = dest.name().to_string();
            if dest.kind() == SymbolKind::Param {
                self.node_warning(var, ReadonlyWrite(name));
            } else {
                self.node_error(var, ReadonlyWrite(name));
            }
        }
        false
    }

    /// The symbol an assignment to `var` would write, looking through indexing
    /// and member selection.
    pub fn writeability_target(&self, var: NodeId) -> Option<&Symbol> {
        let node = &self.ast[var];
        match node.kind() {
            NodeKind::Index | NodeKind::StructSelect(_) => self.writeability_target(node.child(0)?),
            NodeKind::VariableRef(varref) => varref.sym().map(|sym| &self.symbol_table[sym]),
            NodeKind::VariableDeclaration(decl) => match decl.sym()? {
                DeclSymbol::Table(sym) => Some(&self.symbol_table[*sym]),
                DeclSymbol::Owned(sym) => Some(sym.as_ref()),
            },
            _ => None,
        }
    }
}

fn binary_result_type(op: BinaryOp, left: &Type, right: &Type) -> Type {
    if op.is_comparison() || op.is_logical() {
        return Type::Int;
    }
    match (left, right) {
        (Type::Closure, t) | (t, Type::Closure)
            if op == BinaryOp::Mul && (t.is_numeric() || t.is_color()) =>
        {
            Type::Closure
        }
        (Type::Closure, Type::Closure) if op == BinaryOp::Add => Type::Closure,
        _ => promote_types(left, right),
    }
}

#[test]
fn test_binary_result_type() {
    assert_eq!(binary_result_type(BinaryOp::Less, &Type::Float, &Type::Float), Type::Int);
    assert_eq!(binary_result_type(BinaryOp::Add, &Type::Int, &Type::Float), Type::Float);
    assert_eq!(binary_result_type(BinaryOp::Mul, &Type::Color, &Type::Closure), Type::Closure);
    assert_eq!(binary_result_type(BinaryOp::Sub, &Type::String, &Type::Int), Type::Unknown);
}
