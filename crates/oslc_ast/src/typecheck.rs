// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// Checks that need a whole subtree: compound initializers against the type they
// initialize, and the return statements of a function body against its return type.

use crate::ast::{NodeId, NodeKind};
use crate::context::Context;
use crate::semantic_error::SemanticErrorKind::*;
use crate::types::{assignable, ArrayLen, Type};

impl Context {
    /// Check the compound initializer `init` against `expected` and set its type.
    /// Returns the type of the initialized value; for an unsized array this is
    /// the array sized by the number of initializers.
    pub(crate) fn typecheck_initializer(&mut self, init: NodeId, expected: &Type) -> Type {
        let elems = self.ast.list_to_vec(self.ast[init].child(0));
        let mut ctor = false;
        let typ = if expected.is_array() {
            let elem = expected.element_type();
            let len = expected.array_length();
            if len > 0 && elems.len() > len as usize {
                let msg = format!("Too many initializers for a '{}'", self.type_name(expected));
                self.node_error(init, InitializerMismatch(msg));
            }
            for e in &elems {
                self.typecheck_init_element(*e, &elem);
            }
            if expected.is_unsized_array() {
                Type::array(elem, ArrayLen::Sized(elems.len()))
            } else {
                expected.clone()
            }
        } else if let Some(struct_id) = expected.structure() {
            let fields = self.structs.get(struct_id).fields().to_vec();
            if elems.len() > fields.len() {
                let msg = format!("Too many initializers for '{}'", self.type_name(expected));
                self.node_error(init, InitializerMismatch(msg));
            }
            for (e, field) in elems.iter().zip(fields.iter()) {
                self.typecheck_init_element(*e, field.typ());
            }
            expected.clone()
        } else if expected.is_triple() || expected.is_matrix() {
            ctor = true;
            let full = if expected.is_matrix() { 16 } else { 3 };
            if elems.len() != 1 && elems.len() != full {
                let msg = format!(
                    "Cannot construct {} from {} values",
                    self.type_name(expected),
                    elems.len()
                );
                self.node_error(init, InitializerMismatch(msg));
            }
            for e in &elems {
                let t = self.typ(*e).clone();
                let single_triple = elems.len() == 1 && expected.is_triple() && t.is_triple();
                if !t.is_unknown() && !t.is_numeric() && !single_triple {
                    let msg = format!(
                        "Cannot construct {} with a '{}'",
                        self.type_name(expected),
                        self.type_name(&t)
                    );
                    self.node_error(*e, InitializerMismatch(msg));
                }
            }
            expected.clone()
        } else {
            if elems.len() == 1 {
                self.typecheck_init_element(elems[0], expected);
            } else {
                let msg = format!(
                    "Can't assign '{{{}}}' to {}",
                    self.list_to_types_string(elems.first().copied()),
                    self.type_name(expected)
                );
                self.node_error(init, InitializerMismatch(msg));
            }
            expected.clone()
        };
        if let NodeKind::CompoundInitializer { ctor: is_ctor } = self.ast[init].kind_mut() {
            *is_ctor = ctor;
        }
        self.set_type(init, typ.clone());
        typ
    }

    fn typecheck_init_element(&mut self, elem: NodeId, expected: &Type) {
        if matches!(self.ast[elem].kind(), NodeKind::CompoundInitializer { .. }) {
            self.typecheck_initializer(elem, expected);
            return;
        }
        let actual = self.typ(elem).clone();
        if !assignable(expected, &actual) {
            let msg = format!(
                "Can't assign '{}' to '{}'",
                self.type_name(&actual),
                self.type_name(expected)
            );
            self.node_error(elem, InitializerMismatch(msg));
        }
    }

    // Every `return` in the body of function `id` must agree with its return type.
    // Nested function declarations are checked on their own.
    pub(crate) fn typecheck_function(&mut self, id: NodeId) {
        let expected = self.typ(id).clone();
        if expected.is_unknown() {
            return;
        }
        let mut returns = Vec::new();
        let mut worklist: Vec<NodeId> = self.ast[id].child(2).into_iter().collect();
        while let Some(node) = worklist.pop() {
            let node = &self.ast[node];
            worklist.extend(node.next());
            match node.kind() {
                NodeKind::FunctionDeclaration(_) | NodeKind::ShaderDeclaration(_) => {}
                NodeKind::ReturnStatement => returns.push((node.loc().clone(), node.child(0))),
                _ => worklist.extend(node.children().iter().flatten()),
            }
        }

        for (loc, value) in returns {
            let msg = match value {
                Some(_) if expected.is_void() => {
                    Some("cannot return a value from a void function".to_string())
                }
                None if !expected.is_void() => Some(format!(
                    "function must return a value of type '{}'",
                    self.type_name(&expected)
                )),
                Some(value) if !assignable(&expected, self.typ(value)) => Some(format!(
                    "cannot return a '{}' from a function returning '{}'",
                    self.type_name(self.typ(value)),
                    self.type_name(&expected)
                )),
                _ => None,
            };
            if let Some(msg) = msg {
                self.error(&loc, ReturnTypeMismatch(msg));
            }
        }
    }
}
