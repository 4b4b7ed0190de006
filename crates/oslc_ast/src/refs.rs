// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// Literal and variable reference nodes.

use crate::ast::{LiteralValue, NodeId, NodeKind, VariableRef};
use crate::context::Context;
use crate::semantic_error::SemanticErrorKind::*;
use crate::symbols::SymbolKind;

impl Context {
    pub fn literal(&mut self, val: LiteralValue) -> NodeId {
        let typ = val.typ();
        let id = self.new_node(NodeKind::Literal(val), &[]);
        self.set_type(id, typ);
        id
    }

    pub fn literal_int(&mut self, val: i32) -> NodeId {
        self.literal(LiteralValue::Int(val))
    }

    pub fn literal_float(&mut self, val: f32) -> NodeId {
        self.literal(LiteralValue::Float(val))
    }

    pub fn literal_string<T: ToString>(&mut self, val: T) -> NodeId {
        self.literal(LiteralValue::String(val.to_string()))
    }

    /// A use of `name` as a value. Functions and type names are rejected.
    pub fn variable_ref<T: ToString>(&mut self, name: T) -> NodeId {
        let name = name.to_string();
        let id = self.new_node(
            NodeKind::VariableRef(VariableRef {
                name: name.clone(),
                sym: None,
            }),
            &[],
        );
        let Some(sym) = self.symbol_table.find(&name) else {
            self.node_error(id, UnresolvedSymbol(name));
            return id;
        };
        let what = match self.symbol_table[sym].kind() {
            SymbolKind::Function => "function",
            SymbolKind::Type => "type name",
            _ => {
                let typ = self.symbol_table[sym].typ().clone();
                if let NodeKind::VariableRef(var) = self.ast[id].kind_mut() {
                    var.sym = Some(sym);
                }
                self.set_type(id, typ);
                return id;
            }
        };
        self.node_error(id, NotAVariable { name, what });
        id
    }
}
