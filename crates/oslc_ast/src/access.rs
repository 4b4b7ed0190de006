// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// Array/component indexing and struct member selection.

use crate::ast::{NodeId, NodeKind, StructSelect};
use crate::context::Context;
use crate::semantic_error::SemanticErrorKind::*;
use crate::types::Type;

impl Context {
    /// `expr[index]`, `expr[index][index2]` or `expr[index][index2][index3]`.
    ///
    /// A single index applied to an index node that itself has one index is
    /// folded into one two-index node: `a[i]` followed by `[j]` becomes `a[i][j]`.
    pub fn index(
        &mut self,
        expr: NodeId,
        index: NodeId,
        index2: Option<NodeId>,
        index3: Option<NodeId>,
    ) -> NodeId {
        debug_assert!(index2.is_some() || index3.is_none());
        let nested = if index2.is_none()
            && matches!(self.ast[expr].kind(), NodeKind::Index)
            && self.ast[expr].nchildren() == 2
        {
            self.ast[expr].child(0).zip(self.ast[expr].child(1))
        } else {
            None
        };
        let (expr, index, index2) = match nested {
            Some((inner_expr, inner_index)) => {
                self.ast.take_children(expr);
                self.ast.free(expr);
                tracing::trace!("collapsed nested index into one node");
                (inner_expr, inner_index, Some(index))
            }
            None => (expr, index, index2),
        };
        let mut children = vec![Some(expr), Some(index)];
        children.extend(index2.map(Some));
        children.extend(index3.map(Some));
        let id = self.new_node(NodeKind::Index, &children);

        let et = self.typ(expr).clone();
        let typ = match (index2, index3) {
            (None, _) => {
                if et.is_array() {
                    et.element_type()
                } else if !et.is_closure() && et.is_triple() {
                    Type::Float
                } else {
                    Type::Unknown
                }
            }
            (Some(_), None) => {
                if et.is_matrix() || (et.is_array() && et.element_type().is_triple()) {
                    Type::Float
                } else {
                    Type::Unknown
                }
            }
            (Some(_), Some(_)) => {
                if et.is_array() && et.element_type().is_matrix() {
                    Type::Float
                } else {
                    Type::Unknown
                }
            }
        };
        if typ.is_unknown() && !et.is_unknown() {
            self.node_error(id, InvalidIndexTarget);
        }
        self.set_type(id, typ);
        id
    }

    /// `expr.field`, for a struct member or a color/point/vector/normal component.
    pub fn struct_select<T: ToString>(&mut self, expr: NodeId, field: T) -> NodeId {
        let field = field.to_string();
        let id = self.new_node(
            NodeKind::StructSelect(StructSelect {
                field: field.clone(),
                field_name: field.clone(),
                struct_id: None,
                field_id: None,
                field_sym: None,
                comp_index: None,
            }),
            &[Some(expr)],
        );
        let lvtype = self.typ(expr).clone();

        let component = if lvtype.is_color() {
            ["r", "g", "b"].iter().position(|c| *c == field)
        } else if lvtype.is_vectriple() {
            ["x", "y", "z"].iter().position(|c| *c == field)
        } else {
            None
        };
        if let Some(comp) = component {
            let copy = self.ast.deep_copy(expr);
            let offset = self.literal_int(comp as i32);
            let comp_index = self.index(copy, offset, None, None);
            if let NodeKind::StructSelect(select) = self.ast[id].kind_mut() {
                select.comp_index = Some(comp_index);
                select.field_id = Some(comp);
            }
            self.ast[id].is_lvalue = true;
            self.set_type(id, Type::Float);
            return id;
        }

        if lvtype.is_unknown() {
            return id;
        }
        let Some(struct_id) = lvtype.structure() else {
            let typ = self.type_name(&lvtype);
            self.node_error(id, NotAStruct { typ, field });
            return id;
        };
        let spec = self.structs.get(struct_id);
        let Some(field_id) = spec.field_index(&field) else {
            let structname = spec.name().to_string();
            self.node_error(id, UnknownField { structname, field });
            return id;
        };
        let field_typ = spec.fields()[field_id].typ().clone();

        // Selecting from a value with no symbol behind it, such as a constructor
        // call, has no flattened field symbol; it takes the declared field type.
        let fieldsym = self
            .find_structsym(expr)
            .and_then(|(structsym, _)| self.symbol_table.find(&format!("{structsym}.{field}")));
        let (field_name, typ) = match fieldsym {
            Some(sym) => {
                let sym = &self.symbol_table[sym];
                (sym.name().to_string(), sym.typ().clone())
            }
            None => (field, field_typ),
        };
        if let NodeKind::StructSelect(select) = self.ast[id].kind_mut() {
            select.struct_id = Some(struct_id);
            select.field_id = Some(field_id);
            select.field_sym = fieldsym;
            select.field_name = field_name;
        }
        self.set_type(id, typ);
        id
    }

    // Name and type of the (possibly flattened) symbol holding the struct that
    // `node` evaluates to: `s` for `s`, `s.inner` for `s.inner`, `arr` for `arr[i]`.
    fn find_structsym(&self, node: NodeId) -> Option<(String, Type)> {
        match self.ast[node].kind() {
            NodeKind::VariableRef(var) => {
                var.sym?;
                Some((var.name.clone(), self.typ(node).clone()))
            }
            NodeKind::StructSelect(select) => {
                let sym = &self.symbol_table[select.field_sym?];
                Some((sym.name().to_string(), sym.typ().clone()))
            }
            NodeKind::Index => {
                let (name, typ) = self.find_structsym(self.ast[node].child(0)?)?;
                Some((name, typ.element_type()))
            }
            _ => None,
        }
    }
}
