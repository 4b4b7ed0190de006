// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

use crate::ast::{NodeId, NodeKind};
use crate::context::Context;
use crate::operators::{LoopKind, LoopModKind};

impl Context {
    pub fn conditional_statement(
        &mut self,
        cond: NodeId,
        truestmt: Option<NodeId>,
        falsestmt: Option<NodeId>,
    ) -> NodeId {
        self.new_node(
            NodeKind::ConditionalStatement,
            &[Some(cond), truestmt, falsestmt],
        )
    }

    /// A `while`, `do`/`while` or `for` loop. A missing condition loops forever.
    pub fn loop_statement(
        &mut self,
        kind: LoopKind,
        init: Option<NodeId>,
        cond: Option<NodeId>,
        iter: Option<NodeId>,
        stmt: Option<NodeId>,
    ) -> NodeId {
        let cond = match cond {
            Some(cond) => cond,
            None => self.literal_int(1),
        };
        self.new_node(
            NodeKind::LoopStatement(kind),
            &[init, Some(cond), iter, stmt],
        )
    }

    pub fn loopmod_statement(&mut self, kind: LoopModKind) -> NodeId {
        self.new_node(NodeKind::LoopModStatement(kind), &[])
    }

    pub fn return_statement(&mut self, expr: Option<NodeId>) -> NodeId {
        self.new_node(NodeKind::ReturnStatement, &[expr])
    }
}
