// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// Walks over a finished tree, for checks run after construction.

use crate::ast::{Ast, Node, NodeId, NodeKind};
use crate::context::Context;

/// Apply `func` to every node reachable from `root`: children, sibling chains, and
/// the component index owned by a struct select. Order is unspecified.
pub fn walk_nodes<F>(ast: &Ast, root: NodeId, mut func: F)
where
    F: FnMut(NodeId, &Node),
{
    let mut worklist = vec![root];
    while let Some(id) = worklist.pop() {
        let node = &ast[id];
        func(id, node);
        worklist.extend(node.next());
        worklist.extend(node.children().iter().flatten());
        if let NodeKind::StructSelect(select) = node.kind() {
            worklist.extend(select.comp_index());
        }
    }
}

/// Number of variable references and function calls under `root` that did not
/// resolve to a symbol.
pub fn count_unresolved(context: &Context, root: NodeId) -> usize {
    let mut count = 0;
    walk_nodes(context.ast(), root, |_, node| {
        let unresolved = match node.kind() {
            NodeKind::VariableRef(var) => var.sym().is_none(),
            NodeKind::FunctionCall(call) => call.sym().is_none(),
            _ => false,
        };
        if unresolved {
            count += 1;
        }
    });
    count
}

/// Number of expression nodes under `root` whose type is still unknown.
pub fn count_unknown_types(context: &Context, root: NodeId) -> usize {
    let mut count = 0;
    walk_nodes(context.ast(), root, |_, node| {
        let is_expr = !matches!(
            node.kind(),
            NodeKind::ShaderDeclaration(_)
                | NodeKind::ConditionalStatement
                | NodeKind::LoopStatement(_)
                | NodeKind::LoopModStatement(_)
                | NodeKind::ReturnStatement
        );
        if is_expr && node.typ().is_unknown() {
            count += 1;
        }
    });
    count
}
