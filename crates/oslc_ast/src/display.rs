// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// Textual dump of a tree, for debugging the front end and for snapshot tests.

use crate::ast::{DeclSymbol, LiteralValue, NodeId, NodeKind};
use crate::context::Context;
use std::fmt::{self, Write};

const INDENT: &str = "    ";

impl Context {
    /// Dump the chain starting at `root`, each node followed by its children.
    pub fn print_tree(&self, root: NodeId) -> String {
        self.display_tree(root).to_string()
    }

    pub fn display_tree(&self, root: NodeId) -> TreeDisplay<'_> {
        TreeDisplay { context: self, root }
    }

    /// Write the dump of the chain starting at `root` to `out`.
    pub fn write_tree<W: Write>(&self, out: &mut W, root: NodeId) -> fmt::Result {
        self.write_list(out, Some(root), 0)
    }

    fn write_list<W: Write>(&self, out: &mut W, head: Option<NodeId>, level: usize) -> fmt::Result {
        for id in self.ast.siblings(head) {
            self.write_node(out, id, level)?;
        }
        Ok(())
    }

    fn write_node<W: Write>(&self, out: &mut W, id: NodeId, level: usize) -> fmt::Result {
        let node = &self.ast[id];
        let typename = node.nodetypename();
        match node.kind() {
            NodeKind::ShaderDeclaration(decl) => {
                indent(out, level)?;
                writeln!(out, "({} {} \"{}\"", typename, decl.kind().name(), decl.name())?;
                self.write_children(out, id, level)?;
                indent(out, level)?;
                out.write_str(")\n")
            }
            NodeKind::FunctionDeclaration(decl) => {
                indent(out, level)?;
                match decl.sym() {
                    Some(sym) => {
                        let sym = &self.symbol_table[sym];
                        write!(out, "{} {}", typename, sym.mangled())?;
                        if !sym.scope().is_global() {
                            write!(out, " ({} in scope {})", sym.name(), sym.scope())?;
                        }
                    }
                    None => write!(out, "{} {}", typename, decl.name())?,
                }
                out.write_char('\n')?;
                self.write_children(out, id, level)
            }
            NodeKind::VariableDeclaration(decl) => {
                let name = match decl.sym() {
                    Some(DeclSymbol::Table(sym)) => self.symbol_table[*sym].mangled(),
                    Some(DeclSymbol::Owned(sym)) => sym.name().to_string(),
                    None => decl.name().to_string(),
                };
                indent(out, level)?;
                writeln!(out, "({} {}", typename, name)?;
                self.write_children(out, id, level)?;
                indent(out, level)?;
                out.write_str(")\n")
            }
            NodeKind::VariableRef(var) => {
                let name = match var.sym() {
                    Some(sym) => self.symbol_table[sym].mangled(),
                    None => var.name().to_string(),
                };
                indent(out, level)?;
                writeln!(out, "({} (type: {}) {})", typename, self.type_name(node.typ()), name)
            }
            NodeKind::Literal(val) => {
                indent(out, level)?;
                write!(out, "({} (type: {}) ", typename, self.type_name(node.typ()))?;
                match val {
                    LiteralValue::Int(v) => write!(out, "{v}")?,
                    LiteralValue::Float(v) => write!(out, "{v}")?,
                    LiteralValue::String(v) => write!(out, "\"{v}\"")?,
                }
                out.write_str(")\n")
            }
            NodeKind::StructSelect(select) => {
                self.write_generic(out, id, level)?;
                indent(out, level + 1)?;
                writeln!(out, "select {}", select.field())
            }
            _ => self.write_generic(out, id, level),
        }
    }

    fn write_generic<W: Write>(&self, out: &mut W, id: NodeId, level: usize) -> fmt::Result {
        let node = &self.ast[id];
        indent(out, level)?;
        writeln!(
            out,
            "({} :     (type: {}) {}",
            node.nodetypename(),
            self.type_name(node.typ()),
            node.opname().unwrap_or("")
        )?;
        self.write_children(out, id, level)?;
        indent(out, level)?;
        out.write_str(")\n")
    }

    fn write_children<W: Write>(&self, out: &mut W, id: NodeId, level: usize) -> fmt::Result {
        let node = &self.ast[id];
        for (i, child) in node.children().iter().enumerate() {
            let Some(child) = *child else {
                continue;
            };
            indent(out, level)?;
            let name = node.child_name(i).unwrap_or_else(|| format!("child{i}").into());
            write!(out, "  {name}: ")?;
            if !node.typ().is_unknown() && self.ast[child].next().is_none() {
                write!(out, " (type: {})", self.type_name(node.typ()))?;
            }
            out.write_char('\n')?;
            self.write_list(out, Some(child), level + 1)?;
        }
        Ok(())
    }
}

pub struct TreeDisplay<'a> {
    context: &'a Context,
    root: NodeId,
}

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.context.write_tree(f, self.root)
    }
}

fn indent<W: Write>(out: &mut W, level: usize) -> fmt::Result {
    for _ in 0..level {
        out.write_str(INDENT)?;
    }
    Ok(())
}
