// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// Shader, function and variable declarations. Constructing a declaration binds
// its symbols, so these are the nodes that populate the symbol table.

use crate::ast::{DeclSymbol, FunctionDecl, NodeId, NodeKind, ShaderDecl, VariableDecl};
use crate::context::Context;
use crate::operators::ShaderKind;
use crate::semantic_error::SemanticErrorKind::*;
use crate::symbols::{Symbol, SymbolId, SymbolKind};
use crate::types::{ArrayLen, IsInitList, IsMetadata, IsOutput, IsParam, StructId, Type};

impl Context {
    #[allow(clippy::too_many_arguments)]
    pub fn variable_declaration<T: ToString>(
        &mut self,
        typ: Type,
        name: T,
        init: Option<NodeId>,
        is_param: IsParam,
        is_metadata: IsMetadata,
        is_output: IsOutput,
        is_init_list: IsInitList,
        sourceline_start: Option<u32>,
    ) -> NodeId {
        let name = name.to_string();
        let is_param: bool = is_param.into();
        let is_metadata: bool = is_metadata.into();
        let is_output: bool = is_output.into();
        let is_init_list: bool = is_init_list.into();
        let id = self.new_node(
            NodeKind::VariableDeclaration(VariableDecl {
                name: name.clone(),
                sym: None,
                is_param,
                is_output,
                is_metadata,
                is_init_list,
            }),
            &[init, None],
        );
        if let Some(line) = sourceline_start {
            self.ast[id].loc.set_line(line);
        }
        if is_init_list {
            if let Some(init) = init {
                if matches!(self.ast[init].kind(), NodeKind::CompoundInitializer { .. }) {
                    self.typecheck_initializer(init, &typ);
                }
            }
        }
        self.set_type(id, typ.clone());

        if !is_metadata {
            if let Some(clash) = self.symbol_table.clash(&name) {
                let mut msg = format!("\"{name}\" already declared in this scope");
                if let Some(prev) = self.symbol_table[clash].node() {
                    let loc = &self.ast[prev].loc;
                    msg += &format!(
                        "\n\t\tprevious declaration was at {}:{}",
                        loc.file_name(),
                        loc.line()
                    );
                }
                let other = &self.symbol_table[clash];
                if other.scope().is_global() && other.is_function() && is_param {
                    // A parameter may reuse the name of a global function.
                    self.node_warning(id, Redeclaration(msg));
                } else {
                    self.node_error(id, Redeclaration(msg));
                }
            }
        }
        if name.starts_with("___") {
            self.node_error(id, ReservedName(name.clone()));
        }

        let kind = if is_metadata {
            SymbolKind::Metadata
        } else if is_param {
            if is_output {
                SymbolKind::OutputParam
            } else {
                SymbolKind::Param
            }
        } else if self.options().debug_temps && name.starts_with("__debug_tmp__") {
            SymbolKind::Temp
        } else {
            SymbolKind::Local
        };
        let sym = Symbol::new(&name, typ.clone(), kind, Some(id));
        let decl_sym = if is_metadata {
            DeclSymbol::Owned(Box::new(sym))
        } else {
            let sym_id = self.symbol_table.insert(sym);
            tracing::debug!("declared {} as {:?}", name, kind);
            if let Some(struct_id) = typ.structure() {
                self.add_struct_fields(struct_id, &name, kind, typ.array_length(), id);
            }
            DeclSymbol::Table(sym_id)
        };
        if let NodeKind::VariableDeclaration(decl) = self.ast[id].kind_mut() {
            decl.sym = Some(decl_sym);
        }
        id
    }

    // Bind one symbol per field of a struct variable, named "<base>.<field>",
    // recursing into fields that are themselves structs. Fields of an array of
    // structs become arrays of the outer length.
    fn add_struct_fields(
        &mut self,
        struct_id: StructId,
        basename: &str,
        kind: SymbolKind,
        arraylen: i32,
        node: NodeId,
    ) {
        let spec = self.structs.get(struct_id).clone();
        for (i, field) in spec.fields().iter().enumerate() {
            let fieldname = format!("{basename}.{}", field.name());
            let mut typ = field.typ().clone();
            if arraylen != 0 && typ.is_array() {
                self.node_error(node, NestedStructArray(spec.name().to_string()));
            } else if arraylen > 0 {
                typ = Type::array(typ, ArrayLen::Sized(arraylen as usize));
            } else if arraylen < 0 {
                typ = Type::array(typ, ArrayLen::Unsized);
            }
            let mut sym = Symbol::new(&fieldname, typ.clone(), kind, Some(node));
            sym.set_field_id(i);
            self.symbol_table.insert(sym);
            if let Some(inner) = field.typ().structure() {
                self.add_struct_fields(inner, &fieldname, kind, typ.array_length(), node);
            }
        }
    }

    /// A function declaration or definition. `stmts` is `None` for a prototype.
    pub fn function_declaration<T: ToString>(
        &mut self,
        typ: Type,
        name: T,
        formals: Option<NodeId>,
        stmts: Option<NodeId>,
        meta: Option<NodeId>,
        sourceline_start: Option<u32>,
    ) -> NodeId {
        let name = name.to_string();
        let id = self.new_node(
            NodeKind::FunctionDeclaration(FunctionDecl {
                name: name.clone(),
                sym: None,
                is_builtin: false,
            }),
            &[meta, formals, stmts],
        );
        if let Some(line) = sourceline_start {
            self.ast[id].loc.set_line(line);
        }
        if name.starts_with("___") {
            self.node_error(id, ReservedName(name.clone()));
        }

        let mut existing = self.symbol_table.clash(&name);
        if let Some(other) = existing {
            let other = &self.symbol_table[other];
            if !other.is_function() {
                let msg = format!(
                    "\"{name}\" already declared in this scope as a {}",
                    self.type_name(other.typ())
                );
                self.node_error(id, Redeclaration(msg));
                existing = None;
            }
        }
        self.set_type(id, typ.clone());

        let mut argcodes = self.code_from_type(&typ);
        for formal in self.ast.list_to_vec(formals) {
            let formal_type = self.typ(formal).clone();
            if formal_type.is_unknown() {
                // Already reported where the formal was declared.
                self.set_type(id, Type::Unknown);
                return id;
            }
            argcodes += &self.code_from_type(&formal_type);
            if let NodeKind::VariableDeclaration(decl) = self.ast[formal].kind() {
                if self.ast[formal].child(0).is_some() {
                    let formal_name = decl.name.clone();
                    self.node_error(formal, ParamDefaultInitializer(formal_name));
                }
            }
        }

        if stmts.is_some() {
            self.check_redefinition(id, &typ, &name, formals, existing, &argcodes);
        }

        let mut sym = Symbol::function(&name, typ, Some(id));
        if let Some(info) = sym.function_info_mut() {
            info.set_next_poly(existing);
            info.set_argcodes(&argcodes);
        }
        let sym_id = self.symbol_table.insert(sym);
        tracing::debug!("declared function {} ({})", name, argcodes);
        if let NodeKind::FunctionDeclaration(decl) = self.ast[id].kind_mut() {
            decl.sym = Some(sym_id);
        }

        self.add_meta(id, meta);
        self.typecheck_function(id);
        id
    }

    // Report one warning listing every earlier definition in the current scope
    // with the same signature.
    fn check_redefinition(
        &mut self,
        id: NodeId,
        typ: &Type,
        name: &str,
        formals: Option<NodeId>,
        existing: Option<SymbolId>,
        argcodes: &str,
    ) {
        let current = self.symbol_table.scope_id();
        let mut err = String::new();
        for other in self.symbol_table.overloads(existing) {
            let sym = &self.symbol_table[other];
            let same_sig = sym
                .function_info()
                .is_some_and(|info| info.argcodes() == argcodes);
            if sym.scope() != current || !same_sig {
                continue;
            }
            let defined = match sym.node() {
                None => true,
                Some(decl) => match self.ast[decl].kind() {
                    NodeKind::FunctionDeclaration(func) => {
                        func.is_builtin || self.ast[decl].child(2).is_some()
                    }
                    _ => true,
                },
            };
            if !defined {
                continue;
            }
            if err.is_empty() {
                err = format!(
                    "Function '{} {} ({})' redefined in the same scope\n  Previous definitions:",
                    self.type_name(typ),
                    name,
                    self.list_to_types_string(formals)
                );
            }
            err += "\n    ";
            match sym.node() {
                Some(decl) => {
                    let loc = &self.ast[decl].loc;
                    err += &format!("{}:{}", loc.file_name(), loc.line());
                }
                None => err += "built-in",
            }
        }
        if !err.is_empty() {
            self.node_warning(id, Redefinition(err));
        }
    }

    // Apply the function metadata that changes how calls are compiled.
    fn add_meta(&mut self, id: NodeId, meta: Option<NodeId>) {
        let NodeKind::FunctionDeclaration(FunctionDecl { sym: Some(sym), .. }) = self.ast[id].kind()
        else {
            return;
        };
        let sym = *sym;
        for m in self.ast.list_to_vec(meta) {
            let NodeKind::VariableDeclaration(decl) = self.ast[m].kind() else {
                continue;
            };
            let meta_name = decl.name.clone();
            match meta_name.as_str() {
                "builtin" => {
                    let closure = self.symbol_table[sym].typ().is_closure();
                    let writes_output = self
                        .ast
                        .siblings(self.ast[id].child(1))
                        .any(|f| match self.ast[f].kind() {
                            NodeKind::VariableDeclaration(formal) => formal.is_output,
                            _ => false,
                        });
                    if let NodeKind::FunctionDeclaration(func) = self.ast[id].kind_mut() {
                        func.is_builtin = true;
                    }
                    if let Some(info) = self.symbol_table[sym].function_info_mut() {
                        if closure {
                            // Closures take keyword arguments after the formals.
                            let argcodes = format!("{}.", info.argcodes());
                            info.set_argcodes(argcodes);
                        }
                        if writes_output {
                            info.set_readwrite_special_case(true);
                        }
                    }
                }
                "derivs" => {
                    if let Some(info) = self.symbol_table[sym].function_info_mut() {
                        info.set_takes_derivs(true);
                    }
                }
                "printf_args" => {
                    if let Some(info) = self.symbol_table[sym].function_info_mut() {
                        info.set_printf_args(true);
                    }
                }
                "texture_args" => {
                    if let Some(info) = self.symbol_table[sym].function_info_mut() {
                        info.set_texture_args(true);
                    }
                }
                "rw" => {
                    if let Some(info) = self.symbol_table[sym].function_info_mut() {
                        info.set_readwrite_special_case(true);
                    }
                }
                _ => {}
            }
        }
    }

    /// A shader entry point. Every parameter needs a default, and output
    /// parameters may not be unsized arrays.
    pub fn shader_declaration<T: ToString>(
        &mut self,
        kind: ShaderKind,
        name: T,
        formals: Option<NodeId>,
        stmts: Option<NodeId>,
        meta: Option<NodeId>,
    ) -> NodeId {
        let id = self.new_node(
            NodeKind::ShaderDeclaration(ShaderDecl {
                kind,
                name: name.to_string(),
            }),
            &[meta, formals, stmts],
        );
        for formal in self.ast.list_to_vec(formals) {
            let NodeKind::VariableDeclaration(decl) = self.ast[formal].kind() else {
                continue;
            };
            let formal_name = decl.name.clone();
            let is_output = decl.is_output;
            if self.ast[formal].child(0).is_none() {
                self.node_error(formal, MissingDefault(formal_name.clone()));
            }
            if is_output && self.typ(formal).is_unsized_array() {
                self.node_error(formal, InvalidOutputType(formal_name));
            }
        }
        id
    }
}
