// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

use oslc_ast::ast::{LiteralValue, NodeKind, NodeType};
use oslc_ast::operators::{AssignOp, BinaryOp, LoopKind, LoopModKind, UnaryOp};
use oslc_ast::types::{ArrayLen, IsInitList, IsMetadata, IsOutput, IsParam, Type};
use oslc_ast::validate;
use oslc_ast::{CompilerOptions, Context, NodeId, SemanticErrorKind};

fn new_context() -> Context {
    Context::with_options("test.osl", CompilerOptions::new().with_count_nodes(true))
}

fn declare_local(ctx: &mut Context, typ: Type, name: &str) -> NodeId {
    ctx.variable_declaration(
        typ,
        name,
        None,
        IsParam::False,
        IsMetadata::False,
        IsOutput::False,
        IsInitList::False,
        None,
    )
}

//
// Node registry
//

#[test]
fn test_list_round_trip() {
    let mut ctx = new_context();
    let ids: Vec<NodeId> = (0..5).map(|i| ctx.literal_int(i)).collect();
    let head = ctx.ast_mut().vec_to_list(&ids);
    assert_eq!(head, Some(ids[0]));
    assert_eq!(ctx.ast().list_to_vec(head), ids);
    assert_eq!(ctx.ast().list_len(head), 5);
}

#[test]
fn test_reverse_twice_is_identity() {
    let mut ctx = new_context();
    let ids: Vec<NodeId> = (0..4).map(|i| ctx.literal_int(i)).collect();
    let head = ctx.ast_mut().vec_to_list(&ids);
    let reversed = ctx.ast_mut().reverse(head);
    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(ctx.ast().list_to_vec(reversed), expected);
    let restored = ctx.ast_mut().reverse(reversed);
    assert_eq!(ctx.ast().list_to_vec(restored), ids);
}

#[test]
fn test_reverse_empty_and_single() {
    let mut ctx = new_context();
    assert_eq!(ctx.ast_mut().reverse(None), None);
    let one = ctx.literal_int(1);
    assert_eq!(ctx.ast_mut().reverse(Some(one)), Some(one));
    assert_eq!(ctx.node(one).next(), None);
}

#[test]
fn test_free_long_chain() {
    let mut ctx = new_context();
    let ids: Vec<NodeId> = (0..10_000).map(|i| ctx.literal_int(i)).collect();
    let head = ctx.ast_mut().vec_to_list(&ids);
    assert_eq!(ctx.ast().len(), 10_000);
    let walked = ctx.ast().list_to_vec(head);
    assert_eq!(walked, ids);
    assert_eq!(ctx.ast_mut().vec_to_list(&walked), head);
    assert_eq!(ctx.ast().list_to_vec(head), ids);
    ctx.ast_mut().free(ids[0]);
    assert!(ctx.ast().is_empty());
    assert!(head.is_some_and(|head| !ctx.ast().is_live(head)));
    let counts = ctx.ast().counts().unwrap();
    assert_eq!(counts.live(NodeType::Literal), 0);
    assert_eq!(counts.peak(NodeType::Literal), 10_000);
}

#[test]
fn test_free_subtree() {
    let mut ctx = new_context();
    let x = declare_local(&mut ctx, Type::Float, "x");
    let before = ctx.ast().len();
    let xref = ctx.variable_ref("x");
    let one = ctx.literal_float(1.0);
    let sum = ctx.binary_expression(BinaryOp::Add, xref, one);
    ctx.ast_mut().free(sum);
    assert_eq!(ctx.ast().len(), before);
    assert!(ctx.ast().is_live(x));
}

//
// Literals and constant folding
//

#[test]
fn test_literal_types() {
    let mut ctx = new_context();
    let i = ctx.literal_int(3);
    let f = ctx.literal_float(0.5);
    let s = ctx.literal_string("hello");
    assert_eq!(ctx.node(i).typ(), &Type::Int);
    assert_eq!(ctx.node(f).typ(), &Type::Float);
    assert_eq!(ctx.node(s).typ(), &Type::String);
    assert_eq!(ctx.node(i).opcode(), 0);
}

#[test]
fn test_fold_int_add() {
    let mut ctx = new_context();
    let a = ctx.literal_int(2);
    let b = ctx.literal_int(3);
    let sum = ctx.make_binary(BinaryOp::Add, a, b);
    assert_eq!(ctx.node(sum).kind(), &NodeKind::Literal(LiteralValue::Int(5)));
    assert_eq!(ctx.ast().len(), 1);
    assert!(ctx.errors().is_empty());
}

#[test]
fn test_fold_division_by_zero() {
    let mut ctx = new_context();
    let a = ctx.literal_int(7);
    let b = ctx.literal_int(0);
    let quot = ctx.make_binary(BinaryOp::Div, a, b);
    assert_eq!(ctx.node(quot).kind(), &NodeKind::Literal(LiteralValue::Int(0)));

    let a = ctx.literal_float(7.0);
    let b = ctx.literal_float(0.0);
    let quot = ctx.make_binary(BinaryOp::Div, a, b);
    assert_eq!(ctx.node(quot).kind(), &NodeKind::Literal(LiteralValue::Float(0.0)));
}

#[test]
fn test_fold_float_comparison_is_int() {
    let mut ctx = new_context();
    let a = ctx.literal_float(1.5);
    let b = ctx.literal_float(0.5);
    let cmp = ctx.make_binary(BinaryOp::Greater, a, b);
    assert_eq!(ctx.node(cmp).kind(), &NodeKind::Literal(LiteralValue::Int(1)));
    assert_eq!(ctx.node(cmp).typ(), &Type::Int);
}

#[test]
fn test_mixed_literals_not_folded() {
    let mut ctx = new_context();
    let a = ctx.literal_int(1);
    let b = ctx.literal_float(2.0);
    let sum = ctx.make_binary(BinaryOp::Add, a, b);
    assert_eq!(ctx.node(sum).node_type(), NodeType::BinaryExpression);
    assert_eq!(ctx.node(sum).typ(), &Type::Float);
    assert_eq!(ctx.node(sum).opcode(), BinaryOp::Add as i32);
    assert_eq!(ctx.ast().len(), 3);
}

#[test]
fn test_logical_ops_not_folded() {
    let mut ctx = new_context();
    let a = ctx.literal_int(1);
    let b = ctx.literal_int(0);
    let and = ctx.make_binary(BinaryOp::And, a, b);
    assert_eq!(ctx.node(and).node_type(), NodeType::BinaryExpression);
    assert_eq!(ctx.node(and).typ(), &Type::Int);
}

//
// Index
//

#[test]
fn test_index_matrix_two_indices() {
    let mut ctx = new_context();
    declare_local(&mut ctx, Type::Matrix, "m");
    let m = ctx.variable_ref("m");
    let i = ctx.literal_int(0);
    let j = ctx.literal_int(1);
    let idx = ctx.index(m, i, Some(j), None);
    assert_eq!(ctx.node(idx).typ(), &Type::Float);
    assert_eq!(ctx.node(idx).nchildren(), 3);
    assert!(ctx.errors().is_empty());
}

#[test]
fn test_index_matrix_array_three_indices() {
    let mut ctx = new_context();
    declare_local(&mut ctx, Type::array(Type::Matrix, ArrayLen::Sized(2)), "ms");
    let ms = ctx.variable_ref("ms");
    let i = ctx.literal_int(1);
    let j = ctx.literal_int(2);
    let k = ctx.literal_int(3);
    let idx = ctx.index(ms, i, Some(j), Some(k));
    assert_eq!(ctx.node(idx).typ(), &Type::Float);
    assert!(ctx.errors().is_empty());
}

#[test]
fn test_index_array_and_triple() {
    let mut ctx = new_context();
    declare_local(&mut ctx, Type::array(Type::Int, ArrayLen::Unsized), "arr");
    declare_local(&mut ctx, Type::Point, "p");
    let arr = ctx.variable_ref("arr");
    let i = ctx.literal_int(0);
    let elem = ctx.index(arr, i, None, None);
    assert_eq!(ctx.node(elem).typ(), &Type::Int);

    let p = ctx.variable_ref("p");
    let i = ctx.literal_int(2);
    let comp = ctx.index(p, i, None, None);
    assert_eq!(ctx.node(comp).typ(), &Type::Float);
    assert!(ctx.errors().is_empty());
}

#[test]
fn test_index_scalar_is_error() {
    let mut ctx = new_context();
    declare_local(&mut ctx, Type::Float, "f");
    let f = ctx.variable_ref("f");
    let i = ctx.literal_int(0);
    let idx = ctx.index(f, i, None, None);
    assert!(ctx.node(idx).typ().is_unknown());
    assert_eq!(ctx.errors().len(), 1);
    assert_eq!(ctx.errors()[0].kind(), &SemanticErrorKind::InvalidIndexTarget);
}

#[test]
fn test_index_of_unresolved_is_quiet() {
    let mut ctx = new_context();
    let nope = ctx.variable_ref("nope");
    let i = ctx.literal_int(0);
    let idx = ctx.index(nope, i, None, None);
    assert!(ctx.node(idx).typ().is_unknown());
    assert_eq!(ctx.errors().len(), 1);
    assert_eq!(
        ctx.errors()[0].kind(),
        &SemanticErrorKind::UnresolvedSymbol("nope".to_string())
    );
}

//
// StructSelect
//

#[test]
fn test_color_component_select() {
    let mut ctx = new_context();
    declare_local(&mut ctx, Type::Color, "c");
    let c = ctx.variable_ref("c");
    let sel = ctx.struct_select(c, "g");
    let node = ctx.node(sel);
    assert!(node.is_lvalue());
    assert_eq!(node.typ(), &Type::Float);
    let NodeKind::StructSelect(select) = node.kind() else {
        panic!("expected a struct select");
    };
    assert_eq!(select.field_id(), Some(1));
    let comp = select.comp_index().unwrap();
    assert_eq!(ctx.node(comp).node_type(), NodeType::Index);
    let offset = ctx.node(comp).child(1).unwrap();
    assert_eq!(ctx.node(offset).kind(), &NodeKind::Literal(LiteralValue::Int(1)));
    // The component index is built over a copy of the selected expression.
    assert_ne!(ctx.node(comp).child(0), Some(c));
    assert!(ctx.errors().is_empty());
}

#[test]
fn test_component_of_array_element_collapses() {
    let mut ctx = new_context();
    declare_local(&mut ctx, Type::array(Type::Color, ArrayLen::Sized(4)), "cs");
    let cs = ctx.variable_ref("cs");
    let i = ctx.literal_int(2);
    let elem = ctx.index(cs, i, None, None);
    assert_eq!(ctx.node(elem).typ(), &Type::Color);
    let sel = ctx.struct_select(elem, "b");
    let NodeKind::StructSelect(select) = ctx.node(sel).kind() else {
        panic!("expected a struct select");
    };
    let comp = select.comp_index().unwrap();
    // cs[2].b is indexed as cs[2][2]
    assert_eq!(ctx.node(comp).nchildren(), 3);
    assert_eq!(ctx.node(comp).typ(), &Type::Float);
    let base = ctx.node(comp).child(0).unwrap();
    assert_eq!(ctx.node(base).node_type(), NodeType::VariableRef);
    assert!(ctx.errors().is_empty());
}

#[test]
fn test_vector_component_outside_xyz_is_error() {
    let mut ctx = new_context();
    declare_local(&mut ctx, Type::Vector, "v");
    let v = ctx.variable_ref("v");
    let sel = ctx.struct_select(v, "r");
    assert!(ctx.node(sel).typ().is_unknown());
    assert_eq!(
        ctx.errors()[0].kind(),
        &SemanticErrorKind::NotAStruct {
            typ: "vector".to_string(),
            field: "r".to_string()
        }
    );
}

//
// Expressions
//

#[test]
fn test_compound_assignment_desugars() {
    let mut ctx = new_context();
    declare_local(&mut ctx, Type::Int, "x");
    let x = ctx.variable_ref("x");
    let two = ctx.literal_int(2);
    let assign = ctx.assign_expression(x, AssignOp::Add, two);
    let node = ctx.node(assign);
    assert_eq!(node.kind(), &NodeKind::AssignExpression(AssignOp::Assign));
    assert_eq!(node.opname(), Some("="));
    assert_eq!(node.child(0), Some(x));
    let rhs = node.child(1).unwrap();
    let NodeKind::BinaryExpression(binary) = ctx.node(rhs).kind() else {
        panic!("expected a binary expression");
    };
    assert_eq!(binary.op(), BinaryOp::Add);
    let copy = ctx.node(rhs).child(0).unwrap();
    assert_ne!(copy, x);
    assert_eq!(ctx.node(copy).kind(), ctx.node(x).kind());
    assert_eq!(ctx.node(rhs).child(1), Some(two));
    assert!(ctx.errors().is_empty());
}

#[test]
fn test_unary_types() {
    let mut ctx = new_context();
    declare_local(&mut ctx, Type::Color, "c");
    let c = ctx.variable_ref("c");
    let neg = ctx.unary_expression(UnaryOp::Neg, c);
    assert_eq!(ctx.node(neg).typ(), &Type::Color);
    assert_eq!(ctx.node(neg).opname(), Some("-"));
    let c = ctx.variable_ref("c");
    let not = ctx.unary_expression(UnaryOp::Not, c);
    assert_eq!(ctx.node(not).typ(), &Type::Int);
}

#[test]
fn test_ternary_promotes() {
    let mut ctx = new_context();
    let cond = ctx.literal_int(1);
    let a = ctx.literal_int(2);
    let b = ctx.literal_float(3.0);
    let ternary = ctx.ternary_expression(cond, a, b);
    assert_eq!(ctx.node(ternary).typ(), &Type::Float);
}

#[test]
fn test_typecast_and_constructor() {
    let mut ctx = new_context();
    let one = ctx.literal_int(1);
    let cast = ctx.typecast_expression(Type::Float, one);
    assert_eq!(ctx.node(cast).typ(), &Type::Float);
    let args: Vec<NodeId> = (0..3).map(|i| ctx.literal_float(i as f32)).collect();
    let args = ctx.ast_mut().vec_to_list(&args);
    let ctor = ctx.type_constructor(Type::Point, args);
    assert_eq!(ctx.node(ctor).typ(), &Type::Point);
    assert_eq!(ctx.node(ctor).child_name(0).as_deref(), Some("args"));
}

//
// Statements
//

#[test]
fn test_loop_without_condition() {
    let mut ctx = new_context();
    let brk = ctx.loopmod_statement(LoopModKind::Break);
    let lp = ctx.loop_statement(LoopKind::For, None, None, None, Some(brk));
    let node = ctx.node(lp);
    assert_eq!(node.opname(), Some("for"));
    assert_eq!(node.nchildren(), 4);
    let cond = node.child(1).unwrap();
    assert_eq!(ctx.node(cond).kind(), &NodeKind::Literal(LiteralValue::Int(1)));
    assert_eq!(node.child(3), Some(brk));
    assert_eq!(ctx.node(brk).opname(), Some("break"));
}

#[test]
fn test_count_unresolved() {
    let mut ctx = new_context();
    let a = ctx.variable_ref("a");
    let b = ctx.variable_ref("b");
    let sum = ctx.binary_expression(BinaryOp::Add, a, b);
    let call = ctx.function_call("f", Some(sum), None);
    assert_eq!(validate::count_unresolved(&ctx, call), 3);
    assert_eq!(validate::count_unknown_types(&ctx, call), 4);
    assert_eq!(ctx.errors().error_count(), 3);
}

//
// Tree dump
//

#[test]
fn test_print_folded_declaration() {
    let mut ctx = new_context();
    let one = ctx.literal_int(1);
    let two = ctx.literal_int(2);
    let init = ctx.make_binary(BinaryOp::Add, one, two);
    let decl = ctx.variable_declaration(
        Type::Float,
        "x",
        Some(init),
        IsParam::False,
        IsMetadata::False,
        IsOutput::False,
        IsInitList::False,
        None,
    );
    let expected = expect_test::expect![[r#"
        (variable_declaration x
          initializer:  (type: float)
            (literal (type: int) 3)
        )
    "#]];
    expected.assert_eq(&ctx.print_tree(decl));
}

#[test]
fn test_print_compound_assignment() {
    let mut ctx = new_context();
    declare_local(&mut ctx, Type::Float, "x");
    ctx.enter_scope();
    declare_local(&mut ctx, Type::Float, "y");
    let x = ctx.variable_ref("x");
    let two = ctx.literal_float(2.0);
    let product = ctx.make_binary(BinaryOp::Mul, x, two);
    let y = ctx.variable_ref("y");
    let assign = ctx.assign_expression(y, AssignOp::Add, product);
    ctx.exit_scope();
    let expected = expect_test::expect![[r#"
        (assign_expression :     (type: float) =
          variable:  (type: float)
            (variable_ref (type: float) ___1_y)
          expression:  (type: float)
            (binary_expression :     (type: float) +
              left:  (type: float)
                (variable_ref (type: float) ___1_y)
              right:  (type: float)
                (binary_expression :     (type: float) *
                  left:  (type: float)
                    (variable_ref (type: float) x)
                  right:  (type: float)
                    (literal (type: float) 2)
                )
            )
        )
    "#]];
    expected.assert_eq(&ctx.print_tree(assign));
}

#[test]
fn test_print_struct_select_line() {
    let mut ctx = new_context();
    declare_local(&mut ctx, Type::Point, "p");
    let p = ctx.variable_ref("p");
    let sel = ctx.struct_select(p, "y");
    let dump = ctx.print_tree(sel);
    assert!(dump.starts_with("(structselect :     (type: float) \n"));
    assert!(dump.ends_with(")\n    select y\n"));
}

#[test]
fn test_write_tree_into_buffer() {
    let mut ctx = new_context();
    declare_local(&mut ctx, Type::Float, "x");
    let x = ctx.variable_ref("x");
    let two = ctx.literal_float(2.0);
    let product = ctx.binary_expression(BinaryOp::Mul, x, two);
    let mut dump = String::from("header\n");
    assert!(ctx.write_tree(&mut dump, product).is_ok());
    assert_eq!(dump, format!("header\n{}", ctx.print_tree(product)));
    assert_eq!(ctx.display_tree(product).to_string(), ctx.print_tree(product));
}
