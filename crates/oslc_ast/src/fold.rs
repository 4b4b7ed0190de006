// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// Constant folding of binary operators applied to two literals.
//
// Only int-int and float-float operands are folded. Integer arithmetic wraps.
// Division and modulo by zero fold to zero instead of trapping, and comparisons
// fold to the int 1 or 0.

use crate::ast::LiteralValue;
use crate::operators::BinaryOp;

/// The literal `left op right`, or `None` if the operands or operator do not fold.
pub fn fold_binary(op: BinaryOp, left: &LiteralValue, right: &LiteralValue) -> Option<LiteralValue> {
    match (left, right) {
        (LiteralValue::Int(a), LiteralValue::Int(b)) => fold_int(op, *a, *b).map(LiteralValue::Int),
        (LiteralValue::Float(a), LiteralValue::Float(b)) => fold_float(op, *a, *b),
        _ => None,
    }
}

fn fold_int(op: BinaryOp, a: i32, b: i32) -> Option<i32> {
    use BinaryOp::*;
    let val = match op {
        Mul => a.wrapping_mul(b),
        Div => {
            if b == 0 {
                0
            } else {
                a.wrapping_div(b)
            }
        }
        Add => a.wrapping_add(b),
        Sub => a.wrapping_sub(b),
        Mod => {
            if b == 0 {
                0
            } else {
                a.wrapping_rem(b)
            }
        }
        Equal => (a == b) as i32,
        NotEqual => (a != b) as i32,
        Greater => (a > b) as i32,
        Less => (a < b) as i32,
        GreaterEqual => (a >= b) as i32,
        LessEqual => (a <= b) as i32,
        BitAnd => a & b,
        BitOr => a | b,
        Xor => a ^ b,
        ShiftLeft => a.wrapping_shl(b as u32),
        ShiftRight => a.wrapping_shr(b as u32),
        And | Or => return None,
    };
    Some(val)
}

fn fold_float(op: BinaryOp, a: f32, b: f32) -> Option<LiteralValue> {
    use BinaryOp::*;
    let val = match op {
        Mul => LiteralValue::Float(a * b),
        Div => LiteralValue::Float(if b == 0.0 { 0.0 } else { a / b }),
        Add => LiteralValue::Float(a + b),
        Sub => LiteralValue::Float(a - b),
        Equal => LiteralValue::Int((a == b) as i32),
        NotEqual => LiteralValue::Int((a != b) as i32),
        Greater => LiteralValue::Int((a > b) as i32),
        Less => LiteralValue::Int((a < b) as i32),
        GreaterEqual => LiteralValue::Int((a >= b) as i32),
        LessEqual => LiteralValue::Int((a <= b) as i32),
        _ => return None,
    };
    Some(val)
}

#[test]
fn test_int_folding() {
    use LiteralValue::Int;
    assert_eq!(fold_binary(BinaryOp::Add, &Int(2), &Int(3)), Some(Int(5)));
    assert_eq!(fold_binary(BinaryOp::Div, &Int(7), &Int(0)), Some(Int(0)));
    assert_eq!(fold_binary(BinaryOp::Mod, &Int(7), &Int(0)), Some(Int(0)));
    assert_eq!(fold_binary(BinaryOp::Mod, &Int(7), &Int(4)), Some(Int(3)));
    assert_eq!(fold_binary(BinaryOp::Add, &Int(i32::MAX), &Int(1)), Some(Int(i32::MIN)));
    assert_eq!(fold_binary(BinaryOp::ShiftLeft, &Int(1), &Int(4)), Some(Int(16)));
    assert_eq!(fold_binary(BinaryOp::LessEqual, &Int(3), &Int(3)), Some(Int(1)));
    assert_eq!(fold_binary(BinaryOp::And, &Int(1), &Int(1)), None);
}

#[test]
fn test_float_folding() {
    use LiteralValue::{Float, Int};
    assert_eq!(fold_binary(BinaryOp::Mul, &Float(1.5), &Float(2.0)), Some(Float(3.0)));
    assert_eq!(fold_binary(BinaryOp::Div, &Float(1.0), &Float(0.0)), Some(Float(0.0)));
    assert_eq!(fold_binary(BinaryOp::Greater, &Float(1.0), &Float(0.5)), Some(Int(1)));
    assert_eq!(fold_binary(BinaryOp::Mod, &Float(1.0), &Float(0.5)), None);
    assert_eq!(fold_binary(BinaryOp::Add, &Int(1), &Float(0.5)), None);
}
