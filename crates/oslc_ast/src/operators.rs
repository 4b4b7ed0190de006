// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// Operators and other sub-variant selectors carried by AST nodes.
//
// All operator enums share one numbering so that `Node::opcode` is the same
// integer for, say, `+` whether it appears in a unary, binary, or compound
// assignment expression.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum BinaryOp {
    Mul = 4,
    Div = 5,
    Add = 6,
    Sub = 7,
    Mod = 8,
    Equal = 9,
    NotEqual = 10,
    Greater = 11,
    Less = 12,
    GreaterEqual = 13,
    LessEqual = 14,
    BitAnd = 15,
    BitOr = 16,
    Xor = 17,
    And = 19,
    Or = 20,
    ShiftLeft = 22,
    ShiftRight = 23,
}

impl BinaryOp {
    pub fn opname(&self) -> &'static str {
        use BinaryOp::*;
        match self {
            Mul => "*",
            Div => "/",
            Add => "+",
            Sub => "-",
            Mod => "%",
            Equal => "==",
            NotEqual => "!=",
            Greater => ">",
            GreaterEqual => ">=",
            Less => "<",
            LessEqual => "<=",
            BitAnd => "&",
            BitOr => "|",
            Xor => "^",
            And => "&&",
            Or => "||",
            ShiftLeft => "<<",
            ShiftRight => ">>",
        }
    }

    /// The word used to mangle the name of a user overload of this operator.
    pub fn opword(&self) -> &'static str {
        use BinaryOp::*;
        match self {
            Mul => "mul",
            Div => "div",
            Add => "add",
            Sub => "sub",
            Mod => "mod",
            Equal => "eq",
            NotEqual => "neq",
            Greater => "gt",
            GreaterEqual => "ge",
            Less => "lt",
            LessEqual => "le",
            BitAnd => "bitand",
            BitOr => "bitor",
            Xor => "xor",
            And => "and",
            Or => "or",
            ShiftLeft => "shl",
            ShiftRight => "shr",
        }
    }

    pub fn is_comparison(&self) -> bool {
        use BinaryOp::*;
        matches!(
            self,
            Equal | NotEqual | Greater | GreaterEqual | Less | LessEqual
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    /// `&&` and `||` may not be overloaded.
    pub fn is_overloadable(&self) -> bool {
        !self.is_logical()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum UnaryOp {
    Plus = 6,
    Neg = 7,
    Compl = 18,
    Not = 21,
}

impl UnaryOp {
    pub fn opname(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::Compl => "~",
        }
    }

    pub fn opword(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "add",
            UnaryOp::Neg => "neg",
            UnaryOp::Not => "not",
            UnaryOp::Compl => "compl",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum AssignOp {
    Assign = 3,
    Mul = 4,
    Div = 5,
    Add = 6,
    Sub = 7,
    BitAnd = 15,
    BitOr = 16,
    Xor = 17,
    ShiftLeft = 22,
    ShiftRight = 23,
}

impl AssignOp {
    pub fn opname(&self) -> &'static str {
        use AssignOp::*;
        match self {
            Assign => "=",
            Mul => "*=",
            Div => "/=",
            Add => "+=",
            Sub => "-=",
            BitAnd => "&=",
            BitOr => "|=",
            Xor => "^=",
            ShiftLeft => "<<=",
            ShiftRight => ">>=",
        }
    }

    pub fn opword(&self) -> &'static str {
        use AssignOp::*;
        match self {
            Assign => "assign",
            Mul => "mul",
            Div => "div",
            Add => "add",
            Sub => "sub",
            BitAnd => "bitand",
            BitOr => "bitor",
            Xor => "xor",
            ShiftLeft => "shl",
            ShiftRight => "shr",
        }
    }

    /// The binary operator a compound assignment applies, or `None` for `=`.
    pub fn binary_op(&self) -> Option<BinaryOp> {
        use AssignOp::*;
        match self {
            Assign => None,
            Mul => Some(BinaryOp::Mul),
            Div => Some(BinaryOp::Div),
            Add => Some(BinaryOp::Add),
            Sub => Some(BinaryOp::Sub),
            BitAnd => Some(BinaryOp::BitAnd),
            BitOr => Some(BinaryOp::BitOr),
            Xor => Some(BinaryOp::Xor),
            ShiftLeft => Some(BinaryOp::ShiftLeft),
            ShiftRight => Some(BinaryOp::ShiftRight),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum IncDecOp {
    Decrement = 1,
    Increment = 2,
}

impl IncDecOp {
    pub fn opname(&self) -> &'static str {
        match self {
            IncDecOp::Decrement => "--",
            IncDecOp::Increment => "++",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum LoopKind {
    While = 1,
    DoWhile = 2,
    For = 3,
}

impl LoopKind {
    pub fn opname(&self) -> &'static str {
        match self {
            LoopKind::While => "while",
            LoopKind::DoWhile => "dowhile",
            LoopKind::For => "for",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum LoopModKind {
    Break = 1,
    Continue = 2,
}

impl LoopModKind {
    pub fn opname(&self) -> &'static str {
        match self {
            LoopModKind::Break => "break",
            LoopModKind::Continue => "continue",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ShaderKind {
    Generic = 1,
    Surface = 2,
    Displacement = 3,
    Volume = 4,
    Light = 5,
}

impl ShaderKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShaderKind::Generic => "shader",
            ShaderKind::Surface => "surface",
            ShaderKind::Displacement => "displacement",
            ShaderKind::Volume => "volume",
            ShaderKind::Light => "light",
        }
    }
}

#[test]
fn test_shared_opcodes() {
    assert_eq!(BinaryOp::Add as i32, UnaryOp::Plus as i32);
    assert_eq!(BinaryOp::Sub as i32, UnaryOp::Neg as i32);
    assert_eq!(AssignOp::ShiftRight as i32, BinaryOp::ShiftRight as i32);
    assert_eq!(AssignOp::Xor.binary_op(), Some(BinaryOp::Xor));
    assert_eq!(AssignOp::Assign.binary_op(), None);
}
