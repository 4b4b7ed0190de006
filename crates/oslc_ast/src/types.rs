// Copyright contributors to the oslc project
// SPDX-License-Identifier: Apache-2.0

// Types used to annotate AST nodes and symbols, the registry of struct layouts,
// argument-code mangling, and the promotion rules used by expression nodes.
//
// `Type::Unknown` is the terminal "not resolved" value. Nothing downstream may
// treat it as an error by itself; the diagnostic was reported where resolution failed.

use boolenum::BoolEnum;
use hashbrown::HashMap;
use std::fmt;

#[derive(BoolEnum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IsParam {
    True,
    False,
}

#[derive(BoolEnum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IsOutput {
    True,
    False,
}

#[derive(BoolEnum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IsMetadata {
    True,
    False,
}

#[derive(BoolEnum, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IsInitList {
    True,
    False,
}

/// Index of a `StructSpec` in the `StructRegistry`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructId(usize);

impl From<StructId> for usize {
    fn from(id: StructId) -> usize {
        id.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrayLen {
    Sized(usize),
    Unsized,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Type {
    #[default]
    Unknown,
    Void,
    Int,
    Float,
    String,
    Color,
    Point,
    Vector,
    Normal,
    Matrix,
    // closure color
    Closure,
    Struct(StructId),
    // Arrays of arrays are not part of the language. Constructors never build them.
    Array(Box<Type>, ArrayLen),
}

impl Type {
    pub fn array(elem: Type, len: ArrayLen) -> Type {
        Type::Array(Box::new(elem), len)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int)
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Type::Float)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Type::String)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// `int` or `float`
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    pub fn is_color(&self) -> bool {
        matches!(self, Type::Color)
    }

    /// point, vector, or normal
    pub fn is_vectriple(&self) -> bool {
        matches!(self, Type::Point | Type::Vector | Type::Normal)
    }

    /// color, point, vector, or normal
    pub fn is_triple(&self) -> bool {
        self.is_color() || self.is_vectriple()
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self, Type::Matrix)
    }

    /// A single closure, not an array of closures.
    pub fn is_closure(&self) -> bool {
        matches!(self, Type::Closure)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(..))
    }

    pub fn is_unsized_array(&self) -> bool {
        matches!(self, Type::Array(_, ArrayLen::Unsized))
    }

    pub fn is_structure(&self) -> bool {
        matches!(self, Type::Struct(_))
    }

    pub fn is_structure_array(&self) -> bool {
        matches!(self, Type::Array(elem, _) if elem.is_structure())
    }

    /// The struct id of a struct or of an array of structs.
    pub fn structure(&self) -> Option<StructId> {
        match self {
            Type::Struct(id) => Some(*id),
            Type::Array(elem, _) => elem.structure(),
            _ => None,
        }
    }

    /// For arrays, the type of one element. Otherwise the type itself.
    pub fn element_type(&self) -> Type {
        match self {
            Type::Array(elem, _) => elem.as_ref().clone(),
            _ => self.clone(),
        }
    }

    /// 0 for non-arrays, -1 for unsized arrays, otherwise the length.
    pub fn array_length(&self) -> i32 {
        match self {
            Type::Array(_, ArrayLen::Sized(n)) => *n as i32,
            Type::Array(_, ArrayLen::Unsized) => -1,
            _ => 0,
        }
    }
}

// Promotion used for the result type of arithmetic binary operators and of the
// ternary operator. Returns `Unknown` when there is no common type.
pub fn promote_types(ty1: &Type, ty2: &Type) -> Type {
    use Type::*;
    if ty1 == ty2 {
        return ty1.clone();
    }
    match (ty1, ty2) {
        (Int, Float) | (Float, Int) => Float,
        (t, Int | Float) | (Int | Float, t) if t.is_triple() || t.is_matrix() => t.clone(),
        _ => Unknown,
    }
}

/// Return `true` if a value of type `from` may initialize or be assigned to
/// storage of type `to`. `Unknown` on either side is accepted so that a failed
/// resolution does not produce a second diagnostic.
pub fn assignable(to: &Type, from: &Type) -> bool {
    use Type::*;
    if to == from || to.is_unknown() || from.is_unknown() {
        return true;
    }
    match (to, from) {
        (Float, Int) => true,
        (t, f) if t.is_triple() => f.is_numeric() || f.is_triple(),
        (Matrix, f) => f.is_numeric(),
        (Array(te, tl), Array(fe, fl)) => {
            te == fe && (*tl == ArrayLen::Unsized || tl == fl)
        }
        _ => false,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    typ: Type,
}

impl FieldSpec {
    pub fn new<T: ToString>(name: T, typ: Type) -> FieldSpec {
        FieldSpec {
            name: name.to_string(),
            typ,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn typ(&self) -> &Type {
        &self.typ
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructSpec {
    name: String,
    fields: Vec<FieldSpec>,
}

impl StructSpec {
    pub fn new<T: ToString>(name: T, fields: Vec<FieldSpec>) -> StructSpec {
        StructSpec {
            name: name.to_string(),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }
}

/// All struct layouts declared in a compilation unit, addressed by `StructId`.
#[derive(Clone, Debug, Default)]
pub struct StructRegistry {
    specs: Vec<StructSpec>,
    by_name: HashMap<String, StructId>,
}

impl StructRegistry {
    pub fn new() -> StructRegistry {
        StructRegistry::default()
    }

    pub fn declare(&mut self, spec: StructSpec) -> StructId {
        let id = StructId(self.specs.len());
        self.by_name.insert(spec.name.clone(), id);
        self.specs.push(spec);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<StructId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: StructId) -> &StructSpec {
        &self.specs[id.0]
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Argument code for `typ`, the unit from which function signatures are built.
    pub fn code_from_type(&self, typ: &Type) -> String {
        use Type::*;
        match typ {
            Unknown => "?".to_string(),
            Void => "x".to_string(),
            Int => "i".to_string(),
            Float => "f".to_string(),
            String => "s".to_string(),
            Color => "c".to_string(),
            Point => "p".to_string(),
            Vector => "v".to_string(),
            Normal => "n".to_string(),
            Matrix => "m".to_string(),
            Closure => "C".to_string(),
            Struct(id) => format!("S{};", self.get(*id).name()),
            Array(elem, ArrayLen::Sized(n)) => format!("{}[{}]", self.code_from_type(elem), n),
            Array(elem, ArrayLen::Unsized) => format!("{}[]", self.code_from_type(elem)),
        }
    }

    /// Display `typ` the way it is spelled in source.
    pub fn display<'a>(&'a self, typ: &'a Type) -> TypeDisplay<'a> {
        TypeDisplay { typ, structs: self }
    }
}

impl std::ops::Index<StructId> for StructRegistry {
    type Output = StructSpec;

    fn index(&self, id: StructId) -> &Self::Output {
        self.get(id)
    }
}

pub struct TypeDisplay<'a> {
    typ: &'a Type,
    structs: &'a StructRegistry,
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Type::*;
        match self.typ {
            Unknown => f.write_str("unknown"),
            Void => f.write_str("void"),
            Int => f.write_str("int"),
            Float => f.write_str("float"),
            String => f.write_str("string"),
            Color => f.write_str("color"),
            Point => f.write_str("point"),
            Vector => f.write_str("vector"),
            Normal => f.write_str("normal"),
            Matrix => f.write_str("matrix"),
            Closure => f.write_str("closure color"),
            Struct(id) => write!(f, "struct {}", self.structs.get(*id).name()),
            Array(elem, len) => {
                write!(f, "{}", self.structs.display(elem))?;
                match len {
                    ArrayLen::Sized(n) => write!(f, "[{n}]"),
                    ArrayLen::Unsized => f.write_str("[]"),
                }
            }
        }
    }
}

#[test]
fn test_type_predicates() {
    let t = Type::array(Type::Color, ArrayLen::Sized(4));
    assert!(t.is_array());
    assert!(!t.is_triple());
    assert!(t.element_type().is_triple());
    assert_eq!(t.array_length(), 4);
    assert!(!Type::Closure.is_triple());
    assert_eq!(Type::array(Type::Float, ArrayLen::Unsized).array_length(), -1);
    assert_eq!(Type::Matrix.array_length(), 0);
}

#[test]
fn test_promote_types() {
    assert_eq!(promote_types(&Type::Int, &Type::Float), Type::Float);
    assert_eq!(promote_types(&Type::Color, &Type::Float), Type::Color);
    assert_eq!(promote_types(&Type::Int, &Type::Matrix), Type::Matrix);
    assert_eq!(promote_types(&Type::Color, &Type::Point), Type::Unknown);
    assert_eq!(promote_types(&Type::String, &Type::String), Type::String);
}

#[test]
fn test_codes_and_display() {
    let mut structs = StructRegistry::new();
    let id = structs.declare(StructSpec::new(
        "ray",
        vec![
            FieldSpec::new("pos", Type::Point),
            FieldSpec::new("dir", Type::Vector),
        ],
    ));
    let arr = Type::array(Type::Struct(id), ArrayLen::Sized(2));
    assert_eq!(structs.code_from_type(&arr), "Sray;[2]");
    assert_eq!(structs.code_from_type(&Type::array(Type::Float, ArrayLen::Unsized)), "f[]");
    assert_eq!(structs.display(&arr).to_string(), "struct ray[2]");
    assert_eq!(structs.display(&Type::Closure).to_string(), "closure color");
    assert!(arr.is_structure_array());
    assert_eq!(arr.structure(), Some(id));
    assert_eq!(structs[id].field_index("dir"), Some(1));
}
