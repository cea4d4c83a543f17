//! Type representations.
//!
//! [`TypeHint`] is the structural spelling of a type, as read from a
//! docstring type token or handed over by a signature provider.
//! [`TypeDescriptor`] is the canonical, reduced form the synthesizer works
//! from; see [`resolve`] for the reduction rules.

pub mod expr;
pub mod namespace;
pub mod resolve;

use serde::Serialize;
use std::fmt;

pub use expr::parse_type_expr;
pub use namespace::{Builtin, Namespace, TypeDef, TypeRegistry};
pub use resolve::{reduce, resolve_param_type};

/// A structural type, before namespace lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeHint {
    /// A dotted name such as `int` or `pathlib.Path`.
    Named(String),
    NoneType,
    /// `list[T]`, `Sequence[T]`, `Iterable[T]`, `Collection[T]`.
    List(Box<TypeHint>),
    /// `tuple[A, B]`
    Tuple(Vec<TypeHint>),
    /// `tuple[T, ...]`
    VarTuple(Box<TypeHint>),
    Union(Vec<TypeHint>),
    Literal(Vec<Literal>),
}

impl TypeHint {
    pub fn named(name: &str) -> TypeHint {
        TypeHint::Named(name.to_string())
    }

    /// `Optional[T]`
    pub fn optional(inner: TypeHint) -> TypeHint {
        TypeHint::union(vec![inner, TypeHint::NoneType])
    }

    /// Build a union, flattening nested unions and dropping repeats.
    /// A single remaining member is returned as is.
    pub fn union(members: Vec<TypeHint>) -> TypeHint {
        let mut flat: Vec<TypeHint> = Vec::new();
        for member in members {
            let parts = match member {
                TypeHint::Union(inner) => inner,
                other => vec![other],
            };
            for part in parts {
                if !flat.contains(&part) {
                    flat.push(part);
                }
            }
        }
        if flat.len() == 1 {
            flat.remove(0)
        } else {
            TypeHint::Union(flat)
        }
    }
}

impl fmt::Display for TypeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeHint::Named(name) => write!(f, "{}", name),
            TypeHint::NoneType => write!(f, "None"),
            TypeHint::List(elem) => write!(f, "list[{}]", elem),
            TypeHint::Tuple(elems) => write!(f, "tuple[{}]", join(elems)),
            TypeHint::VarTuple(elem) => write!(f, "tuple[{}, ...]", elem),
            TypeHint::Union(members) => write!(f, "Union[{}]", join(members)),
            TypeHint::Literal(values) => write!(f, "Literal[{}]", join(values)),
        }
    }
}

/// A value allowed by a `Literal[...]` type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Literal {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl Literal {
    /// The scalar type whose parser reads this literal back.
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Str(_) => "str",
            Literal::Int(_) => "int",
            Literal::Bool(_) => "bool",
        }
    }

    /// The literal as a user would type it on the command line.
    pub fn as_choice(&self) -> String {
        match self {
            Literal::Str(s) => s.clone(),
            Literal::Int(n) => n.to_string(),
            Literal::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Str(s) => write!(f, "'{}'", s),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Bool(true) => write!(f, "True"),
            Literal::Bool(false) => write!(f, "False"),
        }
    }
}

/// Canonical type, the input of parser synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeDescriptor {
    /// A single-token type, by canonical name.
    Scalar(String),
    /// Any number of tokens, each parsed by the element type.
    Container(Box<TypeDescriptor>),
    FixedTuple(Vec<TypeDescriptor>),
    VariadicTuple(Box<TypeDescriptor>),
    Union(Vec<TypeDescriptor>),
    /// Named members, looked up by name.
    Enumerated { name: String, members: Vec<String> },
    /// A fixed set of literal values.
    Choice(Vec<Literal>),
    /// A fixed tuple whose values are handed to a named constructor.
    Record {
        name: String,
        fields: Vec<(String, TypeDescriptor)>,
    },
}

impl TypeDescriptor {
    pub fn scalar(name: &str) -> TypeDescriptor {
        TypeDescriptor::Scalar(name.to_string())
    }

    /// Takes a variable number of tokens or a tuple of them. Records are
    /// fixed tuples handed to a constructor.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            TypeDescriptor::Container(_)
                | TypeDescriptor::FixedTuple(_)
                | TypeDescriptor::VariadicTuple(_)
                | TypeDescriptor::Record { .. }
        )
    }

    /// Equality with union members compared as sets.
    pub fn same_as(&self, other: &TypeDescriptor) -> bool {
        match (self, other) {
            (TypeDescriptor::Union(a), TypeDescriptor::Union(b)) => {
                a.len() == b.len() && a.iter().all(|m| b.contains(m))
            }
            _ => self == other,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, TypeDescriptor::Scalar(name) if name == "NoneType")
    }

    /// The name under which overrides are looked up.
    pub fn identity(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Scalar(name)
            | TypeDescriptor::Enumerated { name, .. }
            | TypeDescriptor::Record { name, .. } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Scalar(name)
            | TypeDescriptor::Enumerated { name, .. }
            | TypeDescriptor::Record { name, .. } => write!(f, "{}", name),
            TypeDescriptor::Container(elem) => write!(f, "list[{}]", elem),
            TypeDescriptor::FixedTuple(elems) => write!(f, "tuple[{}]", join(elems)),
            TypeDescriptor::VariadicTuple(elem) => write!(f, "tuple[{}, ...]", elem),
            TypeDescriptor::Union(members) => write!(f, "Union[{}]", join(members)),
            TypeDescriptor::Choice(values) => write!(f, "Literal[{}]", join(values)),
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
