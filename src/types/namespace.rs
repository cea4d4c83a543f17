//! Name resolution for docstring-declared types.

use super::TypeHint;
use std::collections::HashMap;

/// Types with a built-in parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Str,
    Int,
    Float,
    Bool,
    Path,
    Slice,
    NoneType,
    /// `list` without an element type; never parseable.
    List,
}

impl Builtin {
    /// Canonical scalar name.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Str => "str",
            Builtin::Int => "int",
            Builtin::Float => "float",
            Builtin::Bool => "bool",
            Builtin::Path => "Path",
            Builtin::Slice => "slice",
            Builtin::NoneType => "NoneType",
            Builtin::List => "list",
        }
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        let builtin = match name {
            "str" => Builtin::Str,
            "int" => Builtin::Int,
            "float" => Builtin::Float,
            "bool" => Builtin::Bool,
            "Path" => Builtin::Path,
            "slice" => Builtin::Slice,
            "NoneType" => Builtin::NoneType,
            "list" => Builtin::List,
            _ => return None,
        };
        Some(builtin)
    }
}

/// What a name refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
    Builtin(Builtin),
    /// An enumeration with named members.
    Enum { name: String, members: Vec<String> },
    /// A named tuple: ordered, typed fields.
    Record {
        name: String,
        fields: Vec<(String, TypeHint)>,
    },
    /// Any other type. `constructor` is the declared type of its
    /// single constructor argument, if it has exactly one.
    Class {
        name: String,
        constructor: Option<TypeHint>,
    },
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            TypeDef::Builtin(builtin) => builtin.name(),
            TypeDef::Enum { name, .. }
            | TypeDef::Record { name, .. }
            | TypeDef::Class { name, .. } => name,
        }
    }

    /// Whether the type can be built from one plain string.
    pub fn constructible_from_str(&self) -> bool {
        matches!(
            self,
            TypeDef::Class {
                constructor: Some(TypeHint::Named(arg)),
                ..
            } if arg == "str"
        )
    }
}

/// Resolves dotted names to types.
pub trait Namespace: Send + Sync {
    fn resolve(&self, name: &str) -> Option<TypeDef>;
}

/// A `HashMap`-backed namespace, pre-populated with the built-ins.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDef>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        let mut types = HashMap::new();
        let builtins = [
            ("str", Builtin::Str),
            ("int", Builtin::Int),
            ("float", Builtin::Float),
            ("bool", Builtin::Bool),
            ("slice", Builtin::Slice),
            ("None", Builtin::NoneType),
            ("NoneType", Builtin::NoneType),
            ("Path", Builtin::Path),
            ("pathlib.Path", Builtin::Path),
            ("pathlib.PurePath", Builtin::Path),
            ("list", Builtin::List),
            ("List", Builtin::List),
            ("typing.List", Builtin::List),
        ];
        for (name, builtin) in builtins {
            types.insert(name.to_string(), TypeDef::Builtin(builtin));
        }
        TypeRegistry { types }
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, def: TypeDef) -> &mut Self {
        self.types.insert(name.to_string(), def);
        self
    }

    pub fn register_enum(&mut self, name: &str, members: &[&str]) -> &mut Self {
        self.register(
            name,
            TypeDef::Enum {
                name: name.to_string(),
                members: members.iter().map(|m| m.to_string()).collect(),
            },
        )
    }

    pub fn register_record(&mut self, name: &str, fields: &[(&str, TypeHint)]) -> &mut Self {
        self.register(
            name,
            TypeDef::Record {
                name: name.to_string(),
                fields: fields
                    .iter()
                    .map(|(field, hint)| (field.to_string(), hint.clone()))
                    .collect(),
            },
        )
    }

    pub fn register_class(&mut self, name: &str, constructor: Option<TypeHint>) -> &mut Self {
        self.register(
            name,
            TypeDef::Class {
                name: name.to_string(),
                constructor,
            },
        )
    }
}

impl Namespace for TypeRegistry {
    fn resolve(&self, name: &str) -> Option<TypeDef> {
        self.types.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_resolve_by_alias() {
        let registry = TypeRegistry::default();
        assert_eq!(
            registry.resolve("pathlib.Path"),
            Some(TypeDef::Builtin(Builtin::Path))
        );
        assert_eq!(registry.resolve("None"), Some(TypeDef::Builtin(Builtin::NoneType)));
        assert_eq!(registry.resolve("Unknown"), None);
    }

    #[test]
    fn string_constructible_classes() {
        let mut registry = TypeRegistry::default();
        registry
            .register_class("Url", Some(TypeHint::named("str")))
            .register_class("Pair", Some(TypeHint::named("int")))
            .register_class("Opaque", None);
        let check = |name: &str| registry.resolve(name).unwrap().constructible_from_str();
        assert!(check("Url"));
        assert!(!check("Pair"));
        assert!(!check("Opaque"));
    }
}
