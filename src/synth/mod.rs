//! Parser Synthesizer: compiles a [`TypeDescriptor`] into a [`ValueParser`].
//!
//! Composite descriptors produce composite parsers; the leaves are override
//! parsers, built-in scalars (see [`scalar`]) or string-constructible
//! classes from the namespace.

pub mod scalar;

use crate::error::{Error, ParseValueError, Result};
use crate::types::{Builtin, Literal, Namespace, TypeDescriptor};
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A single-token conversion; `None` means the token was rejected.
pub type ScalarFn = Arc<dyn Fn(&str) -> Option<Value> + Send + Sync>;

/// Caller-supplied parsers, keyed by type name. Consulted before the
/// built-in table.
#[derive(Clone, Default)]
pub struct ParserOverrides {
    parsers: HashMap<String, ScalarFn>,
}

impl ParserOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<F>(&mut self, type_name: &str, parse: F) -> &mut Self
    where
        F: Fn(&str) -> Option<Value> + Send + Sync + 'static,
    {
        self.parsers.insert(type_name.to_string(), Arc::new(parse));
        self
    }

    pub fn get(&self, type_name: &str) -> Option<&ScalarFn> {
        self.parsers.get(type_name)
    }
}

impl fmt::Debug for ParserOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.parsers.keys().collect();
        names.sort();
        f.debug_struct("ParserOverrides")
            .field("types", &names)
            .finish()
    }
}

/// How many command-line tokens a parser consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nargs {
    One,
    Exactly(usize),
    Any,
}

/// A named `string -> value` conversion.
#[derive(Clone)]
pub struct ValueParser {
    display_name: String,
    kind: Kind,
}

#[derive(Clone)]
enum Kind {
    Scalar {
        parse: ScalarFn,
        /// Accepts every string (str and path passthrough).
        infallible: bool,
    },
    Enum(Vec<String>),
    Choice(Vec<(Literal, ValueParser)>),
    Union(Vec<ValueParser>),
    Tuple {
        elements: Vec<ValueParser>,
        /// Field names, when the tuple is a record.
        record: Option<Vec<String>>,
    },
    Variadic(Box<ValueParser>),
    Container(Box<ValueParser>),
}

impl fmt::Debug for ValueParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueParser")
            .field("display_name", &self.display_name)
            .field("nargs", &self.nargs())
            .finish()
    }
}

impl ValueParser {
    /// Name used verbatim in error messages.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn nargs(&self) -> Nargs {
        match &self.kind {
            Kind::Tuple { elements, .. } => Nargs::Exactly(elements.len()),
            Kind::Variadic(_) | Kind::Container(_) => Nargs::Any,
            _ => Nargs::One,
        }
    }

    fn is_infallible(&self) -> bool {
        matches!(
            self.kind,
            Kind::Scalar {
                infallible: true,
                ..
            }
        )
    }

    fn invalid(&self, value: &str) -> ParseValueError {
        ParseValueError::Invalid {
            type_name: self.display_name.clone(),
            value: value.to_string(),
        }
    }

    /// Convert one token. Multi-token parsers treat it as a one-token list.
    pub fn parse(&self, token: &str) -> std::result::Result<Value, ParseValueError> {
        match &self.kind {
            Kind::Scalar { parse, .. } => parse(token).ok_or_else(|| self.invalid(token)),
            Kind::Enum(members) => {
                if members.iter().any(|m| m == token) {
                    Ok(Value::Enum {
                        type_name: self.display_name.clone(),
                        member: token.to_string(),
                    })
                } else {
                    Err(ParseValueError::Choice {
                        value: token.to_string(),
                        choices: members.clone(),
                    })
                }
            }
            Kind::Choice(options) => {
                for (literal, parser) in options {
                    let wanted = literal_value(literal);
                    if parser.parse(token).ok().as_ref() == Some(&wanted) {
                        return Ok(wanted);
                    }
                }
                Err(ParseValueError::Choice {
                    value: token.to_string(),
                    choices: options.iter().map(|(l, _)| l.as_choice()).collect(),
                })
            }
            Kind::Union(members) => {
                for member in members {
                    match member.parse(token) {
                        Ok(value) => return Ok(value),
                        Err(err) => tracing::debug!(
                            member = %member.display_name,
                            error = %err,
                            "suppressed union member failure"
                        ),
                    }
                }
                Err(self.invalid(token))
            }
            Kind::Tuple { .. } | Kind::Variadic(_) | Kind::Container(_) => {
                self.parse_tokens(&[token])
            }
        }
    }

    /// Convert all tokens given for one argument.
    pub fn parse_tokens(&self, tokens: &[&str]) -> std::result::Result<Value, ParseValueError> {
        match &self.kind {
            Kind::Tuple { elements, record } => {
                if tokens.len() != elements.len() {
                    return Err(self.arity(elements.len(), tokens.len()));
                }
                let values = elements
                    .iter()
                    .zip(tokens)
                    .map(|(parser, token)| parser.parse(token))
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(match record {
                    Some(names) => Value::Record {
                        type_name: self.display_name.clone(),
                        fields: names.iter().cloned().zip(values).collect(),
                    },
                    None => Value::Tuple(values),
                })
            }
            Kind::Variadic(element) => element.parse_all(tokens).map(Value::Tuple),
            Kind::Container(element) => element.parse_all(tokens).map(Value::List),
            _ => match tokens {
                [token] => self.parse(token),
                _ => Err(self.arity(1, tokens.len())),
            },
        }
    }

    fn parse_all(&self, tokens: &[&str]) -> std::result::Result<Vec<Value>, ParseValueError> {
        tokens.iter().map(|token| self.parse(token)).collect()
    }

    fn arity(&self, expected: usize, got: usize) -> ParseValueError {
        ParseValueError::Arity {
            type_name: self.display_name.clone(),
            expected,
            got,
        }
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Str(s) => Value::Str(s.clone()),
        Literal::Int(n) => Value::Int(*n),
        Literal::Bool(b) => Value::Bool(*b),
    }
}

/// Build the parser for `desc`.
pub fn synthesize(
    desc: &TypeDescriptor,
    ns: &dyn Namespace,
    overrides: &ParserOverrides,
) -> Result<ValueParser> {
    let display_name = desc.to_string();
    if let Some(parse) = desc.identity().and_then(|name| overrides.get(name)) {
        return Ok(ValueParser {
            display_name,
            kind: Kind::Scalar {
                parse: Arc::clone(parse),
                infallible: false,
            },
        });
    }

    let kind = match desc {
        TypeDescriptor::Scalar(name) => scalar_kind(name, ns)?,
        TypeDescriptor::Enumerated { members, .. } => Kind::Enum(members.clone()),
        TypeDescriptor::Choice(literals) => {
            let options = literals
                .iter()
                .map(|literal| {
                    let own_type = TypeDescriptor::scalar(literal.type_name());
                    Ok((literal.clone(), synthesize(&own_type, ns, overrides)?))
                })
                .collect::<Result<Vec<_>>>()?;
            Kind::Choice(options)
        }
        TypeDescriptor::Union(members) => {
            // NoneType first, so a None override sees the token before
            // anything else can claim it.
            let ordered = members
                .iter()
                .filter(|m| m.is_none())
                .chain(members.iter().filter(|m| !m.is_none()));
            let mut parsers = Vec::new();
            for member in ordered {
                let parser = synthesize(member, ns, overrides)?;
                let stop = parser.is_infallible();
                parsers.push(parser);
                if stop {
                    break;
                }
            }
            Kind::Union(parsers)
        }
        TypeDescriptor::FixedTuple(elements) => Kind::Tuple {
            elements: elements
                .iter()
                .map(|elem| synthesize(elem, ns, overrides))
                .collect::<Result<Vec<_>>>()?,
            record: None,
        },
        TypeDescriptor::Record { fields, .. } => Kind::Tuple {
            elements: fields
                .iter()
                .map(|(_, elem)| synthesize(elem, ns, overrides))
                .collect::<Result<Vec<_>>>()?,
            record: Some(fields.iter().map(|(name, _)| name.clone()).collect()),
        },
        TypeDescriptor::VariadicTuple(elem) => {
            Kind::Variadic(Box::new(synthesize(elem, ns, overrides)?))
        }
        TypeDescriptor::Container(elem) => {
            Kind::Container(Box::new(synthesize(elem, ns, overrides)?))
        }
    };
    Ok(ValueParser { display_name, kind })
}

fn scalar_kind(name: &str, ns: &dyn Namespace) -> Result<Kind> {
    if let Some(builtin) = Builtin::from_name(name) {
        return match scalar::builtin(builtin) {
            Some((parse, infallible)) => Ok(Kind::Scalar { parse, infallible }),
            None => Err(Error::BareList),
        };
    }
    match ns.resolve(name) {
        Some(def) if def.constructible_from_str() => {
            let type_name = def.name().to_string();
            let parse: ScalarFn = Arc::new(move |s: &str| {
                Some(Value::Instance {
                    type_name: type_name.clone(),
                    arg: s.to_string(),
                })
            });
            Ok(Kind::Scalar {
                parse,
                infallible: false,
            })
        }
        _ => Err(Error::NoParserFound(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{resolve_param_type, TypeHint, TypeRegistry};
    use std::path::PathBuf;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::default();
        registry
            .register_enum("Color", &["RED", "GREEN"])
            .register_class("Url", Some(TypeHint::named("str")))
            .register_class("Opaque", None)
            .register_record(
                "Point",
                &[("x", TypeHint::named("int")), ("y", TypeHint::named("float"))],
            );
        registry
    }

    fn parser_for(token: &str) -> Result<ValueParser> {
        parser_with(token, &ParserOverrides::default())
    }

    fn parser_with(token: &str, overrides: &ParserOverrides) -> Result<ValueParser> {
        let registry = registry();
        let desc = resolve_param_type("x", Some(token), None, &registry)?;
        synthesize(&desc, &registry, overrides)
    }

    #[test]
    fn builtin_scalars() {
        let int = parser_for("int").unwrap();
        assert_eq!(int.parse("12"), Ok(Value::Int(12)));
        assert_eq!(
            int.parse("x").unwrap_err().to_string(),
            "invalid int value: 'x'"
        );
        assert_eq!(
            parser_for("pathlib.Path").unwrap().parse("a/b"),
            Ok(Value::Path(PathBuf::from("a/b")))
        );
        assert_eq!(parser_for("bool").unwrap().parse("F"), Ok(Value::Bool(false)));
    }

    #[test]
    fn fixed_tuple_requires_exact_arity() {
        let parser = parser_for("Tuple[int,str]").unwrap();
        assert_eq!(parser.nargs(), Nargs::Exactly(2));
        assert_eq!(
            parser.parse_tokens(&["1", "x"]),
            Ok(Value::Tuple(vec![Value::Int(1), Value::Str("x".to_string())]))
        );
        assert_eq!(
            parser.parse_tokens(&["1"]),
            Err(ParseValueError::Arity {
                type_name: "tuple[int, str]".to_string(),
                expected: 2,
                got: 1,
            })
        );
        assert!(parser.parse_tokens(&["1", "x", "y"]).is_err());
    }

    #[test]
    fn variadic_and_container_accept_any_count() {
        let tuple = parser_for("tuple[int, ...]").unwrap();
        assert_eq!(tuple.parse_tokens(&[]), Ok(Value::Tuple(vec![])));
        assert_eq!(
            tuple.parse_tokens(&["1", "2", "3"]),
            Ok(Value::Tuple(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
        );
        let list = parser_for("list[float]").unwrap();
        assert_eq!(list.nargs(), Nargs::Any);
        assert_eq!(list.parse_tokens(&[]), Ok(Value::List(vec![])));
        assert_eq!(
            list.parse_tokens(&["1.5", "x"]).unwrap_err().to_string(),
            "invalid float value: 'x'"
        );
    }

    #[test]
    fn choice_lists_every_literal() {
        let parser = parser_for("Literal['a', 'b']").unwrap();
        assert_eq!(parser.parse("b"), Ok(Value::Str("b".to_string())));
        assert_eq!(
            parser.parse("c").unwrap_err().to_string(),
            "invalid choice: 'c' (choose from 'a', 'b')"
        );
    }

    #[test]
    fn choice_uses_each_literals_own_type() {
        let parser = parser_for("Literal[1, 'one', True]").unwrap();
        assert_eq!(parser.parse("01"), Ok(Value::Int(1)));
        assert_eq!(parser.parse("one"), Ok(Value::Str("one".to_string())));
        assert_eq!(parser.parse("t"), Ok(Value::Bool(true)));
    }

    #[test]
    fn enum_members_by_name() {
        let parser = parser_for("Color").unwrap();
        assert_eq!(
            parser.parse("RED"),
            Ok(Value::Enum {
                type_name: "Color".to_string(),
                member: "RED".to_string(),
            })
        );
        assert_eq!(
            parser.parse("red").unwrap_err().to_string(),
            "invalid choice: 'red' (choose from 'RED', 'GREEN')"
        );
    }

    #[test]
    fn union_falls_back_in_declaration_order() {
        let parser = parser_for("int or float").unwrap();
        assert_eq!(parser.parse("3"), Ok(Value::Int(3)));
        assert_eq!(parser.parse("3.5"), Ok(Value::Float(3.5)));
        assert_eq!(
            parser.parse("x").unwrap_err().to_string(),
            "invalid Union[int, float] value: 'x'"
        );
        let parser = parser_for("float or int").unwrap();
        assert_eq!(parser.parse("3"), Ok(Value::Float(3.0)));
    }

    #[test]
    fn infallible_member_stops_synthesis() {
        // Opaque has no parser at all; it is never reached.
        let parser = parser_for("str or Opaque").unwrap();
        assert_eq!(parser.parse("anything"), Ok(Value::Str("anything".to_string())));
        assert!(matches!(
            parser_for("Opaque"),
            Err(Error::NoParserFound(name)) if name == "Opaque"
        ));
    }

    #[test]
    fn none_override_is_tried_first() {
        let mut overrides = ParserOverrides::new();
        overrides.insert("NoneType", |s| (s == "none").then_some(Value::None));
        let registry = registry();
        let desc = TypeDescriptor::Union(vec![
            TypeDescriptor::scalar("str"),
            TypeDescriptor::scalar("int"),
            TypeDescriptor::scalar("NoneType"),
        ]);
        let parser = synthesize(&desc, &registry, &overrides).unwrap();
        assert_eq!(parser.parse("none"), Ok(Value::None));
        assert_eq!(parser.parse("1"), Ok(Value::Str("1".to_string())));
    }

    #[test]
    fn overrides_win_over_builtins() {
        let mut overrides = ParserOverrides::new();
        overrides.insert("int", |s| {
            s.strip_prefix("0x")
                .and_then(|hex| i64::from_str_radix(hex, 16).ok())
                .map(Value::Int)
        });
        let parser = parser_with("int", &overrides).unwrap();
        assert_eq!(parser.parse("0x10"), Ok(Value::Int(16)));
        assert!(parser.parse("16").is_err());
    }

    #[test]
    fn string_constructible_class() {
        let parser = parser_for("Url").unwrap();
        assert_eq!(
            parser.parse("https://example.org"),
            Ok(Value::Instance {
                type_name: "Url".to_string(),
                arg: "https://example.org".to_string(),
            })
        );
    }

    #[test]
    fn record_fields_are_named() {
        let parser = parser_for("Point").unwrap();
        assert_eq!(
            parser.parse_tokens(&["1", "2.5"]),
            Ok(Value::Record {
                type_name: "Point".to_string(),
                fields: vec![
                    ("x".to_string(), Value::Int(1)),
                    ("y".to_string(), Value::Float(2.5)),
                ],
            })
        );
    }

    #[test]
    fn parsers_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValueParser>();
    }
}
