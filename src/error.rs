//! Error types for argdoc.
//!
//! [`Error`] covers everything that can go wrong while building the
//! description of a function (docstring parsing, type resolution, parser
//! synthesis). [`ParseValueError`] is what a synthesized parser reports when
//! a command-line token cannot be converted.

use thiserror::Error;

/// Construction-time error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The same `(doctype, name)` pair was declared twice.
    #[error("{doctype} defined twice for {name}")]
    DuplicateField { doctype: String, name: String },

    /// A field-list entry whose header has an unsupported shape.
    /// Never returned to callers: the field is logged and skipped.
    #[error("malformed field header: {0:?}")]
    MalformedField(String),

    /// Neither the docstring nor the signature declares a type.
    #[error("no type found for parameter {0}")]
    MissingType(String),

    /// The docstring type and the signature type disagree.
    #[error("conflicting types found for parameter {param}: {doc}, {hint}")]
    TypeConflict {
        param: String,
        doc: String,
        hint: String,
    },

    /// A container inside a union, or a container of containers.
    #[error("unsupported {0}")]
    UnsupportedContainer(String),

    /// An unparameterized `list`.
    #[error("unable to parse list (try list[type])")]
    BareList,

    /// A scalar type with no override, no built-in and no string constructor.
    #[error("no parser found for type {0}")]
    NoParserFound(String),

    /// A docstring type spelling that does not match the type grammar.
    #[error("invalid type expression {expr:?}: {reason}")]
    InvalidTypeExpression { expr: String, reason: String },

    /// A dotted name the namespace provider does not know.
    #[error("name {0:?} is not defined")]
    UnresolvedName(String),

    /// An inline `:role:` that is neither standard nor configured.
    #[error("unknown interpreted text role {0:?}")]
    UnknownRole(String),

    /// A private (underscore-prefixed) parameter without a default value.
    #[error("parameter {0} is private but has no default")]
    PrivateWithoutDefault(String),
}

/// Result type alias for construction-time operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Conversion failure reported for one command-line value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseValueError {
    /// The token is not a valid spelling of the target type.
    #[error("invalid {type_name} value: '{value}'")]
    Invalid { type_name: String, value: String },

    /// The token is not one of an enumerated set of names or literals.
    #[error("invalid choice: '{value}' (choose from {})", quote_all(.choices))]
    Choice { value: String, choices: Vec<String> },

    /// Wrong number of tokens for a fixed-arity tuple.
    #[error("{type_name} expects {expected} argument(s), got {got}")]
    Arity {
        type_name: String,
        expected: usize,
        got: usize,
    },
}

fn quote_all(choices: &[String]) -> String {
    choices
        .iter()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(", ")
}
