//! argdoc: turn a function's docstring and type metadata into a structured
//! description of its parameters, plus one value parser per parameter.
//!
//! The documentation pipeline runs [`normalize::cleandoc`], rewrites
//! Google/NumPy sections into field lists ([`normalize::normalize`]), parses
//! the result into blocks ([`parser::parse`]) and extracts a [`ParsedDoc`]
//! ([`extract::extract`]). Types go through [`types::resolve_param_type`]
//! and [`synth::synthesize`]; [`signature::Assembler`] ties both together
//! for a whole callable.

pub mod cache;
pub mod enumerator;
pub mod error;
pub mod extract;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod signature;
pub mod synth;
pub mod types;
pub mod value;

pub use cache::DocCache;
pub use error::{Error, ParseValueError, Result};
pub use model::{ParamDoc, ParsedDoc};
pub use normalize::NormalizeConfig;
pub use parser::MarkupConfig;
pub use signature::{Assembler, Param, ParamSpec, Signature, SignatureProvider};
pub use synth::{synthesize, Nargs, ParserOverrides, ValueParser};
pub use types::{Literal, Namespace, TypeDescriptor, TypeHint, TypeRegistry};
pub use value::Value;

/// Pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocConfig {
    pub normalize: NormalizeConfig,
    pub markup: MarkupConfig,
}

/// Docstring pipeline entry point.
#[derive(Debug, Clone, Default)]
pub struct DocParser {
    config: DocConfig,
}

impl DocParser {
    pub fn new(config: DocConfig) -> Self {
        DocParser { config }
    }

    pub fn config(&self) -> &DocConfig {
        &self.config
    }

    /// The canonical field-list form of a raw docstring.
    pub fn canonical(&self, raw: &str) -> String {
        normalize::normalize(&normalize::cleandoc(raw), &self.config.normalize)
    }

    /// Parse a docstring. An absent docstring gives an empty [`ParsedDoc`].
    pub fn parse(&self, doc: Option<&str>) -> Result<ParsedDoc> {
        let Some(raw) = doc else {
            return Ok(ParsedDoc::default());
        };
        let text = self.canonical(raw);
        let blocks = parser::parse(&text, &self.config.markup)?;
        extract::extract(&blocks)
    }
}
