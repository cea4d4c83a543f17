//! Per-parameter assembly: docstring, type resolution and parser synthesis
//! for every parameter a signature provider reports.

use crate::cache::DocCache;
use crate::error::{Error, Result};
use crate::model::ParsedDoc;
use crate::synth::{synthesize, ParserOverrides, ValueParser};
use crate::types::{resolve_param_type, Namespace, TypeDescriptor, TypeHint};
use crate::DocParser;
use std::sync::Arc;

/// One parameter as the signature provider sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    /// `*args`-style parameter.
    pub is_variadic: bool,
    pub has_default: bool,
    /// Structural type, if the signature declares one.
    pub hint: Option<TypeHint>,
}

impl ParamSpec {
    pub fn new(name: &str, hint: Option<TypeHint>) -> Self {
        ParamSpec {
            name: name.to_string(),
            is_variadic: false,
            has_default: false,
            hint,
        }
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }

    pub fn is_private(&self) -> bool {
        self.name.starts_with('_')
    }
}

/// Source of parameter metadata and documentation for one callable.
pub trait SignatureProvider {
    /// Parameters, in declaration order.
    fn params(&self) -> Vec<ParamSpec>;
    /// The attached docstring, if any.
    fn doc(&self) -> Option<&str>;
}

/// A fully described parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub is_variadic: bool,
    pub has_default: bool,
    pub doc: Option<String>,
    pub descriptor: TypeDescriptor,
    pub parser: ValueParser,
}

#[derive(Debug, Clone)]
pub struct Signature {
    pub summary: String,
    pub description: String,
    pub params: Vec<Param>,
    /// Error kinds a call wrapper should report instead of propagating.
    pub raises: Vec<String>,
}

/// Everything needed to describe a callable.
pub struct Assembler<'a> {
    parser: &'a DocParser,
    namespace: &'a dyn Namespace,
    overrides: &'a ParserOverrides,
    cache: Option<&'a DocCache>,
}

impl<'a> Assembler<'a> {
    pub fn new(
        parser: &'a DocParser,
        namespace: &'a dyn Namespace,
        overrides: &'a ParserOverrides,
    ) -> Self {
        Assembler {
            parser,
            namespace,
            overrides,
            cache: None,
        }
    }

    /// Look docstrings up in `cache` before parsing them.
    pub fn with_cache(mut self, cache: &'a DocCache) -> Self {
        self.cache = Some(cache);
        self
    }

    fn parsed_doc(&self, doc: Option<&str>) -> Result<Arc<ParsedDoc>> {
        match (self.cache, doc) {
            (Some(cache), Some(text)) => cache.get_or_parse(self.parser, text),
            _ => self.parser.parse(doc).map(Arc::new),
        }
    }

    pub fn signature(&self, provider: &dyn SignatureProvider) -> Result<Signature> {
        let doc = self.parsed_doc(provider.doc())?;
        let mut params = Vec::new();
        for spec in provider.params() {
            if spec.is_private() {
                if !spec.has_default {
                    return Err(Error::PrivateWithoutDefault(spec.name));
                }
                tracing::debug!(param = %spec.name, "skipping private parameter");
                continue;
            }
            let param_doc = doc.params.get(&spec.name);
            let descriptor = resolve_param_type(
                &spec.name,
                param_doc.and_then(|p| p.type_token.as_deref()),
                spec.hint.as_ref(),
                self.namespace,
            )?;
            let parser = synthesize(&descriptor, self.namespace, self.overrides)?;
            params.push(Param {
                doc: param_doc.and_then(|p| p.text.clone()),
                name: spec.name,
                is_variadic: spec.is_variadic,
                has_default: spec.has_default,
                descriptor,
                parser,
            });
        }
        Ok(Signature {
            summary: doc.summary.clone(),
            description: doc.description.clone(),
            params,
            raises: doc.raises.clone(),
        })
    }
}
