//! Data model for parsed documentation (style-agnostic).

use crate::enumerator::{EnumFormat, Sequence};
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything extracted from one docstring.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedDoc {
    /// First rendered prose block (used for sub-command help).
    pub summary: String,
    /// All prose, with field lists removed.
    pub description: String,
    /// Per-parameter documentation, keyed by parameter name.
    pub params: BTreeMap<String, ParamDoc>,
    /// Declared raisable error names, in declaration order.
    pub raises: Vec<String>,
}

/// Documentation for a single parameter.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ParamDoc {
    pub text: Option<String>,
    /// Unparsed type spelling, e.g. `"int or str"`.
    pub type_token: Option<String>,
}

/// Field-list keyword after synonym folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Doctype {
    Param,
    Type,
    Raises,
    Other(String),
}

const PARAM_TYPES: &[&str] = &["param", "parameter", "arg", "argument", "key", "keyword"];
const TYPE_NAMES: &[&str] = &["type", "kwtype"];
const RAISES_NAMES: &[&str] = &["raises", "raise", "except", "exception"];

impl Doctype {
    pub fn canonical(word: &str) -> Doctype {
        if PARAM_TYPES.contains(&word) {
            Doctype::Param
        } else if TYPE_NAMES.contains(&word) {
            Doctype::Type
        } else if RAISES_NAMES.contains(&word) {
            Doctype::Raises
        } else {
            Doctype::Other(word.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Doctype::Param => "param",
            Doctype::Type => "type",
            Doctype::Raises => "raises",
            Doctype::Other(word) => word,
        }
    }
}

/// A block-level node, tagged with the (0-based) line of the canonical
/// text it starts on.
#[derive(Debug, Clone, PartialEq)]
pub struct DocBlock {
    pub line: usize,
    pub kind: BlockKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph(Vec<InlineSpan>),
    BulletList {
        bullet: char,
        items: Vec<ListItem>,
    },
    EnumeratedList {
        sequence: Sequence,
        format: EnumFormat,
        start: usize,
        items: Vec<ListItem>,
    },
    /// Verbatim text introduced by `::`.
    LiteralBlock(String),
    /// `>>>` session, kept verbatim.
    DoctestBlock(String),
    BlockQuote(Vec<DocBlock>),
    FieldListEntry(Field),
    Rubric(Vec<InlineSpan>),
    Admonition {
        label: String,
        children: Vec<DocBlock>,
    },
    /// Comments, hyperlink targets and unsupported directives.
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub children: Vec<DocBlock>,
}

/// One `:doctype [type] name: body` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub doctype: Doctype,
    pub name: String,
    /// Inline type of a three-token `:param TYPE NAME:` header.
    pub type_token: Option<String>,
    pub body: Vec<DocBlock>,
}

/// Inline markup within paragraph text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineSpan {
    Text(String),
    /// `*text*`
    Emphasis(String),
    /// `**text**`
    Strong(String),
    /// `` `text` `` (default role)
    Reference(String),
    /// ``` ``text`` ```
    Literal(String),
    /// `` `text <uri>`_ ``
    Hyperlink { text: String, uri: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctype_synonyms_fold() {
        for word in ["param", "parameter", "arg", "argument", "key", "keyword"] {
            assert_eq!(Doctype::canonical(word), Doctype::Param);
        }
        assert_eq!(Doctype::canonical("kwtype"), Doctype::Type);
        assert_eq!(Doctype::canonical("raise"), Doctype::Raises);
        assert_eq!(
            Doctype::canonical("returns"),
            Doctype::Other("returns".to_string())
        );
    }
}
