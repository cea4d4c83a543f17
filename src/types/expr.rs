//! Docstring type-expression grammar.
//!
//! ```text
//! expr    := alt (" or " alt)*
//! alt     := primary ("|" primary)*
//! primary := "None" | NAME ("[" args "]")?
//! args    := arg ("," arg)*
//! arg     := "..." | literal | alt
//! ```
//!
//! Generic names are interpreted here (`list`, `Sequence`, `Iterable`,
//! `Collection`, `tuple`, `Optional`, `Union`, `Literal`, with or without a
//! `typing.` prefix); every other name stays a [`TypeHint::Named`] for the
//! namespace to resolve.

use super::{Literal, TypeHint};
use crate::error::{Error, Result};

const LIST_LIKE: &[&str] = &["list", "List", "Sequence", "Iterable", "Collection"];

/// Parse a docstring type token such as `"int or str"` or `"list[float]"`.
pub fn parse_type_expr(expr: &str) -> Result<TypeHint> {
    let members = split_or(expr)
        .into_iter()
        .map(|part| {
            let mut cursor = Cursor::new(expr, part);
            let hint = cursor.alt()?;
            cursor.skip_ws();
            if !cursor.at_end() {
                return Err(cursor.error("unexpected trailing input"));
            }
            Ok(hint)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(TypeHint::union(members))
}

/// Split on ` or ` outside brackets.
fn split_or(expr: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = expr.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'[' => depth += 1,
            b']' => depth = depth.saturating_sub(1),
            b' ' if depth == 0 && expr[i..].starts_with(" or ") => {
                parts.push(&expr[start..i]);
                i += 4;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&expr[start..]);
    parts
}

enum Arg {
    Type(TypeHint),
    Literal(Literal),
    Ellipsis,
}

struct Cursor<'a> {
    /// The whole token, for error messages.
    expr: &'a str,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(expr: &'a str, part: &'a str) -> Self {
        Cursor { expr, rest: part }
    }

    fn error(&self, reason: &str) -> Error {
        Error::InvalidTypeExpression {
            expr: self.expr.to_string(),
            reason: reason.to_string(),
        }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn at_end(&self) -> bool {
        self.rest.is_empty()
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, token: &str) -> Result<()> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", token)))
        }
    }

    fn alt(&mut self) -> Result<TypeHint> {
        let mut members = vec![self.primary()?];
        while self.eat("|") {
            members.push(self.primary()?);
        }
        Ok(TypeHint::union(members))
    }

    fn name(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let first = self.rest.chars().next()?;
        if !(first.is_alphabetic() || first == '_') {
            return None;
        }
        let end = self
            .rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(self.rest.len());
        let (name, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(name)
    }

    fn primary(&mut self) -> Result<TypeHint> {
        let Some(name) = self.name() else {
            return Err(self.error("expected a type name"));
        };
        if name == "None" || name == "NoneType" {
            return Ok(TypeHint::NoneType);
        }
        if !self.eat("[") {
            return Ok(TypeHint::Named(name.to_string()));
        }
        let mut args = vec![self.arg()?];
        while self.eat(",") {
            args.push(self.arg()?);
        }
        self.expect("]")?;
        self.generic(name, args)
    }

    fn arg(&mut self) -> Result<Arg> {
        self.skip_ws();
        if self.eat("...") {
            return Ok(Arg::Ellipsis);
        }
        if let Some(literal) = self.literal()? {
            return Ok(Arg::Literal(literal));
        }
        Ok(Arg::Type(self.alt()?))
    }

    fn literal(&mut self) -> Result<Option<Literal>> {
        let rest = self.rest;
        if let Some(quote) = rest.chars().next().filter(|c| *c == '\'' || *c == '"') {
            let body = &rest[1..];
            let Some(end) = body.find(quote) else {
                return Err(self.error("unterminated string literal"));
            };
            self.rest = &body[end + 1..];
            return Ok(Some(Literal::Str(body[..end].to_string())));
        }
        let digits = rest
            .char_indices()
            .take_while(|&(i, c)| c.is_ascii_digit() || (i == 0 && c == '-'))
            .count();
        if digits > 0 && rest[..digits].chars().any(|c| c.is_ascii_digit()) {
            let value = rest[..digits]
                .parse()
                .map_err(|_| self.error("integer literal out of range"))?;
            self.rest = &rest[digits..];
            return Ok(Some(Literal::Int(value)));
        }
        for (word, value) in [("True", true), ("False", false)] {
            if let Some(after) = rest.strip_prefix(word) {
                if !after.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
                    self.rest = after;
                    return Ok(Some(Literal::Bool(value)));
                }
            }
        }
        Ok(None)
    }

    fn generic(&self, name: &str, args: Vec<Arg>) -> Result<TypeHint> {
        let base = name.strip_prefix("typing.").unwrap_or(name);
        if base == "Literal" {
            return args
                .into_iter()
                .map(|arg| match arg {
                    Arg::Literal(literal) => Ok(literal),
                    _ => Err(self.error("Literal[...] takes literal values")),
                })
                .collect::<Result<Vec<_>>>()
                .map(TypeHint::Literal);
        }
        if base == "tuple" || base == "Tuple" {
            if let [Arg::Type(elem), Arg::Ellipsis] = args.as_slice() {
                return Ok(TypeHint::VarTuple(Box::new(elem.clone())));
            }
            return self.types(args).map(TypeHint::Tuple);
        }
        let mut types = self.types(args)?;
        match base {
            _ if LIST_LIKE.contains(&base) => match types.len() {
                1 => Ok(TypeHint::List(Box::new(types.remove(0)))),
                _ => Err(self.error(&format!("{} takes exactly one argument", base))),
            },
            "Optional" => match types.len() {
                1 => Ok(TypeHint::optional(types.remove(0))),
                _ => Err(self.error("Optional takes exactly one argument")),
            },
            "Union" => Ok(TypeHint::union(types)),
            _ => Err(self.error(&format!("unsupported generic type {}", name))),
        }
    }

    fn types(&self, args: Vec<Arg>) -> Result<Vec<TypeHint>> {
        args.into_iter()
            .map(|arg| match arg {
                Arg::Type(hint) => Ok(hint),
                Arg::Ellipsis => Err(self.error("'...' is only allowed as tuple[T, ...]")),
                Arg::Literal(_) => Err(self.error("literal values need Literal[...]")),
            })
            .collect()
    }
}
