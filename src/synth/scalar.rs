//! Built-in scalar parsers.

use super::ScalarFn;
use crate::types::Builtin;
use crate::value::{SliceBound, SliceValue, Value};
use std::path::PathBuf;
use std::sync::Arc;

const TRUE_TOKENS: &[&str] = &["t", "true", "1"];
const FALSE_TOKENS: &[&str] = &["f", "false", "0"];

/// Parser for a built-in type, and whether it accepts every string.
pub(super) fn builtin(builtin: Builtin) -> Option<(ScalarFn, bool)> {
    let parser: (ScalarFn, bool) = match builtin {
        Builtin::Str => (scalar(|s| Some(Value::Str(s.to_string()))), true),
        Builtin::Path => (scalar(|s| Some(Value::Path(PathBuf::from(s)))), true),
        Builtin::Int => (scalar(|s| parse_int(s).map(Value::Int)), false),
        Builtin::Float => (scalar(|s| parse_float(s).map(Value::Float)), false),
        Builtin::Bool => (scalar(|s| parse_bool(s).map(Value::Bool)), false),
        Builtin::Slice => (scalar(|s| parse_slice(s).map(Value::Slice)), false),
        // No string converts to None unless an override says otherwise.
        Builtin::NoneType => (scalar(|_| None), false),
        Builtin::List => return None,
    };
    Some(parser)
}

fn scalar<F>(parse: F) -> ScalarFn
where
    F: Fn(&str) -> Option<Value> + Send + Sync + 'static,
{
    Arc::new(parse)
}

pub fn parse_bool(s: &str) -> Option<bool> {
    let lower = s.to_lowercase();
    if TRUE_TOKENS.contains(&lower.as_str()) {
        Some(true)
    } else if FALSE_TOKENS.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}

pub fn parse_int(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

pub fn parse_float(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}

/// `start:stop:step` with each part an integer, a quoted string, `None`
/// or empty. At least one colon is required.
pub fn parse_slice(s: &str) -> Option<SliceValue> {
    let parts = split_slice(s)?;
    if !(2..=3).contains(&parts.len()) {
        return None;
    }
    let mut bounds = parts
        .iter()
        .map(|part| slice_bound(part.trim()))
        .collect::<Option<Vec<_>>>()?
        .into_iter();
    Some(SliceValue {
        start: bounds.next().flatten(),
        stop: bounds.next().flatten(),
        step: bounds.next().flatten(),
    })
}

/// Split on colons outside quotes.
fn split_slice(s: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ':') => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if quote.is_some() {
        return None;
    }
    parts.push(&s[start..]);
    Some(parts)
}

/// `Some(None)` is an omitted bound; `None` is a syntax error.
fn slice_bound(part: &str) -> Option<Option<SliceBound>> {
    if part.is_empty() || part == "None" {
        return Some(None);
    }
    for quote in ['\'', '"'] {
        if let Some(inner) = part
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return Some(Some(SliceBound::Str(inner.to_string())));
        }
    }
    parse_int(part).map(|n| Some(SliceBound::Int(n)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_tokens_are_case_insensitive() {
        for token in ["t", "TRUE", "True", "1"] {
            assert_eq!(parse_bool(token), Some(true), "{token}");
        }
        for token in ["F", "false", "0"] {
            assert_eq!(parse_bool(token), Some(false), "{token}");
        }
        assert_eq!(parse_bool("yes"), None);
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_int(" 42 "), Some(42));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("4.5"), None);
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float("x"), None);
    }

    #[test]
    fn slices() {
        assert_eq!(
            parse_slice("1:10:2"),
            Some(SliceValue {
                start: Some(SliceBound::Int(1)),
                stop: Some(SliceBound::Int(10)),
                step: Some(SliceBound::Int(2)),
            })
        );
        assert_eq!(
            parse_slice(":-1"),
            Some(SliceValue {
                start: None,
                stop: Some(SliceBound::Int(-1)),
                step: None,
            })
        );
        assert_eq!(
            parse_slice("'a:b':"),
            Some(SliceValue {
                start: Some(SliceBound::Str("a:b".to_string())),
                stop: None,
                step: None,
            })
        );
        assert_eq!(parse_slice("3"), None);
        assert_eq!(parse_slice("1:2:3:4"), None);
        assert_eq!(parse_slice("a:b"), None);
    }

    #[test]
    fn none_never_parses() {
        let (parse, infallible) = builtin(Builtin::NoneType).unwrap();
        assert!(parse("None").is_none());
        assert!(!infallible);
        assert!(builtin(Builtin::List).is_none());
    }
}
