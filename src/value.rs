//! Values produced by synthesized parsers.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A converted command-line value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    None,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Path(PathBuf),
    Slice(SliceValue),
    Enum {
        #[serde(rename = "type")]
        type_name: String,
        member: String,
    },
    /// A type built by passing the raw string to its constructor.
    Instance {
        #[serde(rename = "type")]
        type_name: String,
        arg: String,
    },
    Tuple(Vec<Value>),
    List(Vec<Value>),
    Record {
        #[serde(rename = "type")]
        type_name: String,
        fields: Vec<(String, Value)>,
    },
}

/// `start:stop:step`, each part optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SliceValue {
    pub start: Option<SliceBound>,
    pub stop: Option<SliceBound>,
    pub step: Option<SliceBound>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SliceBound {
    Int(i64),
    Str(String),
}

impl fmt::Display for SliceBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceBound::Int(n) => write!(f, "{}", n),
            SliceBound::Str(s) => write!(f, "'{}'", s),
        }
    }
}

impl fmt::Display for SliceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |b: &Option<SliceBound>| b.as_ref().map_or("None".to_string(), |b| b.to_string());
        write!(
            f,
            "slice({}, {}, {})",
            part(&self.start),
            part(&self.stop),
            part(&self.step)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_json() {
        let value = Value::Tuple(vec![
            Value::Int(1),
            Value::Str("x".to_string()),
            Value::None,
        ]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[1,"x",null]"#);
    }

    #[test]
    fn enum_members_carry_their_type() {
        let value = Value::Enum {
            type_name: "Color".to_string(),
            member: "RED".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"type":"Color","member":"RED"}"#
        );
    }

    #[test]
    fn slice_display() {
        let slice = SliceValue {
            start: Some(SliceBound::Int(1)),
            stop: None,
            step: Some(SliceBound::Int(-2)),
        };
        assert_eq!(slice.to_string(), "slice(1, None, -2)");
    }
}
