//! JSON renderer: structured output for tooling integration.
//!
//! One object per line (JSON Lines): the source name plus the serialized
//! `ParsedDoc`.

use crate::render::Renderer;
use argdoc::ParsedDoc;
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct Entry<'a> {
    source: &'a str,
    #[serde(flatten)]
    doc: &'a ParsedDoc,
}

impl Renderer for JsonRenderer {
    fn render(&self, source: &str, doc: &ParsedDoc) -> String {
        let entry = Entry { source, doc };
        // Serializing plain strings and maps cannot fail.
        let mut out = serde_json::to_string(&entry).unwrap_or_default();
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argdoc::ParamDoc;

    #[test]
    fn params_are_keyed_by_name() {
        let mut doc = ParsedDoc {
            summary: "Do it.".to_string(),
            description: "Do it.".to_string(),
            ..ParsedDoc::default()
        };
        doc.params.insert(
            "foo".to_string(),
            ParamDoc {
                text: Some("bar".to_string()),
                type_token: None,
            },
        );
        let out = JsonRenderer.render("-", &doc);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["source"], "-");
        assert_eq!(value["params"]["foo"]["text"], "bar");
        assert!(value["params"]["foo"]["type_token"].is_null());
        assert_eq!(value["raises"], serde_json::json!([]));
    }
}
