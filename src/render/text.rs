//! Plain-text renderer for terminals.

use crate::render::Renderer;
use argdoc::extract::{BOLD, ITALIC, RESET, UNDERLINE};
use argdoc::ParsedDoc;

pub struct TextRenderer {
    /// Strip the inline display markers.
    pub plain: bool,
}

impl Renderer for TextRenderer {
    fn render(&self, _source: &str, doc: &ParsedDoc) -> String {
        let mut sections = Vec::new();
        if !doc.description.is_empty() {
            sections.push(doc.description.clone());
        }

        if !doc.params.is_empty() {
            let mut section = String::from("Parameters:");
            for (name, param) in &doc.params {
                section.push_str("\n  ");
                section.push_str(name);
                if let Some(ref type_token) = param.type_token {
                    section.push_str(&format!(" ({})", type_token));
                }
                if let Some(ref text) = param.text {
                    for line in text.lines() {
                        section.push('\n');
                        if !line.is_empty() {
                            section.push_str("      ");
                            section.push_str(line);
                        }
                    }
                }
            }
            sections.push(section);
        }

        if !doc.raises.is_empty() {
            sections.push(format!("Raises:\n  {}", doc.raises.join("\n  ")));
        }

        let mut out = sections.join("\n\n");
        if self.plain {
            out = strip_markers(&out);
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

fn strip_markers(s: &str) -> String {
    [ITALIC, BOLD, UNDERLINE, RESET]
        .iter()
        .fold(s.to_string(), |acc, marker| acc.replace(marker, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use argdoc::DocParser;

    fn render(text: &str, plain: bool) -> String {
        let doc = DocParser::default().parse(Some(text)).unwrap();
        TextRenderer { plain }.render("-", &doc)
    }

    #[test]
    fn sections_in_order() {
        let out = render(
            "Copy files.\n\n:param str src: Where from.\n:raises OSError: On failure.",
            false,
        );
        assert_eq!(
            out,
            "Copy files.\n\nParameters:\n  src (str)\n      Where from.\n\nRaises:\n  OSError\n"
        );
    }

    #[test]
    fn plain_mode_drops_markers() {
        assert_eq!(render("Use *this*.", true), "Use this.\n");
        assert_eq!(render("Use *this*.", false), format!("Use {ITALIC}this{RESET}.\n"));
    }

    #[test]
    fn empty_doc_renders_nothing() {
        assert_eq!(render("", false), "");
    }
}
