//! Extraction visitor: walks the block tree and builds a `ParsedDoc`.
//!
//! Prose is rebuilt as plain text. List items are prefixed with their bullet
//! or enumerator label, nested lists accumulate space-padded indentation, and
//! inline emphasis is kept as terminal display markers. Field-list entries
//! are pulled out into `params` and `raises` instead of being rendered.

use crate::enumerator;
use crate::error::{Error, Result};
use crate::model::*;
use std::collections::BTreeMap;

pub const ITALIC: &str = "\x1b[3m";
pub const BOLD: &str = "\x1b[1m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const RESET: &str = "\x1b[0m";

const QUOTE_INDENT: &str = "    ";

/// Build a `ParsedDoc` from parsed blocks.
pub fn extract(blocks: &[DocBlock]) -> Result<ParsedDoc> {
    let mut visitor = Extractor::default();
    visitor.walk(blocks)?;
    let (summary, description) = visitor.render();
    Ok(ParsedDoc {
        summary,
        description,
        params: visitor.params,
        raises: visitor.raises,
    })
}

/// One unit of output, tagged with its source line.
#[derive(Debug)]
enum Chunk {
    Text { line: usize, text: String },
    /// Comments and skipped directives: one extra newline.
    Skipped { line: usize },
    /// Field-list entries: no output, but they still bound the gap.
    Field { line: usize },
}

impl Chunk {
    fn line(&self) -> usize {
        match self {
            Chunk::Text { line, .. } | Chunk::Skipped { line } | Chunk::Field { line } => *line,
        }
    }
}

#[derive(Default)]
struct Extractor {
    chunks: Vec<Chunk>,
    params: BTreeMap<String, ParamDoc>,
    raises: Vec<String>,
    indent_stack: Vec<String>,
}

impl Extractor {
    fn walk(&mut self, blocks: &[DocBlock]) -> Result<()> {
        for block in blocks {
            self.block(block)?;
        }
        Ok(())
    }

    fn block(&mut self, block: &DocBlock) -> Result<()> {
        match &block.kind {
            BlockKind::Paragraph(spans) => self.push_text(block.line, render_spans(spans)),
            BlockKind::DoctestBlock(raw) => self.push_text(block.line, raw.clone()),
            BlockKind::LiteralBlock(raw) => {
                let text = format!("{}{}", QUOTE_INDENT, raw.replace('\n', "\n    "));
                self.chunks.push(Chunk::Text {
                    line: block.line,
                    text,
                });
            }
            BlockKind::BlockQuote(children) => {
                self.indent_stack.push(QUOTE_INDENT.to_string());
                self.walk(children)?;
                self.indent_stack.pop();
            }
            BlockKind::BulletList { bullet, items } => {
                for item in items {
                    self.indent_stack.push(format!("{} ", bullet));
                    self.walk(&item.children)?;
                    self.indent_stack.pop();
                }
            }
            BlockKind::EnumeratedList {
                sequence,
                format,
                start,
                items,
            } => {
                let labels = enumerator::labels(*sequence, *format, *start, items.len());
                for (item, label) in items.iter().zip(labels) {
                    self.indent_stack.push(label);
                    self.walk(&item.children)?;
                    self.indent_stack.pop();
                }
            }
            BlockKind::Rubric(spans) => {
                let title = render_spans(spans);
                let title = if is_title_case(&title) {
                    title.to_lowercase()
                } else {
                    title
                };
                self.push_text(block.line, format!("{}:", title));
            }
            BlockKind::Admonition { label, children } => {
                self.push_text(block.line, format!("{}:", label));
                self.indent_stack.push(QUOTE_INDENT.to_string());
                self.walk(children)?;
                self.indent_stack.pop();
            }
            BlockKind::FieldListEntry(field) => {
                self.field(field)?;
                self.chunks.push(Chunk::Field { line: block.line });
            }
            BlockKind::Comment(_) => self.chunks.push(Chunk::Skipped { line: block.line }),
        }
        Ok(())
    }

    /// Prefix with the current list markers; once used, markers turn into
    /// spaces so later paragraphs of the same item line up under the text.
    fn push_text(&mut self, line: usize, text: String) {
        let prefix = self.indent_stack.concat();
        for entry in self.indent_stack.iter_mut() {
            *entry = " ".repeat(entry.chars().count());
        }
        let hanging = format!("\n{}", self.indent_stack.concat());
        let text = format!("{}{}", prefix, text.replace('\n', &hanging));
        self.chunks.push(Chunk::Text { line, text });
    }

    fn field(&mut self, field: &Field) -> Result<()> {
        let name = &field.name;
        match field.doctype {
            Doctype::Param | Doctype::Type => {
                if let Some(type_token) = &field.type_token {
                    let doc = self.params.entry(name.clone()).or_default();
                    if doc.type_token.is_some() {
                        return Err(duplicate(&Doctype::Type, name));
                    }
                    doc.type_token = Some(type_token.clone());
                }
                let doc = self.params.entry(name.clone()).or_default();
                let slot = match field.doctype {
                    Doctype::Param => &mut doc.text,
                    _ => &mut doc.type_token,
                };
                if slot.is_some() {
                    return Err(duplicate(&field.doctype, name));
                }
                let mut body = Extractor::default();
                body.walk(&field.body)?;
                *slot = Some(body.render().1);
            }
            Doctype::Raises => self.raises.push(name.clone()),
            Doctype::Other(_) => {}
        }
        Ok(())
    }

    /// Join chunks, rebuilding the blank-line structure from line numbers.
    /// Returns the summary (first text chunk) and the full description.
    fn render(&self) -> (String, String) {
        let mut out = String::new();
        let mut summary = None;
        for (i, chunk) in self.chunks.iter().enumerate() {
            match chunk {
                Chunk::Text { line, text } => {
                    if summary.is_none() {
                        summary = Some(text.clone());
                    }
                    out.push_str(text);
                    if let Some(next) = self.chunks.get(i + 1) {
                        let internal = text.matches('\n').count() as isize;
                        let gap = (next.line() as isize - *line as isize - internal).clamp(1, 2);
                        out.push_str(&"\n".repeat(gap as usize));
                    }
                }
                Chunk::Skipped { .. } => out.push('\n'),
                Chunk::Field { .. } => {}
            }
        }
        (
            summary.unwrap_or_default(),
            out.trim_matches('\n').to_string(),
        )
    }
}

fn duplicate(doctype: &Doctype, name: &str) -> Error {
    Error::DuplicateField {
        doctype: doctype.as_str().to_string(),
        name: name.to_string(),
    }
}

fn render_spans(spans: &[InlineSpan]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            InlineSpan::Text(text) | InlineSpan::Literal(text) => out.push_str(text),
            InlineSpan::Emphasis(text) => out.push_str(&format!("{}{}{}", ITALIC, text, RESET)),
            InlineSpan::Strong(text) => out.push_str(&format!("{}{}{}", BOLD, text, RESET)),
            InlineSpan::Reference(text) => {
                out.push_str(&format!("{}{}{}", UNDERLINE, text, RESET))
            }
            InlineSpan::Hyperlink { text, uri } => out.push_str(&format!("{} ({})", text, uri)),
        }
    }
    out
}

/// Every run of letters starts upper-case and continues lower-case.
fn is_title_case(s: &str) -> bool {
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            let ok = if prev_letter {
                !c.is_uppercase()
            } else {
                !c.is_lowercase()
            };
            if !ok {
                return false;
            }
        }
        prev_letter = c.is_alphabetic();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{self, MarkupConfig};

    fn run(text: &str) -> Result<ParsedDoc> {
        extract(&parser::parse(text, &MarkupConfig::default())?)
    }

    #[test]
    fn field_list_params_and_raises() {
        let doc = run(":param int foo: bar\n:raises ValueError:").unwrap();
        assert_eq!(doc.params.len(), 1);
        assert_eq!(
            doc.params["foo"],
            ParamDoc {
                text: Some("bar".to_string()),
                type_token: Some("int".to_string()),
            }
        );
        assert_eq!(doc.raises, vec!["ValueError".to_string()]);
        assert_eq!(doc.description, "");
    }

    #[test]
    fn separate_type_field() {
        let doc = run("Do it.\n\n:param foo: the foo\n:type foo: list[int]").unwrap();
        assert_eq!(doc.description, "Do it.");
        assert_eq!(doc.summary, "Do it.");
        assert_eq!(doc.params["foo"].type_token.as_deref(), Some("list[int]"));
    }

    #[test]
    fn duplicate_declarations_fail() {
        let err = run(":param foo: a\n:param foo: b").unwrap_err();
        assert_eq!(err.to_string(), "param defined twice for foo");
        let err = run(":param int foo: a\n:type foo: int").unwrap_err();
        assert_eq!(err.to_string(), "type defined twice for foo");
    }

    #[test]
    fn lists_are_prefixed_and_spaced() {
        let doc = run("Intro.\n\n- one\n- two\n\n(i) first\n(ii) second\n\nEnd.").unwrap();
        assert_eq!(
            doc.description,
            "Intro.\n\n- one\n- two\n\n(i)  first\n(ii) second\n\nEnd."
        );
    }

    #[test]
    fn nested_lists_indent_under_parent_text() {
        let doc = run("- a\n  continued\n\n  - b\n  - c").unwrap();
        assert_eq!(doc.description, "- a\n  continued\n\n  - b\n  - c");
    }

    #[test]
    fn literal_blocks_are_indented() {
        let doc = run("Run::\n\n  $ prog --x\n\nDone.").unwrap();
        assert_eq!(doc.description, "Run:\n\n    $ prog --x\n\nDone.");
    }

    #[test]
    fn inline_markup_becomes_display_markers() {
        let doc = run("a *b* **c** `d` ``e``").unwrap();
        assert_eq!(
            doc.description,
            format!("a {ITALIC}b{RESET} {BOLD}c{RESET} {UNDERLINE}d{RESET} e")
        );
    }

    #[test]
    fn hyperlinks_show_their_target() {
        let doc = run("See `docs <https://example.org>`_.").unwrap();
        assert_eq!(doc.description, "See docs (https://example.org).");
    }

    #[test]
    fn rubric_is_lowercased_with_colon() {
        let doc = run(".. rubric:: Examples\n\nText.").unwrap();
        assert_eq!(doc.description, "examples:\n\nText.");
        let doc = run(".. rubric:: See HTTP").unwrap();
        assert_eq!(doc.description, "See HTTP:");
    }

    #[test]
    fn comments_leave_an_extra_blank_line() {
        let doc = run("One.\n\n.. hidden\n\nTwo.").unwrap();
        assert_eq!(doc.description, "One.\n\n\nTwo.");
    }

    #[test]
    fn field_body_keeps_its_own_structure() {
        let doc = run(":param foo: Choose one:\n\n    - a\n    - b").unwrap();
        assert_eq!(
            doc.params["foo"].text.as_deref(),
            Some("Choose one:\n\n- a\n- b")
        );
    }

    #[test]
    fn admonition_label_precedes_body() {
        let doc = run(".. note:: Mind the gap.").unwrap();
        assert_eq!(doc.description, "note:\n    Mind the gap.");
    }
}
