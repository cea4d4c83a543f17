//! Markup parser: canonical field-list text into a `DocBlock` tree.
//!
//! Recursive descent over lines. Every nested body (list item, field body,
//! block quote, directive content) is dedented and parsed again with the
//! same rules, keeping the source 0-based line numbers so the extractor
//! can reconstruct blank-line spacing.

pub mod inline;

use crate::enumerator::{Marker, Sequence};
use crate::error::{Error, Result};
use crate::model::*;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_DIRECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9][\w:.+-]*?)::(?:\s+(.*))?$").unwrap());

static RE_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([*+-])(?:\s+|$)").unwrap());

// -- Configuration ------------------------------------------------------------

/// Roles rendered as their plain text content.
const PASSTHROUGH_ROLES: &[&str] = &[
    "abbr",
    "command",
    "dfn",
    "file",
    "guilabel",
    "kbd",
    "mailheader",
    "makevar",
    "manpage",
    "menuselection",
    "mimetype",
    "newsgroup",
    "program",
    "regexp",
    "samp",
    "pep",
    "rfc",
    "py:mod",
    "py:func",
    "py:data",
    "py:const",
    "py:class",
    "py:meth",
    "py:attr",
    "py:exc",
    "py:obj",
];

const ADMONITIONS: &[&str] = &[
    "attention",
    "caution",
    "danger",
    "error",
    "hint",
    "important",
    "note",
    "tip",
    "todo",
    "warning",
    "seealso",
];

/// Static markup configuration, fixed for the lifetime of a parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupConfig {
    /// Interpreted-text roles whose content passes through as plain text.
    pub roles: BTreeSet<String>,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        let mut roles = BTreeSet::new();
        for role in PASSTHROUGH_ROLES {
            roles.insert(role.to_string());
            if let Some((_, short)) = role.split_once(':') {
                roles.insert(short.to_string());
            }
        }
        MarkupConfig { roles }
    }
}

// -- Lines --------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Line {
    no: usize,
    text: String,
}

fn is_blank(line: &Line) -> bool {
    line.text.trim().is_empty()
}

fn indent_of(s: &str) -> usize {
    s.chars().take_while(|c| c.is_whitespace()).count()
}

fn strip_indent(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[i..],
        None => "",
    }
}

/// End of the indented run starting at `from` (blank lines included,
/// trailing blank lines excluded).
fn indented_end(lines: &[Line], from: usize) -> usize {
    let mut end = from;
    while end < lines.len() && (is_blank(&lines[end]) || indent_of(&lines[end].text) > 0) {
        end += 1;
    }
    while end > from && is_blank(&lines[end - 1]) {
        end -= 1;
    }
    end
}

/// Remove the common indentation of the non-blank lines.
fn dedent(lines: &[Line]) -> Vec<Line> {
    let common = lines
        .iter()
        .filter(|l| !is_blank(l))
        .map(|l| indent_of(&l.text))
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| Line {
            no: l.no,
            text: strip_indent(&l.text, common).trim_end().to_string(),
        })
        .collect()
}

/// The first line's remaining text followed by the dedented continuation.
fn body_lines(first: Option<Line>, rest: &[Line]) -> Vec<Line> {
    let mut body: Vec<Line> = first.into_iter().filter(|l| !is_blank(l)).collect();
    body.extend(dedent(rest));
    body
}

/// `:name: rest` at the start of a line; the closing colon must not be
/// escaped and must be followed by whitespace or the end of the line.
fn field_marker(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_prefix(':')?;
    if inner.starts_with(char::is_whitespace) || inner.starts_with(':') {
        return None;
    }
    let mut prev = ':';
    for (i, c) in inner.char_indices() {
        if c == ':' && prev != '\\' {
            let after = &inner[i + 1..];
            if after.is_empty() || after.starts_with(char::is_whitespace) {
                let name = &inner[..i];
                if name.ends_with(char::is_whitespace) {
                    return None;
                }
                return Some((name, after.trim_start()));
            }
        }
        prev = c;
    }
    None
}

// -- Public API ---------------------------------------------------------------

/// Parse canonical markup into blocks.
pub fn parse(text: &str, config: &MarkupConfig) -> Result<Vec<DocBlock>> {
    let lines: Vec<Line> = text
        .lines()
        .enumerate()
        .map(|(no, text)| Line {
            no,
            text: text.trim_end().to_string(),
        })
        .collect();
    Parser { config }.blocks(&lines)
}

struct Parser<'a> {
    config: &'a MarkupConfig,
}

impl Parser<'_> {
    fn blocks(&self, lines: &[Line]) -> Result<Vec<DocBlock>> {
        let mut blocks = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            if is_blank(&lines[i]) {
                i += 1;
                continue;
            }
            i = self.block(lines, i, &mut blocks)?;
        }
        Ok(blocks)
    }

    /// Parse the block starting at `i`; returns the index after it.
    fn block(&self, lines: &[Line], i: usize, out: &mut Vec<DocBlock>) -> Result<usize> {
        let line = &lines[i];
        if indent_of(&line.text) > 0 {
            let end = indented_end(lines, i);
            out.push(DocBlock {
                line: line.no,
                kind: BlockKind::BlockQuote(self.blocks(&dedent(&lines[i..end]))?),
            });
            return Ok(end);
        }

        let text = line.text.as_str();
        if text == ".." || text.starts_with(".. ") {
            return self.explicit(lines, i, out);
        }
        if let Some((name, rest)) = field_marker(text) {
            return self.field(lines, i, name, rest, out);
        }
        if let Some(caps) = RE_BULLET.captures(text) {
            let bullet = caps[1].chars().next().unwrap_or('-');
            return self.bullet_list(lines, i, bullet, out);
        }
        if let Some(marker) = Marker::parse(text) {
            if let Some((sequence, start)) = marker.first_item() {
                if self.starts_list(lines, i, &marker, sequence, start) {
                    return self.enumerated_list(lines, i, marker, sequence, start, out);
                }
            }
        }
        self.paragraph(lines, i, out)
    }

    fn paragraph(&self, lines: &[Line], i: usize, out: &mut Vec<DocBlock>) -> Result<usize> {
        let mut end = i;
        while end < lines.len() && !is_blank(&lines[end]) {
            end += 1;
        }
        let start = lines[i].no;

        if lines[i].text.starts_with(">>>") {
            let session: Vec<&str> = lines[i..end].iter().map(|l| l.text.as_str()).collect();
            out.push(DocBlock {
                line: start,
                kind: BlockKind::DoctestBlock(session.join("\n")),
            });
            return Ok(end);
        }

        let joined = lines[i..end]
            .iter()
            .map(|l| l.text.trim())
            .collect::<Vec<_>>()
            .join("\n");

        let (text, literal) = match joined.strip_suffix("::") {
            Some(head) if head.is_empty() => (String::new(), true),
            Some(head) if head.ends_with(char::is_whitespace) => (head.trim_end().to_string(), true),
            Some(head) => (format!("{}:", head), true),
            None => (joined, false),
        };
        if !text.is_empty() {
            out.push(DocBlock {
                line: start,
                kind: BlockKind::Paragraph(inline::parse_inline(&text, &self.config.roles)?),
            });
        }
        if !literal {
            return Ok(end);
        }

        let mut next = end;
        while next < lines.len() && is_blank(&lines[next]) {
            next += 1;
        }
        if next < lines.len() && indent_of(&lines[next].text) > 0 {
            let literal_end = indented_end(lines, next);
            let body: Vec<String> = dedent(&lines[next..literal_end])
                .into_iter()
                .map(|l| l.text)
                .collect();
            out.push(DocBlock {
                line: lines[next].no,
                kind: BlockKind::LiteralBlock(body.join("\n")),
            });
            return Ok(literal_end);
        }
        Ok(end)
    }

    /// `..` comments, `.. _targets:` and `.. name:: directives`.
    fn explicit(&self, lines: &[Line], i: usize, out: &mut Vec<DocBlock>) -> Result<usize> {
        let line = &lines[i];
        let rest = line.text[2..].trim_start();
        let end = indented_end(lines, i + 1);
        let following = &lines[i + 1..end];

        let Some(caps) = RE_DIRECTIVE.captures(rest) else {
            let raw = lines[i..end]
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            out.push(DocBlock {
                line: line.no,
                kind: BlockKind::Comment(raw),
            });
            return Ok(end);
        };

        let name = caps[1].to_lowercase();
        let argument = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        let kind = match name.as_str() {
            "rubric" => BlockKind::Rubric(inline::parse_inline(argument, &self.config.roles)?),
            "code" | "code-block" | "sourcecode" => {
                let body = dedent(following);
                let code: Vec<String> = body
                    .into_iter()
                    .skip_while(|l| field_marker(&l.text).is_some())
                    .skip_while(is_blank)
                    .map(|l| l.text)
                    .collect();
                BlockKind::LiteralBlock(code.join("\n"))
            }
            "admonition" => BlockKind::Admonition {
                label: argument.to_string(),
                children: self.blocks(&dedent(following))?,
            },
            _ if ADMONITIONS.contains(&name.as_str()) => {
                let first = Line {
                    no: line.no,
                    text: argument.to_string(),
                };
                let label = if name == "seealso" {
                    "see also".to_string()
                } else {
                    name.clone()
                };
                BlockKind::Admonition {
                    label,
                    children: self.blocks(&body_lines(Some(first), following))?,
                }
            }
            _ => {
                if name != "index" {
                    tracing::warn!(directive = %name, line = line.no + 1, "skipping unsupported directive");
                }
                BlockKind::Comment(line.text.clone())
            }
        };
        out.push(DocBlock {
            line: line.no,
            kind,
        });
        Ok(end)
    }

    fn field(
        &self,
        lines: &[Line],
        i: usize,
        header: &str,
        rest: &str,
        out: &mut Vec<DocBlock>,
    ) -> Result<usize> {
        let end = indented_end(lines, i + 1);
        let tokens: Vec<&str> = header.split_whitespace().collect();
        let (doctype, type_token, name) = match tokens.as_slice() {
            [doctype, name] => (Doctype::canonical(doctype), None, *name),
            [doctype, type_token, name] => {
                let doctype = Doctype::canonical(doctype);
                if doctype != Doctype::Param {
                    return Ok(end);
                }
                (doctype, Some(type_token.to_string()), *name)
            }
            _ => {
                tracing::debug!("{}", Error::MalformedField(header.to_string()));
                return Ok(end);
            }
        };

        let first = Line {
            no: lines[i].no,
            text: rest.to_string(),
        };
        let body = self.blocks(&body_lines(Some(first), &lines[i + 1..end]))?;
        out.push(DocBlock {
            line: lines[i].no,
            kind: BlockKind::FieldListEntry(Field {
                doctype,
                name: unescape_name(name),
                type_token,
                body,
            }),
        });
        Ok(end)
    }

    /// Body of a list item whose text starts at `offset` on line `i`.
    fn item(&self, lines: &[Line], i: usize, offset: usize) -> Result<(ListItem, usize)> {
        let end = indented_end(lines, i + 1);
        let first = Line {
            no: lines[i].no,
            text: strip_indent(&lines[i].text, offset).to_string(),
        };
        let children = self.blocks(&body_lines(Some(first), &lines[i + 1..end]))?;
        Ok((ListItem { children }, end))
    }

    fn bullet_list(
        &self,
        lines: &[Line],
        mut i: usize,
        bullet: char,
        out: &mut Vec<DocBlock>,
    ) -> Result<usize> {
        let start = lines[i].no;
        let mut items = Vec::new();
        loop {
            let offset = bullet_offset(&lines[i].text);
            let (item, end) = self.item(lines, i, offset)?;
            items.push(item);
            i = end;
            match next_nonblank(lines, i) {
                Some(next) if bullet_of(&lines[next].text) == Some(bullet) => i = next,
                _ => break,
            }
        }
        out.push(DocBlock {
            line: start,
            kind: BlockKind::BulletList { bullet, items },
        });
        Ok(i)
    }

    /// A lone enumerator followed directly by an unindented line that is not
    /// another item is ordinary paragraph text.
    fn starts_list(
        &self,
        lines: &[Line],
        i: usize,
        marker: &Marker,
        sequence: Sequence,
        start: usize,
    ) -> bool {
        match lines.get(i + 1) {
            None => true,
            Some(next) if is_blank(next) || indent_of(&next.text) > 0 => true,
            Some(next) => Marker::parse(&next.text)
                .filter(|m| m.format == marker.format)
                .is_some_and(|m| continues(&m, marker, sequence, start + 1)),
        }
    }

    fn enumerated_list(
        &self,
        lines: &[Line],
        mut i: usize,
        first: Marker,
        sequence: Sequence,
        start: usize,
        out: &mut Vec<DocBlock>,
    ) -> Result<usize> {
        let line = lines[i].no;
        let mut items = Vec::new();
        let mut marker = first.clone();
        loop {
            let (item, end) = self.item(lines, i, marker.text_offset)?;
            items.push(item);
            i = end;
            let expected = start + items.len();
            let Some(next) = next_nonblank(lines, i) else {
                break;
            };
            match Marker::parse(&lines[next].text) {
                Some(m)
                    if m.format == first.format && continues(&m, &first, sequence, expected) =>
                {
                    marker = m;
                    i = next;
                }
                _ => break,
            }
        }
        out.push(DocBlock {
            line,
            kind: BlockKind::EnumeratedList {
                sequence,
                format: first.format,
                start,
                items,
            },
        });
        Ok(i)
    }
}

fn next_nonblank(lines: &[Line], from: usize) -> Option<usize> {
    (from..lines.len()).find(|&j| !is_blank(&lines[j]))
}

fn bullet_of(text: &str) -> Option<char> {
    RE_BULLET
        .captures(text)
        .and_then(|caps| caps[1].chars().next())
}

fn bullet_offset(text: &str) -> usize {
    let after = text.chars().skip(1).take_while(|c| c.is_whitespace()).count();
    if text.chars().count() == 1 {
        2
    } else {
        1 + after
    }
}

/// Whether `marker` is item number `expected` of a list that began with `first`.
fn continues(marker: &Marker, first: &Marker, sequence: Sequence, expected: usize) -> bool {
    if first.is_auto() {
        return marker.is_auto();
    }
    marker.continuing(sequence) == Some(expected)
}

/// `\*args` → `args`
fn unescape_name(name: &str) -> String {
    name.replace('\\', "").trim_start_matches('*').to_string()
}
