//! Style normalizer: header-based docstring conventions to field lists.
//!
//! Two passes run over the cleaned text, one per convention. Each pass is a
//! line-consuming state machine: recognized section headers hand their body
//! to a section consumer (see [`sections`]) that re-emits it as canonical
//! `:param NAME: TEXT` / `:type NAME: TYPE` / `:raises NAME:` entries,
//! rubrics or admonition directives. Everything else passes through
//! untouched; an unrecognized header is just prose.
//!
//! Google style:
//!
//! ```text
//! Args:
//!     foo (int): The foo.
//! ```
//!
//! NumPy style:
//!
//! ```text
//! Parameters
//! ----------
//! foo : int
//!     The foo.
//! ```

mod sections;

use regex::Regex;
use std::collections::VecDeque;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\.\. \S+::").unwrap());

static RE_GOOGLE_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s|\w)+:\s*$").unwrap());

static RE_GOOGLE_TYPED_ARG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(.+?)\s*\(\s*(.*[^\s]+)\s*\)").unwrap());

static RE_NUMPY_UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^[=\-`:'"~^_*+#<>]{2,}\s*$"#).unwrap());

// `:role:`target`` cross references; colons inside them never split a field.
static RE_XREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(:(?:[a-zA-Z0-9]+[\-_+:.])*[a-zA-Z0-9]+:`.+?`)").unwrap());

static RE_BULLET_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\*|\+|\-)(\s+\S|\s*$)").unwrap());

static RE_ENUMERATED_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:\((?:\d+|#|[ivxlcdm]+|[IVXLCDM]+|[a-zA-Z])\)",
        r"|(?:\d+|#|[ivxlcdm]+|[IVXLCDM]+|[a-zA-Z])\.)",
        r"(\s+\S|\s*$)"
    ))
    .unwrap()
});

// `:role:`name`` or a bare dotted name, at the start of a line.
static RE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?::(?P<role>\w+):`(?P<name>[a-zA-Z0-9_.-]+)`|(?P<name2>[a-zA-Z0-9_.-]+))\s*")
        .unwrap()
});

// -- Public API ---------------------------------------------------------------

/// Which header conventions to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeConfig {
    pub google: bool,
    pub numpy: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        NormalizeConfig {
            google: true,
            numpy: true,
        }
    }
}

/// Clean up docstring indentation: expand tabs, strip the first line's
/// leading whitespace, remove the common margin of the remaining lines, and
/// drop leading and trailing blank lines.
///
/// When the first line is a Google-style section header whose body sits at
/// the margin, the body keeps its indentation so the section is still
/// recognized.
pub fn cleandoc(raw: &str) -> String {
    let mut lines: Vec<String> = raw
        .split('\n')
        .map(|l| {
            let l = expand_tabs(l);
            if l.trim().is_empty() {
                String::new()
            } else {
                l
            }
        })
        .collect();
    if let Some(first) = lines.first_mut() {
        *first = first.trim_start().to_string();
    }
    let body_indent = lines.iter().skip(1).find(|l| !l.is_empty()).map(|l| get_indent(l));
    let mut margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.is_empty())
        .map(|l| get_indent(l))
        .min();
    if lines.first().is_some_and(|l| is_google_header(l)) && body_indent == margin {
        margin = None;
    }
    if let Some(margin) = margin {
        for line in lines.iter_mut().skip(1) {
            *line = skip_chars(line, margin).to_string();
        }
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let start = lines.iter().take_while(|l| l.is_empty()).count();
    lines[start..].join("\n")
}

/// Rewrite Google-style and then NumPy-style sections into field lists.
pub fn normalize(text: &str, config: &NormalizeConfig) -> String {
    let mut text = text.to_string();
    if config.google {
        text = Docstring::convert(split_lines(&text), Style::Google).join("\n");
    }
    if config.numpy {
        text = Docstring::convert(split_lines(&text), Style::Numpy).join("\n");
    }
    text
}

// -- Line helpers -------------------------------------------------------------

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(|l| l.trim_end().to_string()).collect()
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = 8 - column % 8;
            out.push_str(&" ".repeat(pad));
            column += pad;
        } else {
            out.push(c);
            column += 1;
        }
    }
    out
}

fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[i..],
        None => "",
    }
}

/// A recognized `Name:` header line.
fn is_google_header(line: &str) -> bool {
    let section = line.to_lowercase();
    RE_GOOGLE_SECTION.is_match(&section) && sections::lookup(section.trim_matches(':')).is_some()
}

fn get_indent(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn initial_indent(lines: &[String]) -> usize {
    lines
        .iter()
        .find(|l| !l.is_empty())
        .map(|l| get_indent(l))
        .unwrap_or(0)
}

fn min_indent(lines: &[String]) -> usize {
    lines
        .iter()
        .filter(|l| !l.is_empty())
        .map(|l| get_indent(l))
        .min()
        .unwrap_or(0)
}

fn dedent(lines: &[String]) -> Vec<String> {
    let n = min_indent(lines);
    lines.iter().map(|l| skip_chars(l, n).to_string()).collect()
}

fn indent(lines: &[String], n: usize) -> Vec<String> {
    let pad = " ".repeat(n);
    lines.iter().map(|l| format!("{}{}", pad, l)).collect()
}

/// Whether the line has at least `indent` leading whitespace characters
/// followed by more text.
fn is_indented(line: &str, indent: usize) -> bool {
    for (i, c) in line.chars().enumerate() {
        if i >= indent {
            return true;
        }
        if !c.is_whitespace() {
            return false;
        }
    }
    false
}

fn strip_empty(lines: &[String]) -> Vec<String> {
    let Some(start) = lines.iter().position(|l| !l.is_empty()) else {
        return Vec::new();
    };
    let end = lines.iter().rposition(|l| !l.is_empty()).unwrap_or(start);
    lines[start..=end].to_vec()
}

fn is_list(lines: &[String]) -> bool {
    let Some(first) = lines.first() else {
        return false;
    };
    if RE_BULLET_LIST.is_match(first) || RE_ENUMERATED_LIST.is_match(first) {
        return true;
    }
    if lines.len() < 2 || first.ends_with("::") {
        return false;
    }
    let first_indent = get_indent(first);
    let next_indent = lines[1..]
        .iter()
        .find(|l| !l.is_empty())
        .map(|l| get_indent(l))
        .unwrap_or(first_indent);
    next_indent > first_indent
}

fn escape_args_and_kwargs(name: &str) -> String {
    if let Some(rest) = name.strip_prefix("**") {
        format!(r"\*\*{}", rest)
    } else if let Some(rest) = name.strip_prefix('*') {
        format!(r"\*{}", rest)
    } else {
        name.to_string()
    }
}

/// First `:` that is neither preceded nor followed by another colon.
fn single_colon(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    (0..bytes.len()).find(|&i| {
        bytes[i] == b':'
            && (i == 0 || bytes[i - 1] != b':')
            && bytes.get(i + 1) != Some(&b':')
    })
}

/// Split `name (type): description` style lines on the first lone colon
/// outside a cross reference. Returns `(before, colon, after)`, trimmed.
fn partition_field_on_colon(line: &str) -> (String, String, String) {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in RE_XREF.find_iter(line) {
        pieces.push(&line[last..m.start()]);
        pieces.push(m.as_str());
        last = m.end();
    }
    pieces.push(&line[last..]);

    let mut before = String::new();
    let mut after = String::new();
    let mut colon = String::new();
    for (i, piece) in pieces.into_iter().enumerate() {
        if !colon.is_empty() {
            after.push_str(piece);
        } else if let Some(at) = single_colon(piece).filter(|_| i % 2 == 0) {
            colon.push(':');
            before.push_str(&piece[..at]);
            after.push_str(&piece[at + 1..]);
        } else {
            before.push_str(piece);
        }
    }
    (
        before.trim().to_string(),
        colon,
        after.trim().to_string(),
    )
}

// -- Field formatting ---------------------------------------------------------

/// One documented item of a section: `(name, type, description lines)`.
type FieldItem = (String, String, Vec<String>);

/// Prefix the first line, pad the others to line up under it.
fn format_block(prefix: &str, lines: &[String], padding: Option<&str>) -> Vec<String> {
    if lines.is_empty() {
        return vec![prefix.to_string()];
    }
    let padding = padding
        .map(str::to_string)
        .unwrap_or_else(|| " ".repeat(prefix.chars().count()));
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{}{}", prefix, line).trim_end().to_string()
            } else if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", padding, line)
            }
        })
        .collect()
}

/// Make a description safe to hang after a field marker: lists and literal
/// blocks must start on their own line.
fn fix_field_desc(desc: Vec<String>) -> Vec<String> {
    if is_list(&desc) {
        let mut out = vec![String::new()];
        out.extend(desc);
        return out;
    }
    if desc.first().is_some_and(|l| l.ends_with("::")) {
        let block = &desc[1..];
        if initial_indent(block) > get_indent(&desc[0]) {
            let mut out = vec![String::new()];
            out.extend(desc);
            return out;
        }
        let mut out = vec![String::new(), desc[0].clone()];
        out.extend(indent(block, 4));
        return out;
    }
    desc
}

fn format_docutils_params(fields: Vec<FieldItem>, field_role: &str, type_role: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for (name, type_, desc) in fields {
        let desc = strip_empty(&desc);
        if desc.iter().any(|l| !l.is_empty()) {
            let desc = fix_field_desc(desc);
            let field = format!(":{} {}: ", field_role, name);
            lines.extend(format_block(&field, &desc, None));
        } else {
            lines.push(format!(":{} {}:", field_role, name));
        }
        if !type_.is_empty() {
            lines.push(format!(":{} {}: {}", type_role, name, type_));
        }
    }
    lines.push(String::new());
    lines
}

/// `**name** (*type*) -- description`
fn format_field(name: &str, type_: &str, desc: &[String]) -> Vec<String> {
    let desc = strip_empty(desc);
    let has_desc = desc.iter().any(|l| !l.is_empty());
    let separator = if has_desc { " -- " } else { "" };
    let field = match (name.is_empty(), type_.is_empty()) {
        (false, false) if type_.contains('`') => format!("**{}** ({}){}", name, type_, separator),
        (false, false) => format!("**{}** (*{}*){}", name, type_, separator),
        (false, true) => format!("**{}**{}", name, separator),
        (true, false) if type_.contains('`') => format!("{}{}", type_, separator),
        (true, false) => format!("*{}*{}", type_, separator),
        (true, true) => String::new(),
    };
    if !has_desc {
        return vec![field];
    }
    let desc = fix_field_desc(desc);
    let mut out = Vec::with_capacity(desc.len() + 1);
    if desc[0].is_empty() {
        out.push(field);
        out.extend(desc);
    } else {
        out.push(format!("{}{}", field, desc[0]));
        out.extend(desc.into_iter().skip(1));
    }
    out
}

/// A named field holding one item, or a bulleted list of several.
fn format_fields(field_type: &str, fields: Vec<FieldItem>) -> Vec<String> {
    let field_type = format!(":{}:", field_type.trim());
    let padding = " ".repeat(field_type.chars().count());
    let multi = fields.len() > 1;
    let mut lines: Vec<String> = Vec::new();
    for (name, type_, desc) in fields {
        let field = format_field(&name, &type_, &desc);
        let prefix = match (multi, lines.is_empty()) {
            (true, false) => format!("{} * ", padding),
            (true, true) => format!("{} * ", field_type),
            (false, _) => format!("{} ", field_type),
        };
        lines.extend(format_block(&prefix, &field, None));
    }
    if lines.last().is_some_and(|l| !l.is_empty()) {
        lines.push(String::new());
    }
    lines
}

fn format_admonition(admonition: &str, lines: &[String]) -> Vec<String> {
    let lines = strip_empty(lines);
    match lines.len() {
        0 => vec![format!(".. {}::", admonition), String::new()],
        1 => vec![
            format!(".. {}:: {}", admonition, lines[0].trim()),
            String::new(),
        ],
        _ => {
            let mut out = vec![format!(".. {}::", admonition), String::new()];
            out.extend(indent(&dedent(&lines), 3));
            out.push(String::new());
            out
        }
    }
}

// -- State machine ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Google,
    Numpy,
}

struct Docstring {
    style: Style,
    lines: VecDeque<String>,
    parsed: Vec<String>,
    in_section: bool,
    section_indent: usize,
}

impl Docstring {
    /// Run one pass over `lines` and return the rewritten lines.
    fn convert(lines: Vec<String>, style: Style) -> Vec<String> {
        let mut doc = Docstring {
            style,
            lines: lines.into_iter().map(|l| l.trim_end().to_string()).collect(),
            parsed: Vec::new(),
            in_section: false,
            section_indent: 0,
        };
        doc.parse();
        doc.parsed
    }

    fn peek(&self, i: usize) -> Option<&str> {
        self.lines.get(i).map(String::as_str)
    }

    fn pop(&mut self) -> String {
        self.lines.pop_front().unwrap_or_default()
    }

    fn parse(&mut self) {
        self.parsed = self.consume_empty();
        while !self.lines.is_empty() {
            let lines = if self.is_section_header() {
                let section = self.consume_section_header();
                self.in_section = true;
                self.section_indent = self.current_indent(0);
                let lines = if RE_DIRECTIVE.is_match(&section) {
                    let mut lines = vec![section];
                    lines.extend(self.consume_to_next_section());
                    lines
                } else {
                    self.parse_section(&section)
                };
                self.in_section = false;
                self.section_indent = 0;
                lines
            } else if self.parsed.is_empty() {
                let mut lines = self.consume_contiguous();
                lines.extend(self.consume_empty());
                lines
            } else {
                self.consume_to_next_section()
            };
            self.parsed.extend(lines);
        }
    }

    // -- Consumers --------------------------------------------------------------

    fn consume_indented_block(&mut self, indent: usize) -> Vec<String> {
        let mut lines = Vec::new();
        while !self.is_section_break() {
            match self.peek(0) {
                Some(line) if line.is_empty() || is_indented(line, indent) => {
                    lines.push(self.pop());
                }
                _ => break,
            }
        }
        lines
    }

    fn consume_contiguous(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while self.peek(0).is_some_and(|l| !l.is_empty()) && !self.is_section_header() {
            lines.push(self.pop());
        }
        lines
    }

    fn consume_empty(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while self.peek(0).is_some_and(str::is_empty) {
            lines.push(self.pop());
        }
        lines
    }

    fn consume_field(&mut self, parse_type: bool, prefer_type: bool) -> FieldItem {
        let line = self.pop();
        let (mut name, mut type_, first_desc) = match self.style {
            Style::Google => {
                let (before, _, after) = partition_field_on_colon(&line);
                let (name, type_) = match RE_GOOGLE_TYPED_ARG.captures(&before) {
                    Some(caps) if parse_type => (caps[1].to_string(), caps[2].to_string()),
                    _ => (before, String::new()),
                };
                (name, type_, Some(after))
            }
            Style::Numpy => {
                let (name, type_) = if parse_type {
                    let (name, _, type_) = partition_field_on_colon(&line);
                    (name, type_)
                } else {
                    (line.trim().to_string(), String::new())
                };
                (name, type_, None)
            }
        };
        name = escape_args_and_kwargs(&name);
        if prefer_type && type_.is_empty() {
            std::mem::swap(&mut name, &mut type_);
        }

        let block = self.consume_indented_block(get_indent(&line) + 1);
        let mut desc: Vec<String> = first_desc.into_iter().collect();
        desc.extend(dedent(&block));
        (name, type_, Docstring::convert(desc, self.style))
    }

    fn consume_fields(&mut self, parse_type: bool, prefer_type: bool) -> Vec<FieldItem> {
        self.consume_empty();
        let mut fields = Vec::new();
        while !self.is_section_break() {
            let (name, type_, desc) = self.consume_field(parse_type, prefer_type);
            if !name.is_empty() || !type_.is_empty() || !desc.is_empty() {
                fields.push((name, type_, desc));
            }
        }
        fields
    }

    fn consume_returns_section(&mut self) -> Vec<FieldItem> {
        if self.style == Style::Numpy {
            return self.consume_fields(true, true);
        }
        let lines = dedent(&self.consume_to_next_section());
        let Some(first) = lines.first() else {
            return Vec::new();
        };
        let (before, colon, after) = partition_field_on_colon(first);
        let (type_, desc) = if colon.is_empty() {
            (String::new(), lines.clone())
        } else if after.is_empty() {
            (before, lines[1..].to_vec())
        } else {
            let mut desc = vec![after];
            desc.extend_from_slice(&lines[1..]);
            (before, desc)
        };
        vec![(String::new(), type_, Docstring::convert(desc, self.style))]
    }

    fn consume_section_header(&mut self) -> String {
        let section = self.pop();
        match self.style {
            Style::Google => {
                let stripped = section.trim_matches(':');
                if sections::lookup(&stripped.to_lowercase()).is_some() {
                    stripped.to_string()
                } else {
                    section
                }
            }
            Style::Numpy => {
                if !RE_DIRECTIVE.is_match(&section) {
                    self.pop();
                }
                section
            }
        }
    }

    fn consume_to_next_section(&mut self) -> Vec<String> {
        self.consume_empty();
        let mut lines = Vec::new();
        while !self.is_section_break() {
            lines.push(self.pop());
        }
        lines.extend(self.consume_empty());
        lines
    }

    // -- Lookahead --------------------------------------------------------------

    /// Indent of the first non-blank line at or after `peek_ahead`.
    fn current_indent(&self, peek_ahead: usize) -> usize {
        self.lines
            .iter()
            .skip(peek_ahead)
            .find(|l| !l.is_empty())
            .map(|l| get_indent(l))
            .unwrap_or(0)
    }

    fn is_section_header(&self) -> bool {
        let Some(line) = self.peek(0) else {
            return false;
        };
        let section = line.to_lowercase();
        match self.style {
            Style::Google => {
                is_google_header(&section) && self.current_indent(1) > get_indent(&section)
            }
            Style::Numpy => {
                if let (Some(_), Some(underline)) = (sections::lookup(&section), self.peek(1)) {
                    return RE_NUMPY_UNDERLINE.is_match(underline);
                }
                RE_DIRECTIVE.is_match(&section) && section.starts_with(".. index::")
            }
        }
    }

    fn is_section_break(&self) -> bool {
        let Some(line) = self.peek(0) else {
            return true;
        };
        if self.is_section_header() {
            return true;
        }
        if self.style == Style::Numpy && line.is_empty() && self.peek(1) == Some("") {
            return true;
        }
        self.in_section && !line.is_empty() && !is_indented(line, self.section_indent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google(text: &str) -> String {
        normalize(
            text,
            &NormalizeConfig {
                google: true,
                numpy: false,
            },
        )
    }

    fn numpy(text: &str) -> String {
        normalize(
            text,
            &NormalizeConfig {
                google: false,
                numpy: true,
            },
        )
    }

    #[test]
    fn cleandoc_strips_common_margin() {
        let raw = "Summary.\n\n    Body line.\n      Indented.\n    ";
        assert_eq!(cleandoc(raw), "Summary.\n\nBody line.\n  Indented.");
    }

    #[test]
    fn cleandoc_drops_leading_blank_lines_and_expands_tabs() {
        assert_eq!(cleandoc("\n\n\tFirst\n\tTabbed"), "First\nTabbed");
        assert_eq!(cleandoc("x\n  a\n\tb"), "x\na\n      b");
        assert_eq!(cleandoc(""), "");
    }

    #[test]
    fn cleandoc_keeps_leading_section_body_indented() {
        assert_eq!(cleandoc("Args:\n  foo (int): bar"), "Args:\n  foo (int): bar");
        assert_eq!(
            cleandoc("Args:\n        foo (int): bar\n\n    Raises:\n        ValueError: bad\n    "),
            "Args:\n    foo (int): bar\n\nRaises:\n    ValueError: bad"
        );
        // Not a section header: the body is dedented as usual.
        assert_eq!(cleandoc("Usage:\n  run it"), "Usage:\nrun it");
    }

    #[test]
    fn google_args_become_param_and_type_fields() {
        assert_eq!(
            google("Args:\n  foo (int): bar"),
            ":param foo: bar\n:type foo: int\n"
        );
    }

    #[test]
    fn google_continuation_lines_are_kept() {
        assert_eq!(
            google("Summary.\n\nArgs:\n    foo: first\n        second\n    bar (str): other"),
            "Summary.\n\n:param foo: first\n            second\n:param bar: other\n:type bar: str\n"
        );
    }

    #[test]
    fn google_star_args_are_escaped() {
        assert_eq!(
            google("Args:\n    *args: extra\n    **kwargs: more"),
            ":param \\*args: extra\n:param \\*\\*kwargs: more\n"
        );
    }

    #[test]
    fn google_raises_and_returns() {
        assert_eq!(
            google("Raises:\n    ValueError: If bad.\n\nReturns:\n    int: The count."),
            ":raises ValueError: If bad.\n\n:returns: The count.\n:rtype: int\n"
        );
    }

    #[test]
    fn google_generic_and_admonition_sections() {
        assert_eq!(
            google("Example:\n    >>> f()\n\nNote:\n    Careful."),
            ".. rubric:: Example\n\n>>> f()\n\n.. note:: Careful.\n"
        );
    }

    #[test]
    fn google_keyword_arguments_use_keyword_roles() {
        assert_eq!(
            google("Keyword Args:\n    x (float): scale"),
            ":keyword x: scale\n:kwtype x: float\n"
        );
    }

    #[test]
    fn google_header_needs_indented_body() {
        let text = "Args:\nnot a section";
        assert_eq!(google(text), text);
    }

    #[test]
    fn unknown_headers_pass_through() {
        let text = "Usage:\n    prog --flag";
        assert_eq!(google(text), text);
    }

    #[test]
    fn numpy_parameters() {
        assert_eq!(
            numpy("Parameters\n----------\nfoo : int\n    The foo.\nbar\n    No type."),
            ":param foo: The foo.\n:type foo: int\n:param bar: No type.\n"
        );
    }

    #[test]
    fn numpy_returns_and_raises() {
        assert_eq!(
            numpy("Returns\n-------\nint\n    The count.\n\nRaises\n------\nValueError\n    If bad."),
            ":returns: The count.\n:rtype: int\n\n:raises ValueError: If bad.\n"
        );
    }

    #[test]
    fn numpy_see_also_links() {
        assert_eq!(
            numpy("See Also\n--------\nother : Does things.\nmore, less"),
            ".. seealso::\n\n   :obj:`other`\n       Does things.\n   \n   :obj:`more`, :obj:`less`\n"
        );
    }

    #[test]
    fn attributes_use_ivar_fields() {
        assert_eq!(
            google("Attributes:\n    size (int): How big."),
            ":ivar size: How big.\n:vartype size: int\n"
        );
    }

    #[test]
    fn partition_ignores_colons_inside_cross_references() {
        assert_eq!(
            partition_field_on_colon("x (:class:`a.B`): desc"),
            ("x (:class:`a.B`)".to_string(), ":".to_string(), "desc".to_string())
        );
        assert_eq!(
            partition_field_on_colon("a::b"),
            ("a::b".to_string(), String::new(), String::new())
        );
    }

    #[test]
    fn list_descriptions_start_on_a_new_line() {
        assert_eq!(
            google("Args:\n    mode: One of\n\n        - a\n        - b"),
            ":param mode: One of\n\n             - a\n             - b\n"
        );
    }
}
