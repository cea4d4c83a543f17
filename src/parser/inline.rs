//! Inline markup recognizer for paragraph text.
//!
//! Start-strings must follow whitespace, the start of the text, or opening
//! punctuation, and must be followed by non-whitespace; end-strings must
//! follow non-whitespace and be followed by whitespace, closing punctuation,
//! or the end of the text. Anything that does not close is plain text.

use crate::error::{Error, Result};
use crate::model::InlineSpan;
use std::collections::BTreeSet;

const OPENERS: &str = "'\"([{<-/:";
const CLOSERS: &str = "'\")]}>-/:.,;!?\\";

/// Standard roles and how their content is rendered.
enum RoleKind {
    Emphasis,
    Strong,
    Literal,
    Reference,
    Plain,
}

fn standard_role(name: &str) -> Option<RoleKind> {
    match name {
        "emphasis" => Some(RoleKind::Emphasis),
        "strong" => Some(RoleKind::Strong),
        "literal" | "code" => Some(RoleKind::Literal),
        "title-reference" | "title" | "t" => Some(RoleKind::Reference),
        "math" | "sub" | "subscript" | "sup" | "superscript" | "abbreviation" | "ab"
        | "acronym" | "ac" => Some(RoleKind::Plain),
        _ => None,
    }
}

struct Scanner<'a> {
    chars: Vec<char>,
    roles: &'a BTreeSet<String>,
    spans: Vec<InlineSpan>,
    buf: String,
}

/// Split paragraph text into inline spans.
pub fn parse_inline(text: &str, roles: &BTreeSet<String>) -> Result<Vec<InlineSpan>> {
    let mut s = Scanner {
        chars: text.chars().collect(),
        roles,
        spans: Vec::new(),
        buf: String::new(),
    };
    s.run()?;
    s.flush();
    Ok(s.spans)
}

impl Scanner<'_> {
    fn run(&mut self) -> Result<()> {
        let mut i = 0;
        while i < self.chars.len() {
            let c = self.chars[i];
            if c == '\\' {
                match self.chars.get(i + 1) {
                    Some(n) if n.is_whitespace() => {}
                    Some(&n) => self.buf.push(n),
                    None => self.buf.push('\\'),
                }
                i += 2;
                continue;
            }
            if self.start_ok(i) {
                if let Some(next) = self.markup_at(i)? {
                    i = next;
                    continue;
                }
            }
            if c == '_' && self.is_simple_reference_end(i) {
                i += 1;
                continue;
            }
            self.buf.push(c);
            i += 1;
        }
        Ok(())
    }

    fn flush(&mut self) {
        if !self.buf.is_empty() {
            self.spans.push(InlineSpan::Text(std::mem::take(&mut self.buf)));
        }
    }

    fn push(&mut self, span: InlineSpan) {
        match span {
            InlineSpan::Text(text) => self.buf.push_str(&text),
            other => {
                self.flush();
                self.spans.push(other);
            }
        }
    }

    fn starts_with(&self, i: usize, pat: &str) -> bool {
        let mut j = i;
        for p in pat.chars() {
            if self.chars.get(j) != Some(&p) {
                return false;
            }
            j += 1;
        }
        true
    }

    fn start_ok(&self, i: usize) -> bool {
        i == 0 || {
            let prev = self.chars[i - 1];
            prev.is_whitespace() || OPENERS.contains(prev)
        }
    }

    fn follow_ok(&self, j: usize) -> bool {
        match self.chars.get(j) {
            None => true,
            Some(c) => c.is_whitespace() || CLOSERS.contains(*c),
        }
    }

    /// Find the end-string `pat` for content starting at `from`.
    fn find_end(&self, from: usize, pat: &str) -> Option<usize> {
        let first = *self.chars.get(from)?;
        if first.is_whitespace() {
            return None;
        }
        let len = pat.chars().count();
        (from + 1..self.chars.len()).find(|&j| {
            self.starts_with(j, pat)
                && !self.chars[j - 1].is_whitespace()
                && self.chars[j - 1] != '\\'
                && self.follow_ok(j + len)
        })
    }

    fn slice(&self, from: usize, to: usize) -> String {
        self.chars[from..to].iter().collect()
    }

    /// Try to recognize markup starting at `i`; returns the index after it.
    fn markup_at(&mut self, i: usize) -> Result<Option<usize>> {
        if self.starts_with(i, "``") {
            if let Some(end) = self.find_end(i + 2, "``") {
                let content = self.slice(i + 2, end);
                self.push(InlineSpan::Literal(content));
                return Ok(Some(end + 2));
            }
            return Ok(None);
        }
        if self.starts_with(i, "**") {
            if let Some(end) = self.find_end(i + 2, "**") {
                let content = unescape(&self.slice(i + 2, end));
                self.push(InlineSpan::Strong(content));
                return Ok(Some(end + 2));
            }
            return Ok(None);
        }
        match self.chars[i] {
            '*' => {
                if let Some(end) = self.find_end(i + 1, "*") {
                    let content = unescape(&self.slice(i + 1, end));
                    self.push(InlineSpan::Emphasis(content));
                    return Ok(Some(end + 1));
                }
                Ok(None)
            }
            '`' => Ok(self.interpreted(i)),
            ':' => self.role(i),
            _ => Ok(None),
        }
    }

    /// `` `text` ``, `` `text`_ `` or `` `text <uri>`__ ``.
    fn interpreted(&mut self, i: usize) -> Option<usize> {
        let first = *self.chars.get(i + 1)?;
        if first.is_whitespace() {
            return None;
        }
        let mut j = i + 2;
        while j < self.chars.len() {
            if self.chars[j] == '`' && !self.chars[j - 1].is_whitespace() {
                let underscores = self.chars[j + 1..]
                    .iter()
                    .take(2)
                    .take_while(|&&c| c == '_')
                    .count();
                if self.follow_ok(j + 1 + underscores) {
                    let content = self.slice(i + 1, j);
                    let span = if underscores > 0 {
                        reference_span(&content)
                    } else {
                        InlineSpan::Reference(content)
                    };
                    self.push(span);
                    return Some(j + 1 + underscores);
                }
            }
            j += 1;
        }
        None
    }

    /// `:role:`text``
    fn role(&mut self, i: usize) -> Result<Option<usize>> {
        let Some(close) = (i + 1..self.chars.len())
            .find(|&j| self.chars[j] == ':' && self.chars.get(j + 1) == Some(&'`'))
        else {
            return Ok(None);
        };
        let name = self.slice(i + 1, close);
        let valid_name = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "_.:+-".contains(c));
        if !valid_name {
            return Ok(None);
        }
        let content_start = close + 2;
        let Some(end) = (content_start..self.chars.len())
            .find(|&j| self.chars[j] == '`' && self.follow_ok(j + 1))
        else {
            return Ok(None);
        };
        let content = self.slice(content_start, end);
        let span = match standard_role(&name) {
            Some(RoleKind::Emphasis) => InlineSpan::Emphasis(content),
            Some(RoleKind::Strong) => InlineSpan::Strong(content),
            Some(RoleKind::Literal) => InlineSpan::Literal(content),
            Some(RoleKind::Reference) => InlineSpan::Reference(content),
            Some(RoleKind::Plain) => InlineSpan::Text(content),
            None if self.roles.contains(&name) => InlineSpan::Text(content),
            None => return Err(Error::UnknownRole(name)),
        };
        self.push(span);
        Ok(Some(end + 1))
    }

    /// `name_`: a trailing underscore after a word is a simple reference.
    fn is_simple_reference_end(&self, i: usize) -> bool {
        i > 0 && self.chars[i - 1].is_ascii_alphanumeric() && self.follow_ok(i + 1)
    }
}

fn reference_span(content: &str) -> InlineSpan {
    let trimmed = content.trim_end();
    if let Some(body) = trimmed.strip_suffix('>') {
        if let Some(open) = body.rfind('<') {
            let text = body[..open].trim();
            let uri = body[open + 1..].trim();
            if text.is_empty() {
                return InlineSpan::Text(uri.to_string());
            }
            return InlineSpan::Hyperlink {
                text: text.to_string(),
                uri: uri.to_string(),
            };
        }
    }
    InlineSpan::Text(content.to_string())
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(n) = chars.next() {
                out.push(n);
            }
        } else {
            out.push(c);
        }
    }
    out
}
