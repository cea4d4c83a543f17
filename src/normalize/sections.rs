//! Section table and per-section consumers.

use super::*;

/// What a recognized section header turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Section {
    Parameters,
    KeywordArguments,
    OtherParameters,
    Attributes,
    Examples,
    Methods,
    Notes,
    Raises,
    References,
    Returns,
    SeeAlso,
    Warns,
    Yields,
    /// Rendered as the named admonition directive.
    Admonition(&'static str),
}

/// Look up a lower-cased header.
pub(super) fn lookup(name: &str) -> Option<Section> {
    let section = match name {
        "args" | "arguments" | "parameters" => Section::Parameters,
        "keyword args" | "keyword arguments" => Section::KeywordArguments,
        "other parameters" => Section::OtherParameters,
        "attributes" => Section::Attributes,
        "example" | "examples" => Section::Examples,
        "methods" => Section::Methods,
        "notes" => Section::Notes,
        "raises" => Section::Raises,
        "references" => Section::References,
        "return" | "returns" => Section::Returns,
        "see also" => Section::SeeAlso,
        "warns" => Section::Warns,
        "yield" | "yields" => Section::Yields,
        "attention" => Section::Admonition("attention"),
        "caution" => Section::Admonition("caution"),
        "danger" => Section::Admonition("danger"),
        "error" => Section::Admonition("error"),
        "hint" => Section::Admonition("hint"),
        "important" => Section::Admonition("important"),
        "note" => Section::Admonition("note"),
        "tip" => Section::Admonition("tip"),
        "todo" => Section::Admonition("todo"),
        "warning" | "warnings" => Section::Admonition("warning"),
        _ => return None,
    };
    Some(section)
}

impl Docstring {
    pub(super) fn parse_section(&mut self, header: &str) -> Vec<String> {
        let Some(section) = lookup(&header.to_lowercase()) else {
            return vec![header.to_string()];
        };
        match section {
            Section::Parameters => {
                let fields = self.consume_fields(true, false);
                format_docutils_params(fields, "param", "type")
            }
            Section::KeywordArguments => {
                let fields = self.consume_fields(true, false);
                format_docutils_params(fields, "keyword", "kwtype")
            }
            Section::OtherParameters => {
                let fields = self.consume_fields(true, false);
                format_fields("Other Parameters", fields)
            }
            Section::Attributes => self.parse_attributes_section(),
            Section::Examples => {
                let label = if header.eq_ignore_ascii_case("example") {
                    "Example"
                } else {
                    "Examples"
                };
                self.parse_generic_section(label)
            }
            Section::Methods => self.parse_methods_section(),
            Section::Notes => self.parse_generic_section("Notes"),
            Section::References => self.parse_generic_section("References"),
            Section::Raises => self.parse_raises_section(),
            Section::Returns => self.parse_returns_section(),
            Section::SeeAlso => self.parse_see_also_section(),
            Section::Warns => {
                let fields = self.consume_fields(true, false);
                format_fields("Warns", fields)
            }
            Section::Yields => {
                let fields = self.consume_returns_section();
                format_fields("Yields", fields)
            }
            Section::Admonition(name) => {
                let lines = self.consume_to_next_section();
                format_admonition(name, &lines)
            }
        }
    }

    fn parse_generic_section(&mut self, label: &str) -> Vec<String> {
        let lines = dedent(&strip_empty(&self.consume_to_next_section()));
        let mut out = vec![format!(".. rubric:: {}", label), String::new()];
        if !lines.is_empty() {
            out.extend(lines);
            out.push(String::new());
        }
        out
    }

    /// Attributes become `:ivar:` / `:vartype:` pairs.
    fn parse_attributes_section(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        for (name, type_, desc) in self.consume_fields(true, false) {
            let field = format!(":ivar {}: ", name);
            lines.extend(format_block(&field, &desc, None));
            if !type_.is_empty() {
                lines.push(format!(":vartype {}: {}", name, type_));
            }
        }
        lines.push(String::new());
        lines
    }

    fn parse_methods_section(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        for (name, _, desc) in self.consume_fields(false, false) {
            lines.push(format!(".. method:: {}", name));
            if !desc.is_empty() {
                lines.push(String::new());
                lines.extend(indent(&desc, 3));
            }
            lines.push(String::new());
        }
        lines
    }

    fn parse_raises_section(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        for (_, type_, desc) in self.consume_fields(false, true) {
            let type_ = match RE_NAME.captures(&type_) {
                Some(caps) if caps.name("role").is_some() => {
                    caps.name("name").map_or(type_.clone(), |m| m.as_str().to_string())
                }
                _ => type_,
            };
            let type_ = if type_.is_empty() {
                String::new()
            } else {
                format!(" {}", type_)
            };
            let desc = strip_empty(&desc);
            let desc = if desc.iter().any(|l| !l.is_empty()) {
                format!(" {}", desc.join("\n    "))
            } else {
                String::new()
            };
            lines.push(format!(":raises{}:{}", type_, desc));
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    /// A single return value gets `:returns:` plus `:rtype:`; several become
    /// a bulleted `:returns:` list with inline types.
    fn parse_returns_section(&mut self) -> Vec<String> {
        let fields = self.consume_returns_section();
        let multi = fields.len() > 1;
        let mut lines: Vec<String> = Vec::new();
        for (name, type_, desc) in fields {
            let field = if multi {
                format_field(&name, &type_, &desc)
            } else {
                format_field(&name, "", &desc)
            };
            if multi {
                let prefix = if lines.is_empty() {
                    ":returns: * "
                } else {
                    "          * "
                };
                lines.extend(format_block(prefix, &field, None));
            } else {
                lines.extend(format_block(":returns: ", &field, None));
                if !type_.is_empty() {
                    lines.push(format!(":rtype: {}", type_));
                    lines.push(String::new());
                }
            }
        }
        if lines.last().is_some_and(|l| !l.is_empty()) {
            lines.push(String::new());
        }
        lines
    }

    fn parse_see_also_section(&mut self) -> Vec<String> {
        let lines = self.consume_to_next_section();
        if self.style == Style::Numpy {
            if let Some(links) = numpy_see_also(&lines) {
                return links;
            }
        }
        format_admonition("seealso", &lines)
    }
}

/// `name` or `:role:`name`` with an optional role.
fn item_name(text: &str) -> Option<(String, Option<String>)> {
    let caps = RE_NAME.captures(text)?;
    match (caps.name("role"), caps.name("name"), caps.name("name2")) {
        (Some(role), Some(name), _) => Some((
            name.as_str().to_string(),
            Some(role.as_str().to_string()),
        )),
        (_, _, Some(name)) => Some((name.as_str().to_string(), None)),
        _ => None,
    }
}

/// NumPy "See Also" entries:
///
/// ```text
/// func_name : Descriptive text
///     continued text
/// func_a, func_b, :meth:`func_c`
/// ```
///
/// Returns `None` when an entry is not a name, so the caller can fall back
/// to a plain admonition.
fn numpy_see_also(content: &[String]) -> Option<Vec<String>> {
    type Item = (String, Vec<String>, Option<String>);

    fn push_item(items: &mut Vec<Item>, name: Option<&str>, rest: &mut Vec<String>) -> Option<()> {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return Some(());
        };
        let (name, role) = item_name(name)?;
        items.push((name, std::mem::take(rest), role));
        Some(())
    }

    let mut items: Vec<Item> = Vec::new();
    let mut current: Option<String> = None;
    let mut rest: Vec<String> = Vec::new();

    for line in content {
        if line.trim().is_empty() {
            continue;
        }
        let named = RE_NAME
            .find(line)
            .filter(|m| line[m.end()..].trim().starts_with(':'));
        if let Some(m) = named {
            push_item(&mut items, current.as_deref(), &mut rest)?;
            current = Some(line[..m.end()].to_string());
            rest.clear();
            let desc = line[m.end()..]
                .split_once(':')
                .map(|(_, d)| d.trim())
                .unwrap_or("");
            if !desc.is_empty() {
                rest.push(desc.to_string());
            }
        } else if !line.starts_with(' ') {
            push_item(&mut items, current.as_deref(), &mut rest)?;
            current = None;
            if line.contains(',') {
                for func in line.split(',').filter(|f| !f.trim().is_empty()) {
                    push_item(&mut items, Some(func), &mut Vec::new())?;
                }
            } else {
                current = Some(line.clone());
            }
        } else if current.is_some() {
            rest.push(line.trim().to_string());
        }
    }
    push_item(&mut items, current.as_deref(), &mut rest)?;

    if items.is_empty() {
        return Some(Vec::new());
    }

    let mut lines: Vec<String> = Vec::new();
    let mut last_had_desc = true;
    for (func, desc, role) in items {
        let link = format!(":{}:`{}`", role.as_deref().unwrap_or("obj"), func);
        match lines.last_mut() {
            Some(last) if desc.is_empty() && !last_had_desc => {
                last.push_str(", ");
                last.push_str(&link);
            }
            _ => lines.extend([String::new(), link]),
        }
        last_had_desc = !desc.is_empty();
        if last_had_desc {
            lines.push(format!("    {}", desc.join(" ")));
        }
    }
    lines.push(String::new());
    Some(format_admonition("seealso", &lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_names_are_case_folded_by_callers() {
        assert_eq!(lookup("args"), Some(Section::Parameters));
        assert_eq!(lookup("warnings"), Some(Section::Admonition("warning")));
        assert_eq!(lookup("Args"), None);
        assert_eq!(lookup("usage"), None);
    }

    #[test]
    fn multiple_returns_become_a_list() {
        let lines = Docstring::convert(
            vec![
                "Returns".to_string(),
                "-------".to_string(),
                "x : int".to_string(),
                "    First.".to_string(),
                "y : str".to_string(),
                "    Second.".to_string(),
            ],
            Style::Numpy,
        );
        assert_eq!(
            lines,
            vec![
                ":returns: * **x** (*int*) -- First.",
                "          * **y** (*str*) -- Second.",
                "",
            ]
        );
    }

    #[test]
    fn raises_with_role_keeps_the_bare_name() {
        let lines = Docstring::convert(
            vec!["Raises:".to_string(), "    :exc:`KeyError`: missing".to_string()],
            Style::Google,
        );
        assert_eq!(lines, vec![":raises KeyError: missing", ""]);
    }

    #[test]
    fn unparseable_see_also_falls_back_to_admonition() {
        assert_eq!(numpy_see_also(&["(not a name)".to_string()]), None);
    }
}
