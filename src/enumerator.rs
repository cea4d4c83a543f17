//! Enumerated-list numbering: marker recognition and label generation.
//!
//! Supports arabic numerals, lower/upper alpha and lower/upper roman numerals
//! in the `(n)`, `n)` and `n.` bracketings, and the auto-enumerator `#`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    Arabic,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumFormat {
    /// `(n)`
    Parens,
    /// `n)`
    RParen,
    /// `n.`
    Period,
}

impl EnumFormat {
    fn wrap(self, numeral: &str) -> String {
        match self {
            EnumFormat::Parens => format!("({})", numeral),
            EnumFormat::RParen => format!("{})", numeral),
            EnumFormat::Period => format!("{}.", numeral),
        }
    }
}

impl Sequence {
    /// Render ordinal `n` (1-based) in this sequence.
    pub fn numeral(self, n: usize) -> Option<String> {
        match self {
            Sequence::Arabic => Some(n.to_string()),
            Sequence::LowerAlpha => alpha(n).map(|c| c.to_string()),
            Sequence::UpperAlpha => alpha(n).map(|c| c.to_ascii_uppercase().to_string()),
            Sequence::LowerRoman => to_roman(n).map(|r| r.to_lowercase()),
            Sequence::UpperRoman => to_roman(n),
        }
    }

    /// Parse `token` as an ordinal of this sequence.
    pub fn ordinal(self, token: &str) -> Option<usize> {
        match self {
            Sequence::Arabic => {
                if token.chars().all(|c| c.is_ascii_digit()) {
                    token.parse().ok()
                } else {
                    None
                }
            }
            Sequence::LowerAlpha => single_letter(token)
                .filter(|c| c.is_ascii_lowercase())
                .map(|c| (c as u8 - b'a') as usize + 1),
            Sequence::UpperAlpha => single_letter(token)
                .filter(|c| c.is_ascii_uppercase())
                .map(|c| (c as u8 - b'A') as usize + 1),
            Sequence::LowerRoman => {
                if token.chars().all(|c| c.is_ascii_lowercase()) {
                    from_roman(&token.to_uppercase())
                } else {
                    None
                }
            }
            Sequence::UpperRoman => {
                if token.chars().all(|c| c.is_ascii_uppercase()) {
                    from_roman(token)
                } else {
                    None
                }
            }
        }
    }
}

fn single_letter(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
        _ => None,
    }
}

fn alpha(n: usize) -> Option<char> {
    if (1..=26).contains(&n) {
        Some((b'a' + (n - 1) as u8) as char)
    } else {
        None
    }
}

const ROMAN: &[(usize, &str)] = &[
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

pub fn to_roman(mut n: usize) -> Option<String> {
    if n == 0 || n > 4999 {
        return None;
    }
    let mut out = String::new();
    for &(value, digits) in ROMAN {
        while n >= value {
            out.push_str(digits);
            n -= value;
        }
    }
    Some(out)
}

/// Parse a canonical upper-case roman numeral.
pub fn from_roman(s: &str) -> Option<usize> {
    if s.is_empty() {
        return None;
    }
    let mut rest = s;
    let mut total = 0;
    for &(value, digits) in ROMAN {
        while let Some(tail) = rest.strip_prefix(digits) {
            total += value;
            rest = tail;
        }
    }
    // Reject non-canonical spellings such as "IIII" or "VX".
    if rest.is_empty() && to_roman(total).as_deref() == Some(s) {
        Some(total)
    } else {
        None
    }
}

/// Raw numerals for `count` items starting at `start`.
pub fn enumerators(sequence: Sequence, start: usize, count: usize) -> Vec<String> {
    (start..start + count)
        .map(|n| sequence.numeral(n).unwrap_or_else(|| n.to_string()))
        .collect()
}

/// Item prefixes for a list: bracketed numeral plus one space, all padded
/// on the right to the widest one.
pub fn labels(sequence: Sequence, format: EnumFormat, start: usize, count: usize) -> Vec<String> {
    let raw: Vec<String> = enumerators(sequence, start, count)
        .iter()
        .map(|n| format!("{} ", format.wrap(n)))
        .collect();
    let width = raw.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    raw.into_iter()
        .map(|l| format!("{:<width$}", l, width = width))
        .collect()
}

/// A list-item marker found at the start of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub format: EnumFormat,
    /// Enumerator text without brackets; `#` for auto-numbering.
    pub token: String,
    /// Column where the item text starts.
    pub text_offset: usize,
}

impl Marker {
    /// Recognize `(n)`, `n)` or `n.` followed by whitespace or end of line.
    pub fn parse(line: &str) -> Option<Marker> {
        let (format, token, marker_len) = if let Some(rest) = line.strip_prefix('(') {
            let close = rest.find(')')?;
            (EnumFormat::Parens, &rest[..close], close + 2)
        } else {
            let end = line.find(|c: char| c == '.' || c == ')')?;
            let format = if line[end..].starts_with('.') {
                EnumFormat::Period
            } else {
                EnumFormat::RParen
            };
            (format, &line[..end], end + 1)
        };
        if token.is_empty()
            || !(token == "#" || token.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return None;
        }
        let after = &line[marker_len..];
        if !after.is_empty() && !after.starts_with(char::is_whitespace) {
            return None;
        }
        let spaces = after.len() - after.trim_start().len();
        let text_offset = if after.trim().is_empty() {
            marker_len + 1
        } else {
            marker_len + spaces
        };
        Some(Marker {
            format,
            token: token.to_string(),
            text_offset,
        })
    }

    pub fn is_auto(&self) -> bool {
        self.token == "#"
    }

    /// Classify the first marker of a list. A lone `i`/`I` or a multi-letter
    /// roman numeral is roman; other single letters are alphabetic.
    pub fn first_item(&self) -> Option<(Sequence, usize)> {
        if self.is_auto() {
            return Some((Sequence::Arabic, 1));
        }
        let t = self.token.as_str();
        let candidates: &[Sequence] = if t == "i" {
            &[Sequence::LowerRoman]
        } else if t == "I" {
            &[Sequence::UpperRoman]
        } else if t.len() == 1 {
            &[Sequence::Arabic, Sequence::LowerAlpha, Sequence::UpperAlpha]
        } else {
            &[Sequence::Arabic, Sequence::LowerRoman, Sequence::UpperRoman]
        };
        candidates
            .iter()
            .find_map(|&s| s.ordinal(t).map(|n| (s, n)))
    }

    /// Ordinal of this marker when continuing a list of `sequence`.
    pub fn continuing(&self, sequence: Sequence) -> Option<usize> {
        if self.is_auto() {
            return None;
        }
        sequence.ordinal(&self.token)
    }
}
