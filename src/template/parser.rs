use std::collections::HashSet;
use std::ops::Range;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A well-formed `{{ name }}` token found in template content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Identifier between the braces, without surrounding whitespace.
    pub name: &'a str,
    /// Byte range of the whole token, braces included.
    pub range: Range<usize>,
}

/// Left-to-right scanner over the non-overlapping placeholder tokens in a string.
pub struct Placeholders<'a> {
    content: &'a str,
    pos: usize,
}

pub fn placeholders(content: &str) -> Placeholders<'_> {
    Placeholders { content, pos: 0 }
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = Placeholder<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.content.len() {
            let start = self.pos + self.content[self.pos..].find(OPEN)?;
            if let Some(token) = match_at(self.content, start) {
                self.pos = token.range.end;
                return Some(token);
            }
            // `{` is a single byte, so the next candidate stays on a char boundary.
            self.pos = start + 1;
        }
        None
    }
}

fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn match_at(content: &str, start: usize) -> Option<Placeholder<'_>> {
    let inner = content[start..].strip_prefix(OPEN)?.trim_start();
    let ident_len = inner.bytes().take_while(|b| is_identifier_byte(*b)).count();
    // Identifiers may contain digits but never start with one.
    if ident_len == 0 || inner.as_bytes()[0].is_ascii_digit() {
        return None;
    }

    let name = &inner[..ident_len];
    let rest = inner[ident_len..].trim_start().strip_prefix(CLOSE)?;
    let end = content.len() - rest.len();

    Some(Placeholder {
        name,
        range: start..end,
    })
}

/// Unique variable names referenced by `content`, in first-occurrence order.
pub fn extract(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    placeholders(content)
        .filter(|token| seen.insert(token.name))
        .map(|token| token.name.to_string())
        .collect()
}

pub fn has_variables(content: &str) -> bool {
    placeholders(content).next().is_some()
}
