//! Stanza tokenizer for `Packages` indices
//!
//! A `Packages` file is a sequence of paragraphs separated by a blank line,
//! each made of `Key: value` lines. Only single-line fields are recognised;
//! continuation lines (starting with whitespace) are kept in the raw line list
//! but never become fields.

use indexmap::IndexMap;

/// One paragraph of a `Packages` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza<'a> {
    lines: Vec<&'a str>,
    fields: IndexMap<&'a str, &'a str>,
}

impl<'a> Stanza<'a> {
    /// Parse a single paragraph. Returns `None` if it holds no non-empty line.
    pub fn parse(block: &'a str) -> Option<Self> {
        let lines: Vec<&str> = block.split('\n').filter(|l| !l.is_empty()).collect();
        if lines.is_empty() {
            return None;
        }

        let mut fields = IndexMap::new();
        for line in &lines {
            if let Some((key, value)) = parse_field(line) {
                fields.insert(key, value);
            }
        }

        Some(Self { lines, fields })
    }

    /// First non-empty line of the paragraph
    pub fn header(&self) -> &'a str {
        self.lines[0]
    }

    /// Whether the paragraph opens with exactly `Package: <name>`
    pub fn is_package(&self, name: &str) -> bool {
        self.header()
            .strip_prefix("Package: ")
            .is_some_and(|pkg| pkg == name)
    }

    /// Value of a field, if present with a non-empty value
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.fields.get(key).copied()
    }

    pub fn fields(&self) -> &IndexMap<&'a str, &'a str> {
        &self.fields
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }
}

/// Split a `Packages` file into its paragraphs.
pub fn split_stanzas(content: &str) -> impl Iterator<Item = Stanza<'_>> {
    content.split("\n\n").filter_map(Stanza::parse)
}

/// Split a field line into key and value.
///
/// The key is the first whitespace-delimited token minus its trailing colon;
/// the value is everything after the first run of whitespace. A key with no
/// value yields nothing.
fn parse_field(line: &str) -> Option<(&str, &str)> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    let (token, rest) = line.split_once(char::is_whitespace)?;
    let key = token.strip_suffix(':')?;
    let value = rest.trim_start();
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}
