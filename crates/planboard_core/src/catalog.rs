use std::collections::HashMap;

/// Localized message catalog, keyed by source message or `"{message}:{context}"`.
///
/// An empty catalog is a valid state: every lookup misses and translation
/// degrades to the identity function.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order, for persisting a snapshot.
    pub fn sorted_entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }

    /// Empty translations count as missing.
    fn lookup(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Translates `message`, preferring the context-qualified entry.
    ///
    /// Missing entries fall back to `message` itself. When the source message
    /// carries `{N}` placeholders, they are filled from `args` in the chosen
    /// template; indices without an argument stay literal.
    pub fn translate(&self, message: &str, args: &[&str], context: Option<&str>) -> String {
        let template = context
            .and_then(|context| self.lookup(&format!("{message}:{context}")))
            .or_else(|| self.lookup(message))
            .unwrap_or(message);

        if !has_placeholders(message) {
            return template.to_string();
        }
        format_positional(template, args)
    }
}

/// Finds the next `{digits}` placeholder at or after `from`.
/// Returns the byte range of the whole placeholder and the raw digits.
fn next_placeholder(text: &str, from: usize) -> Option<(usize, usize, &str)> {
    let bytes = text.as_bytes();
    let mut start = from;
    while let Some(offset) = text[start..].find('{') {
        let open = start + offset;
        let digits_start = open + 1;
        let mut cursor = digits_start;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > digits_start && cursor < bytes.len() && bytes[cursor] == b'}' {
            return Some((open, cursor + 1, &text[digits_start..cursor]));
        }
        start = digits_start;
    }
    None
}

pub(crate) fn has_placeholders(text: &str) -> bool {
    next_placeholder(text, 0).is_some()
}

/// Replaces `{N}` with `args[N]`; out-of-range placeholders are kept verbatim.
pub fn format_positional(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut copied = 0;
    while let Some((open, close, digits)) = next_placeholder(template, copied) {
        out.push_str(&template[copied..open]);
        match digits.parse::<usize>().ok().and_then(|index| args.get(index)) {
            Some(value) => out.push_str(value),
            None => out.push_str(&template[open..close]),
        }
        copied = close;
    }
    out.push_str(&template[copied..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_scan_ignores_non_numeric_braces() {
        assert!(!has_placeholders("{name} and {}"));
        assert!(has_placeholders("{x} then {12}"));
        assert!(!has_placeholders("{3"));
    }

    #[test]
    fn format_keeps_overflowing_index_literal() {
        assert_eq!(
            format_positional("{99999999999999999999999} {0}", &["a"]),
            "{99999999999999999999999} a"
        );
    }

    #[test]
    fn format_handles_adjacent_and_repeated_placeholders() {
        assert_eq!(format_positional("{0}{1}{0}", &["x", "y"]), "xyx");
        assert_eq!(format_positional("{{0}}", &["x"]), "{x}");
    }
}
