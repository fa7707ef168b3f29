//! Parser for the line-oriented `KEY=VALUE` directive format used by project files.

use crate::diagnostics::Diagnostics;

/// A mapping from directive keys to their raw values, in the order the keys were declared.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DirectiveMap {
    entries: Vec<(String, String)>,
}
impl DirectiveMap {
    pub fn new() -> Self {
        DirectiveMap { entries: Vec::new() }
    }

    /// Parses directives from text.
    ///
    /// Malformed lines and duplicate keys are reported to `diag` and skipped. The first value
    /// declared for a key is the one that is kept.
    pub fn parse(text: &str, diag: &mut Diagnostics) -> DirectiveMap {
        let mut map = DirectiveMap::new();
        for (line_no, line) in text.lines().enumerate() {
            let line_no = line_no + 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                diag.warn(Some(line_no), format!("Unparsed key: {line} at line {line_no}"));
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() {
                diag.warn(Some(line_no), format!("Missing key: {line} at line {line_no}"));
                continue;
            }

            if !map.insert(key, value) {
                diag.error(
                    Some(line_no),
                    format!(
                        "Duplicated key detected at line {line_no}, key {key} is already \
                         declared. New value will be ignored."
                    ),
                );
                continue;
            }
            diag.debug(
                Some(line_no),
                format!("Found key-value pair at line {line_no}: key {key}, value {value}"),
            );
        }
        map
    }

    /// Adds a directive. Returns `false` without changing the map if the key already exists.
    pub fn insert(&mut self, key: &str, value: &str) -> bool {
        if self.contains_key(key) {
            false
        } else {
            self.entries.push((key.to_string(), value.to_string()));
            true
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|x| x.0 == key)
            .map(|x| x.1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|x| (x.0.as_str(), x.1.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders the directives back into the text format accepted by [`DirectiveMap::parse`].
    pub fn to_source(&self) -> String {
        let mut accum = String::new();
        for (key, value) in self.iter() {
            accum.push_str(key);
            accum.push('=');
            accum.push_str(value);
            accum.push('\n');
        }
        accum
    }
}
