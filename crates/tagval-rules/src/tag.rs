//! # Rule Tag Parser
//!
//! Grammar of a rule tag:
//!
//! ```text
//! tag    = entry { "," entry }
//! entry  = [ "!" ] name [ "(" params ")" ] [ "~" message ]
//! params = param { "|" param }
//! ```
//!
//! The part of an entry before `~` must satisfy [`is_valid_identifier`];
//! entries that fail are dropped silently so unrelated tag content never
//! breaks validation. Entries keep their declaration index, and a repeated
//! entry replaces the earlier one at the later position.

/// Name of the rule that is handled by the engine itself.
pub const REQUIRED: &str = "required";

/// Punctuation allowed in a tag entry besides letters and digits.
const TAG_SAFE_PUNCTUATION: &str = "\\'\"!#$%&()*+-./:<=>?@[]^_{|}~ ";

/// True when `s` is non-empty and contains only letters, digits and
/// tag-safe punctuation.
pub fn is_valid_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphabetic() || c.is_numeric() || TAG_SAFE_PUNCTUATION.contains(c))
}

/// One parsed rule invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    name: String,
    params: String,
    custom_message: Option<String>,
    order: usize,
}

impl RuleEntry {
    /// Rule name as written, including a leading `!`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rule name without the negation prefix.
    pub fn bare_name(&self) -> &str {
        self.name.strip_prefix('!').unwrap_or(&self.name)
    }

    pub fn is_negated(&self) -> bool {
        self.name.starts_with('!')
    }

    /// Raw parameter text between the parentheses.
    pub fn raw_params(&self) -> &str {
        &self.params
    }

    /// Parameters split on `|`. No parentheses means no parameters.
    pub fn params(&self) -> Vec<&str> {
        if self.params.is_empty() {
            Vec::new()
        } else {
            self.params.split('|').collect()
        }
    }

    /// Message given after `~`, if any.
    pub fn custom_message(&self) -> Option<&str> {
        self.custom_message.as_deref()
    }

    /// Position of the entry in the tag.
    pub fn order(&self) -> usize {
        self.order
    }

    fn same_invocation(&self, other: &RuleEntry) -> bool {
        self.name == other.name && self.params == other.params
    }
}

/// Ordered rule invocations declared on one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    entries: Vec<RuleEntry>,
}

impl RuleSet {
    /// Parse a rule tag.
    pub fn parse(tag: &str) -> RuleSet {
        let mut entries: Vec<RuleEntry> = Vec::new();

        for (order, option) in tag.split(',').enumerate() {
            let option = option.trim();
            let (head, custom_message) = match option.split_once('~') {
                Some((head, message)) => (head.trim_end(), Some(message.to_string())),
                None => (option, None),
            };
            if !is_valid_identifier(head) {
                continue;
            }

            let (name, params) = split_invocation(head);
            if name.is_empty() || name == "!" {
                continue;
            }

            let entry = RuleEntry {
                name: name.to_string(),
                params: params.to_string(),
                custom_message,
                order,
            };
            entries.retain(|existing| !existing.same_invocation(&entry));
            entries.push(entry);
        }

        RuleSet { entries }
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry with the given name (as written).
    pub fn get(&self, name: &str) -> Option<&RuleEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// A copy with every entry named `name` removed.
    pub fn without(&self, name: &str) -> RuleSet {
        RuleSet {
            entries: self
                .entries
                .iter()
                .filter(|entry| entry.name != name)
                .cloned()
                .collect(),
        }
    }

    /// Entry names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a RuleEntry;
    type IntoIter = std::slice::Iter<'a, RuleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Split `name(params)` into its parts. Anything not ending in `)` is a
/// bare name.
fn split_invocation(head: &str) -> (&str, &str) {
    match (head.find('('), head.ends_with(')')) {
        (Some(open), true) => (&head[..open], &head[open + 1..head.len() - 1]),
        _ => (head, ""),
    }
}
