//! # Rules
//!
//! A [`Rule`] is an immutable triple of name, message template and
//! predicate. Templates use `{field}` for the field's display name and
//! `{0}`, `{1}`, ... for the rule's parameters.

use std::fmt;
use std::sync::Arc;

/// Predicate over a rendered value and the rule's parameters.
pub type Predicate = Arc<dyn Fn(&str, &[&str]) -> bool + Send + Sync>;

/// A named predicate with its message template.
#[derive(Clone)]
pub struct Rule {
    name: String,
    message: String,
    predicate: Predicate,
}

impl Rule {
    pub fn new<F>(name: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str, &[&str]) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            message: message.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unformatted message template.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Run the predicate.
    pub fn check(&self, value: &str, params: &[&str]) -> bool {
        (self.predicate)(value, params)
    }

    /// Render the message template for `field` with `params`.
    pub fn format_message(&self, field: &str, params: &[&str]) -> String {
        format_template(&self.message, field, params)
    }

    /// The logical negation of this rule, named `!name`.
    pub fn negated(&self) -> Rule {
        let inner = Arc::clone(&self.predicate);
        Rule {
            name: format!("!{}", self.name),
            message: negate_message(&self.message),
            predicate: Arc::new(move |value: &str, params: &[&str]| !inner(value, params)),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Rewrite the first `must ` to `must not `.
pub fn negate_message(message: &str) -> String {
    message.replacen("must ", "must not ", 1)
}

/// Fill `{field}` and positional `{N}` placeholders. Unknown placeholders
/// are left untouched.
pub fn format_template(template: &str, field: &str, params: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + field.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = &after[..close];
        match key {
            "field" => out.push_str(field),
            _ => match key.parse::<usize>().ok().and_then(|i| params.get(i)) {
                Some(param) => out.push_str(param),
                None => {
                    out.push('{');
                    out.push_str(key);
                    out.push('}');
                }
            },
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_substitution() {
        assert_eq!(
            format_template("{field} must be between {0} and {1}", "Code", &["3", "5"]),
            "Code must be between 3 and 5"
        );
        assert_eq!(format_template("{field} is a required field", "Age", &[]), "Age is a required field");
    }

    #[test]
    fn unknown_placeholders_are_kept() {
        assert_eq!(format_template("{x} {2} {field}", "F", &["a"]), "{x} {2} F");
        assert_eq!(format_template("dangling {field", "F", &[]), "dangling {field");
    }

    #[test]
    fn negation_rewrites_first_must_only() {
        assert_eq!(
            negate_message("{field} must be a number and must be short"),
            "{field} must not be a number and must be short"
        );
        assert_eq!(negate_message("{field} is odd"), "{field} is odd");
    }

    #[test]
    fn negated_rule_inverts_predicate() {
        let rule = Rule::new("short", "{field} must be short", |v, _| v.len() < 3);
        let not = rule.negated();
        assert_eq!(not.name(), "!short");
        assert_eq!(not.message(), "{field} must not be short");
        assert!(rule.check("ab", &[]));
        assert!(!not.check("ab", &[]));
        assert!(not.check("abcd", &[]));
    }

    #[test]
    fn format_message_uses_params() {
        let rule = Rule::new("min", "{field} must be at least {0}", |_, _| true);
        assert_eq!(rule.format_message("Year", &["2000"]), "Year must be at least 2000");
    }
}
