//! # Validation Engine
//!
//! [`Validator`] drives the [`Walker`] over a structure and applies the
//! rules declared in each field's rule tag.
//!
//! ## Per-Field Algorithm
//!
//! Rules are evaluated once per field, on the field's outermost node.
//! Dereferenced pointees of the same field are still traversed so nested
//! structures are validated, but their own rules are not re-applied.
//!
//! 1. Read the tag under [`ValidatorConfig::tag_key`]; no tag (or `-`)
//!    means nothing to check.
//! 2. Parse it into a [`RuleSet`].
//! 3. If the value is logically empty, only `required` matters: emit a
//!    required-field error when it is present, otherwise pass.
//! 4. Otherwise drop `required` and evaluate the remaining rules in
//!    declaration order. The first unknown or failing rule records an
//!    error and stops this field; siblings and descendants continue.
//!
//! Errors across the whole value are collected into one report.

use std::convert::Infallible;

use tagval_core::{FieldPath, Node, Traverse, ValidatorConfig, Visit, WalkError, Walker};
use tagval_rules::{format_template, Registry, RuleSet, REQUIRED};

use crate::report::{ErrorKind, ValidateError, ValidationError, ValidationErrors, REQUIRED_MESSAGE};
use crate::shape::{self, TagVerificationError, SKIP_TAG};

/// Validates tagged structures against a rule registry.
#[derive(Debug, Clone)]
pub struct Validator<'r> {
    registry: &'r Registry,
    config: ValidatorConfig,
}

impl Validator<'static> {
    /// A validator over the process-wide registry with default configuration.
    pub fn new() -> Self {
        Self::with_registry(Registry::global())
    }
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> Validator<'r> {
    pub fn with_registry(registry: &'r Registry) -> Self {
        Self {
            registry,
            config: ValidatorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Validate `value`, which must be a structure or a chain of populated
    /// references ending in one.
    ///
    /// # Errors
    ///
    /// - [`ValidateError::InvalidArgument`] for a nil reference or a value
    ///   that is not a structure.
    /// - [`ValidateError::DepthExceeded`] if the value graph is deeper than
    ///   [`ValidatorConfig::max_depth`].
    /// - [`ValidateError::Invalid`] with every field failure.
    pub fn validate(&self, value: &dyn Traverse) -> Result<(), ValidateError> {
        let root = root_type_name(value)?;
        let walker = Walker::new(&self.config);
        let mut errors = Vec::new();

        walker
            .walk(value, |visit| -> Result<(), Infallible> {
                if visit.is_field_head() {
                    self.check_field(visit, &root, &mut errors);
                }
                Ok(())
            })
            .map_err(|err| match err {
                WalkError::InvalidRoot(reason) => ValidateError::InvalidArgument(reason),
                WalkError::DepthExceeded { limit, path } => ValidateError::DepthExceeded {
                    limit,
                    path: qualify(&root, &path),
                },
                WalkError::Aborted(never) => match never {},
            })?;

        tracing::debug!(root = %root, errors = errors.len(), "validation finished");

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidateError::Invalid(ValidationErrors::new(errors)))
        }
    }

    /// Check that every rule named in `sample`'s tags is registered.
    pub fn verify(&self, sample: &dyn Traverse) -> Result<(), TagVerificationError> {
        shape::verify_tags(sample, self.registry, &self.config)
    }

    fn check_field(&self, visit: &Visit<'_, '_>, root: &str, errors: &mut Vec<ValidationError>) {
        let Some(meta) = visit.meta else {
            return;
        };
        let Some(tag) = meta.tag().get(&self.config.tag_key) else {
            return;
        };
        if tag.trim() == SKIP_TAG {
            return;
        }
        let rules = RuleSet::parse(tag);
        if rules.is_empty() {
            return;
        }

        let field = meta.display_name(&self.config.name_key);
        let path = FieldPath::starting_at(root).join(visit.path);

        if visit.value.is_logically_empty() {
            if let Some(required) = rules.get(REQUIRED) {
                let (message, custom) = match required.custom_message() {
                    Some(custom) => (format_template(custom, field, &[]), true),
                    None => (format_template(REQUIRED_MESSAGE, field, &[]), false),
                };
                errors.push(ValidationError::new(
                    field,
                    path,
                    ErrorKind::Required,
                    message,
                    custom,
                ));
            }
            return;
        }

        let rendered = visit.value.render();
        for entry in rules.without(REQUIRED).iter() {
            let rule = match self.registry.get(entry.name()) {
                Ok(rule) => rule,
                Err(err) => {
                    tracing::warn!(field, path = %path, rule = entry.name(), "{err}");
                    errors.push(ValidationError::new(
                        field,
                        path,
                        ErrorKind::UnknownRule {
                            rule: entry.name().to_string(),
                        },
                        format!("{field}: unknown validation rule '{}'", entry.name()),
                        false,
                    ));
                    return;
                }
            };

            let params = entry.params();
            let passed = rule.check(&rendered, &params);
            tracing::trace!(field, rule = entry.name(), passed, "rule evaluated");
            if passed {
                continue;
            }

            let (message, custom) = match entry.custom_message() {
                Some(custom) => (format_template(custom, field, &params), true),
                None => (rule.format_message(field, &params), false),
            };
            errors.push(ValidationError::new(
                field,
                path,
                ErrorKind::RuleFailed {
                    rule: entry.name().to_string(),
                },
                message,
                custom,
            ));
            return;
        }
    }
}

/// Follow populated references down to the root structure's type name.
fn root_type_name(value: &dyn Traverse) -> Result<String, ValidateError> {
    let mut current = value;
    loop {
        match current.node() {
            Node::Pointer(Some(target)) => current = target,
            Node::Pointer(None) => {
                return Err(ValidateError::InvalidArgument(
                    "value is a nil reference".to_string(),
                ))
            }
            Node::Struct(structure) => return Ok(structure.type_name().to_string()),
            other => {
                return Err(ValidateError::InvalidArgument(format!(
                    "expected a structure, found {}",
                    other.kind()
                )))
            }
        }
    }
}

fn qualify(root: &str, path: &str) -> String {
    if path.is_empty() {
        root.to_string()
    } else {
        format!("{root}.{path}")
    }
}
