//! # Validation Report
//!
//! Structured results of a validation call. Every [`ValidationError`]
//! carries the failing field's display name, its dotted path from the
//! validation root, the cause and the rendered message. A call that finds
//! any failure returns them all in one [`ValidationErrors`] collection, in
//! visit order.

use std::fmt;

use serde::{Serialize, Serializer};
use tagval_core::FieldPath;
use thiserror::Error;

/// Template for a missing `required` field.
pub const REQUIRED_MESSAGE: &str = "{field} is a required field";

/// Why a field failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorKind {
    /// The field is empty and tagged `required`.
    Required,
    /// The field's value failed the named rule.
    RuleFailed { rule: String },
    /// The field's tag names a rule that is not registered.
    UnknownRule { rule: String },
}

/// One field-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    field: String,
    #[serde(serialize_with = "dotted")]
    path: FieldPath,
    #[serde(flatten)]
    kind: ErrorKind,
    message: String,
    custom_message: bool,
}

fn dotted<S: Serializer>(path: &FieldPath, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(path)
}

impl ValidationError {
    pub(crate) fn new(
        field: impl Into<String>,
        path: FieldPath,
        kind: ErrorKind,
        message: String,
        custom_message: bool,
    ) -> Self {
        Self {
            field: field.into(),
            path,
            kind,
            message,
            custom_message,
        }
    }

    /// Display name of the failing field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Dotted path from the validation root, e.g. `Outer.Items.2.Name`.
    pub fn path(&self) -> String {
        self.path.to_string()
    }

    pub fn segments(&self) -> &[String] {
        self.path.segments()
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Name of the rule involved, if any.
    pub fn rule(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Required => None,
            ErrorKind::RuleFailed { rule } | ErrorKind::UnknownRule { rule } => Some(rule),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when the message came from a `~custom message` in the tag.
    pub fn has_custom_message(&self) -> bool {
        self.custom_message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// All failures from one validation call, in visit order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors whose dotted path equals `path`.
    pub fn for_path<'s>(&'s self, path: &'s str) -> impl Iterator<Item = &'s ValidationError> + 's {
        self.errors.iter().filter(move |error| error.path() == path)
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

/// Messages sorted and joined with `;` so the rendering does not depend
/// on field order.
impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut messages: Vec<&str> = self.errors.iter().map(ValidationError::message).collect();
        messages.sort_unstable();
        f.write_str(&messages.join(";"))
    }
}

impl std::error::Error for ValidationErrors {}

impl<'e> IntoIterator for &'e ValidationErrors {
    type Item = &'e ValidationError;
    type IntoIter = std::slice::Iter<'e, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Error returned by [`crate::Validator::validate`].
#[derive(Error, Debug)]
pub enum ValidateError {
    /// The argument is a nil reference or does not lead to a structure.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The value graph is deeper than the configured limit.
    #[error("maximum traversal depth {limit} exceeded at '{path}'")]
    DepthExceeded {
        /// Configured depth limit.
        limit: usize,
        /// Dotted path where the limit was hit.
        path: String,
    },

    /// One or more fields failed validation.
    #[error("{0}")]
    Invalid(ValidationErrors),
}

impl ValidateError {
    /// The field failures, when this is [`ValidateError::Invalid`].
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ValidateError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn into_validation_errors(self) -> Option<ValidationErrors> {
        match self {
            ValidateError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
