//! # Structure Shape
//!
//! Registration-time helpers for code that keeps a catalogue of validated
//! structures. [`field_paths`] builds the dotted-path lookup table for a
//! structure with the same path logic the validator reports errors with,
//! and [`verify_tags`] rejects a structure whose tags name rules the
//! registry does not know.
//!
//! Paths here are relative to the structure (`Nested.Bar`), without the
//! root type name that validation errors carry.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;

use serde::Serialize;
use tagval_core::{Traverse, ValidatorConfig, WalkError, Walker};
use tagval_rules::{Registry, RuleSet, REQUIRED};
use thiserror::Error;

use crate::report::ValidateError;

/// Tag value that opts a field out of validation.
pub(crate) const SKIP_TAG: &str = "-";

/// Metadata for one field reachable from a structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    /// Raw field identifier.
    pub ident: String,
    /// Name used in messages.
    pub name: String,
    /// Kind of the field's value, e.g. `string` or `pointer`.
    pub kind: String,
    /// The raw rule tag, if any.
    pub rules: Option<String>,
}

/// A tag entry naming a rule the registry does not provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedRule {
    pub path: String,
    pub rule: String,
}

impl fmt::Display for UnresolvedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: unknown rule '{}'", self.path, self.rule)
    }
}

/// Error from [`verify_tags`].
#[derive(Error, Debug)]
pub enum TagVerificationError {
    /// The sample could not be traversed.
    #[error(transparent)]
    Traversal(#[from] ValidateError),

    /// One or more tags name unregistered rules.
    #[error("unresolved rules: {}", join(.0))]
    UnresolvedRules(Vec<UnresolvedRule>),
}

fn join(rules: &[UnresolvedRule]) -> String {
    rules.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn traversal_error(err: WalkError<Infallible>) -> ValidateError {
    match err {
        WalkError::InvalidRoot(reason) => ValidateError::InvalidArgument(reason),
        WalkError::DepthExceeded { limit, path } => ValidateError::DepthExceeded { limit, path },
        WalkError::Aborted(never) => match never {},
    }
}

/// Dotted path to field metadata for every field reachable from `root`.
///
/// Sequence and map contents appear with the indices and keys present in
/// `root`, so pass a sample populated the way lookups expect. When two
/// fields share a path (a `-` name flattens a field into its parent) the
/// first one visited wins.
pub fn field_paths(
    root: &dyn Traverse,
    config: &ValidatorConfig,
) -> Result<BTreeMap<String, FieldInfo>, ValidateError> {
    let mut table = BTreeMap::new();
    Walker::new(config)
        .walk(root, |visit| -> Result<(), Infallible> {
            let Some(meta) = visit.meta.filter(|_| visit.is_field_head()) else {
                return Ok(());
            };
            table.entry(visit.path.to_string()).or_insert_with(|| FieldInfo {
                ident: meta.ident().to_string(),
                name: meta.display_name(&config.name_key).to_string(),
                kind: visit.node.kind().to_string(),
                rules: meta.tag().get(&config.tag_key).map(str::to_string),
            });
            Ok(())
        })
        .map_err(traversal_error)?;
    Ok(table)
}

/// Parse every rule tag on `sample` and check each named rule against
/// `registry`.
///
/// # Errors
///
/// [`TagVerificationError::UnresolvedRules`] lists every unknown rule with
/// its path.
pub fn verify_tags(
    sample: &dyn Traverse,
    registry: &Registry,
    config: &ValidatorConfig,
) -> Result<(), TagVerificationError> {
    let mut unresolved = Vec::new();
    Walker::new(config)
        .walk(sample, |visit| -> Result<(), Infallible> {
            let Some(meta) = visit.meta.filter(|_| visit.is_field_head()) else {
                return Ok(());
            };
            let Some(tag) = meta.tag().get(&config.tag_key) else {
                return Ok(());
            };
            if tag.trim() == SKIP_TAG {
                return Ok(());
            }
            for entry in &RuleSet::parse(tag) {
                if entry.name() != REQUIRED && !registry.contains(entry.name()) {
                    unresolved.push(UnresolvedRule {
                        path: visit.path.to_string(),
                        rule: entry.name().to_string(),
                    });
                }
            }
            Ok(())
        })
        .map_err(traversal_error)?;

    if unresolved.is_empty() {
        tracing::debug!("rule tags verified");
        Ok(())
    } else {
        Err(TagVerificationError::UnresolvedRules(unresolved))
    }
}
