//! # Validator Registry
//!
//! Name-keyed table of [`Rule`]s. Registration is additive and replaces
//! an existing rule of the same name. Every registration installs the
//! rule and its negation (`!name`) under a single write lock, so readers
//! never observe one without the other.
//!
//! ## Thread Safety
//!
//! `Registry` is `Send + Sync`. Lookups take a `parking_lot` read lock and
//! clone an `Arc<Rule>`, so predicates run without holding the lock.
//! `parking_lot::RwLock` is non-poisoning: a panicking registration does
//! not leave the table unusable.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;

use crate::library;
use crate::rule::Rule;
use crate::tag::is_valid_identifier;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::with_standard_rules);

/// Error returned by registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No rule is registered under this name.
    #[error("unknown rule '{0}'")]
    UnknownRule(String),

    /// The name cannot be referenced from a rule tag.
    #[error("invalid rule name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

/// Name and message template of a registered rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleInfo {
    pub name: String,
    pub message: String,
}

/// Table of rules available to the engine.
#[derive(Debug, Default)]
pub struct Registry {
    rules: RwLock<HashMap<String, Arc<Rule>>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the standard rule library.
    pub fn with_standard_rules() -> Self {
        let registry = Self::new();
        library::install(&registry);
        registry
    }

    /// The process-wide registry, initialised with the standard library on
    /// first use.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register a rule whose predicate ignores parameters.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] if `name` is empty, starts
    /// with `!`, or contains characters a rule tag cannot reference.
    pub fn register<F>(&self, name: &str, message: &str, predicate: F) -> Result<(), RegistryError>
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.register_with_params(name, message, move |value: &str, _params: &[&str]| {
            predicate(value)
        })
    }

    /// Register a rule whose predicate receives the tag's parameters.
    ///
    /// # Errors
    ///
    /// See [`Registry::register`].
    pub fn register_with_params<F>(
        &self,
        name: &str,
        message: &str,
        predicate: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&str, &[&str]) -> bool + Send + Sync + 'static,
    {
        check_name(name)?;
        self.install(Rule::new(name, message, predicate));
        Ok(())
    }

    /// Insert a rule and its negation. Names are trusted.
    pub(crate) fn install(&self, rule: Rule) {
        let negated = rule.negated();
        let name = rule.name().to_string();
        {
            let mut rules = self.rules.write();
            rules.insert(negated.name().to_string(), Arc::new(negated));
            rules.insert(name.clone(), Arc::new(rule));
        }
        tracing::debug!(rule = %name, "registered validation rule");
    }

    /// Fetch a rule by name (`!name` for negations).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownRule`] if nothing is registered
    /// under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<Rule>, RegistryError> {
        self.rules
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownRule(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.read().contains_key(name)
    }

    /// Number of registered names, negations included.
    pub fn len(&self) -> usize {
        self.rules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.read().is_empty()
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Name and template of every non-negated rule, sorted by name.
    pub fn catalog(&self) -> Vec<RuleInfo> {
        let rules = self.rules.read();
        let mut infos: Vec<RuleInfo> = rules
            .values()
            .filter(|rule| !rule.name().starts_with('!'))
            .map(|rule| RuleInfo {
                name: rule.name().to_string(),
                message: rule.message().to_string(),
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }
}

fn check_name(name: &str) -> Result<(), RegistryError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.starts_with('!') {
        Some("negations are derived automatically")
    } else if !is_valid_identifier(name) || name.contains(['(', ')', '|', '~', ',', ' ']) {
        Some("name contains characters a rule tag cannot reference")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(RegistryError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
