//! # tagval-rules — Rules, Registry and Tag Parsing
//!
//! Everything the engine needs to turn a rule tag such as
//! `required,length(3|5),!numeric~{field} must not be a number` into
//! predicate calls.
//!
//! ## Tag Parsing (`tag`)
//!
//! [`RuleSet::parse`] splits a tag into ordered [`RuleEntry`] values.
//! Entries failing the identifier grammar are dropped silently; everything
//! else is kept in declaration order.
//!
//! ## Registry (`registry`)
//!
//! [`Registry`] maps rule names to [`Rule`]s. Every registration also
//! installs the negated rule under `!name`, with the first `must ` of the
//! message rewritten to `must not `. [`Registry::global`] is the
//! process-wide instance, initialised once with the standard library.
//!
//! ## Standard Library (`library`)
//!
//! Pure string predicates grouped by concern: text, numeric, network,
//! identifiers, date/time and locale reference data.
//!
//! ## Crate Policy
//!
//! - Depends on no other `tagval-*` crate.
//! - Predicates are pure: they see only the rendered value and parameters.
//! - The registry never panics on lookup; unknown names are errors.

pub mod library;
pub mod registry;
pub mod rule;
pub mod tag;

pub use registry::{Registry, RegistryError, RuleInfo};
pub use rule::{format_template, negate_message, Predicate, Rule};
pub use tag::{is_valid_identifier, RuleEntry, RuleSet, REQUIRED};
