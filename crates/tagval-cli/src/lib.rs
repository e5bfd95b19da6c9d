//! # tagval-cli — Command-Line Interface
//!
//! ## Subcommands
//!
//! - `rules` — list the registered rule catalogue
//! - `check` — validate ad-hoc values against a rule tag
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handlers return rendered output instead of printing, so they can be
//!   tested without capturing stdout.
//! - Validation semantics live in `tagval-engine`; nothing here re-implements
//!   rule evaluation.

pub mod check;
pub mod config;
pub mod rules;
