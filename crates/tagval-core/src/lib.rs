//! # tagval-core — Foundational Types for tagval
//!
//! This crate is the leaf of the tagval workspace. It defines the
//! capability-based node model that lets the validation engine inspect
//! arbitrary Rust values without runtime reflection, and the walker that
//! traverses those values depth first.
//!
//! ## Key Design Principles
//!
//! 1. **Values describe themselves.** Every traversable type implements
//!    [`Traverse`] and returns a [`Node`] naming its kind: scalar,
//!    indirection, sequence, fixed array, map or structure. Structures
//!    implement [`Structure`] (usually through the [`structure!`] macro)
//!    and expose their fields with metadata and [`StructTag`]s.
//!
//! 2. **Zero value and logical emptiness are distinct.** [`Traverse::is_zero`]
//!    is the type's zero value; [`Traverse::is_logically_empty`] additionally
//!    treats a populated indirection as empty when its pointee is empty.
//!
//! 3. **The walker is kind-driven.** [`Walker`] never looks at concrete
//!    types. Indirections are visited twice (the reference, then the
//!    pointee), structures recurse into exported fields, sequences append
//!    indices to the path and maps append keys.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `tagval-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod node;
pub mod path;
pub mod structure;
pub mod walker;

// Re-export primary types for ergonomic imports.
pub use config::ValidatorConfig;
pub use error::{ConfigError, WalkError};
pub use node::{Kind, Node, Traverse};
pub use path::FieldPath;
pub use structure::{Field, FieldMeta, StructTag, Structure};
pub use walker::{Visit, Walker};
