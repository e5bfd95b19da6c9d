//! # tagval-engine — Tag-Driven Structure Validation
//!
//! Validates any structure declared with [`tagval_core::structure!`] against
//! the rules named in its fields' rule tags.
//!
//! ```
//! use tagval_core::structure;
//! use tagval_engine::validate;
//!
//! struct Engine {
//!     name: String,
//!     displacement: u32,
//! }
//!
//! structure!(Engine {
//!     name => { json: "Name", is: "required,in(V8|V6)" },
//!     displacement => { json: "Displacement", is: "min(2000)" },
//! });
//!
//! let engine = Engine { name: "V2".into(), displacement: 1999 };
//! let errors = validate(&engine).unwrap_err().into_validation_errors().unwrap();
//! assert_eq!(errors.len(), 2);
//! assert_eq!(
//!     errors.to_string(),
//!     "Displacement must be at least 2000;Name must be one of allowed values",
//! );
//! ```
//!
//! ## Crate Policy
//!
//! - Validation is synchronous and spawns no work. The only shared state is
//!   the rule [`tagval_rules::Registry`], which is safe for concurrent use.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod engine;
pub mod report;
pub mod shape;

pub use engine::Validator;
pub use report::{ErrorKind, ValidateError, ValidationError, ValidationErrors};
pub use shape::{field_paths, verify_tags, FieldInfo, TagVerificationError, UnresolvedRule};

use tagval_core::Traverse;

/// Validate `value` with the process-wide registry and default configuration.
///
/// # Errors
///
/// See [`Validator::validate`].
pub fn validate(value: &dyn Traverse) -> Result<(), ValidateError> {
    Validator::new().validate(value)
}
