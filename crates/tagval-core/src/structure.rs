//! # Structures, Fields and Struct Tags
//!
//! A [`Structure`] lists its fields in declaration order. Each [`Field`]
//! pairs a borrowed value with [`FieldMeta`]: the Rust identifier, whether
//! the field is exported, and a [`StructTag`] of `key: value` annotations.
//!
//! Two tag keys matter to tagval (both configurable, see
//! [`crate::ValidatorConfig`]):
//!
//! - the rule key (`is`) holds the rule expression parsed by the engine;
//! - the name key (`json`) holds the external name used in paths and
//!   messages. Its first comma-separated component is the name; an empty
//!   component falls back to the identifier and `-` suppresses the path
//!   segment without stopping traversal of the field's children.
//!
//! ## Declaring a structure
//!
//! ```
//! use tagval_core::{structure, Traverse};
//!
//! struct Person {
//!     name: String,
//!     age: u32,
//!     cache: Vec<u8>,
//! }
//!
//! structure!(Person {
//!     name => { json: "name", is: "required,alpha" },
//!     age => { is: "range(18|130)" },
//!     priv cache,
//! });
//!
//! let p = Person { name: "Ada".into(), age: 36, cache: vec![] };
//! assert!(!p.is_zero());
//! ```

use crate::node::Traverse;

/// A structured value with named fields.
pub trait Structure {
    /// Type name, used as the first segment of error paths.
    fn type_name(&self) -> &str;

    /// All fields in declaration order, including non-exported ones.
    fn fields(&self) -> Vec<Field<'_>>;
}

/// Ordered `key: value` annotations attached to a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructTag<'a> {
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> StructTag<'a> {
    /// An empty tag.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add an annotation. A repeated key shadows the earlier one on lookup.
    pub fn with(mut self, key: &'a str, value: &'a str) -> Self {
        self.entries.push((key, value));
        self
    }

    /// Look up the value for `key`.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// True when no annotations are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All annotations in declaration order.
    pub fn entries(&self) -> &[(&'a str, &'a str)] {
        &self.entries
    }
}

/// Metadata describing one field of a structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMeta<'a> {
    ident: &'a str,
    tag: StructTag<'a>,
    exported: bool,
}

impl<'a> FieldMeta<'a> {
    /// Metadata for an exported field.
    pub fn new(ident: &'a str) -> Self {
        Self {
            ident,
            tag: StructTag::new(),
            exported: true,
        }
    }

    /// The raw field identifier.
    pub fn ident(&self) -> &'a str {
        self.ident
    }

    /// The field's annotations.
    pub fn tag(&self) -> &StructTag<'a> {
        &self.tag
    }

    /// Whether the walker descends into this field.
    pub fn is_exported(&self) -> bool {
        self.exported
    }

    /// External name derived from the `name_key` annotation.
    ///
    /// Returns `None` when the name is suppressed with `-`; falls back to
    /// the identifier when the annotation is absent or its name component
    /// is empty.
    pub fn external_name(&self, name_key: &str) -> Option<&'a str> {
        match self.tag.get(name_key) {
            None => Some(self.ident),
            Some(raw) => {
                let name = raw.split(',').next().unwrap_or_default().trim();
                match name {
                    "-" => None,
                    "" => Some(self.ident),
                    other => Some(other),
                }
            }
        }
    }

    /// Name used in messages: the external name, or the identifier when
    /// the external name is suppressed.
    pub fn display_name(&self, name_key: &str) -> &'a str {
        self.external_name(name_key).unwrap_or(self.ident)
    }
}

/// One field of a structure: metadata plus a borrowed value.
pub struct Field<'a> {
    meta: FieldMeta<'a>,
    value: &'a dyn Traverse,
}

impl<'a> Field<'a> {
    /// An exported field with no annotations.
    pub fn new(ident: &'a str, value: &'a dyn Traverse) -> Self {
        Self {
            meta: FieldMeta::new(ident),
            value,
        }
    }

    /// A non-exported field. The walker skips it; zero-value checks on the
    /// enclosing structure still see it.
    pub fn private(ident: &'a str, value: &'a dyn Traverse) -> Self {
        let mut field = Self::new(ident, value);
        field.meta.exported = false;
        field
    }

    /// Attach an annotation.
    pub fn tag(mut self, key: &'a str, value: &'a str) -> Self {
        self.meta.tag = self.meta.tag.with(key, value);
        self
    }

    pub fn meta(&self) -> &FieldMeta<'a> {
        &self.meta
    }

    pub fn value(&self) -> &'a dyn Traverse {
        self.value
    }
}

impl std::fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("meta", &self.meta)
            .field("value", &self.value.render())
            .finish()
    }
}

/// Implement [`Structure`] and [`Traverse`] for a struct.
///
/// Each entry is `field`, `field => { key: "value", ... }`, or
/// `priv field` for a non-exported field.
#[macro_export]
macro_rules! structure {
    ($ty:ident { $($body:tt)* }) => {
        impl $crate::Structure for $ty {
            fn type_name(&self) -> &str {
                stringify!($ty)
            }

            #[allow(unused_mut)]
            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                let mut fields = ::std::vec::Vec::new();
                $crate::structure!(@fields self, fields, $($body)*);
                fields
            }
        }

        impl $crate::Traverse for $ty {
            fn node(&self) -> $crate::Node<'_> {
                $crate::Node::Struct(self)
            }
        }
    };

    (@fields $this:ident, $out:ident, ) => {};

    (@fields $this:ident, $out:ident, priv $field:ident $(, $($rest:tt)*)?) => {
        $out.push($crate::Field::private(stringify!($field), &$this.$field));
        $crate::structure!(@fields $this, $out, $($($rest)*)?);
    };

    (@fields $this:ident, $out:ident, $field:ident => { $($key:ident : $val:expr),* $(,)? } $(, $($rest:tt)*)?) => {
        $out.push(
            $crate::Field::new(stringify!($field), &$this.$field)
                $(.tag(stringify!($key), $val))*
        );
        $crate::structure!(@fields $this, $out, $($($rest)*)?);
    };

    (@fields $this:ident, $out:ident, $field:ident $(, $($rest:tt)*)?) => {
        $out.push($crate::Field::new(stringify!($field), &$this.$field));
        $crate::structure!(@fields $this, $out, $($($rest)*)?);
    };
}
