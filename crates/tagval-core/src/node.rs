//! # Traversable Node Model
//!
//! [`Traverse`] is the capability every validatable value provides: it
//! describes itself as a [`Node`]. The walker and the engine only ever see
//! nodes, so they work over any shape built from the implementations in
//! this module plus user structures declared with [`crate::structure!`].
//!
//! ## Indirections
//!
//! `Option<T>`, `Box<T>`, `Box<dyn Traverse>`, `Rc<T>`, `Arc<T>` and `&T`
//! are all [`Node::Pointer`]. `None` is the nil reference.
//!
//! ## Zero Value vs Logical Emptiness
//!
//! [`Traverse::is_zero`] is the type's zero value: `0`, `false`, `""`,
//! `None`, empty collections, all-zero arrays and all-zero structures.
//! [`Traverse::is_logically_empty`] differs only for populated indirections,
//! which are empty when their pointee is logically empty. A `Some("")` is
//! therefore empty for `required` purposes even though it is not zero.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::{self, Display};
use std::rc::Rc;
use std::sync::Arc;

use crate::structure::Structure;

/// A value that can describe itself to the walker.
pub trait Traverse {
    /// Describe this value as a node.
    fn node(&self) -> Node<'_>;

    /// True when this value is its type's zero value.
    fn is_zero(&self) -> bool {
        self.node().is_zero()
    }

    /// True when this value carries no meaningful content.
    fn is_logically_empty(&self) -> bool {
        self.node().is_logically_empty()
    }

    /// The value's default string form, as handed to rule predicates.
    fn render(&self) -> String {
        self.node().render()
    }
}

/// The shape of a single value.
pub enum Node<'a> {
    /// Boolean scalar.
    Bool(bool),
    /// Signed integer scalar.
    Int(i64),
    /// Unsigned integer scalar.
    Uint(u64),
    /// Double-precision floating point scalar.
    Float(f64),
    /// Single-precision floating point scalar. Rendered at its own
    /// precision so `1.1f32` reads `1.1`.
    Float32(f32),
    /// Character scalar.
    Char(char),
    /// Text scalar.
    Str(&'a str),
    /// Indirection; `None` is the nil reference.
    Pointer(Option<&'a dyn Traverse>),
    /// Variable-length sequence.
    Sequence(Vec<&'a dyn Traverse>),
    /// Fixed-size array.
    Array(Vec<&'a dyn Traverse>),
    /// Associative value; entries are ordered by key text.
    Map(Vec<(String, &'a dyn Traverse)>),
    /// Structured value with named fields.
    Struct(&'a dyn Structure),
}

/// Node kind without payload, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Char,
    Str,
    Pointer,
    Sequence,
    Array,
    Map,
    Struct,
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Char => "char",
            Kind::Str => "string",
            Kind::Pointer => "pointer",
            Kind::Sequence => "sequence",
            Kind::Array => "array",
            Kind::Map => "map",
            Kind::Struct => "struct",
        };
        f.write_str(name)
    }
}

impl<'a> Node<'a> {
    /// Payload-free kind of this node.
    pub fn kind(&self) -> Kind {
        match self {
            Node::Bool(_) => Kind::Bool,
            Node::Int(_) => Kind::Int,
            Node::Uint(_) => Kind::Uint,
            Node::Float(_) | Node::Float32(_) => Kind::Float,
            Node::Char(_) => Kind::Char,
            Node::Str(_) => Kind::Str,
            Node::Pointer(_) => Kind::Pointer,
            Node::Sequence(_) => Kind::Sequence,
            Node::Array(_) => Kind::Array,
            Node::Map(_) => Kind::Map,
            Node::Struct(_) => Kind::Struct,
        }
    }

    /// Zero-value test. Arrays and structures are zero when every element
    /// or field (exported or not) is zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Node::Bool(b) => !b,
            Node::Int(n) => *n == 0,
            Node::Uint(n) => *n == 0,
            Node::Float(n) => *n == 0.0,
            Node::Float32(n) => *n == 0.0,
            Node::Char(c) => *c == '\0',
            Node::Str(s) => s.is_empty(),
            Node::Pointer(target) => target.is_none(),
            Node::Sequence(items) => items.is_empty(),
            Node::Array(items) => items.iter().all(|item| item.is_zero()),
            Node::Map(entries) => entries.is_empty(),
            Node::Struct(s) => s.fields().iter().all(|field| field.value().is_zero()),
        }
    }

    /// Logical emptiness: the zero value, or a populated indirection whose
    /// pointee is itself logically empty.
    pub fn is_logically_empty(&self) -> bool {
        match self {
            Node::Pointer(Some(target)) => target.is_logically_empty(),
            other => other.is_zero(),
        }
    }

    /// Default string form. Indirections render their pointee.
    pub fn render(&self) -> String {
        match self {
            Node::Bool(b) => b.to_string(),
            Node::Int(n) => n.to_string(),
            Node::Uint(n) => n.to_string(),
            Node::Float(n) => n.to_string(),
            Node::Float32(n) => n.to_string(),
            Node::Char(c) => c.to_string(),
            Node::Str(s) => (*s).to_string(),
            Node::Pointer(None) => "<nil>".to_string(),
            Node::Pointer(Some(target)) => target.render(),
            Node::Sequence(items) | Node::Array(items) => {
                let parts: Vec<String> = items.iter().map(|item| item.render()).collect();
                format!("[{}]", parts.join(" "))
            }
            Node::Map(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{key}:{}", value.render()))
                    .collect();
                format!("map[{}]", parts.join(" "))
            }
            Node::Struct(s) => {
                let parts: Vec<String> =
                    s.fields().iter().map(|field| field.value().render()).collect();
                format!("{{{}}}", parts.join(" "))
            }
        }
    }
}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node::{:?}({})", self.kind(), self.render())
    }
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

macro_rules! impl_traverse_scalar {
    ($variant:ident as $repr:ty: $($ty:ty),+) => {
        $(
            impl Traverse for $ty {
                fn node(&self) -> Node<'_> {
                    Node::$variant(*self as $repr)
                }
            }
        )+
    };
}

impl_traverse_scalar!(Int as i64: i8, i16, i32, i64, isize);
impl_traverse_scalar!(Uint as u64: u8, u16, u32, u64, usize);
impl_traverse_scalar!(Float as f64: f64);
impl_traverse_scalar!(Float32 as f32: f32);

impl Traverse for bool {
    fn node(&self) -> Node<'_> {
        Node::Bool(*self)
    }
}

impl Traverse for char {
    fn node(&self) -> Node<'_> {
        Node::Char(*self)
    }
}

impl Traverse for str {
    fn node(&self) -> Node<'_> {
        Node::Str(self)
    }
}

impl Traverse for String {
    fn node(&self) -> Node<'_> {
        Node::Str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Indirections
// ---------------------------------------------------------------------------

impl<T: Traverse> Traverse for Option<T> {
    fn node(&self) -> Node<'_> {
        Node::Pointer(self.as_ref().map(|v| v as &dyn Traverse))
    }
}

impl<T: Traverse> Traverse for Box<T> {
    fn node(&self) -> Node<'_> {
        Node::Pointer(Some(&**self))
    }
}

impl Traverse for Box<dyn Traverse> {
    fn node(&self) -> Node<'_> {
        Node::Pointer(Some(&**self))
    }
}

impl<T: Traverse> Traverse for Rc<T> {
    fn node(&self) -> Node<'_> {
        Node::Pointer(Some(&**self))
    }
}

impl<T: Traverse> Traverse for Arc<T> {
    fn node(&self) -> Node<'_> {
        Node::Pointer(Some(&**self))
    }
}

impl<T: Traverse> Traverse for &T {
    fn node(&self) -> Node<'_> {
        Node::Pointer(Some(*self))
    }
}

// Borrowed text and slices behave like their owned forms, not like
// indirections.
impl Traverse for &str {
    fn node(&self) -> Node<'_> {
        Node::Str(self)
    }
}

// ---------------------------------------------------------------------------
// Sequences and arrays
// ---------------------------------------------------------------------------

fn elements<T: Traverse>(items: &[T]) -> Vec<&dyn Traverse> {
    items.iter().map(|item| item as &dyn Traverse).collect()
}

impl<T: Traverse> Traverse for [T] {
    fn node(&self) -> Node<'_> {
        Node::Sequence(elements(self))
    }
}

impl<T: Traverse> Traverse for &[T] {
    fn node(&self) -> Node<'_> {
        Node::Sequence(elements(self))
    }
}

impl<T: Traverse> Traverse for Vec<T> {
    fn node(&self) -> Node<'_> {
        Node::Sequence(elements(self))
    }
}

impl<T: Traverse> Traverse for VecDeque<T> {
    fn node(&self) -> Node<'_> {
        Node::Sequence(self.iter().map(|item| item as &dyn Traverse).collect())
    }
}

impl<T: Traverse, const N: usize> Traverse for [T; N] {
    fn node(&self) -> Node<'_> {
        Node::Array(elements(self))
    }
}

// ---------------------------------------------------------------------------
// Maps
// ---------------------------------------------------------------------------

impl<K: Display, V: Traverse, S> Traverse for HashMap<K, V, S> {
    fn node(&self) -> Node<'_> {
        let mut entries: Vec<(String, &dyn Traverse)> = self
            .iter()
            .map(|(key, value)| (key.to_string(), value as &dyn Traverse))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Node::Map(entries)
    }
}

impl<K: Display, V: Traverse> Traverse for BTreeMap<K, V> {
    fn node(&self) -> Node<'_> {
        Node::Map(
            self.iter()
                .map(|(key, value)| (key.to_string(), value as &dyn Traverse))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_zero_values() {
        assert!(0i32.is_zero());
        assert!(0u8.is_zero());
        assert!(0.0f64.is_zero());
        assert!(false.is_zero());
        assert!('\0'.is_zero());
        assert!(String::new().is_zero());
        assert!(!7i64.is_zero());
        assert!(!"x".to_string().is_zero());
        assert!(!true.is_zero());
    }

    #[test]
    fn collections_are_zero_when_empty() {
        assert!(Vec::<i32>::new().is_zero());
        assert!(!vec![0].is_zero());
        assert!(HashMap::<String, i32>::new().is_zero());
        assert!(BTreeMap::<u8, String>::new().is_zero());
    }

    #[test]
    fn arrays_are_zero_when_every_element_is_zero() {
        assert!([0u8; 4].is_zero());
        assert!(![0u8, 0, 1, 0].is_zero());
        assert!(["", ""].is_zero());
    }

    #[test]
    fn pointer_to_empty_string_is_logically_empty_but_not_zero() {
        let value: Option<String> = Some(String::new());
        assert!(!value.is_zero());
        assert!(value.is_logically_empty());

        let none: Option<String> = None;
        assert!(none.is_zero());
        assert!(none.is_logically_empty());

        let boxed: Box<String> = Box::new("set".into());
        assert!(!boxed.is_logically_empty());
    }

    #[test]
    fn nested_indirections_are_followed() {
        let value: Option<Box<i32>> = Some(Box::new(0));
        assert!(value.is_logically_empty());
        let value: Option<Box<i32>> = Some(Box::new(3));
        assert!(!value.is_logically_empty());
    }

    #[test]
    fn single_precision_floats_render_at_their_own_precision() {
        assert_eq!(1.1f32.render(), "1.1");
        assert_eq!(0.1f32.render(), "0.1");
        assert_eq!(1.1f32.node().kind(), Kind::Float);
        assert!(0.0f32.is_zero());
    }

    #[test]
    fn render_default_forms() {
        assert_eq!(42u16.render(), "42");
        assert_eq!((-3i8).render(), "-3");
        assert_eq!(2000.0f64.render(), "2000");
        assert_eq!(1.5f32.render(), "1.5");
        assert_eq!("abc".to_string().render(), "abc");
        assert_eq!(Option::<i32>::None.render(), "<nil>");
        assert_eq!(Some(Arc::new(9u8)).render(), "9");
        assert_eq!(vec!["a", "b"].render(), "[a b]");
        assert_eq!([1, 2, 3].render(), "[1 2 3]");

        let mut map = HashMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        assert_eq!(map.render(), "map[a:1 b:2]");
    }

    #[test]
    fn map_entries_are_ordered_by_key_text() {
        let mut map = HashMap::new();
        for key in ["zeta", "alpha", "mid"] {
            map.insert(key.to_string(), 1u8);
        }
        let Node::Map(entries) = map.node() else {
            panic!("expected map node");
        };
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn kinds() {
        assert_eq!(1u32.node().kind(), Kind::Uint);
        assert_eq!(Some(1).node().kind(), Kind::Pointer);
        assert_eq!([1u8; 2].node().kind(), Kind::Array);
        assert_eq!(vec![1u8].node().kind(), Kind::Sequence);
        assert_eq!(Kind::Str.to_string(), "string");
    }
}
