//! # Generic Walker
//!
//! Depth-first traversal over any [`Traverse`] value. The callback sees
//! every node together with the metadata of the field it belongs to and
//! its path from the root.
//!
//! ## Visit Order
//!
//! 1. The node itself.
//! 2. For a populated indirection, the pointee as a second node sharing
//!    the field metadata and path, with `indirection` incremented.
//! 3. For a structure, every exported field (external name appended).
//! 4. For a sequence or array, every element (index appended, no metadata).
//! 5. For a map, every entry (key appended, no metadata).
//!
//! A callback error aborts the traversal immediately. Traversal deeper
//! than the configured limit fails with [`WalkError::DepthExceeded`].

use crate::config::ValidatorConfig;
use crate::error::WalkError;
use crate::node::{Node, Traverse};
use crate::path::FieldPath;
use crate::structure::FieldMeta;

/// One visited node.
pub struct Visit<'v, 'a> {
    /// The visited value.
    pub value: &'a dyn Traverse,
    /// The value's node description.
    pub node: &'v Node<'a>,
    /// Metadata of the field this node belongs to. `None` for the root and
    /// for sequence elements and map entries.
    pub meta: Option<&'v FieldMeta<'a>>,
    /// Path from the root.
    pub path: &'v FieldPath,
    /// Number of indirections followed from the field's own node.
    pub indirection: usize,
}

impl Visit<'_, '_> {
    /// True for the outermost node of a field (not a dereferenced pointee).
    pub fn is_field_head(&self) -> bool {
        self.meta.is_some() && self.indirection == 0
    }
}

/// Depth-first traversal driver.
#[derive(Debug, Clone)]
pub struct Walker {
    name_key: String,
    max_depth: usize,
}

impl Walker {
    /// Build a walker using the configured name key and depth limit.
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            name_key: config.name_key.clone(),
            max_depth: config.max_depth,
        }
    }

    /// Traverse `root`, invoking `visit` at every node.
    ///
    /// # Errors
    ///
    /// - [`WalkError::InvalidRoot`] if `root` is a nil reference.
    /// - [`WalkError::DepthExceeded`] past the depth limit.
    /// - [`WalkError::Aborted`] with the callback's error.
    pub fn walk<'a, E, F>(&self, root: &'a dyn Traverse, mut visit: F) -> Result<(), WalkError<E>>
    where
        F: FnMut(&Visit<'_, 'a>) -> Result<(), E>,
    {
        if let Node::Pointer(None) = root.node() {
            return Err(WalkError::InvalidRoot("root is a nil reference".to_string()));
        }
        let mut path = FieldPath::root();
        self.descend(root, None, &mut path, 0, 0, &mut visit)
    }

    fn descend<'a, E, F>(
        &self,
        value: &'a dyn Traverse,
        meta: Option<&FieldMeta<'a>>,
        path: &mut FieldPath,
        depth: usize,
        indirection: usize,
        visit: &mut F,
    ) -> Result<(), WalkError<E>>
    where
        F: FnMut(&Visit<'_, 'a>) -> Result<(), E>,
    {
        if depth > self.max_depth {
            tracing::debug!(limit = self.max_depth, path = %path, "traversal depth exceeded");
            return Err(WalkError::DepthExceeded {
                limit: self.max_depth,
                path: path.to_string(),
            });
        }

        let node = value.node();
        visit(&Visit {
            value,
            node: &node,
            meta,
            path,
            indirection,
        })
        .map_err(WalkError::Aborted)?;

        match node {
            Node::Pointer(Some(target)) => {
                self.descend(target, meta, path, depth + 1, indirection + 1, visit)
            }
            Node::Struct(structure) => {
                for field in structure.fields() {
                    if !field.meta().is_exported() {
                        continue;
                    }
                    let named = match field.meta().external_name(&self.name_key) {
                        Some(name) => {
                            path.push(name);
                            true
                        }
                        None => false,
                    };
                    let result =
                        self.descend(field.value(), Some(field.meta()), path, depth + 1, 0, visit);
                    if named {
                        path.pop();
                    }
                    result?;
                }
                Ok(())
            }
            Node::Sequence(items) | Node::Array(items) => {
                for (index, item) in items.into_iter().enumerate() {
                    path.push(index.to_string());
                    let result = self.descend(item, None, path, depth + 1, 0, visit);
                    path.pop();
                    result?;
                }
                Ok(())
            }
            Node::Map(entries) => {
                for (key, entry) in entries {
                    path.push(key);
                    let result = self.descend(entry, None, path, depth + 1, 0, visit);
                    path.pop();
                    result?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new(&ValidatorConfig::default())
    }
}
