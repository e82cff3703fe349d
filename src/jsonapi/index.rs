//! Included-resource index
//!
//! The arena behind a parsed document: every `included` entry keyed by its
//! `(type, id)` pair, together with the constructor the factory picked for it.

use super::document::{ResourceIdentifier, ResourceObject};
use super::factory::{self, AnyResource, Constructor};
use super::resource::Resource;
use std::collections::HashMap;
use std::sync::Arc;

struct IndexEntry {
    object: Arc<ResourceObject>,
    construct: Constructor,
}

/// Lookup from `(type, id)` to an included resource. Immutable once built.
#[derive(Default)]
pub struct IncludedIndex {
    entries: HashMap<ResourceIdentifier, IndexEntry>,
}

impl IncludedIndex {
    /// Single forward pass over `included`, in document order.
    ///
    /// Construction only stores identifiers, so entries may reference each
    /// other (forward, cyclic or self references) without ordering constraints.
    /// A repeated `(type, id)` keeps the last entry.
    pub(crate) fn build(included: &[Arc<ResourceObject>]) -> Self {
        let mut entries = HashMap::with_capacity(included.len());

        for object in included {
            let construct = factory::constructor_for(&object.identifier.resource_type);
            let previous = entries.insert(
                object.identifier.clone(),
                IndexEntry {
                    object: Arc::clone(object),
                    construct,
                },
            );
            if previous.is_some() {
                tracing::debug!("Duplicate included resource {}, keeping the last", object.identifier);
            }
        }

        tracing::debug!("Built included index with {} resources", entries.len());

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, identifier: &ResourceIdentifier) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Resolve an identifier to its variant, bound to this index
    pub(crate) fn resolve(self: &Arc<Self>, identifier: &ResourceIdentifier) -> Option<AnyResource> {
        let entry = self.entries.get(identifier)?;
        let resource = Resource::bound(Arc::clone(&entry.object), Arc::clone(self));
        Some((entry.construct)(resource))
    }
}
