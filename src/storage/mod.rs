//! # Graph Source Trait
//!
//! This is THE contract between the import engine and whatever store holds
//! the property graph. The importer only ever reads through it.
//!
//! ## Implementations
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `MemoryBackend` | `memory` | In-memory store for testing/embedding |
//!
//! Implementations must be `Sync`: one importer per batch calls into the
//! source concurrently, each for its own nodes.

pub mod memory;

use crate::model::*;
use crate::Result;

pub use memory::MemoryBackend;

/// Read-only view of a property graph store.
pub trait GraphSource: Send + Sync {
    /// Enumerate node ids, optionally restricted to one label.
    ///
    /// The order must be stable between calls: it decides the internal id
    /// each node receives.
    fn node_ids(&self, label: Option<&str>) -> Result<Vec<NodeId>>;

    /// Relationships of `node` in direction `dir`, optionally of one type.
    ///
    /// A self-loop is reported once, even for `Direction::Both`.
    fn relationships(
        &self,
        node: NodeId,
        dir: Direction,
        rel_type: Option<&str>,
    ) -> Result<Vec<Relationship>>;

    /// Value of property `key` on `node`, `None` when unset.
    fn node_property(&self, node: NodeId, key: &str) -> Result<Option<Value>>;

    /// Declared default for property `key`, if the store has one.
    fn property_default(&self, _key: &str) -> Option<f64> {
        None
    }
}

impl<S: GraphSource + ?Sized> GraphSource for std::sync::Arc<S> {
    fn node_ids(&self, label: Option<&str>) -> Result<Vec<NodeId>> {
        (**self).node_ids(label)
    }

    fn relationships(
        &self,
        node: NodeId,
        dir: Direction,
        rel_type: Option<&str>,
    ) -> Result<Vec<Relationship>> {
        (**self).relationships(node, dir, rel_type)
    }

    fn node_property(&self, node: NodeId, key: &str) -> Result<Option<Value>> {
        (**self).node_property(node, key)
    }

    fn property_default(&self, key: &str) -> Option<f64> {
        (**self).property_default(key)
    }
}
