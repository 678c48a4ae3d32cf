//! Bidirectional mapping between external node ids and dense internal ids.
//!
//! Graph algorithms want dense indices (`0..node_count`) for array-based
//! state; sources hand out sparse 64-bit ids. The map is built once, before
//! the parallel import starts, and is read-only afterwards.

use hashbrown::HashMap;

use crate::model::NodeId;
use crate::storage::GraphSource;
use crate::Result;

/// External ↔ internal node id translation.
#[derive(Debug, Clone, Default)]
pub struct IdMap {
    /// internal → external
    to_external: Vec<NodeId>,
    /// external → internal
    to_internal: HashMap<NodeId, u32>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_external: Vec::with_capacity(capacity),
            to_internal: HashMap::with_capacity(capacity),
        }
    }

    /// Enumerate the source's nodes (optionally of one label) and assign
    /// internal ids in enumeration order.
    pub fn load<S: GraphSource + ?Sized>(source: &S, label: Option<&str>) -> Result<Self> {
        Ok(source.node_ids(label)?.into_iter().collect())
    }

    /// Assign the next internal id to `node`.
    ///
    /// Re-inserting a known node returns its existing id.
    pub fn insert(&mut self, node: NodeId) -> u32 {
        if let Some(&id) = self.to_internal.get(&node) {
            return id;
        }
        let id = self.to_external.len() as u32;
        self.to_external.push(node);
        self.to_internal.insert(node, id);
        id
    }

    #[inline]
    pub fn to_internal(&self, node: NodeId) -> Option<u32> {
        self.to_internal.get(&node).copied()
    }

    #[inline]
    pub fn to_external(&self, id: u32) -> Option<NodeId> {
        self.to_external.get(id as usize).copied()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.to_internal.contains_key(&node)
    }

    /// Number of mapped nodes, i.e. the graph's node count.
    #[inline]
    pub fn len(&self) -> usize {
        self.to_external.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.to_external.is_empty()
    }

    /// All `(internal, external)` pairs in internal id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, NodeId)> + '_ {
        self.to_external
            .iter()
            .enumerate()
            .map(|(id, &node)| (id as u32, node))
    }
}

impl FromIterator<NodeId> for IdMap {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, upper) = iter.size_hint();
        let mut map = Self::with_capacity(upper.unwrap_or(lower));
        for node in iter {
            map.insert(node);
        }
        map
    }
}
