//! In-memory graph source.
//!
//! This is the reference implementation of `GraphSource`.
//! It uses simple HashMaps protected by RwLock.
//!
//! ## Limitations
//!
//! - **No transactions**: writes are applied immediately.
//! - **Per-collection locks**: multi-step mutations are NOT atomic. Build the
//!   graph first, then import it; concurrent reads during an import are fine.
//! - **No property indexes**: label lookups use a small label index, property
//!   lookups go through the node itself.
//!
//! Use this source for:
//! - Testing the import pipeline
//! - Embedding the engine in applications that build graphs in memory

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use parking_lot::RwLock;

use crate::model::*;
use crate::{Error, Result};
use super::GraphSource;

// ============================================================================
// MemoryBackend
// ============================================================================

/// In-memory property graph store.
pub struct MemoryBackend {
    nodes: RwLock<HashMap<NodeId, Node>>,
    relationships: RwLock<HashMap<RelId, Relationship>>,
    /// node_id → list of relationship IDs touching it
    adjacency: RwLock<HashMap<NodeId, Vec<RelId>>>,
    /// label → node IDs (poor man's label index)
    label_index: RwLock<HashMap<String, Vec<NodeId>>>,
    /// property key → declared default
    defaults: RwLock<HashMap<String, f64>>,
    next_node_id: AtomicU64,
    next_rel_id: AtomicU64,
}

impl MemoryBackend {
    /// Empty store. Node ids start at 0.
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
            relationships: RwLock::new(HashMap::new()),
            adjacency: RwLock::new(HashMap::new()),
            label_index: RwLock::new(HashMap::new()),
            defaults: RwLock::new(HashMap::new()),
            next_node_id: AtomicU64::new(0),
            next_rel_id: AtomicU64::new(0),
        }
    }

    // ========================================================================
    // Writes
    // ========================================================================

    pub fn create_node(&self, labels: &[&str], props: PropertyMap) -> NodeId {
        let id = NodeId(self.next_node_id.fetch_add(1, Ordering::Relaxed));
        let node = Node {
            id,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            properties: props,
        };

        {
            let mut idx = self.label_index.write();
            for label in &node.labels {
                idx.entry(label.clone()).or_default().push(id);
            }
        }

        self.nodes.write().insert(id, node);
        self.adjacency.write().insert(id, Vec::new());
        id
    }

    pub fn create_relationship(
        &self,
        src: NodeId,
        dst: NodeId,
        rel_type: &str,
        props: PropertyMap,
    ) -> Result<RelId> {
        {
            let nodes = self.nodes.read();
            if !nodes.contains_key(&src) {
                return Err(Error::NotFound(format!("Source node {src}")));
            }
            if !nodes.contains_key(&dst) {
                return Err(Error::NotFound(format!("Target node {dst}")));
            }
        }

        let id = RelId(self.next_rel_id.fetch_add(1, Ordering::Relaxed));
        let rel = Relationship {
            id,
            src,
            dst,
            rel_type: rel_type.to_string(),
            properties: props,
        };
        self.relationships.write().insert(id, rel);

        let mut adj = self.adjacency.write();
        adj.entry(src).or_default().push(id);
        if src != dst {
            adj.entry(dst).or_default().push(id);
        }
        Ok(id)
    }

    pub fn set_node_property(&self, id: NodeId, key: &str, val: Value) -> Result<()> {
        let mut nodes = self.nodes.write();
        let node = nodes.get_mut(&id).ok_or_else(|| Error::NotFound(format!("Node {id}")))?;
        node.properties.insert(key.to_string(), val);
        Ok(())
    }

    pub fn set_relationship_property(&self, id: RelId, key: &str, val: Value) -> Result<()> {
        let mut rels = self.relationships.write();
        let rel = rels
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound(format!("Relationship {id}")))?;
        rel.properties.insert(key.to_string(), val);
        Ok(())
    }

    /// Declare the value reported for `key` wherever it is unset.
    pub fn declare_property_default(&self, key: &str, value: f64) {
        self.defaults.write().insert(key.to_string(), value);
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn node_count(&self) -> u64 {
        self.nodes.read().len() as u64
    }

    pub fn relationship_count(&self) -> u64 {
        self.relationships.read().len() as u64
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// GraphSource impl
// ============================================================================

impl GraphSource for MemoryBackend {
    fn node_ids(&self, label: Option<&str>) -> Result<Vec<NodeId>> {
        let mut ids: Vec<NodeId> = match label {
            Some(label) => self.label_index.read().get(label).cloned().unwrap_or_default(),
            None => self.nodes.read().keys().copied().collect(),
        };
        ids.sort_unstable();
        Ok(ids)
    }

    fn relationships(
        &self,
        node: NodeId,
        dir: Direction,
        rel_type: Option<&str>,
    ) -> Result<Vec<Relationship>> {
        let adj = self.adjacency.read();
        let rels = self.relationships.read();

        let rel_ids = adj
            .get(&node)
            .ok_or_else(|| Error::NotFound(format!("Node {node}")))?;

        let mut result = Vec::new();
        for rid in rel_ids {
            if let Some(rel) = rels.get(rid) {
                let matches_dir = match dir {
                    Direction::Outgoing => rel.src == node,
                    Direction::Incoming => rel.dst == node,
                    Direction::Both => true,
                };
                let matches_type = rel_type.is_none_or(|t| rel.rel_type == t);

                if matches_dir && matches_type {
                    result.push(rel.clone());
                }
            }
        }
        Ok(result)
    }

    fn node_property(&self, node: NodeId, key: &str) -> Result<Option<Value>> {
        let nodes = self.nodes.read();
        let node = nodes.get(&node).ok_or_else(|| Error::NotFound(format!("Node {node}")))?;
        Ok(node.get(key).cloned())
    }

    fn property_default(&self, key: &str) -> Option<f64> {
        self.defaults.read().get(key).copied()
    }
}

// ============================================================================
// Tests
// ============================================================================
