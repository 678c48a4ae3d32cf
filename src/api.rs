//! Contracts between graph construction and the algorithms that consume it.

use crate::model::{Direction, NodeId};
use crate::Result;

/// Name of the node mapping loaded from `GraphSetup::node_weight_property`.
pub const NODE_WEIGHT: &str = "weight";

/// Name of the node mapping loaded from `GraphSetup::node_property`.
pub const NODE_PROPERTY: &str = "property";

/// A finished, read-only graph over dense internal node ids `0..node_count`.
pub trait Graph: Send + Sync {
    fn node_count(&self) -> usize;

    /// Number of adjacency entries in the graph's primary rows.
    fn relationship_count(&self) -> usize;

    /// Internal id of an external node, `None` if it was not imported.
    fn to_mapped_node_id(&self, node: NodeId) -> Option<u32>;

    /// External id of an internal node.
    fn to_original_node_id(&self, node: u32) -> Option<NodeId>;

    fn contains(&self, node: NodeId) -> bool {
        self.to_mapped_node_id(node).is_some()
    }

    /// Number of neighbors of `node` in `dir`.
    fn degree(&self, node: u32, dir: Direction) -> usize;

    /// Call `consumer(node, neighbor)` for every neighbor of `node` in `dir`.
    fn for_each_relationship(&self, node: u32, dir: Direction, consumer: &mut dyn FnMut(u32, u32));

    /// Whether a relationship between `source` and `target` was loaded in `dir`,
    /// as seen from `source`.
    fn exists(&self, source: u32, target: u32, dir: Direction) -> bool;

    /// Weight of `source → target`, or the relationship default.
    fn weight_of(&self, source: u32, target: u32) -> f64;

    /// Value of the `"weight"` node mapping.
    fn node_weight(&self, node: u32) -> f64;

    /// Value of the `"property"` node mapping.
    fn node_property(&self, node: u32) -> f64;

    /// Whether every direction reads the same symmetric rows.
    fn is_undirected(&self) -> bool;
}

/// Something that builds a [`Graph`].
pub trait GraphFactory {
    type Graph: Graph;

    fn build(&self) -> Result<Self::Graph>;
}
