//! The finished, immutable heavyweight graph.

use hashbrown::HashMap;

use crate::api::{Graph, NODE_PROPERTY, NODE_WEIGHT};
use crate::core::{AdjacencyMatrix, IdMap, WeightMap, WeightMapping, combine_ids};
use crate::model::{Direction, NodeId};

use super::importer::WeightBuffers;

/// Id map, adjacency rows and weight mappings of one import.
///
/// Built once by [`HeavyGraphFactory`](super::HeavyGraphFactory), never
/// mutated afterwards.
#[derive(Debug)]
pub struct HeavyGraph {
    id_map: IdMap,
    matrix: AdjacencyMatrix,
    relationship_weights: WeightMap,
    node_mappings: HashMap<String, WeightMap>,
    undirected: bool,
}

impl HeavyGraph {
    pub fn new(id_map: IdMap, matrix: AdjacencyMatrix, weights: WeightBuffers, undirected: bool) -> Self {
        let WeightBuffers { relationship, node_weight, node_property } = weights;
        let mut node_mappings = HashMap::with_capacity(2);
        node_mappings.insert(NODE_WEIGHT.to_string(), node_weight);
        node_mappings.insert(NODE_PROPERTY.to_string(), node_property);
        Self {
            id_map,
            matrix,
            relationship_weights: relationship,
            node_mappings,
            undirected,
        }
    }

    /// Neighbors of `node` in `dir`.
    ///
    /// On a directed graph `Both` yields outgoing then incoming neighbors.
    pub fn neighbors(&self, node: u32, dir: Direction) -> impl Iterator<Item = u32> + '_ {
        const NONE: &[u32] = &[];
        let (first, second) = match (self.undirected, dir) {
            (true, _) => (self.matrix.outgoing(node), NONE),
            (false, Direction::Outgoing) => (self.matrix.outgoing(node), NONE),
            (false, Direction::Incoming) => (self.matrix.incoming(node), NONE),
            (false, Direction::Both) => (self.matrix.outgoing(node), self.matrix.incoming(node)),
        };
        first.iter().chain(second).copied()
    }

    /// Node mapping by name (`"weight"` or `"property"`).
    pub fn node_mapping(&self, name: &str) -> Option<&WeightMap> {
        self.node_mappings.get(name)
    }

    pub fn relationship_weights(&self) -> &WeightMap {
        &self.relationship_weights
    }

    pub fn id_map(&self) -> &IdMap {
        &self.id_map
    }

    pub fn matrix(&self) -> &AdjacencyMatrix {
        &self.matrix
    }

    fn node_value(&self, name: &str, node: u32) -> f64 {
        self.node_mappings
            .get(name)
            .map_or(0.0, |mapping| mapping.get(node as u64))
    }
}

impl Graph for HeavyGraph {
    fn node_count(&self) -> usize {
        self.id_map.len()
    }

    fn relationship_count(&self) -> usize {
        if self.matrix.has_outgoing_rows() {
            self.matrix.relationship_count(Direction::Outgoing)
        } else {
            self.matrix.relationship_count(Direction::Incoming)
        }
    }

    fn to_mapped_node_id(&self, node: NodeId) -> Option<u32> {
        self.id_map.to_internal(node)
    }

    fn to_original_node_id(&self, node: u32) -> Option<NodeId> {
        self.id_map.to_external(node)
    }

    fn degree(&self, node: u32, dir: Direction) -> usize {
        match (self.undirected, dir) {
            (true, _) | (false, Direction::Outgoing) => self.matrix.out_degree(node),
            (false, Direction::Incoming) => self.matrix.in_degree(node),
            (false, Direction::Both) => self.matrix.out_degree(node) + self.matrix.in_degree(node),
        }
    }

    fn for_each_relationship(&self, node: u32, dir: Direction, consumer: &mut dyn FnMut(u32, u32)) {
        for neighbor in self.neighbors(node, dir) {
            consumer(node, neighbor);
        }
    }

    fn exists(&self, source: u32, target: u32, dir: Direction) -> bool {
        if self.undirected {
            return self.matrix.has_outgoing(source, target);
        }
        match dir {
            Direction::Outgoing => self.matrix.has_outgoing(source, target),
            Direction::Incoming => self.matrix.has_incoming(target, source),
            Direction::Both => {
                self.matrix.has_outgoing(source, target) || self.matrix.has_incoming(target, source)
            }
        }
    }

    fn weight_of(&self, source: u32, target: u32) -> f64 {
        self.relationship_weights.get(combine_ids(source, target))
    }

    fn node_weight(&self, node: u32) -> f64 {
        self.node_value(NODE_WEIGHT, node)
    }

    fn node_property(&self, node: u32) -> f64 {
        self.node_value(NODE_PROPERTY, node)
    }

    fn is_undirected(&self) -> bool {
        self.undirected
    }
}
