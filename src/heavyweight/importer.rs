//! Per-batch relationship import.
//!
//! Each [`RelationshipImporter`] owns one batch of node ids: it writes only
//! into that batch's adjacency rows and keeps its weights in private
//! [`WeightBuffers`] until the merge step flushes them into the shared maps.

use crate::config::GraphSetup;
use crate::core::{AdjacencyRows, IdMap, ImportTask, WeightMap, WeightMapping, combine_ids};
use crate::model::NodeId;
use crate::storage::GraphSource;
use crate::{Error, Result};

use super::reader::{RelationshipReader, Row};

type WeightFactory<'f> = &'f (dyn Fn() -> WeightMap + Sync);

/// Constructors for the three tracked mappings.
///
/// Each call builds a fresh, empty mapping carrying the right default.
#[derive(Clone, Copy)]
pub struct WeightFactories<'f> {
    pub relationship: WeightFactory<'f>,
    pub node_weight: WeightFactory<'f>,
    pub node_property: WeightFactory<'f>,
}

/// Relationship weights plus the two node mappings.
#[derive(Debug, Clone)]
pub struct WeightBuffers {
    pub relationship: WeightMap,
    pub node_weight: WeightMap,
    pub node_property: WeightMap,
}

impl WeightBuffers {
    /// Invoke every factory once.
    pub fn new(factories: &WeightFactories<'_>) -> Self {
        Self {
            relationship: (factories.relationship)(),
            node_weight: (factories.node_weight)(),
            node_property: (factories.node_property)(),
        }
    }

    /// Flush every explicit entry into `target`.
    pub fn write_into(&self, target: &mut WeightBuffers) {
        self.relationship.write_into(&mut target.relationship);
        self.node_weight.write_into(&mut target.node_weight);
        self.node_property.write_into(&mut target.node_property);
    }

    pub fn release(&mut self) {
        self.relationship.release();
        self.node_weight.release();
        self.node_property.release();
    }
}

/// Imports the relationships of one contiguous batch of nodes.
pub struct RelationshipImporter<'a> {
    source: &'a dyn GraphSource,
    id_map: &'a IdMap,
    rows: AdjacencyRows<'a>,
    reader: &'a dyn RelationshipReader,
    setup: &'a GraphSetup,
    weights: WeightBuffers,
}

impl<'a> RelationshipImporter<'a> {
    pub fn new(
        source: &'a dyn GraphSource,
        id_map: &'a IdMap,
        rows: AdjacencyRows<'a>,
        reader: &'a dyn RelationshipReader,
        setup: &'a GraphSetup,
        factories: &WeightFactories<'_>,
    ) -> Self {
        Self {
            source,
            id_map,
            rows,
            reader,
            setup,
            weights: WeightBuffers::new(factories),
        }
    }

    /// Node ids this importer owns.
    pub fn range(&self) -> std::ops::Range<u32> {
        self.rows.range()
    }

    pub fn weights(&self) -> &WeightBuffers {
        &self.weights
    }

    /// Flush this batch's weights into the shared buffers.
    pub fn write_into(&self, target: &mut WeightBuffers) {
        self.weights.write_into(target);
    }

    /// Free the private weight buffers.
    pub fn release(&mut self) {
        self.weights.release();
    }

    /// Give up the row handle and keep only the weights.
    ///
    /// Used when a single batch covers the whole graph: its buffers become
    /// the graph's mappings as they are.
    pub fn into_weights(self) -> WeightBuffers {
        self.weights
    }

    fn import_node(&mut self, node: u32) -> Result<()> {
        let Self { source, id_map, rows, reader, setup, weights } = self;

        let external = id_map
            .to_external(node)
            .ok_or_else(|| Error::NotFound(format!("internal node {node}")))?;
        // A label filter defines the node set: endpoints outside it are not
        // part of the graph. Without a filter every endpoint must be known.
        let filtered = setup.node_label.is_some();
        let weight_key = setup.relationship_weight_property.as_deref();

        reader.read(
            *source,
            external,
            setup.relationship_type.as_deref(),
            &mut |row, other, rel| {
                let other = match id_map.to_internal(other) {
                    Some(id) => id,
                    None if filtered => return Ok(()),
                    None => return Err(Error::UnknownNode { node: other }),
                };
                let key = match row {
                    Row::Outgoing => {
                        rows.add_outgoing(node, other)?;
                        combine_ids(node, other)
                    }
                    Row::Incoming => {
                        rows.add_incoming(node, other)?;
                        combine_ids(other, node)
                    }
                };
                if let Some(weight) = weight_key.and_then(|k| rel.weight(k)) {
                    weights.relationship.set(key, weight);
                }
                Ok(())
            },
        )?;
        rows.finish_node(node)?;

        read_node_value(*source, external, setup.node_weight_property.as_deref(), node, &mut weights.node_weight)?;
        read_node_value(*source, external, setup.node_property.as_deref(), node, &mut weights.node_property)?;
        Ok(())
    }
}

fn read_node_value(
    source: &dyn GraphSource,
    external: NodeId,
    key: Option<&str>,
    node: u32,
    target: &mut WeightMap,
) -> Result<()> {
    let Some(key) = key else { return Ok(()) };
    if let Some(value) = source.node_property(external, key)?.and_then(|v| v.as_float()) {
        target.set(node as u64, value);
    }
    Ok(())
}

impl ImportTask for RelationshipImporter<'_> {
    fn run(&mut self) -> Result<()> {
        for node in self.rows.range() {
            self.import_node(node)?;
        }
        tracing::trace!(
            offset = self.rows.offset(),
            nodes = self.rows.len(),
            weights = self.weights.relationship.len(),
            "batch imported"
        );
        Ok(())
    }
}
