//! Parallel heavyweight import: id map, batched relationship import, weight merge.

use rayon::ThreadPool;

use crate::api::GraphFactory;
use crate::config::GraphSetup;
use crate::core::{AdjacencyMatrix, IdMap, compute_batch_size, new_weight_map, read_parallel};
use crate::storage::GraphSource;
use crate::{Error, Result};

use super::graph::HeavyGraph;
use super::importer::{RelationshipImporter, WeightBuffers, WeightFactories};
use super::reader::reader_for;

/// Default for node mappings whose property has no declared default.
const NODE_DEFAULT: f64 = 0.0;

/// Builds a [`HeavyGraph`] from a [`GraphSource`] on a caller-owned pool.
pub struct HeavyGraphFactory<'a, S: GraphSource> {
    source: &'a S,
    setup: GraphSetup,
    pool: &'a ThreadPool,
}

impl<'a, S: GraphSource> HeavyGraphFactory<'a, S> {
    pub fn new(source: &'a S, setup: GraphSetup, pool: &'a ThreadPool) -> Self {
        Self { source, setup, pool }
    }

    pub fn setup(&self) -> &GraphSetup {
        &self.setup
    }

    fn node_default(&self, key: Option<&str>) -> f64 {
        key.and_then(|k| self.source.property_default(k))
            .unwrap_or(NODE_DEFAULT)
    }
}

impl<S: GraphSource> GraphFactory for HeavyGraphFactory<'_, S> {
    type Graph = HeavyGraph;

    fn build(&self) -> Result<HeavyGraph> {
        let setup = &self.setup;
        setup.validate()?;

        let span = tracing::debug_span!(
            "heavy_graph_import",
            concurrency = setup.concurrency,
            node_count = tracing::field::Empty,
            batch_size = tracing::field::Empty,
        );
        let _guard = span.enter();

        let id_map = IdMap::load(self.source, setup.node_label.as_deref())?;
        let node_count = id_map.len();
        if node_count > u32::MAX as usize {
            return Err(Error::TooManyNodes(node_count));
        }
        span.record("node_count", node_count);
        tracing::debug!(node_count, "id map loaded");

        let rel_key = setup.relationship_weight_property.as_deref();
        let rel_default = setup.relation_default_weight;
        let weight_key = setup.node_weight_property.as_deref();
        let weight_default = self.node_default(weight_key);
        let prop_key = setup.node_property.as_deref();
        let prop_default = self.node_default(prop_key);

        let relationship = move || new_weight_map(rel_key, rel_default);
        let node_weight = move || new_weight_map(weight_key, weight_default);
        let node_property = move || new_weight_map(prop_key, prop_default);
        let factories = WeightFactories {
            relationship: &relationship,
            node_weight: &node_weight,
            node_property: &node_property,
        };

        let mut matrix = AdjacencyMatrix::new(
            node_count,
            setup.stores_outgoing(),
            setup.stores_incoming(),
            setup.sorts_rows(),
        );
        let batch_size = compute_batch_size(node_count, setup.concurrency, setup.batch_size);
        span.record("batch_size", batch_size);
        let reader = reader_for(setup);

        let tasks = read_parallel(self.pool, &mut matrix, batch_size, |rows| {
            RelationshipImporter::new(self.source, &id_map, rows, reader.as_ref(), setup, &factories)
        })?;
        tracing::debug!(tasks = tasks.len(), batch_size, "relationships imported");

        let weights = merge_weights(tasks, &factories);
        let graph = HeavyGraph::new(id_map, matrix, weights, setup.load_as_undirected);
        tracing::debug!("graph ready");
        Ok(graph)
    }
}

/// Turn the finished tasks' private buffers into the graph's mappings.
///
/// A single task hands its buffers over as they are. Otherwise fresh shared
/// mappings are built and every task is flushed into them in turn, then
/// released.
fn merge_weights(mut tasks: Vec<RelationshipImporter<'_>>, factories: &WeightFactories<'_>) -> WeightBuffers {
    if tasks.len() == 1 {
        if let Some(task) = tasks.pop() {
            return task.into_weights();
        }
    }

    let mut shared = WeightBuffers::new(factories);
    for mut task in tasks {
        task.write_into(&mut shared);
        task.release();
    }
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use parking_lot::Mutex;
    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Metadata, Subscriber};

    use crate::core::thread_pool;
    use crate::model::PropertyMap;
    use crate::storage::MemoryBackend;

    type Fields = Arc<Mutex<Vec<(&'static str, u64)>>>;

    /// Collects every integer span field, at creation or recorded later.
    struct SpanFields(Fields);

    struct Collect<'a>(&'a Fields);

    impl Visit for Collect<'_> {
        fn record_u64(&mut self, field: &Field, value: u64) {
            self.0.lock().push((field.name(), value));
        }

        fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
    }

    impl Subscriber for SpanFields {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, span: &Attributes<'_>) -> Id {
            span.record(&mut Collect(&self.0));
            Id::from_u64(1)
        }

        fn record(&self, _: &Id, values: &Record<'_>) {
            values.record(&mut Collect(&self.0));
        }

        fn record_follows_from(&self, _: &Id, _: &Id) {}

        fn event(&self, _: &Event<'_>) {}

        fn enter(&self, _: &Id) {}

        fn exit(&self, _: &Id) {}
    }

    #[test]
    fn test_import_span_records_effective_sizes() {
        let db = MemoryBackend::new();
        for _ in 0..5 {
            db.create_node(&[], PropertyMap::new());
        }
        let setup = GraphSetup::default().with_concurrency(2).with_batch_size(1);
        let pool = thread_pool(2).unwrap();

        let fields = Fields::default();
        let graph = tracing::subscriber::with_default(SpanFields(fields.clone()), || {
            HeavyGraphFactory::new(&db, setup, &pool).build()
        })
        .unwrap();
        assert_eq!(graph.id_map().len(), 5);

        let fields = fields.lock();
        assert!(fields.contains(&("concurrency", 2)));
        assert!(fields.contains(&("node_count", 5)));
        // ceil(5 / 2) wins over the requested 1
        assert!(fields.contains(&("batch_size", 3)));
    }
}
