//! # Heavyweight Graph
//!
//! The import path that materialises every relationship into per-node rows:
//!
//! ```text
//! GraphSource ──IdMap::load──► IdMap
//!      │
//!      └─► read_parallel ──► N × RelationshipImporter ──► AdjacencyMatrix (disjoint rows)
//!                                   │
//!                                   └─► weight buffers ──merge──► HeavyGraph
//! ```
//!
//! Which relationships land in which rows is decided by a
//! [`RelationshipReader`], picked from the [`GraphSetup`](crate::GraphSetup).

pub mod factory;
pub mod graph;
pub mod importer;
pub mod reader;

pub use factory::HeavyGraphFactory;
pub use graph::HeavyGraph;
pub use importer::{RelationshipImporter, WeightFactories, WeightBuffers};
pub use reader::{DirectedReader, RelationshipReader, Row, UndirectedReader, reader_for};
