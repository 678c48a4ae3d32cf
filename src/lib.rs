//! # graphalgo-core: Parallel graph loading for analytics
//!
//! Loads a property graph out of a store into a compact, immutable,
//! index-addressed form that graph algorithms can traverse quickly.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `GraphSource` is the contract between import and storage
//! 2. **Disjoint writers**: every import task owns its adjacency rows outright
//! 3. **Private buffers, one merge**: weights are collected per task and merged once
//! 4. **Caller-owned pool**: the import never spawns threads of its own
//!
//! ## Quick Start
//!
//! ```rust
//! use graphalgo_core::{
//!     Direction, Graph, GraphFactory, GraphSetup, HeavyGraphFactory, MemoryBackend,
//!     PropertyMap, Value, thread_pool,
//! };
//!
//! # fn example() -> graphalgo_core::Result<()> {
//! let store = MemoryBackend::new();
//! let a = store.create_node(&["City"], PropertyMap::new());
//! let b = store.create_node(&["City"], PropertyMap::new());
//! let mut props = PropertyMap::new();
//! props.insert("km".into(), Value::Float(42.0));
//! store.create_relationship(a, b, "ROAD", props)?;
//!
//! let setup = GraphSetup::default()
//!     .with_relationship_weight("km")
//!     .with_concurrency(2);
//! let pool = thread_pool(setup.concurrency)?;
//! let graph = HeavyGraphFactory::new(&store, setup, &pool).build()?;
//!
//! let (ia, ib) = (graph.to_mapped_node_id(a).unwrap(), graph.to_mapped_node_id(b).unwrap());
//! assert!(graph.exists(ia, ib, Direction::Outgoing));
//! assert_eq!(graph.weight_of(ia, ib), 42.0);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod api;
pub mod config;
pub mod core;
pub mod heavyweight;
pub mod model;
pub mod storage;
pub mod util;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{Direction, Node, NodeId, PropertyMap, RelId, Relationship, Value};

// ============================================================================
// Re-exports: Storage and configuration
// ============================================================================

pub use config::GraphSetup;
pub use storage::{GraphSource, MemoryBackend};

// ============================================================================
// Re-exports: Graph construction
// ============================================================================

pub use api::{Graph, GraphFactory};
pub use crate::core::{AdjacencyMatrix, IdMap, WeightMap, WeightMapping, thread_pool};
pub use heavyweight::{HeavyGraph, HeavyGraphFactory};
pub use util::TopKConsumer;

/// Build a [`HeavyGraph`] from `source` on `pool`.
pub fn load_graph<S: GraphSource>(source: &S, setup: GraphSetup, pool: &rayon::ThreadPool) -> Result<HeavyGraph> {
    HeavyGraphFactory::new(source, setup, pool).build()
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown node: {node} is not part of the projected graph")]
    UnknownNode { node: NodeId },

    #[error("Row ownership violated: node {node} is outside batch {range:?}")]
    RowOwnership { node: u32, range: std::ops::Range<u32> },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Too many nodes: {0} exceeds the internal id space")]
    TooManyNodes(usize),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
