//! # Import Core
//!
//! The building blocks the heavyweight importer is assembled from:
//!
//! - [`IdMap`]: external [`NodeId`](crate::NodeId) ↔ dense internal id
//! - [`AdjacencyMatrix`]: per-node neighbor rows, split into disjoint
//!   [`AdjacencyRows`] handles for parallel writes
//! - [`WeightMap`]: sparse id → `f64` mapping with a default
//! - [`parallel`]: batch sizing, partitioning and the parallel task runner

pub mod adjacency;
pub mod id_map;
pub mod parallel;
pub mod weight;

pub use adjacency::{AdjacencyMatrix, AdjacencyRows};
pub use id_map::IdMap;
pub use parallel::{ImportTask, compute_batch_size, partition, read_parallel, thread_pool};
pub use weight::{WeightMap, WeightMapping, combine_ids, new_weight_map};
