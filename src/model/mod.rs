//! # Property Graph Model
//!
//! The vocabulary of the external property-graph store: nodes and
//! relationships addressed by opaque external ids, carrying property maps.
//!
//! Design rule: nothing in here knows about internal (dense) ids. Those live
//! in `core` and only exist once a graph is being imported.

pub mod node;
pub mod relationship;
pub mod value;
pub mod property_map;

pub use node::{Node, NodeId};
pub use relationship::{Relationship, RelId, Direction};
pub use value::Value;
pub use property_map::{PropertyMap, properties};
