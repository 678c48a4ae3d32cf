//! Reduction helpers for algorithms that rank graph entities.

pub mod top_k;

pub use top_k::{TopKConsumer, top_k};
