//! Import configuration.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default batch size when none is requested.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Default relationship weight when no weight property is loaded.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// How to build a graph from a source.
///
/// Deserializable from JSON with every field optional; missing fields take
/// the values of [`GraphSetup::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSetup {
    /// Load incoming relationships into per-node incoming rows.
    pub load_incoming: bool,
    /// Load outgoing relationships into per-node outgoing rows.
    pub load_outgoing: bool,
    /// Load every relationship in both directions, ignoring the two flags above.
    pub load_as_undirected: bool,
    /// Keep adjacency rows sorted ascending. Implied by `load_as_undirected`.
    pub sort: bool,
    /// Minimum number of nodes per import task.
    pub batch_size: usize,
    /// Upper bound on the number of import tasks.
    pub concurrency: usize,
    /// Weight reported for relationships without an explicit weight.
    pub relation_default_weight: f64,

    /// Only import nodes with this label.
    pub node_label: Option<String>,
    /// Only import relationships of this type.
    pub relationship_type: Option<String>,
    /// Relationship property read as weight.
    pub relationship_weight_property: Option<String>,
    /// Node property exposed as the `"weight"` node mapping.
    pub node_weight_property: Option<String>,
    /// Node property exposed as the `"property"` node mapping.
    pub node_property: Option<String>,
}

impl Default for GraphSetup {
    fn default() -> Self {
        Self {
            load_incoming: false,
            load_outgoing: true,
            load_as_undirected: false,
            sort: false,
            batch_size: DEFAULT_BATCH_SIZE,
            concurrency: default_concurrency(),
            relation_default_weight: DEFAULT_WEIGHT,
            node_label: None,
            relationship_type: None,
            relationship_weight_property: None,
            node_weight_property: None,
            node_property: None,
        }
    }
}

fn default_concurrency() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

impl GraphSetup {
    /// Parse a setup from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_directions(mut self, outgoing: bool, incoming: bool) -> Self {
        self.load_outgoing = outgoing;
        self.load_incoming = incoming;
        self
    }

    pub fn undirected(mut self) -> Self {
        self.load_as_undirected = true;
        self
    }

    pub fn sorted(mut self) -> Self {
        self.sort = true;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_default_weight(mut self, weight: f64) -> Self {
        self.relation_default_weight = weight;
        self
    }

    pub fn with_node_label(mut self, label: impl Into<String>) -> Self {
        self.node_label = Some(label.into());
        self
    }

    pub fn with_relationship_type(mut self, rel_type: impl Into<String>) -> Self {
        self.relationship_type = Some(rel_type.into());
        self
    }

    pub fn with_relationship_weight(mut self, key: impl Into<String>) -> Self {
        self.relationship_weight_property = Some(key.into());
        self
    }

    pub fn with_node_weight(mut self, key: impl Into<String>) -> Self {
        self.node_weight_property = Some(key.into());
        self
    }

    pub fn with_node_property(mut self, key: impl Into<String>) -> Self {
        self.node_property = Some(key.into());
        self
    }

    /// Whether an outgoing row is kept per node.
    pub fn stores_outgoing(&self) -> bool {
        self.load_outgoing || self.load_as_undirected
    }

    /// Whether an incoming row is kept per node.
    pub fn stores_incoming(&self) -> bool {
        self.load_incoming && !self.load_as_undirected
    }

    /// Whether rows end up sorted.
    pub fn sorts_rows(&self) -> bool {
        self.sort || self.load_as_undirected
    }

    /// Reject setups that cannot produce a meaningful graph.
    pub fn validate(&self) -> Result<()> {
        if !self.load_outgoing && !self.load_incoming && !self.load_as_undirected {
            return Err(Error::InvalidConfig(
                "no relationship direction selected: enable load_outgoing, load_incoming or load_as_undirected".into(),
            ));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be at least 1".into()));
        }
        if !self.relation_default_weight.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "relation_default_weight must be finite, got {}",
                self.relation_default_weight
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let setup = GraphSetup::default();
        assert!(setup.load_outgoing);
        assert!(!setup.load_incoming);
        assert_eq!(setup.batch_size, DEFAULT_BATCH_SIZE);
        assert!(setup.concurrency >= 1);
        assert!(setup.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let setup = GraphSetup::from_json(
            r#"{"load_incoming": true, "batch_size": 3, "concurrency": 2, "relationship_weight_property": "cost"}"#,
        )
        .unwrap();
        assert!(setup.load_incoming);
        assert!(setup.load_outgoing);
        assert_eq!(setup.batch_size, 3);
        assert_eq!(setup.concurrency, 2);
        assert_eq!(setup.relationship_weight_property.as_deref(), Some("cost"));
        assert_eq!(setup.relation_default_weight, DEFAULT_WEIGHT);
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            GraphSetup::from_json("{batch_size: }"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_validate_rejects_nothing_to_load() {
        let setup = GraphSetup::default().with_directions(false, false);
        assert!(matches!(setup.validate(), Err(Error::InvalidConfig(_))));
        assert!(setup.undirected().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_batch_and_nan_weight() {
        assert!(GraphSetup::default().with_batch_size(0).validate().is_err());
        assert!(GraphSetup::default().with_default_weight(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_undirected_storage_flags() {
        let setup = GraphSetup::default().with_directions(false, true).undirected();
        assert!(setup.stores_outgoing());
        assert!(!setup.stores_incoming());
        assert!(setup.sorts_rows());
    }
}
