//! Sparse numeric mappings for relationship weights and node properties.

use hashbrown::HashMap;

/// Read access to an id → `f64` mapping with a default.
pub trait WeightMapping: Send + Sync {
    /// Value stored for `id`, or the mapping's default.
    fn get(&self, id: u64) -> f64;

    /// Value stored for `id`, or `fallback`.
    fn get_or(&self, id: u64, fallback: f64) -> f64;

    /// Whether `id` has an explicit entry.
    fn contains(&self, id: u64) -> bool;

    /// Number of explicit entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn default_value(&self) -> f64;
}

/// Key of the relationship `source → target` in a relationship mapping.
#[inline]
pub fn combine_ids(source: u32, target: u32) -> u64 {
    ((source as u64) << 32) | target as u64
}

/// Build an empty mapping for `property_key` answering `default` for unset ids.
pub fn new_weight_map(property_key: Option<&str>, default: f64) -> WeightMap {
    WeightMap {
        property_key: property_key.map(str::to_owned),
        default,
        weights: HashMap::new(),
    }
}

/// Hash-backed [`WeightMapping`].
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMap {
    property_key: Option<String>,
    default: f64,
    weights: HashMap<u64, f64>,
}

impl WeightMap {
    /// Property this mapping was loaded from, if any.
    pub fn property_key(&self) -> Option<&str> {
        self.property_key.as_deref()
    }

    pub fn set(&mut self, id: u64, value: f64) {
        self.weights.insert(id, value);
    }

    /// Copy every explicit entry into `target`, overwriting what is there.
    pub fn write_into(&self, target: &mut WeightMap) {
        target.weights.reserve(self.weights.len());
        target.weights.extend(self.weights.iter().map(|(&id, &w)| (id, w)));
    }

    /// Drop all entries and give the memory back.
    pub fn release(&mut self) {
        self.weights = HashMap::new();
    }

    /// Explicit entries, in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.weights.iter().map(|(&id, &w)| (id, w))
    }
}

impl WeightMapping for WeightMap {
    #[inline]
    fn get(&self, id: u64) -> f64 {
        self.get_or(id, self.default)
    }

    #[inline]
    fn get_or(&self, id: u64, fallback: f64) -> f64 {
        self.weights.get(&id).copied().unwrap_or(fallback)
    }

    fn contains(&self, id: u64) -> bool {
        self.weights.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.weights.len()
    }

    fn default_value(&self) -> f64 {
        self.default
    }
}
