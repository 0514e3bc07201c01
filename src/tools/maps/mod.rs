//! Map helpers
//!
//! All operations return new maps; inputs are never modified.

mod filter;
mod merge;
mod remove;

pub use filter::{
    custom_filter, filter_by_key, filter_by_value, matches_condition, FilterCondition, Filterable,
};
pub use merge::{merge, MergeStrategy};
pub use remove::{
    remove_by_key, remove_by_keys, remove_by_map, remove_by_value, remove_by_values, remove_kv,
};

use std::collections::HashMap;
use std::hash::Hash;

/// All keys, in the map's iteration order
pub fn keys<K: Clone, V>(map: &HashMap<K, V>) -> Vec<K> {
    map.keys().cloned().collect()
}

/// All values, in the map's iteration order
pub fn values<K, V: Clone>(map: &HashMap<K, V>) -> Vec<V> {
    map.values().cloned().collect()
}

/// Swap keys and values
///
/// When several keys share a value, which key survives is unspecified.
pub fn invert<K, V>(map: &HashMap<K, V>) -> HashMap<V, K>
where
    K: Clone,
    V: Eq + Hash + Clone,
{
    map.iter().map(|(k, v)| (v.clone(), k.clone())).collect()
}
