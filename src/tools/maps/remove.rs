//! Removal helpers
//!
//! Each function returns a copy of the input without the matched entries.
//! With `ignore_missing` set, anything that could not be found is skipped.
//! Otherwise key-based removals fail on the first miss, and value-based
//! removals fail when no entry matched.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

fn key_not_found<K: Debug>(key: &K) -> Error {
    Error::KeyNotFound {
        key: format!("{:?}", key),
    }
}

fn value_not_found<V: Debug>(value: &V) -> Error {
    Error::ValueNotFound {
        value: format!("{:?}", value),
    }
}

/// Remove `key` only if it currently maps to `value`
pub fn remove_kv<K, V>(
    map: &HashMap<K, V>,
    key: &K,
    value: &V,
    ignore_missing: bool,
) -> Result<HashMap<K, V>>
where
    K: Eq + Hash + Clone + Debug,
    V: PartialEq + Clone + Debug,
{
    let mut out = map.clone();
    match out.get(key).map(|current| current == value) {
        Some(true) => {
            out.remove(key);
        }
        Some(false) if !ignore_missing => return Err(value_not_found(value)),
        None if !ignore_missing => return Err(key_not_found(key)),
        _ => {}
    }
    Ok(out)
}

/// Remove a single key
pub fn remove_by_key<K, V>(map: &HashMap<K, V>, key: &K, ignore_missing: bool) -> Result<HashMap<K, V>>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    remove_by_keys(map, std::slice::from_ref(key), ignore_missing)
}

/// Remove every key in `keys`
pub fn remove_by_keys<K, V>(
    map: &HashMap<K, V>,
    keys: &[K],
    ignore_missing: bool,
) -> Result<HashMap<K, V>>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    let mut out = map.clone();
    for key in keys {
        if out.remove(key).is_none() && !ignore_missing {
            return Err(key_not_found(key));
        }
    }
    Ok(out)
}

/// Remove every entry holding `value`
pub fn remove_by_value<K, V>(
    map: &HashMap<K, V>,
    value: &V,
    ignore_missing: bool,
) -> Result<HashMap<K, V>>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone + Debug,
{
    remove_by_values(map, std::slice::from_ref(value), ignore_missing)
}

/// Remove every entry whose value appears in `values`
///
/// Listed values with no match are skipped; the call only fails when
/// nothing at all was removed and `ignore_missing` is unset.
pub fn remove_by_values<K, V>(
    map: &HashMap<K, V>,
    values: &[V],
    ignore_missing: bool,
) -> Result<HashMap<K, V>>
where
    K: Eq + Hash + Clone,
    V: PartialEq + Clone + Debug,
{
    let mut out = map.clone();
    out.retain(|_, v| !values.contains(v));

    if out.len() == map.len() && !ignore_missing {
        return Err(Error::ValueNotFound {
            value: format!("{:?}", values),
        });
    }
    Ok(out)
}

/// Remove every entry of `to_remove` whose key and value both match
pub fn remove_by_map<K, V>(
    map: &HashMap<K, V>,
    to_remove: &HashMap<K, V>,
    ignore_missing: bool,
) -> Result<HashMap<K, V>>
where
    K: Eq + Hash + Clone + Debug,
    V: PartialEq + Clone + Debug,
{
    let mut out = map.clone();
    for (key, value) in to_remove {
        out = remove_kv(&out, key, value, ignore_missing)?;
    }
    Ok(out)
}
