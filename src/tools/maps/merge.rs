use crate::error::{Error, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::Add;

type Resolver<V> = Box<dyn Fn(&V, &V) -> V + Send + Sync>;

/// How [`merge`] handles a key present in both maps
pub enum MergeStrategy<V> {
    /// Fail with [`Error::MergeConflict`]
    Reject,
    /// Keep the value from the first map
    KeepFirst,
    /// Keep the value from the second map
    KeepSecond,
    /// Combine both values with a function of `(first, second)`
    Resolve(Resolver<V>),
}

impl<V> Default for MergeStrategy<V> {
    fn default() -> Self {
        MergeStrategy::Reject
    }
}

impl<V> MergeStrategy<V> {
    pub fn resolve<F>(f: F) -> Self
    where
        F: Fn(&V, &V) -> V + Send + Sync + 'static,
    {
        MergeStrategy::Resolve(Box::new(f))
    }
}

impl<V> MergeStrategy<V>
where
    V: Clone + Add<Output = V> + 'static,
{
    /// Resolve conflicts by adding the two values
    pub fn add_values() -> Self {
        Self::resolve(|a: &V, b: &V| a.clone() + b.clone())
    }
}

impl<V> fmt::Debug for MergeStrategy<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStrategy::Reject => f.write_str("Reject"),
            MergeStrategy::KeepFirst => f.write_str("KeepFirst"),
            MergeStrategy::KeepSecond => f.write_str("KeepSecond"),
            MergeStrategy::Resolve(_) => f.write_str("Resolve(<fn>)"),
        }
    }
}

/// Combine two maps into a new one
///
/// Keys unique to either map are copied. Shared keys are handled by
/// `strategy`.
pub fn merge<K, V>(
    first: &HashMap<K, V>,
    second: &HashMap<K, V>,
    strategy: &MergeStrategy<V>,
) -> Result<HashMap<K, V>>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    let mut merged = first.clone();
    merged.reserve(second.len());

    for (key, incoming) in second {
        match merged.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(incoming.clone());
            }
            Entry::Occupied(mut slot) => match strategy {
                MergeStrategy::Reject => {
                    return Err(Error::MergeConflict {
                        key: format!("{:?}", key),
                    })
                }
                MergeStrategy::KeepFirst => {}
                MergeStrategy::KeepSecond => {
                    slot.insert(incoming.clone());
                }
                MergeStrategy::Resolve(f) => {
                    let resolved = f(slot.get(), incoming);
                    slot.insert(resolved);
                }
            },
        }
    }

    Ok(merged)
}
