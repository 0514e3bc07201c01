//! Partitioned parallel map over sequences and maps
//!
//! The input is split into `worker_count` contiguous chunks of
//! `ceil(len / worker_count)` elements. Each chunk is handed to one worker
//! together with the disjoint slice of result slots it owns, so no locking
//! is needed and the output is index-aligned with the input.

use super::{panic_message, ParallelConfig};
use crate::error::{Error, Result};
use crate::types::Value;
use rayon::prelude::*;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::panic::{self, AssertUnwindSafe};

/// Chunk length for `len` elements spread over `workers` workers
///
/// Zero workers is rejected with [`Error::InvalidWorkerCount`].
pub fn chunk_size(len: usize, workers: usize) -> Result<usize> {
    if workers == 0 {
        return Err(Error::InvalidWorkerCount { count: workers });
    }
    Ok(len.div_ceil(workers).max(1))
}

/// Core chunked driver shared by every entry point
fn run_chunked<T, U, F>(items: &[T], worker: F, config: &ParallelConfig) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(usize, &T) -> U + Send + Sync,
{
    let workers = config.effective_worker_count()?;

    // Empty array fast path
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let size = chunk_size(items.len(), workers)?;
    let chunks = items.len().div_ceil(size);
    tracing::debug!(len = items.len(), workers, chunk_size = size, chunks, "partitioned input");

    let pool = config.build_pool(chunks)?;
    let mut slots: Vec<Option<U>> = std::iter::repeat_with(|| None).take(items.len()).collect();

    let failures: Vec<(usize, String)> = pool.install(|| {
        slots
            .par_chunks_mut(size)
            .zip(items.par_chunks(size))
            .enumerate()
            .filter_map(|(chunk, (out, input))| {
                let base = chunk * size;
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    for (offset, (slot, item)) in out.iter_mut().zip(input).enumerate() {
                        *slot = Some(worker(base + offset, item));
                    }
                }));
                outcome
                    .err()
                    .map(|payload| (chunk, panic_message(payload.as_ref())))
            })
            .collect()
    });

    if let Some((chunk, message)) = failures.into_iter().next() {
        tracing::warn!(chunk, %message, "worker panicked");
        return Err(Error::WorkerPanicked { chunk, message });
    }

    slots
        .into_iter()
        .map(|slot| slot.ok_or_else(|| Error::runtime("result slot left unfilled")))
        .collect()
}

/// Parallel map over a slice
///
/// # Returns
/// * `Ok(Vec<U>)` - `result[i] == worker(&items[i])`
/// * `Err(Error)` - invalid config, pool failure, or a worker panic
///
/// # Example
/// ```
/// use utilkit::parallel::{parallel_map, ParallelConfig};
///
/// let config = ParallelConfig::from_worker_counts(&[2]).unwrap();
/// let doubled = parallel_map(&[1, 2, 3], |n| n * 2, &config).unwrap();
/// assert_eq!(doubled, vec![2, 4, 6]);
/// ```
pub fn parallel_map<T, U, F>(items: &[T], worker: F, config: &ParallelConfig) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Send + Sync,
{
    run_chunked(items, |_, item| worker(item), config)
}

/// Parallel map with a fallible worker
///
/// Every chunk runs to completion; the first error in index order is
/// returned.
pub fn try_parallel_map<T, U, F>(items: &[T], worker: F, config: &ParallelConfig) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> Result<U> + Send + Sync,
{
    run_chunked(items, |_, item| worker(item), config)?
        .into_iter()
        .collect()
}

/// Parallel map over the values of a map
///
/// Keys are snapshotted before launch; each key appears exactly once in the
/// output, paired with its result.
pub fn parallel_map_entries<K, V, S, U, F>(
    map: &HashMap<K, V, S>,
    worker: F,
    config: &ParallelConfig,
) -> Result<Vec<(K, U)>>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Sync,
    S: BuildHasher,
    U: Send,
    F: Fn(&V) -> U + Send + Sync,
{
    let entries: Vec<(&K, &V)> = map.iter().collect();
    run_chunked(&entries, |_, (k, v)| ((*k).clone(), worker(*v)), config)
}

/// Index-aware parallel map over a slice
///
/// The worker receives each element's position alongside the element.
pub fn parallel_for_each<T, U, F>(items: &[T], worker: F, config: &ParallelConfig) -> Result<Vec<U>>
where
    T: Sync,
    U: Send,
    F: Fn(usize, &T) -> U + Send + Sync,
{
    run_chunked(items, worker, config)
}

/// Key-aware parallel map over a map
pub fn parallel_for_each_entries<K, V, S, U, F>(
    map: &HashMap<K, V, S>,
    worker: F,
    config: &ParallelConfig,
) -> Result<Vec<(K, U)>>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Sync,
    S: BuildHasher,
    U: Send,
    F: Fn(&K, &V) -> U + Send + Sync,
{
    let entries: Vec<(&K, &V)> = map.iter().collect();
    run_chunked(&entries, |_, (k, v)| ((*k).clone(), worker(*k, *v)), config)
}

/// Object fields sorted by key, the fixed snapshot order for dynamic input
fn sorted_fields(obj: &HashMap<String, Value>) -> Vec<(&String, &Value)> {
    let mut fields: Vec<(&String, &Value)> = obj.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));
    fields
}

/// Parallel map over a dynamic collection
///
/// Arrays map their elements in order; objects map their values in key
/// order. Any other value is rejected before a worker starts.
pub fn parallel_map_value<F>(data: &Value, worker: F, config: &ParallelConfig) -> Result<Vec<Value>>
where
    F: Fn(&Value) -> Value + Send + Sync,
{
    match data {
        Value::Array(items) => run_chunked(items.as_slice(), |_, item| worker(item), config),
        Value::Object(obj) => {
            let fields = sorted_fields(obj);
            run_chunked(&fields, |_, (_, v)| worker(*v), config)
        }
        other => Err(Error::UnsupportedCollection {
            got: other.type_name(),
        }),
    }
}

/// Index/key-aware parallel map over a dynamic collection
///
/// Arrays pass `Value::Int(index)`, objects pass `Value::String(key)`.
pub fn parallel_for_each_value<F>(
    data: &Value,
    worker: F,
    config: &ParallelConfig,
) -> Result<Vec<Value>>
where
    F: Fn(&Value, &Value) -> Value + Send + Sync,
{
    match data {
        Value::Array(items) => run_chunked(
            items.as_slice(),
            |i, item| worker(&Value::Int(i as i64), item),
            config,
        ),
        Value::Object(obj) => {
            let fields = sorted_fields(obj);
            run_chunked(
                &fields,
                |_, (k, v)| worker(&Value::String((*k).clone()), *v),
                config,
            )
        }
        other => Err(Error::UnsupportedCollection {
            got: other.type_name(),
        }),
    }
}
