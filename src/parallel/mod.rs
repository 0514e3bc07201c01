//! Parallel execution support
//!
//! - [`Deferred`] - start one unit of work, wait for its outcome later
//! - [`run_all`] / [`run_all_keyed`] - run a batch of identified tasks
//! - [`parallel_map`] / [`parallel_for_each`] - chunked map over sequences and maps
//!
//! Every batch entry point runs on a bounded rayon pool and blocks until all
//! of its work has finished. Panics inside caller code are caught per worker
//! and reported as data instead of unwinding through the caller.

mod config;
mod deferred;
mod dispatch;
mod executor;

pub use config::{default_parallelism, ParallelConfig, MAX_PARALLELISM_ENV};
pub use deferred::{deferred, Deferred, Outcome};
pub use dispatch::{run_all, run_all_keyed, Task, TaskOutcome, WorkItem, WorkResult};
pub use executor::{
    chunk_size, parallel_for_each, parallel_for_each_entries, parallel_for_each_value,
    parallel_map, parallel_map_entries, parallel_map_value, try_parallel_map,
};

use std::any::Any;

/// Render a panic payload as text
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
