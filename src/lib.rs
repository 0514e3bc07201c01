//! # utilkit - Parallel Execution and Everyday Helpers
//!
//! A small toolkit with two halves:
//!
//! - **Parallel execution** ([`parallel`]): deferred calls, batch dispatch of
//!   identified tasks, and chunked element-wise maps over slices and maps.
//!   Batch work runs on bounded rayon pools, deferred calls on their own
//!   threads, with per-worker panic isolation throughout.
//! - **Helpers** ([`tools`]): type coercion, JSON loading, map and slice
//!   utilities, time formatting, rounding.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! utilkit = "0.1.0"
//! ```
//!
//! ### Chunked map
//!
//! ```rust
//! use utilkit::parallel::{parallel_map, ParallelConfig};
//!
//! # fn main() -> utilkit::Result<()> {
//! let config = ParallelConfig::default().with_worker_count(3)?;
//! let doubled = parallel_map(&[1, 2, 3, 4, 5], |x| x * 2, &config)?;
//! assert_eq!(doubled, vec![2, 4, 6, 8, 10]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Batch dispatch
//!
//! ```rust
//! use utilkit::parallel::{run_all, ParallelConfig, WorkItem};
//!
//! # fn main() -> utilkit::Result<()> {
//! let tasks: Vec<WorkItem<u64>> = (1..=4u64)
//!     .map(|n| WorkItem::new(format!("square-{}", n), move || n * n))
//!     .collect();
//!
//! let results = run_all(tasks, &ParallelConfig::default())?;
//! let squares: Vec<u64> = results
//!     .iter()
//!     .filter_map(|r| r.outcome.value().copied())
//!     .collect();
//! assert_eq!(squares, vec![1, 4, 9, 16]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Deferred call
//!
//! ```rust
//! use utilkit::parallel::{deferred, Outcome};
//!
//! let handle = deferred(|| "42".parse::<i32>());
//! assert_eq!(handle.wait(), &Outcome::Completed(42));
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`Result`]. Panics raised by caller code
//! inside a worker never unwind into the caller: batch dispatch and deferred
//! calls report them as an aborted outcome, chunked maps as
//! [`Error::WorkerPanicked`] once all chunks have finished.
//!
//! ## Configuration
//!
//! [`ParallelConfig`](parallel::ParallelConfig) bounds every pool. The
//! default ceiling is the number of logical CPUs and can be overridden with
//! the `UTILKIT_MAX_PARALLELISM` environment variable.
//!
//! ## Logging
//!
//! Pool construction and captured panics are reported through `tracing`.
//! The crate never installs a subscriber.

#![allow(clippy::module_name_repetitions)]

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod parallel;
pub mod tools;
pub mod types;

// Re-export main types
pub use error::{Error, ErrorSeverity, Result};
pub use parallel::{
    deferred, parallel_map, run_all, run_all_keyed, Deferred, Outcome, ParallelConfig,
    WorkItem, WorkResult,
};
pub use types::{Numeric, Value};
