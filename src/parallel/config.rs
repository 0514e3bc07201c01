use crate::error::{Error, Result};

/// Environment variable overriding the default pool size
pub const MAX_PARALLELISM_ENV: &str = "UTILKIT_MAX_PARALLELISM";

/// Configuration for parallel execution
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Maximum number of OS threads a single dispatch may use (default: num_cpus)
    pub max_parallelism: usize,
    /// Number of contiguous chunks a collection is split into
    /// (default: `max_parallelism`)
    pub worker_count: Option<usize>,
    /// Prefix for worker thread names
    pub thread_name_prefix: String,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        // Pool size from environment or available parallelism
        let max_parallelism = std::env::var(MAX_PARALLELISM_ENV)
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or_else(default_parallelism);

        Self {
            max_parallelism,
            worker_count: None,
            thread_name_prefix: "utilkit-worker".to_string(),
        }
    }
}

impl ParallelConfig {
    /// Build a config from an optional-argument list of worker counts
    ///
    /// An empty list keeps the defaults; a single value sets the worker
    /// count. More than one value, or a zero, is rejected.
    pub fn from_worker_counts(counts: &[usize]) -> Result<Self> {
        match counts {
            [] => Ok(Self::default()),
            [count] => Self::default().with_worker_count(*count),
            _ => Err(Error::ConflictingWorkerCounts {
                given: counts.len(),
            }),
        }
    }

    /// Set the number of chunks, rejecting zero
    pub fn with_worker_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidWorkerCount { count });
        }
        self.worker_count = Some(count);
        Ok(self)
    }

    /// Cap the number of OS threads; zero is clamped to one
    pub fn with_max_parallelism(mut self, max: usize) -> Self {
        self.max_parallelism = max.max(1);
        self
    }

    /// Set the worker thread name prefix
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Effective chunk count for this config
    pub fn effective_worker_count(&self) -> Result<usize> {
        match self.worker_count {
            Some(0) => Err(Error::InvalidWorkerCount { count: 0 }),
            Some(n) => Ok(n),
            None => Ok(self.max_parallelism.max(1)),
        }
    }

    /// Build a pool sized for `units` pieces of work
    pub(crate) fn build_pool(&self, units: usize) -> Result<rayon::ThreadPool> {
        let threads = self.max_parallelism.max(1).min(units.max(1));
        let prefix = self.thread_name_prefix.clone();

        tracing::debug!(threads, units, "building worker pool");

        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |i| format!("{}-{}", prefix, i))
            .build()
            .map_err(|e| Error::PoolBuild(e.to_string()))
    }
}

/// Platform-reported parallelism, at least one
pub fn default_parallelism() -> usize {
    num_cpus::get().max(1)
}
