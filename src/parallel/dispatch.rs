//! Batch dispatch of independent work items
//!
//! Each [`WorkItem`] is a caller-identified closure. Arguments are captured
//! by the closure at the call site, so the dispatcher never needs to know a
//! task's signature.

use super::{panic_message, ParallelConfig};
use crate::error::{Error, Result};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Boxed unit of work
pub type Task<R> = Box<dyn FnOnce() -> R + Send + 'static>;

/// A unit of work with an identifier for traceability
pub struct WorkItem<R> {
    id: String,
    task: Task<R>,
}

impl<R> WorkItem<R> {
    /// Create a work item with a caller-chosen identifier
    pub fn new<F>(id: impl Into<String>, task: F) -> Self
    where
        F: FnOnce() -> R + Send + 'static,
    {
        Self {
            id: id.into(),
            task: Box::new(task),
        }
    }

    /// Create a work item with a random (UUID v4) identifier
    pub fn anonymous<F>(task: F) -> Self
    where
        F: FnOnce() -> R + Send + 'static,
    {
        Self::new(uuid::Uuid::new_v4().to_string(), task)
    }

    /// Identifier of this item
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl<R> fmt::Debug for WorkItem<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkItem")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// How a dispatched task finished
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome<R> {
    /// Task returned normally; the value is kept as-is, errors included
    Completed(R),
    /// Task panicked; holds the panic message
    Aborted(String),
}

impl<R> TaskOutcome<R> {
    /// True if the task returned normally
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskOutcome::Completed(_))
    }

    /// Returned value, if any
    pub fn value(&self) -> Option<&R> {
        match self {
            TaskOutcome::Completed(v) => Some(v),
            TaskOutcome::Aborted(_) => None,
        }
    }

    /// Consume and return the value, if any
    pub fn into_value(self) -> Option<R> {
        match self {
            TaskOutcome::Completed(v) => Some(v),
            TaskOutcome::Aborted(_) => None,
        }
    }
}

/// Result of one [`WorkItem`], carrying the item's identifier
#[derive(Debug, Clone, PartialEq)]
pub struct WorkResult<R> {
    /// Identifier of the originating work item
    pub id: String,
    /// Outcome of the task
    pub outcome: TaskOutcome<R>,
}

fn execute<R>(item: WorkItem<R>) -> WorkResult<R> {
    let WorkItem { id, task } = item;
    let outcome = match panic::catch_unwind(AssertUnwindSafe(task)) {
        Ok(value) => TaskOutcome::Completed(value),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::warn!(task = %id, %message, "task panicked");
            TaskOutcome::Aborted(message)
        }
    };
    WorkResult { id, outcome }
}

/// Run every work item and return results in input order
///
/// `result[i]` belongs to `tasks[i]` whatever order the tasks finish in.
/// Blocks until all tasks are done. A panicking task only affects its own
/// slot.
///
/// # Example
/// ```
/// use utilkit::parallel::{run_all, ParallelConfig, WorkItem};
///
/// let tasks = vec![
///     WorkItem::new("a", || 1 + 1),
///     WorkItem::new("b", || 2 * 3),
/// ];
/// let results = run_all(tasks, &ParallelConfig::default()).unwrap();
/// assert_eq!(results[0].id, "a");
/// assert_eq!(results[1].outcome.value(), Some(&6));
/// ```
pub fn run_all<R>(tasks: Vec<WorkItem<R>>, config: &ParallelConfig) -> Result<Vec<WorkResult<R>>>
where
    R: Send + 'static,
{
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    let pool = config.build_pool(tasks.len())?;
    Ok(pool.install(|| tasks.into_par_iter().map(execute).collect()))
}

/// Run every work item and return outcomes keyed by item identifier
///
/// Identifiers must be unique; a duplicate is rejected before any task runs.
pub fn run_all_keyed<R>(
    tasks: Vec<WorkItem<R>>,
    config: &ParallelConfig,
) -> Result<HashMap<String, TaskOutcome<R>>>
where
    R: Send + 'static,
{
    {
        let mut seen = HashSet::with_capacity(tasks.len());
        for item in &tasks {
            if !seen.insert(item.id()) {
                return Err(Error::DuplicateTaskId {
                    id: item.id.clone(),
                });
            }
        }
    }

    if tasks.is_empty() {
        return Ok(HashMap::new());
    }

    let pool = config.build_pool(tasks.len())?;
    let results = Mutex::new(HashMap::with_capacity(tasks.len()));

    pool.install(|| {
        tasks.into_par_iter().for_each(|item| {
            let WorkResult { id, outcome } = execute(item);
            results.lock().insert(id, outcome);
        })
    });

    Ok(results.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked_div(a: i64, b: i64) -> std::result::Result<i64, String> {
        if b == 0 {
            Err("division by zero".to_string())
        } else {
            Ok(a / b)
        }
    }

    #[test]
    fn test_run_all_empty() {
        let tasks: Vec<WorkItem<i32>> = vec![];
        let results = run_all(tasks, &ParallelConfig::default()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_run_all_preserves_order_and_ids() {
        let tasks: Vec<WorkItem<u64>> = (0..50u64)
            .map(|i| {
                WorkItem::new(format!("task-{}", i), move || {
                    // Earlier tasks sleep longer so completion order differs
                    std::thread::sleep(std::time::Duration::from_micros(50 - i));
                    i * 3
                })
            })
            .collect();

        let results = run_all(tasks, &ParallelConfig::default().with_max_parallelism(8)).unwrap();

        assert_eq!(results.len(), 50);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.id, format!("task-{}", i));
            assert_eq!(result.outcome, TaskOutcome::Completed(i as u64 * 3));
        }
    }

    #[test]
    fn test_run_all_keeps_error_values_inline() {
        let tasks = vec![
            WorkItem::new("ok", || checked_div(10, 2)),
            WorkItem::new("err", || checked_div(1, 0)),
        ];
        let results = run_all(tasks, &ParallelConfig::default()).unwrap();

        assert_eq!(results[0].outcome, TaskOutcome::Completed(Ok(5)));
        assert_eq!(
            results[1].outcome,
            TaskOutcome::Completed(Err("division by zero".to_string()))
        );
    }

    #[test]
    fn test_run_all_isolates_panic() {
        let tasks = vec![
            WorkItem::new("first", || 1),
            WorkItem::new("boom", || -> i32 { panic!("task exploded") }),
            WorkItem::new("last", || 3),
        ];
        let results = run_all(tasks, &ParallelConfig::default()).unwrap();

        assert_eq!(results[0].outcome.value(), Some(&1));
        match &results[1].outcome {
            TaskOutcome::Aborted(msg) => assert!(msg.contains("task exploded")),
            other => panic!("expected abort, got {:?}", other),
        }
        assert_eq!(results[2].outcome.value(), Some(&3));
    }

    #[test]
    fn test_anonymous_ids_are_unique() {
        let a = WorkItem::anonymous(|| ());
        let b = WorkItem::anonymous(|| ());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id().len(), 36);
    }

    #[test]
    fn test_run_all_keyed() {
        let tasks: Vec<WorkItem<usize>> = ["alpha", "beta", "gamma"]
            .iter()
            .map(|&name| WorkItem::new(name, move || name.len()))
            .collect();

        let results = run_all_keyed(tasks, &ParallelConfig::default()).unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results["alpha"], TaskOutcome::Completed(5));
        assert_eq!(results["beta"], TaskOutcome::Completed(4));
        assert_eq!(results["gamma"], TaskOutcome::Completed(5));
    }

    #[test]
    fn test_run_all_keyed_rejects_duplicates_before_running() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let runs = Arc::new(AtomicUsize::new(0));
        let tasks: Vec<WorkItem<()>> = ["same", "other", "same"]
            .iter()
            .map(|id| {
                let runs = Arc::clone(&runs);
                WorkItem::new(*id, move || {
                    runs.fetch_add(1, Ordering::SeqCst);
                })
            })
            .collect();

        let err = run_all_keyed(tasks, &ParallelConfig::default()).unwrap_err();
        assert!(matches!(err, Error::DuplicateTaskId { ref id } if id == "same"));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
