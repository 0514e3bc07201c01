//! Deferred calls: start work now, collect the outcome later
//!
//! ```
//! use utilkit::parallel::{Deferred, Outcome};
//!
//! fn checked_add(a: i32, b: i32) -> Result<i32, String> {
//!     a.checked_add(b).ok_or_else(|| "overflow".to_string())
//! }
//!
//! let handle = Deferred::start(move || checked_add(2, 3));
//! // ... other work ...
//! assert_eq!(handle.wait(), &Outcome::Completed(5));
//! ```

use super::panic_message;
use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;

/// Final state of a deferred call
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T, E> {
    /// Work returned `Ok`
    Completed(T),
    /// Work returned `Err`; kept apart from the results
    Failed(E),
    /// Work panicked; holds the panic message
    Aborted(String),
}

impl<T, E> Outcome<T, E> {
    /// Result value, if the work completed
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Completed(v) => Some(v),
            _ => None,
        }
    }

    /// Returned error, if the work failed
    pub fn error(&self) -> Option<&E> {
        match self {
            Outcome::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// True if the work completed with a value
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    /// True if the work panicked
    pub fn is_aborted(&self) -> bool {
        matches!(self, Outcome::Aborted(_))
    }
}

/// Generate unique deferred call ID
fn generate_deferred_id() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("deferred_{}", id)
}

/// Slot the worker thread fills and waiters block on
struct Handoff<T, E> {
    slot: Mutex<Option<Outcome<T, E>>>,
    ready: Condvar,
}

impl<T, E> Handoff<T, E> {
    fn fill(&self, outcome: Outcome<T, E>) {
        *self.slot.lock() = Some(outcome);
        self.ready.notify_all();
    }
}

/// Handle to work running on its own thread
///
/// The work starts as soon as the handle is created and always runs to
/// completion, even if the handle is dropped. [`wait`](Deferred::wait) may
/// be called any number of times, from any number of threads; every call
/// observes the same outcome.
///
/// Each call gets a dedicated thread, so waiting from inside a dispatch
/// task, another deferred call or an async runtime cannot starve the work
/// it waits on. Waiting still blocks the calling thread.
pub struct Deferred<T, E> {
    id: String,
    handoff: Arc<Handoff<T, E>>,
    outcome: OnceLock<Outcome<T, E>>,
}

impl<T, E> Deferred<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
{
    /// Start `work` on a new thread and return immediately
    pub fn start<F>(work: F) -> Self
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        let id = generate_deferred_id();
        let task_id = id.clone();
        let handoff = Arc::new(Handoff {
            slot: Mutex::new(None),
            ready: Condvar::new(),
        });
        let worker_handoff = Arc::clone(&handoff);

        let spawned = thread::Builder::new()
            .name(format!("utilkit-{}", id))
            .spawn(move || {
                let outcome = match panic::catch_unwind(AssertUnwindSafe(work)) {
                    Ok(Ok(value)) => Outcome::Completed(value),
                    Ok(Err(err)) => Outcome::Failed(err),
                    Err(payload) => {
                        let message = panic_message(payload.as_ref());
                        tracing::warn!(deferred = %task_id, %message, "deferred call panicked");
                        Outcome::Aborted(message)
                    }
                };
                worker_handoff.fill(outcome);
            });

        if let Err(err) = spawned {
            tracing::warn!(deferred = %id, error = %err, "failed to spawn deferred call");
            handoff.fill(Outcome::Aborted(format!(
                "deferred call {} could not start: {}",
                id, err
            )));
        }

        Self {
            id,
            handoff,
            outcome: OnceLock::new(),
        }
    }
}

impl<T, E> Deferred<T, E> {
    /// Identifier assigned at start
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Block until the work finishes and return its outcome
    pub fn wait(&self) -> &Outcome<T, E> {
        self.outcome.get_or_init(|| {
            let mut slot = self.handoff.slot.lock();
            loop {
                if let Some(outcome) = slot.take() {
                    return outcome;
                }
                self.handoff.ready.wait(&mut slot);
            }
        })
    }

    /// Non-blocking completion check
    pub fn is_finished(&self) -> bool {
        self.outcome.get().is_some() || self.handoff.slot.lock().is_some()
    }

    /// Block until finished and take ownership of the outcome
    pub fn into_outcome(self) -> Outcome<T, E> {
        self.wait();
        match self.outcome.into_inner() {
            Some(outcome) => outcome,
            None => Outcome::Aborted("deferred outcome missing after wait".to_string()),
        }
    }
}

impl<T, E> fmt::Debug for Deferred<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("id", &self.id)
            .field("finished", &self.is_finished())
            .finish()
    }
}

/// Shorthand for [`Deferred::start`]
pub fn deferred<T, E, F>(work: F) -> Deferred<T, E>
where
    T: Send + 'static,
    E: Send + 'static,
    F: FnOnce() -> Result<T, E> + Send + 'static,
{
    Deferred::start(work)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    struct AddError(String);

    fn add_or_fail(a: i64, b: i64, fail: bool) -> Result<i64, AddError> {
        if fail {
            Err(AddError(format!("refusing to add {} and {}", a, b)))
        } else {
            Ok(a + b)
        }
    }

    #[test]
    fn test_completed_value() {
        let handle = Deferred::start(move || add_or_fail(2, 3, false));
        let outcome = handle.wait();
        assert_eq!(outcome, &Outcome::Completed(5));
        assert_eq!(outcome.error(), None);
    }

    #[test]
    fn test_error_segregated() {
        let handle = deferred(move || add_or_fail(2, 3, true));
        let outcome = handle.wait();
        assert_eq!(outcome.value(), None);
        assert_eq!(
            outcome.error(),
            Some(&AddError("refusing to add 2 and 3".to_string()))
        );
    }

    #[test]
    fn test_wait_is_idempotent() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let handle: Deferred<usize, ()> = Deferred::start(move || {
            Ok(counter.fetch_add(1, Ordering::SeqCst) + 1)
        });

        let first = handle.wait().clone();
        let second = handle.wait().clone();
        assert_eq!(first, second);
        assert_eq!(first, Outcome::Completed(1));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_concurrent_waiters_see_same_outcome() {
        let handle: Arc<Deferred<u32, ()>> = Arc::new(Deferred::start(|| {
            std::thread::sleep(Duration::from_millis(20));
            Ok(42)
        }));

        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let handle = Arc::clone(&handle);
                std::thread::spawn(move || handle.wait().clone())
            })
            .collect();

        for waiter in waiters {
            assert_eq!(waiter.join().unwrap(), Outcome::Completed(42));
        }
    }

    #[test]
    fn test_panic_becomes_aborted() {
        let handle: Deferred<(), ()> = Deferred::start(|| panic!("worker blew up"));
        match handle.wait() {
            Outcome::Aborted(msg) => assert!(msg.contains("worker blew up")),
            other => panic!("expected abort, got {:?}", other),
        }
        assert!(handle.wait().is_aborted());
    }

    #[test]
    fn test_is_finished_eventually_true() {
        let handle: Deferred<&str, ()> = Deferred::start(|| Ok("done"));
        let _ = handle.wait();
        assert!(handle.is_finished());
        assert_eq!(handle.into_outcome(), Outcome::Completed("done"));
    }

    #[test]
    fn test_nested_deferred_calls() {
        let outer: Deferred<u64, String> = Deferred::start(|| {
            let inner: Vec<Deferred<u64, String>> =
                (1..=8u64).map(|n| Deferred::start(move || Ok(n * 10))).collect();
            inner
                .iter()
                .map(|h| h.wait().value().copied().ok_or_else(|| h.id().to_string()))
                .sum()
        });
        assert_eq!(outer.wait(), &Outcome::Completed(360));
    }

    #[test]
    fn test_debug_reports_progress() {
        let handle: Deferred<(), ()> = Deferred::start(|| Ok(()));
        handle.wait();
        let rendered = format!("{:?}", handle);
        assert!(rendered.contains("finished: true"));
        assert!(rendered.contains(handle.id()));
    }

    #[test]
    fn test_ids_are_unique() {
        let a: Deferred<(), ()> = Deferred::start(|| Ok(()));
        let b: Deferred<(), ()> = Deferred::start(|| Ok(()));
        assert_ne!(a.id(), b.id());
        assert!(a.id().starts_with("deferred_"));
    }
}
