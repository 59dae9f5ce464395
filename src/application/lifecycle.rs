//! Process-wide exit status and cleanup chain
//!
//! `Lifecycle` has two states, RUNNING and TERMINATING. While running, any
//! thread may raise the exit status (max wins, never lowered) and cleanups may
//! be appended. [`Lifecycle::finish`] switches to TERMINATING, runs every
//! cleanup exactly once in registration order and returns the final status;
//! [`Lifecycle::shutdown`] does the same and ends the process.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, instrument};

use crate::exitcode;

/// A one-shot teardown action.
pub type Cleanup = Box<dyn FnOnce() + Send>;

pub struct Lifecycle {
    status: Mutex<i32>,
    cleanups: Mutex<Vec<Cleanup>>,
    terminating: AtomicBool,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifecycle")
            .field("status", &self.status())
            .field("cleanups", &lock(&self.cleanups).len())
            .field("terminating", &self.is_terminating())
            .finish()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            status: Mutex::new(exitcode::OK),
            cleanups: Mutex::new(Vec::new()),
            terminating: AtomicBool::new(false),
        }
    }

    /// Set the exit status to `max(current, n)`.
    pub fn raise_status(&self, n: i32) {
        let mut status = lock(&self.status);
        if *status < n {
            debug!("raise_status: {} -> {}", *status, n);
            *status = n;
        }
    }

    /// Current aggregated exit status.
    pub fn status(&self) -> i32 {
        *lock(&self.status)
    }

    /// Append a cleanup to the chain.
    ///
    /// # Panics
    /// If called once termination has started.
    pub fn register_cleanup<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        assert!(
            !self.is_terminating(),
            "cleanup registered after shutdown started"
        );
        lock(&self.cleanups).push(Box::new(action));
    }

    pub fn is_terminating(&self) -> bool {
        self.terminating.load(Ordering::SeqCst)
    }

    /// Enter TERMINATING, run the cleanup chain once in order and return
    /// the final exit status. A panicking cleanup propagates.
    ///
    /// # Panics
    /// If called twice.
    #[instrument(skip(self))]
    pub fn finish(&self) -> i32 {
        let already = self.terminating.swap(true, Ordering::SeqCst);
        assert!(!already, "lifecycle finished twice");

        let chain = std::mem::take(&mut *lock(&self.cleanups));
        debug!("finish: running {} cleanups", chain.len());
        for action in chain {
            action();
        }

        let status = self.status();
        debug!("finish: exit status {}", status);
        status
    }

    /// Run [`Lifecycle::finish`] and exit the process with its status.
    pub fn shutdown(&self) -> ! {
        let status = self.finish();
        std::process::exit(status)
    }
}

/// The guarded values stay valid even if a holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[test]
    fn given_new_lifecycle_then_status_is_ok() {
        assert_eq!(Lifecycle::new().status(), exitcode::OK);
    }

    #[test]
    fn given_lower_value_when_raise_then_status_unchanged() {
        let lc = Lifecycle::new();
        lc.raise_status(3);
        lc.raise_status(1);
        lc.raise_status(0);
        assert_eq!(lc.status(), 3);
    }

    #[test]
    fn given_concurrent_raisers_then_maximum_wins() {
        let lc = Arc::new(Lifecycle::new());
        let handles: Vec<_> = (0..16)
            .map(|n| {
                let lc = Arc::clone(&lc);
                thread::spawn(move || lc.raise_status(n))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(lc.status(), 15);
    }

    #[test]
    fn given_cleanups_when_finish_then_each_runs_once_in_order() {
        let lc = Lifecycle::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        for name in ["A", "B", "C"] {
            let log = Arc::clone(&log);
            lc.register_cleanup(move || log.lock().unwrap().push(name));
        }

        lc.raise_status(2);
        let status = lc.finish();

        assert_eq!(status, 2);
        assert_eq!(*log.lock().unwrap(), ["A", "B", "C"]);
        assert!(lc.is_terminating());
    }

    #[test]
    #[should_panic(expected = "after shutdown started")]
    fn given_terminating_when_register_then_panics() {
        let lc = Lifecycle::new();
        lc.finish();
        lc.register_cleanup(|| {});
    }

    #[test]
    #[should_panic(expected = "finished twice")]
    fn given_finished_when_finish_again_then_panics() {
        let lc = Lifecycle::new();
        lc.finish();
        lc.finish();
    }
}
