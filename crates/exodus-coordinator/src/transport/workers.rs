//! Tracking for per-connection worker threads.

use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::warn;

use super::LISTENER_TARGET;

/// Live worker threads and their join handles.
///
/// Clones share the same set.
#[derive(Debug, Clone, Default)]
pub(crate) struct WorkerSet {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    active: Mutex<usize>,
    idle: Condvar,
    next_id: AtomicU64,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

/// Decrements the live count when the worker ends, including by panic.
struct ActiveGuard {
    inner: Arc<Inner>,
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        let mut active = lock(&self.inner.active);
        *active = active.saturating_sub(1);
        if *active == 0 {
            self.inner.idle.notify_all();
        }
    }
}

impl WorkerSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Runs `task` on a new thread named `exodus-worker-<n>`.
    pub(crate) fn spawn<F>(&self, task: F) -> io::Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        *lock(&self.inner.active) += 1;
        let guard = ActiveGuard {
            inner: Arc::clone(&self.inner),
        };
        // On spawn failure the closure, and with it the guard, is dropped.
        let handle = thread::Builder::new()
            .name(format!("exodus-worker-{id}"))
            .spawn(move || {
                let _guard = guard;
                task();
            })?;

        let mut handles = lock(&self.inner.handles);
        reap_finished(&mut handles);
        handles.push(handle);
        Ok(())
    }

    /// Number of workers still running.
    pub(crate) fn active(&self) -> usize {
        *lock(&self.inner.active)
    }

    /// Waits up to `timeout` for every worker to finish.
    ///
    /// Returns how many workers were still running at the deadline.
    pub(crate) fn drain(&self, timeout: Duration) -> usize {
        let active = lock(&self.inner.active);
        let remaining = match self
            .inner
            .idle
            .wait_timeout_while(active, timeout, |active| *active > 0)
        {
            Ok((active, _)) => *active,
            Err(poisoned) => *poisoned.into_inner().0,
        };
        reap_finished(&mut lock(&self.inner.handles));
        remaining
    }
}

fn reap_finished(handles: &mut Vec<JoinHandle<()>>) {
    let (finished, running): (Vec<_>, Vec<_>) =
        handles.drain(..).partition(|handle| handle.is_finished());
    *handles = running;
    for handle in finished {
        let name = handle.thread().name().map(str::to_owned);
        if handle.join().is_err() {
            warn!(
                target: LISTENER_TARGET,
                worker = name.as_deref().unwrap_or("unnamed"),
                "connection worker panicked"
            );
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
