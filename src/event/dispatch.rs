//! Fire-and-forget handler execution
//!
//! Each triggered handler runs as its own task on a tokio blocking pool. The
//! tick never waits for handlers, and nothing cancels them once spawned.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::warn;

use super::kind::Event;

/// Callback invoked with the event that triggered it
pub type EventHandler = Arc<dyn Fn(Event) + Send + Sync>;

/// Wraps a closure as an [`EventHandler`]
pub fn handler<F>(f: F) -> EventHandler
where
    F: Fn(Event) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// How many handler tasks may run at once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Every triggered handler is spawned
    #[default]
    Unbounded,
    /// Handlers triggered while `max_in_flight` tasks are running are dropped
    Bounded { max_in_flight: usize },
}

/// Errors from setting up a dispatcher
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("failed to build handler runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Decrements the in-flight count when a task finishes or unwinds
struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Spawns handler tasks
pub struct Dispatcher {
    /// Present when the dispatcher owns its runtime
    runtime: Option<Runtime>,
    handle: Handle,
    policy: DispatchPolicy,
    in_flight: Arc<AtomicUsize>,
}

impl Dispatcher {
    /// Creates a dispatcher with its own multi-threaded runtime
    pub fn new(policy: DispatchPolicy) -> Result<Self, DispatchError> {
        Self::with_worker_threads(policy, 2)
    }

    /// Creates a dispatcher whose runtime uses `worker_threads` async workers
    pub fn with_worker_threads(
        policy: DispatchPolicy,
        worker_threads: usize,
    ) -> Result<Self, DispatchError> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .thread_name("event-handler")
            .build()?;
        let handle = runtime.handle().clone();

        Ok(Self {
            runtime: Some(runtime),
            handle,
            policy,
            in_flight: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Creates a dispatcher that spawns onto an existing runtime
    pub fn from_handle(handle: Handle, policy: DispatchPolicy) -> Self {
        Self {
            runtime: None,
            handle,
            policy,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Number of handler tasks spawned and not yet finished
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Spawns `handler(event)` as a detached task
    ///
    /// Returns false if the bounded policy dropped it.
    pub fn dispatch(&self, handler: &EventHandler, event: Event) -> bool {
        let previous = self.in_flight.fetch_add(1, Ordering::AcqRel);
        let guard = InFlight(Arc::clone(&self.in_flight));

        if let DispatchPolicy::Bounded { max_in_flight } = self.policy
            && previous >= max_in_flight
        {
            drop(guard);
            warn!(%event, max_in_flight, "Handler pool saturated, dropping handler");
            return false;
        }

        let handler = Arc::clone(handler);
        // The join handle is dropped on purpose: a panicking handler only ends its own task
        drop(self.handle.spawn_blocking(move || {
            let _guard = guard;
            handler(event);
        }));
        true
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("owns_runtime", &self.runtime.is_some())
            .field("policy", &self.policy)
            .field("in_flight", &self.in_flight())
            .finish()
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        // Outstanding handlers are left to finish on their own
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;
    use crate::input::{Key, KeyAction};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn space() -> Event {
        Event::key(Key::Space, KeyAction::JustDown)
    }

    #[test]
    fn test_handler_receives_event() {
        let dispatcher = Dispatcher::new(DispatchPolicy::Unbounded).unwrap();
        let (tx, rx) = mpsc::channel();
        let h = handler(move |event| tx.send(event).unwrap());

        assert!(dispatcher.dispatch(&h, space()));
        assert_eq!(rx.recv_timeout(TIMEOUT).unwrap(), space());
    }

    #[test]
    fn test_panicking_handler_is_isolated() {
        let dispatcher = Dispatcher::new(DispatchPolicy::Unbounded).unwrap();
        let (tx, rx) = mpsc::channel();
        let bad = handler(|_| panic!("handler failure"));
        let good = handler(move |_| tx.send(()).unwrap());

        dispatcher.dispatch(&bad, space());
        dispatcher.dispatch(&good, space());
        rx.recv_timeout(TIMEOUT).unwrap();
    }

    #[test]
    fn test_bounded_policy_drops_when_saturated() {
        let dispatcher =
            Dispatcher::new(DispatchPolicy::Bounded { max_in_flight: 1 }).unwrap();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let (started_tx, started_rx) = mpsc::channel();
        let release_rx = std::sync::Mutex::new(release_rx);

        let blocking = handler(move |_| {
            started_tx.send(()).unwrap();
            let _ = release_rx.lock().unwrap().recv_timeout(TIMEOUT);
        });

        assert!(dispatcher.dispatch(&blocking, space()));
        started_rx.recv_timeout(TIMEOUT).unwrap();
        assert_eq!(dispatcher.in_flight(), 1);

        assert!(!dispatcher.dispatch(&blocking, space()));
        assert_eq!(dispatcher.in_flight(), 1);

        release_tx.send(()).unwrap();
    }

    #[test]
    fn test_from_handle() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let dispatcher = Dispatcher::from_handle(runtime.handle().clone(), DispatchPolicy::default());
        let (tx, rx) = mpsc::channel();
        let h = handler(move |event| tx.send(event).unwrap());

        dispatcher.dispatch(&h, space());
        assert_eq!(rx.recv_timeout(TIMEOUT).unwrap(), space());
    }
}
