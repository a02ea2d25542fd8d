use std::future::Future;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::ApiError;

struct Completion<T> {
    generation: u64,
    result: Result<T, ApiError>,
}

/// Runs at most one request at a time and only ever reports the newest one.
///
/// Every request is tagged with the generation current when it was issued.
/// Starting a new request or cancelling aborts the running task and bumps the
/// generation, so a completion that was already queued is dropped on poll.
pub struct LatestFetch<T> {
    runtime: Handle,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    tx: UnboundedSender<Completion<T>>,
    rx: UnboundedReceiver<Completion<T>>,
}

impl<T: Send + 'static> LatestFetch<T> {
    pub fn new(runtime: Handle) -> Self {
        let (tx, rx) = unbounded_channel();
        Self { runtime, generation: 0, in_flight: None, tx, rx }
    }

    /// Supersede whatever is running with `request`
    pub fn start<F>(&mut self, request: F)
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;
        let tx = self.tx.clone();

        self.in_flight = Some(self.runtime.spawn(async move {
            let result = request.await;
            // Receiver lives as long as the controller
            let _ = tx.send(Completion { generation, result });
        }));
    }

    /// Abort the running request, if any. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        match self.in_flight.take() {
            Some(handle) => {
                handle.abort();
                self.generation += 1;
                debug!(generation = self.generation, "cancelled in-flight request");
                true
            }
            None => false,
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drain finished requests and return the result of the current one, if it has landed.
    ///
    /// A current task that ended without reporting (it panicked) is turned into
    /// a `Transport` error so callers never stay in the loading state.
    pub fn poll(&mut self) -> Option<Result<T, ApiError>> {
        if let Some(result) = self.drain() {
            return Some(result);
        }

        let finished = self.in_flight.as_ref().is_some_and(JoinHandle::is_finished);
        if !finished {
            return None;
        }
        // It may have reported between the drain and the check
        if let Some(result) = self.drain() {
            return Some(result);
        }

        self.in_flight = None;
        warn!(generation = self.generation, "request task ended without a response");
        Some(Err(ApiError::Transport("request task ended without a response".to_string())))
    }

    fn drain(&mut self) -> Option<Result<T, ApiError>> {
        let mut latest = None;
        while let Ok(completion) = self.rx.try_recv() {
            if completion.generation == self.generation {
                self.in_flight = None;
                latest = Some(completion.result);
            } else {
                debug!(
                    stale = completion.generation,
                    current = self.generation,
                    "discarding superseded response"
                );
            }
        }
        latest
    }
}

impl<T> Drop for LatestFetch<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}
