//! Process-wide bound on concurrent leaf operations

use crate::error::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Semaphore, SemaphorePermit};

/// Counting limiter for per-file fetch/compare work
///
/// Backed by tokio's FIFO semaphore. Directory listings never pass through
/// here. Also counts holders so tests can assert the bound was respected.
#[derive(Debug)]
pub struct LeafLimiter {
    semaphore: Semaphore,
    bound: usize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    completed: AtomicUsize,
}

impl LeafLimiter {
    /// Limiter admitting at most `bound` holders (at least one)
    pub fn new(bound: usize) -> Self {
        let bound = bound.max(1);
        Self {
            semaphore: Semaphore::new(bound),
            bound,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    /// Wait for a slot; the slot is released when the permit drops
    pub async fn acquire(&self) -> Result<LeafPermit<'_>> {
        let permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| Error::Runtime(format!("failed to acquire semaphore: {}", e)))?;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        Ok(LeafPermit {
            limiter: self,
            _permit: permit,
        })
    }

    /// Configured bound
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Holders right now
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneous holders observed
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Permits released so far
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

/// Held for the duration of one leaf operation
#[derive(Debug)]
pub struct LeafPermit<'a> {
    limiter: &'a LeafLimiter,
    _permit: SemaphorePermit<'a>,
}

impl Drop for LeafPermit<'_> {
    fn drop(&mut self) {
        // Runs before `_permit` is dropped, so the count never exceeds the bound
        self.limiter.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.limiter.completed.fetch_add(1, Ordering::SeqCst);
    }
}
