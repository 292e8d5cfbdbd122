//! Minimum spacing between outgoing requests, shared across threads.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Hands out request slots at least `min_interval` apart. Clones share the
/// same schedule, so every worker holding a clone is paced together.
#[derive(Debug, Clone)]
pub struct RequestGate {
    min_interval: Duration,
    next_slot: Arc<Mutex<Option<Instant>>>,
}

impl RequestGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Arc::new(Mutex::new(None)),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Reserve the next free slot without waiting for it.
    pub fn reserve(&self) -> Instant {
        let now = Instant::now();
        let mut next = self.next_slot.lock();
        let slot = match *next {
            Some(at) if at > now => at,
            _ => now,
        };
        *next = Some(slot + self.min_interval);
        slot
    }

    /// Block until this caller's slot comes up.
    pub fn wait(&self) {
        if self.min_interval.is_zero() {
            return;
        }
        let slot = self.reserve();
        let now = Instant::now();
        if slot > now {
            std::thread::sleep(slot - now);
        }
    }
}
