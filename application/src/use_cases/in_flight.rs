//! Single-slot guard allowing one generation at a time, process-wide.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// The in-flight flag, owned by the controller and shared with its guards.
#[derive(Debug, Clone, Default)]
pub struct InFlightSlot {
    busy: Arc<AtomicBool>,
}

impl InFlightSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot, or `None` if a generation already holds it.
    pub fn try_acquire(&self) -> Option<InFlightGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Holds the slot until dropped.
///
/// Dropping is the only way to release it, so every exit path (completion,
/// failure, an abandoned future) clears the flag.
#[derive(Debug)]
pub struct InFlightGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
