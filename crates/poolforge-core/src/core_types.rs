use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Pool label assigned to a primer. Panels never need more than a few
/// dozen pools; u16 keeps assignment vectors compact.
pub type PoolIndex = u16;

/// One pool label per primer, in input order.
pub type Assignment = Vec<PoolIndex>;

/// Cooperative cancellation signal. The engine checks it between matrix
/// chunks and at generation boundaries; it never interrupts a running
/// kernel.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
