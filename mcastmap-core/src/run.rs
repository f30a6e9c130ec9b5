//! Run control
//!
//! Cancellation is cooperative: stages check the flag between devices and
//! between stages, so a cancelled run never leaves a half-written device
//! record behind.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag for a mapping run
#[derive(Debug, Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    /// Create a new flag in the running state
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Request cancellation of the run
    pub fn cancel(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Check whether the run should keep going
    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        Self::new()
    }
}
