use std::sync::atomic::{AtomicBool, Ordering};

use super::AppLifecycle;

/// Tracks whether the application is in the background. The application
/// framework glue calls `suspend` and `resume` from its lifecycle hooks.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    suspended: AtomicBool,
}

impl LifecycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suspend(&self) {
        tracing::debug!("Application suspended");
        self.suspended.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        tracing::debug!("Application resumed");
        self.suspended.store(false, Ordering::SeqCst);
    }
}

impl AppLifecycle for LifecycleTracker {
    fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::SeqCst)
    }
}
