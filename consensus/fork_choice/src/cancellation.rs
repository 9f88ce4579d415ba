use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A marker that can be used to cancel an in-progress operation.
///
/// Clones share state: cancelling any clone cancels them all. Long-running walks poll the token
/// once per iteration and bail out with `Error::Cancelled`; writes already committed to the
/// store are not rolled back, so callers must treat cancelled operations as safely re-runnable.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed)
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
