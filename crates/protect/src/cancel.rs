use crate::error::{ProtectError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal shared between the caller and the
/// pipeline.
///
/// Cloning is cheap and every clone observes the same flag. The pipeline
/// checks the token at each iteration of its long-running loops (digest
/// encoding, hex decoding, the source copy) and aborts with
/// [`ProtectError::Cancelled`]. Cancellation does not roll back partial
/// output: a target file created before the signal fired is left on disk
/// and must be treated as invalid.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that never fires unless [`cancel`](Self::cancel) is
    /// called on it or one of its clones.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation on every clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Bail out with [`ProtectError::Cancelled`] if cancellation has been
    /// requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ProtectError::Cancelled)
        } else {
            Ok(())
        }
    }
}
