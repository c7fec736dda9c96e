use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::AppError;

/// Issues monotonically increasing load tokens. The most recently issued
/// token is the only one whose results may be published.
#[derive(Debug, Clone, Default)]
pub struct LoadGeneration {
    latest: Arc<AtomicU64>,
}

/// Identifies one load; compare against the shared counter with
/// [`LoadToken::is_current`].
#[derive(Debug, Clone)]
pub struct LoadToken {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl LoadGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new load, superseding every earlier token.
    pub fn begin(&self) -> LoadToken {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        LoadToken {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

impl LoadToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    /// `Err(Superseded)` once a newer load has started.
    pub fn ensure_current(&self) -> Result<(), AppError> {
        let latest = self.latest.load(Ordering::SeqCst);
        if latest == self.generation {
            Ok(())
        } else {
            Err(AppError::Superseded {
                generation: self.generation,
                latest,
            })
        }
    }
}
