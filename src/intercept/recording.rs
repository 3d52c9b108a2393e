//! In-memory interceptor that only counts calls.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::intercept::Interceptor;

/// Records enable/disable calls instead of touching the host.
///
/// Used by tests and for dry runs (`--dry-run`).
#[derive(Debug, Default)]
pub struct RecordingInterceptor {
    enables: AtomicUsize,
    disables: AtomicUsize,
}

impl RecordingInterceptor {
    pub fn enables(&self) -> usize {
        self.enables.load(Ordering::SeqCst)
    }

    pub fn disables(&self) -> usize {
        self.disables.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.enables() + self.disables()
    }
}

impl Interceptor for RecordingInterceptor {
    fn enable(&self) {
        self.enables.fetch_add(1, Ordering::SeqCst);
        tracing::info!("Dry run: would enable interception rules");
    }

    fn disable(&self) {
        self.disables.fetch_add(1, Ordering::SeqCst);
        tracing::info!("Dry run: would disable interception rules");
    }
}
