//! Control plane health state.
//!
//! # States
//! - Ready: control plane reachable, interception rules installed
//! - NotReady: control plane unreachable, interception rules removed
//!
//! # State Transitions
//! ```text
//! Ready → NotReady: 5 consecutive failed probes, or force_failed()
//! NotReady → Ready: 5 consecutive successful probes
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::intercept::Interceptor;
use crate::observability::metrics;

/// Whether interception rules should be in place.
///
/// `Ready` means the control plane answered and traffic is redirected through
/// the proxy; `NotReady` means it did not and the rules have been removed.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    NotReady = 0,
    Ready = 1,
}

impl From<u8> for HealthState {
    fn from(val: u8) -> Self {
        match val {
            1 => HealthState::Ready,
            _ => HealthState::NotReady,
        }
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthState::Ready => write!(f, "ready"),
            HealthState::NotReady => write!(f, "not_ready"),
        }
    }
}

/// Shared handle to the agent's health state.
///
/// Cloning is cheap; every clone observes the same state. The monitor loop owns
/// one, the admin surface and the hosting process may hold others.
#[derive(Clone)]
pub struct HealthHandle {
    state: Arc<AtomicU8>,
    interceptor: Arc<dyn Interceptor>,
}

impl HealthHandle {
    /// Create a handle in the `Ready` state.
    pub fn new(interceptor: Arc<dyn Interceptor>) -> Self {
        metrics::record_health_state(HealthState::Ready);
        Self {
            state: Arc::new(AtomicU8::new(HealthState::Ready as u8)),
            interceptor,
        }
    }

    /// Current state.
    pub fn state(&self) -> HealthState {
        HealthState::from(self.state.load(Ordering::Acquire))
    }

    /// Return true if the control plane is considered reachable.
    pub fn is_ready(&self) -> bool {
        self.state() == HealthState::Ready
    }

    /// Force a degrade: remove interception rules and mark `NotReady`,
    /// whatever the current state or any burst in progress.
    ///
    /// The state changes before `disable()` launches, so a degrade confirmed by
    /// a racing burst cannot fire a second disable.
    pub fn force_failed(&self) {
        let previous = HealthState::from(
            self.state
                .swap(HealthState::NotReady as u8, Ordering::AcqRel),
        );
        tracing::warn!(%previous, "Forced control plane failure, removing interception rules");
        self.interceptor.disable();
        metrics::record_health_state(HealthState::NotReady);
    }

    /// Commit a confirmed flip from `from` to `to`.
    ///
    /// Returns false, and fires no action, if the state no longer equals `from`.
    pub(crate) fn transition(&self, from: HealthState, to: HealthState) -> bool {
        if self
            .state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        match to {
            HealthState::Ready => self.interceptor.enable(),
            HealthState::NotReady => self.interceptor.disable(),
        }
        metrics::record_health_state(to);
        metrics::record_transition(to);
        true
    }
}

impl fmt::Debug for HealthHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthHandle")
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intercept::RecordingInterceptor;
    use std::sync::Mutex;

    #[test]
    fn test_initial_state_is_ready() {
        let handle = HealthHandle::new(Arc::new(RecordingInterceptor::default()));
        assert_eq!(handle.state(), HealthState::Ready);
        assert!(handle.is_ready());
    }

    #[test]
    fn test_force_failed_from_any_state() {
        let recorder = Arc::new(RecordingInterceptor::default());
        let handle = HealthHandle::new(recorder.clone());

        handle.force_failed();
        assert_eq!(handle.state(), HealthState::NotReady);
        assert_eq!(recorder.disables(), 1);

        handle.force_failed();
        assert_eq!(handle.state(), HealthState::NotReady);
        assert_eq!(recorder.disables(), 2);
        assert_eq!(recorder.enables(), 0);
    }

    #[test]
    fn test_transition_requires_expected_state() {
        let recorder = Arc::new(RecordingInterceptor::default());
        let handle = HealthHandle::new(recorder.clone());

        assert!(!handle.transition(HealthState::NotReady, HealthState::Ready));
        assert_eq!(recorder.enables(), 0);

        assert!(handle.transition(HealthState::Ready, HealthState::NotReady));
        assert_eq!(recorder.disables(), 1);
        assert!(handle.transition(HealthState::NotReady, HealthState::Ready));
        assert_eq!(recorder.enables(), 1);
        assert!(handle.is_ready());
    }

    /// Captures the shared state as seen from inside `disable()`.
    #[derive(Default)]
    struct StateAtDisable {
        state: Mutex<Option<Arc<AtomicU8>>>,
        seen: Mutex<Vec<HealthState>>,
    }

    impl Interceptor for StateAtDisable {
        fn enable(&self) {}

        fn disable(&self) {
            if let Some(state) = self.state.lock().unwrap().as_ref() {
                let current = HealthState::from(state.load(Ordering::Acquire));
                self.seen.lock().unwrap().push(current);
            }
        }
    }

    #[test]
    fn test_force_failed_marks_not_ready_before_disable() {
        let observer = Arc::new(StateAtDisable::default());
        let handle = HealthHandle::new(observer.clone());
        *observer.state.lock().unwrap() = Some(handle.state.clone());

        handle.force_failed();
        assert_eq!(*observer.seen.lock().unwrap(), vec![HealthState::NotReady]);

        // A burst that started Ready must not fire a second disable
        assert!(!handle.transition(HealthState::Ready, HealthState::NotReady));
        assert_eq!(observer.seen.lock().unwrap().len(), 1);
        assert_eq!(handle.state(), HealthState::NotReady);
    }

    #[test]
    fn test_clones_share_state() {
        let handle = HealthHandle::new(Arc::new(RecordingInterceptor::default()));
        let other = handle.clone();
        other.force_failed();
        assert!(!handle.is_ready());
    }
}
