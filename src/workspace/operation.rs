//! Shared request lifecycle state.
//!
//! [`SharedOperation`] holds the one busy flag and error slot a workspace
//! exposes. Every remote dispatch runs under a [`DispatchPermit`] acquired
//! from it: acquiring clears the previous error and marks the workspace
//! busy, settling (or dropping) the permit releases it. At most one permit
//! exists at a time, so at most one request is ever in flight.

use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Why a coordinator refused or failed an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Input rejected locally; nothing was sent and no state changed
    #[error("{0}")]
    Invalid(&'static str),
    /// Another request is already in flight
    #[error("A request is already in progress")]
    Busy,
    /// Request was dispatched and failed; carries the user-facing message
    /// that was also written to the shared error slot
    #[error("{0}")]
    Failed(String),
}

/// Busy flag and error slot shared by all coordinators of a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationState {
    pub busy: bool,
    pub error: Option<String>,
}

/// Thread-safe handle to a workspace's [`OperationState`].
///
/// Cheap to clone. Lock sections are short; the lock is never held across
/// an `.await`.
#[derive(Debug, Clone, Default)]
pub struct SharedOperation {
    state: Arc<Mutex<OperationState>>,
}

impl SharedOperation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> OperationState {
        self.state.lock().unwrap().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.state.lock().unwrap().busy
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }

    pub fn clear_error(&self) {
        self.state.lock().unwrap().error = None;
    }

    /// Writes the error slot outside a dispatch, for failures that never
    /// reach the service (device errors during capture).
    pub fn set_error(&self, message: impl Into<String>) {
        self.state.lock().unwrap().error = Some(message.into());
    }

    /// Acquires the dispatch lock for one request.
    ///
    /// Clears any previous error and marks the workspace busy. Refused with
    /// [`DispatchError::Busy`] while another permit is outstanding.
    pub fn begin(&self) -> Result<DispatchPermit, DispatchError> {
        let mut state = self.state.lock().unwrap();
        if state.busy {
            return Err(DispatchError::Busy);
        }
        state.busy = true;
        state.error = None;
        Ok(DispatchPermit {
            operation: self.clone(),
            settled: false,
        })
    }
}

/// Exclusive right to have one request in flight.
///
/// Settling through [`succeed`](Self::succeed) or [`fail`](Self::fail)
/// releases the busy flag; an unsettled permit releases it on drop, so an
/// early return or panic between dispatch and settlement cannot leave the
/// workspace stuck busy.
#[must_use]
pub struct DispatchPermit {
    operation: SharedOperation,
    settled: bool,
}

impl DispatchPermit {
    /// Settles the request as successful.
    pub fn succeed(mut self) {
        self.release(None);
    }

    /// Settles the request as failed, recording the user-facing message.
    pub fn fail(mut self, message: impl Into<String>) {
        self.release(Some(message.into()));
    }

    fn release(&mut self, error: Option<String>) {
        if self.settled {
            return;
        }
        self.settled = true;
        let mut state = self.operation.state.lock().unwrap();
        state.busy = false;
        state.error = error;
    }
}

impl Drop for DispatchPermit {
    fn drop(&mut self) {
        self.release(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_marks_busy_and_clears_error() {
        let operation = SharedOperation::new();
        operation.set_error("previous failure");

        let permit = operation.begin().unwrap();
        assert!(operation.is_busy());
        assert_eq!(operation.error(), None);
        permit.succeed();
    }

    #[test]
    fn test_begin_rejected_while_permit_outstanding() {
        let operation = SharedOperation::new();
        let permit = operation.begin().unwrap();

        assert_eq!(operation.begin().unwrap_err(), DispatchError::Busy);

        permit.succeed();
        assert!(operation.begin().is_ok());
    }

    #[test]
    fn test_succeed_releases_without_error() {
        let operation = SharedOperation::new();
        operation.begin().unwrap().succeed();

        let state = operation.snapshot();
        assert!(!state.busy);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_fail_releases_and_records_message() {
        let operation = SharedOperation::new();
        operation
            .begin()
            .unwrap()
            .fail("Translation failed. Please try again.");

        let state = operation.snapshot();
        assert!(!state.busy);
        assert_eq!(
            state.error.as_deref(),
            Some("Translation failed. Please try again.")
        );
    }

    #[test]
    fn test_dropped_permit_releases_busy() {
        let operation = SharedOperation::new();
        {
            let _permit = operation.begin().unwrap();
            assert!(operation.is_busy());
        }
        assert!(!operation.is_busy());
        assert_eq!(operation.error(), None);
    }

    #[test]
    fn test_clear_error() {
        let operation = SharedOperation::new();
        operation.begin().unwrap().fail("failed");
        assert!(operation.error().is_some());

        operation.clear_error();
        assert_eq!(operation.error(), None);
    }
}
