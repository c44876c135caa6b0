//! Business logic: session state, check-in/out, breaks, aggregation,
//! the admin dashboard and the alert board.

pub mod alerts;
pub mod attendance;
pub mod breaks;
pub mod calculator;
pub mod dashboard;
pub mod geo;
pub mod log;
pub mod report;
pub mod retry;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

use crate::store::RecordStore;

/// Write an audit row. Failures never block the operation being audited.
pub(crate) fn audit(store: &dyn RecordStore, operation: &str, target: &str, message: &str) {
    if let Err(e) = store.audit(operation, target, message) {
        tracing::warn!(operation, target, "audit log write failed: {e}");
    }
}
