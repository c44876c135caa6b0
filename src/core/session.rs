//! Session state and its reconciliation against the Record Store.
//!
//! The state is a plain value: controllers take the current one by reference
//! and hand back the next one, callers render from whatever they get back.

use crate::core::retry::RetryPolicy;
use crate::db::queries::SessionFilter;
use crate::errors::{AppError, AppResult};
use crate::models::session::SessionRecord;
use crate::models::session_kind::SessionKind;
use crate::models::work_mode::WorkMode;
use crate::store::RecordStore;
use crate::utils::date::{end_of_day, start_of_day};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct OpenSession {
    pub id: i64,
    pub check_in: NaiveDateTime,
    pub work_mode: WorkMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OpenBreak {
    pub id: i64,
    pub start_time: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub kind: SessionKind,
    pub user_id: i64,
    pub session: Option<OpenSession>,
    pub open_break: Option<OpenBreak>,
}

impl SessionState {
    pub fn checked_out(kind: SessionKind, user_id: i64) -> Self {
        Self {
            kind,
            user_id,
            session: None,
            open_break: None,
        }
    }

    pub fn checked_in(kind: SessionKind, record: &SessionRecord) -> Self {
        Self {
            kind,
            user_id: record.user_id,
            session: Some(OpenSession {
                id: record.id,
                check_in: record.check_in,
                work_mode: record.work_mode,
            }),
            open_break: None,
        }
    }

    pub fn is_checked_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_on_break(&self) -> bool {
        self.open_break.is_some()
    }

    /// Elapsed minutes of the open session at `now` (0 when checked out).
    pub fn elapsed_minutes(&self, now: NaiveDateTime) -> i64 {
        self.session
            .as_ref()
            .map(|s| (now - s.check_in).num_minutes().max(0))
            .unwrap_or(0)
    }
}

/// Outcome of a reconciliation: the state to use plus the failure, if any,
/// that forced it back to "checked out".
#[derive(Debug)]
pub struct Reconciled {
    pub state: SessionState,
    pub error: Option<AppError>,
}

/// Most recent open session whose check-in falls on `now`'s calendar day.
pub fn find_open_session(
    store: &dyn RecordStore,
    retry: &RetryPolicy,
    kind: SessionKind,
    user_id: i64,
    now: NaiveDateTime,
) -> AppResult<Option<SessionRecord>> {
    let today = now.date();
    let filter = SessionFilter::for_user(user_id)
        .between(start_of_day(today), end_of_day(today))
        .open_only();

    match retry.run("find_open_session", || store.single_session(kind, &filter)) {
        Ok(record) => Ok(Some(record)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

fn restore(
    store: &dyn RecordStore,
    retry: &RetryPolicy,
    kind: SessionKind,
    user_id: i64,
    now: NaiveDateTime,
) -> AppResult<SessionState> {
    let Some(record) = find_open_session(store, retry, kind, user_id, now)? else {
        return Ok(SessionState::checked_out(kind, user_id));
    };

    let mut state = SessionState::checked_in(kind, &record);

    let breaks = retry.run("load_breaks", || store.select_breaks(kind, record.id))?;
    state.open_break = breaks
        .iter()
        .rev()
        .find(|b| b.is_open())
        .map(|b| OpenBreak {
            id: b.id,
            start_time: b.start_time,
        });

    Ok(state)
}

/// Rebuild the user's session state for `kind` from stored rows.
/// Never fails: lookup errors are reported next to a checked-out state.
pub fn reconcile(
    store: &dyn RecordStore,
    retry: &RetryPolicy,
    kind: SessionKind,
    user_id: i64,
    now: NaiveDateTime,
) -> Reconciled {
    match restore(store, retry, kind, user_id, now) {
        Ok(state) => Reconciled { state, error: None },
        Err(e) => {
            tracing::error!(user_id, kind = kind.label(), "session reconciliation failed: {e}");
            Reconciled {
                state: SessionState::checked_out(kind, user_id),
                error: Some(e),
            }
        }
    }
}
