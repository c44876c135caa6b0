//! Breaks inside an open session: start, end, toggle and totals.

use crate::config::Settings;
use crate::core::audit;
use crate::core::session::{OpenBreak, SessionState};
use crate::errors::{AppError, AppResult};
use crate::models::break_record::BreakRecord;
use crate::models::session_kind::SessionKind;
use crate::models::work_mode::BreakStatus;
use crate::store::RecordStore;
use crate::utils::formatting::duration_hm;
use crate::utils::time::format_ts;
use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;

/// `late` when the break ends after the cutoff time of day.
pub fn break_status(end: NaiveDateTime, cutoff: NaiveTime) -> BreakStatus {
    if end.time() > cutoff {
        BreakStatus::Late
    } else {
        BreakStatus::OnTime
    }
}

/// Close whatever break is still open for `session_id`.
/// Returns how many rows were closed (0 or 1 while the invariant holds).
pub(crate) fn close_open_breaks(
    store: &dyn RecordStore,
    settings: &Settings,
    kind: SessionKind,
    session_id: i64,
    now: NaiveDateTime,
) -> AppResult<usize> {
    let status = break_status(now, settings.break_cutoff);
    settings.retry.run("close_open_breaks", || {
        store.close_open_breaks(kind, session_id, now, status)
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakSummary {
    pub count: usize,
    pub total_minutes: i64,
    pub in_progress_since: Option<NaiveDateTime>,
}

impl BreakSummary {
    /// Closed breaks add to the total; an open one is only reported as in progress.
    pub fn from_records(breaks: &[BreakRecord]) -> Self {
        Self {
            count: breaks.len(),
            total_minutes: breaks.iter().map(BreakRecord::closed_minutes).sum(),
            in_progress_since: breaks
                .iter()
                .rev()
                .find(|b| b.is_open())
                .map(|b| b.start_time),
        }
    }

    pub fn total_display(&self) -> String {
        duration_hm(self.total_minutes)
    }
}

pub struct BreakController<'a> {
    store: &'a dyn RecordStore,
    settings: &'a Settings,
    kind: SessionKind,
}

impl<'a> BreakController<'a> {
    pub fn new(store: &'a dyn RecordStore, settings: &'a Settings, kind: SessionKind) -> Self {
        Self {
            store,
            settings,
            kind,
        }
    }

    /// OFF_BREAK → ON_BREAK.
    pub fn start(&self, state: &SessionState, now: NaiveDateTime) -> AppResult<SessionState> {
        let open = state
            .session
            .as_ref()
            .ok_or(AppError::NoActiveSession(self.kind.label()))?;

        if let Some(b) = &state.open_break {
            return Err(AppError::AlreadyOnBreak(format_ts(&b.start_time)));
        }

        let record = self.settings.retry.run("insert_break", || {
            self.store.insert_break(self.kind, open.id, now)
        })?;

        tracing::info!(session_id = open.id, break_id = record.id, "break started");
        audit(
            self.store,
            "break_start",
            self.kind.label(),
            &format!("session {} break {} at {}", open.id, record.id, format_ts(&now)),
        );

        let mut next = state.clone();
        next.open_break = Some(OpenBreak {
            id: record.id,
            start_time: record.start_time,
        });
        Ok(next)
    }

    /// ON_BREAK → OFF_BREAK, status decided by the break cutoff.
    pub fn end(&self, state: &SessionState, now: NaiveDateTime) -> AppResult<SessionState> {
        let open = state
            .session
            .as_ref()
            .ok_or(AppError::NoActiveSession(self.kind.label()))?;
        let current = state.open_break.as_ref().ok_or(AppError::NoOpenBreak)?;

        if now < current.start_time {
            return Err(AppError::Validation(format!(
                "Break end {} is before its start {}",
                format_ts(&now),
                format_ts(&current.start_time)
            )));
        }

        let closed = close_open_breaks(self.store, self.settings, self.kind, open.id, now)?;
        if closed == 0 {
            tracing::warn!(session_id = open.id, "no open break left to close");
        } else {
            audit(
                self.store,
                "break_end",
                self.kind.label(),
                &format!(
                    "session {} break {} at {} ({})",
                    open.id,
                    current.id,
                    format_ts(&now),
                    break_status(now, self.settings.break_cutoff).to_db_str()
                ),
            );
        }

        let mut next = state.clone();
        next.open_break = None;
        Ok(next)
    }

    pub fn toggle(&self, state: &SessionState, now: NaiveDateTime) -> AppResult<SessionState> {
        if state.is_on_break() {
            self.end(state, now)
        } else {
            self.start(state, now)
        }
    }

    pub fn summary(&self, session_id: i64) -> AppResult<BreakSummary> {
        let rows = self
            .settings
            .retry
            .run("load_breaks", || self.store.select_breaks(self.kind, session_id))?;
        Ok(BreakSummary::from_records(&rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{seed_user, ts, SessionSeed};
    use crate::store::SqliteStore;

    fn open_state(store: &SqliteStore, kind: SessionKind) -> SessionState {
        let uid = seed_user(store);
        let rec = SessionSeed::new(uid, "2025-03-03 09:00").insert(store, kind);
        SessionState::checked_in(kind, &rec)
    }

    #[test]
    fn fifteen_minute_break_totals_0h_15m() {
        let store = SqliteStore::in_memory().unwrap();
        let settings = Settings::default();
        let kind = SessionKind::Attendance;
        let ctl = BreakController::new(&store, &settings, kind);

        let state = open_state(&store, kind);
        let state = ctl.toggle(&state, ts("2025-03-03 10:00")).unwrap();
        assert!(state.is_on_break());
        let state = ctl.toggle(&state, ts("2025-03-03 10:15")).unwrap();
        assert!(!state.is_on_break());

        let summary = ctl.summary(state.session.unwrap().id).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.total_display(), "0h 15m");
        assert_eq!(summary.in_progress_since, None);
    }

    #[test]
    fn open_break_is_in_progress_and_not_totalled() {
        let store = SqliteStore::in_memory().unwrap();
        let settings = Settings::default();
        let kind = SessionKind::Overtime;
        let ctl = BreakController::new(&store, &settings, kind);

        let state = open_state(&store, kind);
        let state = ctl.start(&state, ts("2025-03-03 10:00")).unwrap();
        let state = ctl.end(&state, ts("2025-03-03 10:20")).unwrap();
        let state = ctl.start(&state, ts("2025-03-03 12:00")).unwrap();

        let summary = ctl.summary(state.session.unwrap().id).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_minutes, 20);
        assert_eq!(summary.in_progress_since, Some(ts("2025-03-03 12:00")));
    }

    #[test]
    fn only_one_open_break_per_session() {
        let store = SqliteStore::in_memory().unwrap();
        let settings = Settings::default();
        let kind = SessionKind::Attendance;
        let ctl = BreakController::new(&store, &settings, kind);

        let state = ctl.start(&open_state(&store, kind), ts("2025-03-03 10:00")).unwrap();
        let err = ctl.start(&state, ts("2025-03-03 10:01")).unwrap_err();
        assert!(matches!(err, AppError::AlreadyOnBreak(_)));

        let open: Vec<_> = store
            .select_breaks(kind, state.session.unwrap().id)
            .unwrap()
            .into_iter()
            .filter(|b| b.is_open())
            .collect();
        assert_eq!(open.len(), 1);
    }

    #[test]
    fn ending_after_cutoff_marks_break_late() {
        let store = SqliteStore::in_memory().unwrap();
        let settings = Settings::default();
        let kind = SessionKind::Attendance;
        let ctl = BreakController::new(&store, &settings, kind);

        let state = ctl.start(&open_state(&store, kind), ts("2025-03-03 13:30")).unwrap();
        let sid = state.session.as_ref().unwrap().id;
        ctl.end(&state, ts("2025-03-03 14:11")).unwrap();

        let rows = store.select_breaks(kind, sid).unwrap();
        assert_eq!(rows[0].status, BreakStatus::Late);
    }

    #[test]
    fn break_requires_open_session() {
        let store = SqliteStore::in_memory().unwrap();
        let settings = Settings::default();
        let ctl = BreakController::new(&store, &settings, SessionKind::Attendance);

        let state = SessionState::checked_out(SessionKind::Attendance, 1);
        assert!(matches!(
            ctl.start(&state, ts("2025-03-03 10:00")),
            Err(AppError::NoActiveSession(_))
        ));
    }

    #[test]
    fn ending_without_open_break_is_refused() {
        let store = SqliteStore::in_memory().unwrap();
        let settings = Settings::default();
        let kind = SessionKind::Attendance;
        let ctl = BreakController::new(&store, &settings, kind);

        let err = ctl.end(&open_state(&store, kind), ts("2025-03-03 10:00")).unwrap_err();
        assert!(matches!(err, AppError::NoOpenBreak));
    }

    #[test]
    fn status_boundary_is_exclusive() {
        let cutoff = NaiveTime::from_hms_opt(14, 10, 0).unwrap();
        assert_eq!(break_status(ts("2025-03-03 14:10"), cutoff), BreakStatus::OnTime);
        assert_eq!(break_status(ts("2025-03-03 14:11"), cutoff), BreakStatus::Late);
    }
}
