//! Check-in / check-out for attendance and overtime sessions.

use crate::config::Settings;
use crate::core::audit;
use crate::core::breaks::close_open_breaks;
use crate::core::geo::{LocationProvider, classify};
use crate::core::session::SessionState;
use crate::errors::{AppError, AppResult};
use crate::models::session::NewSession;
use crate::models::session_kind::SessionKind;
use crate::models::work_mode::AttendanceStatus;
use crate::store::RecordStore;
use crate::utils::time::format_ts;
use chrono::{NaiveDateTime, NaiveTime};

/// `late` when the check-in happens after the cutoff time of day.
pub fn attendance_status(at: NaiveDateTime, late_after: NaiveTime) -> AttendanceStatus {
    if at.time() > late_after {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}

pub struct AttendanceController<'a> {
    store: &'a dyn RecordStore,
    settings: &'a Settings,
    kind: SessionKind,
}

impl<'a> AttendanceController<'a> {
    pub fn new(store: &'a dyn RecordStore, settings: &'a Settings, kind: SessionKind) -> Self {
        Self {
            store,
            settings,
            kind,
        }
    }

    /// CHECKED_OUT → CHECKED_IN.
    ///
    /// The "one open session" rule is checked against `state`, which must come
    /// from a fresh reconciliation; the store itself does not enforce it.
    pub fn check_in(
        &self,
        state: &SessionState,
        locator: &dyn LocationProvider,
        now: NaiveDateTime,
    ) -> AppResult<SessionState> {
        if let Some(open) = &state.session {
            return Err(AppError::AlreadyCheckedIn(format_ts(&open.check_in)));
        }

        let pos = locator.current_position()?;
        let (work_mode, site) = classify(&self.settings.sites, pos);

        let new = NewSession {
            user_id: state.user_id,
            check_in: now,
            work_mode,
            status: attendance_status(now, self.settings.late_after),
            latitude: pos.latitude,
            longitude: pos.longitude,
            site: site.map(|s| s.name.clone()),
        };

        let record = self
            .settings
            .retry
            .run("insert_session", || self.store.insert_session(self.kind, &new))?;

        tracing::info!(
            user_id = state.user_id,
            session_id = record.id,
            kind = self.kind.label(),
            work_mode = work_mode.to_db_str(),
            "checked in"
        );
        audit(
            self.store,
            "check_in",
            self.kind.label(),
            &format!(
                "user {} session {} at {} ({})",
                state.user_id,
                record.id,
                format_ts(&now),
                work_mode.to_db_str()
            ),
        );

        Ok(SessionState::checked_in(self.kind, &record))
    }

    /// CHECKED_IN → CHECKED_OUT. Any open break is closed first.
    pub fn check_out(&self, state: &SessionState, now: NaiveDateTime) -> AppResult<SessionState> {
        let open = state
            .session
            .as_ref()
            .ok_or(AppError::NoActiveSession(self.kind.label()))?;

        if now <= open.check_in {
            return Err(AppError::Validation(format!(
                "Check-out time {} must be after check-in time {}",
                format_ts(&now),
                format_ts(&open.check_in)
            )));
        }

        // a break still open here is graded by the break cutoff like any
        // other break end, never forced to on_time
        close_open_breaks(self.store, self.settings, self.kind, open.id, now)?;

        let closed = self.settings.retry.run("close_session", || {
            self.store.close_session(self.kind, open.id, now)
        })?;

        if closed == 0 {
            tracing::warn!(
                session_id = open.id,
                kind = self.kind.label(),
                "session was already checked out"
            );
        } else {
            tracing::info!(session_id = open.id, kind = self.kind.label(), "checked out");
            audit(
                self.store,
                "check_out",
                self.kind.label(),
                &format!(
                    "user {} session {} at {}",
                    state.user_id,
                    open.id,
                    format_ts(&now)
                ),
            );
        }

        Ok(SessionState::checked_out(self.kind, state.user_id))
    }
}
