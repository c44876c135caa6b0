//! Period report: the sessions of a day/week/month with their breaks and
//! the aggregate statistics for the range.

use crate::config::Settings;
use crate::core::breaks::BreakSummary;
use crate::core::calculator::period::{Period, ViewType, period_range};
use crate::core::calculator::stats::{MonthlyStats, compute};
use crate::db::queries::SessionFilter;
use crate::errors::AppResult;
use crate::models::break_record::BreakRecord;
use crate::models::session::SessionRecord;
use crate::models::session_kind::SessionKind;
use crate::store::RecordStore;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub session: SessionRecord,
    pub breaks: Vec<BreakRecord>,
    pub break_summary: BreakSummary,
    /// Check-in to check-out (or to now while open).
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodReport {
    pub kind: &'static str,
    pub view: ViewType,
    pub period: Period,
    pub rows: Vec<ReportRow>,
    pub stats: MonthlyStats,
}

/// Session plus its breaks, joined per record.
pub(crate) fn load_row(
    store: &dyn RecordStore,
    settings: &Settings,
    kind: SessionKind,
    session: SessionRecord,
    now: NaiveDateTime,
) -> AppResult<ReportRow> {
    let breaks = settings
        .retry
        .run("load_breaks", || store.select_breaks(kind, session.id))?;
    Ok(ReportRow {
        break_summary: BreakSummary::from_records(&breaks),
        duration_minutes: session.elapsed_minutes(now),
        breaks,
        session,
    })
}

pub fn build_report(
    store: &dyn RecordStore,
    settings: &Settings,
    kind: SessionKind,
    user_id: i64,
    view: ViewType,
    anchor: NaiveDate,
    now: NaiveDateTime,
) -> AppResult<PeriodReport> {
    let period = period_range(view, anchor, settings.week_start);
    let filter = SessionFilter::for_user(user_id).between(period.start_ts(), period.end_ts());

    let sessions = settings
        .retry
        .run("load_sessions", || store.select_sessions(kind, &filter))?;

    tracing::debug!(
        user_id,
        kind = kind.label(),
        view = %view,
        rows = sessions.len(),
        "building period report"
    );

    let stats = compute(
        &sessions,
        period.start,
        period.end,
        now,
        settings.expected_daily_hours,
    );

    let mut rows = Vec::with_capacity(sessions.len());
    for s in sessions {
        rows.push(load_row(store, settings, kind, s, now)?);
    }

    Ok(PeriodReport {
        kind: kind.label(),
        view,
        period,
        rows,
        stats,
    })
}
