//! Admin dashboard: employee list and one employee's today + month view.

use crate::config::Settings;
use crate::core::calculator::period::{Period, ViewType, period_range};
use crate::core::calculator::stats::{MonthlyStats, compute};
use crate::core::report::{ReportRow, load_row};
use crate::db::queries::SessionFilter;
use crate::errors::AppResult;
use crate::models::session_kind::SessionKind;
use crate::models::user::User;
use crate::store::RecordStore;
use crate::utils::date::{end_of_day, start_of_day};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeDashboard {
    pub user: User,
    /// Most recent session checked in today, open or closed.
    pub today: Option<ReportRow>,
    pub month: Period,
    pub stats: MonthlyStats,
}

pub fn list_employees(store: &dyn RecordStore, settings: &Settings) -> AppResult<Vec<User>> {
    settings.retry.run("list_users", || store.list_users())
}

pub fn employee_dashboard(
    store: &dyn RecordStore,
    settings: &Settings,
    kind: SessionKind,
    user_id: i64,
    now: NaiveDateTime,
) -> AppResult<EmployeeDashboard> {
    let user = settings.retry.run("get_user", || store.get_user(user_id))?;

    let today = now.date();
    let today_filter = SessionFilter::for_user(user_id).between(start_of_day(today), end_of_day(today));
    let latest = match settings
        .retry
        .run("today_session", || store.single_session(kind, &today_filter))
    {
        Ok(s) => Some(load_row(store, settings, kind, s, now)?),
        Err(e) if e.is_not_found() => None,
        Err(e) => return Err(e),
    };

    let month = period_range(ViewType::Monthly, today, settings.week_start);
    let month_filter = SessionFilter::for_user(user_id).between(month.start_ts(), month.end_ts());
    let sessions = settings
        .retry
        .run("month_sessions", || store.select_sessions(kind, &month_filter))?;
    let stats = compute(
        &sessions,
        month.start,
        month.end,
        now,
        settings.expected_daily_hours,
    );

    Ok(EmployeeDashboard {
        user,
        today: latest,
        month,
        stats,
    })
}
