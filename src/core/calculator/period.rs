use crate::errors::AppError;
use crate::utils::date::{end_of_day, end_of_month, end_of_week, start_of_day, start_of_month, start_of_week};
use chrono::{Duration, Months, NaiveDate, NaiveDateTime, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    Daily,
    Weekly,
    Monthly,
}

impl FromStr for ViewType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Ok(ViewType::Daily),
            "weekly" | "week" | "w" => Ok(ViewType::Weekly),
            "monthly" | "month" | "m" => Ok(ViewType::Monthly),
            other => Err(AppError::InvalidView(other.to_string())),
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViewType::Daily => "daily",
            ViewType::Weekly => "weekly",
            ViewType::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

/// How the monthly view moves between periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    /// Previous/next calendar month.
    Calendar,
    /// A flat 30 days.
    Fixed30,
}

impl MonthStep {
    pub fn from_config_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "calendar" => Some(MonthStep::Calendar),
            "fixed30" => Some(MonthStep::Fixed30),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn start_ts(&self) -> NaiveDateTime {
        start_of_day(self.start)
    }

    pub fn end_ts(&self) -> NaiveDateTime {
        end_of_day(self.end)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start.format("%Y-%m-%d"))
        } else {
            write!(
                f,
                "{} → {}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }
}

pub fn period_range(view: ViewType, anchor: NaiveDate, week_start: Weekday) -> Period {
    match view {
        ViewType::Daily => Period {
            start: anchor,
            end: anchor,
        },
        ViewType::Weekly => Period {
            start: start_of_week(anchor, week_start),
            end: end_of_week(anchor, week_start),
        },
        ViewType::Monthly => Period {
            start: start_of_month(anchor),
            end: end_of_month(anchor),
        },
    }
}

/// Move the anchor one period back or forth.
pub fn navigate(view: ViewType, anchor: NaiveDate, dir: Direction, step: MonthStep) -> NaiveDate {
    let sign = match dir {
        Direction::Prev => -1,
        Direction::Next => 1,
    };

    match (view, step) {
        (ViewType::Daily, _) => anchor + Duration::days(sign),
        (ViewType::Weekly, _) => anchor + Duration::days(7 * sign),
        (ViewType::Monthly, MonthStep::Fixed30) => anchor + Duration::days(30 * sign),
        (ViewType::Monthly, MonthStep::Calendar) => {
            let moved = match dir {
                Direction::Prev => anchor.checked_sub_months(Months::new(1)),
                Direction::Next => anchor.checked_add_months(Months::new(1)),
            };
            moved.unwrap_or(anchor)
        }
    }
}
