//! Typed runtime settings derived from the YAML `Config`.

use super::Config;
use crate::core::calculator::period::MonthStep;
use crate::core::geo::Site;
use crate::core::retry::RetryPolicy;
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_weekday;
use crate::utils::time::parse_time;
use chrono::{NaiveTime, Weekday};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Settings {
    pub sites: Vec<Site>,
    pub late_after: NaiveTime,
    pub break_cutoff: NaiveTime,
    pub expected_daily_hours: f64,
    pub week_start: Weekday,
    pub month_step: MonthStep,
    pub retry: RetryPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        // The default config always parses.
        Settings::from_config(&Config::with_database(String::new())).unwrap_or_else(|_| Settings {
            sites: Vec::new(),
            late_after: NaiveTime::MIN,
            break_cutoff: NaiveTime::MIN,
            expected_daily_hours: 8.0,
            week_start: Weekday::Sun,
            month_step: MonthStep::Calendar,
            retry: RetryPolicy::none(),
        })
    }
}

impl Settings {
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        let late_after = parse_time(&cfg.late_after).ok_or_else(|| {
            AppError::Config(format!("late_after must be HH:MM, got '{}'", cfg.late_after))
        })?;

        let break_cutoff = parse_time(&cfg.break_cutoff).ok_or_else(|| {
            AppError::Config(format!(
                "break_cutoff must be HH:MM, got '{}'",
                cfg.break_cutoff
            ))
        })?;

        let week_start = parse_weekday(&cfg.week_start).ok_or_else(|| {
            AppError::Config(format!(
                "week_start must be sunday, monday or saturday, got '{}'",
                cfg.week_start
            ))
        })?;

        let month_step = MonthStep::from_config_str(&cfg.monthly_navigation).ok_or_else(|| {
            AppError::Config(format!(
                "monthly_navigation must be 'calendar' or 'fixed30', got '{}'",
                cfg.monthly_navigation
            ))
        })?;

        if !(cfg.expected_daily_hours > 0.0 && cfg.expected_daily_hours <= 24.0) {
            return Err(AppError::Config(format!(
                "expected_daily_hours must be in (0, 24], got {}",
                cfg.expected_daily_hours
            )));
        }

        let mut sites = Vec::with_capacity(cfg.sites.len());
        for s in &cfg.sites {
            if s.radius_km <= 0.0 {
                return Err(AppError::Config(format!(
                    "site '{}' must have a positive radius_km",
                    s.name
                )));
            }
            sites.push(Site {
                name: s.name.clone(),
                latitude: s.latitude,
                longitude: s.longitude,
                radius_km: s.radius_km,
            });
        }

        if cfg.retry.max_attempts == 0 {
            return Err(AppError::Config("retry.max_attempts must be at least 1".into()));
        }

        let retry = RetryPolicy {
            max_attempts: cfg.retry.max_attempts,
            initial_delay: Duration::from_millis(cfg.retry.initial_delay_ms),
            max_delay: Duration::from_millis(cfg.retry.max_delay_ms),
        };

        Ok(Settings {
            sites,
            late_after,
            break_cutoff,
            expected_daily_hours: cfg.expected_daily_hours,
            week_start,
            month_step,
            retry,
        })
    }
}
