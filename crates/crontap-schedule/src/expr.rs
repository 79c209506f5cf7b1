//! Cron expression wrapper.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use cron::Schedule;

use crate::error::ScheduleError;

/// A parsed cron expression.
///
/// Accepts the 6/7-field grammar of the underlying parser as well as the
/// traditional 5-field crontab form, which is normalized by prepending a
/// seconds field of `0`. Shorthands such as `@hourly` pass through as is.
/// Fire times are computed in local time.
#[derive(Debug, Clone)]
pub struct CronSchedule {
    schedule: Schedule,
    expr: String,
}

impl CronSchedule {
    /// Parse a cron expression.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidExpression` if the expression does
    /// not parse.
    pub fn parse(expr: &str) -> Result<Self, ScheduleError> {
        let raw = expr.trim();

        // The underlying grammar requires a seconds field; classic
        // 5-field crontab expressions get one prepended.
        let field_count = raw.split_whitespace().count();
        let normalized = if !raw.starts_with('@') && field_count == 5 {
            format!("0 {}", raw)
        } else {
            raw.to_string()
        };

        let schedule =
            Schedule::from_str(&normalized).map_err(|source| ScheduleError::InvalidExpression {
                expr: raw.to_string(),
                source,
            })?;

        Ok(Self {
            schedule,
            expr: raw.to_string(),
        })
    }

    /// The expression as the user wrote it.
    pub fn expr(&self) -> &str {
        &self.expr
    }

    /// Next fire time strictly after `after`.
    pub fn next_after(&self, after: DateTime<Local>) -> Option<DateTime<Local>> {
        self.schedule.after(&after).next()
    }

    /// Next fire time from now.
    pub fn next_fire_time(&self) -> Option<DateTime<Local>> {
        self.schedule.upcoming(Local).next()
    }
}

impl fmt::Display for CronSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

impl FromStr for CronSchedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_field_parses() {
        let schedule = CronSchedule::parse("0 */5 * * * *").unwrap();
        assert_eq!(schedule.expr(), "0 */5 * * * *");
    }

    #[test]
    fn five_field_normalizes_but_keeps_expr() {
        let schedule = CronSchedule::parse("*/5 * * * *").unwrap();
        assert_eq!(schedule.expr(), "*/5 * * * *");
        assert!(schedule.next_fire_time().is_some());
    }

    #[test]
    fn shorthand_parses() {
        let schedule = CronSchedule::parse("@hourly").unwrap();
        assert_eq!(schedule.expr(), "@hourly");
        assert!(schedule.next_fire_time().is_some());
    }

    #[test]
    fn seven_field_with_year_parses() {
        CronSchedule::parse("0 0 0 1 1 * 2099").unwrap();
    }

    #[test]
    fn garbage_rejected() {
        let err = CronSchedule::parse("not-a-cron-expr").unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidExpression { .. }));
    }

    #[test]
    fn empty_rejected() {
        assert!(CronSchedule::parse("").is_err());
        assert!(CronSchedule::parse("   ").is_err());
    }

    #[test]
    fn next_after_is_strictly_after() {
        let schedule = CronSchedule::parse("* * * * * *").unwrap();
        let now = Local::now();
        let next = schedule.next_after(now).unwrap();
        assert!(next > now);
    }

    #[test]
    fn parses_through_from_str() {
        let schedule: CronSchedule = "@daily".parse().unwrap();
        assert_eq!(schedule.to_string(), "@daily");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let schedule = CronSchedule::parse("  @daily  ").unwrap();
        assert_eq!(schedule.expr(), "@daily");
    }
}
