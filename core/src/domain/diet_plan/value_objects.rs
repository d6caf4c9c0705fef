use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

pub const DEFAULT_HISTORY_LIMIT: u64 = 30;
pub const MAX_HISTORY_LIMIT: u64 = 365;
pub const MAX_CALENDAR_DAYS: i64 = 62;

#[derive(Debug, Clone, Default)]
pub struct GeneratePlanInput {
    pub date: Option<NaiveDate>,
    pub regenerate: bool,
}

#[derive(Debug, Clone)]
pub struct SubstitutionInput {
    pub unavailable_items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PlanCalendar {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub dates: Vec<NaiveDate>,
}

pub fn clamp_history_limit(limit: Option<u64>) -> u64 {
    limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT)
}

/// Checks an inclusive calendar range.
pub fn validate_calendar_range(start: NaiveDate, end: NaiveDate) -> Result<(), CoreError> {
    if end < start {
        return Err(CoreError::Invalid(
            "calendar end must not precede start".to_string(),
        ));
    }
    let days = (end - start).num_days() + 1;
    if days > MAX_CALENDAR_DAYS {
        return Err(CoreError::Invalid(format!(
            "calendar range spans {days} days; at most {MAX_CALENDAR_DAYS} allowed"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + chrono::Days::new(u64::from(d))
    }

    #[test]
    fn calendar_range_bounds() {
        assert!(validate_calendar_range(day(0), day(0)).is_ok());
        assert!(validate_calendar_range(day(0), day(61)).is_ok());
        assert!(validate_calendar_range(day(0), day(62)).is_err());
        assert!(validate_calendar_range(day(3), day(2)).is_err());
    }

    #[test]
    fn history_limit_is_clamped() {
        assert_eq!(clamp_history_limit(None), DEFAULT_HISTORY_LIMIT);
        assert_eq!(clamp_history_limit(Some(0)), 1);
        assert_eq!(clamp_history_limit(Some(10_000)), MAX_HISTORY_LIMIT);
    }
}
