use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{BlockKind, BlockSpec, BlockedInterval, RecurrencePattern};
use crate::services::time_math;

/// Expand a block specification into concrete per-date rows. Pure and
/// deterministic apart from the generated row ids: the same spec always
/// covers the same set of dates. Re-submitting a spec creates new rows; the
/// store does not deduplicate against prior expansions.
pub fn expand(provider_id: &str, spec: &BlockSpec) -> Result<Vec<BlockedInterval>, AppError> {
    let start_minutes = time_math::to_minutes(&spec.start_time)?;
    let end_minutes = time_math::to_minutes(&spec.end_time)?;
    if start_minutes >= end_minutes {
        return Err(AppError::InvalidRange(format!(
            "start time {} must be before end time {}",
            spec.start_time, spec.end_time
        )));
    }

    let kind = spec.kind.unwrap_or(BlockKind::Blocked);

    let dates = match spec.pattern {
        RecurrencePattern::Single => vec![spec.start_date],
        pattern => {
            let end_date = spec.end_date.ok_or_else(|| {
                AppError::InvalidRange("end_date is required for recurring blocks".to_string())
            })?;
            if spec.start_date > end_date {
                return Err(AppError::InvalidRange(format!(
                    "start date {} is after end date {}",
                    spec.start_date, end_date
                )));
            }
            expand_dates(pattern, spec.start_date, end_date, spec.days.as_deref())
        }
    };

    let recurrence_tag = match spec.pattern {
        RecurrencePattern::Single => None,
        p => Some(p.as_str().to_string()),
    };

    Ok(dates
        .into_iter()
        .map(|date| BlockedInterval {
            id: Uuid::new_v4().to_string(),
            provider_id: provider_id.to_string(),
            date,
            start_time: spec.start_time.clone(),
            end_time: spec.end_time.clone(),
            kind,
            title: spec.title.clone(),
            recurrence_pattern: recurrence_tag.clone(),
        })
        .collect())
}

fn expand_dates(
    pattern: RecurrencePattern,
    start: NaiveDate,
    end: NaiveDate,
    custom_days: Option<&[u8]>,
) -> Vec<NaiveDate> {
    let anchor_weekday = weekday_number(start);

    start
        .iter_days()
        .take_while(|d| *d <= end)
        .filter(|date| {
            let wd = weekday_number(*date);
            match pattern {
                RecurrencePattern::Daily => true,
                RecurrencePattern::Weekly => wd == anchor_weekday,
                RecurrencePattern::Weekdays => (1..=5).contains(&wd),
                RecurrencePattern::Weekends => wd == 0 || wd == 6,
                RecurrencePattern::Custom => {
                    custom_days.map(|days| days.contains(&wd)).unwrap_or(false)
                }
                RecurrencePattern::Single => unreachable!("single bypasses range expansion"),
            }
        })
        .collect()
}

/// 0=Sunday .. 6=Saturday, matching the business-hours convention.
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}
