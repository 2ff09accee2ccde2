use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::Connection;
use serde::Serialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{BlockedInterval, BusinessHoursEntry};
use crate::services::time_math;

/// Read-model of a provider's month: weekly template, bookings, and blocked
/// intervals, all with canonical "HH:MM" times. Never mutates anything.
#[derive(Debug, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub business_hours: Vec<BusinessHoursEntry>,
    pub bookings: Vec<CalendarBooking>,
    pub blocked_intervals: Vec<BlockedInterval>,
}

#[derive(Debug, Serialize)]
pub struct CalendarBooking {
    pub id: String,
    pub service_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    /// Synthesized from the stored duration; bookings never store an end.
    pub end_time: String,
    pub status: String,
    pub customer_name: String,
    pub created_at: NaiveDateTime,
}

/// First and last calendar day of the month, inclusive. The last day falls
/// out of "day 0 of the following month", so 28/29/30/31-day months and leap
/// years come out right.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), AppError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidRange(format!("invalid month {year}-{month}")))?;

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| AppError::InvalidRange(format!("invalid month {year}-{month}")))?
        .pred_opt()
        .ok_or_else(|| AppError::InvalidRange(format!("invalid month {year}-{month}")))?;

    Ok((first, last))
}

pub fn get_month(
    conn: &Connection,
    provider_id: &str,
    year: i32,
    month: u32,
) -> Result<MonthView, AppError> {
    let (first, last) = month_bounds(year, month)?;

    let business_hours = queries::get_business_hours(conn, provider_id)?;
    let blocked_intervals = queries::get_blocks_in_range(conn, provider_id, first, last)?;

    let mut bookings = Vec::new();
    for b in queries::get_bookings_in_range(conn, provider_id, first, last)? {
        let end_time = time_math::add_minutes(&b.start_time, b.duration_minutes)?;
        bookings.push(CalendarBooking {
            id: b.id,
            service_id: b.service_id,
            date: b.date,
            start_time: b.start_time,
            end_time,
            status: b.status.as_str().to_string(),
            customer_name: b.customer_name,
            created_at: b.created_at,
        });
    }

    Ok(MonthView {
        year,
        month,
        business_hours,
        bookings,
        blocked_intervals,
    })
}
