use chrono::Duration;
use rusqlite::Connection;
use serde::Serialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus};
use crate::services::clock::Clock;

#[derive(Debug, Serialize, PartialEq)]
pub struct Stats {
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub confirmed_bookings: i64,
    pub cancelled_bookings: i64,
    pub completed_bookings: i64,
    /// Sum of total_amount over completed bookings only.
    pub total_revenue: f64,
}

/// Fold bookings over the trailing window `[today - period_days, today]`.
pub fn get_stats(
    conn: &Connection,
    clock: &dyn Clock,
    provider_id: &str,
    period_days: i64,
) -> Result<Stats, AppError> {
    if period_days <= 0 {
        return Err(AppError::InvalidPeriod);
    }

    let since = clock.today() - Duration::days(period_days);
    let bookings = queries::get_bookings_since(conn, provider_id, since)?;
    Ok(fold(&bookings))
}

pub fn fold(bookings: &[Booking]) -> Stats {
    let count = |status: BookingStatus| -> i64 {
        bookings.iter().filter(|b| b.status == status).count() as i64
    };

    Stats {
        total_bookings: bookings.len() as i64,
        pending_bookings: count(BookingStatus::Pending),
        confirmed_bookings: count(BookingStatus::Confirmed),
        cancelled_bookings: count(BookingStatus::Cancelled),
        completed_bookings: count(BookingStatus::Completed),
        total_revenue: bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Completed)
            .map(|b| b.total_amount)
            .sum(),
    }
}
