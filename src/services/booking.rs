use chrono::NaiveDate;
use rand::Rng;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus};
use crate::services::availability;
use crate::services::clock::Clock;
use crate::services::time_math;

/// 10% surcharge on the provider's price, rounded to cents.
const PLATFORM_FEE_RATE: f64 = 0.10;

#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub provider_id: String,
    pub service_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_notes: Option<String>,
}

/// Create a booking against current availability.
///
/// The slot re-check and the insert run inside one transaction while the
/// caller holds the connection lock, so two concurrent requests for the same
/// slot serialize and the loser gets `SlotUnavailable`.
pub fn create_booking(
    conn: &Connection,
    clock: &dyn Clock,
    req: BookingRequest,
) -> Result<Booking, AppError> {
    // Validate input shape before touching the store.
    let start = time_math::to_minutes(&req.start_time)?;

    let service = queries::get_service(conn, &req.service_id)?
        .filter(|s| s.active && s.provider_id == req.provider_id)
        .ok_or(AppError::ServiceNotFound)?;

    let end = start + service.duration_minutes;

    let tx = conn.unchecked_transaction().map_err(anyhow::Error::from)?;

    let committed = availability::committed_intervals(&tx, &req.provider_id, req.date)?;
    if committed.iter().any(|c| c.overlaps(start, end)) {
        return Err(AppError::SlotUnavailable);
    }

    let platform_fee = round2(service.price * PLATFORM_FEE_RATE);
    let now = clock.now();

    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        provider_id: req.provider_id,
        service_id: service.id.clone(),
        date: req.date,
        start_time: req.start_time,
        duration_minutes: service.duration_minutes,
        customer_name: req.customer_name,
        customer_email: req.customer_email,
        customer_phone: req.customer_phone,
        service_price: service.price,
        platform_fee,
        total_amount: round2(service.price + platform_fee),
        confirmation_number: confirmation_number(clock),
        status: BookingStatus::Pending,
        provider_notes: None,
        customer_notes: req.customer_notes,
        created_at: now,
        updated_at: now,
    };

    queries::insert_booking(&tx, &booking)?;
    tx.commit().map_err(anyhow::Error::from)?;

    tracing::info!(
        booking_id = %booking.id,
        provider_id = %booking.provider_id,
        confirmation = %booking.confirmation_number,
        "booking created"
    );

    Ok(booking)
}

/// Move a booking to a new status. Any of the five known statuses is a legal
/// target; there is no transition graph beyond that.
pub fn transition_status(
    conn: &Connection,
    clock: &dyn Clock,
    booking_id: &str,
    status: &str,
    provider_notes: Option<String>,
) -> Result<Booking, AppError> {
    let status =
        BookingStatus::parse(status).ok_or_else(|| AppError::InvalidStatus(status.to_string()))?;

    let updated =
        queries::update_booking_status(conn, booking_id, status, provider_notes, clock.now())?;
    if !updated {
        return Err(AppError::NotFound(format!("booking {booking_id}")));
    }

    queries::get_booking(conn, booking_id)?
        .ok_or_else(|| AppError::NotFound(format!("booking {booking_id}")))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// "BK" + YYYYMMDD + 4 random digits. Uniqueness is not enforced; a same-day
/// collision is accepted as rare.
fn confirmation_number(clock: &dyn Clock) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..10_000);
    format!("BK{}{suffix:04}", clock.today().format("%Y%m%d"))
}
