use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::Booking;
use crate::services::booking::{self, BookingRequest};
use crate::services::time_math;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateBookingBody {
    pub provider_id: String,
    pub service_id: String,
    pub date: String,
    pub start_time: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_notes: Option<String>,
}

#[derive(Serialize)]
pub struct BookingResponse {
    #[serde(flatten)]
    pub booking: Booking,
    pub end_time: String,
}

impl BookingResponse {
    fn new(booking: Booking) -> Result<Self, AppError> {
        let end_time = time_math::add_minutes(&booking.start_time, booking.duration_minutes)?;
        Ok(Self { booking, end_time })
    }
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBookingBody>,
) -> Result<Json<BookingResponse>, AppError> {
    let date = NaiveDate::parse_from_str(&body.date, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidRange(format!("invalid date: {}", body.date)))?;

    let request = BookingRequest {
        provider_id: body.provider_id,
        service_id: body.service_id,
        date,
        start_time: body.start_time,
        customer_name: body.customer_name,
        customer_email: body.customer_email,
        customer_phone: body.customer_phone,
        customer_notes: body.customer_notes,
    };

    // The lock is held across the availability re-check and the insert, so a
    // concurrent request for the same slot fails with SlotUnavailable.
    let db = state.db.lock().unwrap();
    let booking = booking::create_booking(&db, state.clock.as_ref(), request)?;

    Ok(Json(BookingResponse::new(booking)?))
}

#[derive(Deserialize)]
pub struct UpdateStatusBody {
    pub status: String,
    pub provider_notes: Option<String>,
}

// PUT /api/bookings/:id/status
pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<BookingResponse>, AppError> {
    let db = state.db.lock().unwrap();
    let booking = booking::transition_status(
        &db,
        state.clock.as_ref(),
        &id,
        &body.status,
        body.provider_notes,
    )?;

    tracing::info!(booking_id = %id, status = %booking.status.as_str(), "booking status updated");

    Ok(Json(BookingResponse::new(booking)?))
}
