use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::services::{availability, blocks};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub service_id: String,
    pub date: String,
}

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: NaiveDate,
    pub service_id: String,
    pub slots: Vec<String>,
}

// GET /api/providers/:id/availability?service_id=...&date=YYYY-MM-DD
pub async fn get_available_slots(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d")
        .map_err(|_| AppError::InvalidRange(format!("invalid date: {}", query.date)))?;

    let db = state.db.lock().unwrap();

    let service = queries::get_service(&db, &query.service_id)?
        .filter(|s| s.active && s.provider_id == provider_id)
        .ok_or(AppError::ServiceNotFound)?;

    let slots = match queries::get_business_hours_for_day(
        &db,
        &provider_id,
        blocks::weekday_number(date),
    )? {
        Some(hours) => {
            let committed = availability::committed_intervals(&db, &provider_id, date)?;
            availability::compute_slots(&hours, service.duration_minutes, &committed)?
        }
        // No template row for this weekday means the provider is closed.
        None => vec![],
    };

    Ok(Json(SlotsResponse {
        date,
        service_id: service.id,
        slots,
    }))
}
