use std::collections::HashSet;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::BusinessHoursEntry;
use crate::services::time_math;
use crate::state::AppState;

// GET /api/providers/:id/business-hours
pub async fn get_business_hours(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
) -> Result<Json<Vec<BusinessHoursEntry>>, AppError> {
    let db = state.db.lock().unwrap();
    let hours = queries::get_business_hours(&db, &provider_id)?;
    Ok(Json(hours))
}

#[derive(Deserialize)]
pub struct HoursEntryBody {
    pub day_of_week: u8,
    pub is_open: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

// PUT /api/providers/:id/business-hours
//
// The weekly template is replaced wholesale; partial patches are not
// supported.
pub async fn replace_business_hours(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
    Json(body): Json<Vec<HoursEntryBody>>,
) -> Result<Json<Vec<BusinessHoursEntry>>, AppError> {
    let mut seen_days = HashSet::new();
    let mut entries = Vec::with_capacity(body.len());

    for entry in body {
        if entry.day_of_week > 6 {
            return Err(AppError::InvalidRange(format!(
                "day_of_week {} out of range 0-6",
                entry.day_of_week
            )));
        }
        if !seen_days.insert(entry.day_of_week) {
            return Err(AppError::InvalidRange(format!(
                "duplicate day_of_week {}",
                entry.day_of_week
            )));
        }

        if entry.is_open {
            let (open, close) = match (&entry.open_time, &entry.close_time) {
                (Some(o), Some(c)) => (o, c),
                _ => {
                    return Err(AppError::InvalidRange(
                        "open days require open_time and close_time".to_string(),
                    ))
                }
            };
            if time_math::to_minutes(open)? >= time_math::to_minutes(close)? {
                return Err(AppError::InvalidRange(format!(
                    "open time {open} must be before close time {close}"
                )));
            }
        }

        entries.push(BusinessHoursEntry {
            provider_id: provider_id.clone(),
            day_of_week: entry.day_of_week,
            is_open: entry.is_open,
            open_time: entry.open_time,
            close_time: entry.close_time,
        });
    }

    let db = state.db.lock().unwrap();
    queries::replace_business_hours(&db, &provider_id, &entries)?;
    let hours = queries::get_business_hours(&db, &provider_id)?;

    Ok(Json(hours))
}
