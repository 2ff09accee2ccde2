use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::calendar::{self, MonthView};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

// GET /api/providers/:id/calendar?year=YYYY&month=M
pub async fn get_month_calendar(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MonthView>, AppError> {
    let db = state.db.lock().unwrap();
    let view = calendar::get_month(&db, &provider_id, query.year, query.month)?;
    Ok(Json(view))
}
