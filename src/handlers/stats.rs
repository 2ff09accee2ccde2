use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::stats::{self, Stats};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StatsQuery {
    pub period: Option<String>,
}

// GET /api/providers/:id/stats?period=30
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<Stats>, AppError> {
    let period_days: i64 = query
        .period
        .as_deref()
        .unwrap_or("30")
        .parse()
        .map_err(|_| AppError::InvalidPeriod)?;

    let db = state.db.lock().unwrap();
    let stats = stats::get_stats(&db, state.clock.as_ref(), &provider_id, period_days)?;
    Ok(Json(stats))
}
