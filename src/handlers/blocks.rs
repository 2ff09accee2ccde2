use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::BlockSpec;
use crate::services::blocks;
use crate::state::AppState;

#[derive(Serialize)]
pub struct BlockCreatedResponse {
    pub created: usize,
}

// POST /api/providers/:id/blocks
pub async fn block_time(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
    Json(spec): Json<BlockSpec>,
) -> Result<Json<BlockCreatedResponse>, AppError> {
    let rows = blocks::expand(&provider_id, &spec)?;

    let created = {
        let db = state.db.lock().unwrap();
        queries::insert_blocks(&db, &rows)?
    };

    tracing::info!(
        provider_id = %provider_id,
        pattern = %spec.pattern.as_str(),
        created,
        "blocked intervals created"
    );

    Ok(Json(BlockCreatedResponse { created }))
}

// DELETE /api/providers/:id/blocks/:block_id
pub async fn unblock_time(
    State(state): State<Arc<AppState>>,
    Path((provider_id, block_id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = {
        let db = state.db.lock().unwrap();
        queries::delete_block(&db, &provider_id, &block_id)?
    };

    if !removed {
        return Err(AppError::NotFound(format!("blocked interval {block_id}")));
    }

    Ok(Json(serde_json::json!({ "ok": true })))
}
