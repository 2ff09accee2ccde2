use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Service;
use crate::state::AppState;

// GET /api/providers/:id/services
pub async fn list_services(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
) -> Result<Json<Vec<Service>>, AppError> {
    let db = state.db.lock().unwrap();
    let services = queries::list_services(&db, &provider_id)?;
    Ok(Json(services))
}

#[derive(Deserialize)]
pub struct CreateServiceBody {
    pub name: String,
    pub category: Option<String>,
    pub duration_minutes: i32,
    pub price: f64,
}

// POST /api/providers/:id/services
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Path(provider_id): Path<String>,
    Json(body): Json<CreateServiceBody>,
) -> Result<Json<Service>, AppError> {
    if body.duration_minutes <= 0 {
        return Err(AppError::InvalidDuration);
    }
    if body.price < 0.0 {
        return Err(AppError::InvalidRange("price must be non-negative".to_string()));
    }

    let service = Service {
        id: Uuid::new_v4().to_string(),
        provider_id,
        name: body.name,
        category: body.category,
        duration_minutes: body.duration_minutes,
        price: body.price,
        active: true,
        created_at: state.clock.now(),
    };

    let db = state.db.lock().unwrap();
    queries::insert_service(&db, &service)?;

    Ok(Json(service))
}

#[derive(Deserialize)]
pub struct UpdateServiceBody {
    pub name: Option<String>,
    pub category: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price: Option<f64>,
    pub active: Option<bool>,
}

// PUT /api/providers/:id/services/:service_id
pub async fn update_service(
    State(state): State<Arc<AppState>>,
    Path((provider_id, service_id)): Path<(String, String)>,
    Json(body): Json<UpdateServiceBody>,
) -> Result<Json<Service>, AppError> {
    let db = state.db.lock().unwrap();

    let mut service = queries::get_service(&db, &service_id)?
        .filter(|s| s.provider_id == provider_id)
        .ok_or_else(|| AppError::NotFound(format!("service {service_id}")))?;

    if let Some(name) = body.name {
        service.name = name;
    }
    if let Some(category) = body.category {
        service.category = Some(category);
    }
    if let Some(duration) = body.duration_minutes {
        if duration <= 0 {
            return Err(AppError::InvalidDuration);
        }
        service.duration_minutes = duration;
    }
    if let Some(price) = body.price {
        if price < 0.0 {
            return Err(AppError::InvalidRange("price must be non-negative".to_string()));
        }
        service.price = price;
    }
    if let Some(active) = body.active {
        service.active = active;
    }

    queries::update_service(&db, &service)?;

    Ok(Json(service))
}
