use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub provider_id: String,
    pub name: String,
    pub category: Option<String>,
    pub duration_minutes: i32,
    pub price: f64,
    /// Inactive services are hidden from availability and new bookings but
    /// kept so historical bookings still resolve.
    pub active: bool,
    pub created_at: NaiveDateTime,
}
