use serde::{Deserialize, Serialize};

/// One row per provider per weekday (0=Sunday .. 6=Saturday). The full set
/// is replaced wholesale on update, never patched row by row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessHoursEntry {
    pub provider_id: String,
    pub day_of_week: u8,
    pub is_open: bool,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}
