use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::AppConfig;
use crate::services::clock::Clock;

/// Shared application state. The single connection behind a mutex doubles as
/// the per-process write serializer: a booking request holds the lock across
/// its whole read-then-insert critical section.
pub struct AppState {
    pub db: Arc<Mutex<Connection>>,
    pub config: AppConfig,
    pub clock: Box<dyn Clock>,
}
