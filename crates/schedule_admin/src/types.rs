use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::ScheduleStore;

/// State shared by every request handler.
pub struct AppState {
    /// The backing store. Each call on it is independent of the others.
    pub store: Arc<dyn ScheduleStore>,

    /// Configuration the process was started with.
    pub config: AppConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn ScheduleStore>, config: AppConfig) -> Self {
        Self { store, config }
    }
}
