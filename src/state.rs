//! Shared application state for all routes.

use crate::config::StatusMode;
use crate::store::UserStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub status_mode: StatusMode,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        AppState {
            store,
            status_mode: StatusMode::default(),
        }
    }

    pub fn with_status_mode(mut self, status_mode: StatusMode) -> Self {
        self.status_mode = status_mode;
        self
    }
}
