// src/state.rs
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::gemini::GenerativeModel;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: AppConfig,
    pub model: Arc<dyn GenerativeModel>,
}

impl AppState {
    pub fn new(config: AppConfig, model: Arc<dyn GenerativeModel>) -> Self {
        Self { config, model }
    }
}
