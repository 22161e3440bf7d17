use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::{HttpRecommendationService, RecommendationService, ResultMapper},
    store::RecommendationStore,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecommendationStore>,
    pub service: Arc<dyn RecommendationService>,
}

impl AppState {
    /// Creates the shell state around a fresh recommendation session
    pub fn new(service: Arc<dyn RecommendationService>, mapper: ResultMapper) -> Self {
        Self {
            store: Arc::new(RecommendationStore::new(service.clone(), mapper)),
            service,
        }
    }

    /// Wires the HTTP backend client from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let service = HttpRecommendationService::from_config(config)?;
        Ok(Self::new(
            Arc::new(service),
            ResultMapper::new(config.poster_base_url.clone()),
        ))
    }
}
