use std::sync::Arc;

use crate::services::Recommender;

/// Shared application state
///
/// The recommender is built once before serving and never mutated, so
/// handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub default_recommendations: usize,
}

impl AppState {
    pub fn new(recommender: Recommender, default_recommendations: usize) -> Self {
        Self {
            recommender: Arc::new(recommender),
            default_recommendations,
        }
    }
}
