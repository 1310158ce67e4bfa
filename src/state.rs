//! Shared application state for all routes.

use crate::repository::PersonRepository;
use crate::service::PersonService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub persons: PersonService,
}

impl AppState {
    /// Wire repository → service → state.
    pub fn new(repository: Arc<dyn PersonRepository>) -> Self {
        Self {
            persons: PersonService::new(repository),
        }
    }
}
