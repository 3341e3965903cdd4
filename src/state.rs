use crate::{catalog::Catalog, config::Config, store::SubmissionStore, survey::SessionRegistry};
use axum::extract::FromRef;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
    pub catalog: Arc<Catalog>,
    pub sessions: SessionRegistry,
    pub config: Config,
}

impl FromRef<AppState> for Arc<dyn SubmissionStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<Catalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
