use std::sync::Arc;

use crate::application::services::AffiliateService;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub affiliate_service: Arc<AffiliateService>,
}

impl AppState {
    pub fn new(affiliate_service: Arc<AffiliateService>) -> Self {
        Self { affiliate_service }
    }
}
