use std::sync::Arc;

use crate::application::services::ShortUrlService;
use crate::infrastructure::persistence::InMemoryShortUrlRepository;

/// Service type used by the running application.
pub type AppShortUrlService = ShortUrlService<InMemoryShortUrlRepository>;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<AppShortUrlService>,
}

impl AppState {
    pub fn new(short_url_service: Arc<AppShortUrlService>) -> Self {
        Self { short_url_service }
    }
}
