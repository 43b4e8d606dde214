use std::sync::Arc;

use bug_db::service::BugService;

/// Shared handler state. The service is opened once and injected here.
#[derive(Clone)]
pub struct AppState {
    pub bugs: Arc<BugService>,
}

impl AppState {
    #[must_use]
    pub fn new(service: BugService) -> Self {
        Self {
            bugs: Arc::new(service),
        }
    }
}
