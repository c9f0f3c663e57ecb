use std::sync::Arc;
use nt_scrappers::TrendManager;

#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<TrendManager>,
}

impl AppState {
    pub fn new(manager: TrendManager) -> Self {
        Self {
            manager: Arc::new(manager),
        }
    }
}
