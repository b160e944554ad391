//! Dashboard statistics

use std::sync::Arc;

use crate::{api::LibraryApi, fetch::Fetch, models::Stats};

#[derive(Clone)]
pub struct StatsService {
    api: Arc<dyn LibraryApi>,
}

impl StatsService {
    pub fn new(api: Arc<dyn LibraryApi>) -> Self {
        Self { api }
    }

    /// Counters for the dashboard, fetched once per call
    pub fn dashboard(&self) -> Fetch<Stats> {
        let api = Arc::clone(&self.api);
        Fetch::start("stats", async move { api.stats().await })
    }
}
