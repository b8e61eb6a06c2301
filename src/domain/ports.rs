use crate::domain::model::SearchResult;
use async_trait::async_trait;
use std::time::Duration;

/// Values the lookup clients read at construction time.
pub trait ConfigProvider: Send + Sync {
    fn search_endpoint(&self) -> &str;
    fn search_timeout(&self) -> Duration;
    fn max_results(&self) -> usize;
    fn user_agents(&self) -> &[String];
    fn ip_primary_endpoint(&self) -> &str;
    fn ip_secondary_endpoint(&self) -> &str;
    fn ip_timeout(&self) -> Duration;
    fn ip_cache_capacity(&self) -> usize;
}

/// A source of search hits for a single query string.
///
/// Implementations swallow their own failures: an unreachable engine yields an
/// empty list so one bad variant never aborts a batch.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str) -> Vec<SearchResult>;
}
