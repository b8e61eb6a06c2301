use crate::core::classify::{classify_results, remove_duplicates};
use crate::core::variants::generate_variants;
use crate::domain::model::UsernameReport;
use crate::domain::ports::SearchBackend;
use chrono::Utc;
use std::sync::Arc;

/// Runs the username presence pipeline: variants, search, classify, dedupe.
#[derive(Clone)]
pub struct UsernameSearch {
    backend: Arc<dyn SearchBackend>,
}

impl UsernameSearch {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    pub async fn run(&self, username: &str) -> UsernameReport {
        tracing::info!("Starting username search for {:?}", username);

        let variations = generate_variants(username);
        tracing::debug!("Generated {} variants", variations.len());

        // Variants are searched one after another.
        let mut all_results = Vec::new();
        for variation in &variations {
            let results = self.backend.search(variation).await;
            all_results.extend(results);
        }
        tracing::debug!("Collected {} raw results", all_results.len());

        let results = remove_duplicates(classify_results(all_results));
        tracing::info!(
            "Username search for {:?} finished with {} unique results",
            username,
            results.total()
        );

        UsernameReport {
            username: username.to_string(),
            date: Utc::now(),
            variations,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify::result_hash;
    use crate::domain::model::SearchResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockBackend {
        queries: Mutex<Vec<String>>,
    }

    impl MockBackend {
        fn new() -> Self {
            Self {
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl SearchBackend for MockBackend {
        async fn search(&self, query: &str) -> Vec<SearchResult> {
            self.queries.lock().unwrap().push(query.to_string());
            if query.ends_with("123") {
                // simulates a variant whose request failed
                return Vec::new();
            }
            let url = "https://github.com/alice".to_string();
            let title = "alice on GitHub".to_string();
            vec![SearchResult {
                hash: result_hash(&title, &url),
                title,
                url,
                variation: query.to_string(),
            }]
        }
    }

    #[tokio::test]
    async fn test_run_searches_every_variant_in_order() {
        let backend = Arc::new(MockBackend::new());
        let search = UsernameSearch::new(backend.clone());

        let report = search.run("alice").await;

        let queries = backend.queries.lock().unwrap().clone();
        assert_eq!(queries, report.variations);
        assert_eq!(report.username, "alice");
    }

    #[tokio::test]
    async fn test_run_dedupes_across_variants() {
        let backend = Arc::new(MockBackend::new());
        let search = UsernameSearch::new(backend);

        let report = search.run("alice").await;

        let github = report.results.get("GitHub").unwrap();
        assert_eq!(github.len(), 1);
        assert_eq!(report.results.total(), 1);
        // first variant in sorted order is the one that is kept
        assert_eq!(github[0].variation, report.variations[0]);
    }
}
