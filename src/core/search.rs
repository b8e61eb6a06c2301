use crate::core::classify::result_hash;
use crate::core::links::{is_on_domain, normalize_link};
use crate::domain::model::SearchResult;
use crate::domain::ports::{ConfigProvider, SearchBackend};
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use scraper::{Html, Selector};

pub const SEARCH_ENGINE_DOMAIN: &str = "duckduckgo.com";

pub const DEFAULT_USER_AGENTS: [&str; 2] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
    "Mozilla/5.0 (Linux; Android 9) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/122.0.6261.140 DuckDuckGo/5 Safari/537.36",
];

/// Configured user agents, or the built-in pair when none are set.
pub fn user_agent_pool<C: ConfigProvider + ?Sized>(config: &C) -> Vec<String> {
    if config.user_agents().is_empty() {
        DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect()
    } else {
        config.user_agents().to_vec()
    }
}

/// A random entry of `agents`, drawn per request.
pub fn pick_user_agent(agents: &[String]) -> &str {
    agents
        .choose(&mut rand::thread_rng())
        .map(String::as_str)
        .unwrap_or(DEFAULT_USER_AGENTS[0])
}

/// Scrapes the DuckDuckGo HTML results page.
pub struct DuckDuckGoClient {
    client: Client,
    endpoint: String,
    user_agents: Vec<String>,
    max_results: usize,
}

impl DuckDuckGoClient {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.search_timeout())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.search_endpoint().to_string(),
            user_agents: user_agent_pool(config),
            max_results: config.max_results(),
        })
    }

    async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>> {
        tracing::debug!("Searching {} for {:?}", self.endpoint, query);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .header(USER_AGENT, pick_user_agent(&self.user_agents))
            .send()
            .await?
            .error_for_status()?;

        let html = response.text().await?;
        parse_results(&html, query, self.max_results)
    }
}

#[async_trait]
impl SearchBackend for DuckDuckGoClient {
    async fn search(&self, query: &str) -> Vec<SearchResult> {
        match self.fetch(query).await {
            Ok(results) => {
                tracing::debug!("{} results for {:?}", results.len(), query);
                results
            }
            Err(e) => {
                tracing::warn!("Search for {:?} failed: {}", query, e);
                Vec::new()
            }
        }
    }
}

/// Extracts result anchors from a results page. At most `max_results` result
/// blocks are inspected.
pub fn parse_results(html: &str, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let block_selector = selector("div.result")?;
    let anchor_selector = selector("a.result__a")?;

    let mut results = Vec::new();
    for block in document.select(&block_selector).take(max_results) {
        let Some(anchor) = block.select(&anchor_selector).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(url) = normalize_link(href) else {
            continue;
        };
        if is_on_domain(&url, SEARCH_ENGINE_DOMAIN) {
            continue;
        }

        let title = anchor
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        results.push(SearchResult {
            hash: result_hash(&title, &url),
            title,
            url,
            variation: query.to_string(),
        });
    }

    Ok(results)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| LookupError::ConfigError {
        message: format!("Invalid selector {css}: {e}"),
    })
}
