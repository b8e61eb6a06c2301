use crate::core::ip_cache::IpCache;
use crate::core::search::{pick_user_agent, user_agent_pool};
use crate::domain::model::{IpRecord, IpSource};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{LookupError, Result};
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::net::Ipv4Addr;
use tokio::sync::Mutex;

pub const PRIMARY_PROVIDER: &str = "ipapi.co";
pub const SECONDARY_PROVIDER: &str = "ip-api.com";
pub const FALLBACK_NOTE: &str = "Answered by the fallback provider; fewer fields are available";

enum PrimaryOutcome {
    Found(IpRecord),
    RateLimited,
    Failed(String),
}

/// Geolocates IPv4 addresses against ipapi.co, falling back to ip-api.com.
pub struct IpLookupClient {
    client: Client,
    primary_endpoint: String,
    secondary_endpoint: String,
    user_agents: Vec<String>,
    cache: Option<Mutex<IpCache>>,
}

impl IpLookupClient {
    pub fn new<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = Client::builder().timeout(config.ip_timeout()).build()?;

        let cache = match config.ip_cache_capacity() {
            0 => None,
            capacity => Some(Mutex::new(IpCache::new(capacity))),
        };

        Ok(Self {
            client,
            primary_endpoint: config.ip_primary_endpoint().trim_end_matches('/').to_string(),
            secondary_endpoint: config
                .ip_secondary_endpoint()
                .trim_end_matches('/')
                .to_string(),
            user_agents: user_agent_pool(config),
            cache,
        })
    }

    pub async fn lookup(&self, ip: &str) -> Result<IpRecord> {
        let addr = parse_ipv4(ip)?;

        if let Some(cache) = &self.cache {
            if let Some(record) = cache.lock().await.get(&addr) {
                tracing::debug!("IP cache hit for {}", addr);
                return Ok(record);
            }
        }

        let record = self.resolve(addr).await?;

        if let Some(cache) = &self.cache {
            cache.lock().await.insert(addr, record.clone());
        }
        Ok(record)
    }

    async fn resolve(&self, addr: Ipv4Addr) -> Result<IpRecord> {
        let primary_error = match self.query_primary(addr).await {
            PrimaryOutcome::Found(record) => return Ok(record),
            PrimaryOutcome::RateLimited => {
                tracing::warn!("{} rate limited lookup of {}", PRIMARY_PROVIDER, addr);
                return Err(LookupError::RateLimitError {
                    provider: PRIMARY_PROVIDER.to_string(),
                });
            }
            PrimaryOutcome::Failed(reason) => reason,
        };
        tracing::warn!(
            "{} failed for {}: {}; trying {}",
            PRIMARY_PROVIDER,
            addr,
            primary_error,
            SECONDARY_PROVIDER
        );

        match self.query_secondary(addr).await {
            Ok(record) => Ok(record),
            Err(secondary_error) => {
                tracing::error!(
                    "All IP providers failed for {}: primary={}, secondary={}",
                    addr,
                    primary_error,
                    secondary_error
                );
                Err(LookupError::AllProvidersFailedError {
                    primary: primary_error,
                    secondary: secondary_error,
                })
            }
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(USER_AGENT, pick_user_agent(&self.user_agents))
    }

    async fn query_primary(&self, addr: Ipv4Addr) -> PrimaryOutcome {
        let url = format!("{}/{}/json/", self.primary_endpoint, addr);

        let response = match self.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return PrimaryOutcome::Failed(e.to_string()),
        };

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return PrimaryOutcome::RateLimited;
        }
        if !status.is_success() {
            return PrimaryOutcome::Failed(format!("HTTP {}", status));
        }

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => return PrimaryOutcome::Failed(format!("invalid JSON: {}", e)),
        };

        if body.get("error").and_then(Value::as_bool).unwrap_or(false) {
            let reason = text(&body, "reason").unwrap_or_else(|| "provider error".to_string());
            return PrimaryOutcome::Failed(reason);
        }

        let record = map_primary(addr, &body);
        if !record.has_location() {
            return PrimaryOutcome::Failed("no geolocation data".to_string());
        }
        PrimaryOutcome::Found(record)
    }

    async fn query_secondary(&self, addr: Ipv4Addr) -> std::result::Result<IpRecord, String> {
        let url = format!("{}/json/{}", self.secondary_endpoint, addr);

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {}", status));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| format!("invalid JSON: {}", e))?;

        if body.get("status").and_then(Value::as_str) != Some("success") {
            return Err(text(&body, "message").unwrap_or_else(|| "lookup failed".to_string()));
        }

        Ok(map_secondary(addr, &body))
    }
}

/// Strict dotted-quad IPv4 check.
pub fn parse_ipv4(ip: &str) -> Result<Ipv4Addr> {
    ip.trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| LookupError::InvalidIpError { ip: ip.to_string() })
}

fn map_primary(addr: Ipv4Addr, body: &Value) -> IpRecord {
    let mut record = IpRecord::empty(&addr.to_string(), IpSource::Primary, PRIMARY_PROVIDER);
    record.country = text(body, "country_name");
    record.country_code = text(body, "country_code");
    record.region = text(body, "region");
    record.city = text(body, "city");
    record.postal_code = text(body, "postal");
    record.latitude = number(body, "latitude");
    record.longitude = number(body, "longitude");
    record.timezone = text(body, "timezone");
    record.asn = text(body, "asn");
    record.org = text(body, "org");
    record
}

fn map_secondary(addr: Ipv4Addr, body: &Value) -> IpRecord {
    let mut record = IpRecord::empty(&addr.to_string(), IpSource::Fallback, SECONDARY_PROVIDER);
    record.country = text(body, "country");
    record.country_code = text(body, "countryCode");
    record.region = text(body, "regionName");
    record.city = text(body, "city");
    record.postal_code = text(body, "zip");
    record.latitude = number(body, "lat");
    record.longitude = number(body, "lon");
    record.timezone = text(body, "timezone");
    record.asn = text(body, "as");
    record.org = text(body, "org");
    record.isp = text(body, "isp");
    record.note = Some(FALLBACK_NOTE.to_string());
    record
}

// Null, blank strings, and empty objects/arrays count as absent.
fn text(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number(body: &Value, key: &str) -> Option<f64> {
    match body.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
