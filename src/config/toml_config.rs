use crate::core::search::DEFAULT_USER_AGENTS;
use crate::core::ConfigProvider;
use crate::utils::error::{LookupError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
pub const DEFAULT_PRIMARY_IP_ENDPOINT: &str = "https://ipapi.co";
pub const DEFAULT_SECONDARY_IP_ENDPOINT: &str = "http://ip-api.com";
pub const MAX_IP_CACHE_CAPACITY: usize = 100_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub search: SearchConfig,
    pub ip_lookup: IpLookupConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub max_results: usize,
    pub user_agents: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            timeout_seconds: 15,
            max_results: 30,
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IpLookupConfig {
    pub primary_endpoint: String,
    pub secondary_endpoint: String,
    pub timeout_seconds: u64,
    /// 0 disables memoization.
    pub cache_capacity: usize,
}

impl Default for IpLookupConfig {
    fn default() -> Self {
        Self {
            primary_endpoint: DEFAULT_PRIMARY_IP_ENDPOINT.to_string(),
            secondary_endpoint: DEFAULT_SECONDARY_IP_ENDPOINT.to_string(),
            timeout_seconds: 15,
            cache_capacity: 256,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LookupError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LookupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${IP_PRIMARY_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LookupError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_non_empty_string("server.host", &self.server.host)?;

        validate_url("search.endpoint", &self.search.endpoint)?;
        validate_range("search.timeout_seconds", self.search.timeout_seconds, 1, 120)?;
        validate_positive_number("search.max_results", self.search.max_results, 1)?;

        validate_url("ip_lookup.primary_endpoint", &self.ip_lookup.primary_endpoint)?;
        validate_url("ip_lookup.secondary_endpoint", &self.ip_lookup.secondary_endpoint)?;
        validate_range("ip_lookup.timeout_seconds", self.ip_lookup.timeout_seconds, 1, 120)?;
        validate_range(
            "ip_lookup.cache_capacity",
            self.ip_lookup.cache_capacity,
            0,
            MAX_IP_CACHE_CAPACITY,
        )?;

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ConfigProvider for TomlConfig {
    fn search_endpoint(&self) -> &str {
        &self.search.endpoint
    }

    fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search.timeout_seconds)
    }

    fn max_results(&self) -> usize {
        self.search.max_results
    }

    fn user_agents(&self) -> &[String] {
        &self.search.user_agents
    }

    fn ip_primary_endpoint(&self) -> &str {
        &self.ip_lookup.primary_endpoint
    }

    fn ip_secondary_endpoint(&self) -> &str {
        &self.ip_lookup.secondary_endpoint
    }

    fn ip_timeout(&self) -> Duration {
        Duration::from_secs(self.ip_lookup.timeout_seconds)
    }

    fn ip_cache_capacity(&self) -> usize {
        self.ip_lookup.cache_capacity
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
