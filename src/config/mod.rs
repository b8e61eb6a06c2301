pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use toml_config::TomlConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "osint-lookup")]
#[command(about = "HTTP service for username, IP and phone number lookups")]
pub struct CliConfig {
    #[arg(long, short, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Address to bind, overrides [server].host")]
    pub host: Option<String>,

    #[arg(long, env = "PORT", help = "Port to listen on, overrides [server].port")]
    pub port: Option<u16>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Loads the TOML file (or defaults), applies command-line overrides and
    /// validates the result.
    pub fn load(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_overrides_win_over_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nhost = \"127.0.0.1\"\nport = 7000\n")
            .unwrap();

        let cli = CliConfig {
            config: Some(temp_file.path().to_path_buf()),
            host: None,
            port: Some(9999),
            verbose: false,
        };

        let config = cli.load().unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9999");
    }

    #[test]
    fn test_defaults_without_file() {
        let cli = CliConfig {
            config: None,
            host: Some("localhost".to_string()),
            port: None,
            verbose: false,
        };

        let config = cli.load().unwrap();
        assert_eq!(config.bind_address(), "localhost:5000");
    }

    #[test]
    fn test_blank_host_fails_validation() {
        let cli = CliConfig {
            config: None,
            host: Some("  ".to_string()),
            port: None,
            verbose: false,
        };

        assert!(cli.load().is_err());
    }

    #[test]
    fn test_missing_file_is_reported() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/nonexistent/osint-lookup.toml")),
            host: None,
            port: None,
            verbose: false,
        };

        let err = cli.load().unwrap_err();
        assert!(matches!(err, crate::utils::error::LookupError::IoError(_)));
    }
}
