use std::path::{Path, PathBuf};
use std::time::Duration;

use derb_content::loader::{GUIDES_FILE, QUESTIONS_FILE};

use crate::error::AppError;

const DEFAULT_SITE_URL: &str = "https://derb.so";
const DEFAULT_LINKS_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NexusConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` serves the dataset compiled into the binary.
    pub data_dir: Option<PathBuf>,
    pub site_url: String,
    pub redis_url: Option<String>,
    pub nexus: Option<NexusConfig>,
    pub http_listen_addr: Option<String>,
    pub mcp_tcp_listen_addr: Option<String>,
}

impl Config {
    /// Optional:
    /// - `DERB_DATA_DIR` (directory holding questions.json and guides.json)
    /// - `DERB_SITE_URL` (default: "https://derb.so")
    /// - `REDIS_URL`
    /// - `NEXUS_SUPABASE_URL` + `NEXUS_SUPABASE_ANON_KEY` (both or neither)
    /// - `DERB_LINKS_TIMEOUT_SECS` (default: 10)
    /// - `DERB_HTTP_LISTEN_ADDR` (serve the HTTP API)
    /// - `MCP_TCP_LISTEN_ADDR` (serve MCP over TCP instead of stdio)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = var("DERB_DATA_DIR").map(PathBuf::from);
        if let Some(dir) = &data_dir {
            for file in [QUESTIONS_FILE, GUIDES_FILE] {
                let path = dir.join(file);
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "required file not found: {}",
                        path.display()
                    )));
                }
            }
        }

        let timeout_secs = match var("DERB_LINKS_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!(
                    "DERB_LINKS_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                ))
            })?,
            None => DEFAULT_LINKS_TIMEOUT_SECS,
        };

        let nexus = match (var("NEXUS_SUPABASE_URL"), var("NEXUS_SUPABASE_ANON_KEY")) {
            (Some(url), Some(anon_key)) => Some(NexusConfig {
                url,
                anon_key,
                timeout: Duration::from_secs(timeout_secs),
            }),
            (None, None) => None,
            _ => {
                return Err(AppError::Config(
                    "NEXUS_SUPABASE_URL and NEXUS_SUPABASE_ANON_KEY must be set together"
                        .to_string(),
                ))
            }
        };

        Ok(Self {
            data_dir,
            site_url: var("DERB_SITE_URL").unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
            redis_url: var("REDIS_URL"),
            nexus,
            http_listen_addr: var("DERB_HTTP_LISTEN_ADDR"),
            mcp_tcp_listen_addr: var("MCP_TCP_LISTEN_ADDR"),
        })
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]).unwrap();
        assert_eq!(config.site_url, "https://derb.so");
        assert!(config.data_dir().is_none());
        assert!(config.redis_url.is_none());
        assert!(config.nexus.is_none());
        assert!(config.http_listen_addr.is_none());
    }

    #[test]
    fn nexus_needs_both_variables() {
        let err = config(&[("NEXUS_SUPABASE_URL", "https://x.supabase.co")]).unwrap_err();
        assert!(err.to_string().contains("must be set together"));

        let config = config(&[
            ("NEXUS_SUPABASE_URL", "https://x.supabase.co"),
            ("NEXUS_SUPABASE_ANON_KEY", "key"),
            ("DERB_LINKS_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        let nexus = config.nexus.unwrap();
        assert_eq!(nexus.timeout, Duration::from_secs(3));
    }

    #[test]
    fn rejects_bad_timeout() {
        assert!(config(&[("DERB_LINKS_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn data_dir_must_hold_both_files() {
        let dir = std::env::temp_dir().join("derb-config-missing-files");
        let err = config(&[("DERB_DATA_DIR", dir.to_str().unwrap())]).unwrap_err();
        assert!(err.to_string().contains(QUESTIONS_FILE));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config(&[("REDIS_URL", "  "), ("DERB_SITE_URL", "")]).unwrap();
        assert!(config.redis_url.is_none());
        assert_eq!(config.site_url, "https://derb.so");
    }
}
