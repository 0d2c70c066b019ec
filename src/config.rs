// src/config.rs

use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use dotenvy::dotenv;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_EXTERNAL_TIMEOUT_SECS: f64 = 30.0;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_host: String,
    pub api_port: u16,
    /// Root directory holding `pdfs/` and `questions.json`.
    pub data_dir: PathBuf,
    /// Base URL of the answering service. `None` selects the simulated engine.
    pub external_service_url: Option<Url>,
    pub external_service_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_host: DEFAULT_HOST.to_string(),
            api_port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            external_service_url: None,
            external_service_timeout: Duration::from_secs_f64(DEFAULT_EXTERNAL_TIMEOUT_SECS),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let api_port = parse_env("API_PORT", DEFAULT_PORT);

        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let external_service_url = env::var("EXTERNAL_SERVICE_URL")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .and_then(|raw| match Url::parse(raw.trim()) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!(
                        "Ignoring EXTERNAL_SERVICE_URL '{}': {}. Falling back to simulated answers.",
                        raw,
                        e
                    );
                    None
                }
            });

        let timeout_secs = parse_env("EXTERNAL_SERVICE_TIMEOUT", DEFAULT_EXTERNAL_TIMEOUT_SECS);
        let external_service_timeout = if timeout_secs.is_finite() && timeout_secs > 0.0 {
            Duration::from_secs_f64(timeout_secs)
        } else {
            tracing::warn!(
                "EXTERNAL_SERVICE_TIMEOUT must be positive, using {}s",
                DEFAULT_EXTERNAL_TIMEOUT_SECS
            );
            Duration::from_secs_f64(DEFAULT_EXTERNAL_TIMEOUT_SECS)
        };

        let max_upload_bytes = parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            api_host,
            api_port,
            data_dir,
            external_service_url,
            external_service_timeout,
            max_upload_bytes,
        }
    }

    pub fn pdf_dir(&self) -> PathBuf {
        self.data_dir.join("pdfs")
    }

    pub fn questions_path(&self) -> PathBuf {
        self.data_dir.join("questions.json")
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    /// Overrides the data directory, mostly for tests and the manage tool.
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }
}

/// Reads and parses an environment variable, falling back to `default`
/// when it is unset or malformed.
fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value '{}' for {}, using {}", raw, key, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_live_under_data_dir() {
        let config = Config::default().with_data_dir("/srv/qp");
        assert_eq!(config.pdf_dir(), PathBuf::from("/srv/qp/pdfs"));
        assert_eq!(config.questions_path(), PathBuf::from("/srv/qp/questions.json"));
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = Config {
            api_host: "127.0.0.1".into(),
            api_port: 9001,
            ..Config::default()
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:9001");
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.api_host, "0.0.0.0");
        assert_eq!(config.api_port, 8000);
        assert!(config.external_service_url.is_none());
        assert_eq!(config.external_service_timeout, Duration::from_secs(30));
    }
}
