use crate::error::{ClientError, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_LOG_FILTER: &str = "warn";
/// Looked up in the working directory when no file is given.
pub const DEFAULT_CONFIG_FILE: &str = "hsa-client.toml";
pub const ENV_PREFIX: &str = "HSA_CLIENT";

/// Client settings.
///
/// Layered lowest to highest: built-in defaults, the TOML file, `HSA_CLIENT_*`
/// environment variables, then command-line overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Root of the backend API, e.g. `http://127.0.0.1:8000/api`.
    pub base_url: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Settings {
    /// Loads settings. An explicit `file` must exist; the default one may not.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(file, ENV_PREFIX)
    }

    pub fn load_with_prefix(file: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let settings: Settings = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("log_filter", DEFAULT_LOG_FILTER)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(env_prefix))
            .build()?
            .try_deserialize()?;
        settings.validated()
    }

    /// Applies command-line overrides on top of the loaded layers.
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        log_filter: Option<String>,
    ) -> Result<Self> {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(log_filter) = log_filter {
            self.log_filter = log_filter;
        }
        self.validated()
    }

    fn validated(mut self) -> Result<Self> {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ClientError::ValidationError(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::load_with_prefix(None, "HSA_CLIENT_UNIT_DEFAULTS").unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_file_layer() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "base_url = \"http://bank.internal:9000/api/\"").unwrap();
        file.flush().unwrap();

        let settings =
            Settings::load_with_prefix(Some(file.path()), "HSA_CLIENT_UNIT_FILE").unwrap();
        assert_eq!(settings.base_url, "http://bank.internal:9000/api");
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = Settings::load_with_prefix(
            Some(Path::new("/nonexistent/hsa-client.toml")),
            "HSA_CLIENT_UNIT_MISSING",
        );
        assert!(matches!(result, Err(ClientError::ConfigError(_))));
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::load_with_prefix(None, "HSA_CLIENT_UNIT_OVERRIDES")
            .unwrap()
            .with_overrides(Some("https://example.org/api".to_string()), None)
            .unwrap();
        assert_eq!(settings.base_url, "https://example.org/api");
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let result = Settings::load_with_prefix(None, "HSA_CLIENT_UNIT_REJECT")
            .unwrap()
            .with_overrides(Some("ftp://example.org".to_string()), None);
        assert!(matches!(result, Err(ClientError::ValidationError(_))));
    }
}
