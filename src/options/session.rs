use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::parse_timestamp;
use crate::error::SatVizError;

/// Environment variable overriding [`SessionConfig::access_token`].
pub const ENV_ACCESS_TOKEN: &str = "SATVIZ_ACCESS_TOKEN";
/// Environment variable overriding [`SessionConfig::initial_time`].
pub const ENV_INITIAL_TIME: &str = "SATVIZ_INITIAL_TIME";
/// Environment variable overriding [`SessionConfig::model_uri`].
pub const ENV_MODEL_URI: &str = "SATVIZ_MODEL_URI";
/// Environment variable overriding [`SessionConfig::backend_url`].
pub const ENV_BACKEND_URL: &str = "SATVIZ_BACKEND_URL";

/// Values injected per deployment rather than chosen by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Access token for the rendering backend's imagery and terrain.
    pub access_token: Option<String>,
    /// Start of the simulated window (RFC 3339). Defaults to now.
    pub initial_time: Option<String>,
    /// glTF model drawn for every satellite marker.
    pub model_uri: Option<String>,
    /// Base URL of the trajectory and coverage service.
    pub backend_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            initial_time: None,
            model_uri: None,
            backend_url: "http://localhost:5000".to_owned(),
            request_timeout_secs: 120,
        }
    }
}

impl SessionConfig {
    /// Load from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Io`] if the file cannot be read, or
    /// [`SatVizError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, SatVizError> {
        let content = std::fs::read_to_string(path).map_err(SatVizError::Io)?;
        toml::from_str(&content)
            .map_err(|e| SatVizError::OptionsParse(e.to_string()))
    }

    /// Apply the `SATVIZ_*` environment overrides.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by the `SATVIZ_*` variable
    /// names. Empty values are ignored.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(token) = get(ENV_ACCESS_TOKEN) {
            self.access_token = Some(token);
        }
        if let Some(time) = get(ENV_INITIAL_TIME) {
            self.initial_time = Some(time);
        }
        if let Some(uri) = get(ENV_MODEL_URI) {
            self.model_uri = Some(uri);
        }
        if let Some(url) = get(ENV_BACKEND_URL) {
            self.backend_url = url;
        }
        self
    }

    /// Model URI for satellite markers.
    ///
    /// # Errors
    ///
    /// Returns [`SatVizError::Initialization`] when no model is configured;
    /// markers cannot be drawn without one.
    pub fn model_uri(&self) -> Result<&str, SatVizError> {
        self.model_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| {
                SatVizError::Initialization(format!(
                    "no satellite model configured (set model_uri or \
                     {ENV_MODEL_URI})"
                ))
            })
    }

    /// Start of the simulated window. An unparseable configured time is
    /// logged and replaced by `now`.
    #[must_use]
    pub fn start_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let Some(raw) = self.initial_time.as_deref() else {
            return now;
        };
        parse_timestamp(raw).unwrap_or_else(|| {
            log::warn!("cannot parse initial time '{raw}', using current time");
            now
        })
    }

    /// Whether an access token was provided.
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        parse_timestamp("2030-06-01T12:00:00Z").unwrap()
    }

    #[test]
    fn missing_model_is_initialization_error() {
        let config = SessionConfig::default();
        assert!(matches!(
            config.model_uri(),
            Err(SatVizError::Initialization(_))
        ));
        let blank = SessionConfig {
            model_uri: Some("  ".into()),
            ..SessionConfig::default()
        };
        assert!(blank.model_uri().is_err());
    }

    #[test]
    fn bad_initial_time_falls_back_to_now() {
        let config = SessionConfig {
            initial_time: Some("yesterday-ish".into()),
            ..SessionConfig::default()
        };
        assert_eq!(config.start_time(now()), now());
    }

    #[test]
    fn initial_time_is_parsed() {
        let config = SessionConfig {
            initial_time: Some("2024-01-01T00:00:00Z".into()),
            ..SessionConfig::default()
        };
        assert_eq!(
            config.start_time(now()),
            parse_timestamp("2024-01-01T00:00:00Z").unwrap()
        );
    }

    #[test]
    fn overrides_replace_file_values() {
        let config = SessionConfig {
            model_uri: Some("file.glb".into()),
            ..SessionConfig::default()
        }
        .with_overrides(|key| match key {
            ENV_MODEL_URI => Some("env.glb".to_owned()),
            ENV_BACKEND_URL => Some("http://sat:8080".to_owned()),
            ENV_ACCESS_TOKEN => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.model_uri().unwrap(), "env.glb");
        assert_eq!(config.backend_url, "http://sat:8080");
        assert!(!config.has_access_token());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: SessionConfig =
            toml::from_str("model_uri = \"sat.glb\"").unwrap();
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.backend_url, "http://localhost:5000");
    }
}
