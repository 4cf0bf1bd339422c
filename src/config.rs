use std::env;

use thiserror::Error;

pub const DEFAULT_OPENWEBUI_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIKA_URL: &str = "http://localhost:9998";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MODEL: &str = "llama2:13b";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be an integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Process-wide settings, read once at startup and passed to whoever needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub openwebui_url: String,
    /// Text-extraction service. Configured for deployments, not called by anything here.
    pub tika_url: String,
    pub api_key: String,
    pub host: String,
    pub port: u16,
    pub default_model: String,
    pub max_upload_bytes: usize,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = match lookup("BACKEND_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber { var: "BACKEND_PORT", value })?,
            None => DEFAULT_PORT,
        };

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber { var: "MAX_UPLOAD_BYTES", value })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            openwebui_url: get("OPENWEBUI_URL", DEFAULT_OPENWEBUI_URL)
                .trim_end_matches('/')
                .to_string(),
            tika_url: get("TIKA_URL", DEFAULT_TIKA_URL),
            api_key: get("OPENWEBUI_API_KEY", ""),
            host: get("BACKEND_HOST", DEFAULT_HOST),
            port,
            default_model: get("DEFAULT_MODEL", DEFAULT_MODEL),
            max_upload_bytes,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openwebui_url: DEFAULT_OPENWEBUI_URL.to_string(),
            tika_url: DEFAULT_TIKA_URL.to_string(),
            api_key: String::new(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            default_model: DEFAULT_MODEL.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_keys_fall_back_to_defaults() {
        let settings = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.port, 5000);
        assert_eq!(settings.default_model, "llama2:13b");
        assert_eq!(settings.api_key, "");
    }

    #[test]
    fn values_override_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("OPENWEBUI_URL", "https://chat.example.edu/"),
            ("OPENWEBUI_API_KEY", "sk-test"),
            ("BACKEND_HOST", "127.0.0.1"),
            ("BACKEND_PORT", "8088"),
            ("DEFAULT_MODEL", "mistral:7b"),
        ]))
        .unwrap();

        assert_eq!(settings.openwebui_url, "https://chat.example.edu");
        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.port, 8088);
        assert_eq!(settings.default_model, "mistral:7b");
        assert_eq!(settings.tika_url, DEFAULT_TIKA_URL);
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = Settings::from_lookup(lookup_from(&[("BACKEND_PORT", "five")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { var: "BACKEND_PORT", .. }));
    }
}
