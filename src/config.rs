use secrecy::SecretString;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Process-wide settings, read once at startup and handed to the assistant.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: Option<SecretString>,
    pub model: String,
    pub base_url: String,
    pub request_timeout: Duration,
    /// Project path opened in the editor at startup.
    pub open_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            open_file: None,
        }
    }
}

impl AppConfig {
    /// Reads the environment, after loading `.env` if one exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("API_KEY"))
            .map(SecretString::from);
        let model = non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = non_empty("GEMINI_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match non_empty("ASSISTANT_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(value = %raw, "invalid ASSISTANT_TIMEOUT_SECS, using default");
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            api_key,
            model,
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            open_file: non_empty("DROID_OPEN_FILE").map(|path| path.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = config_from(&[]);
        assert!(config.api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.open_file.is_none());
    }

    #[test]
    fn gemini_key_wins_over_generic_key() {
        let config = config_from(&[("GEMINI_API_KEY", "gemini"), ("API_KEY", "generic")]);
        assert_eq!(
            config.api_key.as_ref().map(|key| key.expose_secret().to_string()),
            Some("gemini".to_string())
        );

        let config = config_from(&[("GEMINI_API_KEY", "  "), ("API_KEY", "generic")]);
        assert_eq!(
            config.api_key.as_ref().map(|key| key.expose_secret().to_string()),
            Some("generic".to_string())
        );
    }

    #[test]
    fn overrides_are_read() {
        let config = config_from(&[
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("GEMINI_BASE_URL", "http://localhost:8080/v1beta/"),
            ("ASSISTANT_TIMEOUT_SECS", "5"),
            ("DROID_OPEN_FILE", " app/data/Cliente.kt "),
        ]);
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.open_file.as_deref(), Some("app/data/Cliente.kt"));
    }

    #[test]
    fn bad_timeout_falls_back_to_default() {
        for raw in ["zero", "0", "-3"] {
            let config = config_from(&[("ASSISTANT_TIMEOUT_SECS", raw)]);
            assert_eq!(config.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        }
    }
}
