// src/integrations/gemini/config.rs

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Settings for the generation service.
///
/// Environment variables read by `from_env`:
/// `GEMINI_API_KEY` (or `API_KEY`), `GEMINI_BASE_URL`, `TRYON_IMAGE_MODEL`,
/// `TRYON_TEXT_MODEL`, `TRYON_TIMEOUT_SECS`.
#[derive(Clone)]
pub struct GenerationConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_model: String,
    pub text_model: String,
    pub timeout_secs: u64,
    /// Finish reasons treated as a normal stop
    pub allowed_finish_reasons: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            allowed_finish_reasons: vec!["STOP".to_string(), "MAX_TOKENS".to_string()],
        }
    }
}

impl GenerationConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load from the process environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("API_KEY"))
            .ok_or_else(|| {
                AppError::Configuration(
                    "GEMINI_API_KEY (or API_KEY) environment variable is not set".to_string(),
                )
            })?;

        let mut config = Self::with_api_key(api_key);

        if let Some(base_url) = non_empty("GEMINI_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = non_empty("TRYON_IMAGE_MODEL") {
            config.image_model = model;
        }
        if let Some(model) = non_empty("TRYON_TEXT_MODEL") {
            config.text_model = model;
        }
        if let Some(raw) = non_empty("TRYON_TIMEOUT_SECS") {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                AppError::Configuration(format!("TRYON_TIMEOUT_SECS is not a number: {}", raw))
            })?;
            if config.timeout_secs == 0 {
                return Err(AppError::Configuration(
                    "TRYON_TIMEOUT_SECS must be at least 1".to_string(),
                ));
            }
        }

        Ok(config)
    }
}

// Never print the key
impl std::fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("image_model", &self.image_model)
            .field("text_model", &self.text_model)
            .field("timeout_secs", &self.timeout_secs)
            .field("allowed_finish_reasons", &self.allowed_finish_reasons)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.allowed_finish_reasons, vec!["STOP", "MAX_TOKENS"]);
    }

    #[test]
    fn test_api_key_fallback_and_overrides() {
        let config = GenerationConfig::from_lookup(lookup(&[
            ("API_KEY", "legacy"),
            ("GEMINI_BASE_URL", "http://localhost:8080/v1/"),
            ("TRYON_IMAGE_MODEL", "img"),
            ("TRYON_TIMEOUT_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "legacy");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.image_model, "img");
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn test_missing_api_key() {
        let result = GenerationConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_bad_timeout() {
        let result = GenerationConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("TRYON_TIMEOUT_SECS", "soon"),
        ]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = GenerationConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("TRYON_TIMEOUT_SECS", "0"),
        ]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GenerationConfig::with_api_key("secret-value");
        assert!(!format!("{:?}", config).contains("secret-value"));
    }
}
