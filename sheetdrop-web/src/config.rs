//! Frontend configuration module
//!
//! Holds the fixed base URL every API request is issued against.

/// Frontend configuration for URLs and external settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the backend API.
    pub api_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("SHEETDROP_API_URL")
                .unwrap_or("/api")
                .to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration instance.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url_is_set() {
        let config = AppConfig::new();
        assert!(!config.api_base_url.is_empty());
    }

    #[test]
    fn test_config_clone_matches() {
        let config = AppConfig::default();
        assert_eq!(config.clone(), config);
    }
}
