use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::api::PageSettings;
use crate::dashboard::Viewer;

/// Main configuration structure for inkflow
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InkflowConfig {
    /// Orders API connection
    pub api: ApiConfig,
    /// Who is using the board
    pub user: UserConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API origin, e.g. https://shop.example.com (paths start with /api)
    pub base_url: Option<String>,
    /// Bearer token issued by the auth service
    pub token: Option<String>,
    /// Orders per page when walking the order list
    pub page_size: u32,
    /// Hard cap on pages fetched for the board
    pub max_pages: u32,
    pub sort_by: String,
    pub sort_order: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
    /// Rate limiting settings
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst_capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserConfig {
    /// Employee id of the acting user
    pub id: Option<String>,
    /// Admins see every item on the board
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Default filter when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON lines instead of human-readable logs
    pub json_logs: bool,
}

impl Default for InkflowConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: None,
                token: None,
                page_size: 50,
                max_pages: 20,
                sort_by: "dueDate".to_string(),
                sort_order: "asc".to_string(),
                timeout_seconds: 30,
                rate_limit: RateLimitConfig {
                    requests_per_second: 5,
                    burst_capacity: 10,
                },
            },
            user: UserConfig {
                id: None,
                is_admin: false,
            },
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
                json_logs: false,
            },
        }
    }
}

impl InkflowConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (inkflow.toml, .inkflow-rc)
    /// 3. Environment variables (INKFLOW__SECTION__KEY)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&InkflowConfig::default())?);

        if Path::new("inkflow.toml").exists() {
            builder = builder.add_source(File::with_name("inkflow"));
        }

        if Path::new(".inkflow-rc").exists() {
            builder = builder.add_source(File::with_name(".inkflow-rc").format(config::FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("INKFLOW")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut inkflow_config: InkflowConfig = builder.build()?.try_deserialize()?;
        inkflow_config.apply_env_fallbacks(|key| std::env::var(key).ok());
        Ok(inkflow_config)
    }

    /// Fill unset values from the well-known variables the web console used
    fn apply_env_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let blank = |value: &Option<String>| value.as_deref().map_or(true, |v| v.trim().is_empty());

        if blank(&self.api.base_url) {
            self.api.base_url = lookup("NEXT_PUBLIC_API_BASE_URL").or(self.api.base_url.take());
        }
        if blank(&self.api.token) {
            self.api.token = lookup("INKFLOW_API_TOKEN").or(self.api.token.take());
        }
        if blank(&self.user.id) {
            self.user.id = lookup("INKFLOW_USER_ID").or(self.user.id.take());
        }
    }

    pub fn page_settings(&self) -> PageSettings {
        PageSettings {
            page_size: self.api.page_size.max(1),
            max_pages: self.api.max_pages.max(1),
            sort_by: self.api.sort_by.clone(),
            sort_order: self.api.sort_order.clone(),
        }
    }

    pub fn viewer(&self) -> Viewer {
        Viewer {
            id: self.user.id.clone().unwrap_or_default(),
            is_admin: self.user.is_admin,
        }
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<InkflowConfig, anyhow::Error>> = std::sync::LazyLock::new(|| {
    // Load .env file first
    let _ = InkflowConfig::load_env_file();
    InkflowConfig::load()
});

/// Get the global configuration
pub fn config() -> Result<&'static InkflowConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = InkflowConfig::default();
        assert_eq!(config.api.page_size, 50);
        assert_eq!(config.page_settings().max_pages, 20);
        assert!(!config.viewer().is_admin);
        assert_eq!(config.viewer().id, "");
    }

    #[test]
    fn test_env_fallbacks_fill_only_blank_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("NEXT_PUBLIC_API_BASE_URL", "https://api.example.test"),
            ("INKFLOW_API_TOKEN", "tok"),
            ("INKFLOW_USER_ID", "emp-9"),
        ]);

        let mut config = InkflowConfig::default();
        config.user.id = Some("emp-1".to_string());
        config.apply_env_fallbacks(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url.as_deref(), Some("https://api.example.test"));
        assert_eq!(config.api.token.as_deref(), Some("tok"));
        assert_eq!(config.user.id.as_deref(), Some("emp-1"));
    }

    #[test]
    fn test_zero_paging_values_are_clamped() {
        let mut config = InkflowConfig::default();
        config.api.page_size = 0;
        config.api.max_pages = 0;
        let paging = config.page_settings();
        assert_eq!((paging.page_size, paging.max_pages), (1, 1));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = InkflowConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: InkflowConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
