//! API configuration

use std::time::Duration;

use serde::Deserialize;

use infra_crm::GhlConfig;

fn default_sync_timeout_secs() -> u64 {
    20
}

/// API configuration
///
/// Passed into router construction explicitly; handlers never read the
/// process environment.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// GoHighLevel API key; the intake endpoint refuses to operate without it
    pub ghl_api_key: Option<String>,
    /// GoHighLevel location the created contacts belong to
    pub ghl_location_id: Option<String>,
    /// Override for the contact API base URL (tests, staging)
    pub ghl_api_base: Option<String>,
    /// Bound on the outbound sync call, in seconds
    #[serde(default = "default_sync_timeout_secs")]
    pub sync_timeout_secs: u64,
    /// Log level
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "sqlite://intake.db".to_string(),
            ghl_api_key: None,
            ghl_location_id: None,
            ghl_api_base: None,
            sync_timeout_secs: default_sync_timeout_secs(),
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("INTAKE"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the CRM client configuration, if the credentials are present
    ///
    /// Returns `None` when either credential is missing or blank; the
    /// intake handler then answers 500 without attempting anything.
    pub fn ghl_config(&self) -> Option<GhlConfig> {
        let api_key = self.ghl_api_key.as_deref().filter(|s| !s.is_empty())?;
        let location_id = self.ghl_location_id.as_deref().filter(|s| !s.is_empty())?;

        let mut config = GhlConfig::new(api_key, location_id)
            .with_timeout(Duration::from_secs(self.sync_timeout_secs));
        if let Some(base) = self.ghl_api_base.as_deref().filter(|s| !s.is_empty()) {
            config = config.with_api_base(base);
        }
        Some(config)
    }
}
