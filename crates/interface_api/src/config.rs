//! API configuration

use serde::Deserialize;

use claims_network::NetworkConfig;
use core_kernel::Identity;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// Identity that owns the deployed services (`IDN-<uuid>` or a bare uuid)
    pub authority: Option<String>,
    /// Settlement network settings
    pub network: NetworkConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            authority: None,
            network: NetworkConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    ///
    /// Variables use the `API_` prefix; nested network settings use a double
    /// underscore, e.g. `API_NETWORK__UNIT=250`.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("API")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Parses the configured authority identity
    pub fn authority_identity(&self) -> Result<Option<Identity>, uuid::Error> {
        self.authority.as_deref().map(str::parse).transpose()
    }
}
