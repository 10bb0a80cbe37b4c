//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use donations_gateway::{DEFAULT_BASE_URL, GatewayConfig};
use donations_types::GatewaySettings;

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub gateway: GatewayConfig,
    pub settings: GatewaySettings,
    pub public_site_url: Option<String>,
    pub rate_limit_per_minute: u32,
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Missing gateway secrets are not an error here; they surface as a
    /// configuration error on each payment request instead.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT must be a port number: {e}"))?;

        let timeout_secs: u64 = var("GATEWAY_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("GATEWAY_TIMEOUT_SECS must be a whole number: {e}"))?;
        if timeout_secs == 0 {
            anyhow::bail!("GATEWAY_TIMEOUT_SECS must be greater than zero");
        }

        let rate_limit_per_minute = var("RATE_LIMIT_PER_MINUTE")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("RATE_LIMIT_PER_MINUTE must be a whole number: {e}"))?;

        let gateway = GatewayConfig {
            base_url: var("GATEWAY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        let settings = GatewaySettings::new(
            var("GATEWAY_API_KEY"),
            var("GATEWAY_SECRET_KEY"),
            var("GATEWAY_CONTRACT_CODE"),
        );

        Ok(Self {
            port,
            gateway,
            settings,
            public_site_url: var("PUBLIC_SITE_URL"),
            rate_limit_per_minute,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}
