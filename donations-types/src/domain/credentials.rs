//! Gateway credentials and access tokens.
//!
//! Everything in here is secret material. `Debug` output is redacted and
//! none of these types implement `Serialize`.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::DomainError;

/// Gateway configuration as the process was started with it.
///
/// Values may be missing: the service still starts and answers CORS
/// preflights and health checks, but every payment attempt fails until the
/// settings resolve into [`GatewayCredentials`].
#[derive(Clone, Default)]
pub struct GatewaySettings {
    api_key: Option<SecretString>,
    secret_key: Option<SecretString>,
    contract_code: Option<String>,
}

impl GatewaySettings {
    pub fn new(
        api_key: Option<String>,
        secret_key: Option<String>,
        contract_code: Option<String>,
    ) -> Self {
        Self {
            api_key: api_key.map(SecretString::from),
            secret_key: secret_key.map(SecretString::from),
            contract_code,
        }
    }

    /// Names of the settings that are missing or blank.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank_secret(&self.api_key) {
            missing.push("api key");
        }
        if blank_secret(&self.secret_key) {
            missing.push("secret key");
        }
        if self
            .contract_code
            .as_deref()
            .is_none_or(|c| c.trim().is_empty())
        {
            missing.push("contract code");
        }
        missing
    }

    /// Resolves the settings into a complete credential set.
    pub fn credentials(&self) -> Result<GatewayCredentials, DomainError> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(DomainError::MissingConfiguration(missing));
        }

        match (&self.api_key, &self.secret_key, &self.contract_code) {
            (Some(api_key), Some(secret_key), Some(contract_code)) => Ok(GatewayCredentials {
                api_key: api_key.clone(),
                secret_key: secret_key.clone(),
                contract_code: contract_code.trim().to_string(),
            }),
            _ => Err(DomainError::MissingConfiguration(missing)),
        }
    }
}

impl fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("missing", &self.missing())
            .finish_non_exhaustive()
    }
}

fn blank_secret(value: &Option<SecretString>) -> bool {
    value
        .as_ref()
        .is_none_or(|s| s.expose_secret().trim().is_empty())
}

/// A complete set of gateway credentials.
#[derive(Clone)]
pub struct GatewayCredentials {
    api_key: SecretString,
    secret_key: SecretString,
    contract_code: String,
}

impl GatewayCredentials {
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }

    /// Merchant contract the transactions are booked against.
    pub fn contract_code(&self) -> &str {
        &self.contract_code
    }
}

impl fmt::Debug for GatewayCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GatewayCredentials([REDACTED])")
    }
}

/// Short-lived bearer token for a single invocation. Never cached.
#[derive(Debug, Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretString::from(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}
