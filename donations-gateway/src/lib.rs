//! # Donations Gateway
//!
//! reqwest-based adapter for the payment gateway's two-step handshake:
//!
//! 1. `POST /api/v1/auth/login` with HTTP Basic credentials returns an
//!    access token.
//! 2. `POST /api/v1/merchant/transactions/init-transaction` with that token
//!    as Bearer auth returns a hosted checkout URL.
//!
//! Every call is bounded by the configured timeout and made exactly once.
//! Gateway error bodies are logged here and never travel further than
//! [`GatewayError`]'s `Debug` output.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use donations_types::{
    AccessToken, GatewayCredentials, GatewayError, PaymentGateway, TransactionInitResult,
    TransactionPayload,
};

/// Sandbox host of the gateway.
pub const DEFAULT_BASE_URL: &str = "https://sandbox.monnify.com";

/// Per-call timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const LOGIN_PATH: &str = "/api/v1/auth/login";
const INIT_TRANSACTION_PATH: &str = "/api/v1/merchant/transactions/init-transaction";

/// Connection settings for [`HttpGateway`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Standard envelope wrapped around every gateway response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T> {
    request_successful: Option<bool>,
    response_message: Option<String>,
    response_body: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitTransactionBody {
    checkout_url: Option<String>,
    transaction_reference: Option<String>,
}

/// Payment gateway reached over HTTPS.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: Client,
    base_url: String,
}

impl HttpGateway {
    /// Builds the HTTP client. Both the connect phase and the whole request
    /// are bounded by `config.timeout`.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends one request and unwraps the envelope's `responseBody`.
    async fn call<T: DeserializeOwned>(
        &self,
        step: &'static str,
        request: RequestBuilder,
    ) -> Result<Option<T>, GatewayError> {
        let resp = request.send().await.map_err(transport_error)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport_error)?;

        if !status.is_success() {
            tracing::warn!(step, status = status.as_u16(), body = %body, "Gateway rejected request");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))?;

        // Valid JSON of the wrong shape is a malformed answer for this step,
        // not an unexpected failure.
        let envelope: Envelope<serde_json::Value> = serde_json::from_value(json).map_err(|e| {
            tracing::warn!(step, error = %e, body = %body, "Gateway envelope has unexpected shape");
            GatewayError::MalformedResponse("response envelope")
        })?;

        if envelope.request_successful == Some(false) {
            tracing::warn!(
                step,
                gateway_message = envelope.response_message.as_deref().unwrap_or_default(),
                "Gateway declined request"
            );
            return Err(GatewayError::Declined {
                message: envelope.response_message,
            });
        }

        envelope
            .response_body
            .filter(|b| !b.is_null())
            .map(|b| {
                serde_json::from_value(b).map_err(|e| {
                    tracing::warn!(step, error = %e, body = %body, "Gateway responseBody has unexpected shape");
                    GatewayError::MalformedResponse("responseBody")
                })
            })
            .transpose()
    }
}

fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Transport(err.to_string())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[async_trait::async_trait]
impl PaymentGateway for HttpGateway {
    #[tracing::instrument(skip_all)]
    async fn authenticate(
        &self,
        credentials: &GatewayCredentials,
    ) -> Result<AccessToken, GatewayError> {
        let request = self
            .http
            .post(self.url(LOGIN_PATH))
            .basic_auth(credentials.api_key(), Some(credentials.secret_key()));

        let body: Option<LoginBody> = self.call("authenticate", request).await?;

        body.and_then(|b| non_empty(b.access_token))
            .map(AccessToken::new)
            .ok_or(GatewayError::MalformedResponse("responseBody.accessToken"))
    }

    #[tracing::instrument(skip_all, fields(payment_reference = %payload.payment_reference))]
    async fn initialize_transaction(
        &self,
        token: &AccessToken,
        payload: &TransactionPayload,
    ) -> Result<TransactionInitResult, GatewayError> {
        let request = self
            .http
            .post(self.url(INIT_TRANSACTION_PATH))
            .bearer_auth(token.expose())
            .json(payload);

        let body: InitTransactionBody = self
            .call("initialize_transaction", request)
            .await?
            .ok_or(GatewayError::MalformedResponse("responseBody"))?;

        let checkout_url = non_empty(body.checkout_url)
            .ok_or(GatewayError::MalformedResponse("responseBody.checkoutUrl"))?;
        let transaction_reference = non_empty(body.transaction_reference).ok_or(
            GatewayError::MalformedResponse("responseBody.transactionReference"),
        )?;

        Ok(TransactionInitResult {
            checkout_url,
            transaction_reference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let gateway = HttpGateway::new(GatewayConfig {
            base_url: "https://sandbox.monnify.com/".into(),
            ..GatewayConfig::default()
        })
        .unwrap();
        assert_eq!(
            gateway.url(LOGIN_PATH),
            "https://sandbox.monnify.com/api/v1/auth/login"
        );
    }

    #[test]
    fn test_envelope_tolerates_missing_body() {
        let envelope: Envelope<LoginBody> =
            serde_json::from_str(r#"{"requestSuccessful": true}"#).unwrap();
        assert!(envelope.response_body.is_none());
    }

    #[test]
    fn test_non_empty_filters_blank() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some("tok".into())), Some("tok".into()));
    }
}
