//! # Donations Client SDK
//!
//! A typed Rust client for the donations API.

use donations_types::{AmountInput, InitializePaymentRequest, InitializePaymentResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returns a fresh payment reference.
///
/// The service passes references through to the gateway without
/// deduplicating, so every attempt (including a retry after a failure)
/// should use a new one.
pub fn generate_payment_reference() -> String {
    format!("DON-{}", uuid::Uuid::new_v4().simple())
}

/// Donations API client.
pub struct DonationsClient {
    base_url: String,
    origin: Option<String>,
    http: Client,
}

impl DonationsClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            origin: None,
            http: Client::new(),
        }
    }

    /// Sets the `Origin` header, which decides where the gateway redirects
    /// the donor after checkout.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Starts a hosted checkout.
    pub async fn initialize_payment(
        &self,
        req: &InitializePaymentRequest,
    ) -> Result<InitializePaymentResponse, ClientError> {
        self.post("/api/payments/initialize", req).await
    }

    /// Starts a hosted checkout under a freshly generated reference.
    pub async fn donate(
        &self,
        amount: impl Into<AmountInput>,
        customer_name: &str,
        customer_email: &str,
        payment_description: Option<String>,
    ) -> Result<InitializePaymentResponse, ClientError> {
        let req = InitializePaymentRequest {
            amount: Some(amount.into()),
            customer_name: customer_name.to_string(),
            customer_email: customer_email.to_string(),
            payment_reference: generate_payment_reference(),
            payment_description,
        };
        self.initialize_payment(&req).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let mut req = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body);
        if let Some(origin) = &self.origin {
            req = req.header("Origin", origin);
        }
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
