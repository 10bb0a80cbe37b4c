//! Payment gateway port.
//!
//! Implemented by the HTTP adapter in `donations-gateway` and by test doubles.

use crate::domain::{AccessToken, GatewayCredentials, TransactionInitResult, TransactionPayload};
use crate::error::GatewayError;

/// The two calls of the gateway handshake.
///
/// Implementations must not retry or cache: every call maps to exactly one
/// outbound request, bounded by a timeout.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Exchanges API key and secret for a short-lived access token.
    async fn authenticate(
        &self,
        credentials: &GatewayCredentials,
    ) -> Result<AccessToken, GatewayError>;

    /// Creates a hosted checkout transaction.
    async fn initialize_transaction(
        &self,
        token: &AccessToken,
        payload: &TransactionPayload,
    ) -> Result<TransactionInitResult, GatewayError>;
}
