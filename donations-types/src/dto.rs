//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Amount, PaymentRequest, TransactionInitResult};
use crate::error::DomainError;

// ─────────────────────────────────────────────────────────────────────────────
// Payment initialization DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Amount as sent by the donation form: either a JSON number or a numeric
/// string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(serde_json::Number),
    Text(String),
}

impl AmountInput {
    pub fn parse(&self) -> Result<Amount, DomainError> {
        match self {
            AmountInput::Number(n) => Amount::parse(&n.to_string()),
            AmountInput::Text(s) => Amount::parse(s),
        }
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<u64> for AmountInput {
    fn from(value: u64) -> Self {
        AmountInput::Number(value.into())
    }
}

/// Request to start a hosted checkout for a donation.
///
/// Fields default to empty so that a missing field is reported as a
/// validation error naming it, rather than a generic decode failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitializePaymentRequest {
    /// Donation amount in naira
    #[serde(default)]
    #[schema(value_type = f64, example = 5000)]
    pub amount: Option<AmountInput>,
    /// Donor's full name
    #[serde(default)]
    #[schema(example = "Ada Obi")]
    pub customer_name: String,
    /// Donor's email address
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub customer_email: String,
    /// Caller-generated reference, unique per attempt
    #[serde(default)]
    #[schema(example = "DON-6f1c2a")]
    pub payment_reference: String,
    /// Optional description shown on the checkout page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Donation to Regamos Foundation")]
    pub payment_description: Option<String>,
}

impl TryFrom<&InitializePaymentRequest> for PaymentRequest {
    type Error = DomainError;

    fn try_from(req: &InitializePaymentRequest) -> Result<Self, Self::Error> {
        let amount = req
            .amount
            .as_ref()
            .ok_or(DomainError::MissingField("amount"))?
            .parse()?;

        PaymentRequest::new(
            amount,
            &req.customer_name,
            &req.customer_email,
            &req.payment_reference,
            req.payment_description.as_deref(),
        )
    }
}

/// Response after a successful initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InitializePaymentResponse {
    /// Always `true`; failures use [`ErrorResponse`]
    pub success: bool,
    /// Gateway-hosted checkout page to redirect the donor to
    #[schema(example = "https://sandbox.sdk.monnify.com/checkout/MNFY|20240101|000001")]
    pub checkout_url: String,
    /// Gateway-issued transaction identifier
    #[schema(example = "MNFY|20240101|000001")]
    pub transaction_reference: String,
}

impl From<TransactionInitResult> for InitializePaymentResponse {
    fn from(result: TransactionInitResult) -> Self {
        Self {
            success: true,
            checkout_url: result.checkout_url,
            transaction_reference: result.transaction_reference,
        }
    }
}

/// Uniform error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Failed to initialize payment")]
    pub error: String,
}
