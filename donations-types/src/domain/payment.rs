//! Donation payment requests and the transaction payload sent to the gateway.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Currency};
use crate::error::DomainError;

/// Description used when the caller does not supply one.
pub const DEFAULT_PAYMENT_DESCRIPTION: &str = "Donation to Regamos Foundation";

/// Path and query the gateway sends the donor back to after checkout.
const SUCCESS_REDIRECT_PATH: &str = "/donate?payment=success";

/// Payment methods offered on the hosted checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    AccountTransfer,
}

impl PaymentMethod {
    /// Every method the checkout accepts.
    pub const ACCEPTED: [PaymentMethod; 2] = [PaymentMethod::Card, PaymentMethod::AccountTransfer];
}

/// A validated donation attempt. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    amount: Amount,
    customer_name: String,
    customer_email: String,
    payment_reference: String,
    payment_description: String,
}

impl PaymentRequest {
    pub fn new(
        amount: Amount,
        customer_name: &str,
        customer_email: &str,
        payment_reference: &str,
        payment_description: Option<&str>,
    ) -> Result<Self, DomainError> {
        let payment_description = payment_description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_PAYMENT_DESCRIPTION);

        Ok(Self {
            amount,
            customer_name: required("customerName", customer_name)?,
            customer_email: required("customerEmail", customer_email)?,
            payment_reference: required("paymentReference", payment_reference)?,
            payment_description: payment_description.to_string(),
        })
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    /// Caller-supplied reference for this attempt. Passed through untouched;
    /// the service does not deduplicate on it.
    pub fn payment_reference(&self) -> &str {
        &self.payment_reference
    }

    pub fn payment_description(&self) -> &str {
        &self.payment_description
    }
}

fn required(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(value.to_string())
}

/// Where the gateway redirects the donor after a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectUrl(String);

impl RedirectUrl {
    /// Builds the success redirect for a site origin such as
    /// `https://regamos.org`.
    pub fn for_origin(origin: &str) -> Result<Self, DomainError> {
        let origin = origin.trim().trim_end_matches('/');
        let host = origin
            .strip_prefix("https://")
            .or_else(|| origin.strip_prefix("http://"));

        match host {
            Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => {
                Ok(Self(format!("{origin}{SUCCESS_REDIRECT_PATH}")))
            }
            _ => Err(DomainError::InvalidOrigin(origin.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RedirectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of the gateway's transaction-initialization call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub customer_name: String,
    pub customer_email: String,
    pub payment_reference: String,
    pub payment_description: String,
    pub currency_code: Currency,
    pub contract_code: String,
    pub redirect_url: String,
    pub payment_methods: Vec<PaymentMethod>,
}

impl TransactionPayload {
    pub fn new(request: &PaymentRequest, contract_code: &str, redirect_url: &RedirectUrl) -> Self {
        Self {
            amount: request.amount().value(),
            customer_name: request.customer_name().to_string(),
            customer_email: request.customer_email().to_string(),
            payment_reference: request.payment_reference().to_string(),
            payment_description: request.payment_description().to_string(),
            currency_code: request.amount().currency(),
            contract_code: contract_code.to_string(),
            redirect_url: redirect_url.as_str().to_string(),
            payment_methods: PaymentMethod::ACCEPTED.to_vec(),
        }
    }
}

/// What a successful initialization hands back to the donor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionInitResult {
    pub checkout_url: String,
    pub transaction_reference: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(description: Option<&str>) -> PaymentRequest {
        PaymentRequest::new(
            Amount::parse("5000").unwrap(),
            " Ada Obi ",
            "ada@example.com",
            "DON-1",
            description,
        )
        .unwrap()
    }

    #[test]
    fn test_description_defaults() {
        assert_eq!(request(None).payment_description(), DEFAULT_PAYMENT_DESCRIPTION);
        assert_eq!(
            request(Some("   ")).payment_description(),
            DEFAULT_PAYMENT_DESCRIPTION
        );
        assert_eq!(
            request(Some("School fees drive")).payment_description(),
            "School fees drive"
        );
    }

    #[test]
    fn test_fields_are_trimmed() {
        assert_eq!(request(None).customer_name(), "Ada Obi");
    }

    #[test]
    fn test_blank_reference_is_rejected() {
        let result = PaymentRequest::new(
            Amount::parse("100").unwrap(),
            "Ada",
            "ada@example.com",
            "  ",
            None,
        );
        assert!(matches!(
            result,
            Err(DomainError::MissingField("paymentReference"))
        ));
    }

    #[test]
    fn test_redirect_url_for_origin() {
        let url = RedirectUrl::for_origin("https://regamos.org/").unwrap();
        assert_eq!(url.as_str(), "https://regamos.org/donate?payment=success");

        let local = RedirectUrl::for_origin("http://localhost:5173").unwrap();
        assert_eq!(local.as_str(), "http://localhost:5173/donate?payment=success");
    }

    #[test]
    fn test_redirect_url_rejects_opaque_origins() {
        assert!(RedirectUrl::for_origin("null").is_err());
        assert!(RedirectUrl::for_origin("https://").is_err());
        assert!(RedirectUrl::for_origin("ftp://regamos.org").is_err());
    }

    #[test]
    fn test_payload_shape() {
        let redirect = RedirectUrl::for_origin("https://regamos.org").unwrap();
        let payload = TransactionPayload::new(&request(None), "CONTRACT", &redirect);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["amount"], serde_json::json!(5000.0));
        assert_eq!(json["customerName"], "Ada Obi");
        assert_eq!(json["paymentReference"], "DON-1");
        assert_eq!(json["currencyCode"], "NGN");
        assert_eq!(json["contractCode"], "CONTRACT");
        assert_eq!(
            json["redirectUrl"],
            "https://regamos.org/donate?payment=success"
        );
        assert_eq!(
            json["paymentMethods"],
            serde_json::json!(["CARD", "ACCOUNT_TRANSFER"])
        );
    }
}
