//! Error types for the donation payment service.

use std::fmt;

/// Domain-level errors (invalid input or incomplete configuration).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount must be a number: {0:?}")]
    InvalidAmount(String),

    #[error("Amount must be positive")]
    NonPositiveAmount,

    #[error("Amount cannot have more than {max_places} decimal places")]
    AmountTooPrecise { max_places: u32 },

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid request origin: {0:?}")]
    InvalidOrigin(String),

    #[error("Missing request origin")]
    MissingOrigin,

    #[error("Missing gateway configuration: {}", .0.join(", "))]
    MissingConfiguration(Vec<&'static str>),
}

/// Errors reported by a [`crate::PaymentGateway`] adapter.
///
/// The `Display` output never includes the gateway's response body; adapters
/// log bodies themselves.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway responded with HTTP {status}")]
    Rejected { status: u16, body: String },

    #[error("Gateway declined the request")]
    Declined { message: Option<String> },

    #[error("Gateway response is missing {0}")]
    MalformedResponse(&'static str),

    #[error("Gateway call timed out")]
    Timeout,

    #[error("Gateway unreachable: {0}")]
    Transport(String),

    #[error("Gateway response could not be decoded: {0}")]
    Decode(String),
}

impl GatewayError {
    /// True for failures that say nothing about the step itself
    /// (connection problems, non-JSON bodies).
    pub fn is_unexpected(&self) -> bool {
        matches!(self, GatewayError::Transport(_) | GatewayError::Decode(_))
    }
}

/// Failure categories of a payment initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    Validation,
    TransactionInit,
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "ConfigurationError",
            ErrorKind::Authentication => "AuthenticationError",
            ErrorKind::Validation => "ValidationError",
            ErrorKind::TransactionInit => "TransactionInitError",
            ErrorKind::Unexpected => "UnexpectedError",
        };
        f.write_str(name)
    }
}

/// Application-level errors of the payment initialization flow.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication failed: {0}")]
    Authentication(#[source] GatewayError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Transaction initialization failed: {0}")]
    TransactionInit(#[source] GatewayError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PaymentError {
    /// Classifies a failure of the credential exchange.
    pub fn authentication(err: GatewayError) -> Self {
        if err.is_unexpected() {
            PaymentError::Unexpected(err.to_string())
        } else {
            PaymentError::Authentication(err)
        }
    }

    /// Classifies a failure of the transaction-initialization call.
    pub fn transaction_init(err: GatewayError) -> Self {
        if err.is_unexpected() {
            PaymentError::Unexpected(err.to_string())
        } else {
            PaymentError::TransactionInit(err)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::Configuration(_) => ErrorKind::Configuration,
            PaymentError::Authentication(_) => ErrorKind::Authentication,
            PaymentError::Validation(_) => ErrorKind::Validation,
            PaymentError::TransactionInit(_) => ErrorKind::TransactionInit,
            PaymentError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    /// Message safe to hand to the caller.
    ///
    /// Only validation errors carry detail, since they describe the caller's
    /// own input.
    pub fn client_message(&self) -> String {
        match self {
            PaymentError::Configuration(_) => "Payment service is not configured".into(),
            PaymentError::Authentication(_) => "Failed to authenticate with payment gateway".into(),
            PaymentError::Validation(msg) => msg.clone(),
            PaymentError::TransactionInit(_) => "Failed to initialize payment".into(),
            PaymentError::Unexpected(_) => "An unexpected error occurred".into(),
        }
    }
}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingConfiguration(_) => PaymentError::Configuration(err.to_string()),
            other => PaymentError::Validation(other.to_string()),
        }
    }
}
