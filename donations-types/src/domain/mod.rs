//! Domain models for the donation payment service.

pub mod amount;
pub mod credentials;
pub mod payment;
pub mod stage;

pub use amount::{Amount, Currency};
pub use credentials::{AccessToken, GatewayCredentials, GatewaySettings};
pub use payment::{
    DEFAULT_PAYMENT_DESCRIPTION, PaymentMethod, PaymentRequest, RedirectUrl,
    TransactionInitResult, TransactionPayload,
};
pub use stage::InitStage;
