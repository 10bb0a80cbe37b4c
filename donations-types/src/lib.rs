//! # Donations Types
//!
//! Domain types and port traits for the donation payment service.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Amount, PaymentRequest, GatewayCredentials)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, gateway and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AccessToken, Amount, Currency, DEFAULT_PAYMENT_DESCRIPTION, GatewayCredentials,
    GatewaySettings, InitStage, PaymentMethod, PaymentRequest, RedirectUrl, TransactionInitResult,
    TransactionPayload,
};
pub use dto::*;
pub use error::{DomainError, ErrorKind, GatewayError, PaymentError};
pub use ports::PaymentGateway;
