//! # Donations Hex
//!
//! Application service layer and HTTP adapter for the donation payment service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates the gateway handshake)
//! - `inbound/` - HTTP adapter (Axum server, CORS, rate limiting)
//! - `openapi/` - OpenAPI document served alongside the API
//!
//! The service is generic over `G: PaymentGateway`, allowing the real HTTP
//! gateway or a test double to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::DonationService;
