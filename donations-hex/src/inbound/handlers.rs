//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};

use donations_types::{
    ErrorResponse, InitializePaymentRequest, InitializePaymentResponse, PaymentError,
    PaymentGateway,
};

use crate::DonationService;

/// Application state shared across handlers.
pub struct AppState<G: PaymentGateway> {
    pub service: DonationService<G>,
}

/// Wrapper to implement IntoResponse for PaymentError (orphan rule workaround).
///
/// This is the only place an error kind turns into an HTTP status. Every
/// failure is a 500 with the error's client-safe message.
#[derive(Debug)]
pub struct ApiError(pub PaymentError);

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.0.client_message(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Start a hosted checkout for a donation.
#[tracing::instrument(skip_all)]
pub async fn initialize_payment<G: PaymentGateway>(
    State(state): State<Arc<AppState<G>>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<InitializePaymentResponse>, ApiError> {
    // Browsers posting a JSON string without a header send text/plain, so
    // the content type is not checked. Only the body decides.
    let req: InitializePaymentRequest = body
        .map_err(|rejection| rejection.body_text())
        .and_then(|bytes| serde_json::from_slice(&bytes).map_err(|e| e.to_string()))
        .map_err(|error| {
            tracing::warn!(%error, "Rejected payment request body");
            PaymentError::Validation("Request body must be a JSON object".into())
        })?;

    let origin = headers.get(header::ORIGIN).and_then(|v| v.to_str().ok());

    let result = state.service.initialize_payment(&req, origin).await?;
    Ok(Json(InitializePaymentResponse::from(result)))
}
