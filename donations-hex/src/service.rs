//! Donation Application Service
//!
//! Orchestrates the two-step gateway handshake through the gateway port.
//! Contains NO infrastructure logic - pure orchestration.

use donations_types::{
    DomainError, GatewaySettings, InitStage, InitializePaymentRequest, PaymentError,
    PaymentGateway, PaymentRequest, RedirectUrl, TransactionInitResult, TransactionPayload,
};

/// Application service for donation payments.
///
/// Generic over `G: PaymentGateway` - the adapter is injected at compile time.
/// Settings are passed in once at construction; nothing is read from the
/// environment per request and no token outlives the call that obtained it.
pub struct DonationService<G: PaymentGateway> {
    gateway: G,
    settings: GatewaySettings,
    default_origin: Option<String>,
}

impl<G: PaymentGateway> DonationService<G> {
    /// Creates a new donation service.
    pub fn new(gateway: G, settings: GatewaySettings) -> Self {
        Self {
            gateway,
            settings,
            default_origin: None,
        }
    }

    /// Origin used for the success redirect when the request carries no
    /// usable `Origin` header.
    pub fn with_default_origin(mut self, origin: impl Into<String>) -> Self {
        self.default_origin = Some(origin.into());
        self
    }

    /// Returns a reference to the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// True when all gateway credentials are present.
    pub fn is_configured(&self) -> bool {
        self.settings.missing().is_empty()
    }

    /// Runs one payment initialization attempt.
    ///
    /// Checks happen in order: configuration, request validation,
    /// authentication, transaction initialization. Nothing is retried and
    /// nothing is deduplicated; calling twice with the same reference makes
    /// two independent pairs of gateway calls.
    #[tracing::instrument(
        skip(self, req),
        fields(payment_reference = %req.payment_reference, stage = tracing::field::Empty)
    )]
    pub async fn initialize_payment(
        &self,
        req: &InitializePaymentRequest,
        origin: Option<&str>,
    ) -> Result<TransactionInitResult, PaymentError> {
        let mut stage = InitStage::Received;

        match self.run(req, origin, &mut stage).await {
            Ok(result) => {
                advance(&mut stage, InitStage::Completed);
                tracing::info!(
                    transaction_reference = %result.transaction_reference,
                    "Payment initialized"
                );
                Ok(result)
            }
            Err(err) => {
                let failed_at = stage;
                advance(&mut stage, InitStage::Failed(err.kind()));
                tracing::error!(kind = %err.kind(), %failed_at, error = ?err, "Payment initialization failed");
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        req: &InitializePaymentRequest,
        origin: Option<&str>,
        stage: &mut InitStage,
    ) -> Result<TransactionInitResult, PaymentError> {
        let credentials = self.settings.credentials()?;
        let payment = PaymentRequest::try_from(req)?;
        let redirect_url = self.redirect_url(origin)?;
        let payload = TransactionPayload::new(&payment, credentials.contract_code(), &redirect_url);

        advance(stage, InitStage::Authenticating);
        let token = self
            .gateway
            .authenticate(&credentials)
            .await
            .map_err(PaymentError::authentication)?;
        advance(stage, InitStage::Authenticated);

        advance(stage, InitStage::Initializing);
        self.gateway
            .initialize_transaction(&token, &payload)
            .await
            .map_err(PaymentError::transaction_init)
    }

    /// Prefers the caller's origin, then the configured default.
    fn redirect_url(&self, origin: Option<&str>) -> Result<RedirectUrl, DomainError> {
        let from_header = origin
            .filter(|o| !o.trim().is_empty())
            .map(RedirectUrl::for_origin);

        match (from_header, self.default_origin.as_deref()) {
            (Some(Ok(url)), _) => Ok(url),
            (Some(Err(_)), Some(default)) | (None, Some(default)) => {
                RedirectUrl::for_origin(default)
            }
            (Some(Err(err)), None) => Err(err),
            (None, None) => Err(DomainError::MissingOrigin),
        }
    }
}

fn advance(stage: &mut InitStage, next: InitStage) {
    debug_assert!(!stage.is_terminal(), "no transitions out of {stage}");
    tracing::debug!(from = %stage, to = %next, "Payment stage");
    tracing::Span::current().record("stage", tracing::field::display(next));
    *stage = next;
}
