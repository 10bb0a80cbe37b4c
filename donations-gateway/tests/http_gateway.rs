//! Integration tests for the HTTP gateway adapter.
//!
//! Each test starts a small axum app on a random local port that plays the
//! gateway's part, then drives `HttpGateway` against it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::{Value, json};

use donations_gateway::{GatewayConfig, HttpGateway};
use donations_types::{
    AccessToken, Amount, GatewayCredentials, GatewayError, GatewaySettings, PaymentGateway,
    PaymentRequest, RedirectUrl, TransactionPayload,
};

const LOGIN: &str = "/api/v1/auth/login";
const INIT: &str = "/api/v1/merchant/transactions/init-transaction";

/// Base64 of `MK_TEST_KEY:sk_test_secret`.
const EXPECTED_BASIC: &str = "Basic TUtfVEVTVF9LRVk6c2tfdGVzdF9zZWNyZXQ=";

/// Headers and bodies the fake gateway received.
#[derive(Default)]
struct Seen {
    authorization: Vec<String>,
    bodies: Vec<Value>,
}

type Shared = Arc<Mutex<Seen>>;

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn gateway(base_url: String, timeout: Duration) -> HttpGateway {
    HttpGateway::new(GatewayConfig { base_url, timeout }).unwrap()
}

fn credentials() -> GatewayCredentials {
    GatewaySettings::new(
        Some("MK_TEST_KEY".into()),
        Some("sk_test_secret".into()),
        Some("7059707855".into()),
    )
    .credentials()
    .unwrap()
}

fn payload() -> TransactionPayload {
    let request = PaymentRequest::new(
        Amount::parse("5000").unwrap(),
        "Ada Obi",
        "ada@example.com",
        "DON-42",
        None,
    )
    .unwrap();
    let redirect = RedirectUrl::for_origin("https://regamos.org").unwrap();
    TransactionPayload::new(&request, "7059707855", &redirect)
}

/// A fake gateway route that records the request and answers with `reply`.
fn recording(seen: Shared, status: StatusCode, reply: Value) -> axum::routing::MethodRouter {
    post(move |headers: HeaderMap, body: String| {
        let seen = seen.clone();
        let reply = reply.clone();
        async move {
            let mut seen = seen.lock().unwrap();
            if let Some(auth) = headers.get("authorization") {
                seen.authorization
                    .push(auth.to_str().unwrap_or_default().to_string());
            }
            if let Ok(json) = serde_json::from_str::<Value>(&body) {
                seen.bodies.push(json);
            }
            (status, Json(reply))
        }
    })
}

#[tokio::test]
async fn test_authenticate_sends_basic_auth_and_returns_token() {
    let seen = Shared::default();
    let app = Router::new().route(
        LOGIN,
        recording(
            seen.clone(),
            StatusCode::OK,
            json!({
                "requestSuccessful": true,
                "responseMessage": "success",
                "responseBody": { "accessToken": "eyJ.token", "expiresIn": 3599 }
            }),
        ),
    );
    let base = spawn(app).await;

    let token = gateway(base, Duration::from_secs(5))
        .authenticate(&credentials())
        .await
        .unwrap();

    assert_eq!(token.expose(), "eyJ.token");
    assert_eq!(seen.lock().unwrap().authorization, vec![EXPECTED_BASIC]);
}

#[tokio::test]
async fn test_authenticate_non_success_status_is_rejected() {
    let seen = Shared::default();
    let app = Router::new().route(
        LOGIN,
        recording(
            seen,
            StatusCode::UNAUTHORIZED,
            json!({ "requestSuccessful": false, "responseMessage": "Invalid client credentials" }),
        ),
    );
    let base = spawn(app).await;

    let err = gateway(base, Duration::from_secs(5))
        .authenticate(&credentials())
        .await
        .unwrap_err();

    match err {
        GatewayError::Rejected { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid client credentials"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_authenticate_without_token_is_malformed() {
    let app = Router::new().route(
        LOGIN,
        recording(
            Shared::default(),
            StatusCode::OK,
            json!({ "requestSuccessful": true, "responseBody": {} }),
        ),
    );
    let base = spawn(app).await;

    let err = gateway(base, Duration::from_secs(5))
        .authenticate(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GatewayError::MalformedResponse("responseBody.accessToken")
    ));
}

#[tokio::test]
async fn test_declined_envelope_is_an_error() {
    let app = Router::new().route(
        LOGIN,
        recording(
            Shared::default(),
            StatusCode::OK,
            json!({ "requestSuccessful": false, "responseMessage": "Account suspended" }),
        ),
    );
    let base = spawn(app).await;

    let err = gateway(base, Duration::from_secs(5))
        .authenticate(&credentials())
        .await
        .unwrap_err();

    match err {
        GatewayError::Declined { message } => {
            assert_eq!(message.as_deref(), Some("Account suspended"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_initialize_sends_bearer_and_payload() {
    let seen = Shared::default();
    let app = Router::new().route(
        INIT,
        recording(
            seen.clone(),
            StatusCode::OK,
            json!({
                "requestSuccessful": true,
                "responseMessage": "success",
                "responseBody": {
                    "transactionReference": "MNFY|20240101|000001",
                    "paymentReference": "DON-42",
                    "checkoutUrl": "https://sandbox.sdk.monnify.com/checkout/MNFY|20240101|000001"
                }
            }),
        ),
    );
    let base = spawn(app).await;

    let result = gateway(base, Duration::from_secs(5))
        .initialize_transaction(&AccessToken::new("eyJ.token"), &payload())
        .await
        .unwrap();

    assert_eq!(result.transaction_reference, "MNFY|20240101|000001");
    assert_eq!(
        result.checkout_url,
        "https://sandbox.sdk.monnify.com/checkout/MNFY|20240101|000001"
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen.authorization, vec!["Bearer eyJ.token"]);
    let body = &seen.bodies[0];
    assert_eq!(body["paymentReference"], "DON-42");
    assert_eq!(body["contractCode"], "7059707855");
    assert_eq!(body["currencyCode"], "NGN");
    assert_eq!(
        body["redirectUrl"],
        "https://regamos.org/donate?payment=success"
    );
    assert_eq!(body["paymentMethods"], json!(["CARD", "ACCOUNT_TRANSFER"]));
}

#[tokio::test]
async fn test_initialize_without_checkout_url_is_malformed() {
    let app = Router::new().route(
        INIT,
        recording(
            Shared::default(),
            StatusCode::OK,
            json!({
                "requestSuccessful": true,
                "responseBody": { "transactionReference": "MNFY|1" }
            }),
        ),
    );
    let base = spawn(app).await;

    let err = gateway(base, Duration::from_secs(5))
        .initialize_transaction(&AccessToken::new("t"), &payload())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GatewayError::MalformedResponse("responseBody.checkoutUrl")
    ));
}

#[tokio::test]
async fn test_slow_gateway_times_out() {
    let app = Router::new().route(
        LOGIN,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "responseBody": { "accessToken": "late" } }))
        }),
    );
    let base = spawn(app).await;

    let err = gateway(base, Duration::from_millis(200))
        .authenticate(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Timeout));
}

#[tokio::test]
async fn test_unreachable_gateway_is_transport_error() {
    // Bind then drop to get a port nobody is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = gateway(format!("http://{}", addr), Duration::from_secs(2))
        .authenticate(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Transport(_)));
}

#[tokio::test]
async fn test_non_json_success_body_is_decode_error() {
    let app = Router::new().route(LOGIN, post(|| async { "<html>maintenance</html>" }));
    let base = spawn(app).await;

    let err = gateway(base, Duration::from_secs(5))
        .authenticate(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_wrong_typed_access_token_is_malformed() {
    let app = Router::new().route(
        LOGIN,
        recording(
            Shared::default(),
            StatusCode::OK,
            json!({ "requestSuccessful": true, "responseBody": { "accessToken": 12345 } }),
        ),
    );
    let base = spawn(app).await;

    let err = gateway(base, Duration::from_secs(5))
        .authenticate(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::MalformedResponse("responseBody")));
    assert!(!err.is_unexpected());
}

#[tokio::test]
async fn test_non_object_response_body_is_malformed() {
    let app = Router::new().route(
        LOGIN,
        recording(
            Shared::default(),
            StatusCode::OK,
            json!({ "requestSuccessful": true, "responseBody": "x" }),
        ),
    );
    let base = spawn(app).await;

    let err = gateway(base, Duration::from_secs(5))
        .authenticate(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::MalformedResponse("responseBody")));
}

#[tokio::test]
async fn test_wrong_typed_checkout_url_is_malformed() {
    let app = Router::new().route(
        INIT,
        recording(
            Shared::default(),
            StatusCode::OK,
            json!({
                "requestSuccessful": true,
                "responseBody": { "checkoutUrl": 42, "transactionReference": "MNFY|1" }
            }),
        ),
    );
    let base = spawn(app).await;

    let err = gateway(base, Duration::from_secs(5))
        .initialize_transaction(&AccessToken::new("t"), &payload())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::MalformedResponse("responseBody")));
    assert!(!err.is_unexpected());
}

#[tokio::test]
async fn test_wrong_typed_envelope_is_malformed() {
    let app = Router::new().route(
        LOGIN,
        recording(
            Shared::default(),
            StatusCode::OK,
            json!({ "requestSuccessful": "yes", "responseBody": { "accessToken": "t" } }),
        ),
    );
    let base = spawn(app).await;

    let err = gateway(base, Duration::from_secs(5))
        .authenticate(&credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::MalformedResponse(_)));
}
