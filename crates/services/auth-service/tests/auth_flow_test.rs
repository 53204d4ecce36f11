//! End-to-end auth flow through the gRPC adapter over the in-memory store.

use std::sync::Arc;

use chrono::Duration;
use futures::future::join_all;
use tonic::{Code, Request};

use auth_service_lib::grpc::AuthGrpcService;
use auth_service_lib::service::{decode_token, Authenticator, JwtIssuer};
use auth_service_lib::storage::MemoryStore;
use proto::sso::{IsAdminRequest, LoginRequest, RegisterRequest};
use proto::Auth;

const APP_SECRET: &str = "web-app-signing-secret-32-chars-min";
const TOKEN_TTL_SECS: i64 = 900;

struct TestApp {
    store: Arc<MemoryStore>,
    grpc: AuthGrpcService,
    app_id: i32,
}

async fn setup() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let app_id = store.add_app("web", APP_SECRET).await.unwrap();

    let service = Authenticator::with_store(
        store.clone(),
        Arc::new(JwtIssuer::new()),
        Duration::seconds(TOKEN_TTL_SECS),
    );

    TestApp {
        store,
        grpc: AuthGrpcService::new(Arc::new(service)),
        app_id,
    }
}

fn register_request(email: &str, password: &str) -> Request<RegisterRequest> {
    Request::new(RegisterRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

fn login_request(email: &str, password: &str, app_id: i32) -> Request<LoginRequest> {
    Request::new(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
        app_id,
    })
}

#[tokio::test]
async fn test_register_login_scenario() {
    let app = setup().await;

    let user_id = app
        .grpc
        .register(register_request("a@x.com", "pw123"))
        .await
        .unwrap()
        .into_inner()
        .user_id;
    assert_eq!(user_id, 1);

    let token = app
        .grpc
        .login(login_request("a@x.com", "pw123", app.app_id))
        .await
        .unwrap()
        .into_inner()
        .token;
    let claims = decode_token(&token, APP_SECRET.as_bytes()).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.app_id, app.app_id);
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);

    let status = app
        .grpc
        .login(login_request("a@x.com", "wrong", app.app_id))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert_eq!(status.message(), "invalid credentials");

    let status = app
        .grpc
        .register(register_request("a@x.com", "pw456"))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::AlreadyExists);
}

#[tokio::test]
async fn test_register_then_login_round_trips_unusual_credentials() {
    let app = setup().await;
    let long_email = format!("{}@example.com", "l".repeat(200));
    let long_password = "p4ss".repeat(64);

    let cases = [
        ("josé@exämple.com", "pässwörd ☃"),
        (long_email.as_str(), long_password.as_str()),
        (" spaced @x.com ", "  pw with spaces  "),
        ("tab\t@x.com", "\tpw\n"),
    ];

    for (email, password) in cases {
        let user_id = app
            .grpc
            .register(register_request(email, password))
            .await
            .unwrap()
            .into_inner()
            .user_id;

        let token = app
            .grpc
            .login(login_request(email, password, app.app_id))
            .await
            .unwrap()
            .into_inner()
            .token;

        let claims = decode_token(&token, APP_SECRET.as_bytes()).unwrap();
        assert_eq!(claims.sub, user_id, "email {:?}", email);
        assert_eq!(claims.email, email);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_identical() {
    let app = setup().await;
    app.grpc
        .register(register_request("a@x.com", "pw123"))
        .await
        .unwrap();

    let wrong_password = app
        .grpc
        .login(login_request("a@x.com", "nope", app.app_id))
        .await
        .unwrap_err();
    let unknown_email = app
        .grpc
        .login(login_request("ghost@x.com", "pw123", app.app_id))
        .await
        .unwrap_err();

    assert_eq!(wrong_password.code(), unknown_email.code());
    assert_eq!(wrong_password.message(), unknown_email.message());
}

#[tokio::test]
async fn test_concurrent_duplicate_registration_has_one_winner() {
    let app = setup().await;

    let attempts = (0..4).map(|i| {
        app.grpc
            .register(register_request("race@x.com", &format!("pw-{}", i)))
    });
    let results = join_all(attempts).await;

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(status) if status.code() == Code::AlreadyExists))
        .count();
    assert_eq!(successes, 1);
    assert_eq!(conflicts, 3);
}

#[tokio::test]
async fn test_login_unknown_app_is_internal() {
    let app = setup().await;
    app.grpc
        .register(register_request("a@x.com", "pw123"))
        .await
        .unwrap();

    let status = app
        .grpc
        .login(login_request("a@x.com", "pw123", 404))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::Internal);
    assert_eq!(status.message(), "internal error");
}

#[tokio::test]
async fn test_is_admin() {
    let app = setup().await;
    let user_id = app
        .grpc
        .register(register_request("a@x.com", "pw123"))
        .await
        .unwrap()
        .into_inner()
        .user_id;

    let is_admin = |user_id| {
        app.grpc
            .is_admin(Request::new(IsAdminRequest { user_id }))
    };

    assert!(!is_admin(user_id).await.unwrap().into_inner().is_admin);

    app.store.set_admin(user_id, true).await.unwrap();
    assert!(is_admin(user_id).await.unwrap().into_inner().is_admin);

    // Never a silent false for an unknown user
    let status = is_admin(999).await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn test_malformed_requests_rejected() {
    let app = setup().await;

    let status = app
        .grpc
        .register(register_request("", "pw123"))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let status = app
        .grpc
        .login(login_request("a@x.com", "pw123", 0))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let status = app
        .grpc
        .is_admin(Request::new(IsAdminRequest { user_id: 0 }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
}
