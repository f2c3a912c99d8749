//! End-to-end tests of the client core over the reqwest transport.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use freemate_application::ports::{Notifier, SessionStorage};
use freemate_application::{ApiClient, ApiError, AuthError, AuthMode, RegistrationService, TokenStore};
use freemate_domain::{ClientConfig, QueryParams, RegistrationForm, ResponseBody, TokenPair};
use freemate_infrastructure::{MemorySessionStorage, ReqwestTransport, SystemClock, TracingNotifier};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Fixture {
    client: Arc<ApiClient>,
    tokens: Arc<TokenStore>,
    storage: Arc<MemorySessionStorage>,
}

fn fixture(server: &MockServer) -> Fixture {
    let config = Arc::new(ClientConfig::with_base_url(server.uri()));
    let storage = Arc::new(MemorySessionStorage::new());
    let tokens = Arc::new(TokenStore::new(
        &config.token,
        Arc::new(SystemClock::new()),
        storage.clone(),
    ));
    let transport = Arc::new(ReqwestTransport::new().unwrap());
    let client = Arc::new(ApiClient::new(
        config,
        transport,
        tokens.clone(),
        Arc::new(TracingNotifier),
    ));
    Fixture {
        client,
        tokens,
        storage,
    }
}

#[tokio::test]
async fn get_sends_encoded_query_and_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("a", "1"))
        .and(query_param("b", "2 "))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let fixture = fixture(&server);
    let params = QueryParams::new().with("a", "1").with("b", "2 ");

    let body = fixture
        .client
        .get("/api/search", &params, AuthMode::Anonymous)
        .await
        .unwrap();

    assert_eq!(body, ResponseBody::Json(json!({"hits": 2})));
}

#[tokio::test]
async fn unauthorized_request_is_refreshed_and_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "ACCESS_TOKEN_EXPIRED"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refreshToken": "refresh-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nickname": "Neo"})))
        .expect(1)
        .mount(&server)
        .await;

    let fixture = fixture(&server);
    fixture
        .tokens
        .save(TokenPair::new("stale", "refresh-1"), "Neo")
        .await;

    let body = fixture
        .client
        .get("/api/profile", &QueryParams::new(), AuthMode::Required)
        .await
        .unwrap();

    assert_eq!(body.str_field("nickname"), Some("Neo"));
    assert_eq!(fixture.tokens.access_token().await.as_deref(), Some("fresh"));
    assert_eq!(fixture.tokens.refresh_token().await.as_deref(), Some("refresh-1"));
}

#[tokio::test]
async fn simultaneous_unauthorized_requests_share_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1..=3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .and(body_json(json!({"refreshToken": "refresh-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nickname": "Neo"})))
        .expect(3)
        .mount(&server)
        .await;

    let fixture = fixture(&server);
    fixture
        .tokens
        .save(TokenPair::new("stale", "refresh-1"), "Neo")
        .await;

    let params = QueryParams::new();
    let (first, second, third) = tokio::join!(
        fixture.client.get("/api/profile", &params, AuthMode::Required),
        fixture.client.get("/api/profile", &params, AuthMode::Required),
        fixture.client.get("/api/profile", &params, AuthMode::Required),
    );

    for body in [first, second, third] {
        assert_eq!(body.unwrap().str_field("nickname"), Some("Neo"));
    }
    assert_eq!(fixture.tokens.access_token().await.as_deref(), Some("fresh"));

    let refreshes = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.url.path() == "/api/auth/refresh")
        .count();
    assert_eq!(refreshes, 1);
}

#[tokio::test]
async fn rejected_refresh_logs_the_user_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "REFRESH_TOKEN_EXPIRED"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fixture = fixture(&server);
    fixture
        .tokens
        .save(TokenPair::new("stale", "refresh-1"), "Neo")
        .await;

    let error = fixture
        .client
        .get("/api/profile", &QueryParams::new(), AuthMode::Required)
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Auth(AuthError::RefreshFailed(_))));
    assert!(!fixture.tokens.is_valid().await);
    assert_eq!(fixture.storage.get("userNickname"), None);
}

#[tokio::test]
async fn register_posts_normalized_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let fixture = fixture(&server);
    let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);
    let service = RegistrationService::new(
        fixture.client.clone(),
        notifier,
        Arc::new(SystemClock::new()),
        fixture.storage.clone(),
    );

    let body = service
        .register(RegistrationForm {
            username: "neo".to_string(),
            password: "secret1".to_string(),
            nickname: "Neo".to_string(),
            email: "neo@example.com".to_string(),
            gender: "male".to_string(),
            birth_year: 2000,
        })
        .await
        .unwrap();
    assert_eq!(body.as_json(), Some(&json!({"id": 42})));

    let requests = server.received_requests().await.unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent["gender"], "MALE");
    assert!(sent["age"].as_i64().unwrap() >= 24);
}

#[tokio::test]
async fn username_check_fails_closed_when_server_is_down() {
    let server = MockServer::start().await;
    let fixture = fixture(&server);
    drop(server);

    let service = RegistrationService::new(
        fixture.client.clone(),
        Arc::new(TracingNotifier),
        Arc::new(SystemClock::new()),
        fixture.storage.clone(),
    );

    assert!(service.check_username_duplicate("neo").await);
}
