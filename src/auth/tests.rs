//! Tests for the token provider

use super::*;
use crate::config::{ApiConfig, AuthConfig, DEFAULT_AUDIENCE};
use crate::error::Error;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials_config(token_url: String) -> ApiConfig {
    ApiConfig::new(
        "42",
        AuthConfig::ClientCredentials {
            client_id: "cid".to_string(),
            client_secret: "cs".to_string(),
            audience: DEFAULT_AUDIENCE.to_string(),
        },
    )
    .with_token_url(token_url)
}

#[tokio::test]
async fn test_bearer_mode_passes_token_through() {
    // No server: bearer mode must not touch the network
    let config = ApiConfig::new(
        "42",
        AuthConfig::Bearer {
            token: "preset-token".to_string(),
        },
    );
    let provider = TokenProvider::new(&config);

    let token = provider.bearer_token().await.unwrap();
    assert_eq!(token, "preset-token");
}

#[tokio::test]
async fn test_exchange_posts_credentials_and_audience() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_json(serde_json::json!({
            "client_id": "cid",
            "client_secret": "cs",
            "audience": "api://customer-api",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "abc123",
            "token_type": "Bearer",
        })))
        .mount(&server)
        .await;

    let config = credentials_config(format!("{}/oauth/token", server.uri()));
    let provider = TokenProvider::new(&config);

    let token = provider.bearer_token().await.unwrap();
    assert_eq!(token, "abc123");
}

#[tokio::test]
async fn test_token_is_cached_for_provider_lifetime() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "once",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = credentials_config(format!("{}/oauth/token", server.uri()));
    let provider = TokenProvider::new(&config);

    assert_eq!(provider.bearer_token().await.unwrap(), "once");
    assert_eq!(provider.bearer_token().await.unwrap(), "once");
}

#[tokio::test]
async fn test_clear_cache_forces_new_exchange() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "fresh",
        })))
        .expect(2)
        .mount(&server)
        .await;

    let config = credentials_config(format!("{}/oauth/token", server.uri()));
    let provider = TokenProvider::new(&config);

    provider.bearer_token().await.unwrap();
    provider.clear_cache().await;
    provider.bearer_token().await.unwrap();
}

#[tokio::test]
async fn test_exchange_failure_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let config = credentials_config(format!("{}/oauth/token", server.uri()));
    let provider = TokenProvider::new(&config);

    let err = provider.bearer_token().await.unwrap_err();
    match err {
        Error::TokenExchange { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "bad credentials");
        }
        other => panic!("expected TokenExchange, got {other}"),
    }
}

#[tokio::test]
async fn test_missing_access_token_field() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "Bearer",
        })))
        .mount(&server)
        .await;

    let config = credentials_config(format!("{}/oauth/token", server.uri()));
    let provider = TokenProvider::new(&config);

    let err = provider.bearer_token().await.unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
}
