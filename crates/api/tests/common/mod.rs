#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bookshelf_api::auth::{AuthError, TokenClaims, TokenVerifier};
use bookshelf_api::config::{AuthConfig, AuthMode, DatabaseConfig, ServerConfig};
use bookshelf_api::router::build_app_router;
use bookshelf_api::state::AppState;
use bookshelf_db::repositories::MemoryBookStore;
use bookshelf_db::BookStore;

/// Build a test `ServerConfig` with safe defaults and the given auth
/// section.
pub fn test_config(auth: Option<AuthConfig>) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        database: DatabaseConfig {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            username: "postgres".to_string(),
            password: None,
            database: "books".to_string(),
        },
        auth,
    }
}

/// Auth section enabling the given mode. The domain is never contacted;
/// tests substitute [`StaticTokenVerifier`] for the real one.
pub fn test_auth_config(mode: AuthMode) -> AuthConfig {
    AuthConfig {
        domain: "https://tenant.eu.auth0.com".to_string(),
        audience: "https://books.example.com".to_string(),
        mode,
        jwks_fetch_timeout_secs: 5,
        jwks_cache_ttl_secs: 600,
    }
}

/// Verifier accepting exactly one known token, for exercising gated
/// routes without a key server.
pub struct StaticTokenVerifier {
    token: String,
}

impl StaticTokenVerifier {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        if token == self.token {
            Ok(TokenClaims {
                iss: "https://tenant.eu.auth0.com/".to_string(),
                sub: "auth0|test-user".to_string(),
                aud: None,
                scope: None,
                exp: 2_000_000_000,
                iat: None,
            })
        } else {
            Err(AuthError::Invalid(
                jsonwebtoken::errors::ErrorKind::InvalidSignature.into(),
            ))
        }
    }
}

/// Build the full application router backed by a fresh in-memory store,
/// with every route open.
///
/// This goes through [`build_app_router`] so integration tests exercise
/// the same middleware stack that production uses. The returned router
/// is `Clone`; requests against clones share the store.
pub fn build_test_app() -> Router {
    build_app_with_store(Arc::new(MemoryBookStore::default()))
}

/// Build the app around an arbitrary store implementation.
pub fn build_app_with_store(store: Arc<dyn BookStore>) -> Router {
    let config = test_config(None);
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        verifier: None,
    };
    build_app_router(state, &config)
}

/// Build the app with the given auth mode and a verifier accepting
/// exactly `token`.
pub fn build_gated_app(mode: AuthMode, token: &str) -> Router {
    let config = test_config(Some(test_auth_config(mode)));
    let state = AppState {
        store: Arc::new(MemoryBookStore::default()),
        config: Arc::new(config.clone()),
        verifier: Some(Arc::new(StaticTokenVerifier::new(token))),
    };
    build_app_router(state, &config)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    json: Option<serde_json::Value>,
    bearer: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match json {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, None, Some(token)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_as(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, Method::POST, uri, Some(body), Some(token)).await
}

/// POST an urlencoded form body.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PUT, uri, Some(body), None).await
}

pub async fn put_json_as(app: Router, uri: &str, body: serde_json::Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(body), Some(token)).await
}

/// PUT with no body at all.
pub async fn put_empty(app: Router, uri: &str) -> Response {
    send(app, Method::PUT, uri, None, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None, None).await
}

pub async fn delete_as(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, None, Some(token)).await
}

/// Parse the response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read the response body as text.
pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
