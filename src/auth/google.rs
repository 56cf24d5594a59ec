//! Google ID token validation through the tokeninfo endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::ApiError;

/// Identity claims extracted from a token that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedIdentity {
    pub email: String,
    pub email_verified: bool,
    pub name: Option<String>,
}

/// Validates an opaque ID token and returns who it belongs to.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Fails with `MalformedRequest` for a blank token before any I/O,
    /// `AuthenticationFailure` for a rejected or unverified token and
    /// `Transport` when the introspection endpoint cannot be reached.
    async fn validate(&self, id_token: &str) -> Result<VerifiedIdentity, ApiError>;
}

/// Calls `GET <tokeninfo_url>?id_token=<token>` once per validation. No retry, no caching.
#[derive(Debug, Clone)]
pub struct GoogleTokenInfo {
    client: Client,
    tokeninfo_url: String,
}

impl GoogleTokenInfo {
    pub fn new(tokeninfo_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, tokeninfo_url))
    }

    pub fn with_client(client: Client, tokeninfo_url: impl Into<String>) -> Self {
        Self {
            client,
            tokeninfo_url: tokeninfo_url.into(),
        }
    }
}

#[async_trait]
impl TokenVerifier for GoogleTokenInfo {
    async fn validate(&self, id_token: &str) -> Result<VerifiedIdentity, ApiError> {
        if id_token.trim().is_empty() {
            return Err(ApiError::MalformedRequest("Missing idToken".to_string()));
        }

        info!(url = %self.tokeninfo_url, "Validating Google ID token");

        let resp = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            // The request URL carries the token; keep it out of the error.
            .map_err(|e| ApiError::transport(e.without_url()))?;

        let status = resp.status();
        info!(status = status.as_u16(), "Google tokeninfo responded");

        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Invalid ID token response");
            return Err(ApiError::AuthenticationFailure("Invalid ID token".to_string()));
        }

        let claims: TokenInfo = resp
            .json()
            .await
            .map_err(|e| ApiError::transport(e.without_url()))?;
        claims.into_identity()
    }
}

/// The subset of the tokeninfo payload we read.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    email: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    email_verified: bool,
    name: Option<String>,
}

impl TokenInfo {
    fn into_identity(self) -> Result<VerifiedIdentity, ApiError> {
        let email = self
            .email
            .filter(|e| !e.trim().is_empty())
            .filter(|_| self.email_verified)
            .ok_or_else(|| {
                ApiError::AuthenticationFailure("Unverified or missing email".to_string())
            })?;

        Ok(VerifiedIdentity {
            email,
            email_verified: true,
            name: self.name.filter(|n| !n.trim().is_empty()),
        })
    }
}

/// Google sends `"true"` as a string; accept real booleans too.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, HttpServer, web};
    use serde_json::json;
    use std::collections::HashMap;
    use std::net::TcpListener;

    fn parse(payload: Value) -> Result<VerifiedIdentity, ApiError> {
        serde_json::from_value::<TokenInfo>(payload)
            .unwrap()
            .into_identity()
    }

    async fn fake_tokeninfo(query: web::Query<HashMap<String, String>>) -> HttpResponse {
        match query.get("id_token").map(String::as_str) {
            Some("good-token") => HttpResponse::Ok().json(json!({
                "email": "alice@example.com",
                "email_verified": "true",
                "name": "Alice Johnson"
            })),
            Some("unverified-token") => HttpResponse::Ok().json(json!({
                "email": "mallory@example.com",
                "email_verified": "false"
            })),
            Some("garbled-token") => HttpResponse::Ok().body("not json"),
            _ => HttpResponse::BadRequest().json(json!({
                "error": "invalid_token",
                "error_description": "Invalid Value"
            })),
        }
    }

    /// Serves the fake tokeninfo endpoint on an ephemeral port.
    fn spawn_tokeninfo() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = HttpServer::new(|| {
            App::new().route("/tokeninfo", web::get().to(fake_tokeninfo))
        })
        .workers(1)
        .listen(listener)
        .unwrap()
        .run();
        actix_web::rt::spawn(server);
        format!("http://{addr}/tokeninfo")
    }

    fn validator(url: String) -> GoogleTokenInfo {
        GoogleTokenInfo::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn verified_string_flag_is_accepted() {
        let identity = parse(json!({
            "email": "alice@example.com",
            "email_verified": "true",
            "name": "Alice Johnson"
        }))
        .unwrap();

        assert_eq!(identity.email, "alice@example.com");
        assert!(identity.email_verified);
        assert_eq!(identity.name.as_deref(), Some("Alice Johnson"));
    }

    #[test]
    fn verified_bool_flag_is_accepted() {
        let identity = parse(json!({"email": "bob@example.com", "email_verified": true})).unwrap();
        assert_eq!(identity.name, None);
    }

    #[test]
    fn unverified_or_missing_email_is_rejected() {
        for payload in [
            json!({"email": "a@example.com", "email_verified": "false"}),
            json!({"email": "a@example.com"}),
            json!({"email_verified": "true", "name": "No Mail"}),
            json!({"email": "", "email_verified": true}),
        ] {
            assert!(matches!(parse(payload), Err(ApiError::AuthenticationFailure(_))));
        }
    }

    #[actix_web::test]
    async fn blank_token_fails_before_any_request() {
        // Nothing listens here; reaching the network would surface as Transport.
        let v = validator("http://127.0.0.1:1/tokeninfo".to_string());

        assert!(matches!(v.validate("").await, Err(ApiError::MalformedRequest(_))));
        assert!(matches!(v.validate("   ").await, Err(ApiError::MalformedRequest(_))));
    }

    #[actix_web::test]
    async fn good_token_yields_identity() {
        let v = validator(spawn_tokeninfo());

        let identity = v.validate("good-token").await.unwrap();

        assert_eq!(identity.email, "alice@example.com");
        assert_eq!(identity.name.as_deref(), Some("Alice Johnson"));
    }

    #[actix_web::test]
    async fn non_200_is_authentication_failure() {
        let v = validator(spawn_tokeninfo());
        assert!(matches!(
            v.validate("expired-token").await,
            Err(ApiError::AuthenticationFailure(_))
        ));
    }

    #[actix_web::test]
    async fn unverified_email_is_authentication_failure() {
        let v = validator(spawn_tokeninfo());
        assert!(matches!(
            v.validate("unverified-token").await,
            Err(ApiError::AuthenticationFailure(_))
        ));
    }

    #[actix_web::test]
    async fn undecodable_body_is_transport_failure() {
        let v = validator(spawn_tokeninfo());
        assert!(matches!(v.validate("garbled-token").await, Err(ApiError::Transport(_))));
    }

    #[actix_web::test]
    async fn transport_error_does_not_carry_the_token() {
        let v = validator("http://127.0.0.1:1/tokeninfo".to_string());

        let err = v.validate("SECRET-ID-TOKEN").await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
        assert!(!err.to_string().contains("SECRET-ID-TOKEN"));
    }

    #[actix_web::test]
    async fn decode_error_does_not_carry_the_token() {
        let v = validator(spawn_tokeninfo());

        let err = v.validate("garbled-token").await.unwrap_err();

        assert!(!err.to_string().contains("garbled-token"));
    }

    #[actix_web::test]
    async fn unreachable_endpoint_is_transport_failure() {
        let v = validator("http://127.0.0.1:1/tokeninfo".to_string());
        assert!(matches!(v.validate("good-token").await, Err(ApiError::Transport(_))));
    }
}
