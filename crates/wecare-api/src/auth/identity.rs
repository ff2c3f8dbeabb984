// Identity provider client
//
// Token verification is delegated to the provider's tokeninfo endpoint; the
// service never validates signatures locally. The guard treats every failure
// the same, so the error variants here exist for logging, not for the wire.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::config::IdentityCredentials;

/// Timeout for a verification round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Verification endpoint used when the credential file does not name one.
pub const DEFAULT_VERIFY_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("unauthorized: invalid or expired token")]
    Unauthorized,

    #[error("verification timed out after {0:?}")]
    Timeout(Duration),

    #[error("identity provider unreachable: {0}")]
    Unavailable(String),

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("client configuration error: {0}")]
    Configuration(String),
}

/// Claims the service consumes from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub email: String,
}

/// Seam between the authentication guard and the identity provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<TokenIdentity, IdentityError>;
}

/// Claim subset of the provider's tokeninfo response.
#[derive(Debug, Deserialize)]
struct TokeninfoResponse {
    aud: String,
    email: Option<String>,
}

/// Production verifier backed by the provider's tokeninfo endpoint.
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    http_client: Client,
    verify_url: String,
    project_id: String,
}

impl HttpVerifier {
    pub fn new(credentials: &IdentityCredentials) -> Result<Self, IdentityError> {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                IdentityError::Configuration(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            http_client,
            verify_url: credentials
                .verify_url
                .clone()
                .unwrap_or_else(|| DEFAULT_VERIFY_URL.to_string()),
            project_id: credentials.project_id.clone(),
        })
    }
}

#[async_trait]
impl IdentityVerifier for HttpVerifier {
    async fn verify(&self, token: &str) -> Result<TokenIdentity, IdentityError> {
        let response = self
            .http_client
            .get(&self.verify_url)
            .query(&[("id_token", token)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IdentityError::Timeout(REQUEST_TIMEOUT)
                } else if e.is_connect() {
                    IdentityError::Unavailable(format!("connection failed: {e}"))
                } else {
                    IdentityError::Unavailable(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();

        // The provider answers 400 or 401 for expired and forged tokens.
        if status == reqwest::StatusCode::BAD_REQUEST
            || status == reqwest::StatusCode::UNAUTHORIZED
        {
            tracing::debug!("token rejected by identity provider");
            return Err(IdentityError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "unexpected response from identity provider");
            return Err(IdentityError::InvalidResponse(format!(
                "unexpected status {status}"
            )));
        }

        let claims: TokeninfoResponse = response
            .json()
            .await
            .map_err(|e| IdentityError::InvalidResponse(format!("failed to parse claims: {e}")))?;

        if claims.aud != self.project_id {
            tracing::debug!(aud = %claims.aud, "token audience does not match project");
            return Err(IdentityError::Unauthorized);
        }

        // A principal without an email claim is unusable downstream.
        claims
            .email
            .map(|email| TokenIdentity { email })
            .ok_or(IdentityError::Unauthorized)
    }
}

/// Development verifier enabled by `WECARE_UNSAFE_NO_AUTH`: any non-empty
/// token is accepted as a fixed development identity.
#[derive(Debug, Default, Clone)]
pub struct InsecureVerifier;

#[async_trait]
impl IdentityVerifier for InsecureVerifier {
    async fn verify(&self, token: &str) -> Result<TokenIdentity, IdentityError> {
        if token.is_empty() {
            return Err(IdentityError::Unauthorized);
        }
        Ok(TokenIdentity {
            email: "dev@wecare.local".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials(verify_url: String) -> IdentityCredentials {
        IdentityCredentials {
            project_id: "wecare-test".into(),
            verify_url: Some(verify_url),
        }
    }

    fn verifier_for(server: &MockServer) -> HttpVerifier {
        HttpVerifier::new(&credentials(format!("{}/tokeninfo", server.uri()))).unwrap()
    }

    #[tokio::test]
    async fn accepts_token_with_matching_audience() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .and(query_param("id_token", "good-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "aud": "wecare-test",
                "email": "alice@example.com",
            })))
            .mount(&server)
            .await;

        let identity = verifier_for(&server)
            .verify("good-token")
            .await
            .unwrap();
        assert_eq!(identity.email, "alice@example.com");
    }

    #[tokio::test]
    async fn rejected_token_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({ "error": "invalid_token" })),
            )
            .mount(&server)
            .await;

        let err = verifier_for(&server)
            .verify("expired")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::Unauthorized));
    }

    #[tokio::test]
    async fn audience_mismatch_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "aud": "some-other-project",
                "email": "alice@example.com",
            })))
            .mount(&server)
            .await;

        let err = verifier_for(&server)
            .verify("foreign-token")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::Unauthorized));
    }

    #[tokio::test]
    async fn missing_email_claim_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "aud": "wecare-test" })),
            )
            .mount(&server)
            .await;

        let err = verifier_for(&server)
            .verify("emailless")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::Unauthorized));
    }

    #[tokio::test]
    async fn unparseable_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tokeninfo"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = verifier_for(&server)
            .verify("token")
            .await
            .unwrap_err();
        assert!(matches!(err, IdentityError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_unavailable() {
        // Discard port; nothing listens there.
        let verifier =
            HttpVerifier::new(&credentials("http://127.0.0.1:9/tokeninfo".into())).unwrap();
        let err = verifier.verify("token").await.unwrap_err();
        assert!(matches!(
            err,
            IdentityError::Unavailable(_) | IdentityError::Timeout(_)
        ));
    }

    #[tokio::test]
    async fn insecure_verifier_accepts_any_token() {
        let identity = InsecureVerifier.verify("anything").await.unwrap();
        assert_eq!(identity.email, "dev@wecare.local");
        assert!(InsecureVerifier.verify("").await.is_err());
    }
}
