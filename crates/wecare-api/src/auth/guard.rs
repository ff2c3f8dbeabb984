// Authentication guard
//
// Guarded handlers declare a `Principal` argument; public ones simply don't.
// The extractor runs before the body is touched, so a rejected request never
// reaches a handler or the store.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::identity::IdentityVerifier;

/// The authenticated caller, as established from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct Principal {
    pub email: String,
}

/// Fixed rejection body shared by every authentication failure, regardless
/// of cause. The message text is part of the external contract.
pub struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "message": "Unauthorize Access" })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
    Arc<dyn IdentityVerifier>: FromRef<S>,
{
    type Rejection = Unauthorized;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(Unauthorized)?;
        let token = bearer_token(header).ok_or(Unauthorized)?;

        let verifier: Arc<dyn IdentityVerifier> = FromRef::from_ref(state);
        match verifier.verify(token).await {
            Ok(identity) => Ok(Principal {
                email: identity.email,
            }),
            Err(err) => {
                tracing::debug!("token verification failed: {err}");
                Err(Unauthorized)
            }
        }
    }
}

/// Extracts the token from a `<scheme> <token>` header value. The scheme is
/// not validated; only the token portion is used.
fn bearer_token(header: &str) -> Option<&str> {
    let mut parts = header.splitn(2, ' ');
    let _scheme = parts.next()?;
    let token = parts.next()?.trim();
    (!token.is_empty()).then_some(token)
}
