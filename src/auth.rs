//! Bearer-token verification against the configured token table.
//!
//! Session issuance is an external collaborator; the engine only maps a
//! presented credential to a user identity. With no tokens configured the
//! table fails closed (every request is unauthenticated).

use std::collections::HashMap;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use tracing::warn;

use crate::error::EngineError;

/// The authenticated caller of one request.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: String,
}

#[derive(Clone, Default)]
pub struct AuthTokens {
    tokens: HashMap<String, String>,
}

impl AuthTokens {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        if tokens.is_empty() {
            warn!(target: "praxis_backend", "No auth tokens configured; every request will be rejected");
        }
        Self { tokens }
    }

    /// Resolve `Authorization: Bearer <token>` to a principal, or fail with
    /// `Unauthenticated` before any other work happens.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Principal, EngineError> {
        let raw = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(EngineError::Unauthenticated)?;
        let token = raw
            .strip_prefix("Bearer ")
            .ok_or(EngineError::Unauthenticated)?
            .trim();
        self.tokens
            .get(token)
            .map(|user_id| Principal { user_id: user_id.clone() })
            .ok_or(EngineError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn table() -> AuthTokens {
        AuthTokens::new(HashMap::from([("tok-1".to_string(), "user-1".to_string())]))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn known_bearer_token_resolves() {
        let p = table().authenticate(&headers_with("Bearer tok-1")).unwrap();
        assert_eq!(p.user_id, "user-1");
    }

    #[test]
    fn missing_header_is_unauthenticated() {
        let err = table().authenticate(&HeaderMap::new()).unwrap_err();
        assert!(matches!(err, EngineError::Unauthenticated));
    }

    #[test]
    fn unknown_token_and_bad_scheme_are_unauthenticated() {
        assert!(table().authenticate(&headers_with("Bearer nope")).is_err());
        assert!(table().authenticate(&headers_with("Basic tok-1")).is_err());
    }
}
