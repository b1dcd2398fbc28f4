//! # Bearer Identity
//!
//! JWT validation and the identity extractors handlers use.
//!
//! The identity provider lives outside this service; all the API does is
//! verify the token signature and read the subject claim. Two extractors
//! cover the two auth postures the surface has:
//!
//! - [`AuthUser`] - rejects with 401 when there is no valid identity
//! - [`MaybeAuthUser`] - degrades to `None`, for reads that return empty
//!   results to anonymous callers instead of failing

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Verifies bearer tokens and mints development tokens.
#[derive(Debug, Clone)]
pub struct TokenManager {
    secret: String,
}

impl TokenManager {
    /// Creates a new token manager with the given signing secret.
    pub fn new(secret: impl Into<String>) -> Self {
        TokenManager {
            secret: secret.into(),
        }
    }

    /// Issues a token for a user id. Used by tests and local tooling; in
    /// production tokens come from the identity provider.
    pub fn issue(&self, user_id: &str) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| ApiError::internal(format!("Failed to issue token: {}", e)))
    }

    /// Validates a token and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| ApiError::not_authenticated())?;

        Ok(data.claims)
    }
}

// =============================================================================
// Extractors
// =============================================================================

/// The authenticated caller. Extraction fails with 401 when the
/// Authorization header is missing or the token does not verify.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// An optional caller identity. Anonymous or invalid-token requests
/// extract as `None` instead of failing.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(ApiError::not_authenticated)?;
        let claims = state.tokens.verify(token)?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = match bearer_token(parts) {
            Some(token) => state
                .tokens
                .verify(token)
                .ok()
                .map(|claims| AuthUser {
                    user_id: claims.sub,
                }),
            None => None,
        };

        Ok(MaybeAuthUser(user))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify_round_trip() {
        let tokens = TokenManager::new("test-secret");
        let token = tokens.issue("user-1").unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = TokenManager::new("secret-a").issue("user-1").unwrap();

        assert!(TokenManager::new("secret-b").verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let tokens = TokenManager::new("test-secret");
        assert!(tokens.verify("not-a-token").is_err());
    }
}
