//! Access token issuing.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use domain::{App, DomainError, DomainResult, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub email: String,
    pub app_id: i32,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Claims for `user` on `app`, valid for `ttl` from `issued_at` (unix seconds).
    pub fn new(user: &User, app: &App, issued_at: i64, ttl: Duration) -> Self {
        Self {
            sub: user.id,
            email: user.email.clone(),
            app_id: app.id,
            iat: issued_at,
            exp: issued_at + ttl.num_seconds(),
        }
    }
}

/// Produces signed, time-limited tokens.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> DomainResult<String>;
}

/// HS256 JWT issuer keyed by each application's own secret.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtIssuer;

impl JwtIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue(&self, user: &User, app: &App, ttl: Duration) -> DomainResult<String> {
        if app.secret.is_empty() {
            return Err(DomainError::internal(format!(
                "app {} has an empty signing secret",
                app.id
            )));
        }

        let claims = Claims::new(user, app, Utc::now().timestamp(), ttl);

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(app.secret_bytes()),
        )
        .map_err(|e| DomainError::internal(format!("token signing failed: {}", e)))
    }
}

/// Verify a token's signature and expiry with `secret` and return its claims.
pub fn decode_token(token: &str, secret: &[u8]) -> DomainResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|e| DomainError::validation(format!("invalid token: {}", e)))?;

    Ok(token_data.claims)
}
