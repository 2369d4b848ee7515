use async_trait::async_trait;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user id
    pub email: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

pub struct AuthService;

impl AuthService {
    /// Generate a session token for a user
    pub fn generate_token(user_id: Uuid, email: &str, config: &Config) -> AppResult<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + Duration::hours(config.jwt_expiration_hours);

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            exp: exp.unix_timestamp(),
            iat: now.unix_timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(token)
    }

    /// Verify and decode a session token
    pub fn verify_token(token: &str, config: &Config) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// Identity verified by the external provider
#[derive(Debug, Clone)]
pub struct ExternalIdentity {
    pub subject: String,
    pub email: String,
}

/// Credential verification seam; the live implementation calls Google,
/// tests substitute their own
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify_credential(&self, credential: &str) -> AppResult<ExternalIdentity>;
}

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Verifies Google sign-in credentials against the tokeninfo endpoint
pub struct GoogleIdentityProvider {
    http: reqwest::Client,
    client_id: String,
}

impl GoogleIdentityProvider {
    pub fn new(client_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    sub: String,
    email: String,
    aud: String,
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    async fn verify_credential(&self, credential: &str) -> AppResult<ExternalIdentity> {
        let response = self
            .http
            .get(TOKENINFO_URL)
            .query(&[("id_token", credential)])
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Token verification failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::InvalidCredentials);
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|_| AppError::InvalidCredentials)?;

        // The credential must have been issued for this application
        if info.aud != self.client_id {
            return Err(AppError::InvalidCredentials);
        }

        Ok(ExternalIdentity {
            subject: info.sub,
            email: info.email,
        })
    }
}
