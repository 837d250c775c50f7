//! JWT utilities for authentication
//!
//! Access tokens are HS256 JWTs carrying the member id as subject.
//! Refresh tokens are opaque and live in the database (see [`super::generate_refresh_token`]).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use roster_core::MemberId;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (member ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Get the member ID from the subject
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid member id
    pub fn member_id(&self) -> Result<MemberId, AppError> {
        MemberId::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }
}

/// A freshly signed access token
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// JWT service for encoding and decoding access tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and access token lifetime (seconds)
    ///
    /// # Errors
    /// Returns `AppError::Config` if the secret is empty
    pub fn new(secret: &str, access_token_expiry: i64) -> Result<Self, AppError> {
        if secret.trim().is_empty() {
            return Err(AppError::Config("JWT secret must not be empty".to_string()));
        }
        if access_token_expiry <= 0 {
            return Err(AppError::Config(
                "access token lifetime must be positive".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        })
    }

    /// Access token lifetime in seconds
    #[must_use]
    pub fn access_token_expiry(&self) -> i64 {
        self.access_token_expiry
    }

    /// Issue an access token for a member
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(&self, member_id: MemberId) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: member_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode JWT: {e}")))?;

        Ok(AccessToken {
            token,
            expires_in: self.access_token_expiry,
        })
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns `TokenExpired` for an expired token and `InvalidToken` for anything else
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validate an access token and return the member it was issued to
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn validate_access_token(&self, token: &str) -> Result<MemberId, AppError> {
        self.decode_token(token)?.member_id()
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}
