//! Signed bearer-token issuance (HS256 JWT)

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Subject (account email)
    pub sub: String,
    /// Account identifier (UUID string)
    pub id: String,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Expiration time (unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    pub fn new(email: String, account_id: String, validity: Duration) -> Self {
        let now = Utc::now();
        let exp = now + validity;

        Self {
            sub: email,
            id: account_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// Signing failure while minting a token
    #[error("Token encoding error: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,
}

/// Issues and decodes HS256 access tokens.
///
/// Constructed once at startup from the process-wide signing secret. Decoding
/// is not wired to any HTTP endpoint; token validity is purely computable by
/// any holder of the secret.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Mint a signed token for the given account, valid for `validity`.
    pub fn issue(
        &self,
        email: &str,
        account_id: &str,
        validity: Duration,
    ) -> Result<String, TokenError> {
        let claims = AccessClaims::new(email.to_string(), account_id.to_string(), validity);
        let header = Header::new(Algorithm::HS256);

        Ok(encode(&header, &claims, &self.encoding_key)?)
    }

    /// Check signature and expiry, returning the embedded claims.
    pub fn decode(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken,
            })?;

        if token_data.claims.is_expired() {
            return Err(TokenError::TokenExpired);
        }

        Ok(token_data.claims)
    }
}
