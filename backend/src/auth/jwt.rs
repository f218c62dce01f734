//! JWT minting and verification
//!
//! Tokens are HS256-signed and carry the user's email as `sub`. Expiry is
//! checked here rather than by `jsonwebtoken` so that the clock can be
//! supplied by the caller and so an expired-but-authentic token can still
//! be matched against the blacklist.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use users_service_shared::TokenError;
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Unique token id, keeps tokens minted in the same second distinct
    #[serde(default)]
    pub jti: String,
}

impl Claims {
    /// A token is usable up to and including its `exp` second.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }
}

/// Pre-computed JWT keys
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token codec shared through `AppState`
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    expiry_secs: i64,
    validation: Arc<Validation>,
}

impl JwtService {
    /// Create a codec for the given secret and token lifetime
    ///
    /// Call once at startup; keys are derived here.
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = ["exp", "sub"].iter().map(|c| c.to_string()).collect();

        Self {
            keys: JwtKeys::new(secret),
            expiry_secs,
            validation: Arc::new(validation),
        }
    }

    /// Mint a token for `identity` expiring `expiry_secs` from now
    pub fn mint(&self, identity: &str) -> Result<String> {
        self.mint_at(identity, Utc::now())
    }

    /// Mint a token as if issued at `now`
    pub fn mint_at(&self, identity: &str, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            sub: identity.to_string(),
            exp: (now + Duration::seconds(self.expiry_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to mint token: {}", e))
    }

    /// Check structure and signature only; expiry is left to the caller
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Malformed,
            })
    }

    /// Full verification against the current clock
    #[inline]
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Full verification, returning the embedded identity
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = self.decode(token)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(claims.sub)
    }

    #[inline]
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }
}

/// Decide whether decoded claims still grant access
///
/// A blacklisted token is reported as such whether or not it has also
/// expired.
pub fn check_live(claims: Claims, blacklisted: bool, now: DateTime<Utc>) -> Result<Claims, TokenError> {
    if blacklisted {
        return Err(TokenError::Blacklisted);
    }
    if claims.is_expired_at(now) {
        return Err(TokenError::Expired);
    }
    Ok(claims)
}
