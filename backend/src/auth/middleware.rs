//! Bearer token extraction
//!
//! Only the header shape is checked here. Signature, blacklist and expiry
//! checks need the database and happen in `AuthService::authenticate`.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use users_service_shared::TokenError;

const BEARER_PREFIX: &str = "Bearer ";

/// Raw token taken from `Authorization: Bearer <token>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken(pub String);

impl BearerToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Split an `Authorization` header value into its token
///
/// `None` means the header was absent.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, TokenError> {
    let header = header.ok_or(TokenError::MissingToken)?;
    let token = header
        .strip_prefix(BEARER_PREFIX)
        .ok_or(TokenError::Malformed)?;

    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(TokenError::Malformed);
    }
    Ok(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = match parts.headers.get(AUTHORIZATION) {
            None => None,
            // Non-ASCII header bytes cannot form a valid bearer token
            Some(value) => Some(value.to_str().map_err(|_| TokenError::Malformed)?),
        };

        let token = parse_bearer(header)?;
        Ok(BearerToken(token.to_string()))
    }
}
