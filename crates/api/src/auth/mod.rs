//! Bearer token verification primitives.
//!
//! - [`claims`] -- the claim set carried by accepted tokens.
//! - [`jwks`] -- verification against a remote JSON Web Key Set.

pub mod claims;
pub mod jwks;

pub use claims::{Audience, TokenClaims};
pub use jwks::JwksVerifier;

use async_trait::async_trait;

/// Why a bearer token was rejected.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingToken,

    #[error("Authorization header is not a bearer token")]
    MalformedHeader,

    #[error("Token header is missing a key id")]
    MissingKeyId,

    #[error("No signing key matches the token key id")]
    UnknownKeyId,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Failed to fetch signing keys: {0}")]
    KeyFetch(String),

    #[error("Signing key fetches are rate limited")]
    RateLimited,

    #[error("Token validation failed: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("Token verification is not configured")]
    NotConfigured,
}

/// Verifies bearer tokens and yields their claims.
///
/// The production implementation is [`JwksVerifier`]; tests substitute
/// their own.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;
}
