use serde::{Deserialize, Serialize};

/// The `aud` claim, which issuers encode either as a single string or
/// as an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Many(Vec<String>),
}

/// Claims carried by an accepted bearer token.
///
/// Inserted into request extensions by the auth middleware so handlers
/// can read the caller's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Token issuer.
    pub iss: String,
    /// Subject (the caller's identity).
    pub sub: String,
    /// Intended audience(s).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    /// Space-separated OAuth scopes, when the issuer grants any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Expiry as a Unix timestamp. Checked during verification.
    pub exp: i64,
    /// Issued-at as a Unix timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}
