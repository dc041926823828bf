//! Token verification against a remote JSON Web Key Set.
//!
//! Signing keys are fetched from the issuer's well-known JWKS document
//! and cached with a TTL. An unknown key id triggers a refetch so
//! rotated keys are picked up without a restart. Fetches are budgeted
//! per minute to keep a flood of bad tokens from hammering the issuer.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use tokio::sync::Mutex;

use crate::auth::{AuthError, TokenClaims, TokenVerifier};
use crate::config::AuthConfig;

/// How many JWKS fetches are allowed per window.
const FETCHES_PER_WINDOW: u32 = 5;

/// The fixed window over which fetches are budgeted.
const FETCH_WINDOW: Duration = Duration::from_secs(60);

/// Fixed-window budget for JWKS fetches.
#[derive(Debug)]
struct FetchBudget {
    window_started: Option<Instant>,
    used: u32,
}

impl FetchBudget {
    fn new() -> Self {
        Self {
            window_started: None,
            used: 0,
        }
    }

    /// Take one fetch from the budget, rolling the window once it lapses.
    fn try_take(&mut self, now: Instant) -> bool {
        match self.window_started {
            Some(started) if now.duration_since(started) < FETCH_WINDOW => {
                if self.used < FETCHES_PER_WINDOW {
                    self.used += 1;
                    true
                } else {
                    false
                }
            }
            _ => {
                self.window_started = Some(now);
                self.used = 1;
                true
            }
        }
    }
}

/// kid -> decoding key map plus fetch bookkeeping.
struct KeyCache {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Option<Instant>,
    budget: FetchBudget,
}

/// Verifies RS256 bearer tokens against the issuer's JWKS document.
pub struct JwksVerifier {
    jwks_uri: String,
    issuer: String,
    audience: String,
    cache_ttl: Duration,
    client: reqwest::Client,
    cache: Mutex<KeyCache>,
}

impl JwksVerifier {
    /// Build a verifier from the auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.jwks_fetch_timeout_secs))
            .build()?;

        Ok(Self {
            jwks_uri: config.jwks_uri(),
            issuer: config.issuer(),
            audience: config.audience.clone(),
            cache_ttl: Duration::from_secs(config.jwks_cache_ttl_secs),
            client,
            cache: Mutex::new(KeyCache {
                keys: HashMap::new(),
                fetched_at: None,
                budget: FetchBudget::new(),
            }),
        })
    }

    /// Look up the decoding key for `kid`, refetching the key set when
    /// the cache is stale or the kid is unknown.
    ///
    /// A failed refetch falls back to whatever keys are cached, so a
    /// briefly unreachable issuer does not take the API down with it.
    async fn key_for(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let mut cache = self.cache.lock().await;
        let now = Instant::now();

        let fresh = cache
            .fetched_at
            .is_some_and(|at| now.duration_since(at) < self.cache_ttl);
        if fresh {
            if let Some(key) = cache.keys.get(kid) {
                return Ok(key.clone());
            }
        }

        if cache.budget.try_take(now) {
            // Holding the lock across the fetch serializes refreshes, so
            // a burst of requests costs one fetch, not one each.
            match self.fetch_keys().await {
                Ok(keys) => {
                    cache.keys = keys;
                    cache.fetched_at = Some(now);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "JWKS fetch failed, keeping cached keys");
                }
            }
        } else if cache.keys.is_empty() {
            return Err(AuthError::RateLimited);
        } else {
            tracing::debug!("JWKS fetch budget exhausted, serving cached keys");
        }

        cache.keys.get(kid).cloned().ok_or(AuthError::UnknownKeyId)
    }

    async fn fetch_keys(&self) -> Result<HashMap<String, DecodingKey>, AuthError> {
        let jwks: JwkSet = self
            .client
            .get(&self.jwks_uri)
            .send()
            .await
            .map_err(|err| AuthError::KeyFetch(err.to_string()))?
            .error_for_status()
            .map_err(|err| AuthError::KeyFetch(err.to_string()))?
            .json()
            .await
            .map_err(|err| AuthError::KeyFetch(err.to_string()))?;

        Ok(parse_keys(&jwks))
    }
}

/// Extract usable decoding keys from a key set.
///
/// Keeps RSA keys that carry a kid; everything else is skipped, since
/// tokens are only ever accepted with RS256 signatures.
fn parse_keys(jwks: &JwkSet) -> HashMap<String, DecodingKey> {
    let mut keys = HashMap::new();

    for jwk in &jwks.keys {
        if !matches!(jwk.algorithm, AlgorithmParameters::RSA(_)) {
            continue;
        }
        let Some(kid) = &jwk.common.key_id else {
            continue;
        };
        match DecodingKey::from_jwk(jwk) {
            Ok(key) => {
                keys.insert(kid.clone(), key);
            }
            Err(err) => {
                tracing::warn!(kid = %kid, error = %err, "Skipping unusable JWKS key");
            }
        }
    }

    keys
}

#[async_trait]
impl TokenVerifier for JwksVerifier {
    async fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let header = decode_header(token)?;

        if header.alg != Algorithm::RS256 {
            return Err(AuthError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
        }
        let kid = header.kid.ok_or(AuthError::MissingKeyId)?;

        let key = self.key_for(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let data = decode::<TokenClaims>(token, &key, &validation)?;
        Ok(data.claims)
    }
}
