//! JWT issuance module.
//!
//! Builds HS256-signed JSON Web Tokens that the front-end presents to the
//! administrative backend.
//!
//! # Pre-conditions
//! - The `TokenSettings` were validated (non-empty secret, positive lifetime).
//!
//! # Post-conditions
//! - On success, returns a JWS compact serialization: three base64url
//!   segments without padding, joined by `.`.
//! - The payload carries `iss`, `aud`, `jti`, `iat`, `nbf`, `exp`; the header
//!   carries `typ`, `alg` and a copy of `jti`.
//!
//! # Invariants
//! - Issuance reads the clock once and draws one identifier per token.
//! - `nbf` is always `iat + 60` and `exp` is always `iat + ttl_seconds`.
//! - Nothing is stored; the factory holds no mutable state.

use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use super::sources::{IdSource, RandomIdSource, SystemTimeSource, TimeSource};
use super::token_settings::TokenSettings;
use crate::config::{self, ConfigError};

/// Offset from issuance to the `nbf` claim. The admin backend does not
/// enforce it.
pub const NOT_BEFORE_OFFSET_SECS: i64 = 60;

/// Registered claims carried by every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// This front-end's domain name.
    pub iss: String,
    /// The admin backend's domain name.
    pub aud: String,
    /// Random per-token identifier.
    pub jti: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// A freshly signed token together with the claims inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub claims: Claims,
    /// Compact serialization, ready for an `Authorization: Bearer` header.
    pub token: String,
}

/// Error returned when token issuance fails.
#[derive(Debug)]
pub enum TokenError {
    /// The signing secret or lifetime is missing or invalid.
    Configuration(ConfigError),
    /// The token could not be encoded or signed.
    Signing(String),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "token configuration error: {e}"),
            Self::Signing(reason) => write!(f, "failed to sign token: {reason}"),
        }
    }
}

impl std::error::Error for TokenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(e) => Some(e),
            Self::Signing(_) => None,
        }
    }
}

impl From<ConfigError> for TokenError {
    fn from(e: ConfigError) -> Self {
        Self::Configuration(e)
    }
}

/// Issues one signed token per call.
///
/// Generic over its time and identifier sources so tests can pin both.
///
/// # Thread Safety
///
/// The factory is `Send + Sync` whenever its sources are, and issuing takes
/// `&self`, so one instance can be shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TokenFactory<T = SystemTimeSource, I = RandomIdSource> {
    settings: TokenSettings,
    time: T,
    ids: I,
}

impl TokenFactory {
    /// Create a factory backed by the system clock and the thread CSPRNG.
    #[must_use]
    pub fn new(settings: TokenSettings) -> Self {
        Self::with_sources(settings, SystemTimeSource, RandomIdSource::default())
    }
}

impl<T: TimeSource, I: IdSource> TokenFactory<T, I> {
    /// Create a factory with explicit time and identifier sources.
    #[must_use]
    pub const fn with_sources(settings: TokenSettings, time: T, ids: I) -> Self {
        Self {
            settings,
            time,
            ids,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Issue a token and return only its compact serialization.
    ///
    /// # Errors
    /// See [`TokenFactory::issue`].
    pub fn issue_token(&self) -> Result<String, TokenError> {
        self.issue().map(|issued| issued.token)
    }

    /// Issue a token, returning the claims alongside the compact string.
    ///
    /// # Errors
    /// Returns `TokenError::Configuration` if `iat + ttl_seconds` overflows,
    /// and `TokenError::Signing` if encoding or keying the MAC fails.
    pub fn issue(&self) -> Result<IssuedToken, TokenError> {
        let now = self.time.now_secs();
        let claims = self.build_claims(now, self.ids.next_id())?;
        let token = encode_hs256(&claims, self.settings.secret())?;

        tracing::debug!(
            "issued token jti={} aud={} exp={}",
            claims.jti,
            claims.aud,
            claims.exp
        );

        Ok(IssuedToken { claims, token })
    }

    fn build_claims(&self, now: i64, jti: String) -> Result<Claims, TokenError> {
        let exp = now
            .checked_add(self.settings.ttl_seconds())
            .ok_or_else(|| ConfigError::InvalidValue {
                name: config::JWT_EXP_SECONDS.to_string(),
                message: format!(
                    "lifetime of {} seconds overflows the expiration time",
                    self.settings.ttl_seconds()
                ),
            })?;
        let nbf = now.saturating_add(NOT_BEFORE_OFFSET_SECS);

        Ok(Claims {
            iss: self.settings.issuer().to_string(),
            aud: self.settings.audience().to_string(),
            jti,
            iat: now,
            nbf,
            exp,
        })
    }
}

/// Sign claims with HS256, replicating `jti` into the JOSE header.
///
/// # Errors
/// Returns `TokenError::Signing` if jsonwebtoken rejects the key or claims.
fn encode_hs256(claims: &Claims, secret: &[u8]) -> Result<String, TokenError> {
    let mut header = Header::new(Algorithm::HS256);
    header.extras.insert("jti".to_string(), claims.jti.clone());

    encode(&header, claims, &EncodingKey::from_secret(secret))
        .map_err(|e| TokenError::Signing(e.to_string()))
}
