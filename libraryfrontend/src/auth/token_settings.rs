//! Signing inputs for issued tokens.
//!
//! # Pre-conditions
//! - The secret must be non-empty.
//! - The lifetime must be a positive number of seconds.
//!
//! # Post-conditions
//! - `TokenSettings` instances are immutable once created.
//!
//! # Invariants
//! - Issuer and audience are stored verbatim, empty strings included.
//! - The secret never appears in `Debug` output.

use crate::config::{self, ConfigError, FrontendConfig};

/// Everything the token factory needs besides time and randomness.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSettings {
    secret: Vec<u8>,
    issuer: String,
    audience: String,
    ttl_seconds: i64,
}

impl TokenSettings {
    /// Create validated token settings.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if the secret is empty or the
    /// lifetime is not positive.
    pub fn new(
        secret: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        ttl_seconds: i64,
    ) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: config::JWT_KEY.to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if ttl_seconds <= 0 {
            return Err(ConfigError::InvalidValue {
                name: config::JWT_EXP_SECONDS.to_string(),
                message: format!("must be a positive number of seconds, got {ttl_seconds}"),
            });
        }

        Ok(Self {
            secret,
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_seconds,
        })
    }

    /// Pull the token settings out of the front-end configuration.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnvVar` if `LASALLE_JWT_KEY` is unset, and
    /// whatever [`TokenSettings::new`] rejects otherwise.
    pub fn from_config(config: &FrontendConfig) -> Result<Self, ConfigError> {
        let secret = config
            .jwt_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar(config::JWT_KEY.to_string()))?;

        Self::new(
            secret,
            config.app_domain_name.as_str(),
            config.jwt_aud_claim.as_str(),
            config.jwt_exp_seconds,
        )
    }

    #[must_use]
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    #[must_use]
    pub fn audience(&self) -> &str {
        &self.audience
    }

    #[must_use]
    pub const fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}
