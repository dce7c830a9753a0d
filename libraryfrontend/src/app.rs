//! Library bootstrap.
//!
//! `Frontend` is built once at startup and handed to whatever needs the
//! configuration or a token factory.

use std::sync::Arc;

use crate::auth::{TokenError, TokenFactory, TokenSettings};
use crate::config::{ConfigError, FrontendConfig};

/// App name for which the environment set-up command is intended.
pub const BASIC_FRONTEND_APP: &str = "basicfrontendapp";

/// Shared front-end state.
#[derive(Debug, Clone)]
pub struct Frontend {
    config: Arc<FrontendConfig>,
}

impl Frontend {
    /// Load configuration from the process environment and bootstrap.
    ///
    /// # Errors
    /// Returns an error if the configuration does not load.
    pub fn bootstrap() -> Result<Self, ConfigError> {
        FrontendConfig::from_env().map(Self::new)
    }

    #[must_use]
    pub fn new(config: FrontendConfig) -> Self {
        tracing::info!(
            "Loaded configuration: app_name={}, app_domain_name={}, admin_api_url={}, jwt_exp_seconds={}",
            config.app_name.as_deref().unwrap_or("<unset>"),
            config.app_domain_name,
            config.admin_api_url,
            config.jwt_exp_seconds
        );
        if config.presentation.uses_default_preview_token() {
            tracing::warn!(
                "preview_in_frontend_token is still the default value; set LASALLE_PREVIEW_IN_FRONTEND_TOKEN"
            );
        }

        Self {
            config: Arc::new(config),
        }
    }

    #[must_use]
    pub fn config(&self) -> &FrontendConfig {
        &self.config
    }

    /// True when this install is the basic front-end app.
    #[must_use]
    pub fn is_basic_frontend_app(&self) -> bool {
        self.config.app_name.as_deref() == Some(BASIC_FRONTEND_APP)
    }

    /// Build a token factory from the configured JWT settings.
    ///
    /// # Errors
    /// Returns `TokenError::Configuration` if the signing key is missing or
    /// empty, or the lifetime is not positive.
    pub fn token_factory(&self) -> Result<TokenFactory, TokenError> {
        let settings = TokenSettings::from_config(&self.config)?;
        Ok(TokenFactory::new(settings))
    }
}
