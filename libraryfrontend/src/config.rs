//! Front-end configuration module.
//!
//! This module provides configuration loading for the front-end application
//! from environment variables, falling back to static defaults for the
//! presentation settings.
//!
//! # Environment Variables
//!
//! - `LASALLE_APP_NAME`: Which LaSalle app is installed (`basicfrontendapp`, `adminbackendapp`)
//! - `LASALLE_APP_DOMAIN_NAME`: This app's URL without the scheme, used as the `iss` claim
//! - `LASALLE_ADMIN_API_URL`: The admin backend's full URL
//! - `LASALLE_JWT_KEY`: Shared HMAC-SHA256 secret, must match the admin backend
//! - `LASALLE_JWT_AUD_CLAIM`: The admin backend's domain name, used as the `aud` claim
//! - `LASALLE_JWT_EXP_CLAIM_SECONDS_TO_EXPIRATION`: Token lifetime in seconds (default: `3600`)
//!
//! # Invariants
//!
//! - Missing string settings load as empty strings, never as errors.
//! - Integer settings that are set but unparseable are reported as errors, not defaulted.

/// Front-end configuration.
///
/// # Pre-conditions
///
/// When constructed via `from_env()`:
/// - Integer-valued environment variables, when set, must parse.
///
/// # Post-conditions
///
/// - `jwt_key` is `None` only when `LASALLE_JWT_KEY` is unset.
/// - `presentation` is fully populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Which LaSalle Software app this is.
    pub app_name: Option<String>,
    /// This app's URL without `https://`, e.g. `blog.example.com`.
    pub app_domain_name: String,
    /// The admin backend's full URL.
    pub admin_api_url: String,
    /// Shared secret for signing tokens sent to the admin backend.
    pub jwt_key: Option<String>,
    /// The admin backend's domain name. Must match an installed domain over there.
    pub jwt_aud_claim: String,
    /// Seconds until an issued token expires.
    pub jwt_exp_seconds: i64,
    /// View-layer settings.
    pub presentation: PresentationConfig,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable is missing.
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(name) => {
                write!(f, "missing required environment variable: {name}")
            }
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub const APP_NAME: &str = "LASALLE_APP_NAME";
pub const APP_DOMAIN_NAME: &str = "LASALLE_APP_DOMAIN_NAME";
pub const ADMIN_API_URL: &str = "LASALLE_ADMIN_API_URL";
pub const JWT_KEY: &str = "LASALLE_JWT_KEY";
pub const JWT_AUD_CLAIM: &str = "LASALLE_JWT_AUD_CLAIM";
pub const JWT_EXP_SECONDS: &str = "LASALLE_JWT_EXP_CLAIM_SECONDS_TO_EXPIRATION";

impl FrontendConfig {
    /// Default token lifetime in seconds.
    pub const DEFAULT_JWT_EXP_SECONDS: i64 = 3600;

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an integer or enumerated setting is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// `from_env` is this function over `std::env::var`; tests pass a map.
    ///
    /// # Errors
    ///
    /// Returns an error if an integer or enumerated setting is set but invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_exp_seconds =
            parse_or(&lookup, JWT_EXP_SECONDS, Self::DEFAULT_JWT_EXP_SECONDS)?;

        Ok(Self {
            app_name: lookup(APP_NAME),
            app_domain_name: lookup(APP_DOMAIN_NAME).unwrap_or_default(),
            admin_api_url: lookup(ADMIN_API_URL).unwrap_or_default(),
            jwt_key: lookup(JWT_KEY),
            jwt_aud_claim: lookup(JWT_AUD_CLAIM).unwrap_or_default(),
            jwt_exp_seconds,
            presentation: PresentationConfig::from_lookup(&lookup)?,
        })
    }
}

/// How many items a listing page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Show everything on one page (`none`).
    All,
    /// Show this many items per page.
    PerPage(u32),
}

/// What `featured_image_default_image` contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeaturedImageType {
    /// A value for the `src` attribute of an `img` tag.
    ExternalFile,
    /// Literal HTML rendered as-is.
    Code,
}

impl std::str::FromStr for FeaturedImageType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "external_file" => Ok(Self::ExternalFile),
            "code" => Ok(Self::Code),
            other => Err(format!("'{other}' is not one of: external_file, code")),
        }
    }
}

/// View-layer settings. Each has a static default and may be overridden by
/// the matching `LASALLE_*` environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationConfig {
    pub date_format: String,
    pub pagination: Pagination,
    pub front_end_view_path: String,
    pub featured_image_default_type: FeaturedImageType,
    pub featured_image_default_image: String,
    pub recent_blog_posts_on_home_page: u32,
    /// Twitter handle for the `twitter:site` meta tag.
    pub social_media_meta_tag_site: String,
    /// Twitter handle for the `twitter:creator` meta tag.
    pub social_media_meta_tag_creator: String,
    /// Full URL of the fallback social card image.
    pub social_media_meta_tag_default_image: String,
    /// Query-string value that unlocks previews of unpublished posts.
    pub preview_in_frontend_token: String,
}

impl PresentationConfig {
    /// Publicly known preview token. Anyone can guess it.
    pub const DEFAULT_PREVIEW_TOKEN: &'static str = "default-preview-in-frontend-token";

    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |name: &str, default: String| lookup(name).unwrap_or(default);

        let pagination = match lookup("LASALLE_PAGINATION_NUMBER_OF_ITEMS_DISPLAYED_PER_PAGE") {
            None => defaults.pagination,
            Some(value) if value.trim() == "none" => Pagination::All,
            Some(value) => value.trim().parse().map(Pagination::PerPage).map_err(|_| {
                ConfigError::InvalidValue {
                    name: "LASALLE_PAGINATION_NUMBER_OF_ITEMS_DISPLAYED_PER_PAGE".to_string(),
                    message: format!("'{value}' is neither 'none' nor a whole number"),
                }
            })?,
        };

        let featured_image_default_type = match lookup("LASALLE_FEATURED_IMAGE_DEFAULT_TYPE") {
            None => defaults.featured_image_default_type,
            Some(value) => value.parse().map_err(|message| ConfigError::InvalidValue {
                name: "LASALLE_FEATURED_IMAGE_DEFAULT_TYPE".to_string(),
                message,
            })?,
        };

        let recent_blog_posts_on_home_page = parse_or(
            lookup,
            "LASALLE_NUMBER_OF_RECENT_BLOG_POSTS_TO_DISPLAY_ON_THE_HOME_PAGE",
            defaults.recent_blog_posts_on_home_page,
        )?;

        Ok(Self {
            date_format: text("LASALLE_DATE_FORMAT", defaults.date_format),
            pagination,
            front_end_view_path: text(
                "LASALLE_PATH_TO_FRONT_END_VIEW_PATH",
                defaults.front_end_view_path,
            ),
            featured_image_default_type,
            featured_image_default_image: text(
                "LASALLE_FEATURED_IMAGE_DEFAULT_IMAGE",
                defaults.featured_image_default_image,
            ),
            recent_blog_posts_on_home_page,
            social_media_meta_tag_site: text(
                "LASALLE_SOCIAL_MEDIA_META_TAG_SITE",
                defaults.social_media_meta_tag_site,
            ),
            social_media_meta_tag_creator: text(
                "LASALLE_SOCIAL_MEDIA_META_TAG_CREATOR",
                defaults.social_media_meta_tag_creator,
            ),
            social_media_meta_tag_default_image: text(
                "LASALLE_SOCIAL_MEDIA_META_TAG_DEFAULT_IMAGE",
                defaults.social_media_meta_tag_default_image,
            ),
            preview_in_frontend_token: text(
                "LASALLE_PREVIEW_IN_FRONTEND_TOKEN",
                defaults.preview_in_frontend_token,
            ),
        })
    }

    /// True when the preview token was never changed from the default.
    #[must_use]
    pub fn uses_default_preview_token(&self) -> bool {
        self.preview_in_frontend_token == Self::DEFAULT_PREVIEW_TOKEN
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            date_format: "F d, Y".to_string(),
            pagination: Pagination::PerPage(6),
            front_end_view_path: "lasallesoftwarelasalleuifrontend::base".to_string(),
            featured_image_default_type: FeaturedImageType::ExternalFile,
            featured_image_default_image: "/nature1.jpg".to_string(),
            recent_blog_posts_on_home_page: 5,
            social_media_meta_tag_site: "@bobbloom".to_string(),
            social_media_meta_tag_creator: "@bobbloom".to_string(),
            social_media_meta_tag_default_image: "https://lasallesoftware.ca/nature1.jpg"
                .to_string(),
            preview_in_frontend_token: Self::DEFAULT_PREVIEW_TOKEN.to_string(),
        }
    }
}

/// Parse an integer setting, using `default` when it is unset.
///
/// # Errors
///
/// Returns an error if the value is set but does not parse.
fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            message: format!("'{value}' is not a whole number"),
        }),
        None => Ok(default),
    }
}
