//! `.env` text handling.
//!
//! # Invariants
//! - Edits only touch the placeholder or the `KEY=` line they target; every
//!   other byte of the file is preserved.

use std::path::{Path, PathBuf};

use super::SetupError;

pub const APP_NAME_PLACEHOLDER: &str = "DummyAppName";
pub const APP_URL_PLACEHOLDER: &str = "DummyAppURL";
pub const APP_DOMAIN_NAME_PLACEHOLDER: &str = "DummyLasalleAppDomainName";
pub const JWT_KEY_PLACEHOLDER: &str = "DummyJwtKey";
pub const JWT_AUD_CLAIM_PLACEHOLDER: &str = "DummyLasalleJwtAudClaim";
pub const ADMIN_API_URL_PLACEHOLDER: &str = "DummyLasalleAdminApiUrl";

pub const ENV_FILE_NAME: &str = ".env";
pub const ENV_EXAMPLE_FILE_NAME: &str = ".env.example";

const ENV_TEMPLATE: &str = "\
APP_NAME=DummyAppName
APP_ENV=local
APP_KEY=
APP_DEBUG=true
APP_URL=DummyAppURL

LOG_CHANNEL=stack

LASALLE_APP_NAME=basicfrontendapp
LASALLE_APP_DOMAIN_NAME=DummyLasalleAppDomainName
LASALLE_ADMIN_API_URL=DummyLasalleAdminApiUrl
LASALLE_JWT_KEY=DummyJwtKey
LASALLE_JWT_AUD_CLAIM=DummyLasalleJwtAudClaim
LASALLE_JWT_EXP_CLAIM_SECONDS_TO_EXPIRATION=3600
";

/// Contents of the `.env.example` shipped with a front-end install.
#[must_use]
pub const fn env_template() -> &'static str {
    ENV_TEMPLATE
}

/// Write `.env.example` into `dir`.
///
/// # Errors
/// Returns `SetupError::TemplateExists` if the file exists and `force` is
/// false, and `SetupError::Io` if writing fails.
pub fn publish_env_template(dir: &Path, force: bool) -> Result<PathBuf, SetupError> {
    let path = dir.join(ENV_EXAMPLE_FILE_NAME);
    if path.exists() && !force {
        return Err(SetupError::TemplateExists(path));
    }
    std::fs::write(&path, ENV_TEMPLATE)?;
    tracing::info!("published {}", path.display());
    Ok(path)
}

/// Strip a leading `http://` or `https://`.
///
/// Nothing else is parsed: ports and paths are kept as typed.
#[must_use]
pub fn domain_from_url(url: &str) -> &str {
    url.strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .unwrap_or(url)
}

/// The text of an env file, edited in memory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvFile {
    contents: String,
}

impl EnvFile {
    #[must_use]
    pub const fn new(contents: String) -> Self {
        Self { contents }
    }

    /// Read an env file from disk.
    ///
    /// # Errors
    /// Returns `SetupError::Io` if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, SetupError> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }

    /// Write the env file to disk, replacing what is there.
    ///
    /// # Errors
    /// Returns `SetupError::Io` if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), SetupError> {
        std::fs::write(path, &self.contents)?;
        Ok(())
    }

    #[must_use]
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Replace every occurrence of `placeholder` with `value`, wrapped in
    /// single quotes when `quoted`. Returns how many were replaced.
    pub fn replace_placeholder(&mut self, placeholder: &str, value: &str, quoted: bool) -> usize {
        let count = self.contents.matches(placeholder).count();
        if count == 0 {
            tracing::warn!("placeholder {placeholder} not found in env file");
            return 0;
        }

        let replacement = if quoted {
            format!("'{value}'")
        } else {
            value.to_string()
        };
        self.contents = self.contents.replace(placeholder, &replacement);
        count
    }

    /// Value of the first `KEY=` line, with surrounding quotes removed.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.contents
            .lines()
            .find_map(|line| value_of(line, key))
            .map(unquote)
    }

    /// Rewrite the first `KEY=` line, or append one if there is none.
    pub fn set_var(&mut self, key: &str, value: &str) {
        let mut replaced = false;
        let mut updated = String::with_capacity(self.contents.len() + value.len());

        for line in self.contents.split_inclusive('\n') {
            if !replaced && value_of(line.trim_end_matches(['\r', '\n']), key).is_some() {
                updated.push_str(key);
                updated.push('=');
                updated.push_str(value);
                if line.ends_with('\n') {
                    updated.push('\n');
                }
                replaced = true;
            } else {
                updated.push_str(line);
            }
        }

        if !replaced {
            if !updated.is_empty() && !updated.ends_with('\n') {
                updated.push('\n');
            }
            updated.push_str(key);
            updated.push('=');
            updated.push_str(value);
            updated.push('\n');
        }

        self.contents = updated;
    }
}

fn value_of<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let rest = line.trim_start().strip_prefix(key)?;
    rest.strip_prefix('=').map(str::trim)
}

fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
