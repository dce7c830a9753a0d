//! Environment file set-up.
//!
//! Fills in the front-end's `.env` by replacing the placeholder values that
//! ship in `.env.example`.

pub mod env_file;
pub mod wizard;

use std::path::PathBuf;

pub use env_file::{EnvFile, domain_from_url, env_template, publish_env_template};
pub use wizard::{Outcome, SetEnvVars, Summary};

/// Error returned when the set-up command fails.
#[derive(Debug)]
pub enum SetupError {
    /// Reading or writing a file or the terminal failed.
    Io(std::io::Error),
    /// Input ended while a prompt was waiting for an answer.
    UnexpectedEof,
    /// The template file already exists and overwriting was not requested.
    TemplateExists(PathBuf),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::UnexpectedEof => write!(f, "input ended before all questions were answered"),
            Self::TemplateExists(path) => {
                write!(f, "{} already exists (use --force to overwrite)", path.display())
            }
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::UnexpectedEof | Self::TemplateExists(_) => None,
        }
    }
}

impl From<std::io::Error> for SetupError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
