//! Time and identifier sources for token issuance.
//!
//! Both are traits so production code uses the system clock and the thread
//! CSPRNG while tests plug in fixed values.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use rand::distr::Alphanumeric;

/// Abstraction over the wall clock.
pub trait TimeSource: Send + Sync {
    /// Get the current time in whole seconds since Unix epoch.
    fn now_secs(&self) -> i64;
}

/// Real time source using the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_secs(&self) -> i64 {
        // duration_since(UNIX_EPOCH) only fails if system time is before 1970.
        #[allow(clippy::expect_used)]
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before Unix epoch");
        i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
    }
}

/// Abstraction over the `jti` generator.
pub trait IdSource: Send + Sync {
    /// Produce a fresh token identifier.
    fn next_id(&self) -> String;
}

/// Random alphanumeric identifiers drawn from the thread-local CSPRNG.
///
/// # Invariants
/// - Every identifier is exactly `length` characters from `[A-Za-z0-9]`.
/// - `length` is never below [`RandomIdSource::DEFAULT_LENGTH`].
#[derive(Debug, Clone, Copy)]
pub struct RandomIdSource {
    length: usize,
}

impl RandomIdSource {
    /// Identifier length used for `jti`. 62^40 possible values.
    pub const DEFAULT_LENGTH: usize = 40;

    /// Lengths below `DEFAULT_LENGTH` are raised to it.
    #[must_use]
    pub const fn new(length: usize) -> Self {
        let length = if length < Self::DEFAULT_LENGTH {
            Self::DEFAULT_LENGTH
        } else {
            length
        };
        Self { length }
    }
}

impl Default for RandomIdSource {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LENGTH)
    }
}

impl IdSource for RandomIdSource {
    fn next_id(&self) -> String {
        random_alphanumeric(self.length)
    }
}

/// Random `[A-Za-z0-9]` string of the given length.
#[must_use]
pub fn random_alphanumeric(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
