//! Token and credential configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted access token lifetime: one day.
pub const MAX_ACCESS_TTL_MINUTES: u64 = 24 * 60;
/// Longest accepted refresh token lifetime: ten years.
pub const MAX_REFRESH_TTL_DAYS: u64 = 3650;

/// HMAC algorithm shared by access and refresh tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TokenAlgorithm {
    /// HMAC with SHA-256.
    #[default]
    HS256,
    /// HMAC with SHA-384.
    HS384,
    /// HMAC with SHA-512.
    HS512,
}

/// Authentication and credential configuration.
///
/// The access and refresh secrets have no defaults: an empty secret
/// fails [`AuthConfig::validate`] and startup aborts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for signing access tokens.
    #[serde(default)]
    pub access_secret: String,
    /// Secret key for signing refresh tokens.
    #[serde(default)]
    pub refresh_secret: String,
    /// Signing algorithm.
    #[serde(default)]
    pub algorithm: TokenAlgorithm,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Whether auth cookies carry the `Secure` attribute.
    #[serde(default)]
    pub cookie_secure: bool,
}

impl AuthConfig {
    /// Build a configuration with the given secrets and default lifetimes.
    pub fn with_secrets(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Self::default()
        }
    }

    /// Reject configurations that would make tokens unsafe or unusable.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.access_secret is not set (SHANYRAK__AUTH__ACCESS_SECRET)",
            ));
        }
        if self.refresh_secret.trim().is_empty() {
            return Err(AppError::configuration(
                "auth.refresh_secret is not set (SHANYRAK__AUTH__REFRESH_SECRET)",
            ));
        }
        if self.access_secret == self.refresh_secret {
            return Err(AppError::configuration(
                "auth.access_secret and auth.refresh_secret must differ",
            ));
        }
        if self.access_ttl_minutes == 0 || self.refresh_ttl_days == 0 {
            return Err(AppError::configuration("Token lifetimes must be positive"));
        }
        if self.access_ttl_minutes > MAX_ACCESS_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.access_ttl_minutes must be at most {MAX_ACCESS_TTL_MINUTES}"
            )));
        }
        if self.refresh_ttl_days > MAX_REFRESH_TTL_DAYS {
            return Err(AppError::configuration(format!(
                "auth.refresh_ttl_days must be at most {MAX_REFRESH_TTL_DAYS}"
            )));
        }
        if self.password_min_length == 0 {
            return Err(AppError::configuration(
                "auth.password_min_length must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: String::new(),
            refresh_secret: String::new(),
            algorithm: TokenAlgorithm::default(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            password_min_length: default_password_min(),
            cookie_secure: false,
        }
    }
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    7
}

fn default_password_min() -> usize {
    6
}
