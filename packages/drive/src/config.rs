//! Drive connection settings.

use std::time::Duration;

use drivefs_http::TransportConfig;

use crate::error::DriveError;

pub const ENV_ACCESS_TOKEN: &str = "DRIVEFS_ACCESS_TOKEN";
pub const ENV_DRIVE_ID: &str = "DRIVEFS_DRIVE_ID";
pub const ENV_BASE_URL: &str = "DRIVEFS_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "DRIVEFS_TIMEOUT_SECS";
pub const ENV_VERIFY_TLS: &str = "DRIVEFS_VERIFY_TLS";

/// Everything needed to talk to one drive.
#[derive(Debug, Clone)]
pub struct DriveConfig {
    pub transport: TransportConfig,
    pub drive_id: String,
}

impl DriveConfig {
    pub fn new(access_token: impl Into<String>, drive_id: impl Into<String>) -> Self {
        Self {
            transport: TransportConfig::new(access_token),
            drive_id: drive_id.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.transport = self.transport.with_base_url(base_url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.with_timeout(timeout);
        self
    }

    pub fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.transport = self.transport.with_verify_tls(verify_tls);
        self
    }

    /// Read settings from `DRIVEFS_*` environment variables.
    pub fn from_env() -> Result<Self, DriveError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DriveError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = non_empty(&lookup, ENV_ACCESS_TOKEN)?;
        let drive_id = non_empty(&lookup, ENV_DRIVE_ID)?;
        let mut config = Self::new(token, drive_id);

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                DriveError::config(format!(
                    "{} must be a whole number of seconds",
                    ENV_TIMEOUT_SECS
                ))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        if let Some(raw) = lookup(ENV_VERIFY_TLS) {
            config = config.with_verify_tls(parse_bool(ENV_VERIFY_TLS, &raw)?);
        }

        Ok(config)
    }

    /// Check the settings are usable before any request is made.
    pub fn validate(&self) -> Result<(), DriveError> {
        if self.transport.access_token.trim().is_empty() {
            return Err(DriveError::config("access token is empty"));
        }
        if self.drive_id.trim().is_empty() {
            return Err(DriveError::config("drive id is empty"));
        }
        self.transport
            .parsed_base_url()
            .map_err(|e| DriveError::config(format!("invalid base URL: {}", e)))?;
        Ok(())
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Result<String, DriveError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| DriveError::config(format!("{} is not set", key)))
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, DriveError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DriveError::config(format!(
            "{} must be true or false, got '{}'",
            key, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn minimal_environment_uses_defaults() {
        let config =
            DriveConfig::from_lookup(lookup(&[(ENV_ACCESS_TOKEN, "tok"), (ENV_DRIVE_ID, "d1")]))
                .unwrap();

        assert_eq!(config.drive_id, "d1");
        assert_eq!(config.transport.access_token, "tok");
        assert_eq!(config.transport.base_url, drivefs_http::DEFAULT_BASE_URL);
        assert_eq!(config.transport.timeout, drivefs_http::DEFAULT_TIMEOUT);
        assert!(config.transport.verify_tls);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn overrides_are_applied() {
        let config = DriveConfig::from_lookup(lookup(&[
            (ENV_ACCESS_TOKEN, "tok"),
            (ENV_DRIVE_ID, "d1"),
            (ENV_BASE_URL, "http://localhost:9000/v1.0"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_VERIFY_TLS, "no"),
        ]))
        .unwrap();

        assert_eq!(config.transport.base_url, "http://localhost:9000/v1.0");
        assert_eq!(config.transport.timeout, Duration::from_secs(5));
        assert!(!config.transport.verify_tls);
    }

    #[test]
    fn missing_token_is_configuration_error() {
        let err = DriveConfig::from_lookup(lookup(&[(ENV_DRIVE_ID, "d1")])).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains(ENV_ACCESS_TOKEN));
    }

    #[test]
    fn blank_drive_id_is_rejected() {
        let err = DriveConfig::from_lookup(lookup(&[(ENV_ACCESS_TOKEN, "t"), (ENV_DRIVE_ID, " ")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_DRIVE_ID));
    }

    #[test]
    fn bad_timeout_and_flag_are_rejected() {
        let base = [(ENV_ACCESS_TOKEN, "t"), (ENV_DRIVE_ID, "d")];

        let mut pairs = base.to_vec();
        pairs.push((ENV_TIMEOUT_SECS, "soon"));
        assert!(DriveConfig::from_lookup(lookup(&pairs)).is_err());

        let mut pairs = base.to_vec();
        pairs.push((ENV_VERIFY_TLS, "maybe"));
        assert!(DriveConfig::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn validate_catches_bad_base_url() {
        let config = DriveConfig::new("t", "d").with_base_url("::not-a-url");
        assert!(config.validate().is_err());
    }
}
