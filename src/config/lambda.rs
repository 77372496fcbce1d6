use crate::core::ConfigProvider;
use crate::utils::error::{GateError, Result};
use crate::utils::validation::{validate_range, validate_required_field, validate_url, Validate};
use crate::verifier::DEFAULT_TOLERANCE;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub skill_endpoint: String,
    pub verifier_endpoint: Option<String>,
    pub validate_requests: bool,
    pub skill_timeout_seconds: u64,
    pub verifier_timeout_seconds: u64,
    pub enforce_cert_url: bool,
    pub check_timestamp: bool,
    pub timestamp_tolerance_seconds: u64,
    pub log_level: Option<String>,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`, so tests need not touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            skill_endpoint: lookup("SKILL_ENDPOINT").ok_or_else(|| GateError::Config {
                message: "SKILL_ENDPOINT environment variable is required".to_string(),
            })?,
            verifier_endpoint: lookup("VERIFIER_ENDPOINT").filter(|v| !v.trim().is_empty()),
            validate_requests: parse_flag(&lookup, "VALIDATE_REQUESTS", true)?,
            skill_timeout_seconds: parse_number(&lookup, "SKILL_TIMEOUT_SECONDS", 10)?,
            verifier_timeout_seconds: parse_number(&lookup, "VERIFIER_TIMEOUT_SECONDS", 5)?,
            enforce_cert_url: parse_flag(&lookup, "ENFORCE_CERT_URL", true)?,
            check_timestamp: parse_flag(&lookup, "CHECK_TIMESTAMP", true)?,
            timestamp_tolerance_seconds: parse_number(
                &lookup,
                "TIMESTAMP_TOLERANCE_SECONDS",
                DEFAULT_TOLERANCE.as_secs(),
            )?,
            log_level: lookup("LOG_LEVEL"),
        })
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(GateError::InvalidConfigValue {
                field: key.to_string(),
                value,
                reason: "Expected a boolean (true/false)".to_string(),
            }),
        },
    }
}

fn parse_number<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| GateError::InvalidConfigValue {
                field: key.to_string(),
                value,
                reason: "Expected a whole number of seconds".to_string(),
            }),
    }
}

impl ConfigProvider for LambdaConfig {
    fn validate_requests(&self) -> bool {
        self.validate_requests
    }

    fn skill_endpoint(&self) -> &str {
        &self.skill_endpoint
    }

    fn skill_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn skill_timeout(&self) -> Duration {
        Duration::from_secs(self.skill_timeout_seconds)
    }

    fn verifier_endpoint(&self) -> Option<&str> {
        self.verifier_endpoint.as_deref()
    }

    fn verifier_timeout(&self) -> Duration {
        Duration::from_secs(self.verifier_timeout_seconds)
    }

    fn enforce_cert_url(&self) -> bool {
        self.enforce_cert_url
    }

    fn timestamp_tolerance(&self) -> Option<Duration> {
        if !self.check_timestamp {
            return None;
        }
        Some(Duration::from_secs(self.timestamp_tolerance_seconds))
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_url("SKILL_ENDPOINT", &self.skill_endpoint)?;
        validate_range("SKILL_TIMEOUT_SECONDS", self.skill_timeout_seconds, 1, 300)?;

        if self.validate_requests {
            let endpoint = validate_required_field("VERIFIER_ENDPOINT", &self.verifier_endpoint)?;
            validate_url("VERIFIER_ENDPOINT", endpoint)?;
        }
        validate_range("VERIFIER_TIMEOUT_SECONDS", self.verifier_timeout_seconds, 1, 60)?;
        validate_range(
            "TIMESTAMP_TOLERANCE_SECONDS",
            self.timestamp_tolerance_seconds,
            1,
            3600,
        )?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
