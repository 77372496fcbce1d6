use crate::core::ConfigProvider;
use crate::utils::error::{GateError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use crate::verifier::DEFAULT_TOLERANCE;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

const DEFAULT_SKILL_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_VERIFIER_TIMEOUT_SECONDS: u64 = 5;

static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    #[serde(default)]
    pub adapter: AdapterSection,
    pub skill: SkillSection,
    #[serde(default)]
    pub verifier: VerifierSection,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterSection {
    #[serde(default = "default_true")]
    pub validate: bool,
}

impl Default for AdapterSection {
    fn default() -> Self {
        Self { validate: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillSection {
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifierSection {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub enforce_cert_url: Option<bool>,
    pub check_timestamp: Option<bool>,
    pub timestamp_tolerance_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
}

fn default_true() -> bool {
    true
}

impl GateConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| GateError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_PATTERN
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl ConfigProvider for GateConfig {
    fn validate_requests(&self) -> bool {
        self.adapter.validate
    }

    fn skill_endpoint(&self) -> &str {
        &self.skill.endpoint
    }

    fn skill_headers(&self) -> Vec<(String, String)> {
        self.skill
            .headers
            .as_ref()
            .map(|headers| headers.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default()
    }

    fn skill_timeout(&self) -> Duration {
        Duration::from_secs(self.skill.timeout_seconds.unwrap_or(DEFAULT_SKILL_TIMEOUT_SECONDS))
    }

    fn verifier_endpoint(&self) -> Option<&str> {
        self.verifier.endpoint.as_deref()
    }

    fn verifier_timeout(&self) -> Duration {
        Duration::from_secs(
            self.verifier
                .timeout_seconds
                .unwrap_or(DEFAULT_VERIFIER_TIMEOUT_SECONDS),
        )
    }

    fn enforce_cert_url(&self) -> bool {
        self.verifier.enforce_cert_url.unwrap_or(true)
    }

    fn timestamp_tolerance(&self) -> Option<Duration> {
        if !self.verifier.check_timestamp.unwrap_or(true) {
            return None;
        }
        Some(
            self.verifier
                .timestamp_tolerance_seconds
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TOLERANCE),
        )
    }
}

impl Validate for GateConfig {
    fn validate(&self) -> Result<()> {
        validate_url("skill.endpoint", &self.skill.endpoint)?;
        if let Some(timeout) = self.skill.timeout_seconds {
            validate_range("skill.timeout_seconds", timeout, 1, 300)?;
        }
        if let Some(headers) = &self.skill.headers {
            for name in headers.keys() {
                validate_non_empty_string("skill.headers", name)?;
            }
        }

        if self.adapter.validate {
            let endpoint = validate_required_field("verifier.endpoint", &self.verifier.endpoint)?;
            validate_url("verifier.endpoint", endpoint)?;
        } else if let Some(endpoint) = &self.verifier.endpoint {
            validate_url("verifier.endpoint", endpoint)?;
        }
        if let Some(timeout) = self.verifier.timeout_seconds {
            validate_range("verifier.timeout_seconds", timeout, 1, 60)?;
        }
        if let Some(tolerance) = self.verifier.timestamp_tolerance_seconds {
            validate_range("verifier.timestamp_tolerance_seconds", tolerance, 1, 3600)?;
        }

        tracing::debug!("✅ Gate configuration validation passed");
        Ok(())
    }
}
