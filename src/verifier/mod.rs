//! Platform request rules that run ahead of the cryptographic signature check.

pub mod cert_url;
pub mod timestamp;

pub use cert_url::validate_cert_chain_url;
pub use timestamp::{validate_timestamp, DEFAULT_TOLERANCE};

use crate::domain::ports::SignatureVerifier;
use crate::utils::error::VerificationError;
use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardOptions {
    pub enforce_cert_url: bool,
    /// `None` disables the timestamp check.
    pub timestamp_tolerance: Option<Duration>,
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            enforce_cert_url: true,
            timestamp_tolerance: Some(DEFAULT_TOLERANCE),
        }
    }
}

/// Wraps a verifier with the certificate URL and timestamp rules.
#[derive(Debug, Clone)]
pub struct GuardedVerifier<V> {
    inner: V,
    options: GuardOptions,
}

impl<V: SignatureVerifier> GuardedVerifier<V> {
    pub fn new(inner: V) -> Self {
        Self::with_options(inner, GuardOptions::default())
    }

    pub fn with_options(inner: V, options: GuardOptions) -> Self {
        Self { inner, options }
    }
}

#[async_trait]
impl<V: SignatureVerifier> SignatureVerifier for GuardedVerifier<V> {
    async fn verify(
        &self,
        cert_chain_url: &str,
        signature: &str,
        body: &str,
    ) -> Result<(), VerificationError> {
        if self.options.enforce_cert_url {
            validate_cert_chain_url(cert_chain_url)?;
        }

        if let Some(tolerance) = self.options.timestamp_tolerance {
            let parsed: serde_json::Value =
                serde_json::from_str(body).map_err(|e| VerificationError::InvalidTimestamp {
                    reason: format!("body is not JSON: {}", e),
                })?;
            validate_timestamp(&parsed, tolerance, Utc::now())?;
        }

        self.inner.verify(cert_chain_url, signature, body).await
    }
}
