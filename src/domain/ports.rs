use crate::domain::model::SkillContext;
use crate::utils::error::{SkillError, VerificationError};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// The skill implementation requests are dispatched to.
#[async_trait]
pub trait SkillHandler: Send + Sync {
    async fn invoke(&self, event: Value, context: SkillContext) -> Result<Value, SkillError>;
}

/// Checks that a request body was signed by the assistant platform.
#[async_trait]
pub trait SignatureVerifier: Send + Sync {
    async fn verify(
        &self,
        cert_chain_url: &str,
        signature: &str,
        body: &str,
    ) -> Result<(), VerificationError>;
}

pub trait ConfigProvider: Send + Sync {
    fn validate_requests(&self) -> bool;
    fn skill_endpoint(&self) -> &str;
    fn skill_headers(&self) -> Vec<(String, String)>;
    fn skill_timeout(&self) -> Duration;
    fn verifier_endpoint(&self) -> Option<&str>;
    fn verifier_timeout(&self) -> Duration;
    fn enforce_cert_url(&self) -> bool;
    /// `None` disables the timestamp check.
    fn timestamp_tolerance(&self) -> Option<Duration>;
}
