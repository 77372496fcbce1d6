// Application wiring: turns any configuration source into a ready adapter.

use crate::adapters::{HttpSignatureVerifier, HttpSkillHandler};
use crate::core::adapter::RequestAdapter;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::verifier::{GuardOptions, GuardedVerifier};

pub fn build_adapter<C: ConfigProvider>(config: &C) -> Result<RequestAdapter> {
    let skill = HttpSkillHandler::new(config.skill_endpoint(), config.skill_timeout())?
        .with_headers(config.skill_headers());
    tracing::info!("Skill endpoint: {}", skill.endpoint());

    let mut builder = RequestAdapter::builder()
        .skill(skill)
        .validate(config.validate_requests());

    if let Some(endpoint) = config.verifier_endpoint() {
        let verifier = HttpSignatureVerifier::new(endpoint, config.verifier_timeout())?;
        let options = GuardOptions {
            enforce_cert_url: config.enforce_cert_url(),
            timestamp_tolerance: config.timestamp_tolerance(),
        };
        tracing::info!(
            enforce_cert_url = options.enforce_cert_url,
            timestamp_tolerance = ?options.timestamp_tolerance,
            "Signature verification endpoint: {}",
            endpoint
        );
        builder = builder.verifier(GuardedVerifier::with_options(verifier, options));
    }

    builder.build()
}
