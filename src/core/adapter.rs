use crate::core::negotiation::accepts_json;
use crate::domain::model::{
    InboundRequest, OutboundResponse, SkillContext, CERT_CHAIN_URL_HEADER, SIGNATURE_HEADER,
};
use crate::domain::ports::{SignatureVerifier, SkillHandler};
use crate::utils::error::{GateError, RequestError, Result};
use serde_json::Value;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Turning this off skips every signature check. Development only.
    pub validate: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self { validate: true }
    }
}

/// Validates inbound requests and dispatches them to a skill.
#[derive(Clone)]
pub struct RequestAdapter {
    skill: Arc<dyn SkillHandler>,
    verifier: Option<Arc<dyn SignatureVerifier>>,
    config: AdapterConfig,
}

impl std::fmt::Debug for RequestAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestAdapter")
            .field("config", &self.config)
            .field("has_verifier", &self.verifier.is_some())
            .finish()
    }
}

#[derive(Default)]
pub struct RequestAdapterBuilder {
    skill: Option<Arc<dyn SkillHandler>>,
    verifier: Option<Arc<dyn SignatureVerifier>>,
    config: AdapterConfig,
}

impl RequestAdapterBuilder {
    pub fn skill<H: SkillHandler + 'static>(mut self, skill: H) -> Self {
        self.skill = Some(Arc::new(skill));
        self
    }

    pub fn verifier<V: SignatureVerifier + 'static>(mut self, verifier: V) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    pub fn validate(mut self, validate: bool) -> Self {
        self.config.validate = validate;
        self
    }

    pub fn build(self) -> Result<RequestAdapter> {
        let skill = self.skill.ok_or_else(|| GateError::Config {
            message: "Option skill is not a skill handler".to_string(),
        })?;

        if self.config.validate && self.verifier.is_none() {
            return Err(GateError::Config {
                message: "Request validation is enabled but no signature verifier was supplied"
                    .to_string(),
            });
        }

        if !self.config.validate {
            tracing::warn!("⚠️ Request signature validation is disabled");
        }

        Ok(RequestAdapter {
            skill,
            verifier: self.verifier,
            config: self.config,
        })
    }
}

impl RequestAdapter {
    pub fn builder() -> RequestAdapterBuilder {
        RequestAdapterBuilder::default()
    }

    pub fn config(&self) -> AdapterConfig {
        self.config
    }

    pub async fn handle(&self, request: &InboundRequest) -> OutboundResponse {
        match self.process(request).await {
            Ok(body) => OutboundResponse::json(200, body),
            Err(e) => {
                if e.is_client_error() {
                    tracing::info!(status = e.status_code(), "Rejected skill request: {}", e);
                }
                OutboundResponse::json(e.status_code(), Value::String(e.to_string()))
            }
        }
    }

    /// Runs the guards in order, then the skill. The first failure decides the outcome.
    pub async fn process(&self, request: &InboundRequest) -> std::result::Result<Value, RequestError> {
        self.admit(request).await?;
        self.dispatch(request).await
    }

    async fn admit(&self, request: &InboundRequest) -> std::result::Result<(), RequestError> {
        if !accepts_json(request.accept()) {
            return Err(RequestError::NotAcceptable);
        }
        if !request.method.eq_ignore_ascii_case("POST") {
            return Err(RequestError::MethodNotAllowed);
        }
        if !self.config.validate {
            return Ok(());
        }

        let cert_chain_url = request
            .header(CERT_CHAIN_URL_HEADER)
            .ok_or(RequestError::MissingCertChainUrl)?;
        let signature = request
            .header(SIGNATURE_HEADER)
            .ok_or(RequestError::MissingSignature)?;
        if !request.has_body() {
            return Err(RequestError::MissingBody);
        }
        let payload = match request.signed_payload() {
            Ok(Some(payload)) => payload,
            Ok(None) => return Err(RequestError::MissingBody),
            Err(e) => {
                tracing::debug!("Error serializing request body for verification: {}", e);
                return Err(RequestError::InvalidSignature);
            }
        };

        // build() guarantees a verifier whenever validation is on
        let verifier = self.verifier.as_ref().ok_or(RequestError::InvalidSignature)?;
        if let Err(e) = verifier.verify(cert_chain_url, signature, &payload).await {
            tracing::debug!("Error verifying request certificate for skill: {}", e);
            return Err(RequestError::InvalidSignature);
        }

        Ok(())
    }

    async fn dispatch(&self, request: &InboundRequest) -> std::result::Result<Value, RequestError> {
        let event = request.body.clone().unwrap_or(Value::Null);
        let context = SkillContext::default();

        tracing::info!(
            headers = ?request.headers,
            event = %event,
            context = ?context,
            "Handling validated skill request"
        );

        match self.skill.invoke(event, context).await {
            Ok(response) => {
                tracing::info!(response = %response, "Returning response to skill");
                Ok(response)
            }
            Err(e) => {
                tracing::warn!("Error handling skill: {}", e);
                Err(RequestError::Handler(e.to_string()))
            }
        }
    }
}
