use crate::domain::model::SkillContext;
use crate::domain::ports::SkillHandler;
use crate::utils::error::{Result, SkillError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Forwards skill events to a skill service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSkillHandler {
    client: Client,
    endpoint: String,
    headers: Vec<(String, String)>,
}

impl HttpSkillHandler {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            headers: Vec::new(),
        })
    }

    pub fn with_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SkillHandler for HttpSkillHandler {
    async fn invoke(&self, event: Value, _context: SkillContext) -> std::result::Result<Value, SkillError> {
        tracing::debug!("Forwarding skill event to: {}", self.endpoint);

        let mut request = self.client.post(&self.endpoint).json(&event);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Skill endpoint response status: {}", status);

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SkillError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        Ok(body)
    }
}
