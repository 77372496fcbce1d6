use crate::domain::ports::SignatureVerifier;
use crate::utils::error::{Result, VerificationError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerificationRequest<'a> {
    cert_chain_url: &'a str,
    signature: &'a str,
    body: &'a str,
}

/// Delegates the certificate chain and signature check to an external verification service.
///
/// Any 2xx answer means the request is authentic.
#[derive(Debug, Clone)]
pub struct HttpSignatureVerifier {
    client: Client,
    endpoint: String,
}

impl HttpSignatureVerifier {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl SignatureVerifier for HttpSignatureVerifier {
    async fn verify(
        &self,
        cert_chain_url: &str,
        signature: &str,
        body: &str,
    ) -> std::result::Result<(), VerificationError> {
        let payload = VerificationRequest {
            cert_chain_url,
            signature,
            body,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| VerificationError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response.text().await.unwrap_or_default();
        Err(VerificationError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
