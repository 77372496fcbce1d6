use crate::core::adapter::RequestAdapter;
use crate::domain::model::{InboundRequest, OutboundResponse};
use crate::utils::error::RequestError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// API Gateway REST proxy integration event. Only the fields the gate reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub http_method: String,
    #[serde(default, deserialize_with = "nullable_map")]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

fn nullable_map<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<HashMap<String, String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProxyRequest {
    /// Decodes the event into an inbound request. A body that is not JSON is a bad request.
    pub fn into_inbound(self) -> Result<InboundRequest, RequestError> {
        let body = match self.body {
            Some(text) if self.is_base64_encoded => {
                let bytes = STANDARD.decode(text.as_bytes()).map_err(|e| {
                    tracing::debug!("Error decoding base64 request body: {}", e);
                    RequestError::MissingBody
                })?;
                Some(String::from_utf8(bytes).map_err(|e| {
                    tracing::debug!("Request body is not UTF-8: {}", e);
                    RequestError::MissingBody
                })?)
            }
            other => other,
        };

        InboundRequest::from_raw(self.http_method, self.headers, body).map_err(|e| {
            tracing::debug!("Error parsing request body as JSON: {}", e);
            RequestError::MissingBody
        })
    }
}

impl From<OutboundResponse> for ProxyResponse {
    fn from(response: OutboundResponse) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), response.content_type.clone());
        Self {
            status_code: response.status_code,
            headers,
            body: response.body_text(),
            is_base64_encoded: false,
        }
    }
}

/// Runs one proxy event through the adapter.
pub async fn handle_proxy_event(adapter: &RequestAdapter, event: ProxyRequest) -> ProxyResponse {
    match event.into_inbound() {
        Ok(request) => adapter.handle(&request).await.into(),
        Err(e) => OutboundResponse::json(e.status_code(), Value::String(e.to_string())).into(),
    }
}
