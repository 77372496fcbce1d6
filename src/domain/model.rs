use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const CERT_CHAIN_URL_HEADER: &str = "signaturecertchainurl";
pub const SIGNATURE_HEADER: &str = "signature";
pub const ACCEPT_HEADER: &str = "accept";
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Lowercases header names. When two names differ only by case, an already
/// lowercase name wins, then the lexicographically smallest spelling.
pub fn normalize_headers(headers: HashMap<String, String>) -> HashMap<String, String> {
    let mut entries: Vec<(String, String)> = headers.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| {
        let a_lower = a.bytes().all(|c| !c.is_ascii_uppercase());
        let b_lower = b.bytes().all(|c| !c.is_ascii_uppercase());
        b_lower.cmp(&a_lower).then_with(|| a.cmp(b))
    });

    let mut normalized = HashMap::with_capacity(entries.len());
    for (name, value) in entries {
        normalized.entry(name.to_ascii_lowercase()).or_insert(value);
    }
    normalized
}

fn lowercase_headers<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let headers = Option::<HashMap<String, String>>::deserialize(deserializer)?;
    Ok(normalize_headers(headers.unwrap_or_default()))
}

/// An HTTP request as handed over by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundRequest {
    pub method: String,
    /// Keys are lowercased on the way in; see [`normalize_headers`].
    #[serde(default, deserialize_with = "lowercase_headers")]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: Option<Value>,
    /// Exact body text as received, used for signature verification when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<String>,
}

impl InboundRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Builds a request from wire parts, parsing the body text as JSON.
    ///
    /// A body of JSON `null` counts as no body.
    pub fn from_raw(
        method: impl Into<String>,
        headers: HashMap<String, String>,
        raw_body: Option<String>,
    ) -> serde_json::Result<Self> {
        let raw_body = raw_body.filter(|text| !text.trim().is_empty());
        let body: Option<Value> = raw_body.as_deref().map(serde_json::from_str).transpose()?;
        let body = body.filter(|value| !value.is_null());
        let raw_body = if body.is_some() { raw_body } else { None };
        Ok(Self {
            method: method.into(),
            headers: normalize_headers(headers),
            body,
            raw_body,
        })
    }

    /// Case-insensitive header lookup. Headers inserted directly into the map
    /// are matched with the same precedence as [`normalize_headers`].
    pub fn header(&self, name: &str) -> Option<&str> {
        let lower = name.to_ascii_lowercase();
        if let Some(value) = self.headers.get(&lower) {
            return Some(value.as_str());
        }
        self.headers
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(name))
            .min_by(|(a, _), (b, _)| a.cmp(b))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the request carries a usable body. JSON `null` does not count.
    pub fn has_body(&self) -> bool {
        matches!(&self.body, Some(value) if !value.is_null())
    }

    pub fn accept(&self) -> Option<&str> {
        self.header(ACCEPT_HEADER)
    }

    /// The body text the signature was computed over.
    pub fn signed_payload(&self) -> serde_json::Result<Option<String>> {
        if let Some(raw) = &self.raw_body {
            return Ok(Some(raw.clone()));
        }
        self.body.as_ref().map(serde_json::to_string).transpose()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    pub status_code: u16,
    pub content_type: String,
    pub body: Value,
}

impl OutboundResponse {
    pub fn json(status_code: u16, body: Value) -> Self {
        Self {
            status_code,
            content_type: JSON_CONTENT_TYPE.to_string(),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// The body rendered for the wire.
    pub fn body_text(&self) -> String {
        self.body.to_string()
    }
}

/// Invocation context passed to the skill alongside the event. Empty unless a host adds to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillContext {
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}
