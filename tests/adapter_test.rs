use async_trait::async_trait;
use serde_json::{json, Value};
use skill_gate::{
    InboundRequest, RequestAdapter, SignatureVerifier, SkillContext, SkillError, SkillHandler,
    VerificationError,
};
use std::sync::{Arc, Mutex};

const CERT_URL: &str = "https://s3.amazonaws.com/echo.api/echo-api-cert.pem";

/// Speaks "Success" for every request and remembers what it was given.
#[derive(Default, Clone)]
struct SpeakingSkill {
    seen: Arc<Mutex<Vec<(Value, SkillContext)>>>,
}

#[async_trait]
impl SkillHandler for SpeakingSkill {
    async fn invoke(&self, event: Value, context: SkillContext) -> Result<Value, SkillError> {
        self.seen.lock().unwrap().push((event, context));
        Ok(json!({
            "version": "1.0",
            "response": {
                "outputSpeech": { "type": "SSML", "ssml": "<speak>Success</speak>" }
            }
        }))
    }
}

struct FailingSkill;

#[async_trait]
impl SkillHandler for FailingSkill {
    async fn invoke(&self, _event: Value, _context: SkillContext) -> Result<Value, SkillError> {
        Err(SkillError::failed("Test skill error"))
    }
}

/// Records the arguments of every verification and answers with a fixed outcome.
#[derive(Clone)]
struct StubVerifier {
    accept: bool,
    calls: Arc<Mutex<Vec<(String, String, String)>>>,
}

impl StubVerifier {
    fn accepting() -> Self {
        Self {
            accept: true,
            calls: Arc::default(),
        }
    }

    fn rejecting() -> Self {
        Self {
            accept: false,
            calls: Arc::default(),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SignatureVerifier for StubVerifier {
    async fn verify(
        &self,
        cert_chain_url: &str,
        signature: &str,
        body: &str,
    ) -> Result<(), VerificationError> {
        self.calls.lock().unwrap().push((
            cert_chain_url.to_string(),
            signature.to_string(),
            body.to_string(),
        ));
        if self.accept {
            Ok(())
        } else {
            Err(VerificationError::Rejected {
                status: 401,
                message: "Test verification error".to_string(),
            })
        }
    }
}

fn signed_request() -> InboundRequest {
    InboundRequest::new("POST")
        .with_header("accept", "application/json")
        .with_header("signaturecertchainurl", CERT_URL)
        .with_header("signature", "somesignature")
        .with_body(json!({}))
}

fn validating_adapter(skill: impl SkillHandler + 'static, verifier: StubVerifier) -> RequestAdapter {
    RequestAdapter::builder()
        .skill(skill)
        .verifier(verifier)
        .validate(true)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_request_not_accepting_json_is_406() {
    let verifier = StubVerifier::accepting();
    let adapter = validating_adapter(SpeakingSkill::default(), verifier.clone());
    let request = signed_request().with_header("accept", "text/html");

    let response = adapter.handle(&request).await;

    assert_eq!(response.status_code, 406);
    assert_eq!(verifier.call_count(), 0);
}

#[tokio::test]
async fn test_non_post_request_is_405() {
    let adapter = validating_adapter(SpeakingSkill::default(), StubVerifier::accepting());
    let mut request = signed_request();
    request.method = "GET".to_string();

    let response = adapter.handle(&request).await;

    assert_eq!(response.status_code, 405);
    assert_eq!(response.body, json!("Method Not Allowed"));
}

#[tokio::test]
async fn test_structured_json_suffix_is_not_acceptable() {
    let skill = SpeakingSkill::default();
    let adapter = validating_adapter(skill.clone(), StubVerifier::accepting());
    let request = signed_request().with_header("Accept", "application/vnd.api+json");

    let response = adapter.handle(&request).await;

    assert_eq!(response.status_code, 406);
    assert!(skill.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_null_body_is_bad_request_without_verification() {
    let skill = SpeakingSkill::default();
    let verifier = StubVerifier::accepting();
    let adapter = validating_adapter(skill.clone(), verifier.clone());
    let request = signed_request().with_body(Value::Null);

    let response = adapter.handle(&request).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, json!("Bad Request"));
    assert_eq!(verifier.call_count(), 0);
    assert!(skill.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_mixed_case_duplicate_headers_resolve_to_lowercase_name() {
    let verifier = StubVerifier::accepting();
    let adapter = validating_adapter(SpeakingSkill::default(), verifier.clone());
    let mut headers = std::collections::HashMap::new();
    headers.insert("signaturecertchainurl".to_string(), CERT_URL.to_string());
    headers.insert("Signature".to_string(), "stale".to_string());
    headers.insert("signature".to_string(), "current".to_string());
    let request = InboundRequest::from_raw("POST", headers, Some("{}".to_string())).unwrap();

    assert_eq!(adapter.handle(&request).await.status_code, 200);
    assert_eq!(verifier.calls.lock().unwrap()[0].1, "current");
}

#[tokio::test]
async fn test_content_negotiation_runs_before_method_check() {
    let adapter = validating_adapter(SpeakingSkill::default(), StubVerifier::accepting());
    let request = InboundRequest::new("GET").with_header("Accept", "text/plain");

    assert_eq!(adapter.handle(&request).await.status_code, 406);
}

#[tokio::test]
async fn test_missing_cert_chain_url_is_400() {
    let adapter = validating_adapter(SpeakingSkill::default(), StubVerifier::accepting());
    let request = InboundRequest::new("POST").with_body(json!({}));

    let response = adapter.handle(&request).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, json!("Signature certificate chain URL missing"));
}

#[tokio::test]
async fn test_missing_signature_is_400() {
    let adapter = validating_adapter(SpeakingSkill::default(), StubVerifier::accepting());
    let request = InboundRequest::new("POST")
        .with_header("signaturecertchainurl", "https://signaturecertchainurl.com")
        .with_body(json!({}));

    let response = adapter.handle(&request).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, json!("Signature missing"));
}

#[tokio::test]
async fn test_failed_verification_is_400_invalid_signature() {
    let skill = SpeakingSkill::default();
    let verifier = StubVerifier::rejecting();
    let adapter = validating_adapter(skill.clone(), verifier.clone());

    let response = adapter.handle(&signed_request()).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, json!("Invalid signature"));
    assert_eq!(verifier.call_count(), 1);
    assert!(skill.seen.lock().unwrap().is_empty(), "skill must not run");
}

#[tokio::test]
async fn test_valid_request_returns_skill_response() {
    let skill = SpeakingSkill::default();
    let verifier = StubVerifier::accepting();
    let adapter = validating_adapter(skill.clone(), verifier.clone());

    let response = adapter.handle(&signed_request()).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "application/json");
    assert_eq!(
        response.body["response"]["outputSpeech"],
        json!({"type": "SSML", "ssml": "<speak>Success</speak>"})
    );

    let calls = verifier.calls.lock().unwrap();
    assert_eq!(
        calls[0],
        (CERT_URL.to_string(), "somesignature".to_string(), "{}".to_string())
    );

    let seen = skill.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, json!({}));
    assert_eq!(seen[0].1, SkillContext::default());
}

#[tokio::test]
async fn test_verifier_receives_exact_wire_body() {
    let verifier = StubVerifier::accepting();
    let adapter = validating_adapter(SpeakingSkill::default(), verifier.clone());
    let raw = r#"{"version":"1.0",  "request":{"type":"LaunchRequest"}}"#;
    let mut request = signed_request();
    request.body = Some(serde_json::from_str(raw).unwrap());
    request.raw_body = Some(raw.to_string());

    assert_eq!(adapter.handle(&request).await.status_code, 200);
    assert_eq!(verifier.calls.lock().unwrap()[0].2, raw);
}

#[tokio::test]
async fn test_skill_failure_is_500_with_message() {
    let adapter = RequestAdapter::builder()
        .skill(FailingSkill)
        .validate(false)
        .build()
        .unwrap();
    let request = InboundRequest::new("POST").with_body(json!({}));

    let response = adapter.handle(&request).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(response.content_type, "application/json");
    assert_eq!(response.body, json!("Test skill error"));
}

#[tokio::test]
async fn test_disabled_validation_skips_signature_checks() {
    let skill = SpeakingSkill::default();
    let verifier = StubVerifier::rejecting();
    let adapter = RequestAdapter::builder()
        .skill(skill.clone())
        .verifier(verifier.clone())
        .validate(false)
        .build()
        .unwrap();
    let request = InboundRequest::new("POST").with_body(json!({"request": {"type": "IntentRequest"}}));

    let response = adapter.handle(&request).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(verifier.call_count(), 0);
    assert_eq!(skill.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_adapter_serves_concurrent_requests() {
    let skill = SpeakingSkill::default();
    let adapter = Arc::new(validating_adapter(skill.clone(), StubVerifier::accepting()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let adapter = Arc::clone(&adapter);
            tokio::spawn(async move {
                let request = signed_request().with_body(json!({ "n": i }));
                adapter.handle(&request).await.status_code
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), 200);
    }
    assert_eq!(skill.seen.lock().unwrap().len(), 8);
}

#[test]
fn test_building_without_skill_fails() {
    let result = RequestAdapter::builder()
        .verifier(StubVerifier::accepting())
        .build();

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Option skill is not a skill handler"));
}
