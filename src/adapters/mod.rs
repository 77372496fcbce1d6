// Adapters layer: HTTP-backed implementations of the skill and verifier ports,
// plus the API Gateway proxy event mapping used by the Lambda host.

pub mod api_gateway;
pub mod http_skill;
pub mod http_verifier;

pub use api_gateway::{handle_proxy_event, ProxyRequest, ProxyResponse};
pub use http_skill::HttpSkillHandler;
pub use http_verifier::HttpSignatureVerifier;
