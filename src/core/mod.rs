pub mod adapter;
pub mod negotiation;

pub use crate::domain::model::{InboundRequest, OutboundResponse, SkillContext};
pub use crate::domain::ports::{ConfigProvider, SignatureVerifier, SkillHandler};
pub use crate::utils::error::Result;
