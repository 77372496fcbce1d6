pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod verifier;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::build_adapter;
pub use config::{lambda::LambdaConfig, toml_config::GateConfig};
pub use core::adapter::{AdapterConfig, RequestAdapter};
pub use domain::model::{InboundRequest, OutboundResponse, SkillContext};
pub use domain::ports::{SignatureVerifier, SkillHandler};
pub use utils::error::{GateError, RequestError, Result, SkillError, VerificationError};
