use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, GateError>;

/// Why a single inbound request was refused or failed.
///
/// `Display` is the message placed in the response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Not Acceptable")]
    NotAcceptable,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Signature certificate chain URL missing")]
    MissingCertChainUrl,

    #[error("Signature missing")]
    MissingSignature,

    #[error("Bad Request")]
    MissingBody,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("{0}")]
    Handler(String),
}

impl RequestError {
    pub fn status_code(&self) -> u16 {
        match self {
            RequestError::NotAcceptable => 406,
            RequestError::MethodNotAllowed => 405,
            RequestError::MissingCertChainUrl
            | RequestError::MissingSignature
            | RequestError::MissingBody
            | RequestError::InvalidSignature => 400,
            RequestError::Handler(_) => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

/// Failure reported by a skill handler.
#[derive(Error, Debug)]
pub enum SkillError {
    #[error("{0}")]
    Failed(String),

    #[error("Skill endpoint returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl SkillError {
    pub fn failed(message: impl Into<String>) -> Self {
        SkillError::Failed(message.into())
    }
}

/// Failure of the request authenticity check.
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("Invalid certificate chain URL '{url}': {reason}")]
    InvalidCertUrl { url: String, reason: String },

    #[error("Invalid request timestamp: {reason}")]
    InvalidTimestamp { reason: String },

    #[error("Verification rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Verification service unavailable: {0}")]
    Unavailable(String),
}
