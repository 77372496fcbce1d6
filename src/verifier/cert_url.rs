use crate::utils::error::VerificationError;
use url::Url;

pub const CERT_HOST: &str = "s3.amazonaws.com";
pub const CERT_PATH_PREFIX: &str = "/echo.api/";
pub const CERT_PORT: u16 = 443;

/// Checks the certificate chain URL against the platform's published shape.
///
/// The URL is normalized before the path check, so `/echo.api/../x` is refused.
pub fn validate_cert_chain_url(raw: &str) -> Result<Url, VerificationError> {
    let invalid = |reason: String| VerificationError::InvalidCertUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(format!("unparseable URL: {}", e)))?;

    // Url lowercases scheme and host while parsing
    if url.scheme() != "https" {
        return Err(invalid(format!("scheme must be https, got {}", url.scheme())));
    }

    match url.host_str() {
        Some(host) if host == CERT_HOST => {}
        Some(host) => return Err(invalid(format!("host must be {}, got {}", CERT_HOST, host))),
        None => return Err(invalid("missing host".to_string())),
    }

    if !url.path().starts_with(CERT_PATH_PREFIX) {
        return Err(invalid(format!(
            "path must start with {}, got {}",
            CERT_PATH_PREFIX,
            url.path()
        )));
    }

    // port() is None for the scheme default, so an explicit :443 passes
    if let Some(port) = url.port() {
        if port != CERT_PORT {
            return Err(invalid(format!("port must be {}, got {}", CERT_PORT, port)));
        }
    }

    Ok(url)
}
