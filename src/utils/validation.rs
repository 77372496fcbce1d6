use crate::utils::error::{GateError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(GateError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(GateError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(GateError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| GateError::MissingConfig {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GateError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(GateError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
