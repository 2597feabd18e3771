// Request configuration validation

use crate::{ConfigError, Result};

/// Trait for validating configuration
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Configuration validator with rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate that a value is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                field
            )));
        }
        Ok(())
    }

    /// Validate that a value is a usable HTTP method token
    pub fn is_method(value: &str, field: &str) -> Result<()> {
        Self::not_empty(value, field)?;
        http::Method::from_bytes(value.trim().to_uppercase().as_bytes()).map_err(|_| {
            ConfigError::ValidationError(format!("{} is not a valid HTTP method: {}", field, value))
        })?;
        Ok(())
    }

    /// Validate that a value is an absolute http(s) URL
    pub fn is_url(value: &str, field: &str) -> Result<()> {
        let parsed = url::Url::parse(value).map_err(|e| {
            ConfigError::ValidationError(format!("{} must be a valid URL: {}", field, e))
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ConfigError::ValidationError(format!(
                "{} must use http or https, got {}",
                field, scheme
            ))),
        }
    }

    /// Validate that an optional number is strictly positive
    pub fn positive(value: Option<u64>, field: &str) -> Result<()> {
        if value == Some(0) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be greater than zero",
                field
            )));
        }
        Ok(())
    }
}
