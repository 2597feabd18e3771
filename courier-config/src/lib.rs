// Declarative request configuration for Courier

pub mod error;
pub mod loader;
pub mod model;
pub mod validation;

pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use model::{HeaderEntry, RequestConfig};
pub use validation::{ConfigValidator, Validate};

/// Load a request configuration from a file path or a literal JSON string,
/// then validate it.
pub fn load_validated(input: &str) -> Result<RequestConfig> {
    let config = ConfigLoader::load(input)?;
    config.validate()?;
    Ok(config)
}
