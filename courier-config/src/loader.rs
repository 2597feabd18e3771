// Request configuration loaders

use crate::{ConfigError, RequestConfig, Result};
use std::fs;
use std::path::Path;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FileFormat {
    #[default]
    Json,
    Toml,
}

impl FileFormat {
    /// Map a file extension to a format, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }

    /// Infer the format from a path, falling back to JSON.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }
}

/// Request configuration loader
#[derive(Debug, Default)]
pub struct ConfigLoader {
    format: FileFormat,
}

impl ConfigLoader {
    /// Create a loader for the given format.
    pub fn new(format: FileFormat) -> Self {
        Self { format }
    }

    /// Load from a file path when one exists, otherwise treat `input` as
    /// literal JSON.
    pub fn load(input: &str) -> Result<RequestConfig> {
        let path = Path::new(input);
        if path.is_file() {
            return Self::new(FileFormat::from_path(path)).load_file(path);
        }

        Self::new(FileFormat::Json)
            .parse(input)
            .map_err(|e| ConfigError::LoadError(format!("not a readable file or JSON string: {}", e)))
    }

    /// Load configuration from file
    ///
    /// Read failures surface as [`ConfigError::IoError`].
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<RequestConfig> {
        let content = fs::read_to_string(path)?;
        self.parse(&content)
    }

    /// Parse configuration from string
    pub fn parse(&self, content: &str) -> Result<RequestConfig> {
        match self.format {
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("JSON parse error: {}", e))),
            FileFormat::Toml => toml::from_str(content)
                .map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e))),
        }
    }
}
