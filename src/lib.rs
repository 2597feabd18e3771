// Courier - declarative HTTP requests with path-addressed body patching
//
// This library bundles the request configuration loader and the client that
// mutates and sends the configured request.

// Re-export client functionality
pub use courier_client::*;

// Configuration loading
pub use courier_config::{
    ConfigError, ConfigLoader, ConfigValidator, FileFormat, HeaderEntry, Validate,
    load_validated,
};

/// Crate-qualified access to the configuration layer.
pub use courier_config as config;

// Prelude for common imports
pub mod prelude {
    pub use courier_client::prelude::*;
    pub use courier_config::{ConfigLoader, HeaderEntry, load_validated};
}
