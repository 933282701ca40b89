use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{
    ApiConfig, Config, DisplaySettings, FilterSettings, LoggingConfig, OutputFormat, ServerConfig,
};

/// The file read when no explicit path is given. It may be absent.
pub const DEFAULT_CONFIG_FILE: &str = "brentwatch.toml";

/// Prefix of environment overrides, e.g. `BRENTWATCH__API__BASE_URL`.
pub const ENV_PREFIX: &str = "BRENTWATCH";

/// Loads the application configuration.
///
/// Sources are layered, later ones winning: built-in defaults, the config file,
/// then `BRENTWATCH__*` environment variables. An explicit `path` must exist;
/// the default file is optional. The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(p) => config::File::from(p).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}
