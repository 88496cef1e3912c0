/// Library name stamped into generated output
pub const GENERATOR_NAME: &str = "cardscribe";

/// Library version stamped into generated output
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Value of the generator-identification property (e.g. `cardscribe 0.1.0`)
pub const PRODUCT_ID: &str = const_str::concat!(GENERATOR_NAME, " ", GENERATOR_VERSION);

/// Prefix for environment variables read by [`crate::config::Settings::load`]
pub const ENV_PREFIX: &str = "CARDSCRIBE";

/// Optional configuration file read by [`crate::config::Settings::load`]
pub const CONFIG_FILE: &str = "cardscribe.toml";
