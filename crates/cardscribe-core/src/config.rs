use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

use crate::constants::{CONFIG_FILE, ENV_PREFIX};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub writer: WriterConfig,
}

/// What the dispatcher does with a property whose kind has no scribe and is
/// not part of the standard catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKindPolicy {
    /// Omit the property without reporting it.
    #[default]
    Skip,
    /// Omit the property and record a warning in the write report.
    Warn,
    /// Abort the write.
    Fail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriterConfig {
    pub add_generator_marker: bool,
    pub version_strict: bool,
    pub unknown_kinds: UnknownKindPolicy,
    pub target_version: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            add_generator_marker: true,
            version_strict: true,
            unknown_kinds: UnknownKindPolicy::Skip,
            target_version: "4.0".to_string(),
        }
    }
}

impl Settings {
    /// ## Summary
    /// Returns a configuration builder pre-populated with the writer defaults.
    ///
    /// ## Errors
    /// Returns an error if a default value cannot be set.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("writer.add_generator_marker", true)?
            .set_default("writer.version_strict", true)?
            .set_default("writer.unknown_kinds", "skip")?
            .set_default("writer.target_version", "4.0")?)
    }

    /// ## Summary
    /// Loads configuration from environment variables and the optional
    /// `cardscribe.toml` file into a `Settings`.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            // Env vars, e.g. CARDSCRIBE_WRITER__VERSION_STRICT=false
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(settings = ?settings, "Configuration loaded");
    Ok(settings)
}
