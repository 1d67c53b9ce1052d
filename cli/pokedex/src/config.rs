//! Layered runtime configuration.
//!
//! Values come from defaults, then an optional TOML file, then `POKEDEX_*`
//! environment variables, each layer overriding the last.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use config::{Config as HierarchicalConfig, Environment, File, FileFormat};
use pokedex_core::favorites::FAVORITES_FILE;
use pokedex_core::view::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::loader::{DEFAULT_BATCH_SIZE, DEFAULT_LIST_LIMIT};

/// Name of the directory holding pokedex data (favorites, config).
pub const POKEDEX_DIR_NAME: &str = "pokedex";

const ENV_PREFIX: &str = "POKEDEX";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the upstream catalog API.
    pub catalog_url: String,
    /// Bound on the initial entry list request.
    pub list_limit: u32,
    /// Detail fetches issued concurrently per batch.
    pub batch_size: NonZeroUsize,
    /// Entries shown per page.
    pub page_size: NonZeroUsize,
    /// Directory where persistent data (the favorites file) lives.
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(POKEDEX_DIR_NAME);
        Self {
            catalog_url: pokedex_catalog::DEFAULT_CATALOG_URL.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            batch_size: DEFAULT_BATCH_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            data_dir,
        }
    }
}

/// Error returned by [`Config::parse`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to assemble configuration")]
    Assemble(#[source] config::ConfigError),
    #[error("invalid configuration value")]
    Deserialize(#[source] config::ConfigError),
}

impl Config {
    /// Resolve configuration from defaults and the process environment.
    pub fn parse() -> Result<Self, ConfigError> {
        Self::parse_with_file(None)
    }

    /// Resolve configuration, additionally layering a TOML file (when it
    /// exists) between the defaults and the environment.
    pub fn parse_with_file(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = HierarchicalConfig::builder().add_source(
            HierarchicalConfig::try_from(&Self::default()).map_err(ConfigError::Assemble)?,
        );

        if let Some(path) = config_file {
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let resolved = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(ConfigError::Assemble)?;

        resolved.try_deserialize().map_err(ConfigError::Deserialize)
    }

    /// Location of the favorites file under the data directory.
    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir.join(FAVORITES_FILE)
    }
}
