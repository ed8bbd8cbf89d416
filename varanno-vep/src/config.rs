use std::fs::read_to_string;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::client::VepClient;
use super::consts::{DEFAULT_SPECIES, DEFAULT_TIMEOUT_SECS, MAX_BATCH_SIZE};
use super::utils::{get_default_batch_size, get_default_vep_api};

///
/// Settings of an annotation run.
///
/// Every field is optional: values given on the command line override the ones
/// read from a TOML file, which in turn override the environment defaults.
///
/// ```toml
/// api = "https://grch37.rest.ensembl.org"
/// species = "human"
/// batch_size = 50
/// timeout_secs = 120
/// ```
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnnotatorConfig {
    pub api: Option<String>,
    pub species: Option<String>,
    pub batch_size: Option<usize>,
    pub timeout_secs: Option<u64>,
}

#[derive(Error, Debug)]
pub enum AnnotatorConfigError {
    #[error("Batch size must be between 1 and {max}, got {0}", max = MAX_BATCH_SIZE)]
    InvalidBatchSize(usize),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type AnnotatorConfigResult<T> = std::result::Result<T, AnnotatorConfigError>;

impl AnnotatorConfig {
    ///
    /// Read a config from a TOML file.
    ///
    /// # Arguments
    /// * `path` - path to the `.toml` file
    pub fn from_path(path: &Path) -> AnnotatorConfigResult<Self> {
        let raw = read_to_string(path)?;
        let config: AnnotatorConfig = toml::from_str(&raw)?;
        if let Some(batch_size) = config.batch_size {
            validate_batch_size(batch_size)?;
        }
        Ok(config)
    }

    /// Layer `overrides` on top of `self`; fields set in `overrides` win.
    pub fn merge(self, overrides: AnnotatorConfig) -> AnnotatorConfig {
        AnnotatorConfig {
            api: overrides.api.or(self.api),
            species: overrides.species.or(self.species),
            batch_size: overrides.batch_size.or(self.batch_size),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
        }
    }

    pub fn api(&self) -> String {
        self.api.clone().unwrap_or_else(get_default_vep_api)
    }

    pub fn species(&self) -> String {
        self.species
            .clone()
            .unwrap_or_else(|| DEFAULT_SPECIES.to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    /// Resolved batch size, checked against the service limit.
    pub fn batch_size(&self) -> AnnotatorConfigResult<usize> {
        validate_batch_size(self.batch_size.unwrap_or_else(get_default_batch_size))
    }

    /// Build a [VepClient] from the resolved settings.
    pub fn client(&self) -> anyhow::Result<VepClient> {
        VepClient::builder()
            .with_api(self.api())
            .with_species(self.species())
            .with_timeout(self.timeout())
            .finish()
    }
}

fn validate_batch_size(batch_size: usize) -> AnnotatorConfigResult<usize> {
    if (1..=MAX_BATCH_SIZE).contains(&batch_size) {
        Ok(batch_size)
    } else {
        Err(AnnotatorConfigError::InvalidBatchSize(batch_size))
    }
}
