//! Configuration management for catalogue generation.
//!
//! This module defines the `Config` struct that drives a generation run. The
//! configuration can be loaded from a YAML file, created programmatically, or
//! assembled from command-line arguments.
//!
//! # Examples
//!
//! ```no_run
//! use chainapi_core::config::Config;
//! use chainapi_core::options::BodyParamPolicy;
//!
//! // Create a new config programmatically
//! let mut config = Config::new("inputs/swagger_info", "src/types/methods/rest.ts");
//! config.body_params = BodyParamPolicy::Body;
//! config.chains = vec!["evmos".to_string()];
//! ```

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

use crate::options::{BodyParamPolicy, GenerateOptions, RefPolicy};

// External imports (alphabetized)
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Configuration for a generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding one Swagger document per chain
    pub input_dir: PathBuf,

    /// File the TypeScript catalogue is written to
    pub output_path: PathBuf,

    /// Where body parameters are listed
    #[serde(default)]
    pub body_params: BodyParamPolicy,

    /// How resolvable references are rendered
    #[serde(default)]
    pub refs: RefPolicy,

    /// Chains to include (empty means all)
    #[serde(default)]
    pub chains: Vec<String>,
}

impl Config {
    /// Create a new Config with default policies
    pub fn new(input_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_path: output_path.into(),
            body_params: BodyParamPolicy::default(),
            refs: RefPolicy::default(),
            chains: Vec::new(),
        }
    }

    /// Load configuration from a file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// The generation options described by this config
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            body_params: self.body_params,
            refs: self.refs,
            chains: self.chains.clone(),
        }
    }
}
