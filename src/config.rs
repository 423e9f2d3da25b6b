//! Run configuration shared by the command-line drivers.
//!
//! Values come from [`RunConfig::default`], optionally replaced by a JSON
//! file, and finally by command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::canon::{Canonicalizer, Kernel, PENALTY_KERNEL, TieBreak};
use crate::codec::{self, ShapeError};
use crate::records::RecordLayout;

const DEFAULT_SIZE: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Board side `N`, fixed for the whole run.
    pub size: usize,
    pub tie_break: TieBreak,
    pub kernel: Kernel,
    /// Overrides the driver's default record layout for `size`.
    pub layout: Option<RecordLayout>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            tie_break: TieBreak::default(),
            kernel: PENALTY_KERNEL,
            layout: None,
        }
    }
}

impl RunConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`from_json_str`](Self::from_json_str), but a document without
    /// `"size"` takes `default_size` instead of the global default.
    pub fn from_json_str_or_size(s: &str, default_size: usize) -> Result<Self, ConfigError> {
        let mut value: serde_json::Value = serde_json::from_str(s)?;
        if let Some(map) = value.as_object_mut() {
            map.entry("size").or_insert_with(|| default_size.into());
        }
        let config: RunConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path, default_size: usize) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str_or_size(&text, default_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        codec::check_size(self.size)?;
        Ok(())
    }

    pub fn canonicalizer(&self) -> Canonicalizer {
        Canonicalizer::new(self.kernel, self.tie_break)
    }

    pub fn layout_or(&self, default: fn(usize) -> RecordLayout) -> RecordLayout {
        self.layout.unwrap_or_else(|| default(self.size))
    }
}
