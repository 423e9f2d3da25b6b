//! Flags and logging setup shared by the binaries.

use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use tracing_subscriber::EnvFilter;

use crate::canon::TieBreak;
use crate::config::RunConfig;

/// Where the board size and run settings come from.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// JSON file with run settings; flags override it
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Board side N
    #[arg(short = 'n', long = "size")]
    pub size: Option<usize>,
}

impl ConfigArgs {
    /// The driver's default size, then the config file, then `--size`.
    pub fn resolve(&self, default_size: usize) -> Result<RunConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path, default_size)?,
            None => RunConfig {
                size: default_size,
                ..RunConfig::default()
            },
        };
        if let Some(size) = self.size {
            config.size = size;
        }
        config.validate()?;
        Ok(config)
    }
}

/// [`ConfigArgs`] plus the flags that steer canonicalization.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: ConfigArgs,

    /// Which of several equally scored translations is kept
    #[arg(long = "tie-break", value_enum)]
    pub tie_break: Option<TieBreak>,
}

impl RunArgs {
    pub fn resolve(&self, default_size: usize) -> Result<RunConfig, Box<dyn Error>> {
        let mut config = self.source.resolve(default_size)?;
        if let Some(tie_break) = self.tie_break {
            config.tie_break = tie_break;
        }
        Ok(config)
    }

    /// Resolves settings for a board whose side is already known, rejecting
    /// a `--size` or config size that disagrees with it.
    pub fn resolve_for_board(&self, board_size: usize) -> Result<RunConfig, Box<dyn Error>> {
        let config = self.resolve(board_size)?;
        if config.size != board_size {
            return Err(format!(
                "board is {board_size}x{board_size} but size {} was requested",
                config.size
            )
            .into());
        }
        Ok(config)
    }
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`, `info` by default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
