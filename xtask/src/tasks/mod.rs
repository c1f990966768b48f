pub mod config;
pub mod summary;

use anyhow::{Context, Result};
use clap::Args;
use fointern_net::FoInternNetConfig;
use std::path::PathBuf;

/// Network shape flags shared by the tasks, overridden by `--config`.
#[derive(Args, Debug)]
pub struct NetworkArgs {
    /// JSON configuration written by the `config` task
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = 256)]
    pub input_size: usize,

    #[arg(long, default_value_t = 2)]
    pub num_classes: usize,

    #[arg(long, default_value_t = 3)]
    pub in_channels: usize,

    #[arg(long, default_value_t = 64)]
    pub base_channels: usize,
}

impl NetworkArgs {
    pub fn network_config(&self) -> Result<FoInternNetConfig> {
        match &self.config {
            Some(path) => FoInternNetConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display())),
            None => Ok(FoInternNetConfig::new(self.input_size, self.num_classes)
                .with_in_channels(self.in_channels)
                .with_base_channels(self.base_channels)),
        }
    }
}
