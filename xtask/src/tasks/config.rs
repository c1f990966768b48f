use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::NetworkArgs;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub network: NetworkArgs,

    #[arg(short, long, default_value = "fointern_net.json")]
    pub output: PathBuf,
}

pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = args.network.network_config()?;

    config
        .to_file(&args.output)
        .with_context(|| format!("Failed to write config to {}", args.output.display()))?;

    tracing::info!("Wrote network configuration to {}", args.output.display());
    Ok(())
}
