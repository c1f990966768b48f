use anyhow::Result;
use burn::{prelude::*, tensor::Distribution};
use clap::Args;
use fointern_net::FoInternNet;

use super::NetworkArgs;

#[cfg(feature = "wgpu")]
type MyBackend = burn::backend::Wgpu<f32, i32>;
#[cfg(not(feature = "wgpu"))]
type MyBackend = burn::backend::NdArray<f32>;

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub network: NetworkArgs,

    #[arg(short, long, default_value_t = 1)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

pub fn run(args: &SummaryArgs) -> Result<()> {
    let config = args.network.network_config()?;

    tracing::info!("Initializing device...");
    let device = <MyBackend as Backend>::Device::default();
    MyBackend::seed(args.seed);

    let model: FoInternNet<MyBackend> = config.init(&device);
    tracing::info!(
        "FoInternNet with encoder channels {:?}: {} parameters",
        config.stage_channels(),
        model.num_params()
    );

    let size = model.input_size();
    let images = Tensor::<MyBackend, 4>::random(
        [args.batch_size, model.in_channels(), size, size],
        Distribution::Default,
        &device,
    );

    let output = model.try_forward(images)?;
    let sums = output.clone().sum_dim(1);
    let min = sums.clone().min().into_scalar().elem::<f32>();
    let max = sums.max().into_scalar().elem::<f32>();

    tracing::info!("Output shape: {:?}", output.dims());
    tracing::info!("Per-pixel probability sums within [{min:.6}, {max:.6}]");
    Ok(())
}
