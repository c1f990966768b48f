use burn::{
    nn::{
        BatchNorm, BatchNormConfig, PaddingConfig2d, Relu,
        conv::{Conv2d, Conv2dConfig},
    },
    prelude::*,
};

/// Two stacked `conv 3x3 -> batch norm -> relu` units.
///
/// Spatial size is preserved, only the channel count changes.
#[derive(Module, Debug)]
pub struct DoubleConv<B: Backend> {
    conv1: Conv2d<B>,
    norm1: BatchNorm<B, 2>,
    conv2: Conv2d<B>,
    norm2: BatchNorm<B, 2>,
    activation: Relu,
}

impl<B: Backend> DoubleConv<B> {
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv1.forward(x);
        let x = self.norm1.forward(x);
        let x = self.activation.forward(x);

        let x = self.conv2.forward(x);
        let x = self.norm2.forward(x);

        self.activation.forward(x)
    }
}

#[derive(Config, Debug)]
pub struct DoubleConvConfig {
    pub input_channels: usize,
    pub output_channels: usize,
    /// Width between the two convolutions. Falls back to `output_channels`.
    pub mid_channels: Option<usize>,
}

impl DoubleConvConfig {
    pub fn mid_channels(&self) -> usize {
        self.mid_channels.unwrap_or(self.output_channels)
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> DoubleConv<B> {
        self.assertions();
        let mid_channels = self.mid_channels();

        DoubleConv {
            conv1: Conv2dConfig::new([self.input_channels, mid_channels], [3, 3])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device),
            norm1: BatchNormConfig::new(mid_channels).init(device),
            conv2: Conv2dConfig::new([mid_channels, self.output_channels], [3, 3])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device),
            norm2: BatchNormConfig::new(self.output_channels).init(device),
            activation: Relu::new(),
        }
    }

    fn assertions(&self) {
        assert!(
            self.input_channels > 0 && self.output_channels > 0,
            "Block channels must be positive. Got {} -> {}",
            self.input_channels,
            self.output_channels
        );
        assert!(
            self.mid_channels() > 0,
            "Middle channels must be positive. Got {}",
            self.mid_channels()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{backend::NdArray, tensor::Distribution};

    type TestBackend = NdArray;

    #[test]
    fn mid_channels_defaults_to_output() {
        let config = DoubleConvConfig::new(3, 64);
        assert_eq!(config.mid_channels(), 64);

        let config = config.with_mid_channels(Some(32));
        assert_eq!(config.mid_channels(), 32);
    }

    #[test]
    fn preserves_spatial_size() {
        let device = Default::default();
        let block = DoubleConvConfig::new(3, 8).init::<TestBackend>(&device);

        let x = Tensor::<TestBackend, 4>::random([2, 3, 12, 10], Distribution::Default, &device);
        let y = block.forward(x);

        assert_eq!(y.dims(), [2, 8, 12, 10]);
    }

    #[test]
    fn custom_mid_channels_still_outputs_requested_width() {
        let device = Default::default();
        let block = DoubleConvConfig::new(4, 6)
            .with_mid_channels(Some(16))
            .init::<TestBackend>(&device);

        let x = Tensor::<TestBackend, 4>::random([1, 4, 8, 8], Distribution::Default, &device);

        assert_eq!(block.forward(x).dims(), [1, 6, 8, 8]);
    }

    #[test]
    fn output_is_non_negative() {
        let device = Default::default();
        let block = DoubleConvConfig::new(2, 4).init::<TestBackend>(&device);

        let x = Tensor::<TestBackend, 4>::random(
            [1, 2, 8, 8],
            Distribution::Uniform(-1.0, 1.0),
            &device,
        );
        let min = block
            .forward(x)
            .min()
            .into_scalar()
            .elem::<f32>();

        assert!(min >= 0.0, "relu output went negative: {min}");
    }

    #[test]
    #[should_panic(expected = "Block channels must be positive")]
    fn rejects_zero_channels() {
        let device = Default::default();
        let _ = DoubleConvConfig::new(0, 8).init::<TestBackend>(&device);
    }
}
