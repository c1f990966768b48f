use std::path::Path;

use burn::{
    nn::{
        conv::{Conv2d, Conv2dConfig},
        interpolate::{Interpolate2d, Interpolate2dConfig, InterpolateMode},
        pool::{MaxPool2d, MaxPool2dConfig},
    },
    prelude::*,
    tensor::activation::softmax,
};
use derive_new::new;

use super::blocks::{DoubleConv, DoubleConvConfig};
use crate::error::NetworkError;

/// U-Net style encoder/decoder producing per-pixel class probabilities.
///
/// Three pooled encoder stages feed a bottleneck; each decoder stage upsamples,
/// concatenates the encoder output of the same resolution and refines it.
#[derive(Module, Debug)]
pub struct FoInternNet<B: Backend> {
    down_block_1: DoubleConv<B>,
    down_block_2: DoubleConv<B>,
    down_block_3: DoubleConv<B>,
    down_block_4: DoubleConv<B>,
    max_pool: MaxPool2d,
    upsample: Interpolate2d,
    up_block_3: DoubleConv<B>,
    up_block_2: DoubleConv<B>,
    up_block_1: DoubleConv<B>,
    conv_last: Conv2d<B>,

    input_size: usize,
    in_channels: usize,
    num_classes: usize,
}

#[derive(Config, Debug)]
pub struct FoInternNetConfig {
    /// Nominal side length of the square input images.
    pub input_size: usize,
    pub num_classes: usize,
    #[config(default = "3")]
    pub in_channels: usize,
    #[config(default = "64")]
    pub base_channels: usize,
}

/// Dimensions of an input batch that passed [`FoInternNet::validate_input`].
#[derive(new, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputShape {
    pub batch_size: usize,
    pub channels: usize,
    pub height: usize,
    pub width: usize,
}

impl FoInternNetConfig {
    /// Output widths of the four encoder stages.
    pub fn stage_channels(&self) -> [usize; 4] {
        let base = self.base_channels;
        [base, base * 2, base * 4, base * 8]
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        Ok(Self::load(path)?)
    }

    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        Ok(self.save(path)?)
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> FoInternNet<B> {
        self.assertions();
        let [c1, c2, c3, c4] = self.stage_channels();

        tracing::debug!(
            "Building FoInternNet: {} -> {:?} -> {} classes",
            self.in_channels,
            [c1, c2, c3, c4],
            self.num_classes
        );

        FoInternNet {
            down_block_1: DoubleConvConfig::new(self.in_channels, c1).init(device),
            down_block_2: DoubleConvConfig::new(c1, c2).init(device),
            down_block_3: DoubleConvConfig::new(c2, c3).init(device),
            down_block_4: DoubleConvConfig::new(c3, c4).init(device),
            max_pool: MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init(),
            // `Linear` on 4-D input is bilinear, with corner pixels mapped onto corner pixels.
            upsample: Interpolate2dConfig::new()
                .with_scale_factor(Some([2.0, 2.0]))
                .with_mode(InterpolateMode::Linear)
                .init(),
            up_block_3: DoubleConvConfig::new(c4 + c3, c3).init(device),
            up_block_2: DoubleConvConfig::new(c3 + c2, c2).init(device),
            up_block_1: DoubleConvConfig::new(c2 + c1, c1).init(device),
            conv_last: Conv2dConfig::new([c1, self.num_classes], [1, 1]).init(device),
            input_size: self.input_size,
            in_channels: self.in_channels,
            num_classes: self.num_classes,
        }
    }

    fn assertions(&self) {
        assert!(
            self.num_classes > 0,
            "Number of classes must be positive. Got {}",
            self.num_classes
        );
        assert!(
            self.in_channels > 0,
            "Input channels must be positive. Got {}",
            self.in_channels
        );
        assert!(
            self.base_channels > 0,
            "Base channels must be positive. Got {}",
            self.base_channels
        );
    }
}

impl<B: Backend> FoInternNet<B> {
    /// Three 2x poolings: height and width must be multiples of this.
    pub const SPATIAL_DIVISOR: usize = 8;

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn in_channels(&self) -> usize {
        self.in_channels
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Class probabilities, `[batch, num_classes, height, width]`.
    ///
    /// No shape checks are made here; see [`FoInternNet::try_forward`].
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 4> {
        softmax(self.forward_logits(images), 1)
    }

    /// Raw class scores before the channel softmax.
    pub fn forward_logits(&self, images: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = images;
        tracing::debug!("Input: {:?}", x.dims());

        let skip_features_1 = self.down_block_1.forward(x);
        let x = self.max_pool.forward(skip_features_1.clone());
        tracing::debug!("Down 1: {:?}", skip_features_1.dims());

        let skip_features_2 = self.down_block_2.forward(x);
        let x = self.max_pool.forward(skip_features_2.clone());
        tracing::debug!("Down 2: {:?}", skip_features_2.dims());

        let skip_features_3 = self.down_block_3.forward(x);
        let x = self.max_pool.forward(skip_features_3.clone());
        tracing::debug!("Down 3: {:?}", skip_features_3.dims());

        let x = self.down_block_4.forward(x);
        tracing::debug!("Bottleneck: {:?}", x.dims());

        let x = self.upsample.forward(x);
        let x = Tensor::cat(vec![x, skip_features_3], 1);
        let x = self.up_block_3.forward(x);
        tracing::debug!("Up 3: {:?}", x.dims());

        let x = self.upsample.forward(x);
        let x = Tensor::cat(vec![x, skip_features_2], 1);
        let x = self.up_block_2.forward(x);
        tracing::debug!("Up 2: {:?}", x.dims());

        let x = self.upsample.forward(x);
        let x = Tensor::cat(vec![x, skip_features_1], 1);
        let x = self.up_block_1.forward(x);
        tracing::debug!("Up 1: {:?}", x.dims());

        let x = self.conv_last.forward(x);
        tracing::debug!("Logits: {:?}", x.dims());

        x
    }

    /// Most likely class per pixel, `[batch, 1, height, width]`.
    pub fn predict(&self, images: Tensor<B, 4>) -> Tensor<B, 4, Int> {
        self.forward_logits(images).argmax(1)
    }

    pub fn validate_input(&self, dims: [usize; 4]) -> crate::Result<InputShape> {
        let [batch_size, channels, height, width] = dims;
        let divisor = Self::SPATIAL_DIVISOR;

        if batch_size == 0 {
            return Err(NetworkError::EmptyBatch);
        }

        if channels != self.in_channels {
            return Err(NetworkError::ChannelMismatch {
                expected: self.in_channels,
                actual: channels,
            });
        }

        if height == 0 || width == 0 || height % divisor != 0 || width % divisor != 0 {
            return Err(NetworkError::SpatialSize {
                height,
                width,
                divisor,
            });
        }

        Ok(InputShape::new(batch_size, channels, height, width))
    }

    pub fn try_forward(&self, images: Tensor<B, 4>) -> crate::Result<Tensor<B, 4>> {
        self.validate_input(images.dims())?;
        Ok(self.forward(images))
    }
}
