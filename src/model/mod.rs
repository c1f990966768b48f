mod blocks;
mod unet;

pub use blocks::{DoubleConv, DoubleConvConfig};

pub use unet::{FoInternNet, FoInternNetConfig, InputShape};
