pub mod error;
pub mod model;

pub use error::{NetworkError, Result};

pub use model::FoInternNet;
pub use model::FoInternNetConfig;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
