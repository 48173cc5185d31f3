pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{engine::RotateEngine, pipeline::SimplePipeline};
pub use domain::model::{Direction, Pixel, PixelMatrix, Rotation, RotationReport};
pub use utils::error::{PbmError, Result};
