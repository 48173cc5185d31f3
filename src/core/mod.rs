pub mod engine;
pub mod parser;
pub mod pipeline;
pub mod rotation;
pub mod serializer;
pub mod validator;

pub use crate::domain::model::{PixelMatrix, RotationReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
