use crate::domain::model::{PixelMatrix, Rotation};
use crate::utils::error::Result;

pub trait Storage {
    fn read_to_string(&self, path: &str) -> Result<String>;
    fn write_string(&self, path: &str, contents: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read_to_string(&self, path: &str) -> Result<String> {
        (**self).read_to_string(path)
    }

    fn write_string(&self, path: &str, contents: &str) -> Result<()> {
        (**self).write_string(path, contents)
    }
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn export_path(&self) -> &str;
    fn degrees(&self) -> i32;
}

pub trait Pipeline {
    fn source(&self) -> &str;
    fn rotation(&self) -> Result<Rotation>;
    /// Read, validate and parse the input image.
    fn extract(&self) -> Result<PixelMatrix>;
    fn transform(&self, matrix: PixelMatrix) -> Result<PixelMatrix>;
    /// Write the image and check the written file; returns the output path.
    fn load(&self, matrix: PixelMatrix) -> Result<String>;
}
