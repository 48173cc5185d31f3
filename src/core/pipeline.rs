use crate::core::{parser, rotation, serializer, validator};
use crate::core::{ConfigProvider, Pipeline, PixelMatrix, Storage};
use crate::domain::model::Rotation;
use crate::utils::error::{PbmError, Result};

pub const PBM_EXTENSION: &str = ".pbm";

/// Read, rotate and write a single PBM file through a [`Storage`] backend.
pub struct SimplePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SimplePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn read_document(&self, path: &str) -> Result<String> {
        if !path.ends_with(PBM_EXTENSION) {
            return Err(PbmError::file_access(path, "File must have a pbm extension"));
        }
        self.storage.read_to_string(path)
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for SimplePipeline<S, C> {
    fn source(&self) -> &str {
        self.config.input_path()
    }

    fn rotation(&self) -> Result<Rotation> {
        Rotation::from_degrees(self.config.degrees())
    }

    fn extract(&self) -> Result<PixelMatrix> {
        let path = self.config.input_path();
        tracing::debug!("Reading {}", path);
        let text = self.read_document(path)?;

        validator::validate(&text)?;
        let parsed = parser::parse(&text)?;
        if let Some((first, second)) = parsed.declared {
            tracing::debug!("Declared size: {} {}", first, second);
        }

        Ok(parsed.matrix)
    }

    fn transform(&self, matrix: PixelMatrix) -> Result<PixelMatrix> {
        let rotation = self.rotation()?;
        if rotation.is_identity() {
            tracing::debug!("{} degrees is an identity rotation", rotation.degrees());
            return Ok(matrix);
        }
        rotation::rotate(&matrix, rotation)
    }

    fn load(&self, matrix: PixelMatrix) -> Result<String> {
        let path = self.config.export_path();
        let text = serializer::serialize(&matrix, path);

        tracing::debug!("Writing {} bytes to {}", text.len(), path);
        self.storage.write_string(path, &text)?;

        // Read the file back and hold it to the same rules as the input.
        let written = self.read_document(path)?;
        validator::validate(&written).map_err(|source| PbmError::OutputValidation {
            path: path.to_string(),
            source: Box::new(source),
        })?;

        Ok(path.to_string())
    }
}
