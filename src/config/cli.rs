use crate::core::Storage;
use crate::utils::error::{PbmError, Result};
use std::fs;
use std::path::PathBuf;

/// File system storage. Relative paths resolve against `base_path`.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    fn read_to_string(&self, path: &str) -> Result<String> {
        let full_path = self.resolve(path);
        fs::read_to_string(&full_path).map_err(|e| {
            PbmError::file_access(
                full_path.display().to_string(),
                format!("Couldn't open file to read: {}", e),
            )
        })
    }

    fn write_string(&self, path: &str, contents: &str) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                PbmError::file_access(
                    parent.display().to_string(),
                    format!("Couldn't create directory: {}", e),
                )
            })?;
        }

        fs::write(&full_path, contents).map_err(|e| {
            PbmError::file_access(
                full_path.display().to_string(),
                format!("Couldn't open file to write: {}", e),
            )
        })
    }
}
