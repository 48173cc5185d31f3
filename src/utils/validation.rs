use crate::core::ConfigProvider;
use crate::domain::model::SUPPORTED_DEGREES;
use crate::utils::error::{PbmError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(PbmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PbmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_extensions.contains(&extension) => Ok(()),
        Some(extension) => Err(PbmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(PbmError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_degree(field_name: &str, degree: i32) -> Result<()> {
    if SUPPORTED_DEGREES.contains(&degree) {
        return Ok(());
    }
    Err(PbmError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: degree.to_string(),
        reason: format!(
            "Degree must be one of {}",
            SUPPORTED_DEGREES.map(|d| d.to_string()).join(", ")
        ),
    })
}

/// Checks one rotation job; field names are used in error messages.
pub fn validate_job<C: ConfigProvider + ?Sized>(
    input_field: &str,
    export_field: &str,
    degree_field: &str,
    job: &C,
) -> Result<()> {
    validate_path(input_field, job.input_path())?;
    validate_file_extension(input_field, job.input_path(), &["pbm"])?;
    validate_path(export_field, job.export_path())?;
    // The written file is read back through the same .pbm-only reader.
    validate_file_extension(export_field, job.export_path(), &["pbm"])?;
    validate_degree(degree_field, job.degrees())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| PbmError::MissingConfigError {
        field: field_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("path", "images/in.pbm").is_ok());
        assert!(validate_path("path", "").is_err());
        assert!(validate_path("path", "   ").is_err());
        assert!(validate_path("path", "bad\0.pbm").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("path", "/tmp/a.pbm", &["pbm"]).is_ok());
        assert!(validate_file_extension("path", "/tmp/a.pgm", &["pbm"]).is_err());
        assert!(validate_file_extension("path", "/tmp/a", &["pbm"]).is_err());
    }

    #[test]
    fn test_validate_degree() {
        for degree in SUPPORTED_DEGREES {
            assert!(validate_degree("degree", degree).is_ok());
        }
        assert!(validate_degree("degree", 45).is_err());
        assert!(validate_degree("degree", -450).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(90);
        let missing: Option<i32> = None;
        assert_eq!(*validate_required_field("degree", &present).unwrap(), 90);
        assert!(matches!(
            validate_required_field("degree", &missing),
            Err(PbmError::MissingConfigError { .. })
        ));
    }
}
