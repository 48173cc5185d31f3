use thiserror::Error;

#[derive(Error, Debug)]
pub enum PbmError {
    #[error("Couldn't access file '{path}': {reason}")]
    FileAccess { path: String, reason: String },

    #[error("File not in pbm format: expected a magic number line followed by image data")]
    EmptyOrTooShort,

    #[error("File type not matching P1, found '{found}' on the first line")]
    BadMagicNumber { found: String },

    #[error("Syntax issue on line {line}: a comment must start with '#'")]
    MissingCommentMarker { line: usize },

    #[error("Line {line} is {length} characters long, the P1 limit is 70 including white space")]
    LineTooLong { line: usize, length: usize },

    #[error("There should be exactly one image in the file, found no pixel rows")]
    NoImageData,

    #[error("Pixel row {row} has {found} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid pixel '{token}' on line {line}: pixels must be 0 or 1")]
    InvalidPixel { line: usize, token: String },

    #[error("Unsupported rotation angle: {degrees}")]
    UnsupportedAngle { degrees: i32 },

    #[error("Written file '{path}' failed validation: {source}")]
    OutputValidation {
        path: String,
        #[source]
        source: Box<PbmError>,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    FileAccess,
    Format,
    Image,
    Rotation,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PbmError {
    pub fn file_access(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::FileAccess {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileAccess { .. } => ErrorCategory::FileAccess,
            Self::EmptyOrTooShort
            | Self::BadMagicNumber { .. }
            | Self::MissingCommentMarker { .. }
            | Self::LineTooLong { .. }
            | Self::OutputValidation { .. } => ErrorCategory::Format,
            Self::NoImageData | Self::RaggedRows { .. } | Self::InvalidPixel { .. } => {
                ErrorCategory::Image
            }
            Self::UnsupportedAngle { .. } => ErrorCategory::Rotation,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // The output file exists but is not a usable PBM.
            Self::OutputValidation { .. } => ErrorSeverity::Critical,
            Self::FileAccess { .. } | Self::SerializationError(_) => {
                ErrorSeverity::High
            }
            _ => ErrorSeverity::Medium,
        }
    }

    /// Process exit status for this failure. Never 0.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::OutputValidation { .. } => 6,
            _ => match self.category() {
                ErrorCategory::Internal => 1,
                ErrorCategory::FileAccess => 2,
                ErrorCategory::Format => 3,
                ErrorCategory::Image => 4,
                ErrorCategory::Rotation => 5,
                ErrorCategory::Configuration => 7,
            },
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::FileAccess { .. } => {
                "Check that the path exists, is readable/writable and ends in .pbm"
            }
            Self::EmptyOrTooShort | Self::BadMagicNumber { .. } => {
                "Use an ASCII (P1) PBM file whose first line is 'P1'"
            }
            Self::MissingCommentMarker { .. } => "Prefix comment lines with '#'",
            Self::LineTooLong { .. } => "Wrap pixel rows so no line exceeds 70 characters",
            Self::NoImageData | Self::RaggedRows { .. } | Self::InvalidPixel { .. } => {
                "Make sure the file holds one rectangular image of space separated 0/1 pixels"
            }
            Self::UnsupportedAngle { .. } => {
                "Use one of 0, 90, 180, 270, 360 or -90, -180, -270, -360"
            }
            Self::OutputValidation { .. } => {
                "Images wider than 35 pixels produce rows over 70 characters; rotate to a narrower orientation"
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Review the command line arguments or job file",
            Self::SerializationError(_) => "Report this as a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::FileAccess => format!("File access failed: {}", self),
            ErrorCategory::Format => format!("Invalid PBM file: {}", self),
            ErrorCategory::Image => format!("Invalid image data: {}", self),
            ErrorCategory::Rotation => format!("Rotation failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Internal => format!("Internal error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PbmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_and_non_zero() {
        let errors = vec![
            PbmError::file_access("in.pbm", "missing"),
            PbmError::BadMagicNumber {
                found: "P2".to_string(),
            },
            PbmError::NoImageData,
            PbmError::UnsupportedAngle { degrees: 45 },
            PbmError::OutputValidation {
                path: "out.pbm".to_string(),
                source: Box::new(PbmError::LineTooLong {
                    line: 4,
                    length: 71,
                }),
            },
            PbmError::ConfigError {
                message: "bad".to_string(),
            },
        ];

        let mut codes: Vec<i32> = errors.iter().map(PbmError::exit_code).collect();
        assert!(codes.iter().all(|code| *code != 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_format_errors_share_category() {
        for error in [
            PbmError::EmptyOrTooShort,
            PbmError::MissingCommentMarker { line: 2 },
            PbmError::LineTooLong {
                line: 3,
                length: 80,
            },
        ] {
            assert_eq!(error.category(), ErrorCategory::Format);
            assert_eq!(error.exit_code(), 3);
        }
    }

    #[test]
    fn test_output_validation_keeps_source() {
        let error = PbmError::OutputValidation {
            path: "out.pbm".to_string(),
            source: Box::new(PbmError::EmptyOrTooShort),
        };
        let source = std::error::Error::source(&error).map(|s| s.to_string());
        assert_eq!(source, Some(PbmError::EmptyOrTooShort.to_string()));
        assert_eq!(error.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_io_failures_become_file_access() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = PbmError::file_access("in.pbm", io);

        assert!(matches!(error, PbmError::FileAccess { .. }));
        assert_eq!(error.category(), ErrorCategory::FileAccess);
        assert_eq!(error.exit_code(), 2);
        assert!(error.to_string().contains("no such file"));
    }
}
