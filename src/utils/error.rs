use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Could not decode '{path}' with any supported encoding ({})", tried.join(", "))]
    DecodingError { path: String, tried: Vec<String> },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
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
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::InputNotFound { .. } | EtlError::DecodingError { .. } => ErrorCategory::Input,
            EtlError::CsvError(_) => ErrorCategory::Data,
            EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::InputNotFound { .. }
            | EtlError::DecodingError { .. }
            | EtlError::CsvError(_)
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorSeverity::High,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::InputNotFound { path } => {
                format!("Check that '{}' exists and the path is correct", path)
            }
            EtlError::DecodingError { .. } => {
                "Re-export the file as UTF-8 or add its encoding with --encodings".to_string()
            }
            EtlError::CsvError(_) => {
                "Make sure the input is a comma separated file with a header row".to_string()
            }
            EtlError::IoError(_) => {
                "Check permissions and free space of the output directory".to_string()
            }
            EtlError::SerializationError(_) => "Retry without --json-summary".to_string(),
            EtlError::ConfigValidationError { field, .. }
            | EtlError::InvalidConfigValueError { field, .. }
            | EtlError::MissingConfigError { field } => {
                format!("Fix the '{}' setting in the config file or command line", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::InputNotFound { path } => format!("Input file '{}' not found", path),
            EtlError::DecodingError { tried, .. } => format!(
                "Could not decode the input with any supported encoding ({})",
                tried.join(", ")
            ),
            EtlError::IoError(e) => format!("File system error: {}", e),
            other => other.to_string(),
        }
    }

    /// 依嚴重程度決定 process exit code
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoding_error_lists_encodings() {
        let err = EtlError::DecodingError {
            path: "export.csv".to_string(),
            tried: vec!["UTF-8".to_string(), "windows-1252".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Could not decode 'export.csv' with any supported encoding (UTF-8, windows-1252)"
        );
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_config_errors_name_the_field() {
        let err = EtlError::InvalidConfigValueError {
            field: "encodings".to_string(),
            value: "klingon".to_string(),
            reason: "unknown encoding label".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("'encodings'"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = EtlError::IoError(std::io::Error::other("disk full"));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.exit_code(), 3);
    }
}
