use thiserror::Error;

#[derive(Error, Debug)]
pub enum EffortError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV rendering error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Country '{country}' appears more than once in month '{month}'")]
    DuplicateCountryError { month: String, country: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Data,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EffortError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EffortError::ConfigValidationError { .. }
            | EffortError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EffortError::DuplicateCountryError { .. } | EffortError::ProcessingError { .. } => {
                ErrorCategory::Data
            }
            EffortError::IoError(_)
            | EffortError::SerializationError(_)
            | EffortError::CsvError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Output => match self {
                EffortError::IoError(_) => ErrorSeverity::Critical,
                _ => ErrorSeverity::Medium,
            },
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EffortError::ConfigValidationError { field, .. } => {
                format!("Check the '{}' section of the configuration file", field)
            }
            EffortError::InvalidConfigValueError { field, .. } => {
                format!("Correct the value of '{}' and run again", field)
            }
            EffortError::DuplicateCountryError { month, .. } => format!(
                "Merge or remove the repeated entries in month '{}'",
                month
            ),
            EffortError::ProcessingError { .. } => {
                "Inspect the monthly operations data for inconsistent values".to_string()
            }
            EffortError::IoError(_) => {
                "Make sure the output directory exists and is writable".to_string()
            }
            EffortError::SerializationError(_) | EffortError::CsvError(_) => {
                "Try another output format with --format".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Data => format!("Input data problem: {}", self),
            ErrorCategory::Output => format!("Could not produce the report: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EffortError>;

/// Why a live fleet lookup produced nothing usable. Never leaves the fleet provider.
#[derive(Error, Debug)]
pub enum FleetFetchError {
    #[error("fleet source is disabled")]
    Disabled,

    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("ranking source answered with status {0}")]
    Status(u16),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not parse count '{value}' for {country}")]
    Parse { country: String, value: String },

    #[error("response contained no ranking rows")]
    NoEntries,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_country_is_high_severity_data_error() {
        let err = EffortError::DuplicateCountryError {
            month: "2026-02".to_string(),
            country: "USA".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Data);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("2026-02"));
        assert!(err.user_friendly_message().starts_with("Input data problem"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = EffortError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.category(), ErrorCategory::Output);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_every_severity_is_at_least_medium() {
        let errors = [
            EffortError::ProcessingError {
                message: "bad".to_string(),
            },
            EffortError::ConfigValidationError {
                field: "report".to_string(),
                message: "missing".to_string(),
            },
            EffortError::from(serde_json::Error::io(std::io::Error::other("broken"))),
        ];
        assert!(errors.iter().all(|e| e.severity() >= ErrorSeverity::Medium));
    }
}
