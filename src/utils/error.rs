use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown region: {name}")]
    UnknownRegion { name: String },

    #[error("Invalid input for {field} ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a command that failed with this severity.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Medium => 2,
            Self::High => 1,
            Self::Critical => 3,
        }
    }
}

impl EngineError {
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unknown_region(name: impl Into<String>) -> Self {
        Self::UnknownRegion { name: name.into() }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownRegion { .. } | Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) | Self::SerializationError(_) | Self::CsvError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::UnknownRegion { .. } => {
                "Run the `regions` command to list the regions in the catalog".to_string()
            }
            Self::InvalidInput { reason, .. } => format!("Adjust the input: {}", reason),
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Check the configuration file for typos and inverted ranges".to_string()
            }
            Self::IoError(_) => "Make sure the file exists and is readable".to_string(),
            Self::SerializationError(_) | Self::CsvError(_) => {
                "Retry with --format table".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::UnknownRegion { name } => format!("'{}' is not a known region", name),
            Self::InvalidInput { field, value, .. } => {
                format!("{} is not a valid value for {}", value, field)
            }
            Self::ConfigError { message } => format!("The configuration is invalid: {}", message),
            Self::ConfigValidationError { field, message } => {
                format!("The configuration field '{}' is invalid: {}", field, message)
            }
            other => format!("Something went wrong: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
