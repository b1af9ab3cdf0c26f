use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Validation error on '{field}' (value: '{value}'): {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Student not found: {id}")]
    NotFoundError { id: String },

    #[error("Format error: {message}")]
    FormatError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error on '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}' (value: '{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown {kind}: '{name}'")]
    UnknownAlgorithmError { kind: String, name: String },
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        RosterError::FormatError {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Data,
    System,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RosterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RosterError::ValidationError { .. } | RosterError::UnknownAlgorithmError { .. } => {
                ErrorCategory::Input
            }
            RosterError::NotFoundError { .. } => ErrorCategory::Lookup,
            RosterError::FormatError { .. } | RosterError::CsvError(_) => ErrorCategory::Data,
            RosterError::IoError(_) => ErrorCategory::System,
            RosterError::ConfigError { .. }
            | RosterError::ConfigValidationError { .. }
            | RosterError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Low,
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RosterError::ValidationError { field, .. } => {
                format!("Check the '{}' field; registration codes may only contain digits 0-9", field)
            }
            RosterError::NotFoundError { .. } => {
                "List the roster to find the identifier of an existing student".to_string()
            }
            RosterError::FormatError { .. } => {
                "Make sure the file is a JSON array of {id, name, code, category, score} objects"
                    .to_string()
            }
            RosterError::IoError(_) => {
                "Check that the path exists and that you have read/write permission".to_string()
            }
            RosterError::CsvError(_) => "Retry the export to a different location".to_string(),
            RosterError::ConfigError { .. }
            | RosterError::ConfigValidationError { .. }
            | RosterError::InvalidConfigValueError { .. } => {
                "Review the TOML configuration file against the documented sections".to_string()
            }
            RosterError::UnknownAlgorithmError { kind, .. } => match kind.as_str() {
                "sort algorithm" => "Use one of: bubble, selection, insertion, merge, shell".to_string(),
                "search algorithm" => "Use one of: linear, binary".to_string(),
                "sort key" => "Use one of: name, code, score".to_string(),
                "sort order" => "Use one of: asc, desc".to_string(),
                "update policy" => "Use one of: skip_blank, presence".to_string(),
                _ => "Check the spelling of the option".to_string(),
            },
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RosterError::ValidationError { value, .. } => {
                format!("Registration code '{}' is invalid: digits only", value)
            }
            RosterError::NotFoundError { id } => format!("No student with id '{}'", id),
            RosterError::FormatError { .. } => "The roster file could not be read".to_string(),
            RosterError::IoError(e) => format!("File operation failed: {}", e),
            RosterError::CsvError(_) => "CSV export failed".to_string(),
            RosterError::ConfigError { message } => format!("Configuration problem: {}", message),
            RosterError::ConfigValidationError { field, message } => {
                format!("Configuration '{}' is invalid: {}", field, message)
            }
            RosterError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration '{}' is invalid: {}", field, reason)
            }
            RosterError::UnknownAlgorithmError { kind, name } => {
                format!("'{}' is not a known {}", name, kind)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
