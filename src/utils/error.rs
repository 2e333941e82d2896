use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Parse error on line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("Key {apikey} has no '{period}' rate limit")]
    LookupError { apikey: String, period: String },

    #[error("Key {apikey} has a '{period}' ceiling of {ceiling}, too large to convert")]
    InvalidLimit {
        apikey: String,
        period: String,
        ceiling: u64,
    },

    #[error("Request to destination failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Protocol error: {message}")]
    ProtocolError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MigrationError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MigrationError::NetworkError(_) => ErrorSeverity::Medium,
            MigrationError::ParseError { .. }
            | MigrationError::LookupError { .. }
            | MigrationError::InvalidLimit { .. }
            | MigrationError::ProtocolError { .. }
            | MigrationError::SerializationError(_)
            | MigrationError::ConfigError { .. }
            | MigrationError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            MigrationError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MigrationError::ParseError { .. } => {
                "Check that every line of the export is a JSON array of key records"
            }
            MigrationError::LookupError { .. } => {
                "Add the missing rate limit to the key in the export and re-run"
            }
            MigrationError::InvalidLimit { .. } => {
                "Correct the rate limit on the key in the export and re-run"
            }
            MigrationError::NetworkError(_) => {
                "Check the destination is reachable; note that batches already accepted will be sent again on re-run"
            }
            MigrationError::ProtocolError { .. } => "Check the destination base URL",
            MigrationError::IoError(_) => "Check the input file exists and is readable",
            MigrationError::SerializationError(_) => "Inspect the offending records for unusual values",
            MigrationError::ConfigError { .. } | MigrationError::InvalidConfigValueError { .. } => {
                "Fix the command-line arguments or the settings file"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MigrationError::ParseError { line, .. } => {
                format!("The export file is malformed at line {}", line)
            }
            MigrationError::LookupError { apikey, period } => {
                format!("Key {} is missing its per-{} limit", apikey, period)
            }
            MigrationError::NetworkError(_) => {
                "Could not deliver a batch to the destination service".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Process exit code for a failed run.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrationError>;
