use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayError {
    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Key store error: {message}")]
    KeyStoreError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Storage,
    Data,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlayError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlayError::TomlParse(_)
            | PlayError::ConfigError { .. }
            | PlayError::InvalidConfigValueError { .. }
            | PlayError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PlayError::Io(_) | PlayError::KeyStoreError { .. } | PlayError::TomlSerialize(_) => {
                ErrorCategory::Storage
            }
            PlayError::Csv(_) | PlayError::Serialization(_) => ErrorCategory::Data,
            PlayError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 輸出編碼失敗時資料本身沒問題，換個格式即可
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the configuration file and command-line flags for typos or invalid values"
            }
            ErrorCategory::Storage => {
                "Make sure the credential file location exists and is writable"
            }
            ErrorCategory::Data => "The output could not be encoded; try another --format",
            ErrorCategory::Input => "Use an age between 1 and 12 and a time between 5 and 60 minutes",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlayError::ValidationError { message } => message.clone(),
            PlayError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            PlayError::MissingConfigError { field } => {
                format!("Setting '{}' is required but was not provided", field)
            }
            PlayError::KeyStoreError { message } => {
                format!("Could not access the saved API key: {}", message)
            }
            PlayError::TomlParse(e) => format!("The configuration file is not valid TOML: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlayError>;
