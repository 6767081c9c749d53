use thiserror::Error;

#[derive(Error, Debug)]
pub enum PokedexError {
    #[error("Pokemon not found: {name}")]
    CreatureNotFound { name: String },

    #[error("Pokemon not captured: {name}")]
    NotCaptured { name: String },

    #[error("Invalid parameter '{field}' = '{value}': {reason}")]
    InvalidParameter {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate creature name in catalog: {name}")]
    DuplicateCreature { name: String },

    #[error("Catalog source error: {message}")]
    SourceError { message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for '{field}' = '{value}': {reason}")]
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
    NotFound,
    Request,
    Catalog,
    Network,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PokedexError {
    pub fn invalid_parameter(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CreatureNotFound { .. } | Self::NotCaptured { .. } => ErrorCategory::NotFound,
            Self::InvalidParameter { .. } => ErrorCategory::Request,
            Self::DuplicateCreature { .. }
            | Self::SourceError { .. }
            | Self::CsvError(_)
            | Self::SerializationError(_) => ErrorCategory::Catalog,
            Self::HttpError(_) => ErrorCategory::Network,
            Self::IoError(_) => ErrorCategory::Io,
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 單一請求的錯誤，不影響共享狀態
            ErrorCategory::NotFound | ErrorCategory::Request => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Catalog | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// Message safe to show to an end user or HTTP client.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::CreatureNotFound { .. } => "Pokemon not found.".to_string(),
            Self::NotCaptured { .. } => "Pokemon not found or not captured.".to_string(),
            Self::InvalidParameter {
                field,
                value,
                reason,
            } => format!("Invalid value '{}' for '{}': {}", value, field, reason),
            Self::DuplicateCreature { name } => {
                format!("The catalog lists '{}' more than once", name)
            }
            Self::SourceError { message } => format!("Could not load the catalog: {}", message),
            Self::HttpError(_) => "Could not reach the catalog provider".to_string(),
            Self::CsvError(_) | Self::SerializationError(_) => {
                "The catalog data is malformed".to_string()
            }
            Self::IoError(e) => format!("File system error: {}", e),
            Self::TomlError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::NotFound => "Check the creature name; names are case-sensitive",
            ErrorCategory::Request => "Use positive integers for page/page_size and asc|desc for sort_order",
            ErrorCategory::Catalog => "Verify the catalog file or endpoint returns well-formed creature records",
            ErrorCategory::Network => "Check that the catalog URL is reachable and retry",
            ErrorCategory::Io => "Check that the file exists and is readable",
            ErrorCategory::Configuration => "Review the command line flags and the TOML configuration file",
        }
    }
}

pub type Result<T> = std::result::Result<T, PokedexError>;
