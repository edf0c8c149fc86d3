use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Unknown {kind} variant: '{selector}'")]
    UnknownVariant { kind: String, selector: String },

    #[error("Part family '{family}' has no variant for slot '{slot}'")]
    IncompleteFamily { family: String, slot: String },

    #[error("Incomplete build, missing: {}", .missing.join(", "))]
    IncompleteBuild { missing: Vec<String> },

    #[error("No legacy mapping for operation '{operation}'")]
    MissingMapping { operation: String },

    #[error("Component '{name}' is already registered")]
    DuplicateComponent { name: String },

    #[error("Authentication failed for user '{username}'")]
    AuthenticationFailed { username: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Construction,
    Security,
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
    /// 程序結束碼：High 1、Medium 2、Critical 3
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl CatalogError {
    /// 錯誤分類名稱，輸出到 stderr 時使用
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogError::UnknownVariant { .. } => "UnknownVariantError",
            CatalogError::IncompleteFamily { .. } => "IncompleteFamilyError",
            CatalogError::IncompleteBuild { .. } => "IncompleteBuildError",
            CatalogError::MissingMapping { .. } => "MissingMappingError",
            CatalogError::DuplicateComponent { .. } => "DuplicateComponentError",
            CatalogError::AuthenticationFailed { .. } => "AuthenticationError",
            CatalogError::ValidationError { .. } => "ValidationError",
            CatalogError::ConfigError { .. } | CatalogError::InvalidConfigValueError { .. } => {
                "ConfigError"
            }
            CatalogError::IoError(_) => "IoError",
            CatalogError::SerializationError(_) => "SerializationError",
            CatalogError::UrlError(_) => "UrlError",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CatalogError::UnknownVariant { .. }
            | CatalogError::IncompleteFamily { .. }
            | CatalogError::IncompleteBuild { .. }
            | CatalogError::MissingMapping { .. }
            | CatalogError::DuplicateComponent { .. }
            | CatalogError::ValidationError { .. }
            | CatalogError::UrlError(_) => ErrorCategory::Construction,
            CatalogError::AuthenticationFailed { .. } => ErrorCategory::Security,
            CatalogError::ConfigError { .. } | CatalogError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CatalogError::IoError(_) | CatalogError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    /// 所有建構錯誤都不是暫時性的，同樣輸入重試只會得到同樣結果
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Construction | ErrorCategory::Security => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CatalogError::UnknownVariant { kind, selector } => {
                format!("{}: '{}' is not a known {}", self.kind(), selector, kind)
            }
            CatalogError::IncompleteFamily { family, slot } => format!(
                "{}: the '{}' parts family cannot supply a '{}'",
                self.kind(),
                family,
                slot
            ),
            CatalogError::IncompleteBuild { missing } => format!(
                "{}: set {} before finalizing the plan",
                self.kind(),
                missing.join(", ")
            ),
            other => format!("{}: {}", other.kind(), other),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatalogError::UnknownVariant { .. } => {
                "Pick one of the registered selectors (see --help)"
            }
            CatalogError::IncompleteFamily { .. } => {
                "Add the missing slot to the parts catalog or choose another family"
            }
            CatalogError::IncompleteBuild { .. } | CatalogError::ValidationError { .. } => {
                "Complete the builder configuration and call get_plan again"
            }
            CatalogError::MissingMapping { .. } => {
                "Map every target operation in [accounts.mapping]"
            }
            CatalogError::DuplicateComponent { .. } => "Register each component name once",
            CatalogError::AuthenticationFailed { .. } => "Check the username and password",
            CatalogError::ConfigError { .. } | CatalogError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags"
            }
            CatalogError::IoError(_) => "Check that the file exists and is readable",
            CatalogError::SerializationError(_) | CatalogError::UrlError(_) => {
                "Report this as a bug"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
