use thiserror::Error;

#[derive(Error, Debug)]
pub enum SantaError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Unable to find a valid assignment after {attempts} attempts")]
    InfeasibleAssignment { attempts: usize },

    #[error("Missing configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Email to '{recipient}' failed: {message}")]
    Email { recipient: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Assignment,
    Configuration,
    System,
    Delivery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SantaError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } | Self::Serialization(_) => ErrorCategory::Input,
            Self::InfeasibleAssignment { .. } => ErrorCategory::Assignment,
            Self::MissingConfig { .. }
            | Self::InvalidConfigValue { .. }
            | Self::ConfigParse { .. } => ErrorCategory::Configuration,
            Self::Io(_) => ErrorCategory::System,
            Self::Email { .. } => ErrorCategory::Delivery,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Delivery => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Assignment => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => {
                "Check the participant file: names must be unique, exclusions must name other participants"
            }
            Self::InfeasibleAssignment { .. } => {
                "Relax some exclusions or raise --max-attempts"
            }
            Self::MissingConfig { .. } => {
                "Set the variable in the environment or .env, or pass --config with an [smtp] table"
            }
            Self::InvalidConfigValue { .. } | Self::ConfigParse { .. } => {
                "Fix the value in the configuration file or environment"
            }
            Self::Io(_) => "Make sure the file exists and is readable",
            Self::Serialization(_) => {
                "The participant file must be a JSON array of {name, email, exclude} objects"
            }
            Self::Email { .. } => "Check SMTP server, port and credentials, then notify the participant manually",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InfeasibleAssignment { attempts: 0 } => {
                "The exclusions leave someone with nobody to give a gift to".to_string()
            }
            Self::InfeasibleAssignment { .. } => {
                "Could not find a Secret Santa draw that satisfies every exclusion".to_string()
            }
            Self::Io(e) => format!("Could not read a file: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SantaError>;
