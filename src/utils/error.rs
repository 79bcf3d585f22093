use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("{what} not found: {path}")]
    MissingFileError { what: String, path: String },

    #[error("Domain list is empty: {path}")]
    EmptyDomainListError { path: String },

    #[error("Credential error: {message}")]
    CredentialError { message: String },

    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid verification token '{token}': {reason}")]
    InvalidTokenError { token: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl VerifyError {
    pub fn missing_file(what: impl Into<String>, path: impl Into<String>) -> Self {
        Self::MissingFileError {
            what: what.into(),
            path: path.into(),
        }
    }

    pub fn credential(message: impl Into<String>) -> Self {
        Self::CredentialError {
            message: message.into(),
        }
    }

    /// Short message for the terminal, without the error chain.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingFileError { what, path } => format!("{} not found ({})", what, path),
            Self::EmptyDomainListError { path } => format!("{} contains no domains", path),
            Self::CredentialError { message } => format!("Could not load credentials: {}", message),
            Self::ApiError { status, message } => {
                format!("Google API rejected the request (HTTP {}): {}", status, message)
            }
            Self::HttpError(_) => "Network request failed".to_string(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingFileError { what, .. } if what.to_lowercase().contains("token") => {
                "Run the OAuth login once on a local machine so that token.json is created"
            }
            Self::MissingFileError { .. } => "Check the path or pass it explicitly on the command line",
            Self::EmptyDomainListError { .. } => "Add one domain per line to the domain list",
            Self::CredentialError { .. } => {
                "Delete token.json and repeat the OAuth login to obtain a fresh refresh token"
            }
            Self::ApiError { status, .. } if *status == 401 || *status == 403 => {
                "Make sure the account owns the required scopes and the APIs are enabled"
            }
            Self::HttpError(_) => "Check network connectivity",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command-line flags"
            }
            _ => "See the log output for details",
        }
    }
}

pub type Result<T> = std::result::Result<T, VerifyError>;
