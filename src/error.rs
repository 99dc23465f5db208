//! Error types for meta-reports

use thiserror::Error;

/// Main error type for the report job
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Invalid date prefix: {0}")]
    InvalidDatePrefix(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Wiki API error ({code}): {info}")]
    Wiki { code: String, info: String },

    #[error("Spam blacklist rejected edit of '{title}' (matched: {matched})")]
    SpamBlacklist { title: String, matched: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl ReportError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::InvalidDatePrefix(_) => 2,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            ReportError::InvalidDatePrefix(prefix) => {
                format!(
                    "Invalid date prefix: '{}'\n\n\
                    Expected a year and month:\n\
                    • YYYYMM (e.g., 202401)\n\
                    • YYYY-MM (e.g., 2024-01)\n\n\
                    Examples:\n\
                    meta-reports\n\
                    meta-reports 202401",
                    prefix
                )
            }
            ReportError::Config(msg) => {
                format!(
                    "Configuration error: {}\n\n\
                    Suggestions:\n\
                    • Check the file pointed to by META_REPORTS_CONFIG (default: meta-reports.toml)\n\
                    • Remove the file to run with built-in defaults",
                    msg
                )
            }
            ReportError::Database(err) => {
                format!(
                    "Database error: {}\n\n\
                    Suggestions:\n\
                    • Check [database] url in the config file\n\
                    • Set META_REPORTS_DATABASE_URL to override the connection URL",
                    err
                )
            }
            ReportError::Wiki { code, .. } if code.contains("login") || code == "badtoken" => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check the bot password in META_REPORTS_WIKI_USERNAME / META_REPORTS_WIKI_PASSWORD\n\
                    • Bot passwords use the form 'User@BotName'",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using ReportError
pub type Result<T> = std::result::Result<T, ReportError>;
