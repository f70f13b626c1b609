use miette::Diagnostic;
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(ajanvaraus::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(ajanvaraus::config))]
    Config(String),

    #[error("Locale error: {0}")]
    #[diagnostic(code(ajanvaraus::locale))]
    Locale(String),

    #[error("Time error: {0}")]
    #[diagnostic(
        code(ajanvaraus::time),
        help("use RFC 3339 (2025-03-07T20:00:00+02:00) or local YYYY-MM-DDTHH:MM")
    )]
    Time(String),

    #[error("Server error: {0}")]
    #[diagnostic(code(ajanvaraus::server))]
    Server(String),

    #[error(transparent)]
    #[diagnostic(code(ajanvaraus::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(ajanvaraus::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(ajanvaraus::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create locale errors
pub fn locale_error(message: &str) -> Error {
    Error::Locale(message.to_string())
}

/// Helper to create time parsing errors
pub fn time_error(message: &str) -> Error {
    Error::Time(message.to_string())
}
