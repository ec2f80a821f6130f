use thiserror::Error;
pub use url::ParseError as UrlParseError;

/// Error types for the vManage API client.
#[derive(Error, Debug)]
pub enum VManageError {
    /// The controller could not be reached during login.
    #[error("Could not connect to {0}")]
    ConnectionError(String),

    /// The controller answered the login with its HTML login page.
    #[error("Could not login to device, check user credentials")]
    LoginCredentialsError,

    /// Authentication failed for a reason other than bad credentials.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// The API returned an error.
    #[error("API error: {0}")]
    ApiError(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error parsing URL.
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] UrlParseError),

    /// Error serializing or deserializing JSON.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Error reading template files from disk.
    #[error("I/O error on {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A template file is not valid JSON or does not match its expected shape.
    #[error("Invalid template file {path}: {source}")]
    InvalidTemplateFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The controller answered with a status code outside the known tables.
    #[error("Unexpected HTTP status code: {0}")]
    UnexpectedStatus(u16),

    /// A GET response carried none of the recognized envelope keys while
    /// strict envelope checking is enabled.
    #[error("Missing envelope key in response: expected one of data, config, templateDefinition")]
    MissingEnvelopeKey,

    /// A device template references a feature template that is absent from
    /// its feature bundle.
    #[error("No mapping for template ID {0}")]
    MissingTemplateMapping(String),

    /// A write operation failed and the caller asked for escalation.
    #[error("Failure in POST operation: {0}")]
    PostFailure(String),

    /// An argument was outside the accepted set of values.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
}

/// Result type for vManage API operations.
pub type VManageResult<T> = Result<T, VManageError>;
