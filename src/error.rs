use thiserror::Error;

#[derive(Error, Debug)]
pub enum DedicatedError {
    #[error("database must not be nil")]
    NilDatabase,

    #[error("database name must not be empty")]
    EmptyDatabaseName,

    #[error("partition template should not have more than {max} tags or tag buckets, got {count}")]
    TooManyPartitionTemplates { count: usize, max: usize },

    #[error("invalid control character in {field}: {value:?}")]
    InvalidIdentifier { field: &'static str, value: String },

    #[error("failed to parse database creation path '{path}': {source}")]
    UrlParse {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to marshal database creation request body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Environment variable error: {0}")]
    Env(#[from] std::env::VarError),
}

impl DedicatedError {
    /// True for errors raised before any request was built.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DedicatedError::NilDatabase
                | DedicatedError::EmptyDatabaseName
                | DedicatedError::TooManyPartitionTemplates { .. }
                | DedicatedError::InvalidIdentifier { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DedicatedError>;
