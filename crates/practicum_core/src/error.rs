use serde::Serialize;
use thiserror::Error;

/// Unified error type for practicum operations
#[derive(Debug, Error)]
pub enum PracticumError {
    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Remote store errors
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote store rejected '{table}' request ({status}): {message}")]
    Remote {
        table: String,
        status: u16,
        message: String,
    },

    #[error("Invalid remote store URL: '{0}'")]
    InvalidRemoteUrl(String),

    // Cache errors
    #[error("Local cache quota exceeded while writing '{key}'")]
    CacheQuota { key: String },

    #[error("Failed to read cache key '{key}': {source}")]
    CacheRead {
        key: String,
        source: std::io::Error,
    },

    #[error("Failed to write cache key '{key}': {source}")]
    CacheWrite {
        key: String,
        source: std::io::Error,
    },

    // Config errors
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Result type alias for practicum operations
pub type Result<T> = std::result::Result<T, PracticumError>;

/// A serializable representation of PracticumError for the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct SerializableError {
    /// Error kind/variant name
    pub kind: String,
    /// Human-readable error message
    pub message: String,
}

impl From<&PracticumError> for SerializableError {
    fn from(err: &PracticumError) -> Self {
        let kind = match err {
            PracticumError::Io(_) => "Io",
            PracticumError::Json(_) => "Json",
            PracticumError::Http(_) => "Http",
            PracticumError::Remote { .. } => "Remote",
            PracticumError::InvalidRemoteUrl(_) => "InvalidRemoteUrl",
            PracticumError::CacheQuota { .. } => "CacheQuota",
            PracticumError::CacheRead { .. } => "CacheRead",
            PracticumError::CacheWrite { .. } => "CacheWrite",
            PracticumError::ConfigParse(_) => "ConfigParse",
            PracticumError::ConfigSerialize(_) => "ConfigSerialize",
            PracticumError::NoConfigDir => "NoConfigDir",
        }
        .to_string();

        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl From<PracticumError> for SerializableError {
    fn from(err: PracticumError) -> Self {
        SerializableError::from(&err)
    }
}

impl PracticumError {
    /// Convert to a serializable representation for the presentation layer
    pub fn to_serializable(&self) -> SerializableError {
        SerializableError::from(self)
    }

    /// True for cache-write failures caused by storage limits.
    ///
    /// Quota failures get their own notice wording; durability is lost but
    /// in-memory state stays correct.
    pub fn is_quota(&self) -> bool {
        matches!(self, PracticumError::CacheQuota { .. })
    }
}
