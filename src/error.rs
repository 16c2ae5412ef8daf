//! Error types for CaseLink operations.

use std::path::PathBuf;

/// Result type for CaseLink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong talking to CaseLink.
///
/// Transport failures (`Http`, `Transport`, `Decode`) come straight from the
/// wire and are never retried. The remaining variants are raised locally,
/// before any request is sent.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with a non-2xx status.
    #[error("{method} {url} failed with status {status}: {body}")]
    Http {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// The request never produced a response (connect failure, timeout...).
    #[error("failed to send request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON.
    #[error("failed to parse response JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The representation has no such field, or the name is reserved.
    #[error("no attribute: {0}")]
    NoAttribute(String),

    /// Attempted local assignment of a relationship managed by the server.
    #[error("`{field}` is read-only: {hint}")]
    ReadOnly { field: String, hint: &'static str },

    /// `delete()` on a resource the server does not know.
    #[error("{0} does not exist")]
    DoesNotExist(String),

    /// A specialised `create` was called without one of its required fields.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A field exists but holds the wrong JSON type.
    #[error("field `{field}` has unexpected value: {value}")]
    InvalidField { field: String, value: String },

    /// The server accepted a request but its answer lacks something we need.
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: &'static str },

    /// Configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// A configuration file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML.
    #[error("failed to parse config {origin}: {source}")]
    ConfigParse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// HTTP status of the failed response, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True for errors raised locally because the API was misused.
    pub fn is_invalid_use(&self) -> bool {
        matches!(
            self,
            Error::ReadOnly { .. } | Error::DoesNotExist(_) | Error::MissingField(_)
        )
    }
}
