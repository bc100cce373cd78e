//! Error types for dynq.
//!
//! Errors fall into two families with different exit codes: [`ParseError`]
//! is a usage problem caught before any request is made, [`ClientError`] is
//! whatever the store client reported. Neither is retried.

use crate::render::ExitStatus;

/// The key expression could not be turned into a key.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Neither `--key-value` nor `--query` was supplied.
    #[error("missing --query or --key-value parameter")]
    MissingQuery,

    /// Both `--key-value` and `--query` were supplied.
    #[error("--query and --key-value are mutually exclusive, supply only one")]
    ConflictingQuery,

    /// The shorthand was not of the form `field=value`.
    #[error("malformed --key-value '{0}': expected field=value with a non-empty field")]
    MalformedKeyValue(String),

    /// The JSON query was not an object of typed values.
    #[error("malformed --query JSON: {0}")]
    MalformedQueryJson(#[from] serde_json::Error),

    /// The JSON query was an empty object or had an empty field name.
    #[error("--query must name at least one key field: {0}")]
    EmptyKey(#[from] dynq_model::InvalidKey),
}

/// Opaque failure from the store client: auth, network, throttling,
/// missing table. The message is the client's own.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ClientError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ClientError {
    /// Create an error with only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The message shown to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Any failure that ends a dynq invocation early.
#[derive(Debug, thiserror::Error)]
pub enum DynqError {
    /// Usage or key-expression error.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Store client failure.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Writing the result to stdout/stderr failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl DynqError {
    /// Process exit status for this error.
    #[must_use]
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            Self::Parse(_) => ExitStatus::Usage,
            Self::Client(_) | Self::Io(_) => ExitStatus::Failure,
        }
    }
}

/// Convenience result type for dynq operations.
pub type DynqResult<T> = Result<T, DynqError>;
