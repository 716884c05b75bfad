//! Error types for Linear operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolver::EntityKind;

/// Failures raised below the GraphQL layer, by whatever carries the request.
///
/// Serializable so recorded sessions can replay failed calls as well as
/// successful ones.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransportError {
    /// The request never produced a response (DNS, connect, TLS, IO).
    #[error("network error: {message}")]
    Network {
        /// Description from the HTTP stack.
        message: String,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("request failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, verbatim.
        body: String,
    },

    /// The caller cancelled the request before it completed.
    #[error("request cancelled")]
    Cancelled,

    /// A 2xx response whose body is not JSON.
    #[error("response body is not valid JSON: {message}")]
    MalformedBody {
        /// Parser message.
        message: String,
    },
}

/// All errors surfaced by [`crate::client::LinearClient`] and the layers below it.
#[derive(Debug, Error)]
pub enum Error {
    /// Local input rejected before any request was sent.
    #[error("invalid input: {0}")]
    Validation(String),

    /// Network failure, non-2xx status, or cancellation.
    #[error(transparent)]
    Transport(TransportError),

    /// The response envelope was malformed or carried GraphQL errors.
    #[error("remote error: {0}")]
    RemoteProtocol(String),

    /// The mutation was accepted but reported `success: false`.
    #[error("{action} was not successful")]
    OperationRejected {
        /// Human-readable name of the rejected action.
        action: &'static str,
    },

    /// A name lookup matched nothing.
    #[error("no {kind} matches '{query}'")]
    NotFound {
        /// What was being looked up.
        kind: EntityKind,
        /// The name or fragment supplied by the caller.
        query: String,
    },

    /// A name lookup matched more than one entity.
    #[error(
        "'{query}' matches {count} {kind}s: {candidates}\n  \
         hint: use a more specific name or pass the ID directly"
    )]
    AmbiguousMatch {
        /// What was being looked up.
        kind: EntityKind,
        /// The name or fragment supplied by the caller.
        query: String,
        /// Total number of matches.
        count: usize,
        /// Comma-separated names of the first few matches.
        candidates: String,
    },

    /// Configuration could not be loaded or is incomplete.
    #[error("config error: {0}")]
    Config(String),
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match err {
            // The HTTP call itself succeeded; what came back is unusable.
            TransportError::MalformedBody { message } => {
                Self::RemoteProtocol(format!("response body is not valid JSON: {message}"))
            }
            other => Self::Transport(other),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
