//! Transport port for executing GraphQL requests.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;
use crate::graphql::GraphqlRequest;

/// Boxed future type alias used by [`GraphqlTransport`] to keep the trait dyn-compatible.
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Value, TransportError>> + Send + 'a>>;

/// Carries a built request to the API and returns the decoded JSON envelope.
///
/// Implementations make exactly one attempt and never inspect the envelope;
/// GraphQL-level errors are the decoder's business.
pub trait GraphqlTransport: Send + Sync {
    /// Executes `request`, abandoning it if `cancel` fires first.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] on network failure, a non-2xx status,
    /// cancellation, or a body that is not JSON.
    fn execute<'a>(
        &'a self,
        request: &'a GraphqlRequest,
        cancel: &'a CancellationToken,
    ) -> TransportFuture<'a>;
}
