//! Replaying adapter for the `GraphqlTransport` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use super::{next_interaction, replay_result};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::TransportError;
use crate::graphql::GraphqlRequest;
use crate::ports::transport::{GraphqlTransport, TransportFuture};

/// Serves recorded GraphQL responses from a cassette, never touching the network.
///
/// Every request that reaches the transport is logged by operation name, so
/// callers can assert exactly which calls were made.
pub struct ReplayingTransport {
    replayer: Arc<Mutex<CassetteReplayer>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ReplayingTransport {
    /// Create a replaying transport backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer, calls: Arc::default() }
    }

    /// Create a replaying transport from an in-memory cassette.
    #[must_use]
    pub fn from_cassette(cassette: &Cassette) -> Self {
        Self::new(Arc::new(Mutex::new(CassetteReplayer::new(cassette))))
    }

    /// Load a cassette file and replay it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        Ok(Self::from_cassette(&Cassette::load(path)?))
    }

    /// Shared handle to the log of operation names executed so far.
    #[must_use]
    pub fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

impl GraphqlTransport for ReplayingTransport {
    /// # Panics
    ///
    /// Panics if the cassette is exhausted or the next recorded operation
    /// differs from the one requested.
    fn execute<'a>(
        &'a self,
        request: &'a GraphqlRequest,
        cancel: &'a CancellationToken,
    ) -> TransportFuture<'a> {
        Box::pin(async move {
            if cancel.is_cancelled() {
                return Err(TransportError::Cancelled);
            }
            self.calls
                .lock()
                .expect("call log lock poisoned")
                .push(request.operation_name.to_string());

            let interaction = next_interaction(&self.replayer, "graphql", "execute");
            let recorded = interaction.input.get("operation").and_then(|v| v.as_str());
            assert_eq!(
                recorded,
                Some(request.operation_name),
                "cassette out of order at seq={}: expected {:?}, got {}",
                interaction.seq,
                recorded,
                request.operation_name,
            );
            log::debug!("replaying {} (seq={})", request.operation_name, interaction.seq);
            replay_result(interaction.output)
        })
    }
}
