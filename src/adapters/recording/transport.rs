//! Recording adapter for the `GraphqlTransport` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::graphql::GraphqlRequest;
use crate::ports::transport::{GraphqlTransport, TransportFuture};

/// Records every request/response pair while delegating to an inner transport.
pub struct RecordingTransport {
    inner: Box<dyn GraphqlTransport>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingTransport {
    /// Creates a recording transport wrapping the given implementation.
    pub fn new(inner: Box<dyn GraphqlTransport>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

/// What a cassette stores about a request. The query text is left out; the
/// operation name identifies it.
#[derive(Serialize)]
struct ExecuteInput<'a> {
    operation: &'a str,
    variables: &'a Value,
}

impl GraphqlTransport for RecordingTransport {
    fn execute<'a>(
        &'a self,
        request: &'a GraphqlRequest,
        cancel: &'a CancellationToken,
    ) -> TransportFuture<'a> {
        Box::pin(async move {
            let result = self.inner.execute(request, cancel).await;
            let input =
                ExecuteInput { operation: request.operation_name, variables: &request.variables };
            record_result(&self.recorder, "graphql", "execute", &input, &result);
            result
        })
    }
}
