//! Live adapter for the `GraphqlTransport` port using the Linear HTTP API.

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;
use crate::graphql::GraphqlRequest;
use crate::ports::transport::{GraphqlTransport, TransportFuture};

/// Default Linear GraphQL endpoint.
pub const LINEAR_API_URL: &str = "https://api.linear.app/graphql";

/// Live transport that POSTs requests to a GraphQL endpoint.
pub struct LiveTransport {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl LiveTransport {
    /// Creates a transport for `endpoint`, authenticating with `api_key`.
    ///
    /// The key is sent verbatim in the `Authorization` header, with no
    /// scheme prefix, as Linear expects for personal API keys.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint, api_key)
    }

    /// Creates a transport that sends through a preconfigured `reqwest` client.
    #[must_use]
    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self { client, endpoint: endpoint.into(), api_key: api_key.into() }
    }

    /// The endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &GraphqlRequest) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(AUTHORIZATION, &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network { message: e.to_string() })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network { message: e.to_string() })?;

        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), body });
        }

        serde_json::from_str(&body)
            .map_err(|e| TransportError::MalformedBody { message: e.to_string() })
    }
}

impl GraphqlTransport for LiveTransport {
    fn execute<'a>(
        &'a self,
        request: &'a GraphqlRequest,
        cancel: &'a CancellationToken,
    ) -> TransportFuture<'a> {
        Box::pin(async move {
            log::debug!("sending {} to {}", request.operation_name, self.endpoint);

            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => Err(TransportError::Cancelled),
                result = self.send(request) => result,
            };

            if let Err(e) = &result {
                log::warn!("{} failed: {e}", request.operation_name);
            }
            result
        })
    }
}
