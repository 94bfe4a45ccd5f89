//! Reqwest-backed GraphQL transport.
//!
//! The client owns request serialization, HTTP status mapping, and envelope
//! decoding. Callers receive the typed `data` payload or a [`RemoteError`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{GraphqlRequest, GraphqlResponse};
use crate::outbound::remote::{RemoteError, build_client, map_status_error, map_transport_error};

/// POSTs GraphQL documents to one endpoint.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    client: Client,
    endpoint: Url,
}

impl GraphqlClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            endpoint,
        })
    }

    /// Execute `document` with `variables` and decode the `data` payload.
    pub(super) async fn execute<V, D>(
        &self,
        operation: &'static str,
        document: &str,
        variables: V,
    ) -> Result<D, RemoteError>
    where
        V: Serialize + Send,
        D: DeserializeOwned,
    {
        debug!(operation, endpoint = %self.endpoint, "sending GraphQL request");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&GraphqlRequest {
                query: document,
                variables,
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode_envelope(operation, body.as_ref())
    }
}

fn decode_envelope<D: DeserializeOwned>(
    operation: &'static str,
    body: &[u8],
) -> Result<D, RemoteError> {
    let envelope: GraphqlResponse<D> = serde_json::from_slice(body).map_err(|err| {
        RemoteError::decode(format!("invalid {operation} response: {err}"))
    })?;
    if !envelope.errors.is_empty() {
        let messages = envelope
            .errors
            .into_iter()
            .map(|error| error.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(RemoteError::rejected(messages));
    }
    envelope
        .data
        .ok_or_else(|| RemoteError::decode(format!("{operation} response carried no data")))
}
