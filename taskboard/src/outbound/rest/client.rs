//! Reqwest-backed transport for path-addressed task resources.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::outbound::remote::{RemoteError, build_client, map_status_error, map_transport_error};

/// Issues JSON requests below one base URL. A 404 answer is `None`.
#[derive(Debug, Clone)]
pub struct RestClient {
    client: Client,
    base: Url,
}

impl RestClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            base,
        })
    }

    /// GET a resource and decode it; `None` on 404.
    pub(super) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<T>, RemoteError> {
        let bytes = self.send(Method::GET, segments, None).await?;
        bytes.as_deref().map(decode_body::<T>).transpose()
    }

    /// Send `body` as JSON and decode the answer; `None` on 404.
    pub(super) async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<Option<T>, RemoteError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)
            .map_err(|err| RemoteError::decode(format!("unserializable request body: {err}")))?;
        let bytes = self.send(method, segments, Some(body)).await?;
        bytes.as_deref().map(decode_body::<T>).transpose()
    }

    /// Send a bodiless request and ignore the answer; `false` on 404.
    pub(super) async fn execute(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<bool, RemoteError> {
        Ok(self.send(method, segments, None).await?.is_some())
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<serde_json::Value>,
    ) -> Result<Option<Vec<u8>>, RemoteError> {
        let url = self.resource_url(segments)?;
        debug!(%method, %url, "sending REST request");
        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }
        Ok(Some(bytes.to_vec()))
    }

    fn resource_url(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::rejected(format!("base URL `{}` cannot carry a path", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, RemoteError> {
    serde_json::from_slice(bytes)
        .map_err(|err| RemoteError::decode(format!("invalid response body: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8080", &["tasks"], "http://localhost:8080/tasks")]
    #[case("http://localhost:8080/api/", &["tasks", "4"], "http://localhost:8080/api/tasks/4")]
    #[case("http://localhost:8080/api", &["tasks", "4", "toggle"], "http://localhost:8080/api/tasks/4/toggle")]
    fn resource_urls_append_segments(
        #[case] base: &str,
        #[case] segments: &[&str],
        #[case] expected: &str,
    ) {
        let client = RestClient::new(Url::parse(base).expect("url"), Duration::from_secs(1))
            .expect("client");
        assert_eq!(
            client.resource_url(segments).expect("url").as_str(),
            expected
        );
    }

    #[rstest]
    fn opaque_bases_are_rejected() {
        let client = RestClient::new(
            Url::parse("mailto:tasks@example.com").expect("url"),
            Duration::from_secs(1),
        )
        .expect("client");
        assert!(matches!(
            client.resource_url(&["tasks"]),
            Err(RemoteError::Rejected { .. })
        ));
    }
}
