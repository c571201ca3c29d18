use crate::error::TransportError;
use crate::payload::RemotePayload;
use async_trait::async_trait;
use reqwest::{Client, Url};
use srsforge_traits::{CancellationToken, OrCancelExt};
use std::fmt::Debug;
use std::time::Duration;

/// Path of the render endpoint, relative to the backend base URL.
pub const GENERATE_PATH: &str = "/api/generate-srs";

/// Turns a flattened SRS payload into finished document bytes.
#[async_trait]
pub trait BackendRenderClient: Send + Sync + Debug {
    async fn render(&self, payload: &RemotePayload, cancel: &CancellationToken) -> Result<Vec<u8>, TransportError>;
}

/// Posts the payload as JSON to `{base_url}/api/generate-srs`.
#[derive(Debug, Clone)]
pub struct HttpRenderClient {
    client: Client,
    endpoint: Url,
}

impl HttpRenderClient {
    /// `timeout` bounds the whole request; `None` waits indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let endpoint = endpoint_for(base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Client)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn endpoint_for(base_url: &str) -> Result<Url, TransportError> {
    let invalid = |reason: String| TransportError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };
    let trimmed = base_url.trim().trim_end_matches('/');
    let base = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
    }
    Url::parse(&format!("{trimmed}{GENERATE_PATH}")).map_err(|e| invalid(e.to_string()))
}

#[async_trait]
impl BackendRenderClient for HttpRenderClient {
    async fn render(&self, payload: &RemotePayload, cancel: &CancellationToken) -> Result<Vec<u8>, TransportError> {
        log::info!("POST {}", self.endpoint);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .or_cancel(cancel)
            .await
            .map_err(|_| TransportError::Cancelled)?
            .map_err(TransportError::Request)?;

        let status = response.status();
        let body = response
            .bytes()
            .or_cancel(cancel)
            .await
            .map_err(|_| TransportError::Cancelled)?
            .map_err(TransportError::Request)?;
        log::info!("Rendering backend answered {} with {} bytes", status, body.len());

        if !status.is_success() {
            return Err(TransportError::status(status.as_u16(), &body));
        }
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        let client = HttpRenderClient::new("http://localhost:5000/", None).unwrap();
        assert_eq!(client.endpoint().as_str(), "http://localhost:5000/api/generate-srs");

        let nested = HttpRenderClient::new("https://example.com/srs", Some(Duration::from_secs(5))).unwrap();
        assert_eq!(nested.endpoint().as_str(), "https://example.com/srs/api/generate-srs");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        for url in ["", "not a url", "ftp://example.com"] {
            assert!(
                matches!(HttpRenderClient::new(url, None), Err(TransportError::InvalidBaseUrl { .. })),
                "{url:?}"
            );
        }
    }

    #[test]
    fn status_error_body_is_truncated() {
        let body = vec![b'x'; 2000];
        match TransportError::status(500, &body) {
            TransportError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), crate::MAX_ERROR_BODY_BYTES);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
