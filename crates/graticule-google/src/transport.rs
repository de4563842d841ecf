//! The HTTP seam between [`crate::GoogleGeocoder`] and the network.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::GeocodeError;

/// Raw result of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status, independent of the status embedded in the body.
    pub status: u16,
    /// Undecoded body bytes; the parser honours the document's encoding.
    pub body: Vec<u8>,
}

/// Sends a fully built request URL and returns the raw response.
///
/// Connection handling, TLS, and any socket-level retries belong to the
/// implementation. The geocoder only looks at the status and body.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<TransportResponse, GeocodeError>> + Send;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with the given request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, url: &Url) -> Result<TransportResponse, GeocodeError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(TransportResponse { status, body })
    }
}
