//! Google Maps geocoder over the XML (KML) HTTP interface.
//!
//! [`GoogleGeocoder::locate`] sends the address through a [`Transport`],
//! parses the body, classifies the provider status, and normalizes the first
//! placemark into a [`Location`].

use graticule_core::{GeocoderConfig, Location};
use reqwest::Url;
use tracing::{debug, warn};

use crate::error::GeocodeError;
use crate::normalize::normalize_result;
use crate::parse::parse_response;
use crate::status::{classify, StatusCode};
use crate::transport::{HttpTransport, Transport};

/// Client for the Google Maps XML geocoder.
///
/// Holds only the API key, the endpoint, and the transport; nothing is
/// mutated after construction, so one instance can serve concurrent
/// [`GoogleGeocoder::locate`] calls.
pub struct GoogleGeocoder<T = HttpTransport> {
    transport: T,
    api_key: String,
    base_url: Url,
}

impl GoogleGeocoder {
    /// Creates a geocoder for the production endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be constructed.
    pub fn new(api_key: &str) -> Result<Self, GeocodeError> {
        Self::from_config(&GeocoderConfig::with_api_key(api_key))
    }

    /// Creates a geocoder with a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be constructed,
    /// or [`GeocodeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let config = GeocoderConfig {
            base_url: base_url.to_owned(),
            request_timeout_secs: timeout_secs,
            ..GeocoderConfig::with_api_key(api_key)
        };
        Self::from_config(&config)
    }

    /// Creates a geocoder from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the HTTP client cannot be constructed,
    /// or [`GeocodeError::InvalidBaseUrl`] if the configured URL does not parse.
    pub fn from_config(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let transport = HttpTransport::new(config.request_timeout_secs, &config.user_agent)?;
        Self::with_transport(&config.api_key, &config.base_url, transport)
    }
}

impl<T: Transport> GoogleGeocoder<T> {
    /// Creates a geocoder that sends requests through `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_transport(
        api_key: &str,
        base_url: &str,
        transport: T,
    ) -> Result<Self, GeocodeError> {
        let base_url = Url::parse(base_url).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GeocodeError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "not a hierarchical URL".to_string(),
            });
        }

        Ok(Self {
            transport,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Geocodes a free-text address.
    ///
    /// When the service returns several placemarks, the first one (the
    /// provider's best match) is used.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Address`] if the address is blank, unknown, or
    ///   unavailable, or the service returns no placemark.
    /// - [`GeocodeError::Credentials`] if the key is rejected or over quota.
    /// - [`GeocodeError::Service`] on a server error or unrecognized status.
    /// - [`GeocodeError::Http`], [`GeocodeError::UnexpectedStatus`],
    ///   [`GeocodeError::Xml`], or [`GeocodeError::Malformed`] when the
    ///   response cannot be obtained or understood.
    pub async fn locate(&self, address: &str) -> Result<Location, GeocodeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::Address {
                status: StatusCode::MissingAddress,
                reason: "missing address",
            });
        }

        let url = self.build_url(address);
        debug!(address, endpoint = %self.base_url, "geocoding address");

        let response = self.transport.send(&url).await?;
        if let Some(status) = StatusCode::from_http_status(response.status) {
            warn!(
                address,
                http_status = response.status,
                "geocoder returned a server error"
            );
            return Err(GeocodeError::Service {
                status,
                reason: "server error",
            });
        }
        if !(200..300).contains(&response.status) {
            warn!(
                address,
                http_status = response.status,
                "unexpected HTTP status from geocoder"
            );
            return Err(GeocodeError::UnexpectedStatus {
                status: response.status,
            });
        }

        let parsed = parse_response(&response.body)?;
        if let Err(err) = classify(&parsed.status, parsed.results.len()) {
            warn!(address, error = %err, "geocoding failed");
            return Err(err);
        }

        if parsed.results.len() > 1 {
            debug!(
                address,
                candidates = parsed.results.len(),
                "multiple placemarks returned; using the first"
            );
        }

        let first = parsed
            .results
            .first()
            .ok_or_else(|| GeocodeError::Malformed("no placemark to normalize".to_string()))?;
        normalize_result(first)
    }

    /// Geocodes a structured location by formatting it as a one-line query.
    ///
    /// # Errors
    ///
    /// Same as [`GoogleGeocoder::locate`]; a location without any address
    /// component fails with [`GeocodeError::Address`].
    pub async fn locate_location(&self, location: &Location) -> Result<Location, GeocodeError> {
        self.locate(&location.to_query()).await
    }

    /// Builds the request URL with form-encoded query parameters.
    ///
    /// `oe=utf-8` asks the service to encode its response as UTF-8.
    pub(crate) fn build_url(&self, address: &str) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", address)
            .append_pair("key", &self.api_key)
            .append_pair("oe", "utf-8")
            .append_pair("output", "xml")
            .append_pair("sensor", "false");
        url
    }
}

impl<T> std::fmt::Debug for GoogleGeocoder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleGeocoder")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
