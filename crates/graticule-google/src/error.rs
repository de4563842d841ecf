use thiserror::Error;

use crate::status::StatusCode;

/// Errors returned by [`crate::GoogleGeocoder`].
///
/// Callers that only care about the failure class should match on
/// [`GeocodeError::kind`] rather than on individual variants.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The service rejected the API key or the key is over its query quota.
    #[error("credentials rejected ({status}): {reason}")]
    Credentials {
        status: StatusCode,
        reason: &'static str,
    },

    /// The service understood the request but could not resolve the address.
    #[error("address could not be geocoded ({status}): {reason}")]
    Address {
        status: StatusCode,
        reason: &'static str,
    },

    /// Any other non-success status reported by the service.
    #[error("geocoding service error ({status}): {reason}")]
    Service {
        status: StatusCode,
        reason: &'static str,
    },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx, non-5xx HTTP status from the transport.
    #[error("unexpected HTTP status {status} from geocoding service")]
    UnexpectedStatus { status: u16 },

    /// The body is not well-formed XML.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The body is XML but does not follow the geocoder response schema.
    #[error("malformed geocoder response: {0}")]
    Malformed(String),

    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// The three failure classes callers are expected to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Authorization or quota problem; fix the key, not the address.
    Credentials,
    /// The address is missing, unknown, or cannot be returned.
    Address,
    /// Everything else: server errors, unknown statuses, unreadable responses.
    General,
}

impl GeocodeError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            GeocodeError::Credentials { .. } => ErrorKind::Credentials,
            GeocodeError::Address { .. } => ErrorKind::Address,
            GeocodeError::Service { .. }
            | GeocodeError::Http(_)
            | GeocodeError::UnexpectedStatus { .. }
            | GeocodeError::Xml(_)
            | GeocodeError::Malformed(_)
            | GeocodeError::InvalidBaseUrl { .. } => ErrorKind::General,
        }
    }
}
