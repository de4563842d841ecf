//! Provider status codes and their classification into [`GeocodeError`]s.
//!
//! The geocoder reports its outcome in the body (`Response/Status/code`),
//! independently of the HTTP status. Older revisions use numeric codes
//! (`200`, `602`, `620`, ...), newer ones symbolic names (`OK`,
//! `ZERO_RESULTS`, `OVER_QUERY_LIMIT`, ...). Both parse to the same
//! [`StatusCode`].

use crate::error::GeocodeError;

/// Outcome reported by the geocoding service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCode {
    /// `200` / `OK`
    Success,
    /// `400`: the request could not be parsed.
    BadRequest,
    /// `500` / `UNKNOWN_ERROR`, or a 5xx from the transport.
    ServerError,
    /// `601` / `INVALID_REQUEST`: empty or missing address.
    MissingAddress,
    /// `602` / `ZERO_RESULTS`
    UnknownAddress,
    /// `603`: the address exists but cannot be returned for legal or
    /// contractual reasons.
    UnavailableAddress,
    /// `610` / `REQUEST_DENIED`
    BadKey,
    /// `620` / `OVER_QUERY_LIMIT`
    TooManyQueries,
    /// Anything else, kept verbatim.
    Unrecognized(String),
}

impl StatusCode {
    /// Parses a numeric or symbolic status token. Never fails: unknown tokens
    /// become [`StatusCode::Unrecognized`].
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        match token {
            "200" | "OK" => StatusCode::Success,
            "400" => StatusCode::BadRequest,
            "500" | "UNKNOWN_ERROR" => StatusCode::ServerError,
            "601" | "INVALID_REQUEST" => StatusCode::MissingAddress,
            "602" | "ZERO_RESULTS" => StatusCode::UnknownAddress,
            "603" => StatusCode::UnavailableAddress,
            "610" | "REQUEST_DENIED" => StatusCode::BadKey,
            "620" | "OVER_QUERY_LIMIT" => StatusCode::TooManyQueries,
            other => StatusCode::Unrecognized(other.to_owned()),
        }
    }

    /// Maps a transport-level HTTP status onto a provider status.
    ///
    /// Only server errors (5xx) have a provider equivalent; everything else
    /// returns `None` and is handled by the caller.
    #[must_use]
    pub fn from_http_status(status: u16) -> Option<Self> {
        (500..600)
            .contains(&status)
            .then_some(StatusCode::ServerError)
    }

    /// Numeric code used by the XML geocoder, when one exists.
    #[must_use]
    pub const fn code(&self) -> Option<u16> {
        match self {
            StatusCode::Success => Some(200),
            StatusCode::BadRequest => Some(400),
            StatusCode::ServerError => Some(500),
            StatusCode::MissingAddress => Some(601),
            StatusCode::UnknownAddress => Some(602),
            StatusCode::UnavailableAddress => Some(603),
            StatusCode::BadKey => Some(610),
            StatusCode::TooManyQueries => Some(620),
            StatusCode::Unrecognized(_) => None,
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self, self.code()) {
            (StatusCode::Unrecognized(raw), _) => write!(f, "status '{raw}'"),
            (_, Some(code)) => write!(f, "status {code}"),
            (_, None) => f.write_str("status"),
        }
    }
}

/// Decides whether a response with `status` and `result_count` placemarks is
/// usable.
///
/// A specific status always wins. The result count is only consulted for a
/// success status, where zero placemarks is reported as an unknown address.
///
/// # Errors
///
/// - [`GeocodeError::Credentials`] for a bad key or exhausted quota.
/// - [`GeocodeError::Address`] for missing, unknown, or unavailable
///   addresses, and for a success status without any placemark.
/// - [`GeocodeError::Service`] for server errors, bad requests, and
///   unrecognized statuses.
pub fn classify(status: &StatusCode, result_count: usize) -> Result<(), GeocodeError> {
    let status = status.clone();
    match status {
        StatusCode::Success if result_count > 0 => Ok(()),
        StatusCode::Success => Err(GeocodeError::Address {
            status,
            reason: "no placemarks returned",
        }),
        StatusCode::MissingAddress => Err(GeocodeError::Address {
            status,
            reason: "missing address",
        }),
        StatusCode::UnknownAddress => Err(GeocodeError::Address {
            status,
            reason: "unknown address",
        }),
        StatusCode::UnavailableAddress => Err(GeocodeError::Address {
            status,
            reason: "unavailable address",
        }),
        StatusCode::BadKey => Err(GeocodeError::Credentials {
            status,
            reason: "invalid key",
        }),
        StatusCode::TooManyQueries => Err(GeocodeError::Credentials {
            status,
            reason: "too many queries",
        }),
        StatusCode::ServerError => Err(GeocodeError::Service {
            status,
            reason: "server error",
        }),
        StatusCode::BadRequest => Err(GeocodeError::Service {
            status,
            reason: "bad request",
        }),
        StatusCode::Unrecognized(_) => Err(GeocodeError::Service {
            status,
            reason: "unrecognized status",
        }),
    }
}
