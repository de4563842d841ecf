//! Google Maps geocoder for graticule.
//!
//! Pipeline per [`GoogleGeocoder::locate`] call:
//!
//! 1. [`Transport`] fetches the XML response (HTTP status + raw bytes).
//! 2. [`parse_response`] extracts the status code and every placemark.
//! 3. [`classify`] turns the status into success or a [`GeocodeError`].
//! 4. [`normalize_result`] converts the first placemark into a [`Location`],
//!    resolving the accuracy code with [`resolve_precision`].

pub mod client;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod precision;
pub mod status;
pub mod transport;

pub use client::GoogleGeocoder;
pub use error::{ErrorKind, GeocodeError};
pub use graticule_core::{Location, Precision};
pub use normalize::normalize_result;
pub use parse::{parse_response, AddressField, ParsedResponse, RawResult};
pub use precision::{precision_for_code, resolve_precision};
pub use status::{classify, StatusCode};
pub use transport::{HttpTransport, Transport, TransportResponse};
