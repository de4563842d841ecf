//! Conversion of a [`RawResult`] into a [`Location`].

use graticule_core::Location;

use crate::error::GeocodeError;
use crate::parse::{AddressField, RawResult};
use crate::precision::resolve_precision;

/// Normalizes one placemark.
///
/// Text fields are trimmed; fields the placemark did not carry stay `None`.
/// Blank coordinates are treated as absent.
///
/// # Errors
///
/// Returns [`GeocodeError::Malformed`] if the coordinates are present but not
/// a valid `lng,lat[,alt]` triple.
pub fn normalize_result(raw: &RawResult) -> Result<Location, GeocodeError> {
    let text = |field: AddressField| raw.field(field).map(|value| value.trim().to_owned());

    let (longitude, latitude) = match raw.coordinates.as_deref().map(str::trim) {
        Some(coordinates) if !coordinates.is_empty() => {
            let (lng, lat) = parse_coordinates(coordinates)?;
            (Some(lng), Some(lat))
        }
        _ => (None, None),
    };

    Ok(Location {
        street: text(AddressField::Street),
        locality: text(AddressField::Locality),
        region: text(AddressField::Region),
        postal_code: text(AddressField::PostalCode),
        country: text(AddressField::Country),
        latitude,
        longitude,
        precision: resolve_precision(raw.accuracy.as_deref()),
    })
}

/// Parses KML `lng,lat[,alt]` into `(longitude, latitude)`.
fn parse_coordinates(raw: &str) -> Result<(f64, f64), GeocodeError> {
    let mut parts = raw.split(',').map(str::trim);
    let (Some(lng), Some(lat)) = (parts.next(), parts.next()) else {
        return Err(GeocodeError::Malformed(format!(
            "coordinates '{raw}' are not 'lng,lat[,alt]'"
        )));
    };

    let parse = |value: &str, limit: f64| {
        value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.abs() <= limit)
            .ok_or_else(|| {
                GeocodeError::Malformed(format!("invalid coordinate '{value}' in '{raw}'"))
            })
    };

    Ok((parse(lng, 180.0)?, parse(lat, 90.0)?))
}
