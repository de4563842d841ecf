//! The normalized geocoding result.

use serde::{Deserialize, Serialize};

use crate::precision::Precision;

/// A normalized address plus coordinates.
///
/// Every field the provider did not return is `None`; an element that was
/// returned but empty is `Some("")`. Equality compares every field, so two
/// locations geocoded from identical responses are always equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub street: Option<String>,
    pub locality: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    /// Country as returned by the provider (Google returns ISO 3166-1 alpha-2).
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub precision: Precision,
}

/// Unit for [`Location::distance_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Kilometers,
    Miles,
}

impl DistanceUnit {
    const fn earth_radius(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => 6371.0,
            DistanceUnit::Miles => 3958.8,
        }
    }
}

impl Location {
    /// `(latitude, longitude)` when both are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }

    /// `true` when no address component and no coordinate is set.
    /// Precision is ignored.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        let text_blank = [
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .all(|field| field.as_deref().is_none_or(|s| s.trim().is_empty()));

        text_blank && self.latitude.is_none() && self.longitude.is_none()
    }

    /// Great-circle distance to `other` using the Haversine formula.
    ///
    /// Returns `None` unless both locations carry coordinates.
    #[must_use]
    pub fn distance_to(&self, other: &Location, unit: DistanceUnit) -> Option<f64> {
        let (lat1, lon1) = self.coordinates()?;
        let (lat2, lon2) = other.coordinates()?;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lon = (lon2 - lon1).to_radians();

        let a = (lat1_rad.cos() * lat2_rad.cos()).mul_add(
            (delta_lon / 2.0).sin().powi(2),
            (delta_lat / 2.0).sin().powi(2),
        );
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Some(unit.earth_radius() * c)
    }

    /// Single-line form used as a free-text geocoding query,
    /// e.g. `"1600 Amphitheatre Pkwy, Mountain View, CA 94043 US"`.
    #[must_use]
    pub fn to_query(&self) -> String {
        self.address_lines().join(", ")
    }

    /// Postal-style lines: street, then `locality, region postal_code country`.
    fn address_lines(&self) -> Vec<String> {
        let non_empty = |field: &Option<String>| {
            field
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };

        let mut lines = Vec::new();
        if let Some(street) = non_empty(&self.street) {
            lines.push(street);
        }

        let region_postal = [non_empty(&self.region), non_empty(&self.postal_code)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        let mut last = [non_empty(&self.locality), Some(region_postal)]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        if let Some(country) = non_empty(&self.country) {
            if !last.is_empty() {
                last.push(' ');
            }
            last.push_str(&country);
        }
        if !last.is_empty() {
            lines.push(last);
        }
        lines
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.address_lines().join("\n"))
    }
}

#[cfg(test)]
#[path = "location_test.rs"]
mod tests;
