use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// How coarse a geocoded match is.
///
/// Variants are declared coarse → fine, so the derived ordering lets callers
/// write `location.precision >= Precision::Street`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    #[default]
    Unknown,
    Country,
    Region,
    Locality,
    PostalCode,
    Street,
    Address,
}

impl Precision {
    /// Every level, coarse → fine.
    pub const ALL: [Precision; 7] = [
        Precision::Unknown,
        Precision::Country,
        Precision::Region,
        Precision::Locality,
        Precision::PostalCode,
        Precision::Street,
        Precision::Address,
    ];

    /// Snake-case name, identical to the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Precision::Unknown => "unknown",
            Precision::Country => "country",
            Precision::Region => "region",
            Precision::Locality => "locality",
            Precision::PostalCode => "postal_code",
            Precision::Street => "street",
            Precision::Address => "address",
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Precision {
    type Err = CoreError;

    /// Parses a snake-case level name, ignoring ASCII case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Precision::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::InvalidPrecision(s.to_string()))
    }
}
