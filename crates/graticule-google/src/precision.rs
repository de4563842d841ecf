//! Accuracy token → [`Precision`].
//!
//! The XML geocoder reports `AddressDetails/@Accuracy` as a number from 0 to
//! 9. Some payloads carry a level name instead; both spellings are accepted.
//! Precision is best-effort metadata, so anything unrecognized resolves to
//! [`Precision::Unknown`].

use graticule_core::Precision;

/// Google accuracy codes, indexed by code.
const ACCURACY_CODES: [Precision; 10] = [
    Precision::Unknown,    // 0 unknown location
    Precision::Country,    // 1 country
    Precision::Region,     // 2 region (state, province, prefecture)
    Precision::Region,     // 3 sub-region (county, municipality)
    Precision::Locality,   // 4 town (city, village)
    Precision::PostalCode, // 5 post code
    Precision::Street,     // 6 street
    Precision::Street,     // 7 intersection
    Precision::Address,    // 8 address
    Precision::Address,    // 9 premise (building, property, shopping center)
];

/// Level names Google uses that are not canonical [`Precision`] names.
const ACCURACY_ALIASES: [(&str, Precision); 5] = [
    ("sub_region", Precision::Region),
    ("town", Precision::Locality),
    ("zip", Precision::PostalCode),
    ("intersection", Precision::Street),
    ("premise", Precision::Address),
];

/// Resolves a numeric accuracy code.
#[must_use]
pub fn precision_for_code(code: i64) -> Precision {
    usize::try_from(code)
        .ok()
        .and_then(|idx| ACCURACY_CODES.get(idx).copied())
        .unwrap_or_default()
}

/// Resolves a raw accuracy token, numeric (`"8"`) or named (`"address"`).
#[must_use]
pub fn resolve_precision(token: Option<&str>) -> Precision {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return Precision::Unknown;
    };

    if let Ok(code) = token.parse::<i64>() {
        return precision_for_code(code);
    }

    token.parse::<Precision>().unwrap_or_else(|_| {
        ACCURACY_ALIASES
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(token))
            .map_or(Precision::Unknown, |&(_, precision)| precision)
    })
}
