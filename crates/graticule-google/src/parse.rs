//! Streaming parser for the XML (KML) geocoder response.
//!
//! Observed shape (`output=xml`, `oe=utf-8`):
//!
//! ```text
//! kml
//! └─ Response
//!    ├─ Status/code                      200 | 601 | 602 | ...
//!    └─ Placemark*                       provider order, best match first
//!       ├─ AddressDetails @Accuracy      0..=9
//!       │  └─ Country/CountryNameCode
//!       │     └─ AdministrativeArea/AdministrativeAreaName
//!       │        └─ [SubAdministrativeArea/] Locality/LocalityName
//!       │           ├─ Thoroughfare/ThoroughfareName
//!       │           └─ PostalCode/PostalCodeNumber
//!       └─ Point/coordinates             "lng,lat,alt"
//! ```
//!
//! Depth of the address hierarchy varies per match (a locality-level result
//! has no `Thoroughfare`, a coordinates-only result has no `Country`), so
//! address fields are matched by element local name anywhere inside the
//! placemark. Namespace prefixes are ignored.
//!
//! The reader honours a UTF-8 byte-order mark or the encoding declared in the
//! XML prolog (UTF-8 when none is declared), so all extracted text is already
//! decoded. Only ASCII-compatible encodings are readable; UTF-16 documents
//! are rejected up front.

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::GeocodeError;
use crate::status::StatusCode;

/// Address component carried by a placemark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Street,
    Locality,
    Region,
    PostalCode,
    Country,
}

/// Element local name → address field.
const ADDRESS_SCHEMA: [(&[u8], AddressField); 5] = [
    (b"ThoroughfareName", AddressField::Street),
    (b"LocalityName", AddressField::Locality),
    (b"AdministrativeAreaName", AddressField::Region),
    (b"PostalCodeNumber", AddressField::PostalCode),
    (b"CountryNameCode", AddressField::Country),
];

impl AddressField {
    fn from_element(local_name: &[u8]) -> Option<Self> {
        ADDRESS_SCHEMA
            .iter()
            .find(|(element, _)| *element == local_name)
            .map(|&(_, field)| field)
    }
}

/// Leading bytes of UTF-16 documents, with or without a byte-order mark.
const UTF16_PREFIXES: [(&[u8], &str); 4] = [
    (&[0xFF, 0xFE], "UTF-16LE"),
    (&[0xFE, 0xFF], "UTF-16BE"),
    (&[b'<', 0x00, b'?', 0x00], "UTF-16LE"),
    (&[0x00, b'<', 0x00, b'?'], "UTF-16BE"),
];

/// One placemark, exactly as the provider sent it (untrimmed).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResult {
    /// Address components in document order, at most one per field.
    pub fields: Vec<(AddressField, String)>,
    /// Raw `AddressDetails/@Accuracy` value.
    pub accuracy: Option<String>,
    /// Raw `Point/coordinates` text.
    pub coordinates: Option<String>,
}

impl RawResult {
    #[must_use]
    pub fn field(&self, field: AddressField) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value.as_str())
    }
}

/// Status plus every placemark, in provider order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResponse {
    pub status: StatusCode,
    pub results: Vec<RawResult>,
}

/// Parses a raw response body.
///
/// A response without placemarks parses successfully; deciding whether that
/// is an error is left to [`crate::classify`].
///
/// # Errors
///
/// - [`GeocodeError::Xml`] if the body is not well-formed XML.
/// - [`GeocodeError::Malformed`] if the document is UTF-16 encoded, text
///   cannot be decoded, the document is truncated, or it has no
///   `Status/code` element.
pub fn parse_response(body: &[u8]) -> Result<ParsedResponse, GeocodeError> {
    let utf16 = UTF16_PREFIXES
        .iter()
        .find(|(prefix, _)| body.starts_with(prefix));
    if let Some((_, encoding)) = utf16 {
        return Err(GeocodeError::Malformed(format!(
            "unsupported encoding {encoding}; expected an ASCII-compatible document"
        )));
    }

    let mut reader = Reader::from_reader(body);
    let mut buf = Vec::new();
    let mut state = ParseState::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => state.open(&e, reader.decoder())?,
            Event::Empty(e) => {
                state.open(&e, reader.decoder())?;
                state.close();
            }
            Event::End(_) => state.close(),
            Event::Text(e) => {
                if let Some(capture) = state.capture.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| GeocodeError::Malformed(err.to_string()))?;
                    capture.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(capture) = state.capture.as_mut() {
                    let text = reader
                        .decoder()
                        .decode(&e)
                        .map_err(|err| GeocodeError::Malformed(err.to_string()))?;
                    capture.text.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    state.finish()
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Status,
    Coordinates,
    Field(AddressField),
}

#[derive(Debug)]
struct Capture {
    target: Target,
    /// Element depth of the captured element; text is committed when it closes.
    depth: usize,
    text: String,
}

#[derive(Debug, Default)]
struct ParseState {
    path: Vec<Vec<u8>>,
    status: Option<String>,
    placemark: Option<RawResult>,
    results: Vec<RawResult>,
    capture: Option<Capture>,
}

impl ParseState {
    fn open(&mut self, e: &BytesStart<'_>, decoder: Decoder) -> Result<(), GeocodeError> {
        let local_name = e.local_name();
        let name = local_name.as_ref();
        let parent_is = |expected: &[u8]| self.path.last().is_some_and(|p| p == expected);
        let in_status = parent_is(b"Status");
        let in_point = parent_is(b"Point");

        self.path.push(name.to_vec());
        let depth = self.path.len();

        // Markup nested inside a captured element only contributes its text.
        if self.capture.is_some() {
            return Ok(());
        }

        let Some(placemark) = self.placemark.as_mut() else {
            if name == b"Placemark" {
                self.placemark = Some(RawResult::default());
            } else if name == b"code" && in_status && self.status.is_none() {
                self.capture = Some(Capture::new(Target::Status, depth));
            }
            return Ok(());
        };

        let target = match name {
            b"AddressDetails" => {
                if placemark.accuracy.is_none() {
                    placemark.accuracy = accuracy_attribute(e, decoder)?;
                }
                None
            }
            b"coordinates" if in_point && placemark.coordinates.is_none() => {
                Some(Target::Coordinates)
            }
            other => AddressField::from_element(other)
                .filter(|field| placemark.field(*field).is_none())
                .map(Target::Field),
        };

        if let Some(target) = target {
            self.capture = Some(Capture::new(target, depth));
        }
        Ok(())
    }

    fn close(&mut self) {
        let depth = self.path.len();
        if self.capture.as_ref().is_some_and(|c| c.depth == depth) {
            if let Some(capture) = self.capture.take() {
                self.commit(capture);
            }
        }

        if self.path.pop().is_some_and(|name| name == b"Placemark") {
            if let Some(placemark) = self.placemark.take() {
                self.results.push(placemark);
            }
        }
    }

    fn commit(&mut self, capture: Capture) {
        let Capture { target, text, .. } = capture;
        match (target, self.placemark.as_mut()) {
            (Target::Status, _) => self.status = Some(text),
            (Target::Coordinates, Some(placemark)) => placemark.coordinates = Some(text),
            (Target::Field(field), Some(placemark)) => placemark.fields.push((field, text)),
            (_, None) => {}
        }
    }

    fn finish(self) -> Result<ParsedResponse, GeocodeError> {
        if let Some(open) = self.path.last() {
            return Err(GeocodeError::Malformed(format!(
                "document ended inside <{}>",
                String::from_utf8_lossy(open)
            )));
        }

        let status = self.status.ok_or_else(|| {
            GeocodeError::Malformed("missing Response/Status/code element".to_string())
        })?;

        Ok(ParsedResponse {
            status: StatusCode::parse(&status),
            results: self.results,
        })
    }
}

impl Capture {
    fn new(target: Target, depth: usize) -> Self {
        Self {
            target,
            depth,
            text: String::new(),
        }
    }
}

fn accuracy_attribute(
    e: &BytesStart<'_>,
    decoder: Decoder,
) -> Result<Option<String>, GeocodeError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| GeocodeError::Malformed(err.to_string()))?;
        if attr.key.local_name().as_ref() == b"Accuracy" {
            let value = attr
                .decode_and_unescape_value(decoder)
                .map_err(|err| GeocodeError::Malformed(err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
