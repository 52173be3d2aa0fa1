//! Rail station, line and system identifiers.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Reserved code of the national intercity rail system.
pub const INTERCITY_SYSTEM: &str = "SRT";

/// Error returned when parsing an invalid rail system code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid rail system code: {reason}")]
pub struct InvalidSystemCode {
    reason: &'static str,
}

/// Code of a rail system such as `BTS`, `MRT`, `ARL` or `SRT`.
///
/// System codes are 1 to 8 uppercase ASCII letters or digits. This type
/// guarantees that any `SystemCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use journey_server::domain::SystemCode;
///
/// let bts = SystemCode::parse("BTS").unwrap();
/// assert_eq!(bts.as_str(), "BTS");
///
/// // Lowercase is rejected
/// assert!(SystemCode::parse("bts").is_err());
///
/// // Empty is rejected
/// assert!(SystemCode::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SystemCode(String);

impl SystemCode {
    /// Parse a system code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidSystemCode> {
        if s.is_empty() || s.len() > 8 {
            return Err(InvalidSystemCode {
                reason: "must be 1 to 8 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(InvalidSystemCode {
                reason: "must be uppercase ASCII letters or digits",
            });
        }

        Ok(SystemCode(s.to_string()))
    }

    /// The reserved intercity system code.
    pub fn intercity() -> Self {
        SystemCode(INTERCITY_SYSTEM.to_string())
    }

    /// Returns the system code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SystemCode {
    type Error = InvalidSystemCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SystemCode> for String {
    fn from(code: SystemCode) -> Self {
        code.0
    }
}

impl fmt::Debug for SystemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SystemCode({})", self.0)
    }
}

impl fmt::Display for SystemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of a station within the rail network document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station on an urban or intercity rail system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailStation {
    pub id: StationId,

    /// Display names keyed by locale (e.g. `en`, `th`).
    #[serde(default)]
    pub display_name_by_locale: BTreeMap<String, String>,

    pub system: SystemCode,
    pub lat: f64,
    pub lng: f64,

    /// The line this station is listed under in the source data.
    pub line_id: String,
}

impl RailStation {
    /// Station position.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    /// Display name for `locale`, falling back to English and then to any
    /// available name, and finally to the station id.
    pub fn display_name(&self, locale: &str) -> &str {
        self.display_name_by_locale
            .get(locale)
            .or_else(|| self.display_name_by_locale.get("en"))
            .or_else(|| self.display_name_by_locale.values().next())
            .map(String::as_str)
            .unwrap_or(self.id.as_str())
    }
}

/// A rail line: an ordered run of stations on one system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RailLine {
    pub id: String,
    pub system: SystemCode,

    #[serde(alias = "stationIds")]
    pub ordered_station_ids: Vec<StationId>,

    /// Track geometry for map rendering; not used in pricing.
    #[serde(default)]
    pub polyline_coordinates: Vec<Coordinate>,
}

impl RailLine {
    /// Position of `station` along this line, if it is on it.
    pub fn position_of(&self, station: &StationId) -> Option<usize> {
        self.ordered_station_ids.iter().position(|id| id == station)
    }

    /// Number of stops between two stations on this line, if both are on it.
    pub fn stops_between(&self, from: &StationId, to: &StationId) -> Option<usize> {
        let start = self.position_of(from)?;
        let end = self.position_of(to)?;
        Some(start.abs_diff(end))
    }
}
