//! Station code and station metadata types.

use std::fmt;

/// Error returned when parsing an invalid station short code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A station short code, e.g. `HKI` or `ÄHT`.
///
/// Short codes are the join key between station metadata and timetable rows.
/// Codes from `parse` are non-empty, contain no whitespace and no lowercase
/// letters. Unlike UK CRS codes they vary in length and may contain non-ASCII
/// letters. Queried codes from `parse_query` are only known to be non-blank.
///
/// # Examples
///
/// ```
/// use station_board::domain::StationCode;
///
/// let hki = StationCode::parse("HKI").unwrap();
/// assert_eq!(hki.as_str(), "HKI");
///
/// // Empty and lowercase codes are rejected
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("hki").is_err());
///
/// // User input can be normalized first
/// let psl = StationCode::parse_normalized(" psl ").unwrap();
/// assert_eq!(psl.as_str(), "PSL");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code exactly as given.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(InvalidStationCode {
                reason: "must not contain whitespace",
            });
        }

        if s.chars().any(char::is_lowercase) {
            return Err(InvalidStationCode {
                reason: "must not contain lowercase letters",
            });
        }

        Ok(StationCode(s.to_string()))
    }

    /// Take a queried station code as given, rejecting only blank input.
    ///
    /// Lowercase letters and inner whitespace are kept. Such a code never
    /// equals a code from the feed, so it simply matches nothing.
    pub fn parse_query(s: &str) -> Result<Self, InvalidStationCode> {
        if s.trim().is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be blank",
            });
        }

        Ok(StationCode(s.to_string()))
    }

    /// Parse a station code from user input, trimming and uppercasing it.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A station from the metadata feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Display name, e.g. "Helsinki asema".
    pub name: String,
    /// Short code used in timetable rows.
    pub short_code: StationCode,
    /// Whether the station serves passengers.
    pub passenger_traffic: bool,
}

impl Station {
    pub fn new(name: impl Into<String>, short_code: StationCode) -> Self {
        Self {
            name: name.into(),
            short_code,
            passenger_traffic: true,
        }
    }
}
