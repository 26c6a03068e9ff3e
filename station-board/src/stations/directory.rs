//! In-memory station directory.

use std::collections::HashMap;

use crate::domain::{Station, StationCode};

use super::error::ResolveError;

/// Placeholder shown by the station picker when nothing is selected.
pub const NO_SELECTION: &str = "-- Select a station --";

/// Immutable lookup from short code to station, preserving feed order.
///
/// If the feed lists a short code more than once, the first entry wins.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: Vec<Station>,
    by_code: HashMap<StationCode, usize>,
}

impl StationDirectory {
    /// Build a directory from stations in feed order.
    pub fn new(stations: Vec<Station>) -> Self {
        let mut by_code = HashMap::with_capacity(stations.len());
        for (i, station) in stations.iter().enumerate() {
            by_code.entry(station.short_code.clone()).or_insert(i);
        }
        Self { stations, by_code }
    }

    /// Look up a station by short code.
    pub fn get(&self, code: &StationCode) -> Option<&Station> {
        self.by_code.get(code).map(|&i| &self.stations[i])
    }

    /// Display name for a code, falling back to the raw code.
    pub fn name_or_code(&self, code: &StationCode) -> String {
        self.get(code)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| code.as_str().to_string())
    }

    /// Resolve free-text user input to a station.
    ///
    /// `query` is matched case-insensitively against station names: the first
    /// station (in feed order) whose name equals the query or starts with it
    /// wins. `selected` is the name currently shown in the station picker; a
    /// station with exactly that name also matches. The picker placeholder
    /// counts as no selection.
    pub fn resolve(&self, query: &str, selected: Option<&str>) -> Result<&Station, ResolveError> {
        let query = query.trim().to_lowercase();
        let selected = selected
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != NO_SELECTION)
            .map(str::to_lowercase);

        if query.is_empty() && selected.is_none() {
            return Err(ResolveError::EmptyQuery);
        }

        self.stations
            .iter()
            .find(|st| {
                let name = st.name.to_lowercase();
                let by_query = !query.is_empty() && name.starts_with(&query);
                let by_selection = selected.as_deref().is_some_and(|sel| name == sel);
                by_query || by_selection
            })
            .ok_or_else(|| {
                let shown = if query.is_empty() {
                    selected.unwrap_or_default()
                } else {
                    query
                };
                ResolveError::NotFound(shown)
            })
    }

    /// Stations whose name contains `query` (case-insensitive).
    ///
    /// Passenger stations are listed before the rest; within each group feed
    /// order is kept. An empty query returns nothing.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&Station> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<&Station> = self
            .stations
            .iter()
            .filter(|st| st.name.to_lowercase().contains(&query))
            .collect();

        matches.sort_by_key(|st| !st.passenger_traffic);
        matches.truncate(limit);
        matches
    }

    /// All stations in feed order.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
