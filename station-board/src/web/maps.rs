//! Map links for destination stations.
//!
//! Destinations on the board link to a map search for the station name, so
//! the user can see where a train is heading.

use reqwest::Url;

const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/";

/// Map search URL for a place name.
///
/// The name is percent-encoded as a single path segment.
///
/// # Example
///
/// ```ignore
/// let url = maps_search_url("Tampere asema");
/// // Returns: "https://www.google.com/maps/search/Tampere%20asema"
/// ```
pub fn maps_search_url(name: &str) -> String {
    let Ok(mut url) = Url::parse(MAPS_SEARCH_BASE) else {
        return MAPS_SEARCH_BASE.to_string();
    };
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().push(name.trim());
    }
    url.into()
}
