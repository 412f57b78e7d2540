//! Venue records as returned by a venue source.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A place-of-interest record from a venue source.
///
/// Address, review, and photo URLs are opaque passthrough data: the core
/// never reads them, they are carried for display layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Source-assigned identifier.
    pub id: String,
    pub name: String,
    /// Free-text category tag, e.g. `"cafe"` or `"bar"`.
    pub category: String,
    /// Venues without a coordinate are excluded from distance ranking.
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

impl Venue {
    /// Exact case-insensitive category match.
    #[must_use]
    pub fn matches_category(&self, filter: &str) -> bool {
        self.category.eq_ignore_ascii_case(filter)
    }
}

/// A [`Venue`] annotated with its computed distance from a query origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedVenue {
    pub venue: Venue,
    /// Whole meters from the query origin; deterministic for a given pair
    /// of coordinates.
    pub distance_meters: u32,
}

/// Map raw source type tags onto the category a listing groups them under.
///
/// Upstream place APIs return a list of tags per venue; the first one with a
/// known mapping wins. Night clubs list as bars, takeaway and delivery as
/// plain food. Venues whose tags are all unknown return `None` and are
/// dropped from category-normalized listings.
#[must_use]
pub fn canonical_category(raw_tags: &[&str]) -> Option<&'static str> {
    raw_tags.iter().find_map(|tag| match *tag {
        "restaurant" => Some("restaurant"),
        "cafe" => Some("cafe"),
        "bar" | "night_club" => Some("bar"),
        "food" | "meal_takeaway" | "meal_delivery" => Some("food"),
        "bistro" => Some("bistro"),
        "pub" => Some("pub"),
        _ => None,
    })
}
