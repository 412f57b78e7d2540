//! Near/far venue ranking.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::geo::{distance_meters, Coordinate};
use crate::venue::{RankedVenue, Venue};

/// Default near-bucket threshold in meters.
pub const DEFAULT_NEAR_RADIUS_M: u32 = 1000;

/// Options controlling a ranking pass.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Venues at most this far from the origin land in the near bucket.
    pub near_radius_m: u32,
    /// Exact case-insensitive category filter, applied before partitioning.
    pub category: Option<String>,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            near_radius_m: DEFAULT_NEAR_RADIUS_M,
            category: None,
        }
    }
}

/// Ranked venues partitioned at the near radius.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedVenues {
    /// Venues within the near radius, closest first.
    pub near: Vec<RankedVenue>,
    /// Everything else, closest first.
    pub far: Vec<RankedVenue>,
}

impl RankedVenues {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.near.is_empty() && self.far.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.near.len() + self.far.len()
    }
}

/// Rank `venues` by distance from `origin`.
///
/// Venues without a coordinate are dropped silently. Both buckets are
/// sorted ascending by distance with a stable sort, so equidistant venues
/// keep their input order.
#[must_use]
pub fn rank(origin: Coordinate, venues: Vec<Venue>, options: &RankOptions) -> RankedVenues {
    let mut ranked = RankedVenues::default();

    for venue in venues {
        if let Some(filter) = options.category.as_deref() {
            if !venue.matches_category(filter) {
                continue;
            }
        }
        let Some(coordinate) = venue.coordinate else {
            continue;
        };

        let distance = distance_meters(origin, coordinate);
        let entry = RankedVenue {
            venue,
            distance_meters: distance,
        };
        if distance <= options.near_radius_m {
            ranked.near.push(entry);
        } else {
            ranked.far.push(entry);
        }
    }

    ranked.near.sort_by_key(|rv| rv.distance_meters);
    ranked.far.sort_by_key(|rv| rv.distance_meters);
    ranked
}

/// Pick one venue uniformly at random from the near bucket.
///
/// Returns `None` when nothing is nearby. The far bucket is never
/// consulted: an empty near set is an explicit "nothing nearby" outcome,
/// not a cue to widen the search.
pub fn lucky_pick<'a, R: Rng + ?Sized>(
    ranked: &'a RankedVenues,
    rng: &mut R,
) -> Option<&'a RankedVenue> {
    ranked.near.choose(rng)
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    const ORIGIN: Coordinate = Coordinate {
        latitude: 55.7558,
        longitude: 37.6173,
    };

    fn make_venue(id: &str, category: &str, coordinate: Option<Coordinate>) -> Venue {
        Venue {
            id: id.to_string(),
            name: format!("Venue {id}"),
            category: category.to_string(),
            coordinate,
            address: None,
            review: None,
            photo_urls: vec![],
        }
    }

    /// A coordinate roughly `meters` east of the origin.
    fn east_of_origin(meters: f64) -> Coordinate {
        let degrees = meters / (111_320.0 * ORIGIN.latitude.to_radians().cos());
        Coordinate::new(ORIGIN.latitude, ORIGIN.longitude + degrees)
    }

    #[test]
    fn partition_splits_at_near_radius() {
        let venues = vec![
            make_venue("close", "cafe", Some(east_of_origin(300.0))),
            make_venue("edge", "cafe", Some(east_of_origin(990.0))),
            make_venue("distant", "cafe", Some(east_of_origin(4000.0))),
        ];
        let ranked = rank(ORIGIN, venues, &RankOptions::default());

        let near_ids: Vec<&str> = ranked.near.iter().map(|rv| rv.venue.id.as_str()).collect();
        let far_ids: Vec<&str> = ranked.far.iter().map(|rv| rv.venue.id.as_str()).collect();
        assert_eq!(near_ids, vec!["close", "edge"]);
        assert_eq!(far_ids, vec!["distant"]);
    }

    #[test]
    fn partition_is_complete_and_duplicate_free() {
        let venues: Vec<Venue> = (0..20)
            .map(|i| {
                let id = format!("v{i}");
                make_venue(&id, "bar", Some(east_of_origin(f64::from(i) * 150.0)))
            })
            .collect();
        let input_ids: Vec<String> = venues.iter().map(|v| v.id.clone()).collect();

        let ranked = rank(ORIGIN, venues, &RankOptions::default());
        let mut output_ids: Vec<String> = ranked
            .near
            .iter()
            .chain(ranked.far.iter())
            .map(|rv| rv.venue.id.clone())
            .collect();
        output_ids.sort();
        let mut expected = input_ids;
        expected.sort();
        assert_eq!(output_ids, expected);
        assert_eq!(ranked.len(), 20);
    }

    #[test]
    fn venues_without_coordinates_are_dropped_silently() {
        let venues = vec![
            make_venue("located", "cafe", Some(east_of_origin(100.0))),
            make_venue("unlocated", "cafe", None),
        ];
        let ranked = rank(ORIGIN, venues, &RankOptions::default());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked.near[0].venue.id, "located");
    }

    #[test]
    fn buckets_are_sorted_ascending() {
        let venues = vec![
            make_venue("far2", "bar", Some(east_of_origin(3000.0))),
            make_venue("near2", "bar", Some(east_of_origin(800.0))),
            make_venue("far1", "bar", Some(east_of_origin(1500.0))),
            make_venue("near1", "bar", Some(east_of_origin(200.0))),
        ];
        let ranked = rank(ORIGIN, venues, &RankOptions::default());

        let near_ids: Vec<&str> = ranked.near.iter().map(|rv| rv.venue.id.as_str()).collect();
        let far_ids: Vec<&str> = ranked.far.iter().map(|rv| rv.venue.id.as_str()).collect();
        assert_eq!(near_ids, vec!["near1", "near2"]);
        assert_eq!(far_ids, vec!["far1", "far2"]);
        assert!(ranked.near.windows(2).all(|w| w[0].distance_meters <= w[1].distance_meters));
    }

    #[test]
    fn equidistant_venues_keep_input_order() {
        let spot = east_of_origin(400.0);
        let venues = vec![
            make_venue("first", "cafe", Some(spot)),
            make_venue("second", "cafe", Some(spot)),
            make_venue("third", "cafe", Some(spot)),
        ];
        let ranked = rank(ORIGIN, venues, &RankOptions::default());
        let ids: Vec<&str> = ranked.near.iter().map(|rv| rv.venue.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn category_filter_applies_before_partitioning() {
        let venues = vec![
            make_venue("cafe-near", "cafe", Some(east_of_origin(100.0))),
            make_venue("bar-near", "Bar", Some(east_of_origin(200.0))),
            make_venue("bar-far", "bar", Some(east_of_origin(2000.0))),
        ];
        let options = RankOptions {
            category: Some("bar".to_string()),
            ..RankOptions::default()
        };
        let ranked = rank(ORIGIN, venues, &options);
        assert_eq!(ranked.near.len(), 1);
        assert_eq!(ranked.near[0].venue.id, "bar-near");
        assert_eq!(ranked.far.len(), 1);
        assert_eq!(ranked.far[0].venue.id, "bar-far");
    }

    #[test]
    fn moscow_scenario_lands_in_near_bucket() {
        let venues = vec![make_venue(
            "east",
            "cafe",
            Some(Coordinate::new(55.7558, 37.6273)),
        )];
        let ranked = rank(ORIGIN, venues, &RankOptions::default());
        assert_eq!(ranked.near.len(), 1);
        let distance = ranked.near[0].distance_meters;
        assert!(
            (621..=631).contains(&distance),
            "expected ~626 m, got {distance}"
        );
    }

    #[test]
    fn lucky_pick_draws_from_near_bucket() {
        let venues = vec![
            make_venue("a", "cafe", Some(east_of_origin(100.0))),
            make_venue("b", "cafe", Some(east_of_origin(500.0))),
            make_venue("c", "cafe", Some(east_of_origin(5000.0))),
        ];
        let ranked = rank(ORIGIN, venues, &RankOptions::default());
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let pick = lucky_pick(&ranked, &mut rng).expect("near bucket is non-empty");
            assert_ne!(pick.venue.id, "c");
        }
    }

    #[test]
    fn lucky_pick_never_falls_back_to_far() {
        let venues = vec![make_venue("only-far", "cafe", Some(east_of_origin(3000.0)))];
        let ranked = rank(ORIGIN, venues, &RankOptions::default());
        assert!(!ranked.far.is_empty());
        let mut rng = StdRng::seed_from_u64(7);
        assert!(lucky_pick(&ranked, &mut rng).is_none());
    }
}
