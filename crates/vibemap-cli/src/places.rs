//! Venue search command handlers.

use anyhow::Context;
use tracing::info;

use vibemap_core::{
    lucky_pick, rank, AppConfig, Coordinate, RankOptions, RankedVenue, RankedVenues,
};
use vibemap_store::{FileVenueSource, VenueSource};

pub(crate) fn near(
    config: &AppConfig,
    lat: f64,
    lon: f64,
    category: Option<String>,
    radius: Option<u32>,
) -> anyhow::Result<()> {
    let origin = parse_origin(lat, lon)?;
    let options = RankOptions {
        near_radius_m: radius.unwrap_or(config.near_radius_m),
        category,
    };
    let ranked = rank_from_source(config, origin, &options)?;

    if ranked.is_empty() {
        println!("No venues found within {} m.", config.search_radius_m);
        return Ok(());
    }

    info!(near = ranked.near.len(), far = ranked.far.len(), "ranked venues");
    print_bucket("Nearby", &ranked.near);
    print_bucket("Further out", &ranked.far);
    Ok(())
}

pub(crate) fn lucky(
    config: &AppConfig,
    lat: f64,
    lon: f64,
    category: Option<String>,
) -> anyhow::Result<()> {
    let origin = parse_origin(lat, lon)?;
    let options = RankOptions {
        near_radius_m: config.near_radius_m,
        category,
    };
    let ranked = rank_from_source(config, origin, &options)?;

    match lucky_pick(&ranked, &mut rand::rng()) {
        Some(pick) => {
            println!(
                "Today's pick: {} ({} m away)",
                pick.venue.name, pick.distance_meters
            );
            if let Some(address) = &pick.venue.address {
                println!("  {address}");
            }
        }
        None => println!("No suitable place nearby 😞"),
    }
    Ok(())
}

fn rank_from_source(
    config: &AppConfig,
    origin: Coordinate,
    options: &RankOptions,
) -> anyhow::Result<RankedVenues> {
    let source = FileVenueSource::new(&config.venues_path);
    let venues = source
        .search(origin, config.search_radius_m, options.category.as_deref())
        .with_context(|| format!("searching venues from {}", config.venues_path.display()))?;
    Ok(rank(origin, venues, options))
}

fn parse_origin(lat: f64, lon: f64) -> anyhow::Result<Coordinate> {
    let origin = Coordinate::new(lat, lon);
    anyhow::ensure!(
        origin.is_valid(),
        "origin coordinate out of range: {lat}, {lon}"
    );
    Ok(origin)
}

fn print_bucket(heading: &str, bucket: &[RankedVenue]) {
    if bucket.is_empty() {
        return;
    }
    println!("{heading}:");
    for ranked in bucket {
        let address = ranked.venue.address.as_deref().unwrap_or("-");
        println!(
            "  {:>6} m  {}  [{}]  {}",
            ranked.distance_meters, ranked.venue.name, ranked.venue.category, address
        );
    }
}
