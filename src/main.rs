mod config;
mod frame;
mod geodetic;
mod location;
mod pointing;
mod tle;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use chrono::Utc;
use clap::Parser;

use config::Config;
use geodetic::GeodeticPosition;

#[derive(Parser)]
#[command(
    name = "isspoint",
    version,
    about = "Compute the pointing direction from a ground observer to the ISS"
)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Observer latitude in degrees (skips IP geolocation)
    #[arg(long)]
    latitude: Option<f64>,

    /// Observer longitude in degrees (skips IP geolocation)
    #[arg(long)]
    longitude: Option<f64>,

    /// Observer elevation in meters (skips the elevation lookup)
    #[arg(long)]
    elevation: Option<f64>,

    /// Skip all network lookups; observer coordinates must come from
    /// flags or the config file
    #[arg(long)]
    offline: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load_or_default(&args.config)?;

    let agent = ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(config.sources.timeout_seconds))
        .build();

    let observer = resolve_observer(&args, &config, &agent)?;
    println!("Observer: {}", config.observer.name);
    println!(
        "  Lat: {:.4}°, Lon: {:.4}°, Elevation: {:.1} m",
        observer.latitude(),
        observer.longitude(),
        observer.elevation()
    );

    let observer_ecef = observer.to_ecef();
    println!(
        "  ECEF: x = {:.1} m, y = {:.1} m, z = {:.1} m",
        observer_ecef.x, observer_ecef.y, observer_ecef.z
    );

    let ned_matrix = frame::ned_rotation_matrix(observer.latitude(), observer.longitude());
    println!("NED rotation matrix: {:.6}", ned_matrix);

    if args.offline {
        println!("Offline mode: skipping TLE download");
    } else {
        match tle::fetch_tle(&agent, &config.sources.tle_url, &config.satellite.name) {
            Ok(set) => report_tle(&set),
            Err(e) => eprintln!("Warning: TLE download failed: {e:#}"),
        }
    }

    let satellite = satellite_sub_point(&config)?;
    println!("Satellite sub-point:");
    println!(
        "  Lat: {:.4}°, Lon: {:.4}°, Elevation: {:.1} m",
        satellite.latitude(),
        satellite.longitude(),
        satellite.elevation()
    );

    let satellite_ecef = satellite.to_ecef();
    println!(
        "  ECEF: x = {:.1} m, y = {:.1} m, z = {:.1} m",
        satellite_ecef.x, satellite_ecef.y, satellite_ecef.z
    );

    let relative = pointing::translate(&satellite_ecef, &observer_ecef);
    println!(
        "Relative ECEF vector: x = {:.1} m, y = {:.1} m, z = {:.1} m",
        relative.x, relative.y, relative.z
    );

    let ned_relative =
        pointing::rotate_to_ned(&relative, observer.latitude(), observer.longitude());
    let direction = pointing::normalize(&ned_relative)?;
    println!(
        "Direction unit vector (NED): north = {:.6}, east = {:.6}, down = {:.6}",
        direction.x, direction.y, direction.z
    );

    let look = pointing::look_angles(&ned_relative)?;
    println!(
        "Look angles: azimuth {:.1}°, elevation {:.1}°, range {:.1} km",
        look.azimuth, look.elevation, look.range_km
    );

    println!("Computed at {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));

    Ok(())
}

/// Observer fix resolution order: CLI flags, then config, then the IP
/// geolocation and elevation services.
fn resolve_observer(args: &Args, config: &Config, agent: &ureq::Agent) -> Result<GeodeticPosition> {
    let latitude = args.latitude.or(config.observer.latitude);
    let longitude = args.longitude.or(config.observer.longitude);

    let (latitude, longitude) = match (latitude, longitude) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ if args.offline => {
            bail!("offline mode requires observer coordinates via --latitude/--longitude or the config file")
        }
        _ => {
            println!("Looking up observer position from IP address...");
            location::fetch_ip_location(agent, &config.sources.geolocation_url)?
        }
    };

    let elevation = match args.elevation.or(config.observer.elevation) {
        Some(elev) => elev,
        None if args.offline => 0.0,
        None => match location::fetch_elevation(
            agent,
            &config.sources.elevation_url,
            latitude,
            longitude,
        ) {
            Ok(elev) => elev,
            Err(e) => {
                eprintln!("Warning: elevation lookup failed ({e:#}); assuming sea level");
                0.0
            }
        },
    };

    Ok(GeodeticPosition::new(latitude, longitude, elevation)?)
}

/// The satellite sub-point comes from the config override when present,
/// otherwise the fixed placeholder (propagation is not done here).
fn satellite_sub_point(config: &Config) -> Result<GeodeticPosition> {
    let sat = &config.satellite;
    let (latitude, longitude, elevation) = match (sat.latitude, sat.longitude) {
        (Some(lat), Some(lon)) => (lat, lon, sat.elevation.unwrap_or(0.0)),
        _ => tle::DEFAULT_SUB_POINT,
    };
    Ok(GeodeticPosition::new(latitude, longitude, elevation)?)
}

fn report_tle(set: &tle::TleSet) {
    println!("TLE data:");
    println!("  {}", set.name);
    println!("  {}", set.line1);
    println!("  {}", set.line2);

    match set.elements() {
        Ok(elements) => {
            println!("  NORAD ID: {}", elements.norad_id);
            println!("  Inclination: {:.4}°", elements.inclination);
            println!("  Eccentricity: {:.7}", elements.eccentricity);
            println!("  Mean motion: {:.8} rev/day", elements.mean_motion);
            if let Some(period) = tle::period_minutes(elements.mean_motion) {
                println!("  Orbital period: {:.1} min", period);
            }
        }
        Err(e) => eprintln!("Warning: {e:#}"),
    }

    if let Some(epoch) = tle::epoch_from_line1(&set.line1) {
        println!("  Epoch: {}", epoch.format("%Y-%m-%d %H:%M:%S UTC"));
        let age_days = (Utc::now() - epoch).num_days();
        if age_days > 30 {
            eprintln!(
                "Warning: TLE data is {} days old. Download fresh data from https://celestrak.org",
                age_days
            );
        }
    }
}
