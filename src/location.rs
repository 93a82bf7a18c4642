use anyhow::{bail, Context, Result};
use serde::Deserialize;

// USGS EPQS reports huge negative sentinels where it has no data (open
// water, outside coverage). Anything outside real terrain range is rejected.
const MIN_ELEVATION_M: f64 = -500.0;
const MAX_ELEVATION_M: f64 = 9000.0;

#[derive(Debug, Deserialize)]
struct IpLocationResponse {
    status: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct ElevationResponse {
    value: ElevationValue,
}

// The point-query service has returned the elevation both as a bare number
// and as a quoted string across versions.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ElevationValue {
    Number(f64),
    Text(String),
}

/// Look up the machine's approximate latitude/longitude from its public IP.
pub fn fetch_ip_location(agent: &ureq::Agent, url: &str) -> Result<(f64, f64)> {
    let response: IpLocationResponse = agent
        .get(url)
        .call()
        .with_context(|| format!("IP geolocation request to {url} failed"))?
        .into_json()
        .context("IP geolocation service returned malformed JSON")?;

    if response.status != "success" {
        bail!(
            "IP geolocation service returned status {:?}",
            response.status
        );
    }

    Ok((response.lat, response.lon))
}

/// Query ground elevation in meters at a latitude/longitude. The URL
/// template carries `{x}` (longitude) and `{y}` (latitude) placeholders.
pub fn fetch_elevation(
    agent: &ureq::Agent,
    url_template: &str,
    latitude: f64,
    longitude: f64,
) -> Result<f64> {
    let url = url_template
        .replace("{x}", &longitude.to_string())
        .replace("{y}", &latitude.to_string());

    let response: ElevationResponse = agent
        .get(&url)
        .call()
        .with_context(|| format!("elevation request to {url} failed"))?
        .into_json()
        .context("elevation service returned malformed JSON")?;

    let elevation = match response.value {
        ElevationValue::Number(v) => v,
        ElevationValue::Text(s) => s
            .trim()
            .parse()
            .with_context(|| format!("elevation service returned non-numeric value {s:?}"))?,
    };

    if !(MIN_ELEVATION_M..=MAX_ELEVATION_M).contains(&elevation) {
        bail!("elevation service has no data for ({latitude}, {longitude}), got {elevation}");
    }

    Ok(elevation)
}
