use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Duration, Utc};
use sgp4::Elements;

/// Fallback satellite sub-point (lat, lon, elevation_m) used until a
/// propagation backend supplies a live one.
// TODO: propagate the fetched elements to the query time once a
// propagation backend is wired in, instead of using this fixed fix.
pub const DEFAULT_SUB_POINT: (f64, f64, f64) = (25.7743, -80.1937, 0.0);

/// One named entry from a TLE feed.
#[derive(Debug, Clone)]
pub struct TleSet {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl TleSet {
    pub fn elements(&self) -> Result<Elements> {
        Elements::from_tle(
            Some(self.name.clone()),
            self.line1.as_bytes(),
            self.line2.as_bytes(),
        )
        .map_err(|e| anyhow!("failed to parse TLE for {}: {:?}", self.name, e))
    }
}

/// Download a TLE feed and pull out the entry whose name contains `target`.
pub fn fetch_tle(agent: &ureq::Agent, url: &str, target: &str) -> Result<TleSet> {
    let text = agent
        .get(url)
        .call()
        .with_context(|| format!("TLE request to {url} failed"))?
        .into_string()
        .context("TLE feed was not valid text")?;

    extract_tle(&text, target)
}

/// Scan feed text for a name line followed by the two element lines.
pub fn extract_tle(text: &str, target: &str) -> Result<TleSet> {
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();

    for i in 0..lines.len().saturating_sub(2) {
        let name = lines[i].trim();
        if !name.is_empty()
            && name.contains(target)
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            return Ok(TleSet {
                name: name.to_string(),
                line1: lines[i + 1].to_string(),
                line2: lines[i + 2].to_string(),
            });
        }
    }

    Err(anyhow!("no TLE entry matching {target:?} found in feed"))
}

/// TLE epoch from line 1 columns 18-32 (two-digit year + fractional day of
/// year, year pivot at 57).
pub fn epoch_from_line1(line1: &str) -> Option<DateTime<Utc>> {
    if line1.len() < 32 {
        return None;
    }
    let epoch_val: f64 = line1[18..32].trim().parse().ok()?;

    let year_2digit = (epoch_val / 1000.0).floor() as i32;
    let day_of_year = epoch_val % 1000.0;
    let full_year = if year_2digit >= 57 {
        1900 + year_2digit
    } else {
        2000 + year_2digit
    };

    year_day_to_datetime(full_year, day_of_year)
}

fn year_day_to_datetime(year: i32, day_of_year: f64) -> Option<DateTime<Utc>> {
    let year_start = chrono::NaiveDate::from_ymd_opt(year, 1, 1)?
        .and_hms_opt(0, 0, 0)?
        .and_utc();

    let days_into_year = day_of_year - 1.0;
    Some(year_start + Duration::milliseconds((days_into_year * 86_400_000.0) as i64))
}

/// Orbital period in minutes from mean motion (revolutions per day).
pub fn period_minutes(mean_motion: f64) -> Option<f64> {
    if mean_motion > 0.0 {
        Some(1440.0 / mean_motion)
    } else {
        None
    }
}
