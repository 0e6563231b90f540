//! Best-effort user location
//!
//! Resolved once at startup to bias place lookups. Every failure path logs
//! a warning and yields `None`; nothing here is fatal.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::{GeoConfig, GeoProvider};
use crate::domain::Coordinates;

/// Shape shared by the common IP geolocation services
#[derive(Debug, Deserialize)]
struct IpLocation {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lon: f64,
}

/// Resolve the user's coordinates according to `config`
pub async fn locate(config: &GeoConfig) -> Option<Coordinates> {
    debug!(provider = ?config.provider, "locate: called");
    match config.provider {
        GeoProvider::None => None,
        GeoProvider::Fixed => {
            let coords = config.fixed_coordinates();
            if coords.is_none() {
                warn!("geo.provider is fixed but geo.lat/geo.lon are not both set");
            }
            coords.filter(|c| valid(*c))
        }
        GeoProvider::Ip => match lookup_ip(&config.endpoint, Duration::from_millis(config.timeout_ms)).await {
            Ok(coords) if valid(coords) => {
                info!(%coords, "Resolved location from IP");
                Some(coords)
            }
            Ok(coords) => {
                warn!(%coords, "IP geolocation returned out-of-range coordinates");
                None
            }
            Err(e) => {
                warn!(error = %e, "IP geolocation failed");
                None
            }
        },
    }
}

async fn lookup_ip(endpoint: &str, timeout: Duration) -> Result<Coordinates, reqwest::Error> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let location: IpLocation = client.get(endpoint).send().await?.error_for_status()?.json().await?;
    Ok(Coordinates::new(location.lat, location.lon))
}

fn valid(coords: Coordinates) -> bool {
    coords.lat.is_finite()
        && coords.lon.is_finite()
        && (-90.0..=90.0).contains(&coords.lat)
        && (-180.0..=180.0).contains(&coords.lon)
}
