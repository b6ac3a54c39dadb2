use crate::resolver::{DEFAULT_GEOCODER_URL, NominatimResolver};
use routesmith::geocode;
use std::{env, time::Duration};
use tracing::info;

pub struct AppState {
    pub resolver: NominatimResolver,
    pub geocode_config: geocode::Config,
}

impl AppState {
    /// Reads `GEOCODER_URL`, `GEOCODE_MAX_IN_FLIGHT` and `GEOCODE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, reqwest::Error> {
        let url = env::var("GEOCODER_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string());
        let mut geocode_config = geocode::Config::new();
        if let Some(limit) = parse_env::<usize>("GEOCODE_MAX_IN_FLIGHT") {
            geocode_config = geocode_config.with_max_in_flight(limit);
        }
        if let Some(secs) = parse_env::<u64>("GEOCODE_TIMEOUT_SECS") {
            geocode_config = geocode_config.with_timeout(Duration::from_secs(secs));
        }
        info!("Geocoding through {url} with {geocode_config:?}");
        Ok(Self {
            resolver: NominatimResolver::new(url)?,
            geocode_config,
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok()?.parse().ok()
}
