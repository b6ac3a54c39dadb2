use reqwest::Client;
use routesmith::{Error, geocode::Resolver, shared::Coordinate};
use serde::Deserialize;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = concat!("routesmith-server/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Resolves addresses against a Nominatim-compatible search endpoint.
pub struct NominatimResolver {
    client: Client,
    url: String,
}

impl NominatimResolver {
    pub fn new(url: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, url })
    }
}

impl Resolver for NominatimResolver {
    async fn resolve(&self, address: &str) -> Result<Coordinate, Error> {
        let failure = |err: reqwest::Error| Error::ResolverFailure(err.to_string());
        let places: Vec<Place> = self
            .client
            .get(&self.url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(failure)?
            .error_for_status()
            .map_err(failure)?
            .json()
            .await
            .map_err(failure)?;
        let place = places
            .first()
            .ok_or_else(|| Error::ResolverFailure(format!("no match for {address:?}")))?;
        let latitude = place
            .lat
            .parse()
            .map_err(|_| Error::ResolverFailure(format!("bad latitude {:?}", place.lat)))?;
        let longitude = place
            .lon
            .parse()
            .map_err(|_| Error::ResolverFailure(format!("bad longitude {:?}", place.lon)))?;
        Coordinate::try_new(latitude, longitude)
    }
}
