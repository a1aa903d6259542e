use std::time::Duration;

use geotrace_geo::LatLng;
use serde::Deserialize;

use crate::ElevationError;

pub const DEFAULT_API_URL: &str = "https://api.open-elevation.com/api/v1/lookup";

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    elevation: f64,
}

/// `GET {api_url}?locations={lat},{lng}` with both coordinates at 6 decimals
pub fn lookup_url(api_url: &str, point: LatLng) -> String {
    format!("{api_url}?locations={point}")
}

/// Elevation in meters of the first result
pub fn parse_response(body: &str) -> Result<f64, ElevationError> {
    let response: LookupResponse = serde_json::from_str(body)?;
    response
        .results
        .first()
        .map(|r| r.elevation)
        .ok_or(ElevationError::EmptyResponse)
}

/// Looks up elevations from an Open-Elevation compatible service
///
/// Requests are never retried. Without a timeout a request that hangs simply never resolves.
#[derive(Debug, Clone)]
pub struct OpenElevation {
    api_url: String,
    #[cfg(not(target_arch = "wasm32"))]
    client: reqwest::blocking::Client,
    #[cfg(target_arch = "wasm32")]
    client: reqwest::Client,
}

impl OpenElevation {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(api_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ElevationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            api_url: api_url.into(),
            client,
        })
    }

    /// The browser decides when a request times out
    #[cfg(target_arch = "wasm32")]
    pub fn new(api_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ElevationError> {
        if timeout.is_some() {
            log::warn!("Request timeout is not supported on web, ignoring it");
        }
        Ok(Self {
            api_url: api_url.into(),
            client: reqwest::Client::new(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn fetch(&self, point: LatLng) -> Result<f64, ElevationError> {
        let body = self
            .client
            .get(lookup_url(&self.api_url, point))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_response(&body)
    }
}

/// Source of elevation data for a single point
#[cfg(not(target_arch = "wasm32"))]
pub trait ElevationProvider: Send + Sync + 'static {
    /// Elevation in meters at `point`, blocks until the lookup completes
    fn elevation(&self, point: LatLng) -> Result<f64, ElevationError>;
}

#[cfg(not(target_arch = "wasm32"))]
impl ElevationProvider for OpenElevation {
    fn elevation(&self, point: LatLng) -> Result<f64, ElevationError> {
        let url = lookup_url(&self.api_url, point);
        log::trace!("GET {url}");
        let body = self.client.get(url).send()?.error_for_status()?.text()?;
        parse_response(&body)
    }
}
