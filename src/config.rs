use std::time::Duration;

use geotrace_elevation::{DEFAULT_API_URL, ElevationError, OpenElevation};
use geotrace_geo::UnitLocale;
use serde::{Deserialize, Serialize};

/// Overrides the persisted elevation API URL at start-up
pub const ELEVATION_API_ENV: &str = "GEOTRACE_ELEVATION_API";

/// User settings, persisted with the app state
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub elevation_api_url: String,
    pub locale: UnitLocale,
    /// No timeout if `None`, a hung lookup then never resolves
    pub request_timeout_secs: Option<u64>,
    pub show_side_menu: bool,
    pub show_distance_panel: bool,
    pub show_elevation_panel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            elevation_api_url: DEFAULT_API_URL.to_owned(),
            locale: UnitLocale::default(),
            request_timeout_secs: None,
            show_side_menu: true,
            show_distance_panel: true,
            show_elevation_panel: true,
        }
    }
}

/// The settings that determine how elevation lookups are made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiTarget {
    pub url: String,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    pub fn apply_env_overrides(&mut self) {
        self.override_api_url(std::env::var(ELEVATION_API_ENV).ok());
    }

    fn override_api_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            log::info!("Using elevation API from {ELEVATION_API_ENV}: {url}");
            self.elevation_api_url = url;
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn api_target(&self) -> ApiTarget {
        ApiTarget {
            url: self.elevation_api_url.clone(),
            timeout_secs: self.request_timeout_secs,
        }
    }

    pub fn elevation_api(&self) -> Result<OpenElevation, ElevationError> {
        OpenElevation::new(self.elevation_api_url.clone(), self.request_timeout())
    }
}
