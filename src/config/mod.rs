#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::LatLng;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resolved runtime settings: defaults, then the TOML file, then command line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub maps_base_url: String,
    pub maps_api_key: Option<String>,
    pub reference_location: LatLng,
    pub initial_zoom: u8,
    pub focus_zoom: u8,
    pub places_radius: u32,
    pub places_type: String,
    pub page_delay_ms: u64,
    pub redirect_url: String,
    pub redirect_delay_ms: u64,
    pub storage_path: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            maps_base_url: "https://maps.googleapis.com".to_string(),
            maps_api_key: None,
            reference_location: LatLng::new(40.38127583822331, 49.86776630483177),
            initial_zoom: 12,
            focus_zoom: 15,
            places_radius: 500,
            places_type: "museum".to_string(),
            page_delay_ms: 2000,
            redirect_url: "http://127.0.0.1:3000/CLIENT".to_string(),
            redirect_delay_ms: 3000,
            storage_path: ".cultech/storage.json".to_string(),
        }
    }
}

impl ConfigProvider for ClientSettings {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn maps_base_url(&self) -> &str {
        &self.maps_base_url
    }

    fn maps_api_key(&self) -> Option<&str> {
        self.maps_api_key.as_deref().filter(|k| !k.is_empty())
    }

    fn reference_location(&self) -> LatLng {
        self.reference_location
    }

    fn initial_zoom(&self) -> u8 {
        self.initial_zoom
    }

    fn focus_zoom(&self) -> u8 {
        self.focus_zoom
    }

    fn places_radius(&self) -> u32 {
        self.places_radius
    }

    fn places_type(&self) -> &str {
        &self.places_type
    }

    fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    fn redirect_url(&self) -> &str {
        &self.redirect_url
    }

    fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }
}

impl Validate for ClientSettings {
    fn validate(&self) -> Result<()> {
        validate_url("api.base_url", &self.api_base_url)?;
        validate_url("maps.base_url", &self.maps_base_url)?;
        validate_url("auth.redirect_url", &self.redirect_url)?;
        validate_range(
            "maps.reference_lat",
            self.reference_location.lat,
            -90.0,
            90.0,
        )?;
        validate_range(
            "maps.reference_lng",
            self.reference_location.lng,
            -180.0,
            180.0,
        )?;
        validate_range("maps.initial_zoom", self.initial_zoom, 0, 22)?;
        validate_range("maps.focus_zoom", self.focus_zoom, 0, 22)?;
        validate_positive_number("places.radius", u64::from(self.places_radius), 1)?;
        validate_non_empty_string("places.type", &self.places_type)?;
        validate_path("auth.storage_path", &self.storage_path)?;
        Ok(())
    }
}
