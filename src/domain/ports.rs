use crate::domain::model::{
    InfoWindowContent, LatLng, MarkerId, MarkerSpec, NearbySearch, PlacesPage, Route,
    StreetViewRequest,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn maps_base_url(&self) -> &str;
    fn maps_api_key(&self) -> Option<&str>;
    fn reference_location(&self) -> LatLng;
    fn initial_zoom(&self) -> u8;
    fn focus_zoom(&self) -> u8;
    fn places_radius(&self) -> u32;
    fn places_type(&self) -> &str;
    fn page_delay(&self) -> Duration;
    fn redirect_url(&self) -> &str;
    fn redirect_delay(&self) -> Duration;
    fn storage_path(&self) -> &str;
}

/// Browser-local persistent storage: string keys, string values.
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Rendering side of the mapping SDK.
pub trait MapSurface: Send {
    fn set_view(&mut self, center: LatLng, zoom: u8);
    fn add_marker(&mut self, spec: MarkerSpec) -> MarkerId;
    fn open_info_window(&mut self, anchor: MarkerId, content: InfoWindowContent);
    fn close_info_window(&mut self);
    fn show_panorama(&mut self, request: StreetViewRequest);
    fn render_route(&mut self, route: &Route);
}

#[async_trait]
pub trait PlacesService: Send + Sync {
    async fn nearby_search(&self, request: &NearbySearch) -> Result<PlacesPage>;
    async fn next_page(&self, page_token: &str) -> Result<PlacesPage>;
}

#[async_trait]
pub trait DirectionsService: Send + Sync {
    async fn driving_route(&self, origin: LatLng, destination: LatLng) -> Result<Route>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Error,
}

/// The visible status element of the auth forms.
pub trait StatusSink: Send + Sync {
    fn show(&self, level: StatusLevel, message: &str);
}

pub trait Navigator: Send + Sync {
    fn redirect(&self, url: &str);
}
