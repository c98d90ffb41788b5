use crate::domain::model::{
    InfoWindowContent, LatLng, MarkerId, MarkerSpec, Route, StreetViewRequest,
};
use crate::domain::ports::{MapSurface, Navigator, StatusLevel, StatusSink};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct OpenInfoWindow {
    pub anchor: MarkerId,
    pub content: InfoWindowContent,
}

/// A map without a screen: keeps what would be drawn and logs it.
#[derive(Debug, Default)]
pub struct HeadlessMap {
    pub center: Option<LatLng>,
    pub zoom: u8,
    pub markers: Vec<MarkerSpec>,
    pub info_window: Option<OpenInfoWindow>,
    pub panorama: Option<StreetViewRequest>,
    pub routes: Vec<Route>,
}

impl HeadlessMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self, id: MarkerId) -> Option<&MarkerSpec> {
        self.markers.get(id.0)
    }
}

impl MapSurface for HeadlessMap {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        tracing::debug!("🗺️ View centered on {} at zoom {}", center, zoom);
        self.center = Some(center);
        self.zoom = zoom;
    }

    fn add_marker(&mut self, spec: MarkerSpec) -> MarkerId {
        let id = MarkerId(self.markers.len());
        tracing::debug!("📍 Marker {} '{}' at {}", id, spec.title, spec.position);
        self.markers.push(spec);
        id
    }

    fn open_info_window(&mut self, anchor: MarkerId, content: InfoWindowContent) {
        tracing::debug!("💬 Info window on {}: {}", anchor, content.title);
        self.info_window = Some(OpenInfoWindow { anchor, content });
    }

    fn close_info_window(&mut self) {
        if self.info_window.take().is_some() {
            tracing::debug!("💬 Info window closed");
        }
        self.panorama = None;
    }

    fn show_panorama(&mut self, request: StreetViewRequest) {
        tracing::debug!(
            "📷 Street view at {} (heading {}, pitch {})",
            request.location,
            request.heading,
            request.pitch
        );
        self.panorama = Some(request);
    }

    fn render_route(&mut self, route: &Route) {
        tracing::info!(
            "🚗 Route {} -> {}: {} ({}, {})",
            route.origin,
            route.destination,
            route.summary,
            route.distance_text,
            route.duration_text
        );
        // 與 DirectionsRenderer 相同：新路線取代舊路線
        self.routes.clear();
        self.routes.push(route.clone());
    }
}

/// Logs status messages and keeps the last one.
#[derive(Debug, Default)]
pub struct ConsoleStatus {
    last: Mutex<Option<(StatusLevel, String)>>,
}

impl ConsoleStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<(StatusLevel, String)> {
        self.last.lock().ok().and_then(|last| last.clone())
    }
}

impl StatusSink for ConsoleStatus {
    fn show(&self, level: StatusLevel, message: &str) {
        match level {
            StatusLevel::Success => {
                tracing::info!("✅ {}", message);
            }
            StatusLevel::Error => {
                tracing::error!("❌ {}", message);
            }
        }
        if let Ok(mut last) = self.last.lock() {
            *last = Some((level, message.to_string()));
        }
    }
}

/// There is no page to leave in a terminal; the redirect target is reported instead.
#[derive(Debug, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn redirect(&self, url: &str) {
        tracing::info!("➡️ Redirecting to {}", url);
    }
}
