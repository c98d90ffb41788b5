use crate::core::markers::MarkerRegistry;
use crate::domain::model::{
    DetailPanel, InfoWindowAction, InfoWindowContent, LatLng, MarkedVenue, MarkerCandidate,
    MarkerId, MarkerKind, MarkerSpec, Place, StreetViewRequest,
};
use crate::domain::ports::{ConfigProvider, DirectionsService, MapSurface, PlacesService};
use std::sync::Arc;
use std::time::Duration;

const REFERENCE_TITLE: &str = "You are here";
const PANORAMA_HEADING: f64 = 165.0;
const PANORAMA_PITCH: f64 = 0.0;
const PANORAMA_RADIUS_METERS: u32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub reference: LatLng,
    pub initial_zoom: u8,
    pub focus_zoom: u8,
    pub places_radius: u32,
    pub places_type: String,
    pub page_delay: Duration,
}

impl MapSettings {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            reference: config.reference_location(),
            initial_zoom: config.initial_zoom(),
            focus_zoom: config.focus_zoom(),
            places_radius: config.places_radius(),
            places_type: config.places_type().to_string(),
            page_delay: config.page_delay(),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            reference: LatLng::new(40.38127583822331, 49.86776630483177),
            initial_zoom: 12,
            focus_zoom: 15,
            places_radius: 500,
            places_type: "museum".to_string(),
            page_delay: Duration::from_millis(2000),
        }
    }
}

/// Owns the map, the fixed reference location and the shared info window.
pub struct MapController<M: MapSurface> {
    pub(crate) map: M,
    pub(crate) settings: MapSettings,
    pub(crate) registry: MarkerRegistry,
    pub(crate) places: Option<Arc<dyn PlacesService>>,
    pub(crate) directions: Option<Arc<dyn DirectionsService>>,
    reference_marker: Option<MarkerId>,
}

impl<M: MapSurface> MapController<M> {
    pub fn new(map: M, settings: MapSettings) -> Self {
        Self {
            map,
            settings,
            registry: MarkerRegistry::new(),
            places: None,
            directions: None,
            reference_marker: None,
        }
    }

    pub fn with_places(mut self, places: Arc<dyn PlacesService>) -> Self {
        self.places = Some(places);
        self
    }

    pub fn with_directions(mut self, directions: Arc<dyn DirectionsService>) -> Self {
        self.directions = Some(directions);
        self
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    pub fn reference_marker(&self) -> Option<MarkerId> {
        self.reference_marker
    }

    /// Centers the map on the reference location, marks it and loads nearby places.
    /// Returns the number of place markers created.
    pub async fn init(&mut self) -> usize {
        let reference = self.settings.reference;
        self.map.set_view(reference, self.settings.initial_zoom);
        let marker = self.map.add_marker(MarkerSpec::new(
            reference,
            REFERENCE_TITLE,
            MarkerKind::Reference,
        ));
        self.reference_marker = Some(marker);
        tracing::info!("🗺️ Map initialized at {}", reference);

        self.fetch_nearby_places().await
    }

    fn create_marker(
        &mut self,
        id: String,
        name: &str,
        vicinity: &str,
        location: LatLng,
        kind: MarkerKind,
    ) -> MarkerId {
        let marker = self.map.add_marker(MarkerSpec::new(location, name, kind));
        self.registry.register(MarkedVenue {
            marker,
            id,
            name: name.to_string(),
            vicinity: vicinity.to_string(),
            location,
            is_event_venue: kind == MarkerKind::Event,
            images: [None, None, None],
            num_likes: 0,
            num_comments: 0,
        });
        marker
    }

    pub fn create_place_marker(&mut self, place: &Place) -> MarkerId {
        self.create_marker(
            format!("place:{}", place.place_id),
            &place.name,
            &place.vicinity,
            place.location,
            MarkerKind::Venue,
        )
    }

    /// Creates a marker for a backend venue or event. Candidates whose
    /// coordinates do not parse are dropped without an error.
    pub fn place_candidate(&mut self, candidate: &MarkerCandidate) -> Option<MarkerId> {
        let location = candidate.location()?;
        let marker = self.create_marker(
            candidate.source_id.clone(),
            &candidate.name,
            &candidate.vicinity,
            location,
            candidate.kind,
        );
        // create_marker 剛登記過，補上圖片與統計
        if let Some(entry) = self.registry.get_mut(marker) {
            entry.images = candidate.images.clone();
            entry.num_likes = candidate.num_likes;
            entry.num_comments = candidate.num_comments;
        }
        Some(marker)
    }

    /// Zooms to the marker and opens the info window with its actions and street view.
    /// Returns false for markers that are not in the registry.
    pub fn on_marker_click(&mut self, marker: MarkerId) -> bool {
        let Some(entry) = self.registry.get(marker).cloned() else {
            tracing::warn!("Click on unknown marker {}", marker);
            return false;
        };

        self.map.set_view(entry.location, self.settings.focus_zoom);

        let panorama = StreetViewRequest {
            location: entry.location,
            heading: PANORAMA_HEADING,
            pitch: PANORAMA_PITCH,
            radius_meters: PANORAMA_RADIUS_METERS,
        };
        self.map.open_info_window(
            marker,
            InfoWindowContent {
                title: entry.name,
                vicinity: entry.vicinity,
                panorama,
                actions: vec![InfoWindowAction::ShowDescription, InfoWindowAction::ShowRoute],
            },
        );
        self.map.show_panorama(panorama);
        true
    }

    /// Any click on the map itself dismisses the info window.
    pub fn on_map_click(&mut self) {
        self.map.close_info_window();
    }

    /// List-card click: bring the marker into view.
    pub fn focus(&mut self, marker: MarkerId) {
        if let Some(entry) = self.registry.get(marker) {
            self.map.set_view(entry.location, self.settings.focus_zoom);
        }
    }

    pub fn show_description(&self, marker: MarkerId) -> Option<DetailPanel> {
        match self.registry.get(marker) {
            Some(entry) => Some(DetailPanel::for_venue(entry)),
            None => {
                tracing::error!("Venue not found in marked venues: {}", marker);
                None
            }
        }
    }
}
