use crate::adapters::http::ApiClient;
use crate::core::map_controller::MapController;
use crate::domain::model::{
    Event, EventCard, MarkerCandidate, MarkerId, MarkerKind, Venue, VenueCard,
};
use crate::domain::ports::MapSurface;
use crate::utils::error::Result;
use crate::utils::text::{event_date_label, event_summary, venue_label};

const UNKNOWN_LOCATION: &str = "Unknown location";

/// Loads venues and events from the backend, builds their list cards and
/// puts their markers on the map.
pub struct Catalog {
    api: ApiClient,
}

impl Catalog {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub async fn load_venues<M: MapSurface>(
        &self,
        controller: &mut MapController<M>,
    ) -> Result<Vec<VenueCard>> {
        let venues = self.api.get_venues().await?;
        tracing::info!("🏛️ Loaded {} venues", venues.len());

        let cards = venues
            .iter()
            .map(|venue| VenueCard {
                venue_id: venue.id,
                label: venue_label(&venue.name),
                image: venue.image_1_link.clone(),
                marker: controller.place_candidate(&venue_candidate(venue)),
            })
            .collect();

        Ok(cards)
    }

    /// One backend round-trip per event, in order: the event detail, then its venue.
    /// A failed lookup only costs that event its marker.
    pub async fn load_events<M: MapSurface>(
        &self,
        controller: &mut MapController<M>,
    ) -> Result<Vec<EventCard>> {
        let events = self.api.get_events().await?;
        tracing::info!("🎫 Loaded {} events", events.len());

        let mut cards = Vec::with_capacity(events.len());
        for event in &events {
            let marker = match self.mark_event(event, controller).await {
                Ok(marker) => marker,
                Err(e) => {
                    tracing::warn!("Cannot place event {} on the map: {}", event.id, e);
                    None
                }
            };

            cards.push(EventCard {
                event_id: event.id,
                title: event.title.clone(),
                summary: event_summary(&event.description),
                date_label: event_date_label(&event.date),
                poster: event.poster_image_link.clone(),
                marker,
            });
        }

        Ok(cards)
    }

    async fn mark_event<M: MapSurface>(
        &self,
        event: &Event,
        controller: &mut MapController<M>,
    ) -> Result<Option<MarkerId>> {
        let detail = self.api.get_event(event.id).await?;
        let venue = self.api.get_venue(detail.event.venue_id).await?;
        Ok(controller.place_candidate(&event_candidate(&detail.event, &venue)))
    }
}

fn vicinity_of(venue: &Venue) -> String {
    if venue.name.trim().is_empty() {
        UNKNOWN_LOCATION.to_string()
    } else {
        venue.name.clone()
    }
}

pub fn venue_candidate(venue: &Venue) -> MarkerCandidate {
    MarkerCandidate {
        source_id: format!("venue:{}", venue.id),
        name: venue.name.clone(),
        vicinity: vicinity_of(venue),
        lat: venue.lat.clone(),
        lng: venue.lng.clone(),
        kind: MarkerKind::Venue,
        images: venue.images(),
        num_likes: venue.num_likes,
        num_comments: 0,
    }
}

pub fn event_candidate(event: &Event, venue: &Venue) -> MarkerCandidate {
    MarkerCandidate {
        source_id: format!("event:{}", event.id),
        name: event.title.clone(),
        vicinity: vicinity_of(venue),
        lat: venue.lat.clone(),
        lng: venue.lng.clone(),
        kind: MarkerKind::Event,
        images: venue.images(),
        num_likes: event.num_likes,
        num_comments: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::console::HeadlessMap;
    use crate::adapters::storage::MemoryStorage;
    use crate::core::map_controller::MapSettings;
    use httpmock::prelude::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_venue_cards_and_markers() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/venues/all");
                then.status(200).json_body(serde_json::json!([
                    {"id": 1, "name": "Azerbaijan Carpet Museum", "lat": "40.3601", "lng": "49.8355"},
                    {"id": 2, "name": "Opera", "lat": "unknown", "lng": "49.84"}
                ]));
            })
            .await;

        let api = ApiClient::new(&server.base_url(), Arc::new(MemoryStorage::new())).unwrap();
        let catalog = Catalog::new(api);
        let mut controller = MapController::new(HeadlessMap::new(), MapSettings::default());

        let cards = catalog.load_venues(&mut controller).await.unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].label, "Azerbaijan Carpe...");
        assert!(cards[0].marker.is_some());
        assert_eq!(cards[1].label, "Opera");
        assert!(cards[1].marker.is_none());
        assert_eq!(controller.registry().len(), 1);
        assert_eq!(controller.map().markers.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_event_lookup_skips_only_that_marker() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/events/all");
                then.status(200).json_body(serde_json::json!([
                    {"id": 1, "title": "Jazz Night", "description": "Live jazz", "date": "2024-10-12T18:00:00", "venue_id": 5},
                    {"id": 2, "title": "Lost Show", "description": "No venue", "date": "2024-10-13T18:00:00", "venue_id": 6}
                ]));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/events/1");
                then.status(200).json_body(serde_json::json!({
                    "event": {"id": 1, "title": "Jazz Night", "venue_id": 5},
                    "location": {"lat": "40.37", "lng": "49.83"}
                }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/events/2");
                then.status(404).body("Invalid event id");
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/venues/5");
                then.status(200).json_body(serde_json::json!(
                    {"id": 5, "name": "Philharmonic", "lat": "40.3668", "lng": "49.8371"}
                ));
            })
            .await;

        let api = ApiClient::new(&server.base_url(), Arc::new(MemoryStorage::new())).unwrap();
        let catalog = Catalog::new(api);
        let mut controller = MapController::new(HeadlessMap::new(), MapSettings::default());

        let cards = catalog.load_events(&mut controller).await.unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].date_label, "2024-10-12");
        let marker = cards[0].marker.unwrap();
        let entry = controller.registry().get(marker).unwrap();
        assert!(entry.is_event_venue);
        assert_eq!(entry.vicinity, "Philharmonic");
        assert!(cards[1].marker.is_none());
    }
}
