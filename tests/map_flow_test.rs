use cultech_client::domain::model::{MarkerId, MarkerKind};
use cultech_client::{
    ApiClient, Catalog, GoogleMapsClient, HeadlessMap, MapController, MapSettings, MemoryStorage,
};
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

fn settings() -> MapSettings {
    MapSettings {
        page_delay: Duration::from_millis(20),
        ..MapSettings::default()
    }
}

async fn mock_backend(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/events/all");
            then.status(200).json_body(serde_json::json!([{
                "id": 11,
                "title": "Mugham Evening",
                "description": "An evening of classical Azerbaijani mugham performed by the State Ensemble, with guest soloists.",
                "date": "2024-11-02 19:00:00",
                "poster_image_link": "https://cdn.example/mugham.jpg",
                "venue_id": 3
            }]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/events/11");
            then.status(200).json_body(serde_json::json!({
                "event": {"id": 11, "title": "Mugham Evening", "venue_id": 3, "num_likes": 8},
                "location": {"lat": "40.3668", "lng": "49.8371"}
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/venues/3");
            then.status(200).json_body(serde_json::json!({
                "id": 3, "name": "Philharmonic Hall", "lat": "40.3668", "lng": "49.8371",
                "image_1_link": "https://cdn.example/hall.jpg"
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/venues/all");
            then.status(200).json_body(serde_json::json!([
                {"id": 3, "name": "Philharmonic Hall", "lat": "40.3668", "lng": "49.8371"},
                {"id": 4, "name": "Nowhere Gallery", "lat": "", "lng": ""}
            ]));
        })
        .await;
}

#[tokio::test]
async fn test_page_load_marks_places_events_and_venues() {
    let backend = MockServer::start_async().await;
    mock_backend(&backend).await;

    let maps = MockServer::start_async().await;
    let first_page = maps
        .mock_async(|when, then| {
            when.method(GET)
                .path("/maps/api/place/nearbysearch/json")
                .query_param("type", "museum");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "next_page_token": "next-1",
                "results": [{
                    "place_id": "p1", "name": "Museum of Modern Art", "vicinity": "Yusif Safarov",
                    "geometry": {"location": {"lat": 40.386, "lng": 49.874}}
                }]
            }));
        })
        .await;
    let second_page = maps
        .mock_async(|when, then| {
            when.method(GET)
                .path("/maps/api/place/nearbysearch/json")
                .query_param("pagetoken", "next-1");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "results": [{
                    "place_id": "p2", "name": "Literature Museum", "vicinity": "Istiglaliyyat",
                    "geometry": {"location": {"lat": 40.366, "lng": 49.833}}
                }]
            }));
        })
        .await;
    let directions = maps
        .mock_async(|when, then| {
            when.method(GET)
                .path("/maps/api/directions/json")
                .query_param("destination", "40.3668,49.8371");
            then.status(200).json_body(serde_json::json!({
                "status": "OK",
                "routes": [{
                    "summary": "Neftchilar Ave",
                    "legs": [{"distance": {"text": "4.1 km", "value": 4100}, "duration": {"text": "11 mins", "value": 660}}],
                    "overview_polyline": {"points": "abc"}
                }]
            }));
        })
        .await;

    let google = Arc::new(GoogleMapsClient::new(&maps.base_url(), "test-key").unwrap());
    let mut controller = MapController::new(HeadlessMap::new(), settings())
        .with_places(google.clone())
        .with_directions(google);

    let places = controller.init().await;
    first_page.assert_async().await;
    second_page.assert_async().await;
    assert_eq!(places, 2);
    assert_eq!(controller.reference_marker(), Some(MarkerId(0)));
    assert_eq!(controller.map().zoom, 12);

    let api = ApiClient::new(&backend.base_url(), Arc::new(MemoryStorage::new())).unwrap();
    let catalog = Catalog::new(api);
    let events = assert_ok!(catalog.load_events(&mut controller).await);
    let venues = assert_ok!(catalog.load_venues(&mut controller).await);

    assert_eq!(events.len(), 1);
    assert!(events[0].summary.ends_with("..."));
    assert_eq!(events[0].date_label, "2024-11-02");
    assert_eq!(venues.len(), 2);
    assert!(venues[1].marker.is_none());

    // 參考點 + 2 地點 + 1 活動 + 1 場館
    assert_eq!(controller.map().markers.len(), 5);
    assert_eq!(controller.registry().len(), 4);

    let event_marker = events[0].marker.unwrap();
    assert_eq!(
        controller.map().marker(event_marker).unwrap().kind,
        MarkerKind::Event
    );

    assert!(controller.on_marker_click(event_marker));
    let panel = controller.show_description(event_marker).unwrap();
    assert_eq!(panel.images[0], "https://cdn.example/hall.jpg");
    assert_eq!(panel.likes_and_comments, "8 likes and 0 comments");

    let route = assert_ok!(controller.show_route(event_marker).await);
    directions.assert_async().await;
    assert_eq!(route.distance_meters, 4100);
    assert!(controller.map().info_window.is_none());

    controller.focus(venues[0].marker.unwrap());
    assert_eq!(controller.map().zoom, 15);
}

#[tokio::test]
async fn test_backend_down_leaves_map_usable() {
    let backend = MockServer::start_async().await;
    backend
        .mock_async(|when, then| {
            when.method(GET).path("/venues/all");
            then.status(500);
        })
        .await;

    let mut controller = MapController::new(HeadlessMap::new(), settings());
    assert_eq!(controller.init().await, 0);

    let api = ApiClient::new(&backend.base_url(), Arc::new(MemoryStorage::new())).unwrap();
    let catalog = Catalog::new(api);
    assert_err!(catalog.load_venues(&mut controller).await);

    // 只剩下參考點
    assert_eq!(controller.map().markers.len(), 1);
    assert!(controller.registry().is_empty());
    assert_err!(controller.show_route(MarkerId(0)).await);
}
