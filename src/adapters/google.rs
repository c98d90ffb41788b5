use crate::domain::model::{LatLng, NearbySearch, Place, PlacesPage, Route};
use crate::domain::ports::{DirectionsService, PlacesService};
use crate::utils::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

const NEARBY_SEARCH_PATH: &str = "maps/api/place/nearbysearch/json";
const DIRECTIONS_PATH: &str = "maps/api/directions/json";

/// Places and Directions over the Google Maps web services.
#[derive(Clone)]
pub struct GoogleMapsClient {
    base_url: Url,
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceResult>,
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    place_id: String,
    name: String,
    #[serde(default)]
    vicinity: String,
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<RouteResult>,
}

#[derive(Debug, Deserialize)]
struct RouteResult {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    legs: Vec<Leg>,
    #[serde(default)]
    overview_polyline: Option<Polyline>,
}

#[derive(Debug, Deserialize)]
struct Leg {
    distance: TextValue,
    duration: TextValue,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    text: String,
    value: u64,
}

#[derive(Debug, Deserialize)]
struct Polyline {
    points: String,
}

impl GoogleMapsClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| ClientError::InvalidConfigValueError {
            field: "maps.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            client: Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| ClientError::ConfigError {
            message: format!("Cannot build maps URL for '{}': {}", path, e),
        })
    }

    async fn fetch_places(&self, query: &[(&str, String)]) -> Result<PlacesPage> {
        let url = self.endpoint(NEARBY_SEARCH_PATH)?;
        let response = self
            .client
            .get(url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let body: PlacesResponse = response.json().await?;

        match body.status.as_str() {
            "OK" | "ZERO_RESULTS" => {}
            status => {
                if let Some(message) = &body.error_message {
                    tracing::debug!("Places error message: {}", message);
                }
                return Err(ClientError::PlacesError {
                    status: status.to_string(),
                });
            }
        }

        let results = body
            .results
            .into_iter()
            .map(|r| Place {
                place_id: r.place_id,
                name: r.name,
                vicinity: r.vicinity,
                location: r.geometry.location,
            })
            .collect();

        Ok(PlacesPage {
            results,
            next_page_token: body.next_page_token.filter(|t| !t.is_empty()),
        })
    }
}

#[async_trait]
impl PlacesService for GoogleMapsClient {
    async fn nearby_search(&self, request: &NearbySearch) -> Result<PlacesPage> {
        tracing::debug!(
            "Nearby search around {} (radius {}m, type {})",
            request.location,
            request.radius_meters,
            request.place_type
        );
        self.fetch_places(&[
            ("location", request.location.to_query()),
            ("radius", request.radius_meters.to_string()),
            ("type", request.place_type.clone()),
        ])
        .await
    }

    async fn next_page(&self, page_token: &str) -> Result<PlacesPage> {
        self.fetch_places(&[("pagetoken", page_token.to_string())])
            .await
    }
}

#[async_trait]
impl DirectionsService for GoogleMapsClient {
    async fn driving_route(&self, origin: LatLng, destination: LatLng) -> Result<Route> {
        let url = self.endpoint(DIRECTIONS_PATH)?;
        let response = self
            .client
            .get(url)
            .query(&[
                ("origin", origin.to_query()),
                ("destination", destination.to_query()),
                ("mode", "driving".to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let body: DirectionsResponse = response.json().await?;

        if body.status != "OK" {
            return Err(ClientError::DirectionsError {
                status: body.status,
            });
        }

        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::DirectionsError {
                status: "ZERO_RESULTS".to_string(),
            })?;

        let distance_meters: u64 = route.legs.iter().map(|l| l.distance.value).sum();
        let duration_seconds: u64 = route.legs.iter().map(|l| l.duration.value).sum();
        let distance_text = route
            .legs
            .iter()
            .map(|l| l.distance.text.as_str())
            .collect::<Vec<_>>()
            .join(" + ");
        let duration_text = route
            .legs
            .iter()
            .map(|l| l.duration.text.as_str())
            .collect::<Vec<_>>()
            .join(" + ");

        Ok(Route {
            origin,
            destination,
            summary: route.summary,
            distance_text,
            distance_meters,
            duration_text,
            duration_seconds,
            polyline: route.overview_polyline.map(|p| p.points).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_nearby_search_parses_results_and_page_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/maps/api/place/nearbysearch/json")
                    .query_param("location", "40.38,49.86")
                    .query_param("radius", "500")
                    .query_param("type", "museum")
                    .query_param("key", "test-key");
                then.status(200).json_body(serde_json::json!({
                    "status": "OK",
                    "next_page_token": "page-2",
                    "results": [{
                        "place_id": "ChIJ1",
                        "name": "Museum of Miniature Books",
                        "vicinity": "Icheri Sheher",
                        "geometry": {"location": {"lat": 40.366, "lng": 49.836}}
                    }]
                }));
            })
            .await;

        let client = GoogleMapsClient::new(&server.base_url(), "test-key").unwrap();
        let page = client
            .nearby_search(&NearbySearch {
                location: LatLng::new(40.38, 49.86),
                radius_meters: 500,
                place_type: "museum".to_string(),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].vicinity, "Icheri Sheher");
        assert_eq!(page.next_page_token.as_deref(), Some("page-2"));
    }

    #[tokio::test]
    async fn test_places_denied_status_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/maps/api/place/nearbysearch/json");
                then.status(200).json_body(serde_json::json!({
                    "status": "REQUEST_DENIED",
                    "error_message": "The provided API key is invalid.",
                    "results": []
                }));
            })
            .await;

        let client = GoogleMapsClient::new(&server.base_url(), "bad-key").unwrap();
        let err = client.next_page("tok").await.unwrap_err();
        assert!(matches!(err, ClientError::PlacesError { status } if status == "REQUEST_DENIED"));
    }

    #[tokio::test]
    async fn test_driving_route() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/maps/api/directions/json")
                    .query_param("mode", "driving")
                    .query_param("destination", "40.366,49.836");
                then.status(200).json_body(serde_json::json!({
                    "status": "OK",
                    "routes": [{
                        "summary": "Neftchilar Ave",
                        "legs": [{
                            "distance": {"text": "3.4 km", "value": 3400},
                            "duration": {"text": "9 mins", "value": 540}
                        }],
                        "overview_polyline": {"points": "a~l~Fjk~uOwHJy@P"}
                    }]
                }));
            })
            .await;

        let client = GoogleMapsClient::new(&server.base_url(), "test-key").unwrap();
        let route = client
            .driving_route(LatLng::new(40.38, 49.86), LatLng::new(40.366, 49.836))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(route.summary, "Neftchilar Ave");
        assert_eq!(route.distance_meters, 3400);
        assert_eq!(route.duration_text, "9 mins");
    }
}
