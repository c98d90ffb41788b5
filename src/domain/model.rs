use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `lat,lng` as the web services expect it.
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Coordinate as it arrives from the backend: the columns are strings,
/// but some responses carry plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinate {
    Number(f64),
    Text(String),
}

impl RawCoordinate {
    /// Finite numeric value, or `None` when the text is not a number.
    pub fn parse(&self) -> Option<f64> {
        match self {
            RawCoordinate::Number(n) => Some(*n).filter(|n| n.is_finite()),
            RawCoordinate::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

impl Default for RawCoordinate {
    fn default() -> Self {
        RawCoordinate::Text(String::new())
    }
}

impl From<&str> for RawCoordinate {
    fn from(value: &str) -> Self {
        RawCoordinate::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub lat: RawCoordinate,
    #[serde(default)]
    pub lng: RawCoordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub venue_type: Option<String>,
    #[serde(default)]
    pub lat: RawCoordinate,
    #[serde(default)]
    pub lng: RawCoordinate,
    #[serde(default)]
    pub num_likes: u32,
    #[serde(default)]
    pub image_1_link: Option<String>,
    #[serde(default)]
    pub image_2_link: Option<String>,
    #[serde(default)]
    pub image_3_link: Option<String>,
}

impl Venue {
    pub fn images(&self) -> [Option<String>; 3] {
        [
            self.image_1_link.clone(),
            self.image_2_link.clone(),
            self.image_3_link.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub poster_image_link: Option<String>,
    pub venue_id: i64,
    #[serde(default)]
    pub organizer_id: Option<i64>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub num_likes: u32,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub finish: Option<String>,
}

/// `GET /events/{id}` answers either with the bare event or with
/// `{event, location}`; both are normalized into this.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetail {
    pub event: Event,
    pub location: Option<RawLocation>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum EventDetailBody {
    Wrapped {
        event: Event,
        #[serde(default)]
        location: Option<RawLocation>,
    },
    Flat(Event),
}

impl From<EventDetailBody> for EventDetail {
    fn from(body: EventDetailBody) -> Self {
        match body {
            EventDetailBody::Wrapped { event, location } => EventDetail { event, location },
            EventDetailBody::Flat(event) => EventDetail {
                event,
                location: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEvent {
    pub event: Event,
    #[serde(default)]
    pub location: Option<RawLocation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventComment {
    pub id: i64,
    pub event: i64,
    pub content: String,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub venue_id: i64,
    pub organizer_id: i64,
    pub title: String,
    pub description: String,
    pub event_type: String,
    pub date: String,
    pub start: String,
    pub finish: String,
    #[serde(default)]
    pub poster_image_link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventLikeRequest {
    pub event: i64,
}

/// Result of the nearby-places search.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub vicinity: String,
    pub location: LatLng,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacesPage {
    pub results: Vec<Place>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearbySearch {
    pub location: LatLng,
    pub radius_meters: u32,
    pub place_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub origin: LatLng,
    pub destination: LatLng,
    pub summary: String,
    pub distance_text: String,
    pub distance_meters: u64,
    pub duration_text: String,
    pub duration_seconds: u64,
    pub polyline: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub usize);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Reference,
    Venue,
    Event,
}

impl MarkerKind {
    pub fn icon_url(&self) -> &'static str {
        match self {
            MarkerKind::Reference => "https://maps.google.com/mapfiles/ms/icons/blue-dot.png",
            MarkerKind::Event => "https://maps.google.com/mapfiles/ms/icons/red-dot.png",
            MarkerKind::Venue => "https://maps.google.com/mapfiles/ms/icons/green-dot.png",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub title: String,
    pub kind: MarkerKind,
    pub icon_url: &'static str,
    pub icon_size: (u32, u32),
}

impl MarkerSpec {
    pub fn new(position: LatLng, title: impl Into<String>, kind: MarkerKind) -> Self {
        Self {
            position,
            title: title.into(),
            kind,
            icon_url: kind.icon_url(),
            icon_size: (50, 50),
        }
    }
}

/// A marker candidate from the backend, before the coordinate guard.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerCandidate {
    pub source_id: String,
    pub name: String,
    pub vicinity: String,
    pub lat: RawCoordinate,
    pub lng: RawCoordinate,
    pub kind: MarkerKind,
    pub images: [Option<String>; 3],
    pub num_likes: u32,
    pub num_comments: u32,
}

/// Client-local projection of a venue, event or place that got a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedVenue {
    pub marker: MarkerId,
    pub id: String,
    pub name: String,
    pub vicinity: String,
    pub location: LatLng,
    pub is_event_venue: bool,
    pub images: [Option<String>; 3],
    pub num_likes: u32,
    pub num_comments: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreetViewRequest {
    pub location: LatLng,
    pub heading: f64,
    pub pitch: f64,
    pub radius_meters: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoWindowAction {
    ShowDescription,
    ShowRoute,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoWindowContent {
    pub title: String,
    pub vicinity: String,
    pub panorama: StreetViewRequest,
    pub actions: Vec<InfoWindowAction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueCard {
    pub venue_id: i64,
    pub label: String,
    pub image: Option<String>,
    pub marker: Option<MarkerId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub event_id: i64,
    pub title: String,
    pub summary: String,
    pub date_label: String,
    pub poster: Option<String>,
    pub marker: Option<MarkerId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub title: String,
    pub description: String,
    pub images: [String; 3],
    pub likes_and_comments: String,
}

// Auth payloads

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_again: String,
    pub first_name: String,
    pub last_name: String,
    pub is_organizer: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_organizer: u8,
}

impl From<&RegistrationForm> for RegisterRequest {
    fn from(form: &RegistrationForm) -> Self {
        Self {
            username: form.username.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            is_organizer: u8::from(form.is_organizer),
        }
    }
}

/// Claims carried in the identity provider's credential.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityClaims {
    pub sub: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialAuthRequest {
    pub id: String,
    pub email: String,
    pub picture: String,
    pub provider: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
}

impl From<IdentityClaims> for SocialAuthRequest {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            picture: claims.picture,
            provider: "google".to_string(),
            first_name: claims.given_name.unwrap_or_default(),
            last_name: claims.family_name.unwrap_or_default(),
            display_name: claims.name.unwrap_or_default(),
        }
    }
}

/// Body of the auth endpoints; which fields are present depends on the outcome.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthBody {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl AuthBody {
    /// `detail` is a string for most errors and a list for request validation errors.
    pub fn detail_text(&self) -> Option<String> {
        self.detail.as_ref().map(|detail| match detail {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AuthReply {
    pub ok: bool,
    pub status: reqwest::StatusCode,
    pub body: AuthBody,
}
