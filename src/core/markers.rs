use crate::domain::model::{LatLng, MarkedVenue, MarkerCandidate, MarkerId, RawCoordinate};

/// Accepts a location only when both parts parse as finite numbers.
pub fn parse_location(lat: &RawCoordinate, lng: &RawCoordinate) -> Option<LatLng> {
    match (lat.parse(), lng.parse()) {
        (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
        _ => {
            tracing::debug!("Skipping marker, unparsable coordinates {:?}/{:?}", lat, lng);
            None
        }
    }
}

impl MarkerCandidate {
    pub fn location(&self) -> Option<LatLng> {
        parse_location(&self.lat, &self.lng)
    }
}

/// Everything that got a marker during this session.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    entries: Vec<MarkedVenue>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: MarkedVenue) {
        self.entries.push(entry);
    }

    pub fn get(&self, marker: MarkerId) -> Option<&MarkedVenue> {
        self.entries.iter().find(|e| e.marker == marker)
    }

    pub fn get_mut(&mut self, marker: MarkerId) -> Option<&mut MarkedVenue> {
        self.entries.iter_mut().find(|e| e.marker == marker)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&MarkedVenue> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkedVenue> {
        self.entries.iter()
    }
}
