use crate::types::place::{LatLng, ResolvedPlace};

pub const INITIAL_CENTER: LatLng = LatLng {
    lat: 20.5937,
    lng: 78.9629,
};
pub const INITIAL_ZOOM: u8 = 5;
pub const STREET_LEVEL_ZOOM: u8 = 15;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub place_id: String,
    pub position: LatLng,
}

/// One map viewport. The current marker is owned here exclusively: a new
/// selection replaces the previous marker instead of accumulating.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSession {
    center: LatLng,
    zoom: u8,
    marker: Option<Marker>,
}

impl MapSession {
    pub fn new() -> Self {
        Self {
            center: INITIAL_CENTER,
            zoom: INITIAL_ZOOM,
            marker: None,
        }
    }

    pub fn recenter_and_mark(&mut self, place: &ResolvedPlace) {
        self.center = place.location;
        self.zoom = STREET_LEVEL_ZOOM;
        self.marker = Some(Marker {
            place_id: place.place_id.clone(),
            position: place.location,
        });
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }
}

impl Default for MapSession {
    fn default() -> Self {
        Self::new()
    }
}
