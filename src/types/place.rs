#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// An unresolved candidate returned for a text query. Superseded by the next
/// query's result set and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub place_id: String,
    pub main_text: String,
    pub secondary_text: String,
    pub description: String,
}

/// The full detail record for a place, fetched only after the user picks a
/// prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
    pub place_id: String,
    pub name: String,
    pub formatted_address: String,
    pub phone: Option<String>,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub location: LatLng,
}
