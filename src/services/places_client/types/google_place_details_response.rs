use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct GooglePlaceDetailsResponseLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Serialize, Deserialize)]
pub struct GooglePlaceDetailsResponseGeometry {
    pub location: GooglePlaceDetailsResponseLocation,
}

#[derive(Serialize, Deserialize)]
pub struct GooglePlaceDetailsResponseResult {
    pub place_id: String,
    pub name: String,
    pub formatted_address: String,
    pub formatted_phone_number: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub geometry: GooglePlaceDetailsResponseGeometry,
}

#[derive(Serialize, Deserialize)]
pub struct GooglePlaceDetailsResponse {
    pub status: String,
    pub result: Option<GooglePlaceDetailsResponseResult>,
}
