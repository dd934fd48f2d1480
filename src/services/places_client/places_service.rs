use async_trait::async_trait;
use urlencoding::encode;

use crate::types::place::{LatLng, Prediction, ResolvedPlace};

use super::provider::{PlaceDetailsOutput, PlacesProvider, PredictionsOutput, ProviderStatus};
use super::types::{
    google_autocomplete_response::GoogleAutocompleteResponse,
    google_place_details_response::GooglePlaceDetailsResponse,
    places_service_error::PlacesServiceError,
};

pub const GOOGLE_MAPS_HOST: &str = "https://maps.googleapis.com";

const DETAIL_FIELDS: &str =
    "place_id,name,formatted_address,formatted_phone_number,rating,user_ratings_total,geometry";

#[derive(Clone)]
pub struct PlacesServiceConfig {
    pub api_key: String,
    pub host: String,
}

#[derive(Clone)]
pub struct PlacesService {
    config: PlacesServiceConfig,
    client: reqwest::Client,
}

impl PlacesService {
    pub fn new(config: PlacesServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PlacesProvider for PlacesService {
    async fn load(&self) -> Result<(), PlacesServiceError> {
        let url = format!(
            "{}/maps/api/js?key={}&libraries=places",
            self.config.host, self.config.api_key
        );

        self.client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| PlacesServiceError::Internal(format!("Failed to fetch the SDK: {}", e)))?;

        Ok(())
    }

    async fn predictions(&self, input: &str) -> Result<PredictionsOutput, PlacesServiceError> {
        let url = format!(
            "{}/maps/api/place/autocomplete/json?input={}&key={}",
            self.config.host,
            encode(input),
            self.config.api_key
        );

        let resp =
            self.client.get(&url).send().await.map_err(|e| {
                PlacesServiceError::Internal(format!("Failed to send request: {}", e))
            })?;

        let body = resp
            .json::<GoogleAutocompleteResponse>()
            .await
            .map_err(|e| {
                PlacesServiceError::Internal(format!("Failed to get response body: {}", e))
            })?;

        Ok(PredictionsOutput {
            status: ProviderStatus::from_raw(&body.status),
            predictions: body
                .predictions
                .into_iter()
                .map(|p| Prediction {
                    place_id: p.place_id,
                    main_text: p.structured_formatting.main_text,
                    secondary_text: p.structured_formatting.secondary_text,
                    description: p.description,
                })
                .collect(),
        })
    }

    async fn place_details(
        &self,
        place_id: &str,
    ) -> Result<PlaceDetailsOutput, PlacesServiceError> {
        let url = format!(
            "{}/maps/api/place/details/json?place_id={}&fields={}&key={}",
            self.config.host,
            encode(place_id),
            DETAIL_FIELDS,
            self.config.api_key
        );

        let resp =
            self.client.get(&url).send().await.map_err(|e| {
                PlacesServiceError::Internal(format!("Failed to send request: {}", e))
            })?;

        let body = resp
            .json::<GooglePlaceDetailsResponse>()
            .await
            .map_err(|e| {
                PlacesServiceError::Internal(format!("Failed to get response body: {}", e))
            })?;

        Ok(PlaceDetailsOutput {
            status: ProviderStatus::from_raw(&body.status),
            place: body.result.map(|r| ResolvedPlace {
                place_id: r.place_id,
                name: r.name,
                formatted_address: r.formatted_address,
                phone: r.formatted_phone_number,
                rating: r.rating,
                rating_count: r.user_ratings_total,
                location: LatLng {
                    lat: r.geometry.location.lat,
                    lng: r.geometry.location.lng,
                },
            }),
        })
    }
}
