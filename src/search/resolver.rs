use std::sync::Arc;

use crate::services::places_client::provider::{PlacesProvider, ProviderStatus};
use crate::services::places_client::types::places_service_error::PlacesServiceError;
use crate::types::place::ResolvedPlace;

#[derive(Debug)]
pub enum ResolutionError {
    Provider(PlacesServiceError),
    Status(ProviderStatus),
    MissingDetails,
}

impl std::fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ResolutionError::Provider(e) => write!(f, "Provider error: {}", e),
            ResolutionError::Status(status) => write!(f, "Details request returned {}", status),
            ResolutionError::MissingDetails => {
                write!(f, "Details response carried no place record")
            }
        }
    }
}

/// Resolves a chosen prediction's identifier into a full place record.
#[derive(Clone)]
pub struct PlaceResolver {
    provider: Arc<dyn PlacesProvider>,
}

impl PlaceResolver {
    pub fn new(provider: Arc<dyn PlacesProvider>) -> Self {
        Self { provider }
    }

    pub async fn resolve(&self, place_id: &str) -> Result<ResolvedPlace, ResolutionError> {
        let output = self
            .provider
            .place_details(place_id)
            .await
            .map_err(ResolutionError::Provider)?;

        if !output.status.is_ok() {
            return Err(ResolutionError::Status(output.status));
        }

        output.place.ok_or(ResolutionError::MissingDetails)
    }
}
