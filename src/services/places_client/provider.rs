use async_trait::async_trait;

use crate::types::place::{Prediction, ResolvedPlace};

use super::types::places_service_error::PlacesServiceError;

/// Status code of a provider response, converted once at the boundary. Raw
/// payload shapes never travel further inward than this module's outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Ok,
    ZeroResults,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    UnknownError,
    Other(String),
}

impl ProviderStatus {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "OK" => ProviderStatus::Ok,
            "ZERO_RESULTS" => ProviderStatus::ZeroResults,
            "OVER_QUERY_LIMIT" => ProviderStatus::OverQueryLimit,
            "REQUEST_DENIED" => ProviderStatus::RequestDenied,
            "INVALID_REQUEST" => ProviderStatus::InvalidRequest,
            "UNKNOWN_ERROR" => ProviderStatus::UnknownError,
            other => ProviderStatus::Other(other.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        *self == ProviderStatus::Ok
    }
}

impl std::fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ProviderStatus::Ok => write!(f, "OK"),
            ProviderStatus::ZeroResults => write!(f, "ZERO_RESULTS"),
            ProviderStatus::OverQueryLimit => write!(f, "OVER_QUERY_LIMIT"),
            ProviderStatus::RequestDenied => write!(f, "REQUEST_DENIED"),
            ProviderStatus::InvalidRequest => write!(f, "INVALID_REQUEST"),
            ProviderStatus::UnknownError => write!(f, "UNKNOWN_ERROR"),
            ProviderStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PredictionsOutput {
    pub status: ProviderStatus,
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone)]
pub struct PlaceDetailsOutput {
    pub status: ProviderStatus,
    pub place: Option<ResolvedPlace>,
}

#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Requests the provider's SDK bootstrap. Called at most once per
    /// session, by the provider bootstrap.
    async fn load(&self) -> Result<(), PlacesServiceError>;

    /// Looks up ranked predictions for a non-empty free-text query.
    async fn predictions(&self, input: &str) -> Result<PredictionsOutput, PlacesServiceError>;

    /// Resolves a prediction's identifier into a full place record.
    async fn place_details(&self, place_id: &str)
        -> Result<PlaceDetailsOutput, PlacesServiceError>;
}
