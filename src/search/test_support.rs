use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::services::places_client::provider::{
    PlaceDetailsOutput, PlacesProvider, PredictionsOutput, ProviderStatus,
};
use crate::services::places_client::types::places_service_error::PlacesServiceError;
use crate::types::place::{LatLng, Prediction, ResolvedPlace};

pub fn prediction(place_id: &str, main_text: &str) -> Prediction {
    Prediction {
        place_id: place_id.to_string(),
        main_text: main_text.to_string(),
        secondary_text: "IL, USA".to_string(),
        description: format!("{}, IL, USA", main_text),
    }
}

pub fn resolved_place(place_id: &str, lat: f64, lng: f64) -> ResolvedPlace {
    ResolvedPlace {
        place_id: place_id.to_string(),
        name: format!("Place {}", place_id),
        formatted_address: format!("{} Main St", place_id),
        phone: None,
        rating: None,
        rating_count: None,
        location: LatLng { lat, lng },
    }
}

pub fn ok_predictions(predictions: Vec<Prediction>) -> PredictionsOutput {
    PredictionsOutput {
        status: ProviderStatus::Ok,
        predictions,
    }
}

pub fn ok_details(place: ResolvedPlace) -> PlaceDetailsOutput {
    PlaceDetailsOutput {
        status: ProviderStatus::Ok,
        place: Some(place),
    }
}

/// Handle for a query gated by [`FakeProvider::hold`]: `entered` fires when
/// the provider receives the request, `release` lets it answer.
pub struct HoldHandle {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl HoldHandle {
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// In-process provider with canned responses and per-query gating, for
/// driving the state machine through interleavings mockito cannot schedule.
#[derive(Default)]
pub struct FakeProvider {
    load_error: Option<PlacesServiceError>,
    predictions: Mutex<HashMap<String, Result<PredictionsOutput, PlacesServiceError>>>,
    details: Mutex<HashMap<String, Result<PlaceDetailsOutput, PlacesServiceError>>>,
    holds: Mutex<HashMap<String, (Arc<Notify>, Arc<Notify>)>>,
    pub load_calls: AtomicUsize,
    pub prediction_calls: AtomicUsize,
    pub details_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_load(message: &str) -> Self {
        Self {
            load_error: Some(PlacesServiceError::Internal(message.to_string())),
            ..Self::default()
        }
    }

    pub fn with_predictions(self, query: &str, output: PredictionsOutput) -> Self {
        self.predictions
            .lock()
            .unwrap()
            .insert(query.to_string(), Ok(output));
        self
    }

    pub fn with_prediction_error(self, query: &str, message: &str) -> Self {
        self.predictions.lock().unwrap().insert(
            query.to_string(),
            Err(PlacesServiceError::Internal(message.to_string())),
        );
        self
    }

    pub fn with_details(self, place_id: &str, output: PlaceDetailsOutput) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(place_id.to_string(), Ok(output));
        self
    }

    pub fn with_details_error(self, place_id: &str, message: &str) -> Self {
        self.details.lock().unwrap().insert(
            place_id.to_string(),
            Err(PlacesServiceError::Internal(message.to_string())),
        );
        self
    }

    /// Gates the given query: the provider signals `entered` on arrival and
    /// blocks until `release`.
    pub fn hold(&self, query: &str) -> HoldHandle {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        self.holds
            .lock()
            .unwrap()
            .insert(query.to_string(), (entered.clone(), release.clone()));
        HoldHandle { entered, release }
    }

    async fn wait_if_held(&self, key: &str) {
        let hold = self
            .holds
            .lock()
            .unwrap()
            .get(key)
            .map(|(entered, release)| (entered.clone(), release.clone()));

        if let Some((entered, release)) = hold {
            entered.notify_one();
            release.notified().await;
        }
    }
}

#[async_trait]
impl PlacesProvider for FakeProvider {
    async fn load(&self) -> Result<(), PlacesServiceError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        match &self.load_error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn predictions(&self, input: &str) -> Result<PredictionsOutput, PlacesServiceError> {
        self.prediction_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_if_held(input).await;

        self.predictions
            .lock()
            .unwrap()
            .get(input)
            .cloned()
            .unwrap_or_else(|| {
                Ok(PredictionsOutput {
                    status: ProviderStatus::ZeroResults,
                    predictions: Vec::new(),
                })
            })
    }

    async fn place_details(
        &self,
        place_id: &str,
    ) -> Result<PlaceDetailsOutput, PlacesServiceError> {
        self.details_calls.fetch_add(1, Ordering::SeqCst);
        self.wait_if_held(place_id).await;

        self.details
            .lock()
            .unwrap()
            .get(place_id)
            .cloned()
            .unwrap_or_else(|| {
                Ok(PlaceDetailsOutput {
                    status: ProviderStatus::Other("NOT_FOUND".to_string()),
                    place: None,
                })
            })
    }
}
