use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::services::places_client::provider::PlacesProvider;
use crate::types::place::Prediction;

/// Wraps the provider's prediction lookup. Responses are applied in
/// query-issue order: every query takes a fresh sequence token and a
/// response whose token is no longer the latest is discarded on arrival.
#[derive(Clone)]
pub struct AutocompleteEngine {
    provider: Arc<dyn PlacesProvider>,
    seq: Arc<AtomicU64>,
}

impl AutocompleteEngine {
    pub fn new(provider: Arc<dyn PlacesProvider>) -> Self {
        Self {
            provider,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// `None` means the result is stale and must not be applied. An empty
    /// query resolves synchronously without touching the provider; it still
    /// takes a token so an older in-flight response cannot overwrite the
    /// cleared list.
    pub async fn search(&self, query: &str) -> Option<Vec<Prediction>> {
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        if query.is_empty() {
            return Some(Vec::new());
        }

        let result = self.provider.predictions(query).await;

        if self.seq.load(Ordering::SeqCst) != token {
            debug!("Discarding stale prediction response for {:?}", query);
            return None;
        }

        match result {
            Ok(output) if output.status.is_ok() => Some(output.predictions),
            Ok(output) => {
                // not an error from the user's point of view, just no matches
                warn!("Prediction request returned {}", output.status);
                Some(Vec::new())
            }
            Err(e) => {
                error!("Failed to fetch predictions: {}", e);
                Some(Vec::new())
            }
        }
    }

    /// Invalidates every in-flight prediction request without issuing a new
    /// one. Used when the search box is cleared or a prediction is picked.
    pub fn invalidate(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use tracing_test::traced_test;

    use super::*;
    use crate::search::test_support::{ok_predictions, prediction, FakeProvider};
    use crate::services::places_client::provider::{PredictionsOutput, ProviderStatus};

    fn gen_engine(provider: FakeProvider) -> (AutocompleteEngine, Arc<FakeProvider>) {
        let provider = Arc::new(provider);
        (AutocompleteEngine::new(provider.clone()), provider)
    }

    #[tokio::test]
    async fn empty_query_resolves_synchronously() {
        let (engine, provider) = gen_engine(FakeProvider::new());

        let result = engine.search("").await;

        assert_eq!(result, Some(Vec::new()));
        assert_eq!(provider.prediction_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_query_is_synchronous_after_earlier_searches() {
        let (engine, provider) = gen_engine(FakeProvider::new().with_predictions(
            "spring",
            ok_predictions(vec![prediction("p1", "Spring Valley")]),
        ));

        let _ = engine.search("spring").await;
        let result = engine.search("").await;

        assert_eq!(result, Some(Vec::new()));
        assert_eq!(provider.prediction_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn passes_predictions_through_in_provider_order() {
        let (engine, _provider) = gen_engine(FakeProvider::new().with_predictions(
            "spring",
            ok_predictions(vec![
                prediction("p1", "Spring Valley"),
                prediction("p2", "Springfield"),
                prediction("p3", "Spring Hill"),
            ]),
        ));

        let result = engine.search("spring").await.unwrap();

        let ids: Vec<&str> = result.iter().map(|p| p.place_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[tokio::test]
    #[traced_test]
    async fn non_ok_status_is_treated_as_no_matches() {
        let (engine, _provider) = gen_engine(FakeProvider::new().with_predictions(
            "spring",
            PredictionsOutput {
                status: ProviderStatus::OverQueryLimit,
                predictions: vec![prediction("p1", "Spring Valley")],
            },
        ));

        let result = engine.search("spring").await;

        assert_eq!(result, Some(Vec::new()));
        assert!(logs_contain("Prediction request returned OVER_QUERY_LIMIT"));
    }

    #[tokio::test]
    #[traced_test]
    async fn transport_error_is_treated_as_no_matches() {
        let (engine, _provider) =
            gen_engine(FakeProvider::new().with_prediction_error("spring", "connection reset"));

        let result = engine.search("spring").await;

        assert_eq!(result, Some(Vec::new()));
        assert!(logs_contain("Failed to fetch predictions"));
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let provider = FakeProvider::new()
            .with_predictions(
                "spring",
                ok_predictions(vec![prediction("p1", "Spring Valley")]),
            )
            .with_predictions(
                "springfield",
                ok_predictions(vec![prediction("p2", "Springfield")]),
            );
        let hold = provider.hold("spring");
        let (engine, _provider) = gen_engine(provider);

        let (stale, fresh) = futures::future::join(engine.search("spring"), async {
            hold.entered().await;
            let fresh = engine.search("springfield").await;
            hold.release();
            fresh
        })
        .await;

        assert_eq!(stale, None);
        let fresh = fresh.unwrap();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].place_id, "p2");
    }

    #[tokio::test]
    async fn invalidate_discards_inflight_responses() {
        let provider = FakeProvider::new().with_predictions(
            "spring",
            ok_predictions(vec![prediction("p1", "Spring Valley")]),
        );
        let hold = provider.hold("spring");
        let (engine, _provider) = gen_engine(provider);

        let (stale, ()) = futures::future::join(engine.search("spring"), async {
            hold.entered().await;
            engine.invalidate();
            hold.release();
        })
        .await;

        assert_eq!(stale, None);
    }
}
