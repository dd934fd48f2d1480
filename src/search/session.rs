use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{error, info};

use crate::search::autocomplete::AutocompleteEngine;
use crate::search::bootstrap::{BootstrapStep, ProviderBootstrap, ProviderReadiness};
use crate::search::history::{HistoryEntry, HistoryStore};
use crate::search::map_session::MapSession;
use crate::search::resolver::PlaceResolver;
use crate::services::places_client::provider::PlacesProvider;
use crate::types::place::{Prediction, ResolvedPlace};

pub const CONFIG_MISSING_MESSAGE: &str = "Google Maps API key is not configured";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load Google Maps";
pub const RESOLUTION_NOTICE: &str = "Could not fetch details for that place, please try again";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiState {
    Loading,
    Idle,
    ShowingHistory,
    ShowingPredictions,
    Selected,
    Error(String),
}

/// Everything the presentation layer needs to render one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub ui: UiState,
    pub query: String,
    pub predictions: Vec<Prediction>,
    pub selected: Option<ResolvedPlace>,
    pub history: Vec<HistoryEntry>,
    pub map: Option<MapSession>,
}

// Built on Ready, together with the map viewport.
struct SessionServices {
    engine: AutocompleteEngine,
    resolver: PlaceResolver,
}

struct SessionState {
    bootstrap: ProviderBootstrap,
    services: Option<SessionServices>,
    ui: UiState,
    query: String,
    predictions: Vec<Prediction>,
    selected: Option<ResolvedPlace>,
    history: HistoryStore,
    map: Option<MapSession>,
    focused: bool,
    resolving: bool,
    notice: Option<String>,
}

impl SessionState {
    /// The view is a function of query, predictions, focus, history and the
    /// current selection; every event recomputes it the same way.
    fn refresh_view(&mut self) {
        self.ui = if !self.query.is_empty() && !self.predictions.is_empty() {
            UiState::ShowingPredictions
        } else if self.query.is_empty() && self.focused && !self.history.is_empty() {
            UiState::ShowingHistory
        } else if self.selected.is_some() {
            UiState::Selected
        } else {
            UiState::Idle
        };
    }
}

/// Coordinates bootstrap, autocomplete, resolution, history and the map
/// viewport into the states the presentation layer renders. The map is
/// mutated here and nowhere else, so marker replacement stays enforced in
/// one place.
#[derive(Clone)]
pub struct SearchSession {
    state: Arc<Mutex<SessionState>>,
}

impl SearchSession {
    pub fn new(provider: Option<Arc<dyn PlacesProvider>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState {
                bootstrap: ProviderBootstrap::new(provider),
                services: None,
                ui: UiState::Loading,
                query: String::new(),
                predictions: Vec::new(),
                selected: None,
                history: HistoryStore::new(),
                map: None,
                focused: false,
                resolving: false,
                notice: None,
            })),
        }
    }

    /// Requests the provider SDK on first call and settles readiness into a
    /// terminal state. Later calls are no-ops; a failure is terminal for the
    /// session.
    pub async fn ensure_ready(&self) -> ProviderReadiness {
        let provider = {
            let mut s = self.state();
            match s.bootstrap.begin() {
                BootstrapStep::Settled(readiness) => return readiness,
                BootstrapStep::MissingCredential => {
                    error!("{}", CONFIG_MISSING_MESSAGE);
                    s.ui = UiState::Error(CONFIG_MISSING_MESSAGE.to_string());
                    return ProviderReadiness::ConfigMissing;
                }
                BootstrapStep::Load(provider) => provider,
            }
        };

        let loaded = match provider.load().await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to load the places SDK: {}", e);
                false
            }
        };

        let mut s = self.state();
        let readiness = s.bootstrap.complete(loaded);
        if readiness == ProviderReadiness::Ready {
            info!("Places SDK loaded");
            s.services = Some(SessionServices {
                engine: AutocompleteEngine::new(provider.clone()),
                resolver: PlaceResolver::new(provider),
            });
            s.map = Some(MapSession::new());
            s.ui = UiState::Idle;
        } else {
            s.ui = UiState::Error(LOAD_FAILED_MESSAGE.to_string());
        }
        readiness
    }

    /// Applies new input text. The prediction list only ever reflects the
    /// most recently issued query; responses overtaken by a newer query are
    /// dropped inside the engine.
    pub async fn on_input(&self, text: &str) {
        let engine = {
            let mut s = self.state();
            let engine = match s.services.as_ref() {
                Some(services) => services.engine.clone(),
                None => return,
            };
            s.query = text.to_string();
            engine
        };

        if let Some(predictions) = engine.search(text).await {
            let mut s = self.state();
            s.predictions = predictions;
            s.refresh_view();
        }
    }

    pub fn on_focus(&self) {
        let mut s = self.state();
        if s.services.is_none() {
            return;
        }
        s.focused = true;
        s.refresh_view();
    }

    /// Resolves a prediction (or history entry) by id. On success the map is
    /// recentered and marked and the place is recorded in history; on
    /// failure the view is left untouched and a transient notice is posted.
    pub async fn on_select(&self, place_id: &str) {
        let (engine, resolver) = {
            let mut s = self.state();
            let handles = match s.services.as_ref() {
                Some(services) => (services.engine.clone(), services.resolver.clone()),
                None => return,
            };
            if s.resolving {
                return;
            }
            s.resolving = true;
            handles
        };

        match resolver.resolve(place_id).await {
            Ok(place) => {
                engine.invalidate();
                let mut s = self.state();
                s.resolving = false;
                s.query = place.formatted_address.clone();
                s.predictions.clear();
                s.history.record(&place);
                if let Some(map) = s.map.as_mut() {
                    map.recenter_and_mark(&place);
                }
                s.selected = Some(place);
                s.refresh_view();
            }
            Err(e) => {
                error!("Failed to resolve place {:?}: {}", place_id, e);
                let mut s = self.state();
                s.resolving = false;
                s.notice = Some(RESOLUTION_NOTICE.to_string());
            }
        }
    }

    /// Clears the search box: query and predictions are emptied and any
    /// in-flight prediction request is invalidated.
    pub fn clear(&self) {
        let mut s = self.state();
        let Some(services) = s.services.as_ref() else {
            return;
        };
        services.engine.invalidate();
        s.query.clear();
        s.predictions.clear();
        s.refresh_view();
    }

    pub fn readiness(&self) -> ProviderReadiness {
        self.state().bootstrap.readiness()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let s = self.state();
        SessionSnapshot {
            ui: s.ui.clone(),
            query: s.query.clone(),
            predictions: s.predictions.clone(),
            selected: s.selected.clone(),
            history: s.history.list().to_vec(),
            map: s.map.clone(),
        }
    }

    /// Pops the pending transient notice, if any.
    pub fn take_notice(&self) -> Option<String> {
        self.state().notice.take()
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().expect("session state poisoned")
    }
}
